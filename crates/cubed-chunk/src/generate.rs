use cubed_geom::Vec3;
use cubed_world::{CHUNK_SIZE, ChunkCoord, Terrain};

use crate::blocks::BlockArray;

/// Deterministic source of initial block data.
pub trait TerrainGenerator: Send + Sync {
    /// Writes the blocks of the chunk whose minimum corner is at the given world origin.
    fn fill(&self, blocks: &mut BlockArray, origin_x: i32, origin_y: i32, origin_z: i32);

    /// Starting viewpoint for the first streaming pass.
    fn spawn_position(&self) -> Vec3;
}

impl TerrainGenerator for Terrain {
    fn fill(&self, blocks: &mut BlockArray, origin_x: i32, origin_y: i32, origin_z: i32) {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let height = self.height_at(origin_x + x, origin_z + z);
                for y in 0..CHUNK_SIZE {
                    let wy = origin_y + y;
                    if wy > height {
                        break;
                    }
                    let block = self.block_for_height(wy, height);
                    blocks.set_local(x as usize, y as usize, z as usize, block);
                }
            }
        }
    }

    fn spawn_position(&self) -> Vec3 {
        Terrain::spawn_position(self)
    }
}

/// Fresh block array for `coord`, filled by `generator`.
pub fn generate_blocks(generator: &dyn TerrainGenerator, coord: ChunkCoord) -> BlockArray {
    let mut blocks = BlockArray::new();
    let (ox, oy, oz) = coord.origin();
    generator.fill(&mut blocks, ox, oy, oz);
    blocks
}
