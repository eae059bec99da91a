use cubed_blocks::BlockType;
use cubed_geom::Vec3;
use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::worldgen::WorldGenParams;

/// Heightmap terrain: a smooth 2D value-noise surface over a stone base.
pub struct Terrain {
    params: WorldGenParams,
    height_noise: FastNoiseLite,
}

impl Terrain {
    pub fn new(params: WorldGenParams) -> Self {
        let mut height_noise = FastNoiseLite::with_seed(params.seed);
        height_noise.set_noise_type(Some(NoiseType::Value));
        height_noise.set_frequency(Some(1.0 / params.spread));
        Self {
            params,
            height_noise,
        }
    }

    /// Surface height of the column at `(wx, wz)`.
    pub fn height_at(&self, wx: i32, wz: i32) -> i32 {
        let n = self.height_noise.get_noise_2d(wx as f32, wz as f32);
        (self.params.base_height as f32 + n * self.params.amplitude).floor() as i32
    }

    /// Block at height `wy` of a column whose surface is at `height`.
    pub fn block_for_height(&self, wy: i32, height: i32) -> BlockType {
        if wy > height {
            BlockType::Air
        } else if wy < self.params.stone_floor {
            BlockType::Stone
        } else if wy == height {
            BlockType::Grass
        } else if height - wy < self.params.dirt_depth {
            BlockType::Dirt
        } else {
            BlockType::Stone
        }
    }

    pub fn block_at(&self, wx: i32, wy: i32, wz: i32) -> BlockType {
        self.block_for_height(wy, self.height_at(wx, wz))
    }

    /// Eye position a few blocks above the surface at the world origin.
    pub fn spawn_position(&self) -> Vec3 {
        Vec3::new(0.0, (self.height_at(0, 0) + 3) as f32, 0.0)
    }
}

impl Default for Terrain {
    fn default() -> Self {
        Self::new(WorldGenParams::default())
    }
}
