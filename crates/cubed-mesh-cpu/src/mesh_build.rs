use cubed_blocks::TileUv;
use cubed_chunk::{ChunkMesh, Vertex};

use crate::face::Face;

/// Growable vertex/index buffers for one chunk.
#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshBuild {
    /// Appends the quad for `face` of the block at chunk-local `(x, y, z)`.
    pub fn add_face(&mut self, face: Face, x: usize, y: usize, z: usize, tile: TileUv) {
        let base = self.vertices.len() as u32;
        let uvs = [
            [tile.u0, tile.v1],
            [tile.u1, tile.v1],
            [tile.u1, tile.v0],
            [tile.u0, tile.v0],
        ];
        let (fx, fy, fz) = (x as f32, y as f32, z as f32);
        for (corner, uv) in face.corners().into_iter().zip(uvs) {
            self.vertices.push(Vertex {
                pos: [fx + corner[0], fy + corner[1], fz + corner[2]],
                uv,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Finalizes into a chunk mesh; counts record the used length of each buffer.
    pub fn into_mesh(mut self) -> ChunkMesh {
        self.vertices.shrink_to_fit();
        self.indices.shrink_to_fit();
        ChunkMesh {
            num_vertices: self.vertices.len(),
            num_indices: self.indices.len(),
            vertices: self.vertices,
            indices: self.indices,
        }
    }
}
