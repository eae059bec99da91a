/// Position (chunk-local) plus atlas texture coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

/// Renderable surface of one chunk, as handed to the external draw path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub num_vertices: usize,
    pub num_indices: usize,
}

impl ChunkMesh {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_indices == 0
    }

    /// Used portion of the vertex buffer.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices[..self.num_vertices]
    }

    /// Used portion of the index buffer.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices[..self.num_indices]
    }
}
