use cubed_geom::Vec3;

use crate::constants::CHUNK_SIZE;

/// Floor division toward negative infinity for a positive divisor.
///
/// `floor_div(-1, 16) == -1`, unlike truncating `/` which yields `0`.
#[inline]
pub fn floor_div(v: i32, size: i32) -> i32 {
    debug_assert!(size > 0);
    v.div_euclid(size)
}

/// World positions are clamped to `[-MAX_BLOCK_COORD, MAX_BLOCK_COORD]` before chunk
/// lookup, leaving headroom for window offsets and `origin()` arithmetic.
pub const MAX_BLOCK_COORD: i32 = 1 << 30;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    /// Chunk containing the world-space block `(wx, wy, wz)`.
    #[inline]
    pub fn containing_block(wx: i32, wy: i32, wz: i32) -> Self {
        Self {
            cx: floor_div(wx, CHUNK_SIZE),
            cy: floor_div(wy, CHUNK_SIZE),
            cz: floor_div(wz, CHUNK_SIZE),
        }
    }

    /// Chunk containing a world-space point such as the camera position.
    /// Points beyond [`MAX_BLOCK_COORD`] map to the outermost chunk on that axis.
    #[inline]
    pub fn containing_point(p: Vec3) -> Self {
        let f = p.floor();
        let limit = MAX_BLOCK_COORD as f32;
        let block = |v: f32| v.clamp(-limit, limit) as i32;
        Self::containing_block(block(f.x), block(f.y), block(f.z))
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
            cz: self.cz + dz,
        }
    }

    /// World-space block coordinate of this chunk's `(0,0,0)` corner.
    #[inline]
    pub fn origin(self) -> (i32, i32, i32) {
        (
            self.cx * CHUNK_SIZE,
            self.cy * CHUNK_SIZE,
            self.cz * CHUNK_SIZE,
        )
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx - other.cx);
        let dy = i64::from(self.cy - other.cy);
        let dz = i64::from(self.cz - other.cz);
        dx * dx + dy * dy + dz * dz
    }

    /// True when `self` lies in the inclusive cube `[center - r, center + r]` on every axis.
    #[inline]
    pub fn within(self, center: ChunkCoord, r: i32) -> bool {
        (self.cx - center.cx).abs() <= r
            && (self.cy - center.cy).abs() <= r
            && (self.cz - center.cz).abs() <= r
    }

    /// The six face-adjacent coordinates.
    #[inline]
    pub fn face_neighbors(self) -> [ChunkCoord; 6] {
        [
            self.offset(1, 0, 0),
            self.offset(-1, 0, 0),
            self.offset(0, 1, 0),
            self.offset(0, -1, 0),
            self.offset(0, 0, 1),
            self.offset(0, 0, -1),
        ]
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<ChunkCoord> for (i32, i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy, value.cz)
    }
}
