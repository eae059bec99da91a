/// Block kinds stored in chunk arrays. `Air` is the empty sentinel.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum BlockType {
    #[default]
    Air = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
}

impl BlockType {
    pub const COUNT: usize = 4;
    pub const ALL: [BlockType; Self::COUNT] = [
        BlockType::Air,
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Stone,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_air(self) -> bool {
        matches!(self, BlockType::Air)
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockType::Air => "air",
            BlockType::Grass => "grass",
            BlockType::Dirt => "dirt",
            BlockType::Stone => "stone",
        }
    }

    pub fn from_name(name: &str) -> Option<BlockType> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

/// Which texture slot of a block a face samples from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FaceRole {
    Top,
    Bottom,
    Side,
}
