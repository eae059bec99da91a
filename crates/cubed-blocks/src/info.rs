use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::types::{BlockType, FaceRole};

/// Default number of tiles along one edge of the square texture atlas.
pub const DEFAULT_ATLAS_TILES: u16 = 16;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockProperties {
    pub solid: bool,
    pub top: u16,
    pub bottom: u16,
    pub side: u16,
}

impl BlockProperties {
    const fn uniform(solid: bool, tile: u16) -> Self {
        Self {
            solid,
            top: tile,
            bottom: tile,
            side: tile,
        }
    }

    #[inline]
    pub fn tile_for(&self, role: FaceRole) -> u16 {
        match role {
            FaceRole::Top => self.top,
            FaceRole::Bottom => self.bottom,
            FaceRole::Side => self.side,
        }
    }
}

/// Atlas-space rectangle of one tile: `(u0, v0)` to `(u1, v1)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileUv {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

/// Static lookup of solidity and face textures for every block type.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockInfo {
    props: [BlockProperties; BlockType::COUNT],
    atlas_tiles: u16,
}

impl Default for BlockInfo {
    fn default() -> Self {
        let mut props = [BlockProperties::uniform(false, 0); BlockType::COUNT];
        props[BlockType::Grass.index()] = BlockProperties {
            solid: true,
            top: 0,
            bottom: 2,
            side: 3,
        };
        props[BlockType::Dirt.index()] = BlockProperties::uniform(true, 2);
        props[BlockType::Stone.index()] = BlockProperties::uniform(true, 1);
        Self {
            props,
            atlas_tiles: DEFAULT_ATLAS_TILES,
        }
    }
}

impl BlockInfo {
    #[inline]
    pub fn properties(&self, block: BlockType) -> &BlockProperties {
        &self.props[block.index()]
    }

    #[inline]
    pub fn is_solid(&self, block: BlockType) -> bool {
        self.props[block.index()].solid
    }

    #[inline]
    pub fn atlas_tiles(&self) -> u16 {
        self.atlas_tiles
    }

    #[inline]
    pub fn tile_for(&self, block: BlockType, role: FaceRole) -> u16 {
        self.props[block.index()].tile_for(role)
    }

    /// Atlas rectangle for `block` seen from a face with `role`.
    /// Tiles are laid out row-major starting at the top-left of the atlas.
    pub fn tile_uv(&self, block: BlockType, role: FaceRole) -> TileUv {
        let tile = self.tile_for(block, role);
        let n = self.atlas_tiles.max(1);
        let step = 1.0 / n as f32;
        let col = (tile % n) as f32;
        let row = (tile / n) as f32;
        TileUv {
            u0: col * step,
            v0: row * step,
            u1: (col + 1.0) * step,
            v1: (row + 1.0) * step,
        }
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        let mut info = BlockInfo::default();
        if let Some(n) = cfg.atlas_tiles {
            if n == 0 {
                return Err("atlas_tiles must be at least 1".into());
            }
            info.atlas_tiles = n;
        }
        let tile_count = u32::from(info.atlas_tiles) * u32::from(info.atlas_tiles);
        for (name, def) in cfg.blocks {
            let block = BlockType::from_name(&name)
                .ok_or_else(|| format!("unknown block type '{name}'"))?;
            if block.is_air() && def.solid == Some(true) {
                return Err("air cannot be solid".into());
            }
            let slot = &mut info.props[block.index()];
            if let Some(solid) = def.solid {
                slot.solid = solid;
            }
            if let Some(all) = def.all {
                slot.top = all;
                slot.bottom = all;
                slot.side = all;
            }
            if let Some(t) = def.top {
                slot.top = t;
            }
            if let Some(t) = def.bottom {
                slot.bottom = t;
            }
            if let Some(t) = def.side {
                slot.side = t;
            }
            for t in [slot.top, slot.bottom, slot.side] {
                if u32::from(t) >= tile_count {
                    return Err(format!("tile {t} of '{name}' is outside the atlas").into());
                }
            }
        }
        Ok(info)
    }
}

// --- Config ---

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BlocksConfig {
    #[serde(default)]
    pub atlas_tiles: Option<u16>,
    #[serde(default)]
    pub blocks: HashMap<String, BlockDef>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BlockDef {
    #[serde(default)]
    pub solid: Option<bool>,
    #[serde(default)]
    pub all: Option<u16>,
    #[serde(default)]
    pub top: Option<u16>,
    #[serde(default)]
    pub bottom: Option<u16>,
    #[serde(default)]
    pub side: Option<u16>,
}
