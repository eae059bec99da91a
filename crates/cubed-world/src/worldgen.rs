use std::error::Error;

use serde::Deserialize;

/// Terrain shaping parameters; every field falls back to its default when absent from TOML.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldGenParams {
    pub seed: i32,
    /// Mean surface height in blocks.
    pub base_height: i32,
    /// Maximum deviation of the surface from `base_height`.
    pub amplitude: f32,
    /// Horizontal distance, in blocks, between noise lattice points.
    pub spread: f32,
    /// Everything strictly below this height is stone.
    pub stone_floor: i32,
    /// Depth of the dirt band under the grass layer.
    pub dirt_depth: i32,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self {
            seed: 1337,
            base_height: 128,
            amplitude: 16.0,
            spread: 16.0,
            stone_floor: 40,
            dirt_depth: 7,
        }
    }
}

impl WorldGenParams {
    /// Parses a standalone `[worldgen]`-style table and validates it.
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let params: WorldGenParams = toml::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if !(self.spread > 0.0) {
            return Err(format!("worldgen.spread must be positive, got {}", self.spread).into());
        }
        if self.amplitude < 0.0 {
            return Err(format!("worldgen.amplitude must not be negative, got {}", self.amplitude).into());
        }
        if self.dirt_depth < 0 {
            return Err("worldgen.dirt_depth must not be negative".into());
        }
        Ok(())
    }
}
