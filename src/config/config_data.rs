//! Config Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in config_operations.rs

use crate::blade::BladeParams;
use crate::constants;
use crate::instance::AttributeRanges;
use crate::occlusion::OcclusionParams;
use serde::{Deserialize, Serialize};

/// Everything needed to generate one grass field.
///
/// Missing TOML keys fall back to the defaults in `constants`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// World-space side length of the square patch
    pub patch_size: f32,
    /// Instance grid resolution; the field holds `blades_per_row^2` blades
    pub blades_per_row: u32,
    pub blade: BladeParams,
    pub attributes: AttributeRanges,
    pub occlusion: OcclusionParams,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            patch_size: constants::field::PATCH_SIZE,
            blades_per_row: constants::field::BLADES_PER_ROW,
            blade: BladeParams::default(),
            attributes: AttributeRanges::default(),
            occlusion: OcclusionParams::default(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
}
