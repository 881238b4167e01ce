//! Occlusion Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in occlusion_operations.rs

use crate::constants;
use serde::{Deserialize, Serialize};

/// Density-based darkening parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcclusionParams {
    /// When false every blade keeps an occlusion of 1.0
    pub enabled: bool,
    /// Requested cells per side of the density grid. Coarsened when the
    /// cells would be narrower than the search radius.
    pub grid_resolution: u32,
    /// Neighbor search radius. Defaults to 2.5 grid spacings when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_radius: Option<f32>,
    /// Neighbor count at which darkening saturates
    pub max_neighbors: u32,
    /// Darkening applied at saturation, in [0, 1]
    pub strength: f32,
    /// Spread the per-instance queries over the rayon pool
    pub parallel: bool,
}

impl Default for OcclusionParams {
    fn default() -> Self {
        Self {
            enabled: true,
            grid_resolution: constants::occlusion::GRID_RESOLUTION,
            search_radius: None,
            max_neighbors: constants::occlusion::MAX_NEIGHBORS,
            strength: constants::occlusion::STRENGTH,
            parallel: false,
        }
    }
}

/// Summary of an occlusion buffer
#[derive(Debug, Clone)]
pub struct OcclusionStats {
    pub count: usize,
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    /// Instances left at exactly 1.0
    pub unoccluded: usize,
}
