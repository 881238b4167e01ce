//! Blade Mesh Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in blade_mesh_operations.rs

use crate::constants;
use serde::{Deserialize, Serialize};

/// Components per vertex position (x, y, z)
pub const FLOATS_PER_VERTEX: usize = 3;

/// Indices per triangle
pub const INDICES_PER_TRIANGLE: usize = 3;

/// Width falloff from base (t = 0) to tip (t = 1).
///
/// Every profile maps 0 to 1 and never increases with t.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaperProfile {
    /// `1 - t^2`
    Quadratic,
    /// `1 - t`
    Linear,
    /// Untapered strip
    Constant,
    /// Caller supplied curve, checked at every ring before use
    #[serde(skip)]
    Custom(fn(f32) -> f32),
}

impl Default for TaperProfile {
    fn default() -> Self {
        TaperProfile::Quadratic
    }
}

/// Geometry parameters for the shared blade mesh
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BladeParams {
    /// Full width at the base
    pub width: f32,
    /// Height of the tip ring
    pub height: f32,
    /// Number of ring-to-ring quads
    pub segment_count: u32,
    pub taper: TaperProfile,
}

impl Default for BladeParams {
    fn default() -> Self {
        Self {
            width: constants::blade::WIDTH,
            height: constants::blade::HEIGHT,
            segment_count: constants::blade::SEGMENT_COUNT,
            taper: TaperProfile::default(),
        }
    }
}

/// Single tapered blade in local space, shared by every instance.
///
/// Vertex `2i` is the left and `2i + 1` the right vertex of ring `i`.
#[derive(Debug, Clone)]
pub struct BladeMeshData {
    /// Flat xyz positions
    pub positions: Box<[f32]>,
    /// Triangle list
    pub indices: Box<[u32]>,
    pub segment_count: u32,
}

/// Memory usage statistics for a blade mesh
#[derive(Debug, Clone)]
pub struct BladeMeshStats {
    pub vertex_count: usize,
    pub index_count: usize,
    pub positions_bytes: usize,
    pub indices_bytes: usize,
}

impl BladeMeshStats {
    pub fn total_bytes(&self) -> usize {
        self.positions_bytes + self.indices_bytes
    }
}
