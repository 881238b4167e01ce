//! Field Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in field_operations.rs

use crate::blade::BladeMeshData;
use crate::instance::InstanceBuffersData;
use crate::occlusion::OcclusionStats;
use std::sync::Arc;

/// Everything the renderer needs for one field
#[derive(Debug, Clone)]
pub struct GrassFieldData {
    /// Shared, immutable blade geometry
    pub mesh: Arc<BladeMeshData>,
    /// Per-instance attribute buffers
    pub instances: InstanceBuffersData,
    pub stats: FieldStats,
}

/// Summary of a generation pass
#[derive(Debug, Clone)]
pub struct FieldStats {
    pub instance_count: usize,
    pub spacing: f32,
    /// None when occlusion is disabled
    pub search_radius: Option<f32>,
    /// Density grid resolution after coarsening, None when occlusion is disabled
    pub grid_resolution: Option<u32>,
    pub occlusion: OcclusionStats,
    pub mesh_bytes: usize,
    pub instance_bytes: usize,
}

impl std::fmt::Display for FieldStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Field: {} blades, spacing {:.4}, AO min {:.3} mean {:.3}, mesh {}B, instances {}B",
            self.instance_count,
            self.spacing,
            self.occlusion.min,
            self.occlusion.mean,
            self.mesh_bytes,
            self.instance_bytes
        )
    }
}
