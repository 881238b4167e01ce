//! Ambient Occlusion Estimator
//!
//! Density proxy, not a light transport term.

pub mod occlusion_data;
pub mod occlusion_operations;

pub use occlusion_data::{OcclusionParams, OcclusionStats};
pub use occlusion_operations::{
    compute_occlusion, occlusion_from_count, occlusion_stats, validate_occlusion_params,
};
