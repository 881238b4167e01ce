//! Blade Mesh Module
//!
//! Builds the single tapered blade every instance shares.

// Data structures
pub mod blade_mesh_data;
// Pure functions
pub mod blade_mesh_operations;

// Re-export data structures
pub use blade_mesh_data::*;
// Re-export operations
pub use blade_mesh_operations::{build_blade_mesh, taper_factor, taper_width, validate_blade_params};
