//! Spatial Density Index
//!
//! Uniform grid for bounded-radius neighbor counting over blade positions.

pub mod spatial_grid_data;
pub mod spatial_grid_operations;

pub use spatial_grid_data::{SpatialGridData, SpatialGridStats};
pub use spatial_grid_operations::{
    brute_force_neighbor_count, build_spatial_grid, cell_members, grid_stats, max_safe_radius,
    query_neighbor_count, resolution_for_radius, search_rings,
};
