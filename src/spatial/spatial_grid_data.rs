//! Spatial Grid Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in spatial_grid_operations.rs

/// Uniform grid over the square ground footprint of a field.
///
/// Cells are stored as a flat arena: `entries` holds every instance index
/// grouped by cell, and cell `c` owns
/// `entries[cell_offsets[c]..cell_offsets[c] + cell_counts[c]]`.
/// Cell `(cx, cz)` lives at `cz * resolution + cx`.
#[derive(Debug, Clone)]
pub struct SpatialGridData {
    /// Side length of the covered square, centered on the origin
    pub footprint_size: f32,
    /// Cells per side
    pub resolution: u32,
    /// `footprint_size / resolution`
    pub cell_size: f32,

    /// Ground positions (x, z) by instance index
    pub positions: Box<[[f32; 2]]>,
    /// Owning cell by instance index
    pub cell_of: Box<[u32]>,

    pub cell_offsets: Box<[u32]>,
    pub cell_counts: Box<[u32]>,
    pub entries: Box<[u32]>,
}

/// Occupancy statistics for a spatial grid
#[derive(Debug, Clone)]
pub struct SpatialGridStats {
    pub instance_count: usize,
    pub cell_count: usize,
    pub occupied_cells: usize,
    pub max_occupancy: u32,
    pub mean_occupancy: f32,
}
