//! Spatial Grid Operations - Pure DOP Functions
//!
//! Construction is a counting sort: one pass to count cell occupancy, a
//! prefix sum for offsets, and one pass to scatter instance indices.
//! Neighbor queries visit the square block of cells within
//! `ceil(radius / cell_size)` rings of the query instance's cell, which is
//! a 3x3 block whenever `radius <= cell_size`.

use super::spatial_grid_data::{SpatialGridData, SpatialGridStats};
use crate::error::{FieldError, FieldResult, OptionExt};
use glam::Vec2;

/// Check grid parameters before allocating anything
pub fn validate_grid(footprint_size: f32, resolution: u32) -> FieldResult<()> {
    if !(footprint_size.is_finite() && footprint_size > 0.0) {
        return Err(FieldError::invalid(
            "footprint_size",
            footprint_size,
            "must be a finite value greater than 0",
        ));
    }
    if resolution < 1 {
        return Err(FieldError::invalid(
            "grid_resolution",
            resolution,
            "must be at least 1",
        ));
    }
    Ok(())
}

/// Cell coordinate along one axis, clamped into `[0, resolution - 1]`
pub fn cell_coord(coord: f32, footprint_size: f32, cell_size: f32, resolution: u32) -> u32 {
    let raw = ((coord + footprint_size * 0.5) / cell_size).floor();
    let max = (resolution - 1) as f32;
    let clamped = raw.clamp(0.0, max) as u32;

    debug_assert!(clamped < resolution, "cell coordinate escaped the grid");
    clamped
}

/// Flat cell index for cell `(cx, cz)`
pub fn cell_index(resolution: u32, cx: u32, cz: u32) -> usize {
    cz as usize * resolution as usize + cx as usize
}

/// Build the grid from ground positions in O(n)
pub fn build_spatial_grid(
    positions: &[[f32; 2]],
    footprint_size: f32,
    resolution: u32,
) -> FieldResult<SpatialGridData> {
    validate_grid(footprint_size, resolution)?;

    if let Some(index) = positions
        .iter()
        .position(|p| !(p[0].is_finite() && p[1].is_finite()))
    {
        return Err(FieldError::invalid(
            "positions",
            format!("{:?} at index {}", positions[index], index),
            "positions must be finite",
        ));
    }
    if u32::try_from(positions.len()).is_err() {
        return Err(FieldError::invalid(
            "positions",
            positions.len(),
            "instance count exceeds u32 index range",
        ));
    }

    let cell_size = footprint_size / resolution as f32;
    let cell_count = resolution as usize * resolution as usize;

    // Pass 1: owning cell and occupancy
    let mut cell_counts = vec![0u32; cell_count].into_boxed_slice();
    let cell_of: Box<[u32]> = positions
        .iter()
        .map(|p| {
            let cx = cell_coord(p[0], footprint_size, cell_size, resolution);
            let cz = cell_coord(p[1], footprint_size, cell_size, resolution);
            let cell = cell_index(resolution, cx, cz);
            cell_counts[cell] += 1;
            cell as u32
        })
        .collect();

    // Exclusive prefix sum
    let mut cell_offsets = vec![0u32; cell_count].into_boxed_slice();
    let mut running = 0u32;
    for (offset, &count) in cell_offsets.iter_mut().zip(cell_counts.iter()) {
        *offset = running;
        running += count;
    }

    // Pass 2: scatter
    let mut cursors = cell_offsets.to_vec();
    let mut entries = vec![0u32; positions.len()].into_boxed_slice();
    for (instance, &cell) in cell_of.iter().enumerate() {
        let slot = &mut cursors[cell as usize];
        entries[*slot as usize] = instance as u32;
        *slot += 1;
    }

    log::debug!(
        "[build_spatial_grid] {} instances in {}x{} cells of {:.4}",
        positions.len(),
        resolution,
        resolution,
        cell_size
    );

    Ok(SpatialGridData {
        footprint_size,
        resolution,
        cell_size,
        positions: positions.into(),
        cell_of,
        cell_offsets,
        cell_counts,
        entries,
    })
}

/// Instance indices stored in cell `(cx, cz)`
pub fn cell_members(grid: &SpatialGridData, cx: u32, cz: u32) -> &[u32] {
    if cx >= grid.resolution || cz >= grid.resolution {
        return &[];
    }
    let cell = cell_index(grid.resolution, cx, cz);
    let start = grid.cell_offsets[cell] as usize;
    let end = start + grid.cell_counts[cell] as usize;
    &grid.entries[start..end]
}

/// Strict distance test shared by the grid and brute-force paths
#[inline]
fn within_radius(a: [f32; 2], b: [f32; 2], radius: f32) -> bool {
    Vec2::from(a).distance(Vec2::from(b)) < radius
}

/// Rings of cells around a query cell that cover `radius`, at least one
pub fn search_rings(grid: &SpatialGridData, radius: f32) -> usize {
    let rings = (radius / grid.cell_size).ceil();
    if rings.is_nan() || rings < 1.0 {
        return 1;
    }
    (rings as usize).min(grid.resolution as usize)
}

/// Count instances `j != index` strictly closer than `radius`.
///
/// Scans `search_rings` rings of cells around `index`; cells past the
/// footprint edge are skipped, there is no wraparound.
pub fn query_neighbor_count(grid: &SpatialGridData, index: usize, radius: f32) -> FieldResult<u32> {
    let origin = grid
        .positions
        .get(index)
        .copied()
        .ok_or_field(|| FieldError::BufferAccess {
            index,
            size: grid.positions.len(),
        })?;

    let cell = grid.cell_of[index] as usize;
    let resolution = grid.resolution as usize;
    let (cx, cz) = (cell % resolution, cell / resolution);

    let rings = search_rings(grid, radius);

    let mut count = 0;
    for nz in cz.saturating_sub(rings)..=(cz + rings).min(resolution - 1) {
        for nx in cx.saturating_sub(rings)..=(cx + rings).min(resolution - 1) {
            for &other in cell_members(grid, nx as u32, nz as u32) {
                let other = other as usize;
                if other != index && within_radius(origin, grid.positions[other], radius) {
                    count += 1;
                }
            }
        }
    }

    Ok(count)
}

/// O(n) reference count used to check the grid
pub fn brute_force_neighbor_count(positions: &[[f32; 2]], index: usize, radius: f32) -> u32 {
    let Some(&origin) = positions.get(index) else {
        return 0;
    };

    positions
        .iter()
        .enumerate()
        .filter(|&(other, &p)| other != index && within_radius(origin, p, radius))
        .count() as u32
}

/// Largest radius answered from the 3x3 block alone
pub fn max_safe_radius(grid: &SpatialGridData) -> f32 {
    grid.cell_size
}

/// Finest resolution not above `requested` whose cells are at least `radius` wide
pub fn resolution_for_radius(footprint_size: f32, requested: u32, radius: f32) -> u32 {
    let requested = requested.max(1);
    if !(radius.is_finite() && radius > 0.0) {
        return requested;
    }

    let mut resolution = ((footprint_size / radius).floor() as u32).clamp(1, requested);
    while resolution > 1 && footprint_size / (resolution as f32) < radius {
        resolution -= 1;
    }
    resolution
}

/// Get occupancy statistics
pub fn grid_stats(grid: &SpatialGridData) -> SpatialGridStats {
    let occupied_cells = grid.cell_counts.iter().filter(|&&c| c > 0).count();
    let max_occupancy = grid.cell_counts.iter().copied().max().unwrap_or(0);
    let mean_occupancy = if occupied_cells == 0 {
        0.0
    } else {
        grid.entries.len() as f32 / occupied_cells as f32
    };

    SpatialGridStats {
        instance_count: grid.entries.len(),
        cell_count: grid.cell_counts.len(),
        occupied_cells,
        max_occupancy,
        mean_occupancy,
    }
}
