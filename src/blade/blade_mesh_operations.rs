//! Blade Mesh Operations - Pure DOP Functions
//!
//! All functions are pure: take data, return results, no side effects.
//! No methods, no self, just transformations.

use super::blade_mesh_data::{
    BladeMeshData, BladeMeshStats, BladeParams, TaperProfile, FLOATS_PER_VERTEX,
    INDICES_PER_TRIANGLE,
};
use crate::error::{FieldError, FieldResult};

/// Slack allowed when checking custom taper curves
const TAPER_TOLERANCE: f32 = 1e-6;

/// Evaluate a taper profile at normalized height `t`
pub fn taper_factor(profile: TaperProfile, t: f32) -> f32 {
    match profile {
        TaperProfile::Quadratic => 1.0 - t * t,
        TaperProfile::Linear => 1.0 - t,
        TaperProfile::Constant => 1.0,
        TaperProfile::Custom(curve) => curve(t),
    }
}

/// Full blade width at normalized height `t`
pub fn taper_width(params: &BladeParams, t: f32) -> f32 {
    params.width * taper_factor(params.taper, t)
}

/// Rings along the blade, base and tip included
pub fn ring_count(segment_count: u32) -> usize {
    segment_count as usize + 1
}

/// Vertices in one blade: a left/right pair per ring
pub fn vertices_per_blade(segment_count: u32) -> usize {
    ring_count(segment_count) * 2
}

/// Triangles in one blade: two per ring-to-ring quad
pub fn triangles_per_blade(segment_count: u32) -> usize {
    segment_count as usize * 2
}

/// Index entries in one blade
pub fn indices_per_blade(segment_count: u32) -> usize {
    triangles_per_blade(segment_count) * INDICES_PER_TRIANGLE
}

/// Reject degenerate geometry and malformed taper curves
pub fn validate_blade_params(params: &BladeParams) -> FieldResult<()> {
    if !(params.width.is_finite() && params.width > 0.0) {
        return Err(FieldError::invalid(
            "blade.width",
            params.width,
            "must be a finite value greater than 0",
        ));
    }

    if !(params.height.is_finite() && params.height > 0.0) {
        return Err(FieldError::invalid(
            "blade.height",
            params.height,
            "must be a finite value greater than 0",
        ));
    }

    if params.segment_count < 1 {
        return Err(FieldError::invalid(
            "blade.segment_count",
            params.segment_count,
            "must be at least 1",
        ));
    }

    validate_taper(params.taper, params.segment_count)
}

/// Check profile(0) == 1, range [0, 1] and monotonic falloff at every ring
fn validate_taper(profile: TaperProfile, segment_count: u32) -> FieldResult<()> {
    let base = taper_factor(profile, 0.0);
    if (base - 1.0).abs() > TAPER_TOLERANCE {
        return Err(FieldError::invalid(
            "blade.taper",
            base,
            "profile must equal 1 at the base",
        ));
    }

    let mut previous = base;
    for ring in 1..ring_count(segment_count) {
        let t = ring as f32 / segment_count as f32;
        let factor = taper_factor(profile, t);

        if !(-TAPER_TOLERANCE..=1.0 + TAPER_TOLERANCE).contains(&factor) {
            return Err(FieldError::invalid(
                "blade.taper",
                factor,
                "profile must stay within [0, 1]",
            ));
        }

        if factor > previous + TAPER_TOLERANCE {
            return Err(FieldError::invalid(
                "blade.taper",
                factor,
                "profile must not widen towards the tip",
            ));
        }
        previous = factor;
    }

    Ok(())
}

/// Write one blade into exactly sized slices.
///
/// `positions` must hold `vertices_per_blade * 3` floats and `indices`
/// `indices_per_blade` entries. Indices are offset by `base_vertex` so
/// several blades can share one buffer.
pub fn write_blade(
    params: &BladeParams,
    positions: &mut [f32],
    indices: &mut [u32],
    base_vertex: u32,
) {
    let segments = params.segment_count;
    debug_assert_eq!(positions.len(), vertices_per_blade(segments) * FLOATS_PER_VERTEX);
    debug_assert_eq!(indices.len(), indices_per_blade(segments));

    let mut v = 0;
    for ring in 0..ring_count(segments) {
        let t = ring as f32 / segments as f32;
        let y = params.height * t;
        let half = taper_width(params, t) * 0.5;

        positions[v] = -half;
        positions[v + 1] = y;
        positions[v + 2] = 0.0;

        positions[v + 3] = half;
        positions[v + 4] = y;
        positions[v + 5] = 0.0;
        v += 6;
    }

    let mut i = 0;
    for segment in 0..segments {
        let lower = base_vertex + segment * 2;
        let upper = lower + 2;

        indices[i] = lower;
        indices[i + 1] = lower + 1;
        indices[i + 2] = upper;

        indices[i + 3] = lower + 1;
        indices[i + 4] = upper + 1;
        indices[i + 5] = upper;
        i += 6;
    }
}

/// Build the shared blade mesh
pub fn build_blade_mesh(params: &BladeParams) -> FieldResult<BladeMeshData> {
    validate_blade_params(params)?;

    let vertex_floats = vertices_per_blade(params.segment_count) * FLOATS_PER_VERTEX;
    let index_total = indices_per_blade(params.segment_count);

    let mut positions = vec![0.0f32; vertex_floats].into_boxed_slice();
    let mut indices = vec![0u32; index_total].into_boxed_slice();
    write_blade(params, &mut positions, &mut indices, 0);

    log::debug!(
        "[build_blade_mesh] {} segments -> {} vertices, {} indices",
        params.segment_count,
        vertex_floats / FLOATS_PER_VERTEX,
        index_total
    );

    Ok(BladeMeshData {
        positions,
        indices,
        segment_count: params.segment_count,
    })
}

/// Get vertex count
pub fn vertex_count(mesh: &BladeMeshData) -> usize {
    mesh.positions.len() / FLOATS_PER_VERTEX
}

/// Get index count
pub fn index_count(mesh: &BladeMeshData) -> usize {
    mesh.indices.len()
}

/// Get triangle count
pub fn triangle_count(mesh: &BladeMeshData) -> usize {
    mesh.indices.len() / INDICES_PER_TRIANGLE
}

/// Read a single vertex position
pub fn vertex(mesh: &BladeMeshData, index: usize) -> FieldResult<[f32; 3]> {
    let count = vertex_count(mesh);
    if index >= count {
        return Err(FieldError::BufferAccess { index, size: count });
    }

    let base = index * FLOATS_PER_VERTEX;
    Ok([
        mesh.positions[base],
        mesh.positions[base + 1],
        mesh.positions[base + 2],
    ])
}

/// Raw position bytes for upload
pub fn position_bytes(mesh: &BladeMeshData) -> &[u8] {
    bytemuck::cast_slice(&mesh.positions)
}

/// Raw index bytes for upload
pub fn index_bytes(mesh: &BladeMeshData) -> &[u8] {
    bytemuck::cast_slice(&mesh.indices)
}

/// Get memory statistics
pub fn memory_stats(mesh: &BladeMeshData) -> BladeMeshStats {
    BladeMeshStats {
        vertex_count: vertex_count(mesh),
        index_count: index_count(mesh),
        positions_bytes: std::mem::size_of_val(&*mesh.positions),
        indices_bytes: std::mem::size_of_val(&*mesh.indices),
    }
}
