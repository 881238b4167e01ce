//! Batch Mesh Operations - Pure DOP Functions
//!
//! Two ways of filling the same merged blade buffers. The preallocated path
//! is the one production code uses; the growable path only exists so the
//! difference can be measured.

use super::batch_data::{AllocationStrategy, BatchLayout, BatchedMeshData, StrategyTiming};
use crate::blade::blade_mesh_data::{BladeParams, TaperProfile, FLOATS_PER_VERTEX};
use crate::blade::blade_mesh_operations::{
    indices_per_blade, ring_count, taper_width, triangles_per_blade, validate_blade_params,
    vertices_per_blade, write_blade,
};
use crate::error::{FieldError, FieldResult};
use std::time::{Duration, Instant};

/// Compute buffer sizes, rejecting layouts whose totals overflow
pub fn batch_layout(blade_count: usize, segment_count: u32) -> FieldResult<BatchLayout> {
    if segment_count < 1 {
        return Err(FieldError::invalid(
            "segment_count",
            segment_count,
            "must be at least 1",
        ));
    }

    let layout = BatchLayout {
        blade_count,
        segment_count,
        vertices_per_blade: vertices_per_blade(segment_count),
        floats_per_blade: vertices_per_blade(segment_count) * FLOATS_PER_VERTEX,
        triangles_per_blade: triangles_per_blade(segment_count),
        indices_per_blade: indices_per_blade(segment_count),
    };

    let vertex_total = blade_count.checked_mul(layout.vertices_per_blade);
    let fits = vertex_total.is_some_and(|v| u32::try_from(v).is_ok())
        && blade_count.checked_mul(layout.floats_per_blade).is_some()
        && blade_count.checked_mul(layout.indices_per_blade).is_some();
    if !fits {
        return Err(FieldError::invalid(
            "blade_count",
            blade_count,
            "merged vertex count exceeds u32 index range",
        ));
    }

    Ok(layout)
}

/// Floats in the merged vertex buffer
pub fn total_floats(layout: &BatchLayout) -> usize {
    layout.blade_count * layout.floats_per_blade
}

/// Entries in the merged index buffer
pub fn total_indices(layout: &BatchLayout) -> usize {
    layout.blade_count * layout.indices_per_blade
}

/// Build `blade_count` merged blades with the chosen strategy
pub fn build_batched(
    strategy: AllocationStrategy,
    blade_count: usize,
    params: &BladeParams,
) -> FieldResult<BatchedMeshData> {
    validate_blade_params(params)?;
    let layout = batch_layout(blade_count, params.segment_count)?;

    Ok(match strategy {
        AllocationStrategy::Growable => build_growable(layout, params),
        AllocationStrategy::Preallocated => build_preallocated(layout, params),
    })
}

/// 1 if `buffer` reallocated since its capacity was `before`
fn grew<T>(buffer: &Vec<T>, before: usize) -> usize {
    usize::from(buffer.capacity() != before)
}

fn build_growable(layout: BatchLayout, params: &BladeParams) -> BatchedMeshData {
    let segments = params.segment_count;
    let mut vertices: Vec<f32> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut growth_events = 0;

    // Capacity is sampled once per blade so the pushes stay bare
    for _ in 0..layout.blade_count {
        let before = vertices.capacity();
        for ring in 0..ring_count(segments) {
            let t = ring as f32 / segments as f32;
            let y = params.height * t;
            let half = taper_width(params, t) * 0.5;

            for value in [-half, y, 0.0, half, y, 0.0] {
                vertices.push(value);
            }
        }
        growth_events += grew(&vertices, before);
    }

    for blade in 0..layout.blade_count {
        let base = (blade * layout.vertices_per_blade) as u32;
        let before = indices.capacity();
        for segment in 0..segments {
            let lower = base + segment * 2;
            let upper = lower + 2;

            for value in [lower, lower + 1, upper, lower + 1, upper + 1, upper] {
                indices.push(value);
            }
        }
        growth_events += grew(&indices, before);
    }

    BatchedMeshData {
        strategy: AllocationStrategy::Growable,
        layout,
        vertices: vertices.into_boxed_slice(),
        indices: indices.into_boxed_slice(),
        growth_events,
    }
}

fn build_preallocated(layout: BatchLayout, params: &BladeParams) -> BatchedMeshData {
    let mut vertices = vec![0.0f32; total_floats(&layout)].into_boxed_slice();
    let mut indices = vec![0u32; total_indices(&layout)].into_boxed_slice();

    let blades = vertices
        .chunks_exact_mut(layout.floats_per_blade)
        .zip(indices.chunks_exact_mut(layout.indices_per_blade));
    for (blade, (blade_vertices, blade_indices)) in blades.enumerate() {
        let base_vertex = (blade * layout.vertices_per_blade) as u32;
        write_blade(params, blade_vertices, blade_indices, base_vertex);
    }

    BatchedMeshData {
        strategy: AllocationStrategy::Preallocated,
        layout,
        vertices,
        indices,
        growth_events: 0,
    }
}

/// Build once and report the wall time
pub fn time_strategy(
    strategy: AllocationStrategy,
    blade_count: usize,
    params: &BladeParams,
) -> FieldResult<(BatchedMeshData, Duration)> {
    let start = Instant::now();
    let data = build_batched(strategy, blade_count, params)?;
    Ok((data, start.elapsed()))
}

/// Blade shape used for strategy measurements: unit width and height
pub fn benchmark_params(segment_count: u32) -> BladeParams {
    BladeParams {
        width: 1.0,
        height: 1.0,
        segment_count,
        taper: TaperProfile::Quadratic,
    }
}

/// Time both strategies at each blade count and log one line per size
pub fn compare_strategies(sizes: &[usize], segment_count: u32) -> FieldResult<Vec<StrategyTiming>> {
    let params = benchmark_params(segment_count);
    let mut timings = Vec::with_capacity(sizes.len());

    for &blade_count in sizes {
        let (_, growable) = time_strategy(AllocationStrategy::Growable, blade_count, &params)?;
        let (_, preallocated) =
            time_strategy(AllocationStrategy::Preallocated, blade_count, &params)?;

        let timing = StrategyTiming {
            blade_count,
            growable,
            preallocated,
        };
        log::info!("[compare_strategies] {}", timing);
        timings.push(timing);
    }

    Ok(timings)
}

/// Bytes held by the merged buffers
pub fn total_bytes(data: &BatchedMeshData) -> usize {
    std::mem::size_of_val(&*data.vertices) + std::mem::size_of_val(&*data.indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preallocated_sizes() {
        let segments = 6;
        let params = benchmark_params(segments);

        for blade_count in [1usize, 10, 1000] {
            let data = build_batched(AllocationStrategy::Preallocated, blade_count, &params)
                .expect("valid layout");

            assert_eq!(data.vertices.len(), blade_count * 2 * (segments as usize + 1) * 3);
            assert_eq!(data.indices.len(), blade_count * segments as usize * 2 * 3);
            assert_eq!(data.growth_events, 0);
        }
    }

    #[test]
    fn test_layout_formulas() {
        let layout = batch_layout(3, 6).expect("valid layout");
        assert_eq!(layout.vertices_per_blade, 14);
        assert_eq!(layout.floats_per_blade, 42);
        assert_eq!(layout.triangles_per_blade, 12);
        assert_eq!(layout.indices_per_blade, 36);
        assert_eq!(total_floats(&layout), 126);
        assert_eq!(total_indices(&layout), 108);
    }

    #[test]
    fn test_strategies_agree() {
        let params = benchmark_params(5);
        let growable = build_batched(AllocationStrategy::Growable, 250, &params).expect("valid layout");
        let preallocated =
            build_batched(AllocationStrategy::Preallocated, 250, &params).expect("valid layout");

        assert_eq!(growable.vertices, preallocated.vertices);
        assert_eq!(growable.indices, preallocated.indices);
        assert!(growable.growth_events > 0);
        assert_eq!(preallocated.growth_events, 0);
    }

    #[test]
    fn test_growth_counted_per_blade() {
        let blade_count = 5_000;
        let data = build_batched(AllocationStrategy::Growable, blade_count, &benchmark_params(6))
            .expect("valid layout");

        // Doubling growth reallocates far less often than once per blade
        assert!(data.growth_events > 0);
        assert!(data.growth_events < blade_count / 10);
    }

    #[test]
    fn test_indices_address_their_own_blade() {
        let data = build_batched(AllocationStrategy::Preallocated, 4, &benchmark_params(2))
            .expect("valid layout");
        let vertex_total = (data.vertices.len() / 3) as u32;

        assert!(data.indices.iter().all(|&i| i < vertex_total));
        // Second blade starts at vertex 6
        assert_eq!(&data.indices[12..18], &[6, 7, 8, 7, 9, 8]);
    }

    #[test]
    fn test_zero_blades() {
        let data = build_batched(AllocationStrategy::Preallocated, 0, &benchmark_params(6))
            .expect("valid layout");
        assert!(data.vertices.is_empty());
        assert!(data.indices.is_empty());
        assert_eq!(total_bytes(&data), 0);
    }

    #[test]
    fn test_zero_segments_rejected() {
        assert!(batch_layout(10, 0).is_err());
        assert!(build_batched(AllocationStrategy::Growable, 10, &benchmark_params(0)).is_err());
    }

    #[test]
    fn test_overflowing_layout_rejected() {
        assert!(batch_layout(usize::MAX / 2, 6).is_err());
        assert!(batch_layout(u32::MAX as usize, 6).is_err());
    }

    #[test]
    fn test_compare_strategies_reports_each_size() {
        let timings = compare_strategies(&[10, 100], 6).expect("valid sizes");
        assert_eq!(timings.len(), 2);
        assert_eq!(timings[1].blade_count, 100);

        let line = timings[0].to_string();
        assert!(line.starts_with("10 blades | push: "));
        assert!(line.contains(" ms | prealloc: "));
    }
}
