//! Occlusion Operations - Pure DOP Functions
//!
//! Turns local blade density into a darkening factor in `[1 - strength, 1]`.
//! Each instance reads the shared grid and writes only its own slot, so the
//! pass can run on the rayon pool without locking.

use super::occlusion_data::{OcclusionParams, OcclusionStats};
use crate::error::{FieldError, FieldResult};
use crate::spatial::{max_safe_radius, query_neighbor_count, search_rings, SpatialGridData};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Validate occlusion parameters
pub fn validate_occlusion_params(params: &OcclusionParams) -> FieldResult<()> {
    if params.grid_resolution < 1 {
        return Err(FieldError::invalid(
            "occlusion.grid_resolution",
            params.grid_resolution,
            "must be at least 1",
        ));
    }
    if params.max_neighbors < 1 {
        return Err(FieldError::invalid(
            "occlusion.max_neighbors",
            params.max_neighbors,
            "must be at least 1",
        ));
    }
    if !(0.0..=1.0).contains(&params.strength) {
        return Err(FieldError::invalid(
            "occlusion.strength",
            params.strength,
            "must lie in [0, 1]",
        ));
    }
    if let Some(radius) = params.search_radius {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(FieldError::invalid(
                "occlusion.search_radius",
                radius,
                "must be a finite value greater than 0",
            ));
        }
    }
    Ok(())
}

/// Darkening factor for `count` neighbors.
///
/// Never increases as `count` grows.
pub fn occlusion_from_count(count: u32, max_neighbors: u32, strength: f32) -> f32 {
    let density = (count as f32 / max_neighbors as f32).min(1.0);
    1.0 - density * strength
}

/// Fill `out` with one occlusion value per grid instance
pub fn compute_occlusion(
    grid: &SpatialGridData,
    params: &OcclusionParams,
    radius: f32,
    out: &mut [f32],
) -> FieldResult<()> {
    validate_occlusion_params(params)?;

    if out.len() != grid.positions.len() {
        return Err(FieldError::BufferAccess {
            index: out.len(),
            size: grid.positions.len(),
        });
    }

    if !(radius.is_finite() && radius > 0.0) {
        return Err(FieldError::invalid(
            "radius",
            radius,
            "must be a finite value greater than 0",
        ));
    }

    if radius > max_safe_radius(grid) {
        log::debug!(
            "[compute_occlusion] radius {:.4} spans {} rings of {:.4} cells",
            radius,
            search_rings(grid, radius),
            grid.cell_size
        );
    }

    let shade = |index: usize, slot: &mut f32| -> FieldResult<()> {
        let count = query_neighbor_count(grid, index, radius)?;
        *slot = occlusion_from_count(count, params.max_neighbors, params.strength);
        Ok(())
    };

    if params.parallel {
        #[cfg(feature = "parallel")]
        {
            return out
                .par_iter_mut()
                .enumerate()
                .try_for_each(|(index, slot)| shade(index, slot));
        }

        #[cfg(not(feature = "parallel"))]
        log::warn!("[compute_occlusion] built without the `parallel` feature, running serially");
    }

    out.iter_mut()
        .enumerate()
        .try_for_each(|(index, slot)| shade(index, slot))
}

/// Summarize an occlusion buffer
pub fn occlusion_stats(values: &[f32]) -> OcclusionStats {
    if values.is_empty() {
        return OcclusionStats {
            count: 0,
            min: 1.0,
            max: 1.0,
            mean: 1.0,
            unoccluded: 0,
        };
    }

    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64;

    OcclusionStats {
        count: values.len(),
        min,
        max,
        mean: mean as f32,
        unoccluded: values.iter().filter(|&&v| v == 1.0).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::build_spatial_grid;

    #[test]
    fn test_exact_endpoints() {
        let strength = 0.3;
        assert_eq!(occlusion_from_count(0, 15, strength), 1.0);
        assert_eq!(occlusion_from_count(15, 15, strength), 1.0 - strength);
        assert_eq!(occlusion_from_count(400, 15, strength), 1.0 - strength);
    }

    #[test]
    fn test_monotonic_in_density() {
        let mut previous = occlusion_from_count(0, 15, 0.3);
        for count in 1..60 {
            let value = occlusion_from_count(count, 15, 0.3);
            assert!(value <= previous);
            assert!((0.7 - 1e-6..=1.0).contains(&value));
            previous = value;
        }
    }

    #[test]
    fn test_isolated_and_crowded_instances() {
        let params = OcclusionParams::default();
        let radius = 1.0;

        // Instance 0 sits alone in a corner; instance 1 is surrounded by 20 blades
        let mut positions = vec![[-4.5, -4.5], [2.0, 2.0]];
        for k in 0..20 {
            let angle = k as f32 * std::f32::consts::TAU / 20.0;
            positions.push([2.0 + 0.5 * angle.cos(), 2.0 + 0.5 * angle.sin()]);
        }

        let grid = build_spatial_grid(&positions, 10.0, 10).expect("valid grid");
        let mut out = vec![0.0; positions.len()];
        compute_occlusion(&grid, &params, radius, &mut out).expect("occlusion pass");

        assert_eq!(out[0], 1.0);
        assert_eq!(out[1], 1.0 - params.strength);
    }

    #[test]
    fn test_single_instance_unoccluded() {
        let grid = build_spatial_grid(&[[0.3, -0.2]], 10.0, 4).expect("valid grid");
        let mut out = [0.0];
        compute_occlusion(&grid, &OcclusionParams::default(), 2.5, &mut out)
            .expect("occlusion pass");
        assert_eq!(out[0], 1.0);
    }

    #[test]
    fn test_radius_wider_than_cell_counts_all_neighbors() {
        let grid = build_spatial_grid(&[[0.1, 0.1], [2.1, 0.1]], 10.0, 10).expect("valid grid");
        let params = OcclusionParams {
            max_neighbors: 1,
            ..OcclusionParams::default()
        };

        let mut out = [0.0; 2];
        compute_occlusion(&grid, &params, 2.5, &mut out).expect("occlusion pass");
        assert_eq!(out, [1.0 - params.strength; 2]);
    }

    #[test]
    fn test_bad_radius_rejected_before_writes() {
        let grid = build_spatial_grid(&[[0.0, 0.0], [0.1, 0.0]], 10.0, 4).expect("valid grid");
        let mut out = [0.5; 2];

        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                compute_occlusion(&grid, &OcclusionParams::default(), radius, &mut out),
                Err(FieldError::InvalidParameter { .. })
            ));
        }
        assert_eq!(out, [0.5; 2]);
    }

    #[test]
    fn test_output_length_checked() {
        let grid = build_spatial_grid(&[[0.0, 0.0], [1.0, 1.0]], 10.0, 4).expect("valid grid");
        let mut out = [0.0; 3];
        assert!(compute_occlusion(&grid, &OcclusionParams::default(), 1.0, &mut out).is_err());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let base = OcclusionParams::default();

        let bad = [
            OcclusionParams { grid_resolution: 0, ..base },
            OcclusionParams { max_neighbors: 0, ..base },
            OcclusionParams { strength: 1.5, ..base },
            OcclusionParams { strength: -0.1, ..base },
            OcclusionParams { search_radius: Some(0.0), ..base },
        ];
        for params in bad {
            assert!(validate_occlusion_params(&params).is_err(), "{:?}", params);
        }
        assert!(validate_occlusion_params(&base).is_ok());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(11);
        let positions: Vec<[f32; 2]> = (0..2_000)
            .map(|_| [rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)])
            .collect();
        let grid = build_spatial_grid(&positions, 10.0, 20).expect("valid grid");

        let serial = OcclusionParams::default();
        let parallel = OcclusionParams { parallel: true, ..serial };

        let mut a = vec![0.0; positions.len()];
        let mut b = vec![0.0; positions.len()];
        compute_occlusion(&grid, &serial, 0.4, &mut a).expect("serial pass");
        compute_occlusion(&grid, &parallel, 0.4, &mut b).expect("parallel pass");
        assert_eq!(a, b);
    }

    #[test]
    fn test_occlusion_stats() {
        let stats = occlusion_stats(&[1.0, 0.7, 0.85, 1.0]);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.min, 0.7);
        assert_eq!(stats.max, 1.0);
        assert_eq!(stats.unoccluded, 2);
        assert!((stats.mean - 0.8875).abs() < 1e-6);
    }
}
