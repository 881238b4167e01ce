//! Field Operations - Pure DOP Functions
//!
//! One canonical generation pass: blade mesh, instance attributes, then the
//! density grid and occlusion. Prototype variations (segment count, color,
//! occlusion on or off) are all configuration.

use super::field_data::{FieldStats, GrassFieldData};
use crate::blade::blade_mesh_operations::{self, build_blade_mesh};
use crate::config::{effective_grid_resolution, search_radius, spacing, validate_config, FieldConfig};
use crate::error::FieldResult;
use crate::instance::instance_operations::{self, positions_xz, synthesize_instances};
use crate::instance::InstanceBuffersData;
use crate::occlusion::{compute_occlusion, occlusion_stats};
use crate::spatial::build_spatial_grid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Generate a complete field. Fails before allocating if the config is invalid.
pub fn generate_field<R: Rng + ?Sized>(
    config: &FieldConfig,
    rng: &mut R,
) -> FieldResult<GrassFieldData> {
    validate_config(config)?;

    let mesh = build_blade_mesh(&config.blade)?;
    let mut instances =
        synthesize_instances(config.patch_size, config.blades_per_row, &config.attributes, rng)?;

    let (radius, resolution) = if config.occlusion.enabled {
        let (radius, resolution) = apply_occlusion(config, &mut instances)?;
        (Some(radius), Some(resolution))
    } else {
        log::debug!("[generate_field] Occlusion disabled, blades stay unoccluded");
        (None, None)
    };

    let stats = FieldStats {
        instance_count: instances.count,
        spacing: spacing(config),
        search_radius: radius,
        grid_resolution: resolution,
        occlusion: occlusion_stats(&instances.ambient_occlusion),
        mesh_bytes: blade_mesh_operations::memory_stats(&mesh).total_bytes(),
        instance_bytes: instance_operations::memory_stats(&instances).total_bytes(),
    };
    log::info!("[generate_field] {}", stats);

    Ok(GrassFieldData {
        mesh: Arc::new(mesh),
        instances,
        stats,
    })
}

/// Generate a field from a fixed seed
pub fn generate_field_seeded(config: &FieldConfig, seed: u64) -> FieldResult<GrassFieldData> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_field(config, &mut rng)
}

/// Rebuild the density grid and overwrite the occlusion buffer.
///
/// Returns the search radius and grid resolution used.
pub fn apply_occlusion(
    config: &FieldConfig,
    instances: &mut InstanceBuffersData,
) -> FieldResult<(f32, u32)> {
    let radius = search_radius(config);
    let resolution = effective_grid_resolution(config);

    let grid = build_spatial_grid(&positions_xz(instances), config.patch_size, resolution)?;
    compute_occlusion(
        &grid,
        &config.occlusion,
        radius,
        &mut instances.ambient_occlusion,
    )?;

    log::debug!(
        "[apply_occlusion] radius {:.4}, {}x{} grid, parallel={}",
        radius,
        resolution,
        resolution,
        config.occlusion.parallel
    );
    Ok((radius, resolution))
}
