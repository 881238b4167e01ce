//! End-to-end field generation tests

use super::*;
use crate::blade::blade_mesh_operations::{index_count, vertex_count};
use crate::config::{preset_basic_field, search_radius, FieldConfig};
use crate::error::FieldError;
use crate::instance::instance_operations::positions_xz;
use crate::instance::{AttributeRanges, InstanceAttribute};
use crate::occlusion::{occlusion_from_count, OcclusionParams};
use crate::spatial::brute_force_neighbor_count;

fn small_config() -> FieldConfig {
    FieldConfig {
        patch_size: 10.0,
        blades_per_row: 24,
        ..FieldConfig::default()
    }
}

#[test]
fn test_four_blade_scenario() {
    let config = FieldConfig {
        patch_size: 10.0,
        blades_per_row: 2,
        attributes: AttributeRanges {
            jitter_fraction: 0.0,
            ..AttributeRanges::default()
        },
        ..FieldConfig::default()
    };
    let field = generate_field_seeded(&config, 0).expect("valid config");

    assert_eq!(field.instances.count, 4);
    assert_eq!(
        positions_xz(&field.instances),
        vec![[-2.5, -2.5], [2.5, -2.5], [-2.5, 2.5], [2.5, 2.5]]
    );
}

#[test]
fn test_lone_blade_unoccluded() {
    let config = FieldConfig {
        blades_per_row: 1,
        ..small_config()
    };
    let field = generate_field_seeded(&config, 3).expect("valid config");

    assert_eq!(field.instances.count, 1);
    assert_eq!(field.instances.ambient_occlusion[0], 1.0);
}

#[test]
fn test_buffers_exactly_sized() {
    let field = generate_field_seeded(&small_config(), 9).expect("valid config");
    let count = 24 * 24;

    assert_eq!(field.stats.instance_count, count);
    for kind in InstanceAttribute::ALL {
        assert_eq!(
            crate::instance::attribute(&field.instances, kind).len(),
            count * kind.components()
        );
    }
    assert_eq!(vertex_count(&field.mesh), 2 * (6 + 1));
    assert_eq!(index_count(&field.mesh), 6 * 6);
}

#[test]
fn test_occlusion_matches_brute_force() {
    let config = small_config();
    let field = generate_field_seeded(&config, 42).expect("valid config");

    let positions = positions_xz(&field.instances);
    let radius = search_radius(&config);
    let OcclusionParams {
        max_neighbors,
        strength,
        ..
    } = config.occlusion;

    for (index, &value) in field.instances.ambient_occlusion.iter().enumerate() {
        let count = brute_force_neighbor_count(&positions, index, radius);
        assert_eq!(value, occlusion_from_count(count, max_neighbors, strength));
    }
}

#[test]
fn test_occlusion_in_bounds_and_darkening_present() {
    let field = generate_field_seeded(&small_config(), 5).expect("valid config");
    let strength = small_config().occlusion.strength;

    assert!(field
        .instances
        .ambient_occlusion
        .iter()
        .all(|&ao| ao > 0.0 && ao <= 1.0 && ao >= 1.0 - strength));
    assert!(field.stats.occlusion.min < 1.0);
    assert_eq!(field.stats.search_radius, Some(search_radius(&small_config())));
    assert!(field.stats.grid_resolution.is_some());
}

#[test]
fn test_same_seed_same_field() {
    let a = generate_field_seeded(&small_config(), 77).expect("valid config");
    let b = generate_field_seeded(&small_config(), 77).expect("valid config");

    assert_eq!(a.instances.offsets, b.instances.offsets);
    assert_eq!(a.instances.colors, b.instances.colors);
    assert_eq!(a.instances.ambient_occlusion, b.instances.ambient_occlusion);
}

#[test]
fn test_basic_preset() {
    let config = FieldConfig {
        patch_size: 10.0,
        blades_per_row: 12,
        ..preset_basic_field()
    };
    let field = generate_field_seeded(&config, 1).expect("valid config");

    assert!(field.instances.ambient_occlusion.iter().all(|&ao| ao == 1.0));
    assert!(field.stats.search_radius.is_none());
    assert_eq!(vertex_count(&field.mesh), 10);
    for color in field.instances.colors.chunks_exact(3) {
        assert_eq!(color, &config.attributes.base_color[..]);
    }
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_occlusion_matches_serial() {
    let serial = small_config();
    let parallel = FieldConfig {
        occlusion: OcclusionParams {
            parallel: true,
            ..serial.occlusion
        },
        ..small_config()
    };

    let a = generate_field_seeded(&serial, 13).expect("valid config");
    let b = generate_field_seeded(&parallel, 13).expect("valid config");
    assert_eq!(a.instances.ambient_occlusion, b.instances.ambient_occlusion);
}

#[test]
fn test_sparse_field_stays_exact() {
    // Radius (2.5 spacings) is wider than the requested 64x64 cells
    let config = FieldConfig {
        patch_size: 10.0,
        blades_per_row: 6,
        ..FieldConfig::default()
    };
    let field = generate_field_seeded(&config, 8).expect("valid config");

    let resolution = field.stats.grid_resolution.expect("occlusion enabled");
    assert!(config.patch_size / resolution as f32 >= search_radius(&config));

    let positions = positions_xz(&field.instances);
    for (index, &value) in field.instances.ambient_occlusion.iter().enumerate() {
        let count = brute_force_neighbor_count(&positions, index, search_radius(&config));
        assert_eq!(value, occlusion_from_count(count, 15, 0.3));
    }
}

#[test]
fn test_invalid_config_fails_fast() {
    let config = FieldConfig {
        blades_per_row: 0,
        ..FieldConfig::default()
    };
    assert!(matches!(
        generate_field_seeded(&config, 0),
        Err(FieldError::InvalidParameter { .. })
    ));
}

#[test]
fn test_mesh_is_shared() {
    let field = generate_field_seeded(&small_config(), 2).expect("valid config");
    let handle = std::sync::Arc::clone(&field.mesh);
    assert_eq!(std::sync::Arc::strong_count(&field.mesh), 2);
    assert_eq!(handle.indices.len(), field.mesh.indices.len());
}
