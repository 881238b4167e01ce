//! Config Operations - Pure DOP Functions
//!
//! Validation, derived quantities and TOML loading for `FieldConfig`.

use super::config_data::{ConfigError, FieldConfig};
use crate::blade::{validate_blade_params, BladeParams};
use crate::constants;
use crate::error::FieldResult;
use crate::instance::instance_operations::{grid_spacing, validate_attribute_ranges, validate_layout};
use crate::instance::AttributeRanges;
use crate::occlusion::{validate_occlusion_params, OcclusionParams};
use crate::spatial::resolution_for_radius;
use std::path::Path;

/// Validate every parameter. Runs before any buffer is allocated.
pub fn validate_config(config: &FieldConfig) -> FieldResult<()> {
    validate_layout(config.patch_size, config.blades_per_row)?;
    validate_blade_params(&config.blade)?;
    validate_attribute_ranges(&config.attributes)?;
    validate_occlusion_params(&config.occlusion)?;

    log::debug!(
        "[validate_config] patch_size={}, blades_per_row={}, segments={}, occlusion={}",
        config.patch_size,
        config.blades_per_row,
        config.blade.segment_count,
        config.occlusion.enabled
    );
    Ok(())
}

/// Nominal distance between neighboring blades
pub fn spacing(config: &FieldConfig) -> f32 {
    grid_spacing(config.patch_size, config.blades_per_row)
}

/// Neighbor search radius, explicit or derived from the spacing
pub fn search_radius(config: &FieldConfig) -> f32 {
    config
        .occlusion
        .search_radius
        .unwrap_or_else(|| spacing(config) * constants::occlusion::RADIUS_IN_SPACINGS)
}

/// Density grid resolution actually used.
///
/// Coarsened below the requested value when needed so that cells are at
/// least one search radius wide, which keeps the 3x3 neighbor scan exact.
pub fn effective_grid_resolution(config: &FieldConfig) -> u32 {
    let requested = config.occlusion.grid_resolution;
    let resolution = resolution_for_radius(config.patch_size, requested, search_radius(config));

    if resolution != requested {
        log::warn!(
            "[effective_grid_resolution] grid_resolution {} -> {} so cells cover radius {:.4}",
            requested,
            resolution,
            search_radius(config)
        );
    }
    resolution
}

/// Parse a TOML document
pub fn parse_config(source: &str) -> Result<FieldConfig, ConfigError> {
    Ok(toml::from_str(source)?)
}

/// Load, parse and validate a TOML file
pub fn load_config(path: impl AsRef<Path>) -> FieldResult<FieldConfig> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let config = parse_config(&source)?;
    validate_config(&config)?;

    log::info!("[load_config] Loaded field config from {}", path.display());
    Ok(config)
}

/// Plain field: 4 segments, uniform color, no occlusion
pub fn preset_basic_field() -> FieldConfig {
    FieldConfig {
        blade: BladeParams {
            segment_count: constants::blade::BASIC_SEGMENT_COUNT,
            ..BladeParams::default()
        },
        attributes: AttributeRanges {
            per_instance_color: false,
            ..AttributeRanges::default()
        },
        occlusion: OcclusionParams {
            enabled: false,
            ..OcclusionParams::default()
        },
        ..FieldConfig::default()
    }
}

/// Full field: per-instance color and density occlusion
pub fn preset_shaded_field() -> FieldConfig {
    FieldConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blade::TaperProfile;
    use crate::error::FieldError;
    use std::io::Write;

    #[test]
    fn test_defaults_validate() {
        assert!(validate_config(&FieldConfig::default()).is_ok());
        assert!(validate_config(&preset_basic_field()).is_ok());
        assert!(validate_config(&preset_shaded_field()).is_ok());
    }

    #[test]
    fn test_invalid_fields_rejected() {
        let cases = [
            FieldConfig { patch_size: 0.0, ..FieldConfig::default() },
            FieldConfig { blades_per_row: 0, ..FieldConfig::default() },
            FieldConfig {
                blade: BladeParams { segment_count: 0, ..BladeParams::default() },
                ..FieldConfig::default()
            },
            FieldConfig {
                blade: BladeParams { width: -0.1, ..BladeParams::default() },
                ..FieldConfig::default()
            },
            FieldConfig {
                occlusion: OcclusionParams { grid_resolution: 0, ..OcclusionParams::default() },
                ..FieldConfig::default()
            },
        ];

        for config in &cases {
            assert!(matches!(
                validate_config(config),
                Err(FieldError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_search_radius_defaults_to_spacings() {
        let config = FieldConfig {
            patch_size: 10.0,
            blades_per_row: 20,
            ..FieldConfig::default()
        };
        assert_eq!(search_radius(&config), 0.5 * 2.5);

        let explicit = FieldConfig {
            occlusion: OcclusionParams {
                search_radius: Some(0.2),
                ..OcclusionParams::default()
            },
            ..config
        };
        assert_eq!(search_radius(&explicit), 0.2);
    }

    #[test]
    fn test_effective_resolution_covers_radius() {
        // Sparse field: radius 2.5 * (10 / 4) = 6.25 on a 10 wide patch
        let sparse = FieldConfig {
            patch_size: 10.0,
            blades_per_row: 4,
            ..FieldConfig::default()
        };
        let resolution = effective_grid_resolution(&sparse);
        assert_eq!(resolution, 1);

        let dense = FieldConfig {
            patch_size: 30.0,
            blades_per_row: 200,
            ..FieldConfig::default()
        };
        let resolution = effective_grid_resolution(&dense);
        assert!(resolution <= dense.occlusion.grid_resolution);
        assert!(dense.patch_size / resolution as f32 >= search_radius(&dense));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = parse_config(
            r#"
            patch_size = 12.0
            blades_per_row = 40

            [blade]
            segment_count = 3
            taper = "linear"

            [occlusion]
            strength = 0.5
            search_radius = 0.6
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.patch_size, 12.0);
        assert_eq!(config.blades_per_row, 40);
        assert_eq!(config.blade.segment_count, 3);
        assert!(matches!(config.blade.taper, TaperProfile::Linear));
        assert_eq!(config.blade.height, constants::blade::HEIGHT);
        assert_eq!(config.occlusion.strength, 0.5);
        assert_eq!(config.occlusion.search_radius, Some(0.6));
        assert_eq!(config.occlusion.max_neighbors, constants::occlusion::MAX_NEIGHBORS);
        assert_eq!(config.attributes, AttributeRanges::default());
    }

    #[test]
    fn test_parse_attribute_ranges() {
        let config = parse_config(
            r#"
            [attributes]
            jitter_fraction = 0.0
            per_instance_color = false
            scale_y = { min = 1.0, max = 1.2 }
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.attributes.jitter_fraction, 0.0);
        assert!(!config.attributes.per_instance_color);
        assert_eq!(config.attributes.scale_y.max, 1.2);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_config("patch_size = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "blades_per_row = 16").expect("write temp file");

        let config = load_config(file.path()).expect("valid config file");
        assert_eq!(config.blades_per_row, 16);
    }

    #[test]
    fn test_load_config_validates() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "patch_size = -1.0").expect("write temp file");

        assert!(matches!(
            load_config(file.path()),
            Err(FieldError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/definitely/not/here/field.toml");
        assert!(matches!(result, Err(FieldError::ConfigLoad { .. })));
    }

    #[test]
    fn test_round_trip_default() {
        let text = toml::to_string(&FieldConfig::default()).expect("serializable config");
        let parsed = parse_config(&text).expect("valid toml");
        assert_eq!(parsed.blades_per_row, constants::field::BLADES_PER_ROW);
        assert_eq!(parsed.occlusion, OcclusionParams::default());
    }
}
