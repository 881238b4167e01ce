//! Field Configuration
//!
//! `FieldConfig` plus validation and TOML loading.

pub mod config_data;
pub mod config_operations;

pub use config_data::{ConfigError, FieldConfig};
pub use config_operations::{
    effective_grid_resolution, load_config, parse_config, preset_basic_field,
    preset_shaded_field, search_radius, spacing, validate_config,
};
