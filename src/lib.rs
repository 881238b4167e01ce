// Meadow - Procedural grass field generation
//
// Data-Oriented Programming (DOP) layout:
// - *_data modules hold plain data structures
// - *_operations modules hold pure functions that transform that data
//
// A generation pass produces one shared blade mesh plus flat, exactly sized
// per-instance attribute buffers ready for instanced rendering. Wind,
// bending and world placement are applied per frame by the renderer.

// Constants module
pub mod constants;

// Core modules
pub mod error;

// Generation stages
pub mod batch;
pub mod blade;
pub mod config;
pub mod field;
pub mod instance;
pub mod occlusion;
pub mod spatial;

pub use error::{FieldError, FieldResult, OptionExt};

// === Core Types ===
pub use blade::{BladeMeshData, BladeParams, TaperProfile};
pub use config::{load_config, parse_config, validate_config, FieldConfig};
pub use field::{generate_field, generate_field_seeded, FieldStats, GrassFieldData};
pub use instance::{AttributeRanges, InstanceAttribute, InstanceBuffersData, InstanceRecord, ValueRange};
pub use occlusion::OcclusionParams;
pub use spatial::SpatialGridData;

// Allocation strategy comparison
pub use batch::{AllocationStrategy, BatchedMeshData, StrategyTiming};

// Re-export rand so callers can seed the same generator type
pub use rand;
