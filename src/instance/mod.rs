/// Instance Attribute System
///
/// Per-blade placement and appearance, stored as one flat buffer per
/// attribute. Purely data-oriented - no instance "objects", just tables of data.

// Data structures
pub mod instance_data;
// Pure functions
pub mod instance_operations;

// Re-export data structures
pub use instance_data::*;
// Re-export operations
pub use instance_operations::{
    attribute, create_instance_buffers, interleave, positions_xz, read_record,
    synthesize_instances, write_record,
};
