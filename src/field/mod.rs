/// Grass Field Generation
///
/// Ties mesh building, instance synthesis and occlusion into a single pass.

// Data structures
pub mod field_data;
// Pure functions
pub mod field_operations;

pub use field_data::{FieldStats, GrassFieldData};
pub use field_operations::{apply_occlusion, generate_field, generate_field_seeded};

// Tests module
#[cfg(test)]
mod tests;
