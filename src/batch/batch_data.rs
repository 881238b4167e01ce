//! Batch Mesh Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in batch_operations.rs

use std::fmt;
use std::time::Duration;

/// How batched blade geometry gets its storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocationStrategy {
    /// Start empty and push one element at a time. Reference path for
    /// measurements only.
    Growable,
    /// Size every buffer up front from the layout and write by index
    Preallocated,
}

/// Closed-form buffer sizes for `blade_count` blades
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchLayout {
    pub blade_count: usize,
    pub segment_count: u32,
    pub vertices_per_blade: usize,
    pub floats_per_blade: usize,
    pub triangles_per_blade: usize,
    pub indices_per_blade: usize,
}

/// Many blades merged into one vertex/index buffer pair
#[derive(Debug, Clone)]
pub struct BatchedMeshData {
    pub strategy: AllocationStrategy,
    pub layout: BatchLayout,
    pub vertices: Box<[f32]>,
    /// Indices are offset per blade and address the whole vertex buffer
    pub indices: Box<[u32]>,
    /// Per-blade fills during which a buffer reallocated
    pub growth_events: usize,
}

/// One row of the strategy comparison
#[derive(Debug, Clone)]
pub struct StrategyTiming {
    pub blade_count: usize,
    pub growable: Duration,
    pub preallocated: Duration,
}

impl fmt::Display for StrategyTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} blades | push: {:.2} ms | prealloc: {:.2} ms",
            self.blade_count,
            self.growable.as_secs_f64() * 1000.0,
            self.preallocated.as_secs_f64() * 1000.0
        )
    }
}
