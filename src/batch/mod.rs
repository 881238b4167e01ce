//! Buffer Allocation Strategy
//!
//! Merged multi-blade geometry, built either by growth or into exactly
//! sized buffers.

pub mod batch_data;
pub mod batch_operations;

pub use batch_data::{AllocationStrategy, BatchLayout, BatchedMeshData, StrategyTiming};
pub use batch_operations::{batch_layout, build_batched, compare_strategies, time_strategy};
