//! Instance Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in instance_operations.rs

use crate::constants;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Per-instance attributes exported to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceAttribute {
    /// Ground placement (x, 0, z)
    Offset,
    /// Radians about the vertical axis
    Rotation,
    ScaleY,
    BendForward,
    BendSideways,
    /// Linear rgb
    Color,
    AmbientOcclusion,
}

impl InstanceAttribute {
    pub const ALL: [InstanceAttribute; 7] = [
        InstanceAttribute::Offset,
        InstanceAttribute::Rotation,
        InstanceAttribute::ScaleY,
        InstanceAttribute::BendForward,
        InstanceAttribute::BendSideways,
        InstanceAttribute::Color,
        InstanceAttribute::AmbientOcclusion,
    ];

    /// Floats stored per instance for this attribute
    pub const fn components(self) -> usize {
        match self {
            InstanceAttribute::Offset | InstanceAttribute::Color => 3,
            _ => 1,
        }
    }
}

/// Half-open sampling interval `[min, max)`. `min == max` always yields `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl From<(f32, f32)> for ValueRange {
    fn from((min, max): (f32, f32)) -> Self {
        Self { min, max }
    }
}

/// Bounds for every randomized instance attribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeRanges {
    /// Jitter on each ground axis as a fraction of grid spacing, in [0, 0.5)
    pub jitter_fraction: f32,
    pub rotation: ValueRange,
    pub scale_y: ValueRange,
    pub bend_forward: ValueRange,
    pub bend_sideways: ValueRange,
    pub color_r: ValueRange,
    pub color_g: ValueRange,
    pub color_b: ValueRange,
    /// When false every blade gets `base_color` and no color samples are drawn
    pub per_instance_color: bool,
    pub base_color: [f32; 3],
}

impl Default for AttributeRanges {
    fn default() -> Self {
        use constants::attributes as defaults;

        Self {
            jitter_fraction: constants::field::JITTER_FRACTION,
            rotation: defaults::ROTATION.into(),
            scale_y: defaults::SCALE_Y.into(),
            bend_forward: defaults::BEND_FORWARD.into(),
            bend_sideways: defaults::BEND_SIDEWAYS.into(),
            color_r: defaults::COLOR_R.into(),
            color_g: defaults::COLOR_G.into(),
            color_b: defaults::COLOR_B.into(),
            per_instance_color: true,
            base_color: defaults::BASE_COLOR,
        }
    }
}

/// One blade's attributes, interleaved.
///
/// Used while generating and as an optional single-buffer export layout.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRecord {
    pub offset: [f32; 3],
    pub rotation: f32,
    pub scale_y: f32,
    pub bend_forward: f32,
    pub bend_sideways: f32,
    pub color: [f32; 3],
    /// 1.0 means unoccluded
    pub ambient_occlusion: f32,
    pub _padding: [f32; 1],
}

static_assertions::const_assert_eq!(std::mem::size_of::<InstanceRecord>(), 48);

/// Render-ready flat attribute buffers.
///
/// Each buffer is `count * components` long and is never resized.
#[derive(Debug, Clone)]
pub struct InstanceBuffersData {
    pub count: usize,
    pub offsets: Box<[f32]>,
    pub rotations: Box<[f32]>,
    pub scales_y: Box<[f32]>,
    pub bends_forward: Box<[f32]>,
    pub bends_sideways: Box<[f32]>,
    pub colors: Box<[f32]>,
    pub ambient_occlusion: Box<[f32]>,
}

/// Memory statistics for instance buffers
#[derive(Debug, Clone)]
pub struct InstanceBufferStats {
    pub instance_count: usize,
    pub offsets_bytes: usize,
    pub scalars_bytes: usize,
    pub colors_bytes: usize,
    pub ao_bytes: usize,
}

impl InstanceBufferStats {
    pub fn total_bytes(&self) -> usize {
        self.offsets_bytes + self.scalars_bytes + self.colors_bytes + self.ao_bytes
    }
}
