//! Default values for field generation
//!
//! Every tunable in `FieldConfig` falls back to one of these.

/// Field layout
pub mod field {
    /// World-space side length of the square patch
    pub const PATCH_SIZE: f32 = 30.0;
    /// Instance grid resolution (blades per row)
    pub const BLADES_PER_ROW: u32 = 200;
    /// Fraction of the grid spacing used as jitter on each axis.
    /// Must stay below 0.5 so jittered blades never leave their nominal cell.
    pub const JITTER_FRACTION: f32 = 0.4;
}

/// Blade geometry
pub mod blade {
    pub const WIDTH: f32 = 0.1;
    pub const HEIGHT: f32 = 1.0;
    pub const SEGMENT_COUNT: u32 = 6;
    /// Segment count used by the plain prototype field
    pub const BASIC_SEGMENT_COUNT: u32 = 4;
}

/// Per-instance attribute ranges
pub mod attributes {
    use std::f32::consts::PI;

    pub const ROTATION: (f32, f32) = (-PI, PI);
    pub const SCALE_Y: (f32, f32) = (0.7, 1.9);
    pub const BEND_FORWARD: (f32, f32) = (0.05, 0.35);
    pub const BEND_SIDEWAYS: (f32, f32) = (-0.15, 0.15);

    pub const COLOR_R: (f32, f32) = (0.10, 0.25);
    pub const COLOR_G: (f32, f32) = (0.45, 0.75);
    pub const COLOR_B: (f32, f32) = (0.05, 0.15);

    /// Uniform color used when per-instance color is disabled
    pub const BASE_COLOR: [f32; 3] = [0.23, 0.61, 0.25];
}

/// Density-based ambient occlusion
pub mod occlusion {
    pub const GRID_RESOLUTION: u32 = 64;
    /// Search radius expressed in grid spacings when no explicit radius is set
    pub const RADIUS_IN_SPACINGS: f32 = 2.5;
    pub const MAX_NEIGHBORS: u32 = 15;
    pub const STRENGTH: f32 = 0.3;
}

/// Allocation benchmark
pub mod benchmark {
    pub const SIZES: [usize; 5] = [10_000, 20_000, 40_000, 80_000, 120_000];
    pub const SEGMENTS: u32 = 6;
}
