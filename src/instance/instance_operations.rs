//! Instance Operations - Pure DOP Functions
//!
//! All functions are pure: take data, return results, no side effects.
//! The random source is always passed in, so a seeded generator gives
//! reproducible fields.

use super::instance_data::{
    AttributeRanges, InstanceAttribute, InstanceBufferStats, InstanceBuffersData, InstanceRecord,
    ValueRange,
};
use crate::error::{FieldError, FieldResult};
use bytemuck::Zeroable;
use rand::Rng;

/// Draw uniformly from `[min, max)`, or return `min` for an empty range
pub fn sample_range<R: Rng + ?Sized>(rng: &mut R, range: ValueRange) -> f32 {
    if range.max <= range.min {
        range.min
    } else {
        rng.gen_range(range.min..range.max)
    }
}

/// Distance between neighboring nominal grid positions
pub fn grid_spacing(patch_size: f32, blades_per_row: u32) -> f32 {
    patch_size / blades_per_row as f32
}

/// Total instances for a square grid, None on overflow
pub fn instance_total(blades_per_row: u32) -> Option<usize> {
    (blades_per_row as usize).checked_mul(blades_per_row as usize)
}

/// Bytes of the widest attribute buffer, None if it cannot be allocated
pub fn widest_buffer_bytes(count: usize) -> Option<usize> {
    let widest = InstanceAttribute::ALL
        .iter()
        .map(|kind| kind.components())
        .max()
        .unwrap_or(1);

    count
        .checked_mul(widest * std::mem::size_of::<f32>())
        .filter(|&bytes| bytes <= isize::MAX as usize)
}

fn validate_range(field: &str, range: ValueRange) -> FieldResult<()> {
    if !(range.min.is_finite() && range.max.is_finite()) {
        return Err(FieldError::invalid(
            field,
            format!("{}..{}", range.min, range.max),
            "bounds must be finite",
        ));
    }
    if range.min > range.max {
        return Err(FieldError::invalid(
            field,
            format!("{}..{}", range.min, range.max),
            "min must not exceed max",
        ));
    }
    Ok(())
}

fn validate_channel(field: &str, range: ValueRange) -> FieldResult<()> {
    validate_range(field, range)?;
    if range.min < 0.0 || range.max > 1.0 {
        return Err(FieldError::invalid(
            field,
            format!("{}..{}", range.min, range.max),
            "color channels must lie in [0, 1]",
        ));
    }
    Ok(())
}

/// Validate attribute bounds
pub fn validate_attribute_ranges(ranges: &AttributeRanges) -> FieldResult<()> {
    if !(0.0..0.5).contains(&ranges.jitter_fraction) {
        return Err(FieldError::invalid(
            "attributes.jitter_fraction",
            ranges.jitter_fraction,
            "must lie in [0, 0.5)",
        ));
    }

    validate_range("attributes.rotation", ranges.rotation)?;
    validate_range("attributes.scale_y", ranges.scale_y)?;
    if ranges.scale_y.min <= 0.0 {
        return Err(FieldError::invalid(
            "attributes.scale_y",
            ranges.scale_y.min,
            "vertical scale must be greater than 0",
        ));
    }
    validate_range("attributes.bend_forward", ranges.bend_forward)?;
    validate_range("attributes.bend_sideways", ranges.bend_sideways)?;

    validate_channel("attributes.color_r", ranges.color_r)?;
    validate_channel("attributes.color_g", ranges.color_g)?;
    validate_channel("attributes.color_b", ranges.color_b)?;

    if ranges
        .base_color
        .iter()
        .any(|c| !(0.0..=1.0).contains(c))
    {
        return Err(FieldError::invalid(
            "attributes.base_color",
            format!("{:?}", ranges.base_color),
            "color channels must lie in [0, 1]",
        ));
    }

    Ok(())
}

/// Validate field layout parameters
pub fn validate_layout(patch_size: f32, blades_per_row: u32) -> FieldResult<()> {
    if !(patch_size.is_finite() && patch_size > 0.0) {
        return Err(FieldError::invalid(
            "patch_size",
            patch_size,
            "must be a finite value greater than 0",
        ));
    }
    if blades_per_row < 1 {
        return Err(FieldError::invalid(
            "blades_per_row",
            blades_per_row,
            "must be at least 1",
        ));
    }
    if instance_total(blades_per_row)
        .and_then(widest_buffer_bytes)
        .is_none()
    {
        return Err(FieldError::invalid(
            "blades_per_row",
            blades_per_row,
            "attribute buffers overflow",
        ));
    }
    Ok(())
}

/// Allocate exactly sized buffers for `count` instances.
///
/// Occlusion starts at 1.0 (unoccluded).
pub fn create_instance_buffers(count: usize) -> InstanceBuffersData {
    let zeroed = |attribute: InstanceAttribute| {
        vec![0.0f32; count * attribute.components()].into_boxed_slice()
    };

    InstanceBuffersData {
        count,
        offsets: zeroed(InstanceAttribute::Offset),
        rotations: zeroed(InstanceAttribute::Rotation),
        scales_y: zeroed(InstanceAttribute::ScaleY),
        bends_forward: zeroed(InstanceAttribute::BendForward),
        bends_sideways: zeroed(InstanceAttribute::BendSideways),
        colors: zeroed(InstanceAttribute::Color),
        ambient_occlusion: vec![1.0f32; count].into_boxed_slice(),
    }
}

/// Generate every instance of a `blades_per_row` x `blades_per_row` field
pub fn synthesize_instances<R: Rng + ?Sized>(
    patch_size: f32,
    blades_per_row: u32,
    ranges: &AttributeRanges,
    rng: &mut R,
) -> FieldResult<InstanceBuffersData> {
    validate_layout(patch_size, blades_per_row)?;
    validate_attribute_ranges(ranges)?;

    let count = instance_total(blades_per_row).unwrap_or_default();
    let spacing = grid_spacing(patch_size, blades_per_row);
    let half = patch_size * 0.5;
    let jitter = spacing * ranges.jitter_fraction;
    let jitter_range = ValueRange {
        min: -jitter,
        max: jitter,
    };

    let mut buffers = create_instance_buffers(count);

    for row in 0..blades_per_row {
        for col in 0..blades_per_row {
            let index = row as usize * blades_per_row as usize + col as usize;

            let x = (col as f32 + 0.5) * spacing - half + sample_range(rng, jitter_range);
            let z = (row as f32 + 0.5) * spacing - half + sample_range(rng, jitter_range);

            let rotation = sample_range(rng, ranges.rotation);
            let scale_y = sample_range(rng, ranges.scale_y);
            let bend_forward = sample_range(rng, ranges.bend_forward);
            let bend_sideways = sample_range(rng, ranges.bend_sideways);

            let color = if ranges.per_instance_color {
                [
                    sample_range(rng, ranges.color_r),
                    sample_range(rng, ranges.color_g),
                    sample_range(rng, ranges.color_b),
                ]
            } else {
                ranges.base_color
            };

            let record = InstanceRecord {
                offset: [x, 0.0, z],
                rotation,
                scale_y,
                bend_forward,
                bend_sideways,
                color,
                ambient_occlusion: 1.0,
                _padding: [0.0],
            };
            write_record(&mut buffers, index, &record)?;
        }
    }

    log::debug!(
        "[synthesize_instances] {} instances, spacing {:.4}, jitter +/-{:.4}",
        count,
        spacing,
        jitter
    );

    Ok(buffers)
}

fn check_index(buffers: &InstanceBuffersData, index: usize) -> FieldResult<()> {
    if index >= buffers.count {
        return Err(FieldError::BufferAccess {
            index,
            size: buffers.count,
        });
    }
    Ok(())
}

/// Scatter one record into the flat buffers
pub fn write_record(
    buffers: &mut InstanceBuffersData,
    index: usize,
    record: &InstanceRecord,
) -> FieldResult<()> {
    check_index(buffers, index)?;

    buffers.offsets[index * 3..index * 3 + 3].copy_from_slice(&record.offset);
    buffers.rotations[index] = record.rotation;
    buffers.scales_y[index] = record.scale_y;
    buffers.bends_forward[index] = record.bend_forward;
    buffers.bends_sideways[index] = record.bend_sideways;
    buffers.colors[index * 3..index * 3 + 3].copy_from_slice(&record.color);
    buffers.ambient_occlusion[index] = record.ambient_occlusion;
    Ok(())
}

/// Gather one record from the flat buffers
pub fn read_record(buffers: &InstanceBuffersData, index: usize) -> FieldResult<InstanceRecord> {
    check_index(buffers, index)?;
    Ok(gather_record(buffers, index))
}

/// Caller guarantees `index < buffers.count`
fn gather_record(buffers: &InstanceBuffersData, index: usize) -> InstanceRecord {
    let mut record = InstanceRecord::zeroed();
    record
        .offset
        .copy_from_slice(&buffers.offsets[index * 3..index * 3 + 3]);
    record.rotation = buffers.rotations[index];
    record.scale_y = buffers.scales_y[index];
    record.bend_forward = buffers.bends_forward[index];
    record.bend_sideways = buffers.bends_sideways[index];
    record
        .color
        .copy_from_slice(&buffers.colors[index * 3..index * 3 + 3]);
    record.ambient_occlusion = buffers.ambient_occlusion[index];
    record
}

/// Ground-plane position of one instance
pub fn position_xz(buffers: &InstanceBuffersData, index: usize) -> FieldResult<[f32; 2]> {
    check_index(buffers, index)?;
    Ok([buffers.offsets[index * 3], buffers.offsets[index * 3 + 2]])
}

/// Ground-plane positions of all instances, in instance order
pub fn positions_xz(buffers: &InstanceBuffersData) -> Vec<[f32; 2]> {
    buffers
        .offsets
        .chunks_exact(3)
        .map(|offset| [offset[0], offset[2]])
        .collect()
}

/// Borrow the flat buffer for one attribute
pub fn attribute(buffers: &InstanceBuffersData, kind: InstanceAttribute) -> &[f32] {
    match kind {
        InstanceAttribute::Offset => &buffers.offsets,
        InstanceAttribute::Rotation => &buffers.rotations,
        InstanceAttribute::ScaleY => &buffers.scales_y,
        InstanceAttribute::BendForward => &buffers.bends_forward,
        InstanceAttribute::BendSideways => &buffers.bends_sideways,
        InstanceAttribute::Color => &buffers.colors,
        InstanceAttribute::AmbientOcclusion => &buffers.ambient_occlusion,
    }
}

/// Raw bytes of one attribute buffer for upload
pub fn attribute_bytes(buffers: &InstanceBuffersData, kind: InstanceAttribute) -> &[u8] {
    bytemuck::cast_slice(attribute(buffers, kind))
}

/// Interleave all instances into a single record array
pub fn interleave(buffers: &InstanceBuffersData) -> Vec<InstanceRecord> {
    (0..buffers.count)
        .map(|index| gather_record(buffers, index))
        .collect()
}

/// Get instance count
pub fn instance_count(buffers: &InstanceBuffersData) -> usize {
    buffers.count
}

/// Get memory statistics
pub fn memory_stats(buffers: &InstanceBuffersData) -> InstanceBufferStats {
    let bytes = |slice: &[f32]| std::mem::size_of_val(slice);

    InstanceBufferStats {
        instance_count: buffers.count,
        offsets_bytes: bytes(&buffers.offsets),
        scalars_bytes: bytes(&buffers.rotations)
            + bytes(&buffers.scales_y)
            + bytes(&buffers.bends_forward)
            + bytes(&buffers.bends_sideways),
        colors_bytes: bytes(&buffers.colors),
        ao_bytes: bytes(&buffers.ambient_occlusion),
    }
}
