//! Generates a grass field and prints buffer and occlusion statistics
//!
//! Usage: `cargo run --example field_stats -- [field.toml] [seed]`

use anyhow::Context;
use meadow::blade::blade_mesh_operations;
use meadow::instance::{instance_operations, InstanceAttribute};
use meadow::{generate_field_seeded, load_config, FieldConfig};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(&path).with_context(|| format!("loading {}", path))?,
        None => FieldConfig::default(),
    };
    let seed = match args.next() {
        Some(value) => value.parse::<u64>().context("seed must be an unsigned integer")?,
        None => 0,
    };

    let field = generate_field_seeded(&config, seed)?;

    println!("Grass Field");
    println!("===========");
    println!("{}", field.stats);
    println!();

    let mesh_stats = blade_mesh_operations::memory_stats(&field.mesh);
    println!("Blade mesh:");
    println!("  Vertices: {}", mesh_stats.vertex_count);
    println!("  Triangles: {}", blade_mesh_operations::triangle_count(&field.mesh));
    println!("  Memory: {} bytes", mesh_stats.total_bytes());
    println!();

    println!("Instance buffers:");
    for kind in InstanceAttribute::ALL {
        println!(
            "  {:?}: {} floats ({} bytes)",
            kind,
            instance_operations::attribute(&field.instances, kind).len(),
            instance_operations::attribute_bytes(&field.instances, kind).len()
        );
    }
    println!();

    let occlusion = &field.stats.occlusion;
    println!("Occlusion:");
    match (field.stats.search_radius, field.stats.grid_resolution) {
        (Some(radius), Some(resolution)) => {
            println!("  Search radius: {:.4}", radius);
            println!("  Grid: {}x{}", resolution, resolution);
        }
        _ => println!("  Disabled"),
    }
    println!(
        "  min {:.3} / mean {:.3} / max {:.3}, {} of {} blades unoccluded",
        occlusion.min, occlusion.mean, occlusion.max, occlusion.unoccluded, occlusion.count
    );

    Ok(())
}
