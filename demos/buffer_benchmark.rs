//! Prints the push vs prealloc timing table for merged blade buffers
//!
//! Run with `RUST_LOG=info cargo run --release --example buffer_benchmark`.

use meadow::batch::compare_strategies;
use meadow::constants::benchmark::{SEGMENTS, SIZES};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    println!("Blade Buffer Allocation Benchmark");
    println!("=================================");
    println!("{} segments per blade", SEGMENTS);

    let timings = compare_strategies(&SIZES, SEGMENTS)?;
    for timing in &timings {
        println!("{}", timing);
    }

    Ok(())
}
