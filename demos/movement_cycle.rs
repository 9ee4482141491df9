//! Movement Cycle
//!
//! Drives one request slot through a normal movement and shows how
//! rejected operations are reported.
//!
//! Key concepts:
//! - Submitting against the segment's current direction
//! - Rejections leave the slot untouched
//! - Reading the transition history
//!
//! Run with: RUST_LOG=debug cargo run --example movement_cycle

use movement_authority::{LifecycleBuilder, LifecycleError, TrackDirection, TransitionRecord};
use std::cell::Cell;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Movement Cycle ===\n");

    let mut slot = LifecycleBuilder::new()
        .label("platform-2")
        .history_limit(16)
        .observer(|record: &TransitionRecord| {
            println!(
                "  [{}] {:<14} {} -> {}",
                record.sequence, record.operation, record.from, record.to
            );
        })
        .build()?;

    // The topology side owns the direction; the slot only reads it.
    let segment_direction = Cell::new(TrackDirection::None);
    let segment = || segment_direction.get();

    println!("Submitting before the segment has a direction:");
    match slot.submit_from(&segment) {
        Err(LifecycleError::InvalidDirection { direction }) => {
            println!("  rejected: direction is {direction}\n")
        }
        other => println!("  unexpected: {other:?}\n"),
    }

    segment_direction.set(TrackDirection::One);
    println!("Segment set to direction One; running the movement:");
    slot.submit_from(&segment)?;
    slot.begin()?;

    if let Err(err) = slot.reset() {
        println!("  reset while moving refused ({})", err.error_code());
    }

    slot.finish()?;
    slot.reset()?;

    println!("\nFinal status: {}", slot.current_status());
    println!("Path: {:?}", slot.history().get_path());
    if let Some(duration) = slot.history().duration() {
        println!("Elapsed: {duration:?}");
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
