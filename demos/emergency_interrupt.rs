//! Emergency Interrupt
//!
//! A control task moves a train while a safety task fires an emergency
//! stop. Both share one slot through `SharedLifecycle`.
//!
//! Key concepts:
//! - Linearizable transitions across tasks
//! - Idempotent emergency stop
//! - Snapshotting a stopped slot for the operator log
//!
//! Run with: cargo run --example emergency_interrupt

use movement_authority::{LifecycleBuilder, RequestStatus, TrackDirection};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Emergency Interrupt ===\n");

    let slot = LifecycleBuilder::new().label("main-line-up").build_shared()?;
    slot.submit(TrackDirection::Two)?;
    slot.begin()?;
    println!("Train moving: {}", slot.current_status());

    let interrupt = slot.clone();
    let safety = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        // Two sensors tripping at once must not fail the second stop.
        let first = interrupt.emergency_stop();
        let second = interrupt.emergency_stop();
        (first, second)
    });

    let control = slot.clone();
    let movement = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        control.finish()
    });

    let (first, second) = safety.await?;
    println!("Safety stop: {first:?}, repeated: {second:?}");

    match movement.await? {
        Ok(status) => println!("Movement finished first: {status}"),
        Err(err) => println!("Movement refused to finish: {err}"),
    }

    let snapshot = slot.snapshot();
    println!("\nSnapshot for the operator log:\n{}", snapshot.to_json()?);

    if slot.current_status() == RequestStatus::EmergencyStop {
        slot.reset()?;
        println!("\nSlot acknowledged and reset: {}", slot.current_status());
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
