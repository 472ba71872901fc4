//! Example: Computing retry delays with exponential backoff and jitter
//!
//! This example demonstrates:
//! 1. The nominal growth sequence (no jitter, fully deterministic)
//! 2. Jitter impact on a fixed nominal delay (run multiple times to see variance)
//! 3. An immediate-first-retry configuration driving real sleeps
//!
//! Run with:
//! ```bash
//! cargo run -p holdoff --example backoff_demo
//! ```

use std::time::{Duration, Instant};

use holdoff::prelude::*;

/// Example 1: Deterministic growth with jitter disabled
fn example_nominal_growth() -> Result<(), ConfigError> {
    println!("\n=== Example 1: Nominal Growth (jitter disabled) ===\n");

    let mut backoff = Backoff::builder()
        .initial_delay(Duration::ZERO)
        .base_delay(Duration::from_millis(500))
        .exponential_limit(Duration::from_secs(60))
        .jitter_factor(0.0)
        .build()?;

    println!("Nominal sequence (initial 0, base 500ms, limit 60s):");
    for round in 1..=11 {
        let delay = backoff.advance();
        println!("  Round {:>2}: {:?}", round, delay);
    }
    println!("\nThe delay doubles each round and clamps at the 60s limit.");

    Ok(())
}

/// Example 2: Jitter variance around a fixed nominal delay
fn example_jitter_impact() -> Result<(), ConfigError> {
    println!("\n=== Example 2: Jitter Impact (10 draws at 1s nominal) ===\n");

    // saturated at 1s so only jitter varies between rounds
    let mut backoff = Backoff::builder()
        .initial_delay(Duration::from_secs(1))
        .exponential_limit(Duration::from_secs(1))
        .jitter_factor(0.3)
        .build()?;

    println!("With the default 0.3 jitter factor (±15%):");
    for draw in 1..=10 {
        println!("  Draw {:>2}: {:?}", draw, backoff.advance());
    }
    println!("\nEvery draw lies within 850ms..=1150ms of the 1s nominal.");

    Ok(())
}

/// Example 3: Immediate first retry with real sleeps
async fn example_immediate_first_retry() -> Result<(), ConfigError> {
    println!("\n=== Example 3: Immediate First Retry ===\n");

    let mut backoff = Backoff::builder()
        .initial_delay(Duration::ZERO)
        .base_delay(Duration::from_millis(50))
        .exponential_limit(Duration::from_millis(200))
        .build()?;

    println!("Sleeping through 5 rounds (initial 0, base 50ms, limit 200ms):");
    for round in 1..=5 {
        let start = Instant::now();
        backoff.sleep().await;
        println!("  Round {}: slept {:?}", round, start.elapsed());
    }
    println!("\nThe first round returns immediately; growth resumes from the base.");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), ConfigError> {
    println!("==============================================");
    println!("   Holdoff: Exponential Backoff Examples");
    println!("==============================================");

    example_nominal_growth()?;
    example_jitter_impact()?;
    example_immediate_first_retry().await?;

    println!("\n==============================================");
    println!("   All examples completed successfully!");
    println!("==============================================\n");

    Ok(())
}
