//! Dungeon game client binary.
//!
//! Main entry point for the headless Dungeon client.
//!
//! # Architecture
//!
//! This binary is the composition root that assembles:
//! 1. Configuration from the environment (and `.env`)
//! 2. Logging (stderr plus a per-session log file)
//! 3. The event bus, in-memory world and event system via [`Client::builder`]
//!
//! It then plays `DEMO_FRAMES` scripted frames and prints the session report
//! as JSON on stdout.
//!
//! # Examples
//!
//! ```bash
//! RNG_SEED=7 DEMO_FRAMES=24 cargo run -p dungeon-client
//! RUST_LOG=debug EVENT_BUS_TRACE=1 cargo run -p dungeon-client
//! ```

use anyhow::{Context, Result};
use client_bootstrap::{AppConfig, setup_logging};
use dungeon_client::Client;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = AppConfig::from_env();

    // 2. Setup logging
    let logging = setup_logging(&config)?;

    tracing::info!("Starting Dungeon client");
    tracing::info!(
        session = %logging.session_id,
        frames = config.demo_frames,
        seed = ?config.rng_seed,
        "session configured"
    );

    // 3. Build client
    let frames = config.demo_frames;
    let mut client = Client::builder().config(config).build()?;

    // 4. Play and report
    client.run(frames);
    let report = client.shutdown();

    let json = serde_json::to_string_pretty(&report).context("failed to serialize session report")?;
    println!("{json}");

    tracing::info!("Client shutdown complete");
    drop(logging);
    Ok(())
}
