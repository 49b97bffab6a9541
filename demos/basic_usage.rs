//! Basic dispatch example
//!
//! Demonstrates level gating, default fields, sink fallback and level hooks.
//!
//! Run with: cargo run --example basic_usage

use level_dispatch::prelude::*;
use level_dispatch::sinks::GelfSink;
use level_dispatch::{debug, facade, warning};
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Level Dispatch - Basic Usage Example ===\n");

    // Graylog first; stderr takes over while it is unreachable
    Logger::builder()
        .level(Level::Debug)
        .default_field("service", "billing")
        .default_field("version", 3)
        .sink(GelfSink::tcp("127.0.0.1:12201").with_timeout(Duration::from_millis(200)))
        .sink(StderrSink::new())
        .formatter(TextFormatter::new().with_timestamp(true))
        // Hooks fire for the configured level, here Debug
        .event(Level::Debug, |msg: &str, defaults: &Fields| {
            println!("   [hook] {:?} logged: {}", defaults.get("service"), msg);
        })
        .timeout(Duration::from_secs(1))
        .init();

    println!("1. Logging at different levels:");
    facade::trace("This is a trace message (hidden)")?;
    debug!("Cache holds {} entries", 128)?;
    facade::log(Level::Info, "This is an info message")?;
    warning!("Retry {} of {}", 1, 3)?;
    facade::error("This is an error message")?;

    println!("\n2. Raising the ceiling:");
    if let Some(logger) = level_dispatch::global() {
        logger.set_level(Level::Warning);
        println!("   Level set to WARNING - debug and info won't show:");
        facade::debug("Debug message (hidden)")?;
        facade::log(Level::Info, "Info message (hidden)")?;
        facade::warning("Warning message (visible)")?;

        let metrics = logger.metrics();
        println!(
            "\n   written={} gated={} probe_failures={}",
            metrics.written(),
            metrics.gated(),
            metrics.probe_failures()
        );
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
