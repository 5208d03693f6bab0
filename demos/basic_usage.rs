//! Basic journaler usage example
//!
//! Demonstrates console output, priorities, thresholds and message shapes.
//!
//! Run with: cargo run --example basic_usage

use rust_journaler::prelude::*;
use rust_journaler::{global, info, warning};

fn main() -> Result<()> {
    println!("=== Rust Journaler - Basic Usage Example ===\n");

    let sender = NativeSender::new("demo", LevelInfo::new(Priority::DEBUG, Priority::INFO))?
        .with_colors(true);
    let journaler = Journaler::new("demo", sender);

    println!("1. Logging at every priority:");
    journaler.emergency("This is an emergency message");
    journaler.alert("This is an alert message");
    journaler.critical("This is a critical message");
    journaler.error("This is an error message");
    journaler.warning("This is a warning message");
    journaler.notice("This is a notice message");
    journaler.info("This is an info message");
    journaler.debug("This is a debug message");

    println!("\n2. Raising the threshold to WARNING:");
    journaler.set_threshold(Priority::WARNING)?;
    journaler.info("Info message (hidden)");
    journaler.warning("Warning message (visible)");

    println!("\n3. Message shapes:");
    journaler.error_fmt("%s is %.1f%% full", payloads!["/var", 93.27]);
    journaler.warning_values(payloads!["retrying in", 5, "seconds"]);
    journaler.send(&group![
        DefaultMessage::with_priority(Priority::ALERT, "first of a batch"),
        DefaultMessage::with_priority(Priority::DEBUG, "filtered child"),
        DefaultMessage::with_priority(Priority::ERROR, "second of a batch"),
    ]);

    println!("\n4. Macros with deferred formatting:");
    let workers = 8;
    warning!(journaler, "{} of {} workers busy", 7, workers);
    info!(journaler, "never formatted: {}", workers);

    println!("\n5. The process-wide default journaler:");
    global::notice("Notice through the default instance");
    global::debug("Debug is below the default threshold (hidden)");

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
