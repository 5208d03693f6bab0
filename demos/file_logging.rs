//! File logging example
//!
//! Demonstrates writing to a file and swapping senders at runtime.
//!
//! Run with: cargo run --example file_logging

use rust_journaler::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Rust Journaler - File Logging Example ===\n");

    let log_path = std::env::temp_dir().join("rust_journaler_demo.log");
    let _ = fs::remove_file(&log_path);

    let level = LevelInfo::new(Priority::INFO, Priority::NOTICE);
    let journaler = Journaler::new("file-demo", NativeSender::new("file-demo", level)?);
    journaler.info("Starting on the console");

    println!("Switching to {}", log_path.display());
    match FileSender::new("file-demo", &log_path, level) {
        Ok(file) => journaler.set_sender(file)?,
        Err(e) => journaler.error(format!("keeping console output: {}", e)),
    }

    journaler.notice("Application started");
    journaler.send(&DefaultMessage::new("Untagged messages use the default priority"));
    journaler.warning_fmt("Cache hit rate %.0f%%", payloads![41.7]);
    journaler.error("Line breaks\nare escaped so entries stay on one line");
    journaler.flush()?;

    println!("\nFile contents:");
    for line in fs::read_to_string(&log_path)?.lines() {
        println!("  {}", line);
    }

    journaler.close()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
