//! Escalation example
//!
//! Panic and fatal variants log first and hand back an `Escalation`; nothing
//! unwinds or exits until the caller enforces it.
//!
//! Run with: cargo run --example escalation

use rust_journaler::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Journaler - Escalation Example ===\n");

    let journaler = Journaler::builder()
        .name("escalation")
        .threshold(Priority::NOTICE)
        .build()?;

    let outcome = journaler.critical_panic_fmt("worker %d lost its connection", payloads![3]);
    println!("critical_panic_fmt returned: {}", outcome);

    let caught = std::panic::catch_unwind(|| outcome.enforce());
    println!("enforced panic was caught: {}", caught.is_err());

    let outcome = journaler.error_fatal("configuration is unusable");
    println!("error_fatal returned: {}", outcome);

    if std::env::args().any(|arg| arg == "--exit") {
        journaler.flush()?;
        outcome.enforce();
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
