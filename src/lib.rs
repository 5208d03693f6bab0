//! # Rust Journaler
//!
//! Priority-filtered logging facade with pluggable output backends.
//!
//! ## Features
//!
//! - **Lazy Messages**: Composers render only after a sender admits them
//! - **Pluggable Senders**: Console, file, Splunk HEC, and in-process channel
//! - **Thread Safe**: Senders can be swapped while other threads are logging
//! - **Explicit Escalation**: Panic and fatal variants return an [`Escalation`]
//!   instead of unwinding or exiting on their own
//!
//! ## Quick Start
//!
//! ```
//! use rust_journaler::prelude::*;
//!
//! let sender = NativeSender::new("app", LevelInfo::new(Priority::INFO, Priority::INFO))?;
//! let journaler = Journaler::new("app", sender);
//!
//! journaler.info("service started");
//! journaler.error_fmt("%s is %.1f%% full", payloads!["/var", 93.27]);
//! # Ok::<(), JournalError>(())
//! ```

pub mod macros;

pub mod core;
pub mod global;
pub mod message;
pub mod senders;

pub mod prelude {
    #[cfg(feature = "file")]
    pub use crate::senders::FileSender;
    #[cfg(feature = "splunk")]
    pub use crate::senders::HecClient;
    pub use crate::core::{
        Escalation, JournalError, Journaler, JournalerBuilder, LevelInfo, Priority, Result,
        Sender, SenderBase, TimestampFormat,
    };
    pub use crate::message::{
        Composer, DefaultMessage, FormattedMessage, GroupComposer, LazyMessage, LinesMessage,
        Payload,
    };
    pub use crate::senders::{
        InternalMessage, InternalSender, NativeSender, SplunkConnectionInfo, SplunkSender,
    };
    pub use crate::{group, payloads};
}

pub use crate::core::{
    should_log, Escalation, JournalError, Journaler, JournalerBuilder, LevelInfo, Priority,
    Result, Sender, SenderMetrics, TimestampFormat, FATAL_EXIT_CODE,
};
pub use crate::message::{Composer, Payload};
