//! Core journaler types and traits

pub mod error;
pub mod escalation;
pub mod journaler;
pub mod level;
pub mod line;
pub mod metrics;
pub mod priority;
pub mod sender;
pub mod timestamp;

pub use error::{JournalError, Result};
pub use escalation::{Escalation, FATAL_EXIT_CODE};
pub use journaler::{Journaler, JournalerBuilder};
pub use level::{should_log, LevelInfo};
pub use metrics::SenderMetrics;
pub use priority::Priority;
pub use sender::{stderr_error_handler, ErrorHandler, Sender, SenderBase};
pub use timestamp::TimestampFormat;
