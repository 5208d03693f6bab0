//! Logging macros with deferred formatting.
//!
//! The macros wrap their `format!` arguments in a
//! [`LazyMessage`](crate::message::LazyMessage), so nothing is formatted
//! unless the active sender admits and renders the message.
//!
//! # Examples
//!
//! ```
//! use rust_journaler::prelude::*;
//! use rust_journaler::{info, warning};
//!
//! let journaler = Journaler::new("app", NativeSender::new("app", LevelInfo::default())?);
//!
//! info!(journaler, "Server started");
//!
//! let port = 8080;
//! info!(journaler, "Server listening on port {}", port);
//! warning!(journaler, "{} of {} workers busy", 7, 8);
//! # Ok::<(), JournalError>(())
//! ```

/// Send a lazily formatted message at `priority`. Evaluates to the
/// `Result` of [`Journaler::log`](crate::Journaler::log).
///
/// # Examples
///
/// ```
/// # use rust_journaler::prelude::*;
/// # let journaler = Journaler::new("app", NativeSender::new("app", LevelInfo::default())?);
/// use rust_journaler::log;
/// log!(journaler, Priority::INFO, "Simple message")?;
/// log!(journaler, Priority::ERROR, "Error code: {}", 500)?;
/// assert!(log!(journaler, Priority::new(0), "rejected").is_err());
/// # Ok::<(), JournalError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($journaler:expr, $priority:expr, $($arg:tt)+) => {
        $journaler.log(
            $priority,
            $crate::message::LazyMessage::new(|| format!($($arg)+)),
        )
    };
}

/// Send an emergency-priority message.
#[macro_export]
macro_rules! emergency {
    ($journaler:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($journaler, $crate::Priority::EMERGENCY, $($arg)+);
    }};
}

/// Send an alert-priority message.
#[macro_export]
macro_rules! alert {
    ($journaler:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($journaler, $crate::Priority::ALERT, $($arg)+);
    }};
}

/// Send a critical-priority message.
#[macro_export]
macro_rules! critical {
    ($journaler:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($journaler, $crate::Priority::CRITICAL, $($arg)+);
    }};
}

/// Send an error-priority message.
///
/// # Examples
///
/// ```
/// # use rust_journaler::prelude::*;
/// # let journaler = Journaler::new("app", NativeSender::new("app", LevelInfo::default())?);
/// use rust_journaler::error;
/// error!(journaler, "Failed to connect to database");
/// error!(journaler, "Error code: {}, message: {}", 500, "Internal error");
/// # Ok::<(), JournalError>(())
/// ```
#[macro_export]
macro_rules! error {
    ($journaler:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($journaler, $crate::Priority::ERROR, $($arg)+);
    }};
}

/// Send a warning-priority message.
#[macro_export]
macro_rules! warning {
    ($journaler:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($journaler, $crate::Priority::WARNING, $($arg)+);
    }};
}

/// Send a notice-priority message.
#[macro_export]
macro_rules! notice {
    ($journaler:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($journaler, $crate::Priority::NOTICE, $($arg)+);
    }};
}

/// Send an info-priority message.
///
/// # Examples
///
/// ```
/// # use rust_journaler::prelude::*;
/// # let journaler = Journaler::new("app", NativeSender::new("app", LevelInfo::default())?);
/// use rust_journaler::info;
/// info!(journaler, "Application started");
/// info!(journaler, "Processing {} items", 100);
/// # Ok::<(), JournalError>(())
/// ```
#[macro_export]
macro_rules! info {
    ($journaler:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($journaler, $crate::Priority::INFO, $($arg)+);
    }};
}

/// Send a debug-priority message. Filtered out by the default threshold.
#[macro_export]
macro_rules! debug {
    ($journaler:expr, $($arg:tt)+) => {{
        let _ = $crate::log!($journaler, $crate::Priority::DEBUG, $($arg)+);
    }};
}
