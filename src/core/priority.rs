//! Priority definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a message, ordered numerically from `DEBUG` up to `EMERGENCY`.
///
/// `Priority` is a thin newtype over `u8` rather than a closed enum so that
/// out-of-range values coming from configuration can be represented and
/// rejected. [`Priority::INVALID`] doubles as the "unset" marker for messages
/// built without an explicit level.
///
/// # Example
///
/// ```
/// use rust_journaler::Priority;
///
/// assert!(Priority::ERROR > Priority::WARNING);
/// assert!(Priority::DEBUG.is_valid());
/// assert!(!Priority::INVALID.is_valid());
/// assert!(!Priority::new(42).is_valid());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    pub const INVALID: Priority = Priority(0);
    pub const DEBUG: Priority = Priority(1);
    pub const INFO: Priority = Priority(2);
    pub const NOTICE: Priority = Priority(3);
    pub const WARNING: Priority = Priority(4);
    pub const ERROR: Priority = Priority(5);
    pub const CRITICAL: Priority = Priority(6);
    pub const ALERT: Priority = Priority(7);
    pub const EMERGENCY: Priority = Priority(8);

    /// Lowest valid priority
    pub const MIN: Priority = Priority::DEBUG;
    /// Highest valid priority
    pub const MAX: Priority = Priority::EMERGENCY;

    /// Every valid priority, ascending.
    pub const ALL: [Priority; 8] = [
        Priority::DEBUG,
        Priority::INFO,
        Priority::NOTICE,
        Priority::WARNING,
        Priority::ERROR,
        Priority::CRITICAL,
        Priority::ALERT,
        Priority::EMERGENCY,
    ];

    /// Wrap a raw value without validation.
    #[inline]
    pub const fn new(value: u8) -> Self {
        Priority(value)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// True iff the value lies in the closed range `[MIN, MAX]`.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 >= Self::MIN.0 && self.0 <= Self::MAX.0
    }

    pub fn to_str(&self) -> &'static str {
        match *self {
            Priority::DEBUG => "DEBUG",
            Priority::INFO => "INFO",
            Priority::NOTICE => "NOTICE",
            Priority::WARNING => "WARNING",
            Priority::ERROR => "ERROR",
            Priority::CRITICAL => "CRITICAL",
            Priority::ALERT => "ALERT",
            Priority::EMERGENCY => "EMERGENCY",
            _ => "INVALID",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match *self {
            Priority::DEBUG => Blue,
            Priority::INFO => Green,
            Priority::NOTICE => Cyan,
            Priority::WARNING => Yellow,
            Priority::ERROR => Red,
            Priority::CRITICAL | Priority::ALERT => BrightRed,
            Priority::EMERGENCY => Magenta,
            _ => BrightBlack,
        }
    }
}

/// Free-function form of [`Priority::is_valid`].
#[inline]
pub fn is_valid(priority: Priority) -> bool {
    priority.is_valid()
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 {
        p.0
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Priority::DEBUG),
            "INFO" => Ok(Priority::INFO),
            "NOTICE" => Ok(Priority::NOTICE),
            "WARN" | "WARNING" => Ok(Priority::WARNING),
            "ERROR" => Ok(Priority::ERROR),
            "CRITICAL" | "CRIT" => Ok(Priority::CRITICAL),
            "ALERT" => Ok(Priority::ALERT),
            "EMERGENCY" | "EMERG" => Ok(Priority::EMERGENCY),
            _ => Err(format!("Invalid priority: '{}'", s)),
        }
    }
}
