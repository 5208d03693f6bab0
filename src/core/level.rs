//! Threshold configuration and the admission filter shared by every sender

use super::error::{JournalError, Result};
use super::priority::Priority;
use crate::message::Composer;
use serde::{Deserialize, Serialize};

/// A sender's filtering configuration.
///
/// `threshold` is the lowest priority that gets emitted; `default` is the
/// priority assumed for messages that were never tagged.
///
/// # Example
///
/// ```
/// use rust_journaler::{LevelInfo, Priority};
///
/// let mut level = LevelInfo::new(Priority::WARNING, Priority::INFO);
/// assert!(level.set_threshold(Priority::new(0)).is_err());
/// assert_eq!(level.threshold, Priority::WARNING);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub threshold: Priority,
    pub default: Priority,
}

impl LevelInfo {
    pub const fn new(threshold: Priority, default: Priority) -> Self {
        Self { threshold, default }
    }

    /// Both fields are real priorities.
    pub fn is_valid(&self) -> bool {
        self.threshold.is_valid() && self.default.is_valid()
    }

    /// Validate as a whole, for senders accepting a new configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_valid() {
            return Err(JournalError::invalid_priority(self.threshold));
        }
        if !self.default.is_valid() {
            return Err(JournalError::invalid_priority(self.default));
        }
        Ok(())
    }

    pub fn set_threshold(&mut self, priority: Priority) -> Result<()> {
        if !priority.is_valid() {
            return Err(JournalError::invalid_priority(priority));
        }
        self.threshold = priority;
        Ok(())
    }

    pub fn set_default(&mut self, priority: Priority) -> Result<()> {
        if !priority.is_valid() {
            return Err(JournalError::invalid_priority(priority));
        }
        self.default = priority;
        Ok(())
    }

    #[inline]
    pub fn should_log(&self, message: &dyn Composer) -> bool {
        should_log(self, message)
    }

    /// The message's own priority, or this level's default when unset.
    pub fn effective_priority(&self, message: &dyn Composer) -> Priority {
        match message.priority() {
            Priority::INVALID => self.default,
            priority => priority,
        }
    }
}

impl Default for LevelInfo {
    /// Emit everything from `INFO` up; untagged messages count as `INFO`.
    fn default() -> Self {
        Self::new(Priority::INFO, Priority::INFO)
    }
}

/// Decide whether `message` passes `level`.
///
/// An untagged message takes the level's default priority. Messages with an
/// invalid priority, below the threshold, or with nothing to say are dropped.
/// The priority checks run before [`Composer::loggable`] so that messages below
/// the threshold are never rendered.
pub fn should_log(level: &LevelInfo, message: &dyn Composer) -> bool {
    let priority = level.effective_priority(message);
    if !priority.is_valid() || priority < level.threshold {
        return false;
    }

    message.loggable()
}
