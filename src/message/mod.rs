//! Message composers
//!
//! A composer is a lazily rendered log message. Senders decide whether a
//! composer is worth emitting (see [`crate::core::should_log`]) before asking
//! it for its text, so a message that is filtered out never pays for
//! formatting.

pub mod basic;
pub mod formatted;
pub mod group;
pub mod lines;
pub mod payload;

pub use basic::{DefaultMessage, LazyMessage};
pub use formatted::{sprintf, FormattedMessage};
pub use group::GroupComposer;
pub use lines::LinesMessage;
pub use payload::Payload;

use crate::core::{JournalError, Priority, Result};

/// Contract between message producers and senders.
pub trait Composer {
    /// Priority the message was tagged with, or [`Priority::INVALID`] if unset.
    fn priority(&self) -> Priority;

    /// Tag the message with a priority.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::InvalidPriority`] and leaves the message
    /// untouched when `priority` is out of range.
    fn set_priority(&mut self, priority: Priority) -> Result<()>;

    /// Human-readable text. Rendered on first call, cached afterwards.
    fn resolve(&self) -> &str;

    /// Structured form for backends that ship the value itself.
    fn raw(&self) -> serde_json::Value;

    /// False for degenerate messages (empty text, empty value list).
    fn loggable(&self) -> bool;

    /// Batch view, `Some` only for [`GroupComposer`].
    fn as_group(&self) -> Option<&GroupComposer> {
        None
    }
}

impl<C: Composer + ?Sized> Composer for Box<C> {
    fn priority(&self) -> Priority {
        (**self).priority()
    }

    fn set_priority(&mut self, priority: Priority) -> Result<()> {
        (**self).set_priority(priority)
    }

    fn resolve(&self) -> &str {
        (**self).resolve()
    }

    fn raw(&self) -> serde_json::Value {
        (**self).raw()
    }

    fn loggable(&self) -> bool {
        (**self).loggable()
    }

    fn as_group(&self) -> Option<&GroupComposer> {
        (**self).as_group()
    }
}

/// Validate a priority before it is stored on a message.
pub(crate) fn checked_priority(priority: Priority) -> Result<Priority> {
    if priority.is_valid() {
        Ok(priority)
    } else {
        Err(JournalError::invalid_priority(priority))
    }
}
