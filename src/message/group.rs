//! Batched messages

use super::{checked_priority, Composer};
use crate::core::{Priority, Result};
use std::fmt;
use std::sync::OnceLock;

/// An ordered batch of composers.
///
/// A group has no priority of its own. Whoever processes it filters each child
/// independently, which lets batch-capable backends (see
/// [`crate::senders::SplunkSender`]) ship the survivors in one call.
#[derive(Default)]
pub struct GroupComposer {
    messages: Vec<Box<dyn Composer>>,
    rendered: OnceLock<String>,
}

impl GroupComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<Box<dyn Composer>>) -> Self {
        Self {
            messages,
            rendered: OnceLock::new(),
        }
    }

    /// Append a child. Invalidates any cached rendering.
    pub fn add(&mut self, message: impl Composer + 'static) {
        self.messages.push(Box::new(message));
        self.rendered = OnceLock::new();
    }

    pub fn messages(&self) -> &[Box<dyn Composer>] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl fmt::Debug for GroupComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupComposer")
            .field("len", &self.messages.len())
            .finish()
    }
}

/// Build a [`GroupComposer`] from composers of any type.
///
/// ```
/// use rust_journaler::message::{Composer, DefaultMessage, LinesMessage};
/// use rust_journaler::{group, payloads, Priority};
///
/// let g = group![
///     DefaultMessage::with_priority(Priority::ALERT, "disk full"),
///     LinesMessage::new(payloads!["retrying in", 5, "s"]),
/// ];
/// assert_eq!(g.messages().len(), 2);
/// ```
#[macro_export]
macro_rules! group {
    ($($message:expr),* $(,)?) => {{
        let mut group = $crate::message::GroupComposer::new();
        $(group.add($message);)*
        group
    }};
}

impl Composer for GroupComposer {
    fn priority(&self) -> Priority {
        Priority::INVALID
    }

    /// Tags every child that has no priority yet; tagged children keep theirs.
    fn set_priority(&mut self, priority: Priority) -> Result<()> {
        let priority = checked_priority(priority)?;
        for message in self.messages.iter_mut() {
            if !message.priority().is_valid() {
                message.set_priority(priority)?;
            }
        }
        Ok(())
    }

    fn resolve(&self) -> &str {
        self.rendered.get_or_init(|| {
            self.messages
                .iter()
                .filter(|m| m.loggable())
                .map(|m| m.resolve())
                .collect::<Vec<_>>()
                .join("\n")
        })
    }

    fn raw(&self) -> serde_json::Value {
        serde_json::Value::Array(self.messages.iter().map(|m| m.raw()).collect())
    }

    fn loggable(&self) -> bool {
        self.messages.iter().any(|m| m.loggable())
    }

    fn as_group(&self) -> Option<&GroupComposer> {
        Some(self)
    }
}
