//! Plain-text and closure-backed messages

use super::{checked_priority, Composer};
use crate::core::{Priority, Result};
use std::fmt;
use std::sync::OnceLock;

/// A message that is already a string.
#[derive(Debug, Clone)]
pub struct DefaultMessage {
    priority: Priority,
    message: String,
}

impl DefaultMessage {
    /// Untagged message; the sender's default priority applies.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            priority: Priority::INVALID,
            message: message.into(),
        }
    }

    /// Message tagged with `priority`. An invalid priority leaves it unset.
    pub fn with_priority(priority: Priority, message: impl Into<String>) -> Self {
        let mut m = Self::new(message);
        let _ = m.set_priority(priority);
        m
    }
}

impl Composer for DefaultMessage {
    fn priority(&self) -> Priority {
        self.priority
    }

    fn set_priority(&mut self, priority: Priority) -> Result<()> {
        self.priority = checked_priority(priority)?;
        Ok(())
    }

    fn resolve(&self) -> &str {
        &self.message
    }

    fn raw(&self) -> serde_json::Value {
        serde_json::Value::String(self.message.clone())
    }

    fn loggable(&self) -> bool {
        !self.message.is_empty()
    }
}

/// A message rendered by a closure the first time it is resolved.
///
/// This is what the logging macros build, so `format!` arguments are only
/// evaluated when a sender actually needs the text.
///
/// # Example
///
/// ```
/// use rust_journaler::message::{Composer, LazyMessage};
///
/// let port = 8080;
/// let msg = LazyMessage::new(|| format!("listening on {}", port));
/// assert_eq!(msg.resolve(), "listening on 8080");
/// ```
pub struct LazyMessage<F>
where
    F: Fn() -> String,
{
    priority: Priority,
    render: F,
    rendered: OnceLock<String>,
}

impl<F> LazyMessage<F>
where
    F: Fn() -> String,
{
    pub fn new(render: F) -> Self {
        Self {
            priority: Priority::INVALID,
            render,
            rendered: OnceLock::new(),
        }
    }

    /// Whether the closure has run yet.
    pub fn is_rendered(&self) -> bool {
        self.rendered.get().is_some()
    }
}

impl<F> fmt::Debug for LazyMessage<F>
where
    F: Fn() -> String,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyMessage")
            .field("priority", &self.priority)
            .field("rendered", &self.rendered.get())
            .finish()
    }
}

impl<F> Composer for LazyMessage<F>
where
    F: Fn() -> String,
{
    fn priority(&self) -> Priority {
        self.priority
    }

    fn set_priority(&mut self, priority: Priority) -> Result<()> {
        self.priority = checked_priority(priority)?;
        Ok(())
    }

    fn resolve(&self) -> &str {
        self.rendered.get_or_init(|| (self.render)())
    }

    fn raw(&self) -> serde_json::Value {
        serde_json::Value::String(self.resolve().to_string())
    }

    // Emptiness is only known after rendering.
    fn loggable(&self) -> bool {
        !self.resolve().is_empty()
    }
}
