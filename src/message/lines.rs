//! Space-joined list-of-values messages

use super::{checked_priority, Composer, Payload};
use crate::core::{Priority, Result};
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct LinesMessage {
    priority: Priority,
    values: Vec<Payload>,
    rendered: OnceLock<String>,
}

impl LinesMessage {
    pub fn new(values: Vec<Payload>) -> Self {
        Self {
            priority: Priority::INVALID,
            values,
            rendered: OnceLock::new(),
        }
    }

    pub fn values(&self) -> &[Payload] {
        &self.values
    }
}

impl<T: Into<Payload>> FromIterator<T> for LinesMessage {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl Composer for LinesMessage {
    fn priority(&self) -> Priority {
        self.priority
    }

    fn set_priority(&mut self, priority: Priority) -> Result<()> {
        self.priority = checked_priority(priority)?;
        Ok(())
    }

    fn resolve(&self) -> &str {
        self.rendered.get_or_init(|| {
            self.values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    /// A single value is shipped as-is, several as an array.
    fn raw(&self) -> serde_json::Value {
        match self.values.as_slice() {
            [only] => only.to_json_value(),
            values => serde_json::Value::Array(values.iter().map(Payload::to_json_value).collect()),
        }
    }

    fn loggable(&self) -> bool {
        self.values.iter().any(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payloads;

    #[test]
    fn test_resolve_joins_with_space() {
        let msg = LinesMessage::new(payloads!["copied", 12, "files in", 0.5, "s"]);
        assert_eq!(msg.resolve(), "copied 12 files in 0.5 s");
    }

    #[test]
    fn test_raw_shapes() {
        let single = LinesMessage::new(payloads![42]);
        assert_eq!(single.raw(), serde_json::json!(42));

        let many = LinesMessage::new(payloads!["a", true]);
        assert_eq!(many.raw(), serde_json::json!(["a", true]));
    }

    #[test]
    fn test_loggable() {
        assert!(!LinesMessage::new(payloads![]).loggable());
        assert!(!LinesMessage::new(payloads!["", ""]).loggable());
        assert!(LinesMessage::new(payloads!["", 0]).loggable());
    }

    #[test]
    fn test_collect() {
        let msg: LinesMessage = ["a", "b"].into_iter().collect();
        assert_eq!(msg.resolve(), "a b");
    }
}
