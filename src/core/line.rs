//! Line rendering shared by the console and file senders
//!
//! Lines look like `[name] 2025/01/08 10:30:45 [p=5]: disk full`.

use super::priority::Priority;
use super::timestamp::TimestampFormat;

/// Name-derived part of a line, rebuilt whenever a sender is renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePrefix(String);

impl LinePrefix {
    pub fn new(name: &str) -> Self {
        LinePrefix(format!("[{}] ", name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Escape characters that would let a message forge extra log lines.
pub fn sanitize(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Render one line, without the trailing newline.
pub fn render(
    prefix: &LinePrefix,
    timestamp_format: &TimestampFormat,
    priority: Priority,
    text: &str,
    use_colors: bool,
) -> String {
    format!(
        "{}{} {}: {}",
        prefix.as_str(),
        timestamp_format.now(),
        priority_marker(priority, use_colors),
        sanitize(text)
    )
}

#[cfg(feature = "console")]
fn priority_marker(priority: Priority, use_colors: bool) -> String {
    use colored::Colorize;

    let marker = format!("[p={}]", priority.value());
    if use_colors {
        marker.color(priority.color_code()).to_string()
    } else {
        marker
    }
}

#[cfg(not(feature = "console"))]
fn priority_marker(priority: Priority, _use_colors: bool) -> String {
    format!("[p={}]", priority.value())
}
