//! Console sender implementation

use crate::core::{
    line::{self, LinePrefix},
    LevelInfo, Result, Sender, SenderBase, TimestampFormat,
};
use crate::message::Composer;
use parking_lot::Mutex;
use std::io::Write;

enum Target {
    Stdout,
    Stderr,
    Writer(Box<dyn Write + Send>),
}

/// The rebuildable part of the sender: name prefix plus output target.
struct ConsoleHandle {
    prefix: LinePrefix,
    target: Target,
}

impl ConsoleHandle {
    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        match self.target {
            Target::Stdout => writeln!(std::io::stdout().lock(), "{}", line),
            Target::Stderr => writeln!(std::io::stderr().lock(), "{}", line),
            Target::Writer(ref mut w) => writeln!(w, "{}", line),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.target {
            Target::Stdout => std::io::stdout().flush(),
            Target::Stderr => std::io::stderr().flush(),
            Target::Writer(ref mut w) => w.flush(),
        }
    }
}

/// Writes `[name] <timestamp> [p=N]: <message>` lines to a console stream.
///
/// # Example
///
/// ```
/// use rust_journaler::prelude::*;
///
/// let sender = NativeSender::new("app", LevelInfo::new(Priority::INFO, Priority::INFO))?;
/// sender.send(&DefaultMessage::with_priority(Priority::NOTICE, "service started"));
/// # Ok::<(), JournalError>(())
/// ```
pub struct NativeSender {
    base: SenderBase,
    handle: Mutex<ConsoleHandle>,
    timestamp_format: TimestampFormat,
    use_colors: bool,
}

impl NativeSender {
    /// Sender writing to standard output.
    pub fn new(name: impl Into<String>, level: LevelInfo) -> Result<Self> {
        Self::with_target(name.into(), level, Target::Stdout)
    }

    /// Sender writing to standard error.
    pub fn stderr(name: impl Into<String>, level: LevelInfo) -> Result<Self> {
        Self::with_target(name.into(), level, Target::Stderr)
    }

    /// Sender writing to an arbitrary sink.
    pub fn with_writer<W>(name: impl Into<String>, level: LevelInfo, writer: W) -> Result<Self>
    where
        W: Write + Send + 'static,
    {
        Self::with_target(name.into(), level, Target::Writer(Box::new(writer)))
    }

    /// Stdout sender at [`LevelInfo::default`], which cannot fail.
    pub(crate) fn stdout_default(name: String) -> Self {
        Self::from_base(
            SenderBase::with_valid_level(name, LevelInfo::default()),
            Target::Stdout,
        )
    }

    fn with_target(name: String, level: LevelInfo, target: Target) -> Result<Self> {
        Ok(Self::from_base(SenderBase::new(name, level)?, target))
    }

    fn from_base(base: SenderBase, target: Target) -> Self {
        let handle = ConsoleHandle {
            prefix: LinePrefix::new(&base.name()),
            target,
        };

        Self {
            base,
            handle: Mutex::new(handle),
            timestamp_format: TimestampFormat::default(),
            use_colors: false,
        }
    }

    /// Color the priority marker
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// # Errors
    ///
    /// [`JournalError::Configuration`](crate::core::JournalError::Configuration)
    /// for a custom format chrono cannot render.
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Result<Self> {
        format.validate()?;
        self.timestamp_format = format;
        Ok(self)
    }

    /// Shared sender state (metrics, error handler).
    pub fn base(&self) -> &SenderBase {
        &self.base
    }

    fn send_one(&self, message: &dyn Composer) {
        if !self.base.should_log(message) {
            return;
        }

        let priority = self.base.level().effective_priority(message);
        let mut handle = self.handle.lock();
        let output = line::render(
            &handle.prefix,
            &self.timestamp_format,
            priority,
            message.resolve(),
            self.use_colors,
        );

        match handle.write_line(&output) {
            Ok(()) => {
                self.base.metrics().record_sent(1);
            }
            Err(e) => {
                drop(handle);
                self.base.handle_error(&e.into(), message);
            }
        }
    }
}

impl Sender for NativeSender {
    fn name(&self) -> String {
        self.base.name()
    }

    fn set_name(&self, name: &str) {
        let prefix = LinePrefix::new(name);
        let mut handle = self.handle.lock();
        handle.prefix = prefix;
        self.base.set_name(name);
    }

    fn level(&self) -> LevelInfo {
        self.base.level()
    }

    fn set_level(&self, level: LevelInfo) -> Result<()> {
        self.base.set_level(level)
    }

    /// Groups are unrolled; each child passes the filter on its own.
    fn send(&self, message: &dyn Composer) {
        match message.as_group() {
            Some(group) => group
                .messages()
                .iter()
                .for_each(|m| self.send_one(m.as_ref())),
            None => self.send_one(message),
        }
    }

    fn flush(&self) -> Result<()> {
        self.handle.lock().flush()?;
        Ok(())
    }

    /// Console streams stay open; closing only flushes, once.
    fn close(&self) -> Result<()> {
        if self.base.mark_closed() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{JournalError, Priority};
    use crate::message::{DefaultMessage, FormattedMessage};
    use crate::{group, payloads};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    fn sender(buffer: &SharedBuffer) -> NativeSender {
        NativeSender::with_writer(
            "test",
            LevelInfo::new(Priority::WARNING, Priority::INFO),
            buffer.clone(),
        )
        .unwrap()
    }

    #[test]
    fn test_threshold_respected() {
        let buffer = SharedBuffer::default();
        let sender = sender(&buffer);

        sender.send(&DefaultMessage::with_priority(Priority::INFO, "quiet"));
        assert!(buffer.contents().is_empty());

        sender.send(&DefaultMessage::with_priority(Priority::ERROR, "disk full"));
        let out = buffer.contents();
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("[test] "));
        assert!(out.contains("[p=5]: disk full"));
        assert_eq!(sender.base().metrics().sent_count(), 1);
        assert_eq!(sender.base().metrics().filtered_count(), 1);
    }

    #[test]
    fn test_untagged_uses_default_priority() {
        let buffer = SharedBuffer::default();
        let sender = sender(&buffer);

        sender.send(&DefaultMessage::new("dropped"));
        assert!(buffer.contents().is_empty());

        sender
            .set_level(LevelInfo::new(Priority::WARNING, Priority::CRITICAL))
            .unwrap();
        sender.send(&FormattedMessage::new("%d%%", payloads![90]));
        assert!(buffer.contents().contains("[p=6]: 90%"));
    }

    #[test]
    fn test_set_name_rebuilds_prefix() {
        let buffer = SharedBuffer::default();
        let sender = sender(&buffer);

        sender.set_name("renamed");
        sender.send(&DefaultMessage::with_priority(Priority::ALERT, "x"));

        assert_eq!(sender.name(), "renamed");
        assert!(buffer.contents().starts_with("[renamed] "));
    }

    #[test]
    fn test_group_children_filtered_individually() {
        let buffer = SharedBuffer::default();
        let sender = sender(&buffer);

        sender.send(&group![
            DefaultMessage::with_priority(Priority::DEBUG, "skip"),
            DefaultMessage::with_priority(Priority::ALERT, "first"),
            DefaultMessage::with_priority(Priority::ALERT, ""),
            DefaultMessage::with_priority(Priority::ERROR, "second"),
        ]);

        let out = buffer.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[p=7]: first"));
        assert!(lines[1].ends_with("[p=5]: second"));
    }

    #[test]
    fn test_custom_timestamp_format() {
        let rejected = sender(&SharedBuffer::default())
            .with_timestamp_format(TimestampFormat::Custom("%Q".to_string()));
        assert!(matches!(rejected, Err(JournalError::Configuration { .. })));

        let buffer = SharedBuffer::default();
        let sender = sender(&buffer)
            .with_timestamp_format(TimestampFormat::Custom("%Y|%j".to_string()))
            .unwrap();
        sender.send(&DefaultMessage::with_priority(Priority::ALERT, "stamped"));

        let out = buffer.contents();
        assert!(out.starts_with("[test] "));
        assert!(out.contains('|'));
        assert!(out.contains("[p=7]: stamped"));
    }

    #[test]
    fn test_close_is_idempotent() {
        let sender = sender(&SharedBuffer::default());
        assert!(sender.close().is_ok());
        assert!(sender.close().is_ok());
    }
}
