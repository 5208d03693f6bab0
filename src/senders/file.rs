//! File sender implementation

use crate::core::{
    line::{self, LinePrefix},
    JournalError, LevelInfo, Result, Sender, SenderBase, TimestampFormat,
};
use crate::message::Composer;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

struct FileHandle {
    prefix: LinePrefix,
    writer: Option<BufWriter<File>>,
}

/// Appends lines to a file, creating it if needed.
///
/// Falling back to the console when the file cannot be opened is left to the
/// caller:
///
/// ```no_run
/// use rust_journaler::prelude::*;
///
/// let level = LevelInfo::default();
/// let sender: Box<dyn Sender> = match FileSender::new("app", "/var/log/app.log", level) {
///     Ok(file) => Box::new(file),
///     Err(_) => Box::new(NativeSender::new("app", level)?),
/// };
/// # Ok::<(), JournalError>(())
/// ```
pub struct FileSender {
    base: SenderBase,
    path: PathBuf,
    handle: Mutex<FileHandle>,
    timestamp_format: TimestampFormat,
}

impl FileSender {
    /// # Errors
    ///
    /// [`JournalError::FileOpen`] if the path cannot be opened for appending,
    /// [`JournalError::InvalidPriority`] for an invalid level.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, level: LevelInfo) -> Result<Self> {
        let name = name.into();
        let path = path.into();
        let base = SenderBase::new(name.clone(), level)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| JournalError::file_open(path.display().to_string(), e))?;

        Ok(Self {
            base,
            path,
            handle: Mutex::new(FileHandle {
                prefix: LinePrefix::new(&name),
                writer: Some(BufWriter::new(file)),
            }),
            timestamp_format: TimestampFormat::default(),
        })
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

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base(&self) -> &SenderBase {
        &self.base
    }

    fn send_one(&self, message: &dyn Composer) {
        if !self.base.should_log(message) {
            return;
        }

        let priority = self.base.level().effective_priority(message);
        let mut handle = self.handle.lock();
        let mut output = line::render(
            &handle.prefix,
            &self.timestamp_format,
            priority,
            message.resolve(),
            false,
        );
        output.push('\n');

        let result = match handle.writer.as_mut() {
            Some(writer) => writer.write_all(output.as_bytes()).map_err(JournalError::from),
            None => Err(JournalError::closed(self.base.name())),
        };
        drop(handle);

        match result {
            Ok(()) => {
                self.base.metrics().record_sent(1);
            }
            Err(e) => self.base.handle_error(&e, message),
        }
    }
}

impl Sender for FileSender {
    fn name(&self) -> String {
        self.base.name()
    }

    fn set_name(&self, name: &str) {
        let prefix = LinePrefix::new(name);
        self.handle.lock().prefix = prefix;
        self.base.set_name(name);
    }

    fn level(&self) -> LevelInfo {
        self.base.level()
    }

    fn set_level(&self, level: LevelInfo) -> Result<()> {
        self.base.set_level(level)
    }

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
        let mut handle = self.handle.lock();
        if let Some(writer) = handle.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.base.mark_closed();
        let writer = self.handle.lock().writer.take();
        if let Some(mut writer) = writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for FileSender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
