//! Sender trait for log output destinations

use super::{
    error::{JournalError, Result},
    level::{self, LevelInfo},
    metrics::SenderMetrics,
};
use crate::message::Composer;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Callback for backend failures during `send`.
///
/// Receives the error and the composer that was being sent (for batches, the
/// whole group). Send failures are routed here instead of back to the logging
/// call site.
pub type ErrorHandler = Arc<dyn Fn(&JournalError, &dyn Composer) + Send + Sync>;

/// An output backend.
///
/// Implementations must call [`should_log`](crate::core::should_log) (usually
/// through [`SenderBase::should_log`]) before doing any backend work, and must
/// serialize writes to their backend so concurrent sends never interleave.
pub trait Sender: Send + Sync {
    fn name(&self) -> String;

    /// Rename the sender, rebuilding any name-derived backend state.
    fn set_name(&self, name: &str);

    fn level(&self) -> LevelInfo;

    /// Replace the filtering configuration.
    ///
    /// # Errors
    ///
    /// [`JournalError::InvalidPriority`] if either field is invalid; the
    /// previous level stays in effect.
    fn set_level(&self, level: LevelInfo) -> Result<()>;

    fn send(&self, message: &dyn Composer);

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Release backend resources. Calling it again is a no-op.
    fn close(&self) -> Result<()>;
}

impl<S: Sender + ?Sized> Sender for Box<S> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn set_name(&self, name: &str) {
        (**self).set_name(name)
    }

    fn level(&self) -> LevelInfo {
        (**self).level()
    }

    fn set_level(&self, level: LevelInfo) -> Result<()> {
        (**self).set_level(level)
    }

    fn send(&self, message: &dyn Composer) {
        (**self).send(message)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn close(&self) -> Result<()> {
        (**self).close()
    }
}

/// Default error handler: one line on stderr.
pub fn stderr_error_handler() -> ErrorHandler {
    Arc::new(|err: &JournalError, message: &dyn Composer| {
        eprintln!(
            "[JOURNAL ERROR] Failed to send {} message: {}",
            message.priority(),
            err
        );
    })
}

/// State shared by every sender implementation: name, level, error handler,
/// closed flag, and counters.
pub struct SenderBase {
    name: RwLock<String>,
    level: RwLock<LevelInfo>,
    error_handler: RwLock<ErrorHandler>,
    closed: AtomicBool,
    metrics: SenderMetrics,
}

impl SenderBase {
    pub fn new(name: impl Into<String>, level: LevelInfo) -> Result<Self> {
        level.validate()?;
        Ok(Self::with_valid_level(name.into(), level))
    }

    /// Caller guarantees `level` is valid.
    pub(crate) fn with_valid_level(name: String, level: LevelInfo) -> Self {
        Self {
            name: RwLock::new(name),
            level: RwLock::new(level),
            error_handler: RwLock::new(stderr_error_handler()),
            closed: AtomicBool::new(false),
            metrics: SenderMetrics::new(),
        }
    }

    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    pub fn set_name(&self, name: &str) {
        *self.name.write() = name.to_string();
    }

    pub fn level(&self) -> LevelInfo {
        *self.level.read()
    }

    pub fn set_level(&self, level: LevelInfo) -> Result<()> {
        level.validate()?;
        *self.level.write() = level;
        Ok(())
    }

    pub fn set_error_handler(&self, handler: ErrorHandler) {
        *self.error_handler.write() = handler;
    }

    /// Apply the shared filter and count rejections.
    pub fn should_log(&self, message: &dyn Composer) -> bool {
        let admitted = level::should_log(&self.level(), message);
        if !admitted {
            self.metrics.record_filtered();
        }
        admitted
    }

    /// Count the failure and hand it to the error handler.
    pub fn handle_error(&self, err: &JournalError, message: &dyn Composer) {
        self.metrics.record_failed();
        let handler = Arc::clone(&self.error_handler.read());
        handler(err, message);
    }

    /// Mark closed. Returns `true` only for the call that actually closed it.
    pub fn mark_closed(&self) -> bool {
        !self.closed.swap(true, Ordering::AcqRel)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn metrics(&self) -> &SenderMetrics {
        &self.metrics
    }
}
