//! The logging facade
//!
//! A [`Journaler`] owns exactly one active [`Sender`] and exposes one method per
//! priority and message shape. The sender can be replaced at any time, from any
//! thread, without losing or tearing in-flight messages.

use super::{
    error::Result,
    escalation::{Escalation, FATAL_EXIT_CODE},
    level::LevelInfo,
    priority::Priority,
    sender::Sender,
};
use crate::message::{Composer, DefaultMessage, FormattedMessage, LinesMessage, Payload};
use crate::senders::NativeSender;
use parking_lot::RwLock;

fn tagged<C: Composer>(priority: Priority, mut message: C) -> C {
    // Callers only pass the named constants, which are always valid
    let _ = message.set_priority(priority);
    message
}

/// Generates the plain, formatted and values methods for one priority, plus
/// the panic and fatal variants when their names are given.
macro_rules! priority_methods {
    ($priority:expr, $plain:ident, $fmt:ident, $values:ident) => {
        #[doc = concat!("Send `message` at `", stringify!($priority), "`.")]
        pub fn $plain(&self, message: impl Into<String>) {
            self.emit(&tagged($priority, DefaultMessage::new(message)));
        }

        #[doc = concat!("Send a printf-style message at `", stringify!($priority), "`.")]
        pub fn $fmt(&self, template: impl Into<String>, args: Vec<Payload>) {
            self.emit(&tagged($priority, FormattedMessage::new(template, args)));
        }

        #[doc = concat!("Send space-joined values at `", stringify!($priority), "`.")]
        pub fn $values(&self, values: Vec<Payload>) {
            self.emit(&tagged($priority, LinesMessage::new(values)));
        }
    };
    (
        $priority:expr,
        $plain:ident, $fmt:ident, $values:ident,
        $panic:ident, $panic_fmt:ident, $panic_values:ident,
        $fatal:ident, $fatal_fmt:ident, $fatal_values:ident
    ) => {
        priority_methods!($priority, $plain, $fmt, $values);

        pub fn $panic(&self, message: impl Into<String>) -> Escalation {
            self.escalate_panic(&tagged($priority, DefaultMessage::new(message)))
        }

        pub fn $panic_fmt(&self, template: impl Into<String>, args: Vec<Payload>) -> Escalation {
            self.escalate_panic(&tagged($priority, FormattedMessage::new(template, args)))
        }

        pub fn $panic_values(&self, values: Vec<Payload>) -> Escalation {
            self.escalate_panic(&tagged($priority, LinesMessage::new(values)))
        }

        pub fn $fatal(&self, message: impl Into<String>) -> Escalation {
            self.escalate_fatal(&tagged($priority, DefaultMessage::new(message)))
        }

        pub fn $fatal_fmt(&self, template: impl Into<String>, args: Vec<Payload>) -> Escalation {
            self.escalate_fatal(&tagged($priority, FormattedMessage::new(template, args)))
        }

        pub fn $fatal_values(&self, values: Vec<Payload>) -> Escalation {
            self.escalate_fatal(&tagged($priority, LinesMessage::new(values)))
        }
    };
}

/// Named facade over one active sender.
///
/// # Example
///
/// ```
/// use rust_journaler::prelude::*;
///
/// let journaler = Journaler::new("api", NativeSender::new("api", LevelInfo::default())?);
/// journaler.notice("service started");
/// journaler.warning_fmt("%s is %.1f%% full", payloads!["/var", 93.27]);
///
/// if journaler.error_fatal("cannot continue").is_terminal() {
///     // Escalation::Exit(1); call .enforce() to actually exit
/// }
/// # Ok::<(), JournalError>(())
/// ```
pub struct Journaler {
    name: RwLock<String>,
    sender: RwLock<Box<dyn Sender>>,
}

impl Journaler {
    pub fn new(name: impl Into<String>, sender: impl Sender + 'static) -> Self {
        Self {
            name: RwLock::new(name.into()),
            sender: RwLock::new(Box::new(sender)),
        }
    }

    pub fn builder() -> JournalerBuilder {
        JournalerBuilder::new()
    }

    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    /// Rename the journaler and its sender.
    pub fn set_name(&self, name: &str) {
        *self.name.write() = name.to_string();
        self.sender.read().set_name(name);
    }

    pub fn sender_name(&self) -> String {
        self.sender.read().name()
    }

    /// Replace the active sender, then close the old one.
    ///
    /// Sends already running against the old sender finish before it is
    /// closed. The returned error, if any, comes from closing the old sender;
    /// the new one is active either way.
    pub fn set_sender(&self, sender: impl Sender + 'static) -> Result<()> {
        let old = {
            let mut active = self.sender.write();
            std::mem::replace(&mut *active, Box::new(sender))
        };
        old.close()
    }

    pub fn level(&self) -> LevelInfo {
        self.sender.read().level()
    }

    pub fn set_level(&self, level: LevelInfo) -> Result<()> {
        self.sender.write().set_level(level)
    }

    /// # Errors
    ///
    /// [`JournalError::InvalidPriority`](super::JournalError::InvalidPriority);
    /// the sender keeps its previous level.
    pub fn set_threshold(&self, priority: Priority) -> Result<()> {
        self.update_level(|level| level.set_threshold(priority))
    }

    pub fn set_default(&self, priority: Priority) -> Result<()> {
        self.update_level(|level| level.set_default(priority))
    }

    /// Read-modify-write of the sender level. The write guard keeps concurrent
    /// updates of the other field from being lost.
    fn update_level<F>(&self, update: F) -> Result<()>
    where
        F: FnOnce(&mut LevelInfo) -> Result<()>,
    {
        let sender = self.sender.write();
        let mut level = sender.level();
        update(&mut level)?;
        sender.set_level(level)
    }

    /// Tag `message` with `priority` and send it.
    ///
    /// # Errors
    ///
    /// [`JournalError::InvalidPriority`](super::JournalError::InvalidPriority)
    /// without sending anything.
    pub fn log<C: Composer>(&self, priority: Priority, mut message: C) -> Result<()> {
        message.set_priority(priority)?;
        self.emit(&message);
        Ok(())
    }

    /// Send a composer as-is. Untagged messages get the sender's default.
    pub fn send(&self, message: &dyn Composer) {
        self.emit(message);
    }

    pub fn flush(&self) -> Result<()> {
        self.sender.read().flush()
    }

    pub fn close(&self) -> Result<()> {
        self.sender.read().close()
    }

    fn emit(&self, message: &dyn Composer) {
        self.sender.read().send(message);
    }

    fn escalate_panic(&self, message: &dyn Composer) -> Escalation {
        self.emit(message);
        Escalation::Panic(message.resolve().to_string())
    }

    fn escalate_fatal(&self, message: &dyn Composer) -> Escalation {
        self.emit(message);
        Escalation::Exit(FATAL_EXIT_CODE)
    }

    priority_methods!(
        Priority::EMERGENCY,
        emergency, emergency_fmt, emergency_values,
        emergency_panic, emergency_panic_fmt, emergency_panic_values,
        emergency_fatal, emergency_fatal_fmt, emergency_fatal_values
    );
    priority_methods!(
        Priority::ALERT,
        alert, alert_fmt, alert_values,
        alert_panic, alert_panic_fmt, alert_panic_values,
        alert_fatal, alert_fatal_fmt, alert_fatal_values
    );
    priority_methods!(
        Priority::CRITICAL,
        critical, critical_fmt, critical_values,
        critical_panic, critical_panic_fmt, critical_panic_values,
        critical_fatal, critical_fatal_fmt, critical_fatal_values
    );
    priority_methods!(
        Priority::ERROR,
        error, error_fmt, error_values,
        error_panic, error_panic_fmt, error_panic_values,
        error_fatal, error_fatal_fmt, error_fatal_values
    );
    priority_methods!(Priority::WARNING, warning, warning_fmt, warning_values);
    priority_methods!(Priority::NOTICE, notice, notice_fmt, notice_values);
    priority_methods!(Priority::INFO, info, info_fmt, info_values);
    priority_methods!(Priority::DEBUG, debug, debug_fmt, debug_values);
}

impl Drop for Journaler {
    fn drop(&mut self) {
        if let Err(e) = self.sender.get_mut().close() {
            eprintln!(
                "[JOURNAL WARNING] Failed to close sender '{}': {}",
                self.sender.get_mut().name(),
                e
            );
        }
    }
}

/// Builder for [`Journaler`].
///
/// Without an explicit sender, a [`NativeSender`] on stdout is used.
///
/// ```
/// use rust_journaler::prelude::*;
///
/// let journaler = Journaler::builder()
///     .name("worker")
///     .threshold(Priority::WARNING)
///     .default_priority(Priority::NOTICE)
///     .build()?;
/// assert_eq!(journaler.level(), LevelInfo::new(Priority::WARNING, Priority::NOTICE));
/// # Ok::<(), JournalError>(())
/// ```
pub struct JournalerBuilder {
    name: String,
    sender: Option<Box<dyn Sender>>,
    threshold: Option<Priority>,
    default: Option<Priority>,
}

impl JournalerBuilder {
    pub fn new() -> Self {
        Self {
            name: default_name(),
            sender: None,
            threshold: None,
            default: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sender<S: Sender + 'static>(mut self, sender: S) -> Self {
        self.sender = Some(Box::new(sender));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, priority: Priority) -> Self {
        self.threshold = Some(priority);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn default_priority(mut self, priority: Priority) -> Self {
        self.default = Some(priority);
        self
    }

    /// # Errors
    ///
    /// [`JournalError::InvalidPriority`](super::JournalError::InvalidPriority)
    /// if a configured threshold or default is out of range.
    pub fn build(self) -> Result<Journaler> {
        let sender = match self.sender {
            Some(sender) => sender,
            None => Box::new(NativeSender::new(self.name.clone(), LevelInfo::default())?),
        };

        let mut level = sender.level();
        if let Some(threshold) = self.threshold {
            level.set_threshold(threshold)?;
        }
        if let Some(default) = self.default {
            level.set_default(default)?;
        }
        sender.set_level(level)?;

        Ok(Journaler {
            name: RwLock::new(self.name),
            sender: RwLock::new(sender),
        })
    }
}

impl Default for JournalerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Name of the running executable, or `"journal"` when it cannot be determined.
pub(crate) fn default_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "journal".to_string())
}
