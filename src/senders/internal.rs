//! In-process sender that records messages on a channel
//!
//! Useful in tests and for forwarding a journaler's output to another part of
//! the program.

use crate::core::{JournalError, LevelInfo, Priority, Result, Sender, SenderBase};
use crate::message::Composer;
use crossbeam_channel::{
    bounded, unbounded, Receiver, Sender as ChannelSender, TryRecvError, TrySendError,
};

/// What the sender saw for one message.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalMessage {
    /// Effective priority (the sender default for untagged messages)
    pub priority: Priority,
    /// Resolved text, empty when the message was filtered out
    pub rendered: String,
    /// Structured form, `Null` when the message was filtered out
    pub raw: serde_json::Value,
    /// Whether the message passed the sender's filter
    pub logged: bool,
}

/// Sender that pushes every message it receives, filtered or not, into a
/// channel.
///
/// # Example
///
/// ```
/// use rust_journaler::prelude::*;
///
/// let sender = InternalSender::new("capture", LevelInfo::new(Priority::WARNING, Priority::INFO))?;
/// let output = sender.receiver();
///
/// let journaler = Journaler::new("capture", sender);
/// journaler.info("ignored");
/// journaler.error("kept");
///
/// let seen: Vec<_> = output.try_iter().collect();
/// assert_eq!(seen.len(), 2);
/// assert!(!seen[0].logged);
/// assert_eq!(seen[1].rendered, "kept");
/// # Ok::<(), JournalError>(())
/// ```
pub struct InternalSender {
    base: SenderBase,
    tx: ChannelSender<InternalMessage>,
    rx: Receiver<InternalMessage>,
}

impl InternalSender {
    /// Sender with an unbounded queue. Records pile up until a receiver
    /// drains them; use [`bounded`](Self::bounded) when nothing may.
    pub fn new(name: impl Into<String>, level: LevelInfo) -> Result<Self> {
        let (tx, rx) = unbounded();
        Ok(Self {
            base: SenderBase::new(name, level)?,
            tx,
            rx,
        })
    }

    /// Sender that keeps at most `capacity` undrained records. Records
    /// arriving at a full queue are dropped, counted as failures and
    /// reported to the error handler.
    pub fn bounded(name: impl Into<String>, level: LevelInfo, capacity: usize) -> Result<Self> {
        let (tx, rx) = bounded(capacity);
        Ok(Self {
            base: SenderBase::new(name, level)?,
            tx,
            rx,
        })
    }

    /// A handle on the recorded messages. Clones share one queue.
    pub fn receiver(&self) -> Receiver<InternalMessage> {
        self.rx.clone()
    }

    /// Pop the oldest recorded message, if any.
    pub fn try_next(&self) -> Option<InternalMessage> {
        match self.rx.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn base(&self) -> &SenderBase {
        &self.base
    }

    fn record(&self, message: &dyn Composer) {
        let logged = self.base.should_log(message);
        // Filtered messages stay unrendered
        let (rendered, raw) = if logged {
            (message.resolve().to_string(), message.raw())
        } else {
            (String::new(), serde_json::Value::Null)
        };
        let record = InternalMessage {
            priority: self.base.level().effective_priority(message),
            rendered,
            raw,
            logged,
        };

        match self.tx.try_send(record) {
            Ok(()) if logged => {
                self.base.metrics().record_sent(1);
            }
            Ok(()) => {}
            Err(TrySendError::Full(_)) => self
                .base
                .handle_error(&JournalError::transport("internal channel full"), message),
            Err(TrySendError::Disconnected(_)) => self.base.handle_error(
                &JournalError::transport("internal channel disconnected"),
                message,
            ),
        }
    }
}

impl Sender for InternalSender {
    fn name(&self) -> String {
        self.base.name()
    }

    fn set_name(&self, name: &str) {
        self.base.set_name(name);
    }

    fn level(&self) -> LevelInfo {
        self.base.level()
    }

    fn set_level(&self, level: LevelInfo) -> Result<()> {
        self.base.set_level(level)
    }

    fn send(&self, message: &dyn Composer) {
        if self.base.is_closed() {
            self.base
                .handle_error(&JournalError::closed(self.base.name()), message);
            return;
        }

        match message.as_group() {
            Some(group) => group
                .messages()
                .iter()
                .for_each(|m| self.record(m.as_ref())),
            None => self.record(message),
        }
    }

    fn close(&self) -> Result<()> {
        self.base.mark_closed();
        Ok(())
    }
}
