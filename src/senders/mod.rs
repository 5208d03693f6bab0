//! Sender implementations

pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod internal;
pub mod splunk;

pub use console::NativeSender;
#[cfg(feature = "file")]
pub use file::FileSender;
pub use internal::{InternalMessage, InternalSender};
#[cfg(feature = "splunk")]
pub use splunk::HecClient;
pub use splunk::{
    CollectorClient, HecEvent, SplunkConnectionInfo, SplunkSender, SPLUNK_CLIENT_TOKEN_ENV,
    SPLUNK_SERVER_URL_ENV,
};

// Re-export the trait so `senders::*` is enough to implement a backend
pub use crate::core::{Sender, SenderBase};
