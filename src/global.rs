//! Process-wide default journaler
//!
//! The default instance is built on first use: named after the running
//! executable, writing to stdout at [`LevelInfo::default`]. Every free function
//! here delegates to it. Reconfigure with [`set_sender`] and friends; shut it
//! down with [`close`].
//!
//! ```
//! use rust_journaler::{global, payloads};
//!
//! global::notice("starting");
//! global::warning_fmt("%d retries left", payloads![2]);
//! ```

use crate::core::{
    journaler::default_name, Escalation, Journaler, LevelInfo, Priority, Result, Sender,
};
use crate::message::{Composer, Payload};
use crate::senders::NativeSender;
use std::sync::OnceLock;

static DEFAULT: OnceLock<Journaler> = OnceLock::new();

/// The default journaler, constructed on first call.
pub fn journaler() -> &'static Journaler {
    DEFAULT.get_or_init(|| {
        let name = default_name();
        Journaler::new(name.clone(), NativeSender::stdout_default(name))
    })
}

pub fn name() -> String {
    journaler().name()
}

pub fn set_name(name: &str) {
    journaler().set_name(name)
}

pub fn sender_name() -> String {
    journaler().sender_name()
}

/// Replace the default journaler's sender, closing the previous one.
pub fn set_sender(sender: impl Sender + 'static) -> Result<()> {
    journaler().set_sender(sender)
}

pub fn level() -> LevelInfo {
    journaler().level()
}

pub fn set_threshold(priority: Priority) -> Result<()> {
    journaler().set_threshold(priority)
}

pub fn set_default(priority: Priority) -> Result<()> {
    journaler().set_default(priority)
}

pub fn log<C: Composer>(priority: Priority, message: C) -> Result<()> {
    journaler().log(priority, message)
}

pub fn send(message: &dyn Composer) {
    journaler().send(message)
}

pub fn flush() -> Result<()> {
    journaler().flush()
}

/// Close the default journaler's sender. Later calls go to a closed sender
/// until [`set_sender`] installs a new one.
pub fn close() -> Result<()> {
    journaler().close()
}

macro_rules! delegate {
    ($($plain:ident, $fmt:ident, $values:ident;)*) => {
        $(
            pub fn $plain(message: impl Into<String>) {
                journaler().$plain(message)
            }

            pub fn $fmt(template: impl Into<String>, args: Vec<Payload>) {
                journaler().$fmt(template, args)
            }

            pub fn $values(values: Vec<Payload>) {
                journaler().$values(values)
            }
        )*
    };
}

macro_rules! delegate_escalations {
    ($($name:ident, $fmt:ident, $values:ident;)*) => {
        $(
            pub fn $name(message: impl Into<String>) -> Escalation {
                journaler().$name(message)
            }

            pub fn $fmt(template: impl Into<String>, args: Vec<Payload>) -> Escalation {
                journaler().$fmt(template, args)
            }

            pub fn $values(values: Vec<Payload>) -> Escalation {
                journaler().$values(values)
            }
        )*
    };
}

delegate! {
    emergency, emergency_fmt, emergency_values;
    alert, alert_fmt, alert_values;
    critical, critical_fmt, critical_values;
    error, error_fmt, error_values;
    warning, warning_fmt, warning_values;
    notice, notice_fmt, notice_values;
    info, info_fmt, info_values;
    debug, debug_fmt, debug_values;
}

delegate_escalations! {
    emergency_panic, emergency_panic_fmt, emergency_panic_values;
    emergency_fatal, emergency_fatal_fmt, emergency_fatal_values;
    alert_panic, alert_panic_fmt, alert_panic_values;
    alert_fatal, alert_fatal_fmt, alert_fatal_values;
    critical_panic, critical_panic_fmt, critical_panic_values;
    critical_fatal, critical_fatal_fmt, critical_fatal_values;
    error_panic, error_panic_fmt, error_panic_values;
    error_fatal, error_fatal_fmt, error_fatal_values;
}
