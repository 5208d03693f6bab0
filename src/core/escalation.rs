//! Terminal outcomes of the panic/fatal logging variants
//!
//! The journaler never unwinds or exits by itself. Escalation-capable calls
//! send their message and then hand back an [`Escalation`]; the call site
//! decides how to act on it, usually with [`Escalation::enforce`].

use std::fmt;

/// Exit status used by the fatal variants
pub const FATAL_EXIT_CODE: i32 = 1;

/// What the caller should do after an escalation-capable logging call.
#[must_use = "an escalation does nothing unless enforced or inspected"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Escalation {
    /// Ordinary call, carry on
    Continue,
    /// Unwind with this message
    Panic(String),
    /// Terminate the process with this status
    Exit(i32),
}

impl Escalation {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Escalation::Continue)
    }

    /// Act on the outcome: return for `Continue`, `panic!` for `Panic`,
    /// `std::process::exit` for `Exit`.
    ///
    /// # Panics
    ///
    /// For [`Escalation::Panic`], always, with the logged text as payload.
    pub fn enforce(self) {
        match self {
            Escalation::Continue => {}
            Escalation::Panic(message) => std::panic::panic_any(message),
            Escalation::Exit(code) => std::process::exit(code),
        }
    }
}

impl fmt::Display for Escalation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Escalation::Continue => write!(f, "continue"),
            Escalation::Panic(message) => write!(f, "panic: {}", message),
            Escalation::Exit(code) => write!(f, "exit({})", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continue_is_noop() {
        assert!(!Escalation::Continue.is_terminal());
        Escalation::Continue.enforce();
    }

    #[test]
    fn test_panic_carries_message() {
        let outcome = Escalation::Panic("disk full".to_string());
        assert!(outcome.is_terminal());

        let caught = std::panic::catch_unwind(|| outcome.enforce()).unwrap_err();
        assert_eq!(caught.downcast_ref::<String>().map(String::as_str), Some("disk full"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Escalation::Exit(FATAL_EXIT_CODE).to_string(), "exit(1)");
        assert_eq!(Escalation::Panic("x".into()).to_string(), "panic: x");
    }
}
