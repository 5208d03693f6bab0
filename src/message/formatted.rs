//! printf-style template messages

use super::{checked_priority, Composer, Payload};
use crate::core::{Priority, Result};
use std::fmt::Write;
use std::iter::Peekable;
use std::str::Chars;
use std::sync::OnceLock;

/// A template plus typed arguments, substituted on first resolve.
///
/// Supported verbs: `%s` `%v` `%d` `%f` `%x` `%X` `%q` `%t` and the literal
/// `%%`. A verb may carry a minimum width (`%5d`), a `-` flag to pad on the
/// right instead of the left (`%-8s`), and a `.N` precision for `%f`
/// (`%8.2f`). Mismatches never panic; they render inline markers instead:
///
/// - a verb without an argument renders `%!d(MISSING)`
/// - surplus arguments append `%!(EXTRA a, b)`
/// - a verb that does not fit its argument renders `%!d(string=abc)`
///
/// # Example
///
/// ```
/// use rust_journaler::message::{Composer, FormattedMessage};
/// use rust_journaler::payloads;
///
/// let msg = FormattedMessage::new("%s is %.1f%% full", payloads!["/var", 93.27]);
/// assert_eq!(msg.resolve(), "/var is 93.3% full");
/// ```
#[derive(Debug, Clone)]
pub struct FormattedMessage {
    priority: Priority,
    template: String,
    args: Vec<Payload>,
    rendered: OnceLock<String>,
}

impl FormattedMessage {
    pub fn new(template: impl Into<String>, args: Vec<Payload>) -> Self {
        Self {
            priority: Priority::INVALID,
            template: template.into(),
            args,
            rendered: OnceLock::new(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn args(&self) -> &[Payload] {
        &self.args
    }
}

impl Composer for FormattedMessage {
    fn priority(&self) -> Priority {
        self.priority
    }

    fn set_priority(&mut self, priority: Priority) -> Result<()> {
        self.priority = checked_priority(priority)?;
        Ok(())
    }

    fn resolve(&self) -> &str {
        self.rendered
            .get_or_init(|| sprintf(&self.template, &self.args))
    }

    fn raw(&self) -> serde_json::Value {
        serde_json::Value::String(self.resolve().to_string())
    }

    fn loggable(&self) -> bool {
        !self.template.is_empty()
    }
}

/// Substitute `args` into `template`.
pub fn sprintf(template: &str, args: &[Payload]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let left_align = chars.next_if_eq(&'-').is_some();
        let width = take_number(&mut chars);
        let precision = match chars.next_if_eq(&'.') {
            Some(_) => Some(take_number(&mut chars).unwrap_or(0)),
            None => None,
        };

        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };

        if verb == '%' {
            out.push('%');
            continue;
        }

        match args.next() {
            Some(arg) => {
                let mut piece = String::new();
                write_verb(&mut piece, verb, precision, arg);
                pad(&mut out, &piece, width.unwrap_or(0), left_align);
            }
            None => {
                let _ = write!(out, "%!{}(MISSING)", verb);
            }
        }
    }

    let extra: Vec<String> = args.map(ToString::to_string).collect();
    if !extra.is_empty() {
        let _ = write!(out, "%!(EXTRA {})", extra.join(", "));
    }

    out
}

fn take_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut digits = String::new();
    while let Some(d) = chars.next_if(char::is_ascii_digit) {
        digits.push(d);
    }
    digits.parse().ok()
}

fn pad(out: &mut String, piece: &str, width: usize, left_align: bool) {
    let fill = width.saturating_sub(piece.chars().count());
    if !left_align {
        out.extend(std::iter::repeat(' ').take(fill));
    }
    out.push_str(piece);
    if left_align {
        out.extend(std::iter::repeat(' ').take(fill));
    }
}

fn write_verb(out: &mut String, verb: char, precision: Option<usize>, arg: &Payload) {
    let written = match (verb, arg) {
        ('s' | 'v', _) => write!(out, "{}", arg),
        ('d', Payload::Int(i)) => write!(out, "{}", i),
        ('f', Payload::Float(f)) => write!(out, "{:.*}", precision.unwrap_or(6), f),
        ('f', Payload::Int(i)) => write!(out, "{:.*}", precision.unwrap_or(6), *i as f64),
        ('x', Payload::Int(i)) if *i < 0 => write!(out, "-{:x}", i.unsigned_abs()),
        ('x', Payload::Int(i)) => write!(out, "{:x}", i),
        ('X', Payload::Int(i)) if *i < 0 => write!(out, "-{:X}", i.unsigned_abs()),
        ('X', Payload::Int(i)) => write!(out, "{:X}", i),
        ('x', Payload::String(s)) => s.bytes().try_for_each(|b| write!(out, "{:02x}", b)),
        ('X', Payload::String(s)) => s.bytes().try_for_each(|b| write!(out, "{:02X}", b)),
        ('q', Payload::String(s)) => write!(out, "{:?}", s),
        ('t', Payload::Bool(b)) => write!(out, "{}", b),
        _ => write!(out, "%!{}({}={})", verb, arg.type_name(), arg),
    };
    debug_assert!(written.is_ok());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payloads;

    #[test]
    fn test_basic_verbs() {
        assert_eq!(sprintf("%s=%d", &payloads!["retries", 3]), "retries=3");
        assert_eq!(sprintf("%v|%v", &payloads![true, 1.5]), "true|1.5");
        assert_eq!(sprintf("%t", &payloads![false]), "false");
        assert_eq!(sprintf("%q", &payloads!["a b"]), "\"a b\"");
    }

    #[test]
    fn test_float_precision() {
        assert_eq!(sprintf("%f", &payloads![1.5]), "1.500000");
        assert_eq!(sprintf("%.2f", &payloads![3.14159]), "3.14");
        assert_eq!(sprintf("%.0f", &payloads![2]), "2");
    }

    #[test]
    fn test_hex() {
        assert_eq!(sprintf("%x", &payloads![255]), "ff");
        assert_eq!(sprintf("%X", &payloads![-255]), "-FF");
        assert_eq!(sprintf("%x", &payloads!["hi"]), "6869");
    }

    #[test]
    fn test_width_and_alignment() {
        assert_eq!(sprintf("%5d", &payloads![42]), "   42");
        assert_eq!(sprintf("%-8s|", &payloads!["disk"]), "disk    |");
        assert_eq!(sprintf("%8.2f", &payloads![3.14159]), "    3.14");
        assert_eq!(sprintf("%2s", &payloads!["wider"]), "wider");
        assert_eq!(sprintf("%5d", &[]), "%!d(MISSING)");
    }

    #[test]
    fn test_literal_percent() {
        assert_eq!(sprintf("100%%", &[]), "100%");
    }

    #[test]
    fn test_missing_and_extra() {
        assert_eq!(sprintf("%s and %s", &payloads!["one"]), "one and %!s(MISSING)");
        assert_eq!(sprintf("%d", &payloads![1, 2, "x"]), "1%!(EXTRA 2, x)");
    }

    #[test]
    fn test_wrong_type() {
        assert_eq!(sprintf("%d", &payloads!["abc"]), "%!d(string=abc)");
    }

    #[test]
    fn test_trailing_percent() {
        assert_eq!(sprintf("50%", &[]), "50%!(NOVERB)");
    }

    #[test]
    fn test_resolve_is_lazy_and_idempotent() {
        let msg = FormattedMessage::new("%s-%d", payloads!["a", 1]);
        assert!(msg.rendered.get().is_none());

        let first = msg.resolve().to_string();
        assert_eq!(first, "a-1");
        assert_eq!(msg.resolve(), first);
    }

    #[test]
    fn test_loggable() {
        assert!(!FormattedMessage::new("", payloads![]).loggable());
        assert!(FormattedMessage::new("%s", payloads![""]).loggable());
    }
}
