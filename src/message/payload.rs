//! Primitive payload values carried by composers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value type for message payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::String(s) => write!(f, "{}", s),
            Payload::Int(i) => write!(f, "{}", i),
            Payload::Float(fl) => write!(f, "{}", fl),
            Payload::Bool(b) => write!(f, "{}", b),
            Payload::Null => write!(f, "null"),
        }
    }
}

impl Payload {
    /// Convert to serde_json::Value for structured backends
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Payload::String(s) => serde_json::Value::String(s.clone()),
            Payload::Int(i) => serde_json::Value::Number((*i).into()),
            Payload::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Payload::Bool(b) => serde_json::Value::Bool(*b),
            Payload::Null => serde_json::Value::Null,
        }
    }

    /// An empty string carries nothing worth logging.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::String(s) if s.is_empty())
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Payload::String(_) => "string",
            Payload::Int(_) => "int",
            Payload::Float(_) => "float",
            Payload::Bool(_) => "bool",
            Payload::Null => "null",
        }
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::String(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::String(s.to_string())
    }
}

impl From<&String> for Payload {
    fn from(s: &String) -> Self {
        Payload::String(s.clone())
    }
}

impl From<char> for Payload {
    fn from(c: char) -> Self {
        Payload::String(c.to_string())
    }
}

impl From<i64> for Payload {
    fn from(i: i64) -> Self {
        Payload::Int(i)
    }
}

impl From<i32> for Payload {
    fn from(i: i32) -> Self {
        Payload::Int(i64::from(i))
    }
}

impl From<u32> for Payload {
    fn from(i: u32) -> Self {
        Payload::Int(i64::from(i))
    }
}

/// Values above `i64::MAX` keep their digits as a string.
impl From<u64> for Payload {
    fn from(i: u64) -> Self {
        i64::try_from(i)
            .map(Payload::Int)
            .unwrap_or_else(|_| Payload::String(i.to_string()))
    }
}

/// Values above `i64::MAX` keep their digits as a string.
impl From<usize> for Payload {
    fn from(i: usize) -> Self {
        i64::try_from(i)
            .map(Payload::Int)
            .unwrap_or_else(|_| Payload::String(i.to_string()))
    }
}

impl From<f64> for Payload {
    fn from(f: f64) -> Self {
        Payload::Float(f)
    }
}

impl From<f32> for Payload {
    fn from(f: f32) -> Self {
        Payload::Float(f as f64)
    }
}

impl From<bool> for Payload {
    fn from(b: bool) -> Self {
        Payload::Bool(b)
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Payload::Null)
    }
}

/// Build a `Vec<Payload>` from heterogeneous values.
///
/// # Examples
///
/// ```
/// use rust_journaler::{payloads, Payload};
///
/// let args = payloads!["disk", 3, 0.5, true];
/// assert_eq!(args[1], Payload::Int(3));
/// ```
#[macro_export]
macro_rules! payloads {
    () => {
        ::std::vec::Vec::<$crate::Payload>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Payload::from($value)),+]
    };
}
