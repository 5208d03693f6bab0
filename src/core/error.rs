//! Error types for the journaler

use super::priority::Priority;

pub type Result<T> = std::result::Result<T, JournalError>;

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// Priority outside the valid range supplied to a setter
    #[error("{priority} ({}) is not a valid priority value (1-8)", .priority.value())]
    InvalidPriority { priority: Priority },

    /// Sender construction missing a required field
    #[error("Invalid configuration for {component}: {field} {message}")]
    Configuration {
        component: String,
        field: String,
        message: String,
    },

    /// File could not be opened for appending
    #[error("Cannot open log file '{path}': {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote transmission failure
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Send attempted after close
    #[error("Sender '{name}' is closed")]
    SenderClosed { name: String },
}

impl JournalError {
    /// Create an invalid priority error
    pub fn invalid_priority(priority: Priority) -> Self {
        JournalError::InvalidPriority { priority }
    }

    /// Create a configuration error naming the offending field
    pub fn config(
        component: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        JournalError::Configuration {
            component: component.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a file open error with the path
    pub fn file_open(path: impl Into<String>, source: std::io::Error) -> Self {
        JournalError::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        JournalError::Transport {
            message: msg.into(),
        }
    }

    /// Create a closed sender error
    pub fn closed(name: impl Into<String>) -> Self {
        JournalError::SenderClosed { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = JournalError::invalid_priority(Priority::new(0));
        assert!(matches!(err, JournalError::InvalidPriority { .. }));

        let err = JournalError::config("SplunkSender", "server_url", "must not be empty");
        assert!(matches!(err, JournalError::Configuration { .. }));

        let err = JournalError::transport("connection refused");
        assert!(matches!(err, JournalError::Transport { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = JournalError::invalid_priority(Priority::new(9));
        assert_eq!(
            err.to_string(),
            "INVALID (9) is not a valid priority value (1-8)"
        );

        let err = JournalError::config("SplunkSender", "token", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for SplunkSender: token must not be empty"
        );

        let err = JournalError::closed("audit");
        assert_eq!(err.to_string(), "Sender 'audit' is closed");
    }

    #[test]
    fn test_file_open_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = JournalError::file_open("/var/log/app.log", io_err);

        assert!(err.to_string().contains("/var/log/app.log"));
        assert!(err.to_string().contains("access denied"));
    }
}
