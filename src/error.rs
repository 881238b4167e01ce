//! Error handling for Meadow
//!
//! A single error type covers every generation stage. Parameter problems are
//! reported before any buffer is allocated, so a failed call never leaves
//! partially written buffers behind.

use std::error::Error as StdError;
use std::fmt;

/// Main error type for field generation
#[derive(Debug)]
pub enum FieldError {
    // Parameter Errors
    InvalidParameter {
        field: String,
        value: String,
        reason: String,
    },

    // Buffer Errors
    BufferAccess {
        index: usize,
        size: usize,
    },

    // Configuration Errors
    ConfigLoad {
        path: String,
        error: String,
    },
    ConfigParse {
        error: String,
    },

    // Generic fallback for unexpected errors
    Internal {
        message: String,
    },
}

impl FieldError {
    /// Shorthand used by every validation routine
    pub fn invalid(field: &str, value: impl fmt::Display, reason: &str) -> Self {
        FieldError::InvalidParameter {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidParameter {
                field,
                value,
                reason,
            } => write!(f, "Invalid parameter: {} = {} ({})", field, value, reason),
            FieldError::BufferAccess { index, size } => write!(
                f,
                "Buffer access out of bounds: index {} >= size {}",
                index, size
            ),
            FieldError::ConfigLoad { path, error } => {
                write!(f, "Failed to load config {}: {}", path, error)
            }
            FieldError::ConfigParse { error } => write!(f, "Failed to parse config: {}", error),
            FieldError::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl StdError for FieldError {}

/// Type alias for Results in Meadow
pub type FieldResult<T> = Result<T, FieldError>;

impl From<crate::config::ConfigError> for FieldError {
    fn from(err: crate::config::ConfigError) -> Self {
        use crate::config::ConfigError;
        match err {
            ConfigError::Io { path, source } => FieldError::ConfigLoad {
                path,
                error: source.to_string(),
            },
            ConfigError::Parse(e) => FieldError::ConfigParse {
                error: e.to_string(),
            },
        }
    }
}

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_field<F>(self, f: F) -> FieldResult<T>
    where
        F: FnOnce() -> FieldError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_field<F>(self, f: F) -> FieldResult<T>
    where
        F: FnOnce() -> FieldError,
    {
        self.ok_or_else(f)
    }
}
