//! Error types for the quizmatch-rs library.
//!
//! Scoring is lenient by default, so most malformed quiz data never reaches
//! this module. What does reach it are caller programming errors (too few
//! group participants, non-finite trait values, negative weights), strict-mode
//! rejections, and the I/O and serialization failures of loading configuration.

use std::io;

use thiserror::Error;

/// Main result type for quizmatch operations.
pub type Result<T> = std::result::Result<T, QuizMatchError>;

/// Error type for all quizmatch operations.
#[derive(Error, Debug)]
pub enum QuizMatchError {
    /// Structurally invalid input handed to the engine
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Error description
        message: String,
        /// Argument or field that was rejected
        field: Option<String>,
    },

    /// I/O related errors (reading quiz files, configs)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data type being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for quiz definitions
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },
}

impl QuizMatchError {
    /// Create a new invalid input error naming the offending argument
    pub fn invalid_input_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new validation error with field context
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// True for errors caused by the caller's arguments rather than the environment
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::Validation { .. })
    }

    /// Add context to an existing error.
    ///
    /// I/O errors take the context as their message; field-carrying errors
    /// record it as the field unless one is already set.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        match &mut self {
            Self::Io { message, .. } => {
                *message = context.into();
            }
            Self::InvalidInput { field, .. }
            | Self::Config { field, .. }
            | Self::Validation { field, .. } => {
                if field.is_none() {
                    *field = Some(context.into());
                }
            }
            _ => {}
        }
        self
    }
}

impl From<io::Error> for QuizMatchError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for QuizMatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for QuizMatchError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

/// Result extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error result
    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<QuizMatchError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }

    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| e.into().with_context(msg))
    }
}
