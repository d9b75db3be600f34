//! Error types for Schemaport
//!
//! This module provides unified error handling across the console,
//! covering the three failure classes the UI distinguishes between:
//! validation errors (nothing was sent), transport errors (the request
//! never produced a usable response) and semantic errors (the server
//! answered but the payload lacks what was expected).

use thiserror::Error;

use crate::types::Severity;

/// The main error type for Schemaport
#[derive(Debug, Error)]
pub enum ConsoleError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// One or more required selections are empty
    #[error("Please select {}.", join_fields(.fields))]
    MissingSelection { fields: Vec<String> },

    /// General validation error
    #[error("{0}")]
    Validation(String),

    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// The request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Server returned status {status} for {path}")]
    Http { status: u16, path: String },

    // ========================================================================
    // Semantic Errors
    // ========================================================================
    /// The response is missing an expected field
    #[error("Response from {endpoint} is missing '{field}'")]
    MissingField { endpoint: String, field: String },

    /// The server reported an error inside an otherwise successful payload
    #[error("Server error: {0}")]
    Server(String),

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Parse(String),

    // ========================================================================
    // IO / Serialization Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Operation cancelled by user
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl ConsoleError {
    /// Create a missing-selection error from field names
    pub fn missing<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConsoleError::MissingSelection {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ConsoleError::Validation(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        ConsoleError::Transport(msg.into())
    }

    /// Create a missing-field error
    pub fn missing_field(endpoint: impl Into<String>, field: impl Into<String>) -> Self {
        ConsoleError::MissingField {
            endpoint: endpoint.into(),
            field: field.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        ConsoleError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        ConsoleError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error was raised before any request was issued
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConsoleError::MissingSelection { .. } | ConsoleError::Validation(_)
        )
    }

    /// Check if this error is a network/transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, ConsoleError::Transport(_) | ConsoleError::Http { .. })
    }

    /// Check if the server answered but the payload was unusable
    pub fn is_semantic(&self) -> bool {
        matches!(
            self,
            ConsoleError::MissingField { .. } | ConsoleError::Server(_) | ConsoleError::Parse(_)
        )
    }

    /// Notification severity for this error
    pub fn severity(&self) -> Severity {
        if self.is_validation() {
            Severity::Warning
        } else {
            Severity::Danger
        }
    }

    /// Text shown to the user in a notification
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Transport(_) | ConsoleError::Http { .. } => {
                "Request failed. Please check the server connection and try again.".to_string()
            }
            ConsoleError::Parse(_) => "Received an unexpected response from the server.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Join field names as "a", "a and b" or "a, b, and c"
fn join_fields(fields: &[String]) -> String {
    match fields {
        [] => String::from("a value"),
        [one] => one.clone(),
        [a, b] => format!("{} and {}", a, b),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

/// Result type alias using ConsoleError
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> ConsoleResult<T>;
}

impl<T, E: Into<ConsoleError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> ConsoleResult<T> {
        self.map_err(|e| {
            let err: ConsoleError = e.into();
            ConsoleError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
