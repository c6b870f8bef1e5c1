//! Error types for flux-stream pipelines.
//!
//! A pipeline either completes normally or terminates with a single
//! `StreamError`; fallible operators short-circuit on the first error.

use std::fmt;

/// Main error type for stream pipelines
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// A mapping, filtering, or combining closure faulted
    TransformFailure(String),
    /// The subscriber withdrew before the terminal event
    Cancelled,
    /// I/O related errors
    IO(String),
    /// Custom error with message
    Custom(String),
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::TransformFailure(msg) => write!(f, "Transform failed: {}", msg),
            StreamError::Cancelled => write!(f, "Subscription cancelled"),
            StreamError::IO(msg) => write!(f, "IO error: {}", msg),
            StreamError::Custom(msg) => write!(f, "Stream error: {}", msg),
        }
    }
}

impl std::error::Error for StreamError {}

impl From<std::io::Error> for StreamError {
    fn from(err: std::io::Error) -> Self {
        StreamError::IO(err.to_string())
    }
}

/// Result type for stream operations
pub type StreamResult<T> = Result<T, StreamError>;
