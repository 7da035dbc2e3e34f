//! Error types for recognizer operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecognizerError {
    /// A locale grammar does not satisfy the pipeline's contract. Raised while
    /// building a [`Configuration`](crate::config::Configuration), never per call.
    #[error("Configuration defect: {0}")]
    ConfigurationDefect(String),

    /// A span was extracted but its captures do not describe a calendar value.
    #[error("Unresolvable span: {0}")]
    Unresolvable(String),

    #[error("Invalid recurrence: {0}")]
    InvalidRecurrence(String),
}

pub type Result<T> = std::result::Result<T, RecognizerError>;
