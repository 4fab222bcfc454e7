//! Planner error types.
//!
//! Every fallible registry, engine, or persistence operation returns a
//! [`PlannerError`]. A failed operation leaves the registry untouched, so the
//! caller can report the error and keep going.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when operating on a study plan.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// A subject with this name is already registered.
    #[error("subject already exists: {0}")]
    DuplicateSubject(String),

    /// No subject with this name is registered.
    #[error("subject not found: {0}")]
    SubjectNotFound(String),

    /// The daily budget was negative or not a finite number.
    #[error("hours must be a non-negative number, got {0}")]
    InvalidHours(f64),

    /// A performance score was NaN or infinite.
    #[error("performance score must be a finite number, got {0}")]
    InvalidScore(f64),

    /// The subject name cannot be stored in the plan file.
    #[error("invalid subject name {0:?}: must be non-empty and contain no commas or line breaks")]
    InvalidName(String),

    /// The plan file could not be opened, read, or written.
    #[error("unable to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the plan file is malformed.
    #[error("invalid plan file format at line {line}: {message}")]
    InvalidFormat { line: usize, message: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = PlannerError> = std::result::Result<T, E>;
