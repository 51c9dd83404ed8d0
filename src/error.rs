//! Error types for the form engine

use thiserror::Error;

/// Engine errors. These are programming or setup errors, never user input
/// problems; those are reported through `ValidationErrors`.
#[derive(Debug, Error)]
pub enum FormError {
    /// Field name not on the employer form
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Value shape does not fit the field kind
    #[error("field {field} does not accept a {shape} value")]
    KindMismatch { field: String, shape: &'static str },

    /// A submission is already waiting for the backend
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// Field pattern failed to compile
    #[error("invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration could not be loaded or the client could not be built
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, FormError>;
