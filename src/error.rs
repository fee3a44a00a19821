use thiserror::Error;

/// Caller-facing errors.
///
/// `InvalidInput` signals a caller bug (violated precondition) and is the
/// only error class that crosses the assessment API: backend/provider
/// failures are recovered internally by backend fallthrough, and rule
/// application, scoring, and sorting are total over well-formed input.
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Background task failed to complete (async wrapper only).
    #[error("internal task failure: {0}")]
    Internal(String),
}
