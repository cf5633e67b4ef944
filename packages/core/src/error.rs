use thiserror::Error;

/// Errors surfaced by the selector crate.
///
/// The engine itself is infallible: malformed input degrades to a clamp
/// or a no-op, never an error. Only the notification serialization
/// boundary can fail.
#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("notification serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SelectorResult<T> = Result<T, SelectorError>;
