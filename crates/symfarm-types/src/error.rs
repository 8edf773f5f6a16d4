use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid farm path: {0}")]
    InvalidPath(String),
}

/// Convenience alias for type results.
pub type TypeResult<T> = Result<T, TypeError>;
