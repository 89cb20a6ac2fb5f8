//! Error taxonomy for the core API.
//!
//! All variants are configuration/programmer errors. A wrong answer is never an
//! error; it is a `Verdict` with `correct = false`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
  /// Malformed or out-of-domain input to formatting or generation.
  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  /// A uniqueness constraint cannot be met: more distinct values requested than exist.
  #[error("range error: requested {count} distinct values but only {available} exist")]
  RangeError { count: u64, available: u64 },

  #[error("unsupported problem kind: {0}")]
  UnsupportedKind(String),

  #[error("configuration error: {0}")]
  Config(String),

  #[error("invalid session state: {0}")]
  InvalidState(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
  pub fn invalid(msg: impl Into<String>) -> Self {
    CoreError::InvalidArgument(msg.into())
  }
}
