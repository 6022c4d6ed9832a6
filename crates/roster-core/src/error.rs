//! Error taxonomy shared by every layer of Roster.

use serde::Serialize;
use thiserror::Error;

/// Machine-readable classification carried by every [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
  /// Schema validation failed; detected before any store access.
  InvalidInput,
  /// The requested identity does not exist.
  NotFound,
  /// A uniqueness constraint rejected a create.
  Conflict,
  /// Unexpected store or connectivity failure.
  Internal,
}

impl ErrorCode {
  /// The wire spelling, e.g. `"NOT_FOUND"`.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::InvalidInput => "INVALID_INPUT",
      Self::NotFound => "NOT_FOUND",
      Self::Conflict => "CONFLICT",
      Self::Internal => "INTERNAL",
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  InvalidInput(String),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Conflict(String),

  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn code(&self) -> ErrorCode {
    match self {
      Self::InvalidInput(_) => ErrorCode::InvalidInput,
      Self::NotFound(_) => ErrorCode::NotFound,
      Self::Conflict(_) => ErrorCode::Conflict,
      Self::Internal(_) => ErrorCode::Internal,
    }
  }
}

impl From<validator::ValidationErrors> for Error {
  fn from(errors: validator::ValidationErrors) -> Self {
    Error::InvalidInput(errors.to_string())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
