//! Error type for `roster-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("account attributes must be a JSON object")]
  AttributesNotObject,

  /// Attributes share a JSON object with the account `id` when embedded.
  #[error("account attributes may not contain an 'id' key")]
  ReservedAttribute,

  /// A member with the supplied id already exists.
  #[error("a member with id '{0}' already exists")]
  DuplicateMember(String),

  #[error("an account with id '{0}' already exists")]
  DuplicateAccount(String),

  /// `create` referenced an account that is not in the store.
  #[error("No account with id '{0}'")]
  AccountNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for roster_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::DuplicateMember(_) | Error::DuplicateAccount(_) => {
        roster_core::Error::Conflict(e.to_string())
      }
      Error::AccountNotFound(_) => roster_core::Error::NotFound(e.to_string()),
      Error::ReservedAttribute => roster_core::Error::InvalidInput(e.to_string()),
      other => roster_core::Error::Internal(Box::new(other)),
    }
  }
}

/// True for primary-key and UNIQUE violations.
pub(crate) fn is_unique_violation(e: &tokio_rusqlite::Error) -> bool {
  match e {
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _)) => {
      f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        || f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    }
    _ => false,
  }
}
