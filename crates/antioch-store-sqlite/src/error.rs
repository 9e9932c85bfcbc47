//! Error type for `antioch-store-sqlite`.

use antioch_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] antioch_core::Error),

  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),

  /// The insert lost to an existing row holding the same unique column
  /// (`individuals.email` or `individuals.auth_user_id`).
  #[error("unique constraint violated: {0}")]
  UniqueViolation(String),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("individual not found: {0}")]
  IndividualNotFound(uuid::Uuid),
}

impl From<tokio_rusqlite::Error> for Error {
  /// Pull unique-constraint failures out of the generic database error so the
  /// resolver can re-drive its lookup on a lost insert race.
  fn from(e: tokio_rusqlite::Error) -> Self {
    if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, ref msg)) = e
      && f.code == rusqlite::ErrorCode::ConstraintViolation
      && f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    {
      return Error::UniqueViolation(msg.clone().unwrap_or_else(|| f.to_string()));
    }
    Error::Database(e)
  }
}

impl StoreError for Error {
  fn is_unique_violation(&self) -> bool {
    matches!(self, Error::UniqueViolation(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
