//! Error types for `antioch-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown pledge frequency: {0:?}")]
  UnknownFrequency(String),

  #[error("unknown pledge status: {0}")]
  UnknownStatus(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
