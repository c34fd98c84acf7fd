//! Error type for `lexis-store-sqlite`.

use lexis_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A record with this id (or value) is already stored.
  #[error("duplicate record: {0}")]
  Duplicate(String),
}

impl StoreError for Error {
  fn is_duplicate(&self) -> bool { matches!(self, Error::Duplicate(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
