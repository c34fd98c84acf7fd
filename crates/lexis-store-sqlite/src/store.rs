//! [`SqliteStore`] — the SQLite implementation of [`StringStore`].

use std::path::Path;

use lexis_core::{StringRecord, store::StringStore};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RECORD_COLUMNS, RawRecord},
  schema::SCHEMA,
};

/// A Lexis string store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection. Other clones of this store become
  /// unusable afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

impl StringStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, record: &StringRecord) -> Result<()> {
    let raw = RawRecord::encode(record)?;
    let id = raw.id.clone();

    let inserted = self
      .conn
      .call(move |conn| {
        let res = conn.execute(
          "INSERT INTO strings (id, value, properties, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![raw.id, raw.value, raw.properties, raw.created_at],
        );
        match res {
          Ok(_) => Ok(true),
          Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
          {
            Ok(false)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if !inserted {
      return Err(Error::Duplicate(id));
    }
    Ok(())
  }

  async fn get_by_value(&self, value: &str) -> Result<Option<StringRecord>> {
    let value = value.to_owned();

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {RECORD_COLUMNS} FROM strings WHERE value = ?1"),
              rusqlite::params![value],
              RawRecord::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn list_all(&self) -> Result<Vec<StringRecord>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {RECORD_COLUMNS} FROM strings
           ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map([], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn delete_by_value(&self, value: &str) -> Result<bool> {
    let value = value.to_owned();

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM strings WHERE value = ?1",
          rusqlite::params![value],
        )?)
      })
      .await?;

    Ok(affected > 0)
  }
}
