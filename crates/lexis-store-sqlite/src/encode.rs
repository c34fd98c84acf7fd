//! Encoding and decoding between [`StringRecord`] and its SQLite row.
//!
//! Timestamps are stored as fixed-precision RFC 3339 strings so that
//! `ORDER BY created_at` is chronological. The property bundle is stored as
//! compact JSON.

use chrono::{DateTime, Utc};
use lexis_core::{PropertyBundle, StringRecord, record::timestamp};

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String { timestamp::format(&dt) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  timestamp::parse(s).map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_properties(p: &PropertyBundle) -> Result<String> {
  Ok(serde_json::to_string(p)?)
}

pub fn decode_properties(s: &str) -> Result<PropertyBundle> {
  Ok(serde_json::from_str(s)?)
}

/// Column values for a single row in the `strings` table.
pub struct RawRecord {
  pub id:         String,
  pub value:      String,
  pub properties: String,
  pub created_at: String,
}

/// Column list matching the field order of [`RawRecord::from_row`].
pub const RECORD_COLUMNS: &str = "id, value, properties, created_at";

impl RawRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      value:      row.get(1)?,
      properties: row.get(2)?,
      created_at: row.get(3)?,
    })
  }

  pub fn encode(record: &StringRecord) -> Result<Self> {
    Ok(Self {
      id:         record.id.clone(),
      value:      record.value.clone(),
      properties: encode_properties(&record.properties)?,
      created_at: encode_dt(record.created_at),
    })
  }

  pub fn into_record(self) -> Result<StringRecord> {
    Ok(StringRecord {
      id:         self.id,
      value:      self.value,
      properties: decode_properties(&self.properties)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
