//! The stored record — a string together with its computed properties.
//!
//! Records are immutable once created. The id is the content hash of the
//! value, so the same value can never produce two distinct records.

use chrono::{DateTime, SubsecRound as _, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  analyze::{PropertyBundle, analyze},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringRecord {
  /// Equal to `properties.sha256_hash`.
  pub id:         String,
  pub value:      String,
  pub properties: PropertyBundle,
  #[serde(with = "timestamp")]
  pub created_at: DateTime<Utc>,
}

impl StringRecord {
  /// Analyze `value` and stamp it with the current time.
  pub fn new(value: impl Into<String>) -> Result<Self> {
    Self::new_at(value, Utc::now())
  }

  /// Analyze `value` with an explicit creation time.
  ///
  /// The timestamp is truncated to microseconds, the precision it is stored
  /// and serialized with.
  pub fn new_at(
    value: impl Into<String>,
    created_at: DateTime<Utc>,
  ) -> Result<Self> {
    let value = value.into();
    if value.is_empty() {
      return Err(Error::EmptyValue);
    }
    let properties = analyze(&value);
    Ok(Self {
      id: properties.sha256_hash.clone(),
      value,
      properties,
      created_at: created_at.trunc_subsecs(6),
    })
  }
}

/// Fixed-precision ISO-8601 timestamps with a literal `Z` suffix, e.g.
/// `2025-01-02T03:04:05.123456Z`. Lexical order matches chronological order.
pub mod timestamp {
  use chrono::{DateTime, SecondsFormat, Utc};
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  pub fn format(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
  }

  pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
  }

  pub fn serialize<S: Serializer>(
    dt: &DateTime<Utc>,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(dt))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<DateTime<Utc>, D::Error> {
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(D::Error::custom)
  }
}
