//! Handlers for `/strings` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/strings` | Body: `{"value":"..."}`; 201 + record, 409 if already stored |
//! | `GET`    | `/strings` | Optional `is_palindrome`, `min_length`, `max_length`, `word_count`, `contains_character` |
//! | `GET`    | `/strings/filter-by-natural-language` | `?query=...`, see [`lexis_core::phrase`] |
//! | `GET`    | `/strings/:value` | 404 if not found |
//! | `DELETE` | `/strings/:value` | 204, or 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use lexis_core::{
  FilterSet, StringRecord, content_hash,
  filter::Filtered,
  phrase,
  store::StringStore,
};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ApiError;

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub value: String,
}

/// `POST /strings` — returns 201 + the stored [`StringRecord`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StringStore,
{
  let Json(body) = body?;
  let record = StringRecord::new(body.value)?;

  if store
    .get_by_value(&record.value)
    .await
    .map_err(ApiError::from_store)?
    .is_some()
  {
    tracing::debug!(id = %record.id, "rejecting existing string");
    return Err(ApiError::Conflict("string already exists".to_owned()));
  }

  store.insert(&record).await.map_err(ApiError::from_store)?;
  tracing::info!(id = %record.id, length = record.properties.length, "stored string");
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /strings/:value`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(value): Path<String>,
) -> Result<Json<StringRecord>, ApiError>
where
  S: StringStore,
{
  let record = store
    .get_by_value(&value)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound("string not found".to_owned()))?;
  Ok(Json(record))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /strings/:value`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(value): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: StringStore,
{
  let removed = store
    .delete_by_value(&value)
    .await
    .map_err(ApiError::from_store)?;
  if !removed {
    return Err(ApiError::NotFound("string not found".to_owned()));
  }
  tracing::info!(id = %content_hash(&value), "deleted string");
  Ok(StatusCode::NO_CONTENT)
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  #[serde(default, deserialize_with = "lenient_bool")]
  pub is_palindrome:      Option<bool>,
  pub min_length:         Option<usize>,
  pub max_length:         Option<usize>,
  pub word_count:         Option<usize>,
  /// Must be exactly one character.
  pub contains_character: Option<String>,
}

/// Accepts the usual spellings of a boolean flag, case-insensitively:
/// `true/t/yes/y/on/1` and `false/f/no/n/off/0`.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
  D: serde::Deserializer<'de>,
{
  use serde::de::Error as _;

  let Some(raw) = Option::<String>::deserialize(deserializer)? else {
    return Ok(None);
  };
  match raw.to_ascii_lowercase().as_str() {
    "true" | "t" | "yes" | "y" | "on" | "1" => Ok(Some(true)),
    "false" | "f" | "no" | "n" | "off" | "0" => Ok(Some(false)),
    _ => Err(D::Error::custom(format!(
      "is_palindrome: invalid boolean {raw:?}"
    ))),
  }
}

impl TryFrom<ListParams> for FilterSet {
  type Error = ApiError;

  fn try_from(p: ListParams) -> Result<Self, Self::Error> {
    let contains_character = p
      .contains_character
      .map(|s| {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
          (Some(c), None) => Ok(c),
          _ => Err(ApiError::Validation(
            "contains_character must be exactly one character".to_owned(),
          )),
        }
      })
      .transpose()?;

    Ok(FilterSet {
      is_palindrome: p.is_palindrome,
      min_length: p.min_length,
      max_length: p.max_length,
      word_count: p.word_count,
      contains_character,
    })
  }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
  pub data:            Vec<StringRecord>,
  pub count:           usize,
  pub filters_applied: FilterSet,
}

/// Read every record and narrow it with `filters`.
async fn filtered<S: StringStore>(
  store: &S,
  filters: FilterSet,
) -> Result<Filtered, ApiError> {
  filters.validate()?;
  let all = store.list_all().await.map_err(ApiError::from_store)?;
  Ok(filters.apply(all)?)
}

/// `GET /strings[?is_palindrome=..][&min_length=..][&max_length=..][&word_count=..][&contains_character=..]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError>
where
  S: StringStore,
{
  let Query(params) = params?;
  let filters = FilterSet::try_from(params)?;
  let Filtered { records, filters } = filtered(store.as_ref(), filters).await?;

  Ok(Json(ListResponse {
    count: records.len(),
    data: records,
    filters_applied: filters,
  }))
}

// ─── Natural language ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NaturalLanguageParams {
  pub query: String,
}

#[derive(Debug, Serialize)]
pub struct InterpretedQuery {
  pub original:       String,
  /// Only the keys the interpreter populated.
  #[serde(serialize_with = "populated_only")]
  pub parsed_filters: FilterSet,
}

#[derive(Debug, Serialize)]
pub struct NaturalLanguageResponse {
  pub data:              Vec<StringRecord>,
  pub count:             usize,
  pub interpreted_query: InterpretedQuery,
}

fn populated_only<S: Serializer>(
  set: &FilterSet,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  use serde::ser::Error as _;

  let map: serde_json::Map<String, serde_json::Value> =
    match serde_json::to_value(set).map_err(S::Error::custom)? {
      serde_json::Value::Object(m) => {
        m.into_iter().filter(|(_, v)| !v.is_null()).collect()
      }
      _ => serde_json::Map::new(),
    };
  map.serialize(serializer)
}

/// `GET /strings/filter-by-natural-language?query=<text>`
pub async fn natural_language<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<NaturalLanguageParams>, QueryRejection>,
) -> Result<Json<NaturalLanguageResponse>, ApiError>
where
  S: StringStore,
{
  let Query(NaturalLanguageParams { query }) = params?;
  let parsed = phrase::interpret(&query)?;
  tracing::debug!(?parsed, "interpreted natural-language query");

  let Filtered { records, filters } = filtered(store.as_ref(), parsed).await?;

  Ok(Json(NaturalLanguageResponse {
    count: records.len(),
    data: records,
    interpreted_query: InterpretedQuery {
      original:       query,
      parsed_filters: filters,
    },
  }))
}
