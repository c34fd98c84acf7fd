//! JSON REST API for Lexis.
//!
//! Exposes an axum [`Router`] backed by any [`lexis_core::store::StringStore`].
//! Tracing layers, TLS, and transport concerns are the caller's
//! responsibility.

pub mod error;
pub mod strings;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use lexis_core::store::StringStore;
use serde_json::{Value, json};

pub use error::ApiError;

/// Build the API router for `store`.
pub fn router<S>(store: Arc<S>) -> Router<()>
where
  S: StringStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    .route("/strings", get(strings::list::<S>).post(strings::create::<S>))
    .route(
      "/strings/filter-by-natural-language",
      get(strings::natural_language::<S>),
    )
    .route(
      "/strings/{value}",
      get(strings::get_one::<S>).delete(strings::delete_one::<S>),
    )
    .with_state(store)
}

/// `GET /health`
async fn health() -> Json<Value> {
  Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use chrono::{Duration, TimeZone, Utc};
  use lexis_core::{StringRecord, analyze};
  use lexis_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn make_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::open_in_memory().await.unwrap())
  }

  async fn send(
    store: &Arc<SqliteStore>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    router(store.clone())
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap()
  }

  async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn create(store: &Arc<SqliteStore>, value: &str) -> Response {
    send(store, "POST", "/strings", Some(json!({ "value": value }))).await
  }

  /// Insert directly with a fixed timestamp offset so ordering is
  /// deterministic.
  async fn seed(store: &Arc<SqliteStore>, values: &[&str]) {
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    for (i, v) in values.iter().enumerate() {
      let at = base + Duration::seconds(i as i64);
      store
        .insert(&StringRecord::new_at(*v, at).unwrap())
        .await
        .unwrap();
    }
  }

  fn data_values(body: &Value) -> Vec<String> {
    body["data"]
      .as_array()
      .unwrap()
      .iter()
      .map(|r| r["value"].as_str().unwrap().to_owned())
      .collect()
  }

  // ── Health ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn health_reports_ok() {
    let store = make_store().await;
    let resp = send(&store, "GET", "/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["status"], "ok");
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_with_record() {
    let store = make_store().await;
    let resp = create(&store, "A man a plan a canal Panama").await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = json_body(resp).await;
    let expected = analyze("A man a plan a canal Panama");
    assert_eq!(body["id"], expected.sha256_hash);
    assert_eq!(body["value"], "A man a plan a canal Panama");
    assert_eq!(body["properties"], serde_json::to_value(&expected).unwrap());
    assert_eq!(body["properties"]["is_palindrome"], true);
    assert_eq!(body["properties"]["word_count"], 7);
    assert!(body["created_at"].as_str().unwrap().ends_with('Z'));
  }

  #[tokio::test]
  async fn create_twice_is_conflict_and_keeps_one_record() {
    let store = make_store().await;
    assert_eq!(create(&store, "echo").await.status(), StatusCode::CREATED);

    let resp = create(&store, "echo").await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(resp).await["error"], "conflict");

    assert_eq!(store.list_all().await.unwrap().len(), 1);
  }

  /// Skips the existence check so a second create reaches the store's
  /// uniqueness constraint, as a losing concurrent create would.
  struct UncheckedLookupStore(SqliteStore);

  impl StringStore for UncheckedLookupStore {
    type Error = lexis_store_sqlite::Error;

    async fn insert(
      &self,
      record: &StringRecord,
    ) -> Result<(), Self::Error> {
      self.0.insert(record).await
    }

    async fn get_by_value(
      &self,
      _value: &str,
    ) -> Result<Option<StringRecord>, Self::Error> {
      Ok(None)
    }

    async fn list_all(&self) -> Result<Vec<StringRecord>, Self::Error> {
      self.0.list_all().await
    }

    async fn delete_by_value(&self, value: &str) -> Result<bool, Self::Error> {
      self.0.delete_by_value(value).await
    }
  }

  #[tokio::test]
  async fn insert_constraint_violation_is_conflict() {
    let store = Arc::new(UncheckedLookupStore(
      SqliteStore::open_in_memory().await.unwrap(),
    ));
    let post = || {
      Request::builder()
        .method("POST")
        .uri("/strings")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "value": "x" }).to_string()))
        .unwrap()
    };

    let resp = router(store.clone()).oneshot(post()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = router(store.clone()).oneshot(post()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(resp).await["error"], "conflict");

    assert_eq!(store.list_all().await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn create_empty_value_is_422() {
    let store = make_store().await;
    let resp = create(&store, "").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(resp).await["error"], "validation_error");
  }

  #[tokio::test]
  async fn create_with_wrong_type_is_422() {
    let store = make_store().await;
    let resp = send(&store, "POST", "/strings", Some(json!({ "value": 42 })))
      .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = send(&store, "POST", "/strings", Some(json!({}))).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  }

  // ── Get ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_round_trips_created_record() {
    let store = make_store().await;
    let created = json_body(create(&store, "hello world").await).await;

    let resp = send(&store, "GET", "/strings/hello%20world", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = json_body(resp).await;
    assert_eq!(fetched, created);
    assert_eq!(
      fetched["properties"],
      serde_json::to_value(analyze("hello world")).unwrap()
    );
  }

  #[tokio::test]
  async fn get_missing_is_404() {
    let store = make_store().await;
    let resp = send(&store, "GET", "/strings/nothing", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["error"], "not_found");
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_existing_returns_204_then_get_is_404() {
    let store = make_store().await;
    create(&store, "ephemeral").await;

    let resp = send(&store, "DELETE", "/strings/ephemeral", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&store, "GET", "/strings/ephemeral", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_missing_is_404() {
    let store = make_store().await;
    let resp = send(&store, "DELETE", "/strings/ghost", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_is_newest_first_with_all_filter_keys() {
    let store = make_store().await;
    seed(&store, &["first", "second", "third"]).await;

    let resp = send(&store, "GET", "/strings", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(data_values(&body), ["third", "second", "first"]);
    assert_eq!(body["count"], 3);
    assert_eq!(
      body["filters_applied"],
      json!({
        "is_palindrome": null,
        "min_length": null,
        "max_length": null,
        "word_count": null,
        "contains_character": null,
      })
    );
  }

  #[tokio::test]
  async fn list_applies_filters() {
    let store = make_store().await;
    seed(&store, &["racecar", "level", "nurses run", "hello", "Anna"]).await;

    let resp = send(
      &store,
      "GET",
      "/strings?is_palindrome=true&word_count=1&min_length=5",
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(data_values(&body), ["level", "racecar"]);
    assert_eq!(body["count"], 2);
    assert_eq!(body["filters_applied"]["is_palindrome"], true);
    assert_eq!(body["filters_applied"]["min_length"], 5);
    assert!(body["filters_applied"]["max_length"].is_null());
  }

  #[tokio::test]
  async fn list_contains_character_is_case_sensitive() {
    let store = make_store().await;
    seed(&store, &["Anna", "banana"]).await;

    let resp =
      send(&store, "GET", "/strings?contains_character=A", None).await;
    let body = json_body(resp).await;
    assert_eq!(data_values(&body), ["Anna"]);
    assert_eq!(body["filters_applied"]["contains_character"], "A");
  }

  #[tokio::test]
  async fn list_min_greater_than_max_is_400_regardless_of_data() {
    let store = make_store().await;
    let resp =
      send(&store, "GET", "/strings?min_length=5&max_length=2", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "bad_request");

    seed(&store, &["abc"]).await;
    let resp =
      send(&store, "GET", "/strings?min_length=5&max_length=2", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn list_rejects_malformed_parameters() {
    let store = make_store().await;
    for uri in [
      "/strings?contains_character=ab",
      "/strings?contains_character=",
      "/strings?min_length=-1",
      "/strings?word_count=many",
      "/strings?is_palindrome=maybe",
      "/strings?is_palindrome=2",
      "/strings?is_palindrome=",
    ] {
      let resp = send(&store, "GET", uri, None).await;
      assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
    }
  }

  #[tokio::test]
  async fn list_accepts_common_boolean_spellings() {
    let store = make_store().await;
    seed(&store, &["level", "hello"]).await;

    for (flag, expected) in [
      ("True", "level"),
      ("1", "level"),
      ("YES", "level"),
      ("on", "level"),
      ("False", "hello"),
      ("0", "hello"),
      ("off", "hello"),
    ] {
      let uri = format!("/strings?is_palindrome={flag}");
      let resp = send(&store, "GET", &uri, None).await;
      assert_eq!(resp.status(), StatusCode::OK, "{uri}");
      let body = json_body(resp).await;
      assert_eq!(data_values(&body), [expected], "{uri}");
      assert_eq!(
        body["filters_applied"]["is_palindrome"],
        expected == "level",
        "{uri}"
      );
    }
  }

  // ── Natural language ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn natural_language_single_word_palindromes() {
    let store = make_store().await;
    seed(&store, &["kayak", "step on no pets", "banana"]).await;

    let resp = send(
      &store,
      "GET",
      "/strings/filter-by-natural-language?query=Show%20me%20single%20word%20palindromic%20strings",
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(data_values(&body), ["kayak"]);
    assert_eq!(body["count"], 1);
    assert_eq!(
      body["interpreted_query"]["original"],
      "Show me single word palindromic strings"
    );
    assert_eq!(
      body["interpreted_query"]["parsed_filters"],
      json!({ "word_count": 1, "is_palindrome": true })
    );
  }

  #[tokio::test]
  async fn natural_language_longer_than() {
    let store = make_store().await;
    seed(&store, &["short", "exactly 10", "comfortably long"]).await;

    let resp = send(
      &store,
      "GET",
      "/strings/filter-by-natural-language?query=strings%20longer%20than%2010%20characters",
      None,
    )
    .await;
    let body = json_body(resp).await;
    assert_eq!(
      body["interpreted_query"]["parsed_filters"],
      json!({ "min_length": 11 })
    );
    assert_eq!(data_values(&body), ["comfortably long"]);
  }

  #[tokio::test]
  async fn natural_language_letter_rules_first_match_wins() {
    let store = make_store().await;
    seed(&store, &["zap", "apple"]).await;

    let resp = send(
      &store,
      "GET",
      "/strings/filter-by-natural-language?query=containing%20the%20letter%20z%20and%20the%20first%20vowel",
      None,
    )
    .await;
    let body = json_body(resp).await;
    assert_eq!(
      body["interpreted_query"]["parsed_filters"],
      json!({ "contains_character": "z" })
    );
    assert_eq!(data_values(&body), ["zap"]);
  }

  #[tokio::test]
  async fn natural_language_without_filters_is_400() {
    let store = make_store().await;
    let resp = send(
      &store,
      "GET",
      "/strings/filter-by-natural-language?query=hello%20world",
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "unparseable");
  }

  #[tokio::test]
  async fn natural_language_unrepresentable_number_is_400() {
    let store = make_store().await;
    let resp = send(
      &store,
      "GET",
      "/strings/filter-by-natural-language?query=longer%20than%20999999999999999999999999",
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn natural_language_missing_query_is_422() {
    let store = make_store().await;
    let resp =
      send(&store, "GET", "/strings/filter-by-natural-language", None).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  }
}
