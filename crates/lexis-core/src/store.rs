//! The `StringStore` trait.
//!
//! Implemented by storage backends (e.g. `lexis-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::record::StringRecord;

/// Error types returned by a [`StringStore`] must say whether they represent
/// a uniqueness violation, so callers can report a conflict rather than an
/// internal failure.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn is_duplicate(&self) -> bool;
}

/// Persistence for [`StringRecord`]s, keyed by content hash.
///
/// Records are never updated. Every method performs exactly one store
/// operation; uniqueness is enforced by the backend, not by the caller.
pub trait StringStore: Send + Sync {
  type Error: StoreError;

  /// Persist `record`. Fails with an error whose
  /// [`is_duplicate`](StoreError::is_duplicate) is `true` if a record with
  /// the same id or value already exists; the existing row is untouched.
  fn insert<'a>(
    &'a self,
    record: &'a StringRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Exact-match lookup on the stored value.
  fn get_by_value<'a>(
    &'a self,
    value: &'a str,
  ) -> impl Future<Output = Result<Option<StringRecord>, Self::Error>> + Send + 'a;

  /// All records, newest first. Records sharing a timestamp are returned
  /// most recently inserted first.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<StringRecord>, Self::Error>> + Send + '_;

  /// Remove the record holding `value`. Returns whether a row was removed.
  fn delete_by_value<'a>(
    &'a self,
    value: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
