//! Core types and trait definitions for the Lexis string analyzer.
//!
//! This crate is deliberately free of HTTP and database dependencies. It holds
//! the property analyzer, the record model, the filter engine, the phrase
//! interpreter, and the [`store::StringStore`] abstraction that storage
//! backends implement.

pub mod analyze;
pub mod error;
pub mod filter;
pub mod phrase;
pub mod record;
pub mod store;

pub use analyze::{PropertyBundle, analyze, content_hash};
pub use error::{Error, Result};
pub use filter::FilterSet;
pub use record::StringRecord;
