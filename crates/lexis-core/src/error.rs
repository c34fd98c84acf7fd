//! Error types for `lexis-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("value must not be empty")]
  EmptyValue,

  #[error("min_length ({min}) cannot be greater than max_length ({max})")]
  InvalidRange { min: usize, max: usize },

  #[error("no interpretable filters found in query: {0:?}")]
  Uninterpretable(String),

  #[error("unable to interpret phrase {0:?}")]
  InvalidPhrase(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
