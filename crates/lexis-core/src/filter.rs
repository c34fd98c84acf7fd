//! The filter engine shared by the structured and natural-language listing
//! paths.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, record::StringRecord};

/// A set of optional predicates over stored records. `None` means the
/// predicate is not applied; every supplied predicate must hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
  pub is_palindrome:      Option<bool>,
  /// Inclusive lower bound on `length`.
  pub min_length:         Option<usize>,
  /// Inclusive upper bound on `length`.
  pub max_length:         Option<usize>,
  pub word_count:         Option<usize>,
  /// Must appear literally in the value; case-sensitive.
  pub contains_character: Option<char>,
}

/// The records that passed a [`FilterSet`], together with the set itself.
#[derive(Debug, Clone)]
pub struct Filtered {
  pub records: Vec<StringRecord>,
  pub filters: FilterSet,
}

impl FilterSet {
  /// `true` when no predicate is supplied.
  pub fn is_empty(&self) -> bool { *self == Self::default() }

  /// Reject length bounds that cannot both hold.
  pub fn validate(&self) -> Result<()> {
    match (self.min_length, self.max_length) {
      (Some(min), Some(max)) if min > max => {
        Err(Error::InvalidRange { min, max })
      }
      _ => Ok(()),
    }
  }

  pub fn matches(&self, record: &StringRecord) -> bool {
    let p = &record.properties;
    self.is_palindrome.is_none_or(|want| p.is_palindrome == want)
      && self.min_length.is_none_or(|min| p.length >= min)
      && self.max_length.is_none_or(|max| p.length <= max)
      && self.word_count.is_none_or(|n| p.word_count == n)
      && self
        .contains_character
        .is_none_or(|c| record.value.contains(c))
  }

  /// Validate, then keep the records every predicate accepts. Input order is
  /// preserved.
  pub fn apply(self, records: Vec<StringRecord>) -> Result<Filtered> {
    self.validate()?;
    let records = records.into_iter().filter(|r| self.matches(r)).collect();
    Ok(Filtered { records, filters: self })
  }
}
