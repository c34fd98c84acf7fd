//! Property analysis — the deterministic attribute bundle computed for every
//! stored string.
//!
//! [`analyze`] is a pure function of its input: the same value always yields
//! an identical [`PropertyBundle`], including the serialized byte form.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Descriptive properties of a string, computed once at creation time and
/// never recomputed in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyBundle {
  /// Number of Unicode scalar values (not bytes).
  pub length:                  usize,
  pub is_palindrome:           bool,
  /// Distinct characters, case-sensitive.
  pub unique_characters:       usize,
  /// Maximal runs of characters other than word separators.
  pub word_count:              usize,
  /// Lowercase hex SHA-256 of the UTF-8 bytes; doubles as the record id.
  pub sha256_hash:             String,
  /// Exact character → occurrence count, keyed in code-point order.
  pub character_frequency_map: BTreeMap<char, usize>,
}

/// Lowercase hex SHA-256 digest of `value`'s UTF-8 encoding.
pub fn content_hash(value: &str) -> String {
  hex::encode(Sha256::digest(value.as_bytes()))
}

/// Compute the [`PropertyBundle`] for `value`.
pub fn analyze(value: &str) -> PropertyBundle {
  let mut character_frequency_map = BTreeMap::new();
  for ch in value.chars() {
    *character_frequency_map.entry(ch).or_insert(0) += 1;
  }

  PropertyBundle {
    length: value.chars().count(),
    is_palindrome: is_palindrome(value),
    unique_characters: value.chars().collect::<HashSet<_>>().len(),
    word_count: value
      .split(is_word_separator)
      .filter(|w| !w.is_empty())
      .count(),
    sha256_hash: content_hash(value),
    character_frequency_map,
  }
}

/// Unicode whitespace plus the ASCII information separators U+001C..U+001F.
fn is_word_separator(c: char) -> bool {
  c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Palindrome check over the alphanumeric characters of `value`, compared
/// case-insensitively. A value with no alphanumeric characters is never a
/// palindrome.
pub fn is_palindrome(value: &str) -> bool {
  let normalized: Vec<char> = value
    .chars()
    .filter(|c| c.is_alphanumeric())
    .flat_map(char::to_lowercase)
    .collect();

  !normalized.is_empty() && normalized.iter().eq(normalized.iter().rev())
}
