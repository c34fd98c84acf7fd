//! Heuristic translation of English phrases into a [`FilterSet`].
//!
//! The interpreter is a fixed, ordered list of [`PhraseRule`]s evaluated
//! independently against the lower-cased query. Several rules may fire on
//! one query. When two rules target the same key, the earlier rule in
//! [`RULES`] wins; this matters only for `contains_character`, which three
//! rules can set.
//!
//! | Rule | Phrase | Effect |
//! |------|--------|--------|
//! | `single_word` | "single word", "one word" | `word_count = 1` |
//! | `palindrome` | "palindrom…" | `is_palindrome = true` |
//! | `longer_than` | "longer than N" (ASCII digits) | `min_length = N + 1` |
//! | `the_letter` | "contain(s/ing) the letter X" | `contains_character = X` |
//! | `containing` | "containing X" | `contains_character = X` |
//! | `first_vowel` | "first vowel" | `contains_character = 'a'` |

use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result, filter::FilterSet};

/// A single predicate produced by a matching rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
  WordCount(usize),
  Palindrome(bool),
  MinLength(usize),
  ContainsCharacter(char),
}

impl Effect {
  /// Write this effect into `set` unless the key is already populated.
  fn apply_to(self, set: &mut FilterSet) {
    match self {
      Effect::WordCount(n) => {
        set.word_count.get_or_insert(n);
      }
      Effect::Palindrome(b) => {
        set.is_palindrome.get_or_insert(b);
      }
      Effect::MinLength(n) => {
        set.min_length.get_or_insert(n);
      }
      Effect::ContainsCharacter(c) => {
        set.contains_character.get_or_insert(c);
      }
    }
  }
}

/// A named phrase pattern. `matcher` receives the lower-cased query.
pub struct PhraseRule {
  pub name: &'static str,
  matcher:  fn(&str) -> Result<Option<Effect>>,
}

impl PhraseRule {
  pub fn evaluate(&self, lowered: &str) -> Result<Option<Effect>> {
    (self.matcher)(lowered)
  }
}

static LONGER_THAN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"longer than ([0-9]+)").expect("valid regex"));
static THE_LETTER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"contain(?:s|ing)? the letter ([a-z])").expect("valid regex")
});
static CONTAINING: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"containing ([a-z])").expect("valid regex"));

/// Evaluation order is significant: see the module docs.
pub static RULES: [PhraseRule; 6] = [
  PhraseRule { name: "single_word", matcher: single_word },
  PhraseRule { name: "palindrome", matcher: palindrome },
  PhraseRule { name: "longer_than", matcher: longer_than },
  PhraseRule { name: "the_letter", matcher: the_letter },
  PhraseRule { name: "containing", matcher: containing },
  PhraseRule { name: "first_vowel", matcher: first_vowel },
];

fn single_word(q: &str) -> Result<Option<Effect>> {
  Ok(
    (q.contains("single word") || q.contains("one word"))
      .then_some(Effect::WordCount(1)),
  )
}

fn palindrome(q: &str) -> Result<Option<Effect>> {
  Ok(q.contains("palindrom").then_some(Effect::Palindrome(true)))
}

fn longer_than(q: &str) -> Result<Option<Effect>> {
  let Some(caps) = LONGER_THAN.captures(q) else {
    return Ok(None);
  };
  let n = caps[1]
    .parse::<usize>()
    .ok()
    .and_then(|n| n.checked_add(1))
    .ok_or_else(|| Error::InvalidPhrase(caps[0].to_owned()))?;
  Ok(Some(Effect::MinLength(n)))
}

fn letter_capture(re: &Regex, q: &str) -> Option<Effect> {
  re.captures(q)
    .and_then(|caps| caps[1].chars().next())
    .map(Effect::ContainsCharacter)
}

fn the_letter(q: &str) -> Result<Option<Effect>> {
  Ok(letter_capture(&THE_LETTER, q))
}

fn containing(q: &str) -> Result<Option<Effect>> {
  Ok(letter_capture(&CONTAINING, q))
}

fn first_vowel(q: &str) -> Result<Option<Effect>> {
  Ok(q.contains("first vowel").then_some(Effect::ContainsCharacter('a')))
}

/// Translate `query` into a filter set.
///
/// Fails with [`Error::Uninterpretable`] when no rule fires, and with
/// [`Error::InvalidPhrase`] when a rule matches but its argument cannot be
/// represented.
pub fn interpret(query: &str) -> Result<FilterSet> {
  let lowered = query.to_lowercase();
  let mut set = FilterSet::default();
  for rule in &RULES {
    if let Some(effect) = rule.evaluate(&lowered)? {
      effect.apply_to(&mut set);
    }
  }
  if set.is_empty() {
    return Err(Error::Uninterpretable(query.to_owned()));
  }
  Ok(set)
}
