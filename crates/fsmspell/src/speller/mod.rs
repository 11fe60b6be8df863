// Per-token word classification
//
// The classifier walks Start -> Valid | Invalid for each token and resets to
// Start afterwards. It keeps no state between tokens, so it is a plain
// function; the states only appear in trace events.

use fsmspell_core::character::CharPolicy;
use fsmspell_core::enums::WordState;
use fsmspell_core::token::{Token, Verdict};
use tracing::{trace, warn};

use crate::dictionary::Dictionary;

/// A failed dictionary query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("lookup of {word:?} failed: {reason}")]
pub struct LookupFault {
    pub word: String,
    pub reason: String,
}

impl LookupFault {
    pub fn new(word: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            reason: reason.into(),
        }
    }
}

/// Trait for word membership backends.
///
/// [`Dictionary`] never fails, but hosts may plug in a backend that can (a
/// remote service, a lazily paged word list). Words passed to `lookup` are
/// already normalized.
pub trait Lexicon {
    /// Returns `Ok(true)` if `normalized` is a known word.
    fn lookup(&self, normalized: &str) -> Result<bool, LookupFault>;
}

impl Lexicon for Dictionary {
    fn lookup(&self, normalized: &str) -> Result<bool, LookupFault> {
        Ok(self.contains(normalized))
    }
}

impl<L: Lexicon + ?Sized> Lexicon for &L {
    fn lookup(&self, normalized: &str) -> Result<bool, LookupFault> {
        (**self).lookup(normalized)
    }
}

/// Classify one token against `lexicon`.
///
/// A lookup fault is logged and yields an invalid verdict: a word is never
/// accepted without a successful lookup.
pub fn classify(token: Token, lexicon: &dyn Lexicon) -> Verdict {
    let is_valid = match lexicon.lookup(&token.normalized) {
        Ok(found) => found,
        Err(fault) => {
            warn!(offset = token.start, %fault, "dictionary lookup failed; flagging word");
            false
        }
    };
    trace!(
        offset = token.start,
        word = %token.text,
        from = %WordState::Start,
        to = %WordState::from_validity(is_valid),
        "classified token"
    );
    Verdict::new(token, is_valid)
}

/// Check a single free-standing word.
///
/// The word is normalized with `policy` first. A word that normalizes to
/// nothing (pure punctuation) is not a word and is reported invalid.
pub fn check_word(word: &str, policy: &CharPolicy, lexicon: &dyn Lexicon) -> bool {
    let normalized = policy.normalize(word);
    if normalized.is_empty() {
        return false;
    }
    match lexicon.lookup(&normalized) {
        Ok(found) => found,
        Err(fault) => {
            warn!(%fault, "dictionary lookup failed; flagging word");
            false
        }
    }
}

/// Classify only the last word of `buffer`.
///
/// This is the check a host runs when the user types a space or presses
/// Return: the last whitespace-delimited run is taken, trailing whitespace
/// ignored. A run of a single character is skipped, as is one that
/// normalizes to nothing. The verdict carries the run's span in `buffer`.
pub fn check_last_word(
    buffer: &str,
    policy: &CharPolicy,
    lexicon: &dyn Lexicon,
) -> Option<Verdict> {
    let trimmed = buffer.trim_end();
    let start = trimmed
        .char_indices()
        .rev()
        .find(|&(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    let text = &trimmed[start..];
    if text.chars().nth(1).is_none() {
        return None;
    }
    let normalized = policy.normalize(text);
    if normalized.is_empty() {
        return None;
    }
    Some(classify(Token::new(text, start, normalized), lexicon))
}
