// Suggestion generation
//
// Ranks dictionary words by sequence similarity to a misspelled word and
// returns the best few above a cutoff.
//
// Architecture:
//   - `matcher`: the similarity ratio and its two cheap upper bounds
//   - `Suggester`: scans the dictionary by length bucket, filters with the
//     bounds, scores the survivors and keeps the top K

pub mod matcher;

use fsmspell_core::character::CharPolicy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dictionary::Dictionary;
use matcher::{CharProfile, ratio, real_quick_ratio};

/// Default number of suggestions returned.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Default minimum similarity for a suggestion.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// A dictionary word offered as a replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub word: String,
    /// Similarity to the queried word, in `[cutoff, 1]`.
    pub score: f64,
}

/// Error type for suggestion queries.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SuggestError {
    #[error("cutoff {0} is outside [0, 1]")]
    InvalidCutoff(f64),
}

/// Tuning for [`Suggester::with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestOptions {
    /// Upper bound on the number of suggestions (K).
    pub max_suggestions: usize,
    /// Minimum similarity a word needs to be suggested.
    pub cutoff: f64,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

impl SuggestOptions {
    pub fn validate(&self) -> Result<(), SuggestError> {
        check_cutoff(self.cutoff)
    }
}

fn check_cutoff(cutoff: f64) -> Result<(), SuggestError> {
    if (0.0..=1.0).contains(&cutoff) {
        Ok(())
    } else {
        Err(SuggestError::InvalidCutoff(cutoff))
    }
}

/// Ranks the words of a [`Dictionary`] against a query word.
///
/// The query is normalized with the same [`CharPolicy`] the tokenizer uses.
/// Each dictionary word is compared with the normalized query by the
/// similarity ratio `2 * M / T`, where `T` is the combined length and `M` the
/// number of characters in matching blocks. Two cheaper upper bounds (one
/// from the lengths, one from the character counts) are checked first; a
/// word that fails either cannot reach the cutoff and is never fully scored.
/// Whole length buckets are skipped on the length bound alone.
///
/// Results are sorted by descending score. Equal scores are ordered by
/// reverse lexical order of the word.
#[derive(Debug, Clone, Copy)]
pub struct Suggester<'a> {
    dictionary: &'a Dictionary,
    policy: CharPolicy,
}

impl<'a> Suggester<'a> {
    pub fn new(dictionary: &'a Dictionary, policy: CharPolicy) -> Self {
        Self { dictionary, policy }
    }

    /// Up to `k` suggestions scoring at least `cutoff`.
    ///
    /// An out-of-range cutoff is logged and yields no suggestions; use
    /// [`try_suggest`](Self::try_suggest) to get the error instead.
    pub fn suggest(&self, word: &str, k: usize, cutoff: f64) -> Vec<Suggestion> {
        match self.try_suggest(word, k, cutoff) {
            Ok(found) => found,
            Err(err) => {
                warn!(%err, word, "rejected suggestion query");
                Vec::new()
            }
        }
    }

    /// [`suggest`](Self::suggest) with K = 5 and cutoff 0.6.
    pub fn suggest_default(&self, word: &str) -> Vec<Suggestion> {
        self.suggest(word, DEFAULT_MAX_SUGGESTIONS, DEFAULT_CUTOFF)
    }

    pub fn with_options(&self, word: &str, options: &SuggestOptions) -> Vec<Suggestion> {
        self.suggest(word, options.max_suggestions, options.cutoff)
    }

    pub fn try_suggest(
        &self,
        word: &str,
        k: usize,
        cutoff: f64,
    ) -> Result<Vec<Suggestion>, SuggestError> {
        check_cutoff(cutoff)?;
        let normalized = self.policy.normalize(word);
        if k == 0 || normalized.is_empty() {
            return Ok(Vec::new());
        }

        let target: Vec<char> = normalized.chars().collect();
        let mut profile = CharProfile::new(&target);
        let mut candidate = Vec::new();
        let mut found = Vec::new();
        let mut scored = 0usize;

        for &len in self.dictionary.lengths() {
            if real_quick_ratio(len, target.len()) < cutoff {
                continue;
            }
            for entry in self.dictionary.words_with_len(len) {
                candidate.clear();
                candidate.extend(entry.chars());
                if profile.quick_ratio(&candidate) < cutoff {
                    continue;
                }
                scored += 1;
                let score = ratio(&candidate, &target);
                if score >= cutoff {
                    found.push(Suggestion {
                        word: entry.clone(),
                        score,
                    });
                }
            }
        }

        found.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.word.cmp(&a.word))
        });
        debug!(
            word = %normalized,
            scored,
            matched = found.len(),
            k,
            cutoff,
            "ranked suggestions"
        );
        found.truncate(k);
        Ok(found)
    }
}
