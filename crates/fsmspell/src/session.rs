// SpellSession: one owner for the dictionary, diff engine and options.
//
// A host creates one session per buffer, calls `update` after each edit and
// `inspect` when the user asks about a flagged word. The suggester borrows
// the dictionary, so it is created on the fly in each call instead of being
// stored next to the dictionary it points into.

use fsmspell_core::token::Verdict;

use crate::config::SpellConfig;
use crate::diff::{DiffEngine, Update};
use crate::dictionary::{Dictionary, DictionarySource};
use crate::speller::{check_last_word, check_word};
use crate::suggestion::{Suggester, Suggestion};

/// The verdict for a token and, when it is misspelled, what to offer instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub verdict: Verdict,
    /// Empty for a valid word.
    pub suggestions: Vec<Suggestion>,
}

/// Top-level handle for one checked buffer.
#[derive(Debug, Clone)]
pub struct SpellSession {
    dictionary: Dictionary,
    engine: DiffEngine,
    config: SpellConfig,
}

impl SpellSession {
    pub fn new(dictionary: Dictionary, config: SpellConfig) -> Self {
        Self {
            engine: DiffEngine::with_strategy(config.policy, config.diff_strategy),
            dictionary,
            config,
        }
    }

    /// Load the word list with the configured policy and build a session.
    ///
    /// A missing word list gives a degraded session in which every word is
    /// flagged; check [`is_degraded`](Self::is_degraded).
    pub fn from_source(source: DictionarySource, config: SpellConfig) -> Self {
        let dictionary = Dictionary::load_with_policy(source, &config.policy);
        Self::new(dictionary, config)
    }

    // =========================================================================
    // Checking
    // =========================================================================

    /// Re-check the buffer after an edit. See [`DiffEngine::update`].
    pub fn update(&mut self, buffer: &str) -> Update {
        self.engine.update(buffer, &self.dictionary)
    }

    /// Check a single word outside of any buffer.
    pub fn check(&self, word: &str) -> bool {
        check_word(word, &self.config.policy, &self.dictionary)
    }

    /// Check only the last word of `buffer`, as on a space or Return key.
    ///
    /// Does not touch the diff engine's snapshot. See
    /// [`check_last_word`](crate::speller::check_last_word).
    pub fn check_last_word(&self, buffer: &str) -> Option<Verdict> {
        check_last_word(buffer, &self.config.policy, &self.dictionary)
    }

    /// Suggestions for `word` using the configured K and cutoff.
    pub fn suggest(&self, word: &str) -> Vec<Suggestion> {
        self.suggester().with_options(word, &self.config.suggestions)
    }

    pub fn suggest_with(&self, word: &str, k: usize, cutoff: f64) -> Vec<Suggestion> {
        self.suggester().suggest(word, k, cutoff)
    }

    /// Look up the token starting at `offset` in the last pass.
    ///
    /// Suggestions are computed only for an invalid token.
    pub fn inspect(&self, offset: usize) -> Option<Inspection> {
        let verdict = self.engine.verdict_at(offset)?;
        let suggestions = if verdict.is_valid {
            Vec::new()
        } else {
            self.suggest(&verdict.token.text)
        };
        Some(Inspection {
            verdict,
            suggestions,
        })
    }

    pub fn suggester(&self) -> Suggester<'_> {
        Suggester::new(&self.dictionary, self.config.policy)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn is_degraded(&self) -> bool {
        self.dictionary.is_degraded()
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn config(&self) -> &SpellConfig {
        &self.config
    }

    pub fn engine(&self) -> &DiffEngine {
        &self.engine
    }

    /// Drop the snapshot so the next update reports every token.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Library version.
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
