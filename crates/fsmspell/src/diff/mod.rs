// Snapshot diffing and selective re-validation

mod align;

use std::collections::{BTreeMap, BTreeSet};

use fsmspell_core::character::CharPolicy;
use fsmspell_core::enums::DiffStrategy;
use fsmspell_core::token::{Token, Verdict};
use tracing::debug;

use crate::speller::{Lexicon, classify};
use crate::tokenizer::tokenize;

// ---------------------------------------------------------------------------
// Public result types
// ---------------------------------------------------------------------------

/// Identity of a token across passes.
///
/// A fresh id is handed out whenever a token is classified. Under
/// [`DiffStrategy::Aligned`] a token that is matched to its predecessor keeps
/// the predecessor's id even when its offset moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(u64);

impl TokenId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Counters for one [`DiffEngine::update`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Tokens in the new buffer.
    pub tokens: usize,
    /// Verdicts reported in [`Update::changed`].
    pub changed: usize,
    /// Tokens that went through a dictionary lookup.
    pub classified: usize,
    /// Tokens reported as changed whose verdict was carried over.
    pub carried: usize,
    /// Offsets reported in [`Update::removed_offsets`].
    pub removed: usize,
}

/// Result of one pass: what the host has to repaint or clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Update {
    /// Verdicts for new or changed tokens, in buffer order.
    pub changed: Vec<Verdict>,
    /// Start offsets of the previous pass that no longer start a token.
    pub removed_offsets: BTreeSet<usize>,
    pub stats: UpdateStats,
}

impl Update {
    /// `true` if the host has nothing to do.
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.removed_offsets.is_empty()
    }

    /// Changed verdicts that flag a misspelling.
    pub fn invalid(&self) -> impl Iterator<Item = &Verdict> {
        self.changed.iter().filter(|v| !v.is_valid)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Entry {
    token: Token,
    is_valid: bool,
    id: TokenId,
}

impl Entry {
    fn verdict(&self) -> Verdict {
        Verdict::new(self.token.clone(), self.is_valid)
    }
}

/// Owns the snapshot of the last pass and re-checks only what changed.
///
/// The snapshot maps token start offsets to the token and its verdict. It is
/// rebuilt by every [`update`](Self::update) and swapped in once the pass is
/// complete, so a second update with an unchanged buffer reports nothing.
///
/// ```
/// use fsmspell::{DiffEngine, Dictionary};
/// use fsmspell_core::character::CharPolicy;
///
/// let dict = Dictionary::from_words(["the", "cat"]);
/// let mut engine = DiffEngine::new(CharPolicy::default());
///
/// let first = engine.update("teh cat", &dict);
/// assert_eq!(first.changed.len(), 2);
///
/// let second = engine.update("the cat", &dict);
/// assert_eq!(second.changed.len(), 1);
/// assert!(second.changed[0].is_valid);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    policy: CharPolicy,
    strategy: DiffStrategy,
    snapshot: BTreeMap<usize, Entry>,
    next_id: u64,
}

impl DiffEngine {
    /// Create an engine using the offset strategy.
    pub fn new(policy: CharPolicy) -> Self {
        Self::with_strategy(policy, DiffStrategy::Offset)
    }

    pub fn with_strategy(policy: CharPolicy, strategy: DiffStrategy) -> Self {
        Self {
            policy,
            strategy,
            snapshot: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn policy(&self) -> &CharPolicy {
        &self.policy
    }

    pub fn strategy(&self) -> DiffStrategy {
        self.strategy
    }

    /// Re-check `buffer` against the previous pass.
    ///
    /// Only new or changed tokens are returned. Offsets that started a token
    /// in the previous pass but not in this one are listed in
    /// [`Update::removed_offsets`] so the host can clear stale marks.
    pub fn update(&mut self, buffer: &str, lexicon: &dyn Lexicon) -> Update {
        let tokens = tokenize(buffer, &self.policy);
        let mut stats = UpdateStats {
            tokens: tokens.len(),
            ..UpdateStats::default()
        };

        let (next, changed) = match self.strategy {
            DiffStrategy::Offset => {
                offset_pass(&self.snapshot, tokens, lexicon, &mut self.next_id, &mut stats)
            }
            DiffStrategy::Aligned => {
                aligned_pass(&self.snapshot, tokens, lexicon, &mut self.next_id, &mut stats)
            }
        };

        let removed_offsets: BTreeSet<usize> = self
            .snapshot
            .keys()
            .filter(|offset| !next.contains_key(*offset))
            .copied()
            .collect();

        stats.changed = changed.len();
        stats.removed = removed_offsets.len();
        self.snapshot = next;

        debug!(
            strategy = ?self.strategy,
            tokens = stats.tokens,
            changed = stats.changed,
            classified = stats.classified,
            carried = stats.carried,
            removed = stats.removed,
            "diff pass complete"
        );

        Update {
            changed,
            removed_offsets,
            stats,
        }
    }

    /// Number of tokens in the current snapshot.
    pub fn snapshot_len(&self) -> usize {
        self.snapshot.len()
    }

    /// Forget the snapshot. The next update reports every token.
    pub fn reset(&mut self) {
        self.snapshot.clear();
    }

    /// Current verdict for the token starting at `offset`, if any.
    pub fn verdict_at(&self, offset: usize) -> Option<Verdict> {
        self.snapshot.get(&offset).map(Entry::verdict)
    }

    pub fn token_id_at(&self, offset: usize) -> Option<TokenId> {
        self.snapshot.get(&offset).map(|entry| entry.id)
    }

    /// Every verdict of the current snapshot, in buffer order.
    pub fn verdicts(&self) -> impl Iterator<Item = Verdict> + '_ {
        self.snapshot.values().map(Entry::verdict)
    }
}

fn fresh_id(next_id: &mut u64) -> TokenId {
    let id = TokenId(*next_id);
    *next_id += 1;
    id
}

fn classify_entry(
    token: Token,
    lexicon: &dyn Lexicon,
    next_id: &mut u64,
    stats: &mut UpdateStats,
) -> Entry {
    stats.classified += 1;
    let verdict = classify(token, lexicon);
    Entry {
        token: verdict.token,
        is_valid: verdict.is_valid,
        id: fresh_id(next_id),
    }
}

/// A token is unchanged iff the previous pass had a token with the same text
/// at the same offset.
fn offset_pass(
    old: &BTreeMap<usize, Entry>,
    tokens: Vec<Token>,
    lexicon: &dyn Lexicon,
    next_id: &mut u64,
    stats: &mut UpdateStats,
) -> (BTreeMap<usize, Entry>, Vec<Verdict>) {
    let mut next = BTreeMap::new();
    let mut changed = Vec::new();

    for token in tokens {
        let start = token.start;
        match old.get(&start) {
            Some(prev) if prev.token.text == token.text => {
                next.insert(start, prev.clone());
            }
            _ => {
                let entry = classify_entry(token, lexicon, next_id, stats);
                changed.push(entry.verdict());
                next.insert(start, entry);
            }
        }
    }

    (next, changed)
}

/// Tokens are matched to the previous pass by an LCS over their text.
/// Matched tokens keep id and verdict; they are reported only when their
/// offset moved. Unmatched tokens are classified.
fn aligned_pass(
    old: &BTreeMap<usize, Entry>,
    tokens: Vec<Token>,
    lexicon: &dyn Lexicon,
    next_id: &mut u64,
    stats: &mut UpdateStats,
) -> (BTreeMap<usize, Entry>, Vec<Verdict>) {
    let previous: Vec<&Entry> = old.values().collect();
    let matches = align::align_by(&previous, &tokens, |prev, token| prev.token.text == token.text);

    let mut next = BTreeMap::new();
    let mut changed = Vec::new();

    for (token, matched) in tokens.into_iter().zip(matches) {
        let start = token.start;
        let entry = match matched {
            Some(idx) => {
                let prev = previous[idx];
                let entry = Entry {
                    token,
                    is_valid: prev.is_valid,
                    id: prev.id,
                };
                if prev.token.start != start {
                    stats.carried += 1;
                    changed.push(entry.verdict());
                }
                entry
            }
            None => {
                let entry = classify_entry(token, lexicon, next_id, stats);
                changed.push(entry.verdict());
                entry
            }
        };
        next.insert(start, entry);
    }

    (next, changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use crate::speller::LookupFault;

    fn dict() -> Dictionary {
        Dictionary::from_words(["the", "cat", "a", "dog"])
    }

    fn offsets(update: &Update) -> Vec<(usize, bool)> {
        update
            .changed
            .iter()
            .map(|v| (v.offset(), v.is_valid))
            .collect()
    }

    fn removed(offsets: &[usize]) -> BTreeSet<usize> {
        offsets.iter().copied().collect()
    }

    struct FailingLexicon;

    impl Lexicon for FailingLexicon {
        fn lookup(&self, normalized: &str) -> Result<bool, LookupFault> {
            Err(LookupFault::new(normalized, "offline"))
        }
    }

    // -- Offset strategy ---

    #[test]
    fn first_pass_reports_every_token() {
        let mut engine = DiffEngine::new(CharPolicy::default());
        let update = engine.update("teh cat", &dict());
        assert_eq!(offsets(&update), vec![(0, false), (4, true)]);
        assert!(update.removed_offsets.is_empty());
        assert_eq!(update.stats.classified, 2);
        assert_eq!(engine.snapshot_len(), 2);
    }

    #[test]
    fn correction_rechecks_only_the_edited_word() {
        let dict = dict();
        let mut engine = DiffEngine::new(CharPolicy::default());
        engine.update("teh cat", &dict);
        let update = engine.update("the cat", &dict);
        assert_eq!(offsets(&update), vec![(0, true)]);
        assert_eq!(update.changed[0].token.text, "the");
        assert!(update.removed_offsets.is_empty());
        assert_eq!(update.stats.classified, 1);
    }

    #[test]
    fn unchanged_buffer_is_idempotent() {
        let dict = dict();
        let mut engine = DiffEngine::new(CharPolicy::default());
        engine.update("the cat sat", &dict);
        let update = engine.update("the cat sat", &dict);
        assert!(update.is_empty());
        assert_eq!(update.stats.classified, 0);
        assert_eq!(update.stats.tokens, 3);
    }

    #[test]
    fn insertion_shifts_every_later_token() {
        let dict = dict();
        let mut engine = DiffEngine::new(CharPolicy::default());
        engine.update("teh cat", &dict);
        let update = engine.update("a teh cat", &dict);
        assert_eq!(offsets(&update), vec![(0, true), (2, false), (6, true)]);
        assert_eq!(update.removed_offsets, removed(&[4]));
        assert_eq!(update.stats.classified, 3);
        assert_eq!(update.stats.carried, 0);
    }

    #[test]
    fn deletion_reports_removed_offsets() {
        let dict = dict();
        let mut engine = DiffEngine::new(CharPolicy::default());
        engine.update("teh cat dog", &dict);
        let update = engine.update("teh", &dict);
        assert!(update.changed.is_empty());
        assert_eq!(update.removed_offsets, removed(&[4, 8]));
        assert_eq!(update.stats.removed, 2);
        assert_eq!(engine.snapshot_len(), 1);
    }

    #[test]
    fn clearing_the_buffer_removes_everything() {
        let dict = dict();
        let mut engine = DiffEngine::new(CharPolicy::default());
        engine.update("the cat", &dict);
        let update = engine.update("", &dict);
        assert!(update.changed.is_empty());
        assert_eq!(update.removed_offsets, removed(&[0, 4]));
        assert_eq!(engine.snapshot_len(), 0);
    }

    #[test]
    fn trailing_whitespace_changes_nothing() {
        let dict = dict();
        let mut engine = DiffEngine::new(CharPolicy::default());
        engine.update("teh cat", &dict);
        assert!(engine.update("teh cat  \n", &dict).is_empty());
    }

    #[test]
    fn punctuation_edit_is_a_change() {
        // Same offset, different raw text: reported even though the
        // normalized form is the same.
        let dict = dict();
        let mut engine = DiffEngine::new(CharPolicy::default());
        engine.update("the cat", &dict);
        let update = engine.update("the cat.", &dict);
        assert_eq!(offsets(&update), vec![(4, true)]);
    }

    #[test]
    fn lookup_faults_flag_words_without_aborting() {
        let mut engine = DiffEngine::new(CharPolicy::default());
        let update = engine.update("the cat", &FailingLexicon);
        assert_eq!(offsets(&update), vec![(0, false), (4, false)]);
    }

    #[test]
    fn empty_dictionary_flags_everything() {
        let mut engine = DiffEngine::new(CharPolicy::default());
        let update = engine.update("the cat", &Dictionary::default());
        assert_eq!(update.invalid().count(), 2);
    }

    // -- Snapshot queries ---

    #[test]
    fn reset_forces_full_recheck() {
        let dict = dict();
        let mut engine = DiffEngine::new(CharPolicy::default());
        engine.update("the cat", &dict);
        engine.reset();
        assert_eq!(engine.snapshot_len(), 0);
        let update = engine.update("the cat", &dict);
        assert_eq!(update.changed.len(), 2);
        assert!(update.removed_offsets.is_empty());
    }

    #[test]
    fn verdict_at_reads_the_snapshot() {
        let dict = dict();
        let mut engine = DiffEngine::new(CharPolicy::default());
        engine.update("teh cat", &dict);
        let verdict = engine.verdict_at(0).unwrap();
        assert_eq!(verdict.token.text, "teh");
        assert!(!verdict.is_valid);
        assert!(engine.verdict_at(1).is_none());
        assert_eq!(engine.verdicts().filter(|v| v.is_valid).count(), 1);
    }

    #[test]
    fn offset_strategy_reissues_ids_on_change() {
        let dict = dict();
        let mut engine = DiffEngine::new(CharPolicy::default());
        engine.update("teh cat", &dict);
        let edited = engine.token_id_at(0).unwrap();
        let kept = engine.token_id_at(4).unwrap();
        engine.update("the cat", &dict);
        assert_eq!(engine.token_id_at(4), Some(kept));
        let reissued = engine.token_id_at(0).unwrap();
        assert_ne!(reissued, edited);
        assert_ne!(reissued, kept);
    }

    // -- Aligned strategy ---

    fn aligned() -> DiffEngine {
        DiffEngine::with_strategy(CharPolicy::default(), DiffStrategy::Aligned)
    }

    #[test]
    fn aligned_insertion_carries_shifted_verdicts() {
        let dict = dict();
        let mut engine = aligned();
        engine.update("teh cat", &dict);
        let cat = engine.token_id_at(4).unwrap();

        let update = engine.update("a teh cat", &dict);
        assert_eq!(offsets(&update), vec![(0, true), (2, false), (6, true)]);
        assert_eq!(update.removed_offsets, removed(&[4]));
        assert_eq!(update.stats.classified, 1);
        assert_eq!(update.stats.carried, 2);
        assert_eq!(engine.token_id_at(6), Some(cat));
    }

    #[test]
    fn aligned_carries_verdicts_without_lookup() {
        // The carried words are looked up by a lexicon that would fail; they
        // stay valid because no lookup happens.
        let dict = dict();
        let mut engine = aligned();
        engine.update("the cat", &dict);
        let update = engine.update("zzz the cat", &FailingLexicon);
        assert_eq!(offsets(&update), vec![(0, false), (4, true), (8, true)]);
        assert_eq!(update.stats.classified, 1);
    }

    #[test]
    fn aligned_correction_matches_offset_behavior() {
        let dict = dict();
        let mut engine = aligned();
        engine.update("teh cat", &dict);
        let update = engine.update("the cat", &dict);
        assert_eq!(offsets(&update), vec![(0, true)]);
        assert!(update.removed_offsets.is_empty());
    }

    #[test]
    fn aligned_is_idempotent() {
        let dict = dict();
        let mut engine = aligned();
        engine.update("a teh cat", &dict);
        assert!(engine.update("a teh cat", &dict).is_empty());
    }

    #[test]
    fn aligned_deletion_reports_removed_offsets() {
        let dict = dict();
        let mut engine = aligned();
        engine.update("the teh cat", &dict);
        let update = engine.update("the cat", &dict);
        // "cat" moved from 8 to 4: offset 4 still starts a token.
        assert_eq!(offsets(&update), vec![(4, true)]);
        assert_eq!(update.removed_offsets, removed(&[8]));
        assert_eq!(update.stats.classified, 0);
    }
}
