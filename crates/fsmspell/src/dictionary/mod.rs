// Load-once word list with membership and length-bucket queries

use std::fmt;
use std::hash::BuildHasher;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

use fsmspell_core::character::CharPolicy;
use hashbrown::{DefaultHashBuilder, HashMap, HashTable};
use tracing::{debug, warn};

/// Error type for word list loading failures.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    /// The word list file is missing, unreadable, or not UTF-8.
    #[error("word list {} is unavailable: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where a [`Dictionary`] gets its words from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    /// A UTF-8 text file with one word per line.
    File(PathBuf),
    /// An in-memory word collection.
    Words(Vec<String>),
}

impl DictionarySource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Words(words.into_iter().map(Into::into).collect())
    }
}

/// An immutable set of normalized words.
///
/// Entries are stored once, sorted by character length and then
/// lexicographically, so every length forms a contiguous bucket that the
/// suggester can scan or skip as a whole. Membership goes through a hash
/// table of indices into that storage.
///
/// A dictionary whose source could not be read is *degraded*: it is empty,
/// every lookup misses, and [`is_degraded`](Self::is_degraded) reports it so
/// the host can warn the user.
#[derive(Clone)]
pub struct Dictionary {
    /// Unique words, ordered by (char length, word).
    words: Vec<String>,
    /// Indices into `words`, keyed by the hash of the word.
    table: HashTable<usize>,
    hasher: DefaultHashBuilder,
    /// Char length -> range of `words` holding words of that length.
    buckets: HashMap<usize, Range<usize>>,
    /// Distinct char lengths, ascending.
    lengths: Vec<usize>,
    degraded: bool,
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("words", &format!("{} entries", self.words.len()))
            .field("degraded", &self.degraded)
            .finish_non_exhaustive()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::build(Vec::new(), false)
    }
}

impl Dictionary {
    /// Load a dictionary, falling back to an empty degraded one on failure.
    ///
    /// Entries are trimmed and normalized with the default [`CharPolicy`],
    /// the same folding tokens get; blank lines are skipped and duplicates
    /// collapse.
    pub fn load(source: DictionarySource) -> Self {
        Self::load_with_policy(source, &CharPolicy::default())
    }

    /// Like [`load`](Self::load), but entries are normalized with `policy`
    /// so they compare equal to tokens normalized by the same policy.
    pub fn load_with_policy(source: DictionarySource, policy: &CharPolicy) -> Self {
        Self::load_normalized(source, |word| policy.normalize(word))
    }

    /// Load a dictionary, reporting a missing or unreadable source as an error.
    pub fn try_load(source: DictionarySource) -> Result<Self, DictionaryError> {
        let raw = read_source(source)?;
        let policy = CharPolicy::default();
        Ok(Self::from_raw(raw, |word| policy.normalize(word)))
    }

    /// Build a dictionary directly from in-memory words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::load(DictionarySource::words(words))
    }

    fn load_normalized(source: DictionarySource, normalize: impl Fn(&str) -> String) -> Self {
        match read_source(source) {
            Ok(raw) => {
                let dictionary = Self::from_raw(raw, normalize);
                debug!(words = dictionary.len(), "loaded word list");
                dictionary
            }
            Err(err) => {
                warn!(error = %err, "word list unavailable; every word will be reported invalid");
                Self::build(Vec::new(), true)
            }
        }
    }

    fn from_raw(raw: Vec<String>, normalize: impl Fn(&str) -> String) -> Self {
        let words = raw
            .iter()
            .map(|line| normalize(line.trim()))
            .filter(|word| !word.is_empty())
            .collect();
        Self::build(words, false)
    }

    fn build(words: Vec<String>, degraded: bool) -> Self {
        let mut keyed: Vec<(usize, String)> = words
            .into_iter()
            .map(|word| (word.chars().count(), word))
            .collect();
        keyed.sort_unstable();
        keyed.dedup();

        let mut buckets = HashMap::new();
        let mut lengths = Vec::new();
        let mut start = 0;
        while start < keyed.len() {
            let len = keyed[start].0;
            let end = start + keyed[start..].partition_point(|(l, _)| *l == len);
            buckets.insert(len, start..end);
            lengths.push(len);
            start = end;
        }

        let words: Vec<String> = keyed.into_iter().map(|(_, word)| word).collect();
        let hasher = DefaultHashBuilder::default();
        let mut table = HashTable::with_capacity(words.len());
        for (idx, word) in words.iter().enumerate() {
            let hash = hasher.hash_one(word.as_str());
            table.insert_unique(hash, idx, |&i| hasher.hash_one(words[i].as_str()));
        }

        Self {
            words,
            table,
            hasher,
            buckets,
            lengths,
            degraded,
        }
    }

    /// Check whether an already-normalized word is in the dictionary.
    pub fn contains(&self, normalized: &str) -> bool {
        let hash = self.hasher.hash_one(normalized);
        self.table
            .find(hash, |&idx| self.words[idx] == normalized)
            .is_some()
    }

    /// All words, ordered by character length and then lexicographically.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Words of exactly `len` characters, in lexicographic order.
    pub fn words_with_len(&self, len: usize) -> &[String] {
        match self.buckets.get(&len) {
            Some(range) => &self.words[range.clone()],
            None => &[],
        }
    }

    /// Distinct word lengths in characters, ascending.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `true` if the source could not be loaded and this dictionary is an
    /// empty stand-in.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

/// Read the raw entries of a source without normalizing them.
fn read_source(source: DictionarySource) -> Result<Vec<String>, DictionaryError> {
    match source {
        DictionarySource::Words(words) => Ok(words),
        DictionarySource::File(path) => read_word_file(&path),
    }
}

fn read_word_file(path: &Path) -> Result<Vec<String>, DictionaryError> {
    let text = std::fs::read_to_string(path).map_err(|source| DictionaryError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_word_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "fsmspell-dictionary-{}-{name}.txt",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn contains_normalized_words() {
        let dict = Dictionary::from_words(["the", "cat"]);
        assert!(dict.contains("the"));
        assert!(dict.contains("cat"));
        assert!(!dict.contains("teh"));
        assert!(!dict.is_degraded());
    }

    #[test]
    fn load_lowercases_and_trims() {
        let dict = Dictionary::from_words(["  The ", "CAT", "", "   "]);
        assert_eq!(dict.len(), 2);
        assert!(dict.contains("the"));
        assert!(dict.contains("cat"));
        assert!(!dict.contains("The"));
    }

    #[test]
    fn load_folds_like_the_default_policy() {
        let greek = "\u{039F}\u{0394}\u{039F}\u{03A3}";
        let dict = Dictionary::from_words(["mag-aral", greek, "ika-2"]);
        assert!(dict.contains("magaral"));
        assert!(!dict.contains("mag-aral"));
        // Per-char folding keeps a capital sigma as a medial sigma.
        assert!(dict.contains("\u{03BF}\u{03B4}\u{03BF}\u{03C3}"));
        assert!(!dict.contains("\u{03BF}\u{03B4}\u{03BF}\u{03C2}"));
        assert!(dict.contains("ika2"));

        let strict = Dictionary::try_load(DictionarySource::words(["mag-aral"])).unwrap();
        assert!(strict.contains("magaral"));
    }

    #[test]
    fn duplicates_collapse() {
        let dict = Dictionary::from_words(["cat", "Cat", "CAT", "dog"]);
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn load_with_policy_strips_punctuation() {
        let source = DictionarySource::words(["don't", "well-known", "cat."]);
        let plain = Dictionary::load_with_policy(source.clone(), &CharPolicy::default());
        assert!(plain.contains("dont"));
        assert!(plain.contains("wellknown"));
        assert!(plain.contains("cat"));

        let extended = Dictionary::load_with_policy(source, &CharPolicy::extended());
        assert!(extended.contains("don't"));
        assert!(extended.contains("well-known"));
    }

    #[test]
    fn load_from_file() {
        let path = temp_word_file("load", "the\ncat\r\nsalamat\n\n");
        let dict = Dictionary::load(DictionarySource::file(&path));
        std::fs::remove_file(&path).unwrap();
        assert_eq!(dict.len(), 3);
        assert!(dict.contains("salamat"));
        assert!(!dict.is_degraded());
    }

    #[test]
    fn missing_file_degrades_to_empty() {
        let path = std::env::temp_dir().join("fsmspell-no-such-word-list.txt");
        let dict = Dictionary::load(DictionarySource::file(&path));
        assert!(dict.is_empty());
        assert!(dict.is_degraded());
        assert!(!dict.contains("the"));
    }

    #[test]
    fn non_utf8_file_degrades_to_empty() {
        let path = std::env::temp_dir().join(format!(
            "fsmspell-dictionary-{}-latin1.txt",
            std::process::id()
        ));
        std::fs::write(&path, [b'c', b'a', b'f', 0xE9, b'\n', 0xFF, 0xFE, b'\n']).unwrap();
        let dict = Dictionary::load(DictionarySource::file(&path));
        let strict = Dictionary::try_load(DictionarySource::file(&path));
        std::fs::remove_file(&path).unwrap();
        assert!(dict.is_degraded());
        assert!(dict.is_empty());
        assert!(matches!(strict, Err(DictionaryError::SourceUnavailable { .. })));
    }

    #[test]
    fn try_load_reports_missing_file() {
        let path = std::env::temp_dir().join("fsmspell-no-such-word-list.txt");
        let err = Dictionary::try_load(DictionarySource::file(&path)).unwrap_err();
        let DictionaryError::SourceUnavailable { path: reported, .. } = &err;
        assert_eq!(reported, &path);
        assert!(err.to_string().contains("fsmspell-no-such-word-list.txt"));
    }

    #[test]
    fn default_is_empty_but_not_degraded() {
        let dict = Dictionary::default();
        assert!(dict.is_empty());
        assert!(!dict.is_degraded());
    }

    #[test]
    fn length_buckets() {
        let dict = Dictionary::from_words(["a", "cat", "the", "ten", "tree", "\u{00F1}u"]);
        assert_eq!(dict.lengths(), &[1, 2, 3, 4]);
        assert_eq!(dict.words_with_len(3), &["cat", "ten", "the"]);
        // Lengths are in characters, not bytes.
        assert_eq!(dict.words_with_len(2), &["\u{00F1}u"]);
        assert!(dict.words_with_len(9).is_empty());
    }

    #[test]
    fn words_iterates_everything() {
        let dict = Dictionary::from_words(["the", "a", "tree"]);
        let words: Vec<_> = dict.words().collect();
        assert_eq!(words, vec!["a", "the", "tree"]);
    }

    #[test]
    fn debug_does_not_dump_words() {
        let dict = Dictionary::from_words(["secret"]);
        let debug = format!("{dict:?}");
        assert!(debug.contains("1 entries"));
        assert!(!debug.contains("secret"));
    }
}
