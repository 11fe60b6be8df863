//! Incremental spell checking engine.
//!
//! A host (text editor, terminal UI, ...) feeds the full buffer text into a
//! [`DiffEngine`] after every observed edit. The engine re-tokenizes, works
//! out which words changed since the previous pass, and classifies only those
//! against a [`Dictionary`]. Suggestions for a flagged word are computed on
//! demand by a [`Suggester`].
//!
//! # Architecture
//!
//! - [`tokenizer`] -- Whitespace tokenization with normalized forms
//! - [`dictionary`] -- Load-once word list with a degraded (empty) fallback
//! - [`speller`] -- Per-token valid/invalid classification
//! - [`diff`] -- Snapshot diffing and selective re-validation
//! - [`suggestion`] -- Similarity-ratio ranking of dictionary words
//! - [`config`] -- Serializable options for all of the above
//! - [`session`] -- One-stop owner of a dictionary, engine and options
//!
//! Nothing in this crate spawns threads, blocks on I/O after the dictionary
//! is loaded, or installs a `tracing` subscriber.

pub mod config;
pub mod diff;
pub mod dictionary;
pub mod session;
pub mod speller;
pub mod suggestion;
pub mod tokenizer;

pub use config::{ConfigError, SpellConfig};
pub use diff::{DiffEngine, TokenId, Update, UpdateStats};
pub use dictionary::{Dictionary, DictionaryError, DictionarySource};
pub use session::{Inspection, SpellSession};
pub use speller::{Lexicon, LookupFault, check_last_word, check_word, classify};
pub use suggestion::{SuggestError, SuggestOptions, Suggester, Suggestion};
pub use tokenizer::{normalize, tokenize, tokens};
