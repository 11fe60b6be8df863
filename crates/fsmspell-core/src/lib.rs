//! Shared types for the fsmspell incremental spell checker.
//!
//! Everything here is plain data: the engine crate (`fsmspell`) owns the
//! algorithms, and hosts depend on this crate to name the values the engine
//! hands back to them.
//!
//! # Architecture
//!
//! - [`character`] -- Word-character policy and case folding
//! - [`enums`] -- Classifier states and diff strategies
//! - [`position`] -- Byte offset to (line, column) translation
//! - [`token`] -- Tokens, verdicts and span validation

pub mod character;
pub mod enums;
pub mod position;
pub mod token;
