// Token and Verdict public API types

use std::ops::Range;

use crate::enums::WordState;

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A whitespace-delimited word of the buffer.
///
/// `text` is the raw run of non-whitespace characters, punctuation included
/// (`"hello,"`). `normalized` is the form used for dictionary lookups and
/// similarity scoring (`"hello"`). Offsets are UTF-8 byte offsets into the
/// buffer the token was cut from, half-open, so `&buffer[start..end] == text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// The raw text of this token.
    pub text: String,
    /// Byte offset of the first byte of the token.
    pub start: usize,
    /// Byte offset one past the last byte of the token.
    pub end: usize,
    /// Case-folded, policy-filtered form of `text`. Never empty.
    pub normalized: String,
}

impl Token {
    /// Create a token starting at byte offset `start`.
    ///
    /// `end` is derived from the byte length of `text`.
    pub fn new(text: impl Into<String>, start: usize, normalized: impl Into<String>) -> Self {
        let text = text.into();
        let end = start + text.len();
        debug_assert!(start < end, "token at {start} has no text");
        Self {
            text,
            start,
            end,
            normalized: normalized.into(),
        }
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length of the raw token in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length of the raw token in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// The classification of one token.
///
/// Produced fresh on every re-check and replaced, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Verdict {
    pub token: Token,
    pub is_valid: bool,
}

impl Verdict {
    pub fn new(token: Token, is_valid: bool) -> Self {
        Self { token, is_valid }
    }

    /// The terminal classifier state this verdict corresponds to.
    pub fn state(&self) -> WordState {
        WordState::from_validity(self.is_valid)
    }

    /// Start offset of the classified token.
    pub fn offset(&self) -> usize {
        self.token.start
    }
}

// ---------------------------------------------------------------------------
// Span validation
// ---------------------------------------------------------------------------

/// A token whose span does not describe its own text in the buffer.
///
/// The tokenizer cannot produce one; seeing this error means a caller paired
/// tokens with the wrong buffer or built them by hand incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedToken {
    #[error("token span {start}..{end} is empty or reversed")]
    EmptySpan { start: usize, end: usize },
    #[error("token span {start}..{end} exceeds buffer length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("token span {start}..{end} does not fall on char boundaries")]
    NotCharBoundary { start: usize, end: usize },
    #[error("buffer text at {start}..{end} is {found:?}, token says {expected:?}")]
    TextMismatch {
        start: usize,
        end: usize,
        expected: String,
        found: String,
    },
    #[error("token at {start} has an empty normalized form")]
    EmptyNormalized { start: usize },
    #[error("token at {start} does not come after the token ending at {previous_end}")]
    OutOfOrder { start: usize, previous_end: usize },
}

/// Check that `tokens` is a valid tokenization of `buffer`: every span is
/// non-empty, in bounds, on char boundaries and matches its text, and tokens
/// are ordered without overlap.
pub fn validate_spans(buffer: &str, tokens: &[Token]) -> Result<(), MalformedToken> {
    let mut previous_end: Option<usize> = None;
    for token in tokens {
        let (start, end) = (token.start, token.end);
        if start >= end {
            return Err(MalformedToken::EmptySpan { start, end });
        }
        if end > buffer.len() {
            return Err(MalformedToken::OutOfBounds {
                start,
                end,
                len: buffer.len(),
            });
        }
        let Some(found) = buffer.get(start..end) else {
            return Err(MalformedToken::NotCharBoundary { start, end });
        };
        if found != token.text {
            return Err(MalformedToken::TextMismatch {
                start,
                end,
                expected: token.text.clone(),
                found: found.to_string(),
            });
        }
        if token.normalized.is_empty() {
            return Err(MalformedToken::EmptyNormalized { start });
        }
        if let Some(previous_end) = previous_end {
            if start < previous_end {
                return Err(MalformedToken::OutOfOrder {
                    start,
                    previous_end,
                });
            }
        }
        previous_end = Some(end);
    }
    Ok(())
}
