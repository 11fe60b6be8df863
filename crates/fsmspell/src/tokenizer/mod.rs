// Whitespace tokenizer with policy-driven normalization

use std::iter::FusedIterator;

use fsmspell_core::character::CharPolicy;
use fsmspell_core::token::Token;

/// Normalize a word for dictionary lookup or similarity scoring.
///
/// Lower-cases `word` and strips every character `policy` does not allow.
/// The result may be empty (pure punctuation).
pub fn normalize(word: &str, policy: &CharPolicy) -> String {
    policy.normalize(word)
}

/// Split `buffer` into word tokens.
///
/// A token is a maximal run of non-whitespace characters. Runs whose
/// normalized form is empty (`"--"`, `"..."`, `"?!"`) produce no token.
/// The output depends only on `buffer` and `policy`.
pub fn tokenize(buffer: &str, policy: &CharPolicy) -> Vec<Token> {
    tokens(buffer, policy).collect()
}

/// Lazily iterate the tokens of `buffer`. See [`tokenize`].
pub fn tokens<'a>(buffer: &'a str, policy: &CharPolicy) -> Tokens<'a> {
    Tokens {
        buffer,
        policy: *policy,
        pos: 0,
    }
}

/// Iterator returned by [`tokens`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    buffer: &'a str,
    policy: CharPolicy,
    /// Byte offset where scanning resumes; always on a char boundary.
    pos: usize,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let rest = &self.buffer[self.pos..];
            let Some(skip) = rest.find(|c: char| !c.is_whitespace()) else {
                self.pos = self.buffer.len();
                return None;
            };
            let start = self.pos + skip;
            let run = &self.buffer[start..];
            let end = start + run.find(char::is_whitespace).unwrap_or(run.len());
            self.pos = end;

            let text = &self.buffer[start..end];
            let normalized = self.policy.normalize(text);
            if normalized.is_empty() {
                continue;
            }
            return Some(Token::new(text, start, normalized));
        }
    }
}

impl FusedIterator for Tokens<'_> {}
