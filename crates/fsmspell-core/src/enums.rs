// Shared enums: classifier states and diff strategies

use std::fmt;

use serde::{Deserialize, Serialize};

/// States of the per-token word classifier.
///
/// The classifier has no memory: every token enters [`WordState::Start`],
/// ends in [`WordState::Valid`] or [`WordState::Invalid`], and the machine
/// resets to `Start` before the next token. The states are kept so trace
/// output can report transitions; nothing dispatches on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordState {
    /// Initial state, entered before each token.
    Start,
    /// The normalized token is in the dictionary.
    Valid,
    /// The normalized token is not in the dictionary, or lookup failed.
    Invalid,
}

impl WordState {
    /// Terminal state for a classification result.
    pub fn from_validity(is_valid: bool) -> Self {
        if is_valid { Self::Valid } else { Self::Invalid }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for WordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the diff engine decides which tokens changed between two passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStrategy {
    /// Tokens are identified by start offset. Any insertion before a token
    /// shifts its offset and makes it "changed".
    #[default]
    Offset,
    /// Tokens are aligned across passes by a longest common subsequence over
    /// their text. Shifted but otherwise untouched tokens keep their verdict
    /// without another dictionary lookup.
    Aligned,
}
