// Word-character policy and normalization helpers

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Character constants
// ---------------------------------------------------------------------------

/// ASCII hyphen-minus, the only hyphen form kept by [`CharPolicy::allow_hyphen`].
pub const HYPHEN: char = '-';

/// ASCII apostrophe.
pub const APOSTROPHE: char = '\'';

/// RIGHT SINGLE QUOTATION MARK, the typographic apostrophe produced by most
/// word processors and mobile keyboards.
pub const RIGHT_SINGLE_QUOTE: char = '\u{2019}';

/// Check whether a character is an apostrophe (ASCII or typographic).
pub fn is_apostrophe(c: char) -> bool {
    matches!(c, APOSTROPHE | RIGHT_SINGLE_QUOTE)
}

/// Check whether a character is the hyphen recognized inside words.
pub fn is_hyphen(c: char) -> bool {
    c == HYPHEN
}

// ---------------------------------------------------------------------------
// Character policy
// ---------------------------------------------------------------------------

/// Decides which characters survive normalization.
///
/// Alphanumeric characters (any script, including letters with diacritics
/// such as `ñ` or `ä`, and digits) are always allowed. The flags add the
/// punctuation that may legitimately appear inside a word.
///
/// The default policy allows only alphanumerics, so `"don't"` normalizes to
/// `"dont"`. [`CharPolicy::extended`] keeps hyphens and both apostrophe forms,
/// so the same word normalizes to `"don't"` and `"well-known"` stays intact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CharPolicy {
    /// Keep `-` inside words.
    pub allow_hyphen: bool,
    /// Keep `'` and `’` inside words.
    pub allow_apostrophe: bool,
    /// Keep `_` inside words (regex `\w` semantics).
    pub allow_underscore: bool,
}

impl CharPolicy {
    /// Alphanumeric characters only.
    pub const fn alphanumeric() -> Self {
        Self {
            allow_hyphen: false,
            allow_apostrophe: false,
            allow_underscore: false,
        }
    }

    /// Alphanumerics plus hyphen, ASCII apostrophe and right single quote.
    pub const fn extended() -> Self {
        Self {
            allow_hyphen: true,
            allow_apostrophe: true,
            allow_underscore: false,
        }
    }

    /// Builder-style toggle for [`allow_hyphen`](Self::allow_hyphen).
    pub const fn with_hyphen(mut self, allow: bool) -> Self {
        self.allow_hyphen = allow;
        self
    }

    /// Builder-style toggle for [`allow_apostrophe`](Self::allow_apostrophe).
    pub const fn with_apostrophe(mut self, allow: bool) -> Self {
        self.allow_apostrophe = allow;
        self
    }

    /// Builder-style toggle for [`allow_underscore`](Self::allow_underscore).
    pub const fn with_underscore(mut self, allow: bool) -> Self {
        self.allow_underscore = allow;
        self
    }

    /// Returns `true` if `c` is kept by normalization under this policy.
    ///
    /// `c` is expected to be already case-folded; case does not affect the
    /// answer for alphanumerics either way.
    pub fn is_allowed(&self, c: char) -> bool {
        if c.is_alphanumeric() {
            return true;
        }
        (self.allow_hyphen && is_hyphen(c))
            || (self.allow_apostrophe && is_apostrophe(c))
            || (self.allow_underscore && c == '_')
    }

    /// Lower-case `text` and strip every character this policy does not allow.
    ///
    /// Case folding happens first, so multi-character lowercase expansions
    /// (e.g. `İ` -> `i̇`) are filtered per resulting character.
    pub fn normalize(&self, text: &str) -> String {
        text.chars()
            .flat_map(char::to_lowercase)
            .filter(|&c| self.is_allowed(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_alphanumeric() {
        assert_eq!(CharPolicy::default(), CharPolicy::alphanumeric());
    }

    #[test]
    fn alphanumerics_always_allowed() {
        let policy = CharPolicy::alphanumeric();
        assert!(policy.is_allowed('a'));
        assert!(policy.is_allowed('7'));
        assert!(policy.is_allowed('\u{00F1}')); // ñ
        assert!(policy.is_allowed('\u{00E4}')); // ä
        assert!(!policy.is_allowed('-'));
        assert!(!policy.is_allowed('\''));
        assert!(!policy.is_allowed(','));
    }

    #[test]
    fn normalize_strips_punctuation_and_folds_case() {
        let policy = CharPolicy::default();
        assert_eq!(policy.normalize("Hello,"), "hello");
        assert_eq!(policy.normalize("\"Quoted!\""), "quoted");
        assert_eq!(policy.normalize("don't"), "dont");
        assert_eq!(policy.normalize("..."), "");
    }

    #[test]
    fn extended_keeps_hyphen_and_apostrophes() {
        let policy = CharPolicy::extended();
        assert_eq!(policy.normalize("Well-Known"), "well-known");
        assert_eq!(policy.normalize("don't"), "don't");
        assert_eq!(policy.normalize("don\u{2019}t."), "don\u{2019}t");
    }

    #[test]
    fn underscore_only_when_enabled() {
        assert_eq!(CharPolicy::default().normalize("snake_case"), "snakecase");
        let policy = CharPolicy::default().with_underscore(true);
        assert_eq!(policy.normalize("snake_case"), "snake_case");
    }

    #[test]
    fn diacritics_survive_normalization() {
        let policy = CharPolicy::default();
        assert_eq!(policy.normalize("Ni\u{00D1}o"), "ni\u{00F1}o");
    }

    #[test]
    fn builder_toggles() {
        let policy = CharPolicy::alphanumeric()
            .with_hyphen(true)
            .with_apostrophe(true);
        assert_eq!(policy, CharPolicy::extended());
    }

    #[test]
    fn policy_deserializes_with_defaults() {
        let policy: CharPolicy = serde_json::from_str(r#"{"allow_hyphen": true}"#).unwrap();
        assert!(policy.allow_hyphen);
        assert!(!policy.allow_apostrophe);
        assert!(!policy.allow_underscore);
    }
}
