// Serializable engine configuration

use fsmspell_core::character::CharPolicy;
use fsmspell_core::enums::DiffStrategy;
use serde::{Deserialize, Serialize};

use crate::suggestion::{SuggestError, SuggestOptions};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON text is malformed or has fields of the wrong type.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The suggestion cutoff is outside `[0, 1]`.
    #[error("invalid configuration: suggestion cutoff {0} is outside [0, 1]")]
    InvalidCutoff(f64),
}

impl From<SuggestError> for ConfigError {
    fn from(err: SuggestError) -> Self {
        match err {
            SuggestError::InvalidCutoff(cutoff) => Self::InvalidCutoff(cutoff),
        }
    }
}

/// Every option of a [`SpellSession`](crate::SpellSession).
///
/// Missing fields take their defaults, so `{}` is a valid configuration:
///
/// ```
/// use fsmspell::SpellConfig;
///
/// let config = SpellConfig::from_json_str(r#"{"policy": {"allow_hyphen": true}}"#).unwrap();
/// assert!(config.policy.allow_hyphen);
/// assert_eq!(config.suggestions.max_suggestions, 5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellConfig {
    /// Characters kept in normalized words, shared by the tokenizer, the
    /// dictionary loader and the suggester.
    pub policy: CharPolicy,
    pub diff_strategy: DiffStrategy,
    pub suggestions: SuggestOptions,
}

impl SpellConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.suggestions.validate()?;
        Ok(())
    }
}
