//! Validator configuration.

use serde::{Deserialize, Serialize};

/// Tag key rules are read from unless configured otherwise.
pub const DEFAULT_ANNOTATION_KEY: &str = "validate";

/// What to do with a sequence field that has no elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySequencePolicy {
    /// Rules are still resolved, then the field passes.
    #[default]
    Vacuous,
    /// An empty sequence aborts validation with
    /// [`ValidateError::EmptySequence`](crate::ValidateError::EmptySequence).
    Reject,
}

/// Configuration for a [`Validator`](crate::Validator).
///
/// # Examples
///
/// ```
/// use ruleval_validator::{EmptySequencePolicy, ValidatorConfig};
///
/// let config = ValidatorConfig::from_json(r#"{ "annotation_key": "check" }"#).unwrap();
/// assert_eq!(config.annotation_key, "check");
/// assert_eq!(config.empty_sequence, EmptySequencePolicy::Vacuous);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Tag key the extractor reads rule strings from.
    pub annotation_key: String,
    /// Handling of empty sequence fields.
    pub empty_sequence: EmptySequencePolicy,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            annotation_key: DEFAULT_ANNOTATION_KEY.to_owned(),
            empty_sequence: EmptySequencePolicy::default(),
        }
    }
}

impl ValidatorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that rejects empty sequences.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            empty_sequence: EmptySequencePolicy::Reject,
            ..Self::default()
        }
    }

    /// Sets the annotation key.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_annotation_key(mut self, key: impl Into<String>) -> Self {
        self.annotation_key = key.into();
        self
    }

    /// Sets the empty-sequence policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_empty_sequence(mut self, policy: EmptySequencePolicy) -> Self {
        self.empty_sequence = policy;
        self
    }

    /// Loads a configuration from JSON; missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ValidatorConfig::new();
        assert_eq!(config.annotation_key, "validate");
        assert_eq!(config.empty_sequence, EmptySequencePolicy::Vacuous);
    }

    #[test]
    fn strict_rejects_empty_sequences() {
        assert_eq!(
            ValidatorConfig::strict().empty_sequence,
            EmptySequencePolicy::Reject
        );
    }

    #[test]
    fn builder_overrides() {
        let config = ValidatorConfig::new()
            .with_annotation_key("check")
            .with_empty_sequence(EmptySequencePolicy::Reject);
        assert_eq!(config, ValidatorConfig::strict().with_annotation_key("check"));
    }

    #[test]
    fn json_round_trip() {
        let config = ValidatorConfig::strict();
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(text, r#"{"annotation_key":"validate","empty_sequence":"reject"}"#);
        assert_eq!(ValidatorConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(ValidatorConfig::from_json("{}").unwrap(), ValidatorConfig::default());
    }

    #[test]
    fn unknown_policy_is_an_error() {
        assert!(ValidatorConfig::from_json(r#"{"empty_sequence":"maybe"}"#).is_err());
    }
}
