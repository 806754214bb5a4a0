//! Selector configuration parameters.

use serde::{Deserialize, Serialize};

/// Which contribution sets honour the exclusion map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionMode {
    /// Exclusions veto both primary and extra contributions.
    #[default]
    Uniform,
    /// Exclusions veto primary contributions only; extra contributions
    /// ignore them. Matches output produced by older tooling.
    PrimaryOnly,
}

/// Selector configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    /// How exclusions apply (default: uniform).
    pub exclusion_mode: ExclusionMode,

    /// Keep a per-row trace in the result (default: true).
    /// Decisions are logged either way.
    pub record_trace: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            exclusion_mode: ExclusionMode::Uniform,
            record_trace: true,
        }
    }
}

impl SelectorConfig {
    /// Set the exclusion mode.
    #[must_use]
    pub fn with_exclusion_mode(mut self, mode: ExclusionMode) -> Self {
        self.exclusion_mode = mode;
        self
    }

    /// Enable or disable the per-row trace.
    #[must_use]
    pub fn with_trace(mut self, record: bool) -> Self {
        self.record_trace = record;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SelectorConfig::default();
        assert_eq!(config.exclusion_mode, ExclusionMode::Uniform);
        assert!(config.record_trace);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SelectorConfig::default()
            .with_exclusion_mode(ExclusionMode::PrimaryOnly)
            .with_trace(false);

        assert_eq!(config.exclusion_mode, ExclusionMode::PrimaryOnly);
        assert!(!config.record_trace);
    }

    #[test]
    fn test_serialization() {
        let config = SelectorConfig::default().with_exclusion_mode(ExclusionMode::PrimaryOnly);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"primary_only\""));

        let deserialized: SelectorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SelectorConfig = serde_json::from_str(r#"{"record_trace": false}"#).unwrap();
        assert_eq!(config.exclusion_mode, ExclusionMode::Uniform);
        assert!(!config.record_trace);
    }
}
