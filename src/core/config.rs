//! Selector tunables loadable from TOML.

use std::time::Duration;

use serde::Deserialize;

use crate::core::errors::{AdsError, Result};
use crate::targeting::evaluator::EVALUATION_DEADLINE;

/// Runtime tunables for [`crate::selection::AdSelector`].
///
/// The defaults reproduce production behavior; tests shrink the deadline so
/// the timeout path does not take eleven wall-clock seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    /// Overall per-group deadline for concurrent predicate evaluation, in
    /// milliseconds. Predicates that miss it count as non-TRUE.
    pub evaluation_deadline_ms: u64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            evaluation_deadline_ms: u64::try_from(EVALUATION_DEADLINE.as_millis())
                .unwrap_or(11_000),
        }
    }
}

impl SelectorConfig {
    /// Parses a config from TOML text and validates it.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the evaluator cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.evaluation_deadline_ms == 0 {
            return Err(AdsError::InvalidConfig {
                details: "evaluation_deadline_ms must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// The evaluation deadline as a [`Duration`].
    #[must_use]
    pub const fn evaluation_deadline(&self) -> Duration {
        Duration::from_millis(self.evaluation_deadline_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::SelectorConfig;
    use std::time::Duration;

    #[test]
    fn default_deadline_matches_production_constant() {
        let config = SelectorConfig::default();
        assert_eq!(config.evaluation_deadline_ms, 11_000);
        assert_eq!(config.evaluation_deadline(), Duration::from_millis(11_000));
    }

    #[test]
    fn parses_toml_overrides() {
        let config = SelectorConfig::from_toml_str("evaluation_deadline_ms = 250")
            .expect("valid config should parse");
        assert_eq!(config.evaluation_deadline(), Duration::from_millis(250));
    }

    #[test]
    fn rejects_zero_deadline() {
        let err = SelectorConfig::from_toml_str("evaluation_deadline_ms = 0")
            .expect_err("zero deadline must be rejected");
        assert_eq!(err.code(), "ADS-1002");
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(SelectorConfig::from_toml_str("deadline = 11").is_err());
    }
}
