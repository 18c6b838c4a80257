//! ADS-prefixed error types with structured error codes.

#![allow(missing_docs)]

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, AdsError>;

/// Top-level error type for the ad selection pipeline.
///
/// None of these escape [`crate::selection::AdSelector::select_advertisement`];
/// they exist for the lookup trait surface, request validation, and
/// configuration loading.
#[derive(Debug, Error)]
pub enum AdsError {
    #[error("[ADS-1001] invalid request: {details}")]
    InvalidRequest { details: String },

    #[error("[ADS-1002] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[ADS-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[ADS-2001] content lookup failure for marketplace {marketplace_id}: {details}")]
    ContentLookup {
        marketplace_id: String,
        details: String,
    },

    #[error("[ADS-2002] targeting lookup failure for content {content_id}: {details}")]
    TargetingLookup {
        content_id: String,
        details: String,
    },

    #[error("[ADS-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },
}

impl AdsError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "ADS-1001",
            Self::InvalidConfig { .. } => "ADS-1002",
            Self::ConfigParse { .. } => "ADS-1003",
            Self::ContentLookup { .. } => "ADS-2001",
            Self::TargetingLookup { .. } => "ADS-2002",
            Self::Serialization { .. } => "ADS-2101",
        }
    }

    /// Whether retrying might resolve the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ContentLookup { .. } | Self::TargetingLookup { .. }
        )
    }
}

impl From<toml::de::Error> for AdsError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

impl From<serde_json::Error> for AdsError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AdsError;

    #[test]
    fn codes_are_stable() {
        let err = AdsError::InvalidRequest {
            details: "marketplace id is empty".to_string(),
        };
        assert_eq!(err.code(), "ADS-1001");
        assert!(err.to_string().starts_with("[ADS-1001]"));
    }

    #[test]
    fn lookup_failures_are_retryable() {
        let err = AdsError::ContentLookup {
            marketplace_id: "US".to_string(),
            details: "store offline".to_string(),
        };
        assert!(err.is_retryable());
        let err = AdsError::InvalidConfig {
            details: "deadline must be positive".to_string(),
        };
        assert!(!err.is_retryable());
    }
}
