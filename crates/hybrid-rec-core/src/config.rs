//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunables for the recommendation strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default result count for content recommendations
    pub content_top_n: usize,
    /// Default result count for sector recommendations
    pub knowledge_top_n: usize,
    /// Minimum score for a rating to count as positive
    pub positive_rating_threshold: f64,
    /// Drop courses the user already rated from collaborative results
    pub exclude_rated_items: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            content_top_n: 6,
            knowledge_top_n: 5,
            positive_rating_threshold: 4.0,
            exclude_rated_items: false,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can drive the engine.
    pub fn validate(&self) -> Result<()> {
        if self.content_top_n == 0 {
            return Err(Error::InvalidConfig("content_top_n must be at least 1".to_string()));
        }
        if self.knowledge_top_n == 0 {
            return Err(Error::InvalidConfig("knowledge_top_n must be at least 1".to_string()));
        }
        if !self.positive_rating_threshold.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "positive_rating_threshold must be finite, got {}",
                self.positive_rating_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.content_top_n, 6);
        assert_eq!(config.knowledge_top_n, 5);
        assert_eq!(config.positive_rating_threshold, 4.0);
        assert!(!config.exclude_rated_items);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = EngineConfig::from_json(r#"{"exclude_rated_items": true}"#).unwrap();
        assert!(config.exclude_rated_items);
        assert_eq!(config.content_top_n, 6);
    }

    #[test]
    fn test_invalid_json() {
        let err = EngineConfig::from_json(r#"{"knowledge_top_n": 0}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");

        assert!(EngineConfig::from_json("not json").is_err());
    }
}
