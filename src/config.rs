//! Analyzer configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```json
//! { "review_abstraction_in_degree": 5 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid heat weights: {0}")]
    InvalidWeights(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Weights combining normalized metrics into a heat score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatWeights {
    pub in_degree: f64,
    pub out_degree: f64,
    pub exports: f64,
}

impl Default for HeatWeights {
    fn default() -> Self {
        Self {
            in_degree: 0.45,
            out_degree: 0.35,
            exports: 0.20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub heat_weights: HeatWeights,
    /// A file with an in-degree strictly above this gets a review-abstraction task.
    pub review_abstraction_in_degree: usize,
    /// A file with more exports than this gets a split-utilities task.
    pub split_utilities_exports: usize,
    /// The file whose death triggers the static remove-dead-code task.
    pub legacy_file: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            heat_weights: HeatWeights::default(),
            review_abstraction_in_degree: 3,
            split_utilities_exports: 2,
            legacy_file: "src/legacy/old-utils.ts".to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Loads and validates a JSON config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Weights must be non-negative and sum to 1.
    pub fn validate(&self) -> ConfigResult<()> {
        let w = &self.heat_weights;
        if [w.in_degree, w.out_degree, w.exports]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ConfigError::InvalidWeights(
                "weights must be finite and non-negative".to_string(),
            ));
        }

        let sum = w.in_degree + w.out_degree + w.exports;
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ConfigError::InvalidWeights(format!(
                "weights sum to {sum}, expected 1.0"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.review_abstraction_in_degree, 3);
        assert_eq!(config.split_utilities_exports, 2);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AnalyzerConfig::from_json(r#"{"review_abstraction_in_degree": 5}"#).unwrap();
        assert_eq!(config.review_abstraction_in_degree, 5);
        assert_eq!(config.heat_weights, HeatWeights::default());
        assert_eq!(config.legacy_file, "src/legacy/old-utils.ts");
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let err = AnalyzerConfig::from_json(
            r#"{"heat_weights": {"in_degree": 0.5, "out_degree": 0.5, "exports": 0.5}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWeights(_)));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = AnalyzerConfig::from_json(
            r#"{"heat_weights": {"in_degree": 1.2, "out_degree": -0.2, "exports": 0.0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWeights(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            AnalyzerConfig::from_json("{ nope"),
            Err(ConfigError::JsonError(_))
        ));
    }
}
