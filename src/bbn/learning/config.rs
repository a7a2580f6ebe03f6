use super::bindings::{BindingConfig, BindingMode};
use super::independence::DEFAULT_SIGNIFICANCE;
use crate::bbn::error::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tuning for the Grow-Shrink learner. Missing JSON fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// p-value at or below which two variables count as dependent.
    pub significance: f64,
    pub binding_mode: BindingMode,
    pub bindings: BindingConfig,
    /// Seed for binding sampling; fresh entropy when absent.
    pub seed: Option<u64>,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        LearnerConfig {
            significance: DEFAULT_SIGNIFICANCE,
            binding_mode: BindingMode::Auto,
            bindings: BindingConfig::default(),
            seed: None,
        }
    }
}

impl LearnerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Loading learner config from {}", path.as_ref().display());
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn with_significance(mut self, significance: f64) -> Self {
        self.significance = significance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_binding_mode(mut self, mode: BindingMode) -> Self {
        self.binding_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LearnerConfig =
            serde_json::from_str(r#"{"significance": 0.01, "binding_mode": "random-sample"}"#)
                .unwrap();
        assert_eq!(config.significance, 0.01);
        assert_eq!(config.binding_mode, BindingMode::RandomSample);
        assert_eq!(config.bindings.threshold, 30);
        assert_eq!(config.bindings.sample_fraction, 0.8);
        assert_eq!(config.bindings.max_samples, 10_000);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder_overrides() {
        let config = LearnerConfig::default()
            .with_significance(0.05)
            .with_seed(3)
            .with_binding_mode(BindingMode::Exhaustive);
        assert_eq!(config.significance, 0.05);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.binding_mode, BindingMode::Exhaustive);
        assert_eq!(config.bindings, BindingConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learner.json");
        fs::write(&path, r#"{"seed": 7, "bindings": {"threshold": 8}}"#).unwrap();
        let config = LearnerConfig::load_from_file(&path).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.bindings.threshold, 8);
        assert_eq!(config.significance, DEFAULT_SIGNIFICANCE);
    }
}
