use super::bindings::BindingMode;
use super::grow_shrink::GrowShrinkLearner;
use crate::bbn::error::Result;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Summary of one Markov-blanket search, written as JSON by the CLI.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BlanketReport {
    pub target: String,
    pub blanket: BTreeSet<String>,
    pub significance: f64,
    pub binding_mode: BindingMode,
    pub seed: Option<u64>,
    pub total_rows: u64,
    pub distinct_rows: usize,
    pub variables: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl BlanketReport {
    pub fn new(learner: &GrowShrinkLearner, target: &str, blanket: BTreeSet<String>) -> Self {
        let config = learner.config();
        BlanketReport {
            target: target.to_string(),
            blanket,
            significance: config.significance,
            binding_mode: config.binding_mode,
            seed: config.seed,
            total_rows: learner.table().total_rows(),
            distinct_rows: learner.table().distinct_rows(),
            variables: learner.table().variable_names(),
            timestamp: Utc::now(),
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        info!("Saving blanket report to {}", path.as_ref().display());
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
