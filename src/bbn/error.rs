//! Error types for network sampling and structure learning.

use thiserror::Error;

/// Errors raised while building, sampling, or learning belief networks.
#[derive(Debug, Error)]
pub enum BeliefNetError {
    /// No CPT row exists for the realized parent values.
    #[error("Node '{node}' has no CPT entry for parent values {parent_values:?}")]
    MissingCptEntry {
        node: String,
        parent_values: Vec<u32>,
    },

    /// A parent's value was not supplied to a node's sample request.
    #[error("Node '{node}' was sampled without a value for parent '{parent}'")]
    MissingBinding {
        node: String,
        parent: String,
    },

    /// Forward sampling reached a node before one of its parents.
    #[error("Node '{node}' was processed before its parent '{parent}' (not in topological order)")]
    Ordering {
        node: String,
        parent: String,
    },

    /// Input row length differs from the header length.
    #[error("Row at line {line} has {got} values, expected {expected}")]
    MalformedRow {
        line: usize,
        expected: usize,
        got: usize,
    },

    /// A chi-squared test saw no matching rows at all.
    #[error("No observations for '{var_i}' and '{var_o}' under the given binding")]
    DegenerateTest {
        var_i: String,
        var_o: String,
    },

    /// A CPT is missing rows for some parent combinations.
    #[error("CPT for node '{node}' is missing entries for {missing:?}")]
    IncompleteCpt {
        node: String,
        missing: Vec<Vec<u32>>,
    },

    /// A CPT row does not describe a distribution over the node's domain.
    #[error("Invalid distribution for node '{node}': {reason}")]
    InvalidDistribution {
        node: String,
        reason: String,
    },

    /// A clamped value is not part of the node's domain.
    #[error("Value {value} is not in the domain of node '{node}'")]
    ValueOutOfDomain {
        node: String,
        value: u32,
    },

    #[error("Unknown node '{0}'")]
    UnknownNode(String),

    #[error("Unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("Unknown scenario '{0}'")]
    UnknownScenario(String),

    /// Input had no header row and no explicit column names.
    #[error("Input is empty")]
    EmptyInput,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BeliefNetError>;
