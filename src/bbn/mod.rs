#[macro_use]
pub mod common;
pub mod error;
pub mod learning;
pub mod model;
pub mod scenarios;

pub use crate::print_green;
pub use crate::print_red;
pub use crate::print_yellow;

/// Exports the main types for easy access
pub use error::{BeliefNetError, Result};
pub use learning::{GrowShrinkLearner, JointTable, LearnerConfig};
pub use model::{BeliefNetwork, Cpt, Node};
