#[macro_use]
pub mod bbn;

pub use bbn::{BeliefNetError, BeliefNetwork, GrowShrinkLearner, JointTable, LearnerConfig};
