pub mod bindings;
pub mod config;
pub mod grow_shrink;
pub mod independence;
pub mod joint_table;
pub mod report;

pub use bindings::{BindingConfig, BindingGenerator, BindingMode};
pub use config::LearnerConfig;
pub use grow_shrink::GrowShrinkLearner;
pub use independence::{IndependenceTester, TestOutcome};
pub use joint_table::JointTable;
pub use report::BlanketReport;
