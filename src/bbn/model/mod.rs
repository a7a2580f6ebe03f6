pub mod network;
pub mod node;
pub mod variable;

pub use network::{BeliefNetwork, Record};
pub use node::{Cpt, Node, Value};
pub use variable::{Binding, BoundVariable, VariableId, VariableRegistry};
