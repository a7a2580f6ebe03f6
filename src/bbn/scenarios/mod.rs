pub mod factory;
pub mod five_node;
pub mod four_parents;
