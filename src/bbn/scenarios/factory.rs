use std::rc::Rc;

use crate::bbn::common::interface::NetworkScenario;
use crate::bbn::error::{BeliefNetError, Result};

use super::{five_node::FiveNode, four_parents::FourParents};

pub struct ScenarioFactory;

impl ScenarioFactory {
    pub fn new_shared(name: &str) -> Result<Rc<dyn NetworkScenario>> {
        match name {
            "five_node" => Ok(Rc::new(FiveNode {})),
            "four_parents" => Ok(Rc::new(FourParents { noise: false })),
            "noisy_four_parents" => Ok(Rc::new(FourParents { noise: true })),
            _ => Err(BeliefNetError::UnknownScenario(name.to_string())),
        }
    }

    pub fn names() -> &'static [&'static str] {
        &["five_node", "four_parents", "noisy_four_parents"]
    }
}
