use crate::bbn::common::interface::NetworkScenario;
use crate::bbn::error::Result;
use crate::bbn::model::network::BeliefNetwork;
use crate::bbn::model::node::{Cpt, Node};

/// P(Y=1) when no parent is active.
const BASE_RATE: f64 = 0.05;
/// Increase of P(Y=1) per active parent.
const PARENT_EFFECT: f64 = 0.225;

/// Y with four uniform binary parents X1..X4; P(Y=1) grows with the number
/// of active parents. With `noise` set, two unrelated roots Z1 and Z2 are
/// added so the learner has something to leave out.
pub struct FourParents {
    pub noise: bool,
}

impl FourParents {
    pub const PARENTS: [&'static str; 4] = ["X1", "X2", "X3", "X4"];
    pub const NOISE: [&'static str; 2] = ["Z1", "Z2"];

    fn uniform_root(id: &str) -> Result<Node> {
        Node::binary(id).with_cpt(Cpt::marginal(vec![0.5, 0.5]))
    }
}

impl NetworkScenario for FourParents {
    fn name(&self) -> &str {
        if self.noise { "noisy_four_parents" } else { "four_parents" }
    }

    fn build(&self) -> Result<BeliefNetwork> {
        let mut parents = Self::PARENTS
            .iter()
            .map(|id| Self::uniform_root(id))
            .collect::<Result<Vec<_>>>()?;

        let mut y = Node::binary("Y");
        for parent in parents.iter_mut() {
            parent.add_child(&y);
            y.add_parent(parent);
        }

        let cpt = Cpt::from_entries(y.enumerate_parent_combinations().into_iter().map(
            |combination| {
                let active = combination.iter().filter(|v| **v == 1).count() as f64;
                let p_one = BASE_RATE + PARENT_EFFECT * active;
                (combination, vec![1.0 - p_one, p_one])
            },
        ));
        y.set_cpt(cpt)?;

        let mut nodes = parents;
        nodes.push(y);
        if self.noise {
            for id in Self::NOISE {
                nodes.push(Self::uniform_root(id)?);
            }
        }
        Ok(BeliefNetwork::new(nodes))
    }
}
