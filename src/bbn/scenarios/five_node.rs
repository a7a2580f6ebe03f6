use crate::bbn::common::interface::NetworkScenario;
use crate::bbn::error::Result;
use crate::bbn::model::network::BeliefNetwork;
use crate::bbn::model::node::{Cpt, Node};

/// The five-node reference network: A and E are roots, B depends on A,
/// C on (B, E) and D on B. Stored in the order A, B, E, C, D.
pub struct FiveNode {}

impl NetworkScenario for FiveNode {
    fn name(&self) -> &str {
        "five_node"
    }

    fn build(&self) -> Result<BeliefNetwork> {
        let mut a = Node::binary("A");
        let mut b = Node::binary("B");
        let mut c = Node::binary("C");
        let mut d = Node::binary("D");
        let mut e = Node::binary("E");

        a.add_child(&b);
        b.add_child(&c);
        b.add_child(&d);
        e.add_child(&c);

        c.add_parent(&b);
        c.add_parent(&e);
        d.add_parent(&b);
        b.add_parent(&a);

        a.set_cpt(Cpt::marginal(vec![0.1, 0.9]))?;
        e.set_cpt(Cpt::marginal(vec![0.9, 0.1]))?;
        b.set_cpt(Cpt::from_entries(vec![
            (vec![0], vec![0.5, 0.5]),
            (vec![1], vec![0.01, 0.99]),
        ]))?;
        c.set_cpt(Cpt::from_entries(vec![
            (vec![0, 0], vec![0.01, 0.99]),
            (vec![0, 1], vec![0.3, 0.7]),
            (vec![1, 0], vec![0.99, 0.01]),
            (vec![1, 1], vec![0.8, 0.2]),
        ]))?;
        d.set_cpt(Cpt::from_entries(vec![
            (vec![0], vec![0.99, 0.01]),
            (vec![1], vec![0.01, 0.99]),
        ]))?;

        Ok(BeliefNetwork::new(vec![a, b, e, c, d]))
    }
}
