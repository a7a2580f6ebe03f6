use super::node::{Node, Value};
use crate::bbn::error::{BeliefNetError, Result};
use log::{debug, trace};
use rand::Rng;
use std::collections::{BTreeMap, HashMap, HashSet};

/// One sampled assignment: node id -> realized value.
pub type Record = BTreeMap<String, Value>;

/// An ordered collection of CPT nodes.
///
/// Nodes are expected in topological order (parents first). The order is not
/// checked at construction; [`BeliefNetwork::sample`] fails with
/// [`BeliefNetError::Ordering`] when it meets a node before its parent.
#[derive(Debug, Clone)]
pub struct BeliefNetwork {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl BeliefNetwork {
    pub fn new(nodes: Vec<Node>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id().to_string(), i))
            .collect();
        BeliefNetwork { nodes, index }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|i| &self.nodes[*i])
    }

    /// Node ids in stored order.
    pub fn ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks up front that every parent precedes its children.
    pub fn validate_order(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            for parent in node.parents() {
                if !seen.contains(parent.id.as_str()) {
                    return Err(BeliefNetError::Ordering {
                        node: node.id().to_string(),
                        parent: parent.id.clone(),
                    });
                }
            }
            seen.insert(node.id());
        }
        Ok(())
    }

    /// Forward-samples one complete record.
    ///
    /// Nodes named in `bindings` are clamped to the given value and their CPT
    /// is not consulted. Every other node is sampled from its CPT given the
    /// values already resolved for its parents.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        bindings: Option<&HashMap<String, Value>>,
        rng: &mut R,
    ) -> Result<Record> {
        if let Some(bindings) = bindings {
            self.check_clamps(bindings)?;
        }

        let mut record = Record::new();
        for node in &self.nodes {
            if let Some(value) = bindings.and_then(|b| b.get(node.id())) {
                trace!("sample - {} clamped to {}", node.id(), value);
                record.insert(node.id().to_string(), *value);
                continue;
            }

            let mut parent_values = HashMap::with_capacity(node.parents().len());
            for parent in node.parents() {
                let value = record.get(&parent.id).ok_or_else(|| BeliefNetError::Ordering {
                    node: node.id().to_string(),
                    parent: parent.id.clone(),
                })?;
                parent_values.insert(parent.id.clone(), *value);
            }

            let value = node.sample(&parent_values, rng)?;
            trace!("sample - {} = {}", node.id(), value);
            record.insert(node.id().to_string(), value);
        }
        Ok(record)
    }

    /// Draws `count` independent records. Stops at the first failure.
    pub fn sample_batch<R: Rng + ?Sized>(
        &self,
        count: usize,
        bindings: Option<&HashMap<String, Value>>,
        rng: &mut R,
    ) -> Result<Vec<Record>> {
        debug!("sample_batch - drawing {} records", count);
        (0..count).map(|_| self.sample(bindings, rng)).collect()
    }

    /// Log-probability of a complete record under the network's factorization.
    pub fn log_likelihood(&self, record: &Record) -> Result<f64> {
        let mut total = 0.0;
        for node in &self.nodes {
            let value = record
                .get(node.id())
                .ok_or_else(|| BeliefNetError::UnknownNode(node.id().to_string()))?;
            let parent_values: HashMap<String, Value> = node
                .parents()
                .iter()
                .filter_map(|p| record.get(&p.id).map(|v| (p.id.clone(), *v)))
                .collect();
            total += node.probability(*value, &parent_values)?.ln();
        }
        Ok(total)
    }

    fn check_clamps(&self, bindings: &HashMap<String, Value>) -> Result<()> {
        for (id, value) in bindings {
            let node = self
                .node(id)
                .ok_or_else(|| BeliefNetError::UnknownNode(id.clone()))?;
            if !node.domain().contains(value) {
                return Err(BeliefNetError::ValueOutOfDomain {
                    node: id.clone(),
                    value: *value,
                });
            }
        }
        Ok(())
    }
}
