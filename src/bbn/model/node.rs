use crate::bbn::error::{BeliefNetError, Result};
use log::{trace, warn};
use rand::Rng;
use std::collections::HashMap;

/// A discrete state of a node.
pub type Value = u32;

/// Tolerance for the "row sums to one" check. Violations are only logged.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// Non-owning reference to a parent: its id plus the domain it had when linked.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentLink {
    pub id: String,
    pub domain: Vec<Value>,
}

/// Conditional probability table.
///
/// Keys are parent values in parent order; each row is aligned with the
/// node's domain. A root node has a single row under the empty key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cpt {
    entries: HashMap<Vec<Value>, Vec<f64>>,
}

impl Cpt {
    pub fn new() -> Self {
        Self::default()
    }

    /// CPT for a root node.
    pub fn marginal(probabilities: Vec<f64>) -> Self {
        let mut cpt = Cpt::new();
        cpt.insert(vec![], probabilities);
        cpt
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Vec<Value>, Vec<f64>)>,
    {
        Cpt {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, parent_values: Vec<Value>, probabilities: Vec<f64>) {
        self.entries.insert(parent_values, probabilities);
    }

    pub fn get(&self, parent_values: &[Value]) -> Option<&Vec<f64>> {
        self.entries.get(parent_values)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A discrete random variable in a belief network.
#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    domain: Vec<Value>,
    parents: Vec<ParentLink>,
    children: Vec<String>,
    cpt: Cpt,
}

impl Node {
    pub fn new(id: &str, domain: Vec<Value>) -> Self {
        Node {
            id: id.to_string(),
            domain,
            parents: Vec::new(),
            children: Vec::new(),
            cpt: Cpt::new(),
        }
    }

    /// A node over `{0, 1}`.
    pub fn binary(id: &str) -> Self {
        Self::new(id, vec![0, 1])
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn domain(&self) -> &[Value] {
        &self.domain
    }

    pub fn parents(&self) -> &[ParentLink] {
        &self.parents
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn cpt(&self) -> &Cpt {
        &self.cpt
    }

    /// Appends `parent`; its position fixes the order of CPT keys.
    /// No duplicate or cycle detection.
    pub fn add_parent(&mut self, parent: &Node) {
        self.parents.push(ParentLink {
            id: parent.id.clone(),
            domain: parent.domain.clone(),
        });
    }

    pub fn add_child(&mut self, child: &Node) {
        self.children.push(child.id.clone());
    }

    /// Cartesian product of the parents' domains, in parent order.
    ///
    /// A root node yields one empty combination.
    pub fn enumerate_parent_combinations(&self) -> Vec<Vec<Value>> {
        let mut combinations: Vec<Vec<Value>> = vec![vec![]];
        for parent in &self.parents {
            let mut extended = Vec::with_capacity(combinations.len() * parent.domain.len());
            for prefix in &combinations {
                for value in &parent.domain {
                    let mut next = prefix.clone();
                    next.push(*value);
                    extended.push(next);
                }
            }
            combinations = extended;
        }
        combinations
    }

    /// Replaces the CPT with a uniform distribution for every parent combination.
    pub fn init_uniform_cpt(&mut self) {
        let uniform = if self.domain.is_empty() {
            vec![]
        } else {
            vec![1.0 / self.domain.len() as f64; self.domain.len()]
        };
        self.cpt = Cpt::from_entries(
            self.enumerate_parent_combinations()
                .into_iter()
                .map(|combination| (combination, uniform.clone())),
        );
    }

    /// Installs `cpt` after checking it covers every parent combination with
    /// a non-negative row of the right width.
    pub fn set_cpt(&mut self, cpt: Cpt) -> Result<()> {
        let missing: Vec<Vec<Value>> = self
            .enumerate_parent_combinations()
            .into_iter()
            .filter(|combination| cpt.get(combination).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(BeliefNetError::IncompleteCpt {
                node: self.id.clone(),
                missing,
            });
        }

        for (key, row) in &cpt.entries {
            if row.len() != self.domain.len() {
                return Err(BeliefNetError::InvalidDistribution {
                    node: self.id.clone(),
                    reason: format!(
                        "row {:?} has {} probabilities for a domain of {}",
                        key,
                        row.len(),
                        self.domain.len()
                    ),
                });
            }
            if row.iter().any(|p| !p.is_finite() || *p < 0.0) {
                return Err(BeliefNetError::InvalidDistribution {
                    node: self.id.clone(),
                    reason: format!("row {:?} has a negative or non-finite probability", key),
                });
            }
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > SUM_TOLERANCE {
                warn!("CPT row {:?} of node '{}' sums to {}", key, self.id, sum);
            }
        }

        self.cpt = cpt;
        Ok(())
    }

    /// Builder form of [`Node::set_cpt`].
    pub fn with_cpt(mut self, cpt: Cpt) -> Result<Self> {
        self.set_cpt(cpt)?;
        Ok(self)
    }

    /// Looks up the CPT row selected by `parent_bindings` (parent id -> value).
    pub fn distribution(&self, parent_bindings: &HashMap<String, Value>) -> Result<&Vec<f64>> {
        let mut key = Vec::with_capacity(self.parents.len());
        for parent in &self.parents {
            let value = parent_bindings.get(&parent.id).ok_or_else(|| {
                BeliefNetError::MissingBinding {
                    node: self.id.clone(),
                    parent: parent.id.clone(),
                }
            })?;
            key.push(*value);
        }
        self.cpt
            .get(&key)
            .ok_or_else(|| BeliefNetError::MissingCptEntry {
                node: self.id.clone(),
                parent_values: key.clone(),
            })
    }

    /// P(self = value | parents) under the CPT.
    pub fn probability(
        &self,
        value: Value,
        parent_bindings: &HashMap<String, Value>,
    ) -> Result<f64> {
        let row = self.distribution(parent_bindings)?;
        let index = self
            .domain
            .iter()
            .position(|v| *v == value)
            .ok_or_else(|| BeliefNetError::ValueOutOfDomain {
                node: self.id.clone(),
                value,
            })?;
        Ok(row[index])
    }

    /// Draws a value given the parents' realized values. Consumes one draw from `rng`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        parent_bindings: &HashMap<String, Value>,
        rng: &mut R,
    ) -> Result<Value> {
        trace!("sample - node {} bindings {:?}", self.id, parent_bindings);
        let row = self.distribution(parent_bindings)?;
        let draw = rng.r#gen::<f64>();

        let mut accumulated = 0.0;
        for (value, probability) in self.domain.iter().zip(row.iter()) {
            accumulated += probability;
            if accumulated >= draw {
                return Ok(*value);
            }
        }

        // Rounding left the row just short of 1.0.
        self.domain
            .last()
            .copied()
            .ok_or_else(|| BeliefNetError::InvalidDistribution {
                node: self.id.clone(),
                reason: "empty domain".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn child_of_two() -> Node {
        let a = Node::binary("a");
        let b = Node::new("b", vec![0, 1, 2]);
        let mut c = Node::binary("c");
        c.add_parent(&a);
        c.add_parent(&b);
        c
    }

    #[test]
    fn test_parent_combinations_follow_parent_order() {
        let c = child_of_two();
        let combinations = c.enumerate_parent_combinations();
        assert_eq!(combinations.len(), 6);
        assert_eq!(combinations[0], vec![0, 0]);
        assert_eq!(combinations[1], vec![0, 1]);
        assert_eq!(combinations[5], vec![1, 2]);
        assert_eq!(Node::binary("root").enumerate_parent_combinations(), vec![Vec::<Value>::new()]);
    }

    #[test]
    fn test_uniform_cpt() {
        let mut c = child_of_two();
        c.init_uniform_cpt();
        assert_eq!(c.cpt().len(), 6);
        assert_eq!(c.cpt().get(&[1, 2]), Some(&vec![0.5, 0.5]));
    }

    #[test]
    fn test_incomplete_cpt_is_rejected() {
        let mut c = child_of_two();
        let cpt = Cpt::from_entries(vec![(vec![0, 0], vec![0.5, 0.5])]);
        match c.set_cpt(cpt) {
            Err(BeliefNetError::IncompleteCpt { missing, .. }) => assert_eq!(missing.len(), 5),
            other => panic!("expected IncompleteCpt, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_rows_are_rejected() {
        let root = Node::binary("root");
        assert!(matches!(
            root.clone().with_cpt(Cpt::marginal(vec![0.2, 0.3, 0.5])),
            Err(BeliefNetError::InvalidDistribution { .. })
        ));
        assert!(matches!(
            root.with_cpt(Cpt::marginal(vec![-0.2, 1.2])),
            Err(BeliefNetError::InvalidDistribution { .. })
        ));
    }

    #[test]
    fn test_missing_parent_binding() {
        let mut c = child_of_two();
        c.init_uniform_cpt();
        let mut rng = StdRng::seed_from_u64(1);
        let bindings = HashMap::from([("a".to_string(), 1)]);
        match c.sample(&bindings, &mut rng) {
            Err(BeliefNetError::MissingBinding { parent, .. }) => assert_eq!(parent, "b"),
            other => panic!("expected MissingBinding, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_cpt_entry() {
        let mut c = child_of_two();
        c.init_uniform_cpt();
        let mut rng = StdRng::seed_from_u64(1);
        let bindings = HashMap::from([("a".to_string(), 1), ("b".to_string(), 7)]);
        assert!(matches!(
            c.sample(&bindings, &mut rng),
            Err(BeliefNetError::MissingCptEntry { .. })
        ));
    }

    #[test]
    fn test_root_without_cpt_cannot_sample() {
        let root = Node::binary("root");
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            root.sample(&HashMap::new(), &mut rng),
            Err(BeliefNetError::MissingCptEntry { .. })
        ));
    }

    #[test]
    fn test_short_row_falls_back_to_last_value() {
        let root = Node::new("root", vec![3, 5])
            .with_cpt(Cpt::marginal(vec![0.0, 0.999_999_9]))
            .unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..1000 {
            assert_eq!(root.sample(&HashMap::new(), &mut rng).unwrap(), 5);
        }
    }

    #[test]
    fn test_probability_lookup() {
        let a = Node::binary("a");
        let mut b = Node::binary("b");
        b.add_parent(&a);
        b.set_cpt(Cpt::from_entries(vec![
            (vec![0], vec![0.25, 0.75]),
            (vec![1], vec![0.9, 0.1]),
        ]))
        .unwrap();
        let bindings = HashMap::from([("a".to_string(), 1)]);
        assert_eq!(b.probability(0, &bindings).unwrap(), 0.9);
        assert!(matches!(
            b.probability(4, &bindings),
            Err(BeliefNetError::ValueOutOfDomain { .. })
        ));
    }
}
