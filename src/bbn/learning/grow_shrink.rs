use super::bindings::BindingGenerator;
use super::config::LearnerConfig;
use super::independence::IndependenceTester;
use super::joint_table::JointTable;
use crate::bbn::error::{BeliefNetError, Result};
use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};
use std::collections::BTreeSet;

/// Recovers Markov blankets with the Grow-Shrink algorithm
/// (Margaritis and Thrun, "Bayesian Network Induction via Local Neighborhoods").
///
/// Each phase makes exactly one pass. Candidates are visited in name order so
/// that results do not depend on hash iteration order.
pub struct GrowShrinkLearner {
    table: JointTable,
    tester: IndependenceTester,
    config: LearnerConfig,
    rng: StdRng,
}

impl GrowShrinkLearner {
    pub fn new(table: JointTable, config: LearnerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let tester = IndependenceTester::new(
            config.significance,
            config.binding_mode,
            BindingGenerator::new(config.bindings.clone()),
        );
        GrowShrinkLearner {
            table,
            tester,
            config,
            rng,
        }
    }

    pub fn table(&self) -> &JointTable {
        &self.table
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    /// Every variable except `target`, sorted by name.
    pub fn candidates(&self, target: &str) -> Result<Vec<String>> {
        if !self.table.has_variable(target) {
            return Err(BeliefNetError::UnknownVariable(target.to_string()));
        }
        Ok(self
            .table
            .variable_names()
            .into_iter()
            .filter(|name| name != target)
            .collect())
    }

    /// Adds each candidate that is dependent on `target` given the blanket so far.
    pub fn grow(&mut self, target: &str) -> Result<Vec<String>> {
        info!("Grow blanket phase for {}.", target);
        let mut blanket: Vec<String> = Vec::new();
        for candidate in self.candidates(target)? {
            if self.tester.conditionally_dependent(
                target,
                &candidate,
                &blanket,
                &mut self.table,
                &mut self.rng,
            ) {
                debug!("grow - adding {}", candidate);
                blanket.push(candidate);
            }
        }
        Ok(blanket)
    }

    /// Drops members that are independent of `target` given the rest of the blanket.
    ///
    /// Members are visited in `initial` order against the already-shrunk set.
    pub fn shrink(&mut self, target: &str, initial: &[String]) -> Result<BTreeSet<String>> {
        info!("Shrink blanket phase for {}.", target);
        if !self.table.has_variable(target) {
            return Err(BeliefNetError::UnknownVariable(target.to_string()));
        }
        let mut blanket: BTreeSet<String> = initial.iter().cloned().collect();
        for member in initial {
            let rest: Vec<String> = blanket.iter().filter(|n| *n != member).cloned().collect();
            if !self.tester.conditionally_dependent(
                target,
                member,
                &rest,
                &mut self.table,
                &mut self.rng,
            ) {
                debug!("shrink - removing {}", member);
                blanket.remove(member);
            }
        }
        Ok(blanket)
    }

    /// Grow followed by shrink.
    pub fn find_markov_blanket(&mut self, target: &str) -> Result<BTreeSet<String>> {
        let grown = self.grow(target)?;
        let blanket = self.shrink(target, &grown)?;
        info!(
            "Markov blanket of {}: {{{}}}",
            target,
            blanket.iter().cloned().collect::<Vec<_>>().join(", ")
        );
        Ok(blanket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_from(columns: &[&str], rows: &[&[&str]], repeat: usize) -> JointTable {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        let mut data = Vec::new();
        for _ in 0..repeat {
            for row in rows {
                data.push(row.iter().map(|v| v.to_string()).collect());
            }
        }
        JointTable::from_rows(columns, &data).unwrap()
    }

    #[test]
    fn test_unknown_target() {
        let table = table_from(&["a", "b"], &[&["0", "1"]], 1);
        let mut learner = GrowShrinkLearner::new(table, LearnerConfig::default().with_seed(1));
        assert!(matches!(
            learner.find_markov_blanket("zzz"),
            Err(BeliefNetError::UnknownVariable(_))
        ));
    }

    #[test]
    fn test_copy_column_is_in_blanket() {
        // b copies a, c is balanced against both.
        let table = table_from(
            &["a", "b", "c"],
            &[
                &["0", "0", "0"],
                &["0", "0", "1"],
                &["1", "1", "0"],
                &["1", "1", "1"],
            ],
            50,
        );
        let config = LearnerConfig::default().with_seed(5).with_significance(0.05);
        let mut learner = GrowShrinkLearner::new(table, config);
        assert_eq!(learner.candidates("a").unwrap(), vec!["b", "c"]);
        let blanket = learner.find_markov_blanket("a").unwrap();
        assert_eq!(blanket, BTreeSet::from(["b".to_string()]));
    }

    #[test]
    fn test_shrink_removes_independent_member() {
        let table = table_from(
            &["a", "b", "c"],
            &[
                &["0", "0", "0"],
                &["0", "0", "1"],
                &["1", "1", "0"],
                &["1", "1", "1"],
            ],
            50,
        );
        let config = LearnerConfig::default().with_seed(5).with_significance(0.05);
        let mut learner = GrowShrinkLearner::new(table, config);
        let shrunk = learner
            .shrink("a", &["c".to_string(), "b".to_string()])
            .unwrap();
        assert_eq!(shrunk, BTreeSet::from(["b".to_string()]));
    }
}
