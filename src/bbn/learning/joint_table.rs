use crate::bbn::common::tabular::{Table, TabularOptions, read_table};
use crate::bbn::error::{BeliefNetError, Result};
use crate::bbn::model::network::Record;
use crate::bbn::model::variable::{Binding, VariableId, VariableRegistry};
use log::{debug, info};
use std::collections::HashMap;
use std::io::BufRead;

/// Empirical joint table: each distinct observed row (as a set of bound
/// variables) mapped to how many times it was seen.
///
/// Counts stay integral; [`JointTable::normalized`] is for presentation.
#[derive(Debug, Clone)]
pub struct JointTable {
    registry: VariableRegistry,
    columns: Vec<String>,
    counts: HashMap<Binding, u64>,
    total_rows: u64,
}

impl JointTable {
    pub fn new(columns: Vec<String>) -> Self {
        JointTable {
            registry: VariableRegistry::new(),
            columns,
            counts: HashMap::new(),
            total_rows: 0,
        }
    }

    pub fn from_rows(columns: Vec<String>, rows: &[Vec<String>]) -> Result<Self> {
        let mut table = JointTable::new(columns);
        for (i, row) in rows.iter().enumerate() {
            table.add_row_at(row, i + 1)?;
        }
        info!(
            "Built joint table: {} rows, {} distinct",
            table.total_rows,
            table.counts.len()
        );
        Ok(table)
    }

    pub fn from_table(table: &Table) -> Result<Self> {
        Self::from_rows(table.columns.clone(), &table.rows)
    }

    pub fn from_reader<R: BufRead>(reader: R, options: &TabularOptions) -> Result<Self> {
        let table = read_table(reader, options)?;
        Self::from_table(&table)
    }

    /// Builds a table from sampled records, one column per node id.
    pub fn from_records(records: &[Record]) -> Result<Self> {
        let columns: Vec<String> = match records.first() {
            Some(record) => record.keys().cloned().collect(),
            None => Vec::new(),
        };
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).map(|v| v.to_string()).unwrap_or_default())
                    .collect()
            })
            .collect();
        Self::from_rows(columns, &rows)
    }

    /// Interns every (column, value) pair of `row` and counts the resulting set.
    pub fn add_row(&mut self, row: &[String]) -> Result<()> {
        let line = self.total_rows as usize + 1;
        self.add_row_at(row, line)
    }

    fn add_row_at(&mut self, row: &[String], line: usize) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(BeliefNetError::MalformedRow {
                line,
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        let binding: Binding = self
            .columns
            .iter()
            .zip(row.iter())
            .map(|(name, value)| self.registry.intern(name, value))
            .collect();
        *self.counts.entry(binding).or_insert(0) += 1;
        self.total_rows += 1;
        Ok(())
    }

    /// Sums the counts of every observed row that contains all of `bound`.
    pub fn count_matching(&self, bound: &Binding) -> u64 {
        self.counts
            .iter()
            .filter(|(row, _)| row.is_superset(bound))
            .map(|(_, count)| *count)
            .sum()
    }

    /// [`JointTable::count_matching`] as a fraction of all rows.
    pub fn frequency_matching(&self, bound: &Binding) -> f64 {
        if self.total_rows == 0 {
            return 0.0;
        }
        self.count_matching(bound) as f64 / self.total_rows as f64
    }

    /// Every distinct row with its relative frequency.
    pub fn normalized(&self) -> HashMap<Binding, f64> {
        debug!("normalized - dividing by {} rows", self.total_rows);
        self.counts
            .iter()
            .map(|(row, count)| (row.clone(), *count as f64 / self.total_rows as f64))
            .collect()
    }

    pub fn count(&self, row: &Binding) -> u64 {
        self.counts.get(row).copied().unwrap_or(0)
    }

    /// Id for `name` bound to `value`, interning it if unseen.
    pub fn bind(&mut self, name: &str, value: &str) -> VariableId {
        self.registry.intern(name, value)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Column names, sorted.
    pub fn variable_names(&self) -> Vec<String> {
        let mut names = self.columns.clone();
        names.sort();
        names.dedup();
        names
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    pub fn distinct_rows(&self) -> usize {
        self.counts.len()
    }

    pub fn registry(&self) -> &VariableRegistry {
        &self.registry
    }

    /// Binding generation interns through this; clearing must go through [`JointTable::reset`].
    pub(crate) fn registry_mut(&mut self) -> &mut VariableRegistry {
        &mut self.registry
    }

    /// Forgets every counted row together with the ids they were keyed by.
    /// Columns are kept, so rows can be added again.
    pub fn reset(&mut self) {
        debug!("reset - dropping {} distinct rows", self.counts.len());
        self.counts.clear();
        self.total_rows = 0;
        self.registry.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|v| v.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_reset_then_rebind() {
        let columns = vec!["a".to_string(), "b".to_string()];
        let data = vec![vec!["0".to_string(), "0".to_string()]; 5];
        let mut table = JointTable::from_rows(columns, &data).unwrap();

        table.reset();
        assert_eq!(table.total_rows(), 0);
        assert_eq!(table.distinct_rows(), 0);
        assert!(table.registry().is_empty());

        let b1 = table.bind("b", "1");
        let a1 = table.bind("a", "1");
        assert_eq!(table.count_matching(&Binding::from([a1, b1])), 0);
        assert_eq!(table.count_matching(&Binding::new()), 0);

        table.add_row(&["1".to_string(), "1".to_string()]).unwrap();
        assert_eq!(table.count_matching(&Binding::from([a1, b1])), 1);
        let a0 = table.bind("a", "0");
        assert_eq!(table.count_matching(&Binding::from([a0])), 0);
    }

    fn sample_table() -> JointTable {
        let columns = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let data = rows(&[
            &["0", "0", "1"],
            &["0", "0", "1"],
            &["0", "1", "1"],
            &["1", "1", "0"],
        ]);
        JointTable::from_rows(columns, &data).unwrap()
    }

    #[test]
    fn test_counts_identical_rows_together() {
        let mut table = sample_table();
        assert_eq!(table.total_rows(), 4);
        assert_eq!(table.distinct_rows(), 3);

        let a0 = table.bind("a", "0");
        let b0 = table.bind("b", "0");
        let c1 = table.bind("c", "1");
        let b1 = table.bind("b", "1");
        assert_eq!(table.count(&Binding::from([a0, b0, c1])), 2);
        assert_eq!(table.count(&Binding::from([a0, b1, c1])), 1);
        assert_eq!(table.count(&Binding::from([a0, c1])), 0);
    }

    #[test]
    fn test_count_matching_marginalizes() {
        let mut table = sample_table();
        let a0 = table.bind("a", "0");
        let c1 = table.bind("c", "1");
        let b1 = table.bind("b", "1");
        assert_eq!(table.count_matching(&Binding::from([a0])), 3);
        assert_eq!(table.count_matching(&Binding::from([a0, c1])), 3);
        assert_eq!(table.count_matching(&Binding::from([b1, c1])), 1);
        assert_eq!(table.count_matching(&Binding::new()), 4);
        assert!((table.frequency_matching(&Binding::from([b1])) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unseen_binding_counts_zero() {
        let mut table = sample_table();
        let never = table.bind("a", "7");
        assert_eq!(table.count_matching(&Binding::from([never])), 0);
    }

    #[test]
    fn test_normalized_sums_to_one() {
        let table = sample_table();
        let total: f64 = table.normalized().values().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_row_length_mismatch() {
        let mut table = sample_table();
        let result = table.add_row(&["1".to_string()]);
        assert!(matches!(
            result,
            Err(BeliefNetError::MalformedRow {
                expected: 3,
                got: 1,
                ..
            })
        ));
        assert_eq!(table.total_rows(), 4);
    }

    #[test]
    fn test_from_records() {
        let records = vec![
            Record::from([("x".to_string(), 1), ("y".to_string(), 0)]),
            Record::from([("x".to_string(), 1), ("y".to_string(), 0)]),
        ];
        let mut table = JointTable::from_records(&records).unwrap();
        assert_eq!(table.variable_names(), vec!["x", "y"]);
        let x1 = table.bind("x", "1");
        assert_eq!(table.count_matching(&Binding::from([x1])), 2);
    }
}
