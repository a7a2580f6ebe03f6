//! Chi-squared tests of (conditional) independence between binary variables.
//!
//! Zero expected cells contribute nothing to the statistic instead of being
//! corrected (no Yates, no exact test), which understates the statistic for
//! sparse tables. The significance level is compared against the p-value
//! directly; the inherited default of 0.5 is loose and meant to be tuned.

use super::bindings::{BindingGenerator, BindingMode};
use super::joint_table::JointTable;
use crate::bbn::error::{BeliefNetError, Result};
use crate::bbn::model::variable::{BINARY_VALUES, Binding};
use log::{debug, trace};
use rand::Rng;

/// Inherited default p-value cutoff.
pub const DEFAULT_SIGNIFICANCE: f64 = 0.5;

/// Error function, Abramowitz and Stegun 7.1.26. Accurate to about 1.5e-7.
fn erf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}

/// Upper tail of the chi-squared distribution with one degree of freedom.
pub fn chi_squared_p_value(statistic: f64) -> f64 {
    if statistic <= 0.0 {
        return 1.0;
    }
    (1.0 - erf((statistic / 2.0).sqrt())).clamp(0.0, 1.0)
}

/// Chi-squared statistic of a 2x2 table with cells `x_ab`.
///
/// Returns 0 when `n` is 0. A cell whose expected count is 0 adds nothing.
pub fn chi_squared_statistic(n: f64, x00: f64, x01: f64, x10: f64, x11: f64) -> f64 {
    if n == 0.0 {
        return 0.0;
    }
    let row0 = x00 + x01;
    let row1 = x10 + x11;
    let col0 = x00 + x10;
    let col1 = x01 + x11;

    [
        (x00, row0 * col0 / n),
        (x01, row0 * col1 / n),
        (x10, row1 * col0 / n),
        (x11, row1 * col1 / n),
    ]
    .iter()
    .filter(|(_, expected)| *expected != 0.0)
    .map(|(observed, expected)| (observed - expected).powi(2) / expected)
    .sum()
}

/// Counts of the four joint events of two binary variables.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContingencyTable {
    pub x00: u64,
    pub x01: u64,
    pub x10: u64,
    pub x11: u64,
}

impl ContingencyTable {
    pub fn total(&self) -> u64 {
        self.x00 + self.x01 + self.x10 + self.x11
    }

    pub fn statistic(&self) -> f64 {
        chi_squared_statistic(
            self.total() as f64,
            self.x00 as f64,
            self.x01 as f64,
            self.x10 as f64,
            self.x11 as f64,
        )
    }
}

/// Result of one chi-squared test under a single binding.
#[derive(Debug, Clone, PartialEq)]
pub struct TestOutcome {
    pub var_i: String,
    pub var_o: String,
    pub table: ContingencyTable,
    pub statistic: f64,
    pub p_value: f64,
    pub dependent: bool,
}

impl TestOutcome {
    /// True when no rows matched the binding at all.
    pub fn is_degenerate(&self) -> bool {
        self.table.total() == 0
    }

    /// Turns the silent zero-count case into an error for callers that want it.
    pub fn ensure_not_degenerate(&self) -> Result<()> {
        if self.is_degenerate() {
            return Err(BeliefNetError::DegenerateTest {
                var_i: self.var_i.clone(),
                var_o: self.var_o.clone(),
            });
        }
        Ok(())
    }
}

/// Runs chi-squared dependence tests against a joint table.
#[derive(Debug, Clone)]
pub struct IndependenceTester {
    pub significance: f64,
    pub mode: BindingMode,
    pub generator: BindingGenerator,
}

impl Default for IndependenceTester {
    fn default() -> Self {
        IndependenceTester {
            significance: DEFAULT_SIGNIFICANCE,
            mode: BindingMode::Auto,
            generator: BindingGenerator::default(),
        }
    }
}

impl IndependenceTester {
    pub fn new(significance: f64, mode: BindingMode, generator: BindingGenerator) -> Self {
        IndependenceTester {
            significance,
            mode,
            generator,
        }
    }

    /// Tests `var_i` against `var_o` with every other variable fixed by `binding`.
    pub fn test_dependent(
        &self,
        var_i: &str,
        var_o: &str,
        binding: &Binding,
        table: &mut JointTable,
    ) -> TestOutcome {
        let i_ids = BINARY_VALUES.map(|value| table.bind(var_i, value));
        let o_ids = BINARY_VALUES.map(|value| table.bind(var_o, value));

        let count = |a: usize, b: usize| {
            let mut event = binding.clone();
            event.insert(i_ids[a]);
            event.insert(o_ids[b]);
            table.count_matching(&event)
        };
        let contingency = ContingencyTable {
            x00: count(0, 0),
            x01: count(0, 1),
            x10: count(1, 0),
            x11: count(1, 1),
        };

        let statistic = contingency.statistic();
        let p_value = chi_squared_p_value(statistic);
        trace!("Test statistic: {}", statistic);
        trace!("p_val: {}", p_value);

        let outcome = TestOutcome {
            var_i: var_i.to_string(),
            var_o: var_o.to_string(),
            table: contingency,
            statistic,
            p_value,
            dependent: p_value <= self.significance,
        };
        if outcome.is_degenerate() {
            trace!(
                "No rows match {} / {} under [{}]",
                var_i,
                var_o,
                table.registry().describe(binding)
            );
        }
        outcome
    }

    /// Dependent if any generated binding of `conditioning` shows dependence.
    ///
    /// In sampling mode a negative answer is evidence of independence, not proof.
    pub fn conditionally_dependent<R: Rng + ?Sized>(
        &self,
        var_i: &str,
        var_o: &str,
        conditioning: &[String],
        table: &mut JointTable,
        rng: &mut R,
    ) -> bool {
        debug!(
            "Checking - {} conditionally independent of {} given [{}]",
            var_i,
            var_o,
            conditioning.join(", ")
        );
        let bindings = self
            .generator
            .generate(conditioning, self.mode, table.registry_mut(), rng);

        bindings
            .iter()
            .any(|binding| self.test_dependent(var_i, var_o, binding, table).dependent)
    }
}
