use crate::bbn::model::variable::{BINARY_VALUES, Binding, VariableId, VariableRegistry};
use clap::ValueEnum;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default number of bindings above which `Auto` switches to sampling.
pub const DEFAULT_BINDINGS_THRESHOLD: usize = 30;

/// Default fraction of the full binding space drawn when sampling.
pub const DEFAULT_SAMPLE_FRACTION: f64 = 0.8;

/// Upper bound on the number of bindings drawn in sampling mode.
pub const DEFAULT_MAX_SAMPLES: usize = 10_000;

/// How conditioning bindings are produced.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BindingMode {
    /// Exhaustive up to the threshold, random sampling beyond it.
    #[default]
    Auto,
    /// Every combination of 0/1 over the conditioning variables.
    Exhaustive,
    /// A fixed number of uniformly drawn combinations, with replacement.
    RandomSample,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    pub threshold: usize,
    pub sample_fraction: f64,
    pub max_samples: usize,
}

impl Default for BindingConfig {
    fn default() -> Self {
        BindingConfig {
            threshold: DEFAULT_BINDINGS_THRESHOLD,
            sample_fraction: DEFAULT_SAMPLE_FRACTION,
            max_samples: DEFAULT_MAX_SAMPLES,
        }
    }
}

/// Produces bindings of binary conditioning variables.
#[derive(Debug, Clone, Default)]
pub struct BindingGenerator {
    pub config: BindingConfig,
}

impl BindingGenerator {
    pub fn new(config: BindingConfig) -> Self {
        BindingGenerator { config }
    }

    /// 2^n, saturating for very large n.
    pub fn total_bindings(count: usize) -> f64 {
        2f64.powi(count.min(i32::MAX as usize) as i32)
    }

    /// Number of bindings drawn in sampling mode for `count` variables,
    /// never more than `max_samples`.
    pub fn sample_size(&self, count: usize) -> usize {
        let wanted = (self.config.sample_fraction * Self::total_bindings(count)).floor();
        if wanted >= self.config.max_samples as f64 {
            self.config.max_samples
        } else {
            wanted as usize
        }
    }

    /// Bindings over `names`. With no names the result is a single empty binding.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        names: &[String],
        mode: BindingMode,
        registry: &mut VariableRegistry,
        rng: &mut R,
    ) -> Vec<Binding> {
        debug!("Generating bindings for variables: {}", names.join(", "));
        if names.is_empty() {
            return vec![Binding::new()];
        }

        let pairs: Vec<[VariableId; 2]> = names
            .iter()
            .map(|name| BINARY_VALUES.map(|value| registry.intern(name, value)))
            .collect();

        let sample = match mode {
            BindingMode::Exhaustive => false,
            BindingMode::RandomSample => true,
            BindingMode::Auto => Self::total_bindings(names.len()) > self.config.threshold as f64,
        };

        if sample {
            let count = self.sample_size(names.len());
            debug!("Sampling bindings - acquiring {} samples", count);
            (0..count)
                .map(|_| {
                    pairs
                        .iter()
                        .map(|pair| pair[usize::from(rng.gen_bool(0.5))])
                        .collect()
                })
                .collect()
        } else {
            Self::cartesian(&pairs)
        }
    }

    fn cartesian(pairs: &[[VariableId; 2]]) -> Vec<Binding> {
        let mut bindings = vec![Binding::new()];
        for pair in pairs {
            let mut extended = Vec::with_capacity(bindings.len() * 2);
            for binding in &bindings {
                for id in pair {
                    let mut next = binding.clone();
                    next.insert(*id);
                    extended.push(next);
                }
            }
            bindings = extended;
        }
        bindings
    }
}
