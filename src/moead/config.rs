//! MOEA/D configuration.
//!
//! [`MoeadConfig`] holds every parameter of a run. [`AlgorithmParams`]
//! reads the population and neighborhood sizes from a parameter file.

use super::scalarize::Scalarization;
use crate::error::{MoeadError, Result};
use std::path::Path;

/// How variation operators treat pre-installed sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RepresentationPolicy {
    /// Pre-installed sites stay installed ("location", no relocation).
    #[default]
    FixedSite,
    /// Any installed site may be removed ("relocation").
    Flexible,
}

impl RepresentationPolicy {
    /// Whether pre-installed bits are protected from being cleared.
    pub fn protects_preinstalled(self) -> bool {
        matches!(self, RepresentationPolicy::FixedSite)
    }
}

/// How many new sites an initial individual receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialFill {
    /// Exactly the instance budget (or every free site if fewer).
    #[default]
    Budget,
    /// A count drawn uniformly from `0..=budget` per individual.
    Sampled,
}

/// Configuration for the MOEA/D engine.
///
/// # Defaults
///
/// ```
/// use moead_drp::moead::{MoeadConfig, RepresentationPolicy};
///
/// let config = MoeadConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.neighborhood_size, 20);
/// assert_eq!(config.policy, RepresentationPolicy::FixedSite);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use moead_drp::moead::{MoeadConfig, RepresentationPolicy};
///
/// let config = MoeadConfig::default()
///     .with_population_size(50)
///     .with_neighborhood_size(10)
///     .with_max_evaluations(5_000)
///     .with_policy(RepresentationPolicy::Flexible)
///     .with_seed(123);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoeadConfig {
    /// Number of subproblems (one weight vector each).
    pub population_size: usize,

    /// Number of closest subproblems used for mating and replacement (T).
    pub neighborhood_size: usize,

    /// Objective evaluations allowed, initialization included.
    pub max_evaluations: usize,

    /// Probability of recombining the two mates (0.0–1.0).
    ///
    /// When crossover is skipped the child copies the first mate.
    pub crossover_rate: f64,

    /// Probability of mutating a child (0.0–1.0).
    pub mutation_rate: f64,

    /// Share of mutations that only delete a site (0.0–1.0).
    ///
    /// The remaining `1 - op1_probability` delete and then install
    /// a different site (swap).
    pub op1_probability: f64,

    /// Pre-installed site handling for crossover and mutation.
    pub policy: RepresentationPolicy,

    /// Scalarizing function used when updating neighbors.
    pub scalarization: Scalarization,

    /// Size of the initial installations.
    pub initial_fill: InitialFill,

    /// Save the population every this many generations (0 disables).
    ///
    /// The final population is always saved.
    pub snapshot_interval: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for MoeadConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            neighborhood_size: 20,
            max_evaluations: 1000,
            crossover_rate: 1.0,
            mutation_rate: 0.05,
            op1_probability: 0.5,
            policy: RepresentationPolicy::default(),
            scalarization: Scalarization::default(),
            initial_fill: InitialFill::default(),
            snapshot_interval: 25,
            seed: None,
        }
    }
}

impl MoeadConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the neighborhood size.
    pub fn with_neighborhood_size(mut self, t: usize) -> Self {
        self.neighborhood_size = t;
        self
    }

    /// Sets population and neighborhood sizes from a parameter file.
    pub fn with_params(self, params: AlgorithmParams) -> Self {
        self.with_population_size(params.population_size)
            .with_neighborhood_size(params.neighborhood_size)
    }

    /// Sets the evaluation budget.
    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the delete-only share of mutations.
    pub fn with_op1_probability(mut self, p: f64) -> Self {
        self.op1_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the representation policy.
    pub fn with_policy(mut self, policy: RepresentationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the scalarizing function used for replacement.
    pub fn with_scalarization(mut self, scalarization: Scalarization) -> Self {
        self.scalarization = scalarization;
        self
    }

    /// Sets the initial fill mode.
    pub fn with_initial_fill(mut self, fill: InitialFill) -> Self {
        self.initial_fill = fill;
        self
    }

    /// Sets the snapshot interval in generations (0 disables).
    pub fn with_snapshot_interval(mut self, generations: usize) -> Self {
        self.snapshot_interval = generations;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.neighborhood_size < 2 {
            return Err("neighborhood_size must be at least 2 to select two mates".into());
        }
        if self.neighborhood_size > self.population_size {
            return Err(format!(
                "neighborhood_size ({}) exceeds population_size ({})",
                self.neighborhood_size, self.population_size
            ));
        }
        if self.max_evaluations == 0 {
            return Err("max_evaluations must be at least 1".into());
        }
        if let Scalarization::Pbi { theta } = self.scalarization {
            if !(theta >= 0.0) {
                return Err("PBI theta must be non-negative".into());
            }
        }
        Ok(())
    }
}

/// Population and neighborhood sizes read from a parameter file.
///
/// The file holds the two values as its first two whitespace-separated
/// tokens; anything after them is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmParams {
    pub population_size: usize,
    pub neighborhood_size: usize,
}

impl AlgorithmParams {
    /// Reads the parameter file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| MoeadError::io(path, e))?;
        Self::parse(&path.display().to_string(), &content)
    }

    /// Parses parameter text. `file` is only used in error messages.
    pub fn parse(file: &str, content: &str) -> Result<Self> {
        let mut tokens = content.split_whitespace();
        let mut next = |what: &str| -> Result<usize> {
            let tok = tokens
                .next()
                .ok_or_else(|| MoeadError::parse(file, 1, format!("missing {what}")))?;
            tok.parse()
                .map_err(|_| MoeadError::parse(file, 1, format!("invalid {what} `{tok}`")))
        };
        let population_size = next("population size")?;
        let neighborhood_size = next("neighborhood size")?;
        Ok(Self {
            population_size,
            neighborhood_size,
        })
    }
}
