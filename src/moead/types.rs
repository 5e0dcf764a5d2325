//! Core types of the MOEA/D engine.
//!
//! - [`Evaluator`]: maps a decision vector to an objective vector
//! - [`Individual`]: a decision vector with its objective vector
//! - [`Subproblem`]: a weight vector, its best individual and its neighbors
//! - [`SnapshotSink`]: receives population snapshots during a run

use super::pareto::{self, DOMINANCE_TOLERANCE};
use crate::error::Result;
use crate::instance::ProblemInstance;

/// Computes the objective vector of an installation vector.
///
/// All objectives are **minimized**. Implementations must write exactly
/// [`objective_count`](Evaluator::objective_count) values and must not
/// depend on anything but the instance and the decision vector.
///
/// # Implementing
///
/// ```
/// use moead_drp::instance::ProblemInstance;
/// use moead_drp::moead::Evaluator;
///
/// /// Minimize installed count and maximize installed x-coordinates.
/// struct CountAndSpread;
///
/// impl Evaluator for CountAndSpread {
///     fn objective_count(&self) -> usize { 2 }
///
///     fn evaluate(&self, instance: &ProblemInstance, decision: &[bool], out: &mut [f64]) {
///         let mut count = 0.0;
///         let mut spread = 0.0;
///         for (site, &bit) in instance.sites().iter().zip(decision) {
///             if bit {
///                 count += 1.0;
///                 spread += site.x;
///             }
///         }
///         out[0] = count;
///         out[1] = -spread;
///     }
/// }
/// ```
pub trait Evaluator {
    /// Number of objectives (M).
    fn objective_count(&self) -> usize;

    /// Writes the objectives of `decision` into `objectives`.
    fn evaluate(&self, instance: &ProblemInstance, decision: &[bool], objectives: &mut [f64]);
}

/// A candidate installation and its objective vector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    /// One bit per candidate site; `true` means a device is installed.
    pub decision: Vec<bool>,
    /// Objective values, valid after [`evaluate`](Individual::evaluate).
    pub objectives: Vec<f64>,
}

impl Individual {
    /// Creates an individual with all bits cleared and zero objectives.
    pub fn new(site_count: usize, objective_count: usize) -> Self {
        Self {
            decision: vec![false; site_count],
            objectives: vec![0.0; objective_count],
        }
    }

    /// Wraps a decision vector; objectives are zero until evaluated.
    pub fn from_decision(decision: Vec<bool>, objective_count: usize) -> Self {
        Self {
            decision,
            objectives: vec![0.0; objective_count],
        }
    }

    /// Recomputes the objective vector in place.
    pub fn evaluate<E: Evaluator + ?Sized>(&mut self, instance: &ProblemInstance, evaluator: &E) {
        evaluator.evaluate(instance, &self.decision, &mut self.objectives);
    }

    /// Number of installed sites.
    pub fn installed_count(&self) -> usize {
        self.decision.iter().filter(|&&b| b).count()
    }

    /// Indices of installed sites, ascending.
    pub fn installed_sites(&self) -> Vec<usize> {
        self.decision
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
            .collect()
    }

    /// Pareto dominance on objectives.
    pub fn dominates(&self, other: &Individual) -> bool {
        pareto::dominates(&self.objectives, &other.objectives)
    }

    /// Pareto dominance allowing a `1e-4` slack per objective.
    pub fn loosely_dominates(&self, other: &Individual) -> bool {
        pareto::dominates_within(&self.objectives, &other.objectives, DOMINANCE_TOLERANCE)
    }

    /// Equal objective vectors.
    pub fn same_objectives(&self, other: &Individual) -> bool {
        self.objectives == other.objectives
    }
}

/// One decomposition unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Subproblem {
    /// Best individual found for this direction.
    pub best: Individual,
    /// Decomposition direction, fixed for the run.
    pub weight: Vec<f64>,
    /// Weight rescaled by the ideal–nadir range, for normalized PBI.
    pub weight_normalized: Vec<f64>,
    /// Closest subproblems in weight space, closest first (self included).
    pub neighbors: Vec<usize>,
}

impl Subproblem {
    /// Creates a subproblem with no neighbors yet.
    pub fn new(best: Individual, weight: Vec<f64>) -> Self {
        let weight_normalized = vec![0.0; weight.len()];
        Self {
            best,
            weight,
            weight_normalized,
            neighbors: Vec::new(),
        }
    }
}

/// Receives the population at snapshot points of a run.
pub trait SnapshotSink {
    /// Persists the population as of `generation`.
    fn save(&mut self, generation: usize, population: &[Subproblem]) -> Result<()>;
}

/// A sink that discards every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnapshots;

impl SnapshotSink for NoSnapshots {
    fn save(&mut self, _generation: usize, _population: &[Subproblem]) -> Result<()> {
        Ok(())
    }
}
