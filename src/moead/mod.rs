//! MOEA/D: multi-objective evolutionary algorithm based on decomposition.
//!
//! The multi-objective problem is split into one scalar subproblem per
//! weight vector. Each subproblem keeps the best individual found for its
//! direction and cooperates with the subproblems whose weights are closest
//! (its neighborhood): parents are drawn from the neighborhood and a child
//! replaces every neighbor it improves under the scalarizing function.
//!
//! Decision vectors are binary installation vectors, one bit per candidate
//! site; the objective function is supplied through [`Evaluator`].
//!
//! # Core Traits
//!
//! - [`Evaluator`]: objective vector of a decision vector
//! - [`SnapshotSink`]: receives the population at snapshot points
//!
//! # Key Types
//!
//! - [`MoeadConfig`]: algorithm parameters and representation policy
//! - [`MoeadRunner`]: executes the generational loop
//! - [`MoeadResult`]: final population, ideal point and statistics
//! - [`WeightTable`]: decomposition weight vectors
//!
//! # Submodules
//!
//! - [`scalarize`]: Tchebycheff and PBI scalarizing functions, nadir estimate
//! - [`neighborhood`]: closest-weight neighborhoods
//! - [`operators`]: installation crossover/mutation, SBX and polynomial mutation
//! - [`pareto`]: dominance tests and non-dominated filtering
//! - [`weights`]: weight-table files and simplex-lattice generation
//!
//! # References
//!
//! - Zhang & Li (2007), "MOEA/D: A Multiobjective Evolutionary Algorithm
//!   Based on Decomposition", IEEE TEVC 11(6)
//! - Das & Dennis (1998), "Normal-Boundary Intersection"

mod config;
pub mod neighborhood;
pub mod operators;
pub mod pareto;
mod runner;
pub mod scalarize;
mod types;
pub mod weights;

pub use config::{AlgorithmParams, InitialFill, MoeadConfig, RepresentationPolicy};
pub use operators::MutationOutcome;
pub use runner::{EngineState, GenerationStats, MoeadResult, MoeadRunner};
pub use scalarize::Scalarization;
pub use types::{Evaluator, Individual, NoSnapshots, SnapshotSink, Subproblem};
pub use weights::WeightTable;
