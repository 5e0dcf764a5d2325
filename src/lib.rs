//! Multi-objective placement of emergency-response devices with MOEA/D.
//!
//! Candidate sites receive devices under a budget; some sites may already
//! hold one. The search trades expected event coverage against cost:
//!
//! - **Instances** ([`instance`]): candidate sites, pre-installed devices,
//!   budget, coverage radius and unit costs, read from AMPL-style `.dat`
//!   files, plus the coverage/cost evaluators.
//! - **MOEA/D** ([`moead`]): decomposition into weighted subproblems,
//!   neighborhood mating, scalarized replacement and installation-vector
//!   operators under a fixed-site or flexible representation policy.
//! - **Outputs** ([`output`]): population snapshots and the execution log.
//!
//! Every random decision draws from one seeded generator ([`random`]), so
//! a seed and a configuration determine the whole run.
//!
//! # Example
//!
//! ```
//! use moead_drp::instance::{ObjectiveKind, ProblemInstance, Site};
//! use moead_drp::moead::{MoeadConfig, MoeadRunner, NoSnapshots, WeightTable};
//!
//! let sites = (0..10)
//!     .map(|i| Site { event_probability: 0.1, ..Site::new(i, i as f64, 0.0) })
//!     .collect();
//! let instance = ProblemInstance::new("demo", sites, 4.0, 1.0, 1.0, 0.5);
//! let config = MoeadConfig::default()
//!     .with_population_size(10)
//!     .with_neighborhood_size(3)
//!     .with_max_evaluations(200)
//!     .with_seed(7);
//!
//! let evaluator = ObjectiveKind::Coverage;
//! let mut runner = MoeadRunner::new(&instance, &evaluator, config, WeightTable::uniform(2, 9))?;
//! let result = runner.run(&mut NoSnapshots)?;
//! for ind in result.front() {
//!     assert!(ind.installed_count() <= instance.max_installed());
//! }
//! # Ok::<(), moead_drp::MoeadError>(())
//! ```

pub mod error;
pub mod instance;
pub mod moead;
pub mod output;
pub mod random;

pub use error::{MoeadError, Result};
