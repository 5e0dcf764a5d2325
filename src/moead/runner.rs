//! MOEA/D generational loop.
//!
//! [`MoeadRunner`] owns the population of subproblems and drives it through
//! `Uninitialized → Initialized → Evolving → Terminated`:
//! initialization → neighborhoods → (mate → vary → evaluate → update
//! reference → update neighbors) per subproblem → repeat until the
//! evaluation budget is spent.

use super::config::MoeadConfig;
use super::neighborhood::build_neighborhoods;
use super::operators::{installation_crossover, installation_mutation, random_installation};
use super::pareto::non_dominated_front;
use super::scalarize::{nadir_point, normalize_objectives, normalize_sum};
use super::types::{Evaluator, Individual, SnapshotSink, Subproblem};
use super::weights::WeightTable;
use crate::error::{MoeadError, Result};
use crate::instance::ProblemInstance;
use crate::random::{create_rng, random_permutation, uniform, MoeadRng};
use rand::Rng;
use std::path::PathBuf;
use tracing::{debug, info, trace};

/// Lifecycle of a [`MoeadRunner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Created; no population yet.
    Uninitialized,
    /// Population built, neighborhoods computed, ideal point seeded.
    Initialized,
    /// At least one generation has run.
    Evolving,
    /// Budget spent; population handed over to the result.
    Terminated,
}

/// Counters for one generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Children produced in this generation.
    pub children: usize,
    /// Neighbor replacements made by those children.
    pub replacements: usize,
    /// Children changed by mutation.
    pub mutations: usize,
    /// Total evaluations after this generation.
    pub evaluations: usize,
}

/// Result of a MOEA/D run.
#[derive(Debug, Clone)]
pub struct MoeadResult {
    /// Final subproblems, in weight-table order.
    pub population: Vec<Subproblem>,

    /// Ideal point at termination.
    pub ideal_point: Vec<f64>,

    /// Generations executed (the last one may be partial).
    pub generations: usize,

    /// Objective evaluations, initialization included.
    pub evaluations: usize,

    /// Ideal point after initialization and after each generation.
    pub ideal_history: Vec<Vec<f64>>,
}

impl MoeadResult {
    /// Best individuals of all subproblems.
    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.population.iter().map(|sp| &sp.best)
    }

    /// Non-dominated individuals of the final population, duplicates
    /// reported once.
    pub fn front(&self) -> Vec<&Individual> {
        let objectives: Vec<&[f64]> = self
            .population
            .iter()
            .map(|sp| sp.best.objectives.as_slice())
            .collect();
        non_dominated_front(&objectives)
            .into_iter()
            .map(|i| &self.population[i].best)
            .collect()
    }
}

/// Executes MOEA/D on one problem instance.
///
/// # Usage
///
/// ```
/// use moead_drp::instance::{CoverageCost, ProblemInstance, Site};
/// use moead_drp::moead::{MoeadConfig, MoeadRunner, NoSnapshots, WeightTable};
///
/// let sites = (0..8)
///     .map(|i| Site { event_probability: 0.125, ..Site::new(i, i as f64, 0.0) })
///     .collect();
/// let instance = ProblemInstance::new("line", sites, 3.0, 1.5, 1.0, 0.5);
/// let config = MoeadConfig::default()
///     .with_population_size(6)
///     .with_neighborhood_size(3)
///     .with_max_evaluations(60)
///     .with_seed(42);
///
/// let mut runner = MoeadRunner::new(&instance, &CoverageCost, config, WeightTable::uniform(2, 5))?;
/// let result = runner.run(&mut NoSnapshots)?;
/// assert_eq!(result.evaluations, 60);
/// assert!(!result.front().is_empty());
/// # Ok::<(), moead_drp::MoeadError>(())
/// ```
pub struct MoeadRunner<'a, E: Evaluator + ?Sized> {
    instance: &'a ProblemInstance,
    evaluator: &'a E,
    config: MoeadConfig,
    weights: WeightTable,
    rng: MoeadRng,
    population: Vec<Subproblem>,
    ideal_point: Vec<f64>,
    nadir_point: Vec<f64>,
    evaluations: usize,
    generation: usize,
    state: EngineState,
    ideal_history: Vec<Vec<f64>>,
}

impl<'a, E: Evaluator + ?Sized> MoeadRunner<'a, E> {
    /// Creates a runner.
    ///
    /// Fails with [`MoeadError::Config`] if the configuration is invalid and
    /// with [`MoeadError::WeightTable`] if the table does not have one row
    /// per subproblem and one column per objective.
    pub fn new(
        instance: &'a ProblemInstance,
        evaluator: &'a E,
        config: MoeadConfig,
        weights: WeightTable,
    ) -> Result<Self> {
        config.validate().map_err(MoeadError::Config)?;

        let m = evaluator.objective_count();
        let table = || PathBuf::from(WeightTable::file_name(m, config.population_size));
        if weights.len() != config.population_size {
            return Err(MoeadError::WeightTable {
                path: table(),
                message: format!(
                    "{} rows, expected {}",
                    weights.len(),
                    config.population_size
                ),
            });
        }
        if weights.objectives() != m {
            return Err(MoeadError::WeightTable {
                path: table(),
                message: format!("{} columns, expected {m}", weights.objectives()),
            });
        }
        if instance.site_count() == 0 {
            return Err(MoeadError::Config("instance has no candidate sites".into()));
        }

        let rng = create_rng(config.seed.unwrap_or_else(rand::random));

        Ok(Self {
            instance,
            evaluator,
            config,
            weights,
            rng,
            population: Vec::new(),
            ideal_point: Vec::new(),
            nadir_point: Vec::new(),
            evaluations: 0,
            generation: 0,
            state: EngineState::Uninitialized,
            ideal_history: Vec::new(),
        })
    }

    /// Builds and evaluates the initial population, seeds the ideal point
    /// and computes neighborhoods.
    ///
    /// Every subproblem receives an individual even when the evaluation
    /// budget is smaller than the population.
    ///
    /// # Panics
    /// Panics if called twice.
    pub fn initialize(&mut self) {
        assert_eq!(
            self.state,
            EngineState::Uninitialized,
            "engine is already initialized"
        );
        let m = self.evaluator.objective_count();
        let n = self.config.population_size;

        self.evaluations = 0;
        self.generation = 0;
        self.ideal_point = vec![f64::INFINITY; m];
        self.population = Vec::with_capacity(n);

        for i in 0..n {
            let decision =
                random_installation(self.instance, self.config.initial_fill, &mut self.rng);
            let mut best = Individual::from_decision(decision, m);
            best.evaluate(self.instance, self.evaluator);
            self.evaluations += 1;
            self.update_reference(&best.objectives);
            self.population
                .push(Subproblem::new(best, self.weights.row(i).to_vec()));
        }

        let neighborhoods = build_neighborhoods(self.weights.rows(), self.config.neighborhood_size);
        for (sp, neighbors) in self.population.iter_mut().zip(neighborhoods) {
            sp.neighbors = neighbors;
        }

        self.ideal_history.clear();
        self.ideal_history.push(self.ideal_point.clone());
        self.state = EngineState::Initialized;

        info!(
            instance = self.instance.name(),
            population = n,
            neighborhood = self.config.neighborhood_size,
            policy = ?self.config.policy,
            budget = self.instance.budget(),
            ideal = ?self.ideal_point,
            "population initialized"
        );
    }

    /// Runs one generation: every subproblem, in random order, produces one
    /// child unless the budget runs out first.
    ///
    /// Returns zeroed counters when the budget is already spent.
    ///
    /// # Panics
    /// Panics if the engine is not initialized or already terminated.
    pub fn evolve_generation(&mut self) -> GenerationStats {
        assert!(
            matches!(self.state, EngineState::Initialized | EngineState::Evolving),
            "engine must be initialized and not terminated, state is {:?}",
            self.state
        );
        if self.is_terminated() {
            return GenerationStats {
                generation: self.generation,
                evaluations: self.evaluations,
                ..GenerationStats::default()
            };
        }

        self.state = EngineState::Evolving;
        self.generation += 1;
        let mut stats = GenerationStats {
            generation: self.generation,
            ..GenerationStats::default()
        };

        let m = self.evaluator.objective_count();
        for id in random_permutation(self.population.len(), &mut self.rng) {
            let (p1, p2) = self.select_mating_pool(id);

            let decision = if uniform(&mut self.rng) <= self.config.crossover_rate {
                installation_crossover(
                    &self.population[p1].best.decision,
                    &self.population[p2].best.decision,
                    self.instance,
                    self.config.policy,
                    &mut self.rng,
                )
            } else {
                self.population[p1].best.decision.clone()
            };
            let mut child = Individual::from_decision(decision, m);

            let outcome = installation_mutation(
                &mut child.decision,
                self.instance,
                self.config.policy,
                self.config.mutation_rate,
                self.config.op1_probability,
                &mut self.rng,
            );
            if outcome.changed() {
                stats.mutations += 1;
            }

            child.evaluate(self.instance, self.evaluator);
            self.evaluations += 1;
            stats.children += 1;

            self.update_reference(&child.objectives);
            stats.replacements += self.update_problem(&child, id);

            if self.is_terminated() {
                break;
            }
        }

        stats.evaluations = self.evaluations;
        self.ideal_history.push(self.ideal_point.clone());

        debug!(
            generation = stats.generation,
            evaluations = stats.evaluations,
            children = stats.children,
            replacements = stats.replacements,
            mutations = stats.mutations,
            ideal = ?self.ideal_point,
            "generation complete"
        );
        stats
    }

    /// Whether the evaluation budget is spent.
    pub fn is_terminated(&self) -> bool {
        self.evaluations >= self.config.max_evaluations
    }

    /// Picks two distinct subproblems from the neighborhood of `id`,
    /// uniformly with rejection of repeats.
    pub fn select_mating_pool(&mut self, id: usize) -> (usize, usize) {
        let neighbors = &self.population[id].neighbors;
        assert!(neighbors.len() >= 2, "mating needs at least two neighbors");

        let first = neighbors[self.rng.random_range(0..neighbors.len())];
        loop {
            let second = neighbors[self.rng.random_range(0..neighbors.len())];
            if second != first {
                return (first, second);
            }
        }
    }

    /// Lowers each ideal-point component above the matching objective.
    pub fn update_reference(&mut self, objectives: &[f64]) {
        assert_eq!(
            objectives.len(),
            self.ideal_point.len(),
            "objective and ideal dimensions differ"
        );
        for (z, &f) in self.ideal_point.iter_mut().zip(objectives) {
            if f < *z {
                *z = f;
            }
        }
    }

    /// Replaces the best individual of every neighbor of `id` whose
    /// scalarized value the child strictly improves. Returns the number of
    /// replacements.
    pub fn update_problem(&mut self, child: &Individual, id: usize) -> usize {
        let scalarization = self.config.scalarization;
        let mut replaced = 0;

        for k in 0..self.population[id].neighbors.len() {
            let nb = self.population[id].neighbors[k];
            let sp = &self.population[nb];
            let current = scalarization.apply(&sp.best.objectives, &sp.weight, &self.ideal_point);
            let candidate = scalarization.apply(&child.objectives, &sp.weight, &self.ideal_point);

            if candidate < current {
                trace!(subproblem = nb, current, candidate, "neighbor replaced");
                self.population[nb].best = child.clone();
                replaced += 1;
            }
        }
        replaced
    }

    /// Recomputes the nadir estimate from the current best individuals.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn find_nadir_point(&mut self) -> &[f64] {
        let objectives: Vec<&[f64]> = self
            .population
            .iter()
            .map(|sp| sp.best.objectives.as_slice())
            .collect();
        self.nadir_point = nadir_point(&objectives);
        &self.nadir_point
    }

    /// Rescales every weight by the ideal–nadir range into
    /// `weight_normalized`, summing to one.
    ///
    /// # Panics
    /// Panics if the nadir point has not been computed.
    pub fn normalize_weights(&mut self) {
        assert_eq!(
            self.nadir_point.len(),
            self.ideal_point.len(),
            "nadir point must be computed first"
        );
        for sp in &mut self.population {
            sp.weight_normalized = sp
                .weight
                .iter()
                .zip(&self.nadir_point)
                .zip(&self.ideal_point)
                .map(|((&w, &n), &z)| w * (n - z))
                .collect();
            normalize_sum(&mut sp.weight_normalized);
        }
    }

    /// Objectives mapped by the current ideal and nadir points.
    ///
    /// # Panics
    /// Panics if the nadir point has not been computed.
    pub fn normalized_objectives(&self, objectives: &[f64]) -> Vec<f64> {
        normalize_objectives(objectives, &self.ideal_point, &self.nadir_point)
    }

    /// Runs to termination, saving snapshots through `sink` every
    /// `snapshot_interval` generations and once at the end.
    ///
    /// Initializes first if needed.
    ///
    /// # Panics
    /// Panics if the runner already terminated.
    pub fn run(&mut self, sink: &mut dyn SnapshotSink) -> Result<MoeadResult> {
        if self.state == EngineState::Uninitialized {
            self.initialize();
        }
        assert_ne!(self.state, EngineState::Terminated, "engine already terminated");

        let interval = self.config.snapshot_interval;
        while !self.is_terminated() {
            self.evolve_generation();
            if self.is_terminated() {
                break;
            }
            if interval > 0 && self.generation % interval == 0 {
                sink.save(self.generation, &self.population)?;
            }
        }

        sink.save(self.generation, &self.population)?;
        Ok(self.terminate())
    }

    /// Moves population and ideal point into the result.
    fn terminate(&mut self) -> MoeadResult {
        self.state = EngineState::Terminated;
        info!(
            instance = self.instance.name(),
            generations = self.generation,
            evaluations = self.evaluations,
            ideal = ?self.ideal_point,
            "run terminated"
        );
        MoeadResult {
            population: std::mem::take(&mut self.population),
            ideal_point: std::mem::take(&mut self.ideal_point),
            generations: self.generation,
            evaluations: self.evaluations,
            ideal_history: std::mem::take(&mut self.ideal_history),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn population(&self) -> &[Subproblem] {
        &self.population
    }

    pub fn ideal_point(&self) -> &[f64] {
        &self.ideal_point
    }

    pub fn nadir_point(&self) -> &[f64] {
        &self.nadir_point
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn config(&self) -> &MoeadConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{CoverageCost, Site};
    use crate::moead::config::RepresentationPolicy;
    use crate::moead::types::NoSnapshots;

    fn grid_instance(n: usize, preinstalled: &[usize], budget: f64) -> ProblemInstance {
        let sites = (0..n)
            .map(|i| Site {
                preinstalled: preinstalled.contains(&i),
                event_probability: 1.0 / n as f64,
                ..Site::new(i, (i % 5) as f64 * 10.0, (i / 5) as f64 * 10.0)
            })
            .collect();
        ProblemInstance::new("grid", sites, budget, 12.0, 1.0, 0.5)
    }

    fn config(pop: usize, t: usize, evals: usize) -> MoeadConfig {
        MoeadConfig::default()
            .with_population_size(pop)
            .with_neighborhood_size(t)
            .with_max_evaluations(evals)
            .with_mutation_rate(0.3)
            .with_seed(123)
    }

    fn weights(pop: usize) -> WeightTable {
        WeightTable::uniform(2, pop - 1)
    }

    /// Collects every snapshot generation.
    #[derive(Default)]
    struct Recorder {
        generations: Vec<usize>,
        sizes: Vec<usize>,
    }

    impl SnapshotSink for Recorder {
        fn save(&mut self, generation: usize, population: &[Subproblem]) -> Result<()> {
            self.generations.push(generation);
            self.sizes.push(population.len());
            Ok(())
        }
    }

    // ---- Construction ----

    #[test]
    fn test_new_rejects_invalid_config() {
        let inst = grid_instance(10, &[], 3.0);
        let err = MoeadRunner::new(&inst, &CoverageCost, config(10, 11, 100), weights(10))
            .err()
            .unwrap();
        assert!(matches!(err, MoeadError::Config(_)), "got {err:?}");
    }

    #[test]
    fn test_new_rejects_wrong_row_count() {
        let inst = grid_instance(10, &[], 3.0);
        let err = MoeadRunner::new(&inst, &CoverageCost, config(10, 3, 100), weights(9))
            .err()
            .unwrap();
        assert!(matches!(err, MoeadError::WeightTable { .. }), "got {err:?}");
    }

    #[test]
    fn test_new_rejects_wrong_width() {
        let inst = grid_instance(10, &[], 3.0);
        let table = WeightTable::uniform(3, 3); // 10 rows, 3 columns
        let err = MoeadRunner::new(&inst, &CoverageCost, config(10, 3, 100), table)
            .err()
            .unwrap();
        assert!(err.to_string().contains("columns"), "got {err}");
    }

    // ---- Initialization ----

    #[test]
    fn test_initialize() {
        let inst = grid_instance(15, &[3], 4.0);
        let mut runner =
            MoeadRunner::new(&inst, &CoverageCost, config(10, 4, 500), weights(10)).unwrap();
        assert_eq!(runner.state(), EngineState::Uninitialized);
        runner.initialize();

        assert_eq!(runner.state(), EngineState::Initialized);
        assert_eq!(runner.evaluations(), 10);
        assert_eq!(runner.population().len(), 10);
        for (i, sp) in runner.population().iter().enumerate() {
            assert_eq!(sp.neighbors.len(), 4);
            assert_eq!(sp.neighbors[0], i);
            assert!(sp.best.decision[3]);
            assert!(sp.best.installed_count() <= inst.max_installed());
            for (z, f) in runner.ideal_point().iter().zip(&sp.best.objectives) {
                assert!(z <= f);
            }
        }
    }

    #[test]
    #[should_panic(expected = "already initialized")]
    fn test_initialize_twice_panics() {
        let inst = grid_instance(10, &[], 3.0);
        let mut runner =
            MoeadRunner::new(&inst, &CoverageCost, config(4, 2, 50), weights(4)).unwrap();
        runner.initialize();
        runner.initialize();
    }

    #[test]
    #[should_panic(expected = "must be initialized")]
    fn test_evolve_before_initialize_panics() {
        let inst = grid_instance(10, &[], 3.0);
        let mut runner =
            MoeadRunner::new(&inst, &CoverageCost, config(4, 2, 50), weights(4)).unwrap();
        runner.evolve_generation();
    }

    // ---- Generational loop ----

    #[test]
    fn test_one_generation_counts() {
        let inst = grid_instance(10, &[], 3.0);
        let mut runner =
            MoeadRunner::new(&inst, &CoverageCost, config(8, 3, 1000), weights(8)).unwrap();
        runner.initialize();
        let before = runner.ideal_point().to_vec();
        let stats = runner.evolve_generation();

        assert_eq!(runner.state(), EngineState::Evolving);
        assert_eq!(stats.generation, 1);
        assert_eq!(stats.children, 8);
        assert_eq!(stats.evaluations, 16);
        assert_eq!(runner.evaluations(), 16);
        for (after, prev) in runner.ideal_point().iter().zip(&before) {
            assert!(after <= prev);
        }
    }

    #[test]
    fn test_mating_pool_distinct_neighbors() {
        let inst = grid_instance(10, &[], 3.0);
        let mut runner =
            MoeadRunner::new(&inst, &CoverageCost, config(10, 3, 100), weights(10)).unwrap();
        runner.initialize();
        for _ in 0..200 {
            let (a, b) = runner.select_mating_pool(4);
            assert_ne!(a, b);
            assert!(runner.population()[4].neighbors.contains(&a));
            assert!(runner.population()[4].neighbors.contains(&b));
        }
    }

    #[test]
    fn test_update_problem_replaces_improved_neighbors() {
        let inst = grid_instance(10, &[], 3.0);
        let mut runner =
            MoeadRunner::new(&inst, &CoverageCost, config(6, 3, 100), weights(6)).unwrap();
        runner.initialize();

        // a child at the ideal point beats every neighbor
        let ideal = runner.ideal_point().to_vec();
        let mut child = Individual::new(10, 2);
        child.objectives = ideal.iter().map(|z| z - 1.0).collect();
        runner.update_reference(&child.objectives);
        let replaced = runner.update_problem(&child, 2);

        assert_eq!(replaced, 3);
        for &nb in &runner.population()[2].neighbors.clone() {
            assert_eq!(runner.population()[nb].best, child);
        }
    }

    #[test]
    fn test_update_problem_keeps_better_incumbents() {
        let inst = grid_instance(10, &[], 3.0);
        let mut runner =
            MoeadRunner::new(&inst, &CoverageCost, config(6, 3, 100), weights(6)).unwrap();
        runner.initialize();

        let mut child = Individual::new(10, 2);
        child.objectives = vec![1.0e9, 1.0e9];
        assert_eq!(runner.update_problem(&child, 0), 0);
    }

    #[test]
    fn test_stops_mid_generation() {
        let inst = grid_instance(10, &[], 3.0);
        let mut runner =
            MoeadRunner::new(&inst, &CoverageCost, config(8, 3, 11), weights(8)).unwrap();
        let result = runner.run(&mut NoSnapshots).unwrap();
        assert_eq!(result.evaluations, 11);
        assert_eq!(result.generations, 1);
        assert_eq!(runner.state(), EngineState::Terminated);
    }

    #[test]
    fn test_budget_below_population_still_initializes() {
        let inst = grid_instance(10, &[], 3.0);
        let mut runner =
            MoeadRunner::new(&inst, &CoverageCost, config(8, 3, 5), weights(8)).unwrap();
        let result = runner.run(&mut NoSnapshots).unwrap();
        assert_eq!(result.population.len(), 8);
        assert_eq!(result.evaluations, 8);
        assert_eq!(result.generations, 0);
    }

    #[test]
    fn test_run_clears_engine_state() {
        let inst = grid_instance(10, &[], 3.0);
        let mut runner =
            MoeadRunner::new(&inst, &CoverageCost, config(6, 3, 60), weights(6)).unwrap();
        let result = runner.run(&mut NoSnapshots).unwrap();
        assert!(runner.population().is_empty());
        assert!(runner.ideal_point().is_empty());
        assert_eq!(result.population.len(), 6);
        assert_eq!(result.ideal_point.len(), 2);
        assert_eq!(result.ideal_history.len(), result.generations + 1);
    }

    #[test]
    fn test_snapshot_schedule() {
        let inst = grid_instance(10, &[], 3.0);
        // 4 initial + 10 generations of 4 = 44 evaluations
        let cfg = config(4, 2, 44).with_snapshot_interval(3);
        let mut runner = MoeadRunner::new(&inst, &CoverageCost, cfg, weights(4)).unwrap();
        let mut sink = Recorder::default();
        runner.run(&mut sink).unwrap();
        assert_eq!(sink.generations, vec![3, 6, 9, 10]);
        assert!(sink.sizes.iter().all(|&s| s == 4));
    }

    #[test]
    fn test_ideal_history_monotone() {
        let inst = grid_instance(20, &[], 5.0);
        let mut runner =
            MoeadRunner::new(&inst, &CoverageCost, config(10, 4, 400), weights(10)).unwrap();
        let result = runner.run(&mut NoSnapshots).unwrap();
        for pair in result.ideal_history.windows(2) {
            for (b, a) in pair[1].iter().zip(&pair[0]) {
                assert!(b <= a, "ideal point increased: {:?} -> {:?}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn test_fixed_site_policy_keeps_preinstalled() {
        let inst = grid_instance(20, &[0, 7, 13], 4.0);
        let cfg = config(10, 4, 600).with_mutation_rate(1.0);
        let mut runner = MoeadRunner::new(&inst, &CoverageCost, cfg, weights(10)).unwrap();
        let result = runner.run(&mut NoSnapshots).unwrap();
        for ind in result.individuals() {
            assert!(ind.decision[0] && ind.decision[7] && ind.decision[13]);
            assert!(ind.installed_count() <= inst.max_installed());
        }
    }

    #[test]
    fn test_flexible_policy_respects_limit() {
        let inst = grid_instance(20, &[0, 7, 13], 4.0);
        let cfg = config(10, 4, 600)
            .with_mutation_rate(1.0)
            .with_policy(RepresentationPolicy::Flexible);
        let mut runner = MoeadRunner::new(&inst, &CoverageCost, cfg, weights(10)).unwrap();
        let result = runner.run(&mut NoSnapshots).unwrap();
        for ind in result.individuals() {
            assert!(ind.installed_count() <= inst.max_installed());
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let inst = grid_instance(20, &[4], 5.0);
        let run = || {
            let mut runner =
                MoeadRunner::new(&inst, &CoverageCost, config(10, 4, 300), weights(10)).unwrap();
            runner.run(&mut NoSnapshots).unwrap()
        };
        let a = run();
        let b = run();
        assert_eq!(a.population, b.population);
        assert_eq!(a.ideal_history, b.ideal_history);
    }

    #[test]
    fn test_front_is_non_dominated() {
        let inst = grid_instance(20, &[], 6.0);
        let mut runner =
            MoeadRunner::new(&inst, &CoverageCost, config(10, 4, 300), weights(10)).unwrap();
        let result = runner.run(&mut NoSnapshots).unwrap();
        let front = result.front();
        assert!(!front.is_empty());
        for a in &front {
            for b in result.individuals() {
                assert!(!b.dominates(a));
            }
        }
    }

    // ---- Nadir / normalization ----

    #[test]
    fn test_nadir_and_normalized_weights() {
        let inst = grid_instance(20, &[], 6.0);
        let mut runner =
            MoeadRunner::new(&inst, &CoverageCost, config(10, 4, 300), weights(10)).unwrap();
        runner.initialize();
        for _ in 0..5 {
            runner.evolve_generation();
        }
        let nadir = runner.find_nadir_point().to_vec();
        assert_eq!(nadir.len(), 2);
        for (n, z) in nadir.iter().zip(runner.ideal_point()) {
            assert!(n >= z);
        }

        runner.normalize_weights();
        for sp in runner.population() {
            let s: f64 = sp.weight_normalized.iter().sum();
            if s.is_finite() {
                assert!((s - 1.0).abs() < 1e-9, "sum {s}");
            }
        }

        let normalized = runner.normalized_objectives(runner.ideal_point());
        assert!(normalized.iter().all(|&v| v == 0.0));
    }
}
