//! Command-line entry point.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use moead_drp::instance::{read_instance, ObjectiveKind};
use moead_drp::moead::{AlgorithmParams, MoeadConfig, MoeadRunner, RepresentationPolicy, WeightTable};
use moead_drp::output::{append_execution_log, prepare_output_dir, ExecutionRecord, SnapshotWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Number of objectives of both evaluators.
const OBJECTIVES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    Moead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    /// Pre-installed devices stay in place.
    #[value(alias = "fixed")]
    Location,
    /// Pre-installed devices may be moved.
    #[value(alias = "flexible")]
    Relocation,
}

impl Variant {
    fn policy(self) -> RepresentationPolicy {
        match self {
            Variant::Location => RepresentationPolicy::FixedSite,
            Variant::Relocation => RepresentationPolicy::Flexible,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProblemType {
    /// Coverage vs. installation cost.
    Cam,
    /// Coverage vs. installation and relocation cost.
    Drp,
}

impl ProblemType {
    fn objective(self) -> ObjectiveKind {
        match self {
            ProblemType::Cam => ObjectiveKind::Coverage,
            ProblemType::Drp => ObjectiveKind::Relocation,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "moead-drp")]
#[command(author, version, about = "MOEA/D for emergency-device location and relocation")]
struct Cli {
    /// Instance file (AMPL .dat)
    #[arg(long, value_name = "FILE")]
    inst: PathBuf,

    /// Random seed
    #[arg(long, default_value_t = 123)]
    seed: u64,

    /// Expected number of candidate sites; checked against the instance
    #[arg(long)]
    nvars: Option<usize>,

    /// Objective evaluation budget
    #[arg(long, default_value_t = 1000)]
    neval: usize,

    /// Algorithm
    #[arg(long, value_enum, ignore_case = true, default_value_t = Algorithm::Moead)]
    alg: Algorithm,

    /// Population size (overrides MOEAD.txt)
    #[arg(long, alias = "population")]
    pop: Option<usize>,

    /// Neighborhood size T (overrides MOEAD.txt)
    #[arg(long, short = 'T')]
    neighbor: Option<usize>,

    /// Mutation rate [0, 1]
    #[arg(long = "mut", default_value_t = 0.05)]
    mutation: f64,

    /// Crossover rate [0, 1]
    #[arg(long = "cross", default_value_t = 1.0)]
    crossover: f64,

    /// Share of delete-only mutations [0, 1]; the rest are swaps
    #[arg(long, default_value_t = 0.5)]
    op1: f64,

    /// Representation policy for pre-installed sites
    #[arg(long, value_enum, ignore_case = true, default_value_t = Variant::Location)]
    variant: Variant,

    /// Objective pair
    #[arg(long = "type", value_enum, ignore_case = true, default_value_t = ProblemType::Cam)]
    problem_type: ProblemType,

    /// Directory holding algorithms/MOEAD.txt and weightvectors/
    #[arg(long, value_name = "DIR", default_value = "SETTINGS")]
    settings: PathBuf,

    /// Snapshot directory [default: output/<instance>]
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Execution log, one appended line per run
    #[arg(long, value_name = "FILE", default_value = "execution_time.log")]
    log: PathBuf,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(false))
        .init();
}

/// Population and neighborhood sizes: CLI values win over the parameter file,
/// which is only read when one of them is missing.
fn algorithm_params(cli: &Cli) -> Result<AlgorithmParams> {
    if let (Some(population_size), Some(neighborhood_size)) = (cli.pop, cli.neighbor) {
        return Ok(AlgorithmParams {
            population_size,
            neighborhood_size,
        });
    }
    let path = cli.settings.join("algorithms").join("MOEAD.txt");
    let file = AlgorithmParams::from_file(&path)
        .with_context(|| format!("reading algorithm parameters from {}", path.display()))?;
    Ok(AlgorithmParams {
        population_size: cli.pop.unwrap_or(file.population_size),
        neighborhood_size: cli.neighbor.unwrap_or(file.neighborhood_size),
    })
}

fn instance_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "instance".to_string())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let instance = read_instance(&cli.inst)
        .with_context(|| format!("reading instance {}", cli.inst.display()))?;
    if let Some(n) = cli.nvars {
        if n != instance.site_count() {
            bail!(
                "--nvars {n} does not match the {} sites of {}",
                instance.site_count(),
                instance.name()
            );
        }
    }

    let params = algorithm_params(&cli)?;
    let config = MoeadConfig::default()
        .with_params(params)
        .with_max_evaluations(cli.neval)
        .with_mutation_rate(cli.mutation)
        .with_crossover_rate(cli.crossover)
        .with_op1_probability(cli.op1)
        .with_policy(cli.variant.policy())
        .with_seed(cli.seed);

    let weight_dir = cli.settings.join("weightvectors");
    let weights = WeightTable::load(&weight_dir, OBJECTIVES, config.population_size)
        .with_context(|| format!("loading weight vectors from {}", weight_dir.display()))?;

    let stem = instance_stem(&cli.inst);
    let output_dir = cli
        .output
        .clone()
        .unwrap_or_else(|| Path::new("output").join(&stem));
    let removed = prepare_output_dir(&output_dir)?;

    info!(
        instance = instance.name(),
        sites = instance.site_count(),
        preinstalled = instance.preinstalled_count(),
        budget = instance.budget(),
        algorithm = ?cli.alg,
        problem_type = ?cli.problem_type,
        variant = ?cli.variant,
        seed = cli.seed,
        evaluations = cli.neval,
        population = config.population_size,
        neighborhood = config.neighborhood_size,
        mutation = cli.mutation,
        op1 = cli.op1,
        crossover = cli.crossover,
        output = %output_dir.display(),
        stale_snapshots_removed = removed,
        "starting run"
    );

    let evaluator = cli.problem_type.objective();
    let mut runner = MoeadRunner::new(&instance, &evaluator, config, weights)?;
    let mut writer = SnapshotWriter::new(&output_dir, &stem, 1);

    let start = Instant::now();
    let result = runner.run(&mut writer)?;
    let elapsed = start.elapsed().as_secs_f64();

    info!(
        generations = result.generations,
        evaluations = result.evaluations,
        front = result.front().len(),
        ideal = ?result.ideal_point,
        snapshots = writer.saves(),
        seconds = elapsed,
        "run finished"
    );

    let record = ExecutionRecord {
        instance: instance.name().to_string(),
        problem_type: format!("{:?}", cli.problem_type).to_lowercase(),
        variant: format!("{:?}", cli.variant).to_lowercase(),
        variables: instance.site_count(),
        evaluations: cli.neval,
        seed: cli.seed,
        mutation_rate: cli.mutation,
        op1_probability: cli.op1,
        crossover_rate: cli.crossover,
        elapsed_secs: elapsed,
    };
    append_execution_log(&cli.log, &record)
        .with_context(|| format!("appending to {}", cli.log.display()))?;

    Ok(())
}
