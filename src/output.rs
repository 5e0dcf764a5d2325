//! Run outputs: population snapshots and the execution log.
//!
//! A snapshot file has one line per subproblem: the objective values of
//! its best individual, optionally followed by `|` and the 0-based indices
//! of the installed sites.
//!
//! ```text
//! -0.625  3  | 1 4 9
//! -0.5  2  | 4 7
//! ```

use crate::error::{MoeadError, Result};
use crate::moead::{SnapshotSink, Subproblem};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SITE_SEPARATOR: &str = "|";

/// One subproblem's line in a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRow {
    pub objectives: Vec<f64>,
    /// Installed site indices, ascending; `None` when not recorded.
    pub installed: Option<Vec<usize>>,
}

impl SnapshotRow {
    /// Rebuilds the decision vector from the installed indices.
    ///
    /// Returns `Ok(None)` when the row carries no site list and an error when
    /// an index is not below `site_count`.
    pub fn decision(&self, site_count: usize) -> std::result::Result<Option<Vec<bool>>, String> {
        let Some(installed) = &self.installed else {
            return Ok(None);
        };
        let mut decision = vec![false; site_count];
        for &i in installed {
            if i >= site_count {
                return Err(format!("installed site {i} out of range for {site_count} sites"));
            }
            decision[i] = true;
        }
        Ok(Some(decision))
    }
}

/// Objective vectors (and optionally installed sites) of a population.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PopulationSnapshot {
    pub rows: Vec<SnapshotRow>,
}

impl PopulationSnapshot {
    /// Captures the best individual of every subproblem.
    pub fn from_population(population: &[Subproblem], include_sites: bool) -> Self {
        let rows = population
            .iter()
            .map(|sp| SnapshotRow {
                objectives: sp.best.objectives.clone(),
                installed: include_sites.then(|| sp.best.installed_sites()),
            })
            .collect();
        Self { rows }
    }

    /// Writes the snapshot, replacing any existing file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_string()).map_err(|e| MoeadError::io(path, e))
    }

    /// Reads a snapshot file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| MoeadError::io(path, e))?;
        Self::parse(&path.display().to_string(), &content)
    }

    /// Parses snapshot text. `file` is only used in error messages.
    pub fn parse(file: &str, content: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (objs, sites) = match line.split_once(SITE_SEPARATOR) {
                Some((objs, sites)) => (objs, Some(sites)),
                None => (line, None),
            };

            let objectives = objs
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<f64>().map_err(|_| {
                        MoeadError::parse(file, line_no + 1, format!("invalid objective `{tok}`"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            if objectives.is_empty() {
                return Err(MoeadError::parse(file, line_no + 1, "no objective values"));
            }

            let installed = sites
                .map(|sites| {
                    sites
                        .split_whitespace()
                        .map(|tok| {
                            tok.parse::<usize>().map_err(|_| {
                                MoeadError::parse(
                                    file,
                                    line_no + 1,
                                    format!("invalid site index `{tok}`"),
                                )
                            })
                        })
                        .collect::<Result<Vec<_>>>()
                })
                .transpose()?;

            rows.push(SnapshotRow {
                objectives,
                installed,
            });
        }
        Ok(Self { rows })
    }
}

impl fmt::Display for PopulationSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for v in &row.objectives {
                write!(f, "{v}  ")?;
            }
            if let Some(installed) = &row.installed {
                write!(f, "{SITE_SEPARATOR}")?;
                for i in installed {
                    write!(f, " {i}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Writes `POF_{instance}_RUN{run}.dat` into a directory at every snapshot.
///
/// Each save overwrites the previous one, so the file always holds the
/// latest population.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    dir: PathBuf,
    instance: String,
    run_id: usize,
    include_sites: bool,
    saves: usize,
}

impl SnapshotWriter {
    pub fn new(dir: impl Into<PathBuf>, instance: impl Into<String>, run_id: usize) -> Self {
        Self {
            dir: dir.into(),
            instance: instance.into(),
            run_id,
            include_sites: true,
            saves: 0,
        }
    }

    /// Whether lines carry the installed site list (default `true`).
    pub fn with_sites(mut self, include: bool) -> Self {
        self.include_sites = include;
        self
    }

    /// Snapshot file name for an instance and run.
    pub fn file_name(instance: &str, run_id: usize) -> String {
        format!("POF_{instance}_RUN{run_id}.dat")
    }

    /// Full path of the snapshot file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(Self::file_name(&self.instance, self.run_id))
    }

    /// Number of snapshots written so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SnapshotSink for SnapshotWriter {
    fn save(&mut self, generation: usize, population: &[Subproblem]) -> Result<()> {
        let path = self.path();
        PopulationSnapshot::from_population(population, self.include_sites).write(&path)?;
        self.saves += 1;
        debug!(generation, path = %path.display(), "population snapshot written");
        Ok(())
    }
}

/// Whether `name` has the shape of a [`SnapshotWriter::file_name`].
fn is_snapshot_file(name: &str) -> bool {
    name.strip_prefix("POF_")
        .and_then(|rest| rest.strip_suffix(".dat"))
        .and_then(|rest| rest.rsplit_once("_RUN"))
        .is_some_and(|(instance, run)| {
            !instance.is_empty() && !run.is_empty() && run.bytes().all(|b| b.is_ascii_digit())
        })
}

/// Creates `dir` if missing and removes snapshot files left by earlier runs.
///
/// Only `POF_{instance}_RUN{run}.dat` files are touched; other files, other
/// `.dat` files included, are left alone. Returns the number removed.
pub fn prepare_output_dir(dir: impl AsRef<Path>) -> Result<usize> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| MoeadError::io(dir, e))?;

    let mut removed = 0;
    for entry in fs::read_dir(dir).map_err(|e| MoeadError::io(dir, e))? {
        let path = entry.map_err(|e| MoeadError::io(dir, e))?.path();
        let stale = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_snapshot_file);
        if stale && path.is_file() {
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => warn!(path = %path.display(), error = %e, "could not remove stale snapshot"),
            }
        }
    }
    Ok(removed)
}

/// One line of the execution log.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionRecord {
    pub instance: String,
    pub problem_type: String,
    pub variant: String,
    pub variables: usize,
    pub evaluations: usize,
    pub seed: u64,
    pub mutation_rate: f64,
    pub op1_probability: f64,
    pub crossover_rate: f64,
    /// Wall-clock seconds.
    pub elapsed_secs: f64,
}

impl fmt::Display for ExecutionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Inst: {}, Problem Type: {}, variant: {}, N Var: {}, N Eval: {}, Seed: {}, \
             Mutation Rate: {}, Op1 Prob: {}, Crossover Rate: {}, Time: {}",
            self.instance,
            self.problem_type,
            self.variant,
            self.variables,
            self.evaluations,
            self.seed,
            self.mutation_rate,
            self.op1_probability,
            self.crossover_rate,
            self.elapsed_secs
        )
    }
}

/// Appends a record to the log file, creating it if needed.
pub fn append_execution_log(path: impl AsRef<Path>, record: &ExecutionRecord) -> Result<()> {
    let path = path.as_ref();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| MoeadError::io(path, e))?;
    writeln!(file, "{record}").map_err(|e| MoeadError::io(path, e))
}
