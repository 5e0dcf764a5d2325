//! Decomposition weight tables.
//!
//! A table holds one weight vector per subproblem, one row per line, with
//! M whitespace-separated non-negative values per row. Tables are stored
//! as `W{M}-P{N}.dat` so a directory can hold tables for several
//! objective counts and population sizes.

use crate::error::{MoeadError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Weight vectors for every subproblem, in subproblem order.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    rows: Vec<Vec<f64>>,
}

impl WeightTable {
    /// File name of the table for `objectives` objectives and
    /// `population` subproblems.
    pub fn file_name(objectives: usize, population: usize) -> String {
        format!("W{objectives}-P{population}.dat")
    }

    /// Loads `W{M}-P{N}.dat` from `dir`.
    pub fn load(dir: impl AsRef<Path>, objectives: usize, population: usize) -> Result<Self> {
        let path = dir.as_ref().join(Self::file_name(objectives, population));
        Self::read(&path, objectives, population)
    }

    /// Reads a table file, checking its shape.
    pub fn read(path: &Path, objectives: usize, population: usize) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MoeadError::io(path, e))?;
        let table = Self::parse(path, &content, objectives, population)?;
        debug!(path = %path.display(), rows = table.len(), "weight table loaded");
        Ok(table)
    }

    /// Parses table text. `path` is only used in error messages.
    pub fn parse(path: &Path, content: &str, objectives: usize, population: usize) -> Result<Self> {
        let mut rows = Vec::with_capacity(population);
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row: Vec<f64> = line
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<f64>().map_err(|_| {
                        MoeadError::parse(
                            path.display().to_string(),
                            line_no + 1,
                            format!("invalid weight `{tok}`"),
                        )
                    })
                })
                .collect::<Result<_>>()?;
            if row.len() != objectives {
                return Err(table_error(
                    path,
                    format!(
                        "line {} has {} values, expected {objectives}",
                        line_no + 1,
                        row.len()
                    ),
                ));
            }
            rows.push(row);
        }

        if rows.len() != population {
            return Err(table_error(
                path,
                format!("{} rows, expected {population}", rows.len()),
            ));
        }
        Self::from_rows(rows).map_err(|message| table_error(path, message))
    }

    /// Builds a table from rows, checking widths and signs.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> std::result::Result<Self, String> {
        let Some(width) = rows.first().map(Vec::len) else {
            return Err("table is empty".into());
        };
        if width == 0 {
            return Err("weight vectors must not be empty".into());
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(format!("row {i} has {} values, expected {width}", row.len()));
            }
            if row.iter().any(|w| !(*w >= 0.0)) {
                return Err(format!("row {i} has a negative or NaN weight"));
            }
        }
        Ok(Self { rows })
    }

    /// Evenly spread table from [`simplex_lattice`].
    pub fn uniform(objectives: usize, divisions: usize) -> Self {
        Self {
            rows: simplex_lattice(objectives, divisions),
        }
    }

    /// Writes the table in the file format read by [`WeightTable::read`].
    pub fn write(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let mut out = String::new();
        for row in &self.rows {
            let line: Vec<String> = row.iter().map(|w| w.to_string()).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        std::fs::write(path, out).map_err(|e| MoeadError::io(path, e))?;
        Ok(path.to_path_buf())
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of objectives (row width).
    pub fn objectives(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

fn table_error(path: &Path, message: impl Into<String>) -> MoeadError {
    MoeadError::WeightTable {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Number of lattice points with `divisions` steps on the
/// `objectives`-dimensional simplex: `C(H + M - 1, M - 1)`.
pub fn weight_count(objectives: usize, divisions: usize) -> usize {
    if objectives == 0 {
        return 0;
    }
    let n = divisions + objectives - 1;
    let k = objectives - 1;
    (0..k).fold(1usize, |acc, i| acc * (n - i) / (i + 1))
}

/// All weight vectors whose components are multiples of `1 / divisions`
/// and sum to one (Das–Dennis lattice).
///
/// Rows are produced with the first component increasing slowest.
pub fn simplex_lattice(objectives: usize, divisions: usize) -> Vec<Vec<f64>> {
    let mut out = Vec::with_capacity(weight_count(objectives, divisions));
    if objectives == 0 {
        return out;
    }
    let mut current = vec![0usize; objectives];
    fill_lattice(&mut current, 0, divisions, divisions, &mut out);
    out
}

fn fill_lattice(
    current: &mut [usize],
    index: usize,
    remaining: usize,
    divisions: usize,
    out: &mut Vec<Vec<f64>>,
) {
    if index == current.len() - 1 {
        current[index] = remaining;
        let h = divisions.max(1) as f64;
        out.push(current.iter().map(|&c| c as f64 / h).collect());
        return;
    }
    for c in 0..=remaining {
        current[index] = c;
        fill_lattice(current, index + 1, remaining - c, divisions, out);
    }
}
