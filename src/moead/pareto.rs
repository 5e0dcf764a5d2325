//! Pareto dominance utilities.
//!
//! All objectives are **minimized**: lower values are better.
//!
//! - [`dominance_cmp`]: three-way dominance comparison
//! - [`dominates`] / [`dominates_within`]: strict and tolerant dominance tests
//! - [`non_dominated_front`]: indices of the non-dominated vectors of a set
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

/// Tolerance used by the loose dominance test.
pub const DOMINANCE_TOLERANCE: f64 = 1.0e-4;

/// Dominance comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other.
    Neither,
}

/// Compare two objective vectors for Pareto dominance.
pub fn dominance_cmp(a: &[f64], b: &[f64]) -> Dominance {
    assert_eq!(a.len(), b.len(), "objective vectors must have equal length");
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// `a` is no worse than `b` in every objective and the vectors differ.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    dominance_cmp(a, b) == Dominance::Left
}

/// Like [`dominates`], but `a` may exceed `b` by up to `tolerance` in any
/// objective. Identical vectors never dominate each other.
pub fn dominates_within(a: &[f64], b: &[f64], tolerance: f64) -> bool {
    assert_eq!(a.len(), b.len(), "objective vectors must have equal length");
    if a == b {
        return false;
    }
    a.iter().zip(b).all(|(&va, &vb)| !(vb < va - tolerance))
}

/// Indices of the vectors not dominated by any other vector in the set.
///
/// When several vectors are identical only the first is reported.
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of vectors
///
/// # Example
///
/// ```
/// use moead_drp::moead::pareto::non_dominated_front;
///
/// let a = [1.0, 5.0];
/// let b = [3.0, 3.0];
/// let c = [4.0, 4.0]; // dominated by b
/// let front = non_dominated_front(&[&a[..], &b[..], &c[..]]);
/// assert_eq!(front, vec![0, 1]);
/// ```
pub fn non_dominated_front(objectives: &[&[f64]]) -> Vec<usize> {
    let n = objectives.len();
    (0..n)
        .filter(|&i| {
            let dominated = (0..n).any(|j| j != i && dominates(objectives[j], objectives[i]));
            let duplicate = (0..i).any(|j| objectives[j] == objectives[i]);
            !dominated && !duplicate
        })
        .collect()
}
