//! Scalarizing functions and vector utilities.
//!
//! A scalarizing function collapses an objective vector into one value
//! relative to a weight vector and a reference point. Lower is better.
//!
//! # Functions
//!
//! - [`Scalarization::Tchebycheff`]: `max_j w_j * |f_j - z_j + 0.01|`
//! - [`Scalarization::Pbi`]: `d1 + theta * d2` (penalty boundary intersection)
//!
//! # References
//!
//! - Zhang & Li (2007), "MOEA/D: A Multiobjective Evolutionary Algorithm
//!   Based on Decomposition"

/// Offset added inside the Tchebycheff absolute value.
pub const TCHEBYCHEFF_OFFSET: f64 = 0.01;

/// Weight substituted for a zero weight component in Tchebycheff.
pub const ZERO_WEIGHT_SUBSTITUTE: f64 = 0.001;

/// Default PBI penalty coefficient.
pub const PBI_THETA: f64 = 20.0;

/// Scalarizing function.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scalarization {
    /// Weighted Tchebycheff distance to the reference point.
    Tchebycheff,
    /// Penalty boundary intersection with penalty coefficient `theta`.
    Pbi { theta: f64 },
}

impl Default for Scalarization {
    fn default() -> Self {
        Scalarization::Tchebycheff
    }
}

impl Scalarization {
    /// PBI with the default penalty coefficient.
    pub fn pbi() -> Self {
        Scalarization::Pbi { theta: PBI_THETA }
    }

    /// Evaluates the scalarizing function.
    ///
    /// # Panics
    /// Panics if the vectors differ in length or are empty, or if PBI is
    /// given a zero-length weight vector.
    pub fn apply(&self, objectives: &[f64], weight: &[f64], reference: &[f64]) -> f64 {
        assert!(!weight.is_empty(), "weight vector must not be empty");
        assert_eq!(
            objectives.len(),
            weight.len(),
            "objective and weight dimensions differ"
        );
        assert_eq!(
            objectives.len(),
            reference.len(),
            "objective and reference dimensions differ"
        );

        match *self {
            Scalarization::Tchebycheff => tchebycheff(objectives, weight, reference),
            Scalarization::Pbi { theta } => pbi(objectives, weight, reference, theta),
        }
    }
}

/// Weighted Tchebycheff value.
fn tchebycheff(objectives: &[f64], weight: &[f64], reference: &[f64]) -> f64 {
    let mut max_fun = -1.0e30;
    for ((&f, &w), &z) in objectives.iter().zip(weight).zip(reference) {
        let diff = (f - z + TCHEBYCHEFF_OFFSET).abs();
        let feval = if w == 0.0 {
            ZERO_WEIGHT_SUBSTITUTE * diff
        } else {
            w * diff
        };
        if feval > max_fun {
            max_fun = feval;
        }
    }
    max_fun
}

/// Penalty boundary intersection.
///
/// `d2` is obtained from the expanded quadratic
/// `d1² - 2·d1·s + |f|² + |z|² - 2·f·z` where `s` is the signed projection
/// of `f - z` on the unit weight direction and `d1 = |s|`. For `s >= 0` this
/// equals the perpendicular distance squared; for `s < 0` it is larger.
fn pbi(objectives: &[f64], weight: &[f64], reference: &[f64], theta: f64) -> f64 {
    let norm = norm2(weight);
    assert!(norm > 0.0, "PBI requires a non-zero weight vector");
    let unit: Vec<f64> = weight.iter().map(|w| w / norm).collect();

    let signed = inner_product(objectives, &unit) - inner_product(reference, &unit);
    let d1 = signed.abs();
    let temp = d1 * d1 - 2.0 * d1 * signed
        + (inner_product(objectives, objectives) + inner_product(reference, reference)
            - 2.0 * inner_product(objectives, reference));
    // rounding can push a zero distance slightly negative
    let d2 = temp.max(0.0).sqrt();
    d1 + theta * d2
}

/// Dot product.
pub fn inner_product(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "vector dimensions differ");
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean norm.
pub fn norm2(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Euclidean distance between two vectors.
///
/// # Panics
/// Panics if the vectors differ in length.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "vector dimensions differ");
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Scales a vector so its components sum to one.
pub fn normalize_sum(v: &mut [f64]) {
    let sum: f64 = v.iter().sum();
    for x in v.iter_mut() {
        *x /= sum;
    }
}

/// Nadir estimate from a set of objective vectors.
///
/// For each objective `j`, picks the vector minimizing the achievement
/// function `max_k f_k / w_k` with `w_j = 1` and every other weight `1e-5`,
/// and takes its `j`-th component.
///
/// # Panics
/// Panics if `objectives` is empty.
pub fn nadir_point(objectives: &[&[f64]]) -> Vec<f64> {
    assert!(!objectives.is_empty(), "objectives must not be empty");
    let m = objectives[0].len();

    (0..m)
        .map(|j| {
            let mut asf_min = f64::INFINITY;
            let mut asf_id = 0;
            for (s, f) in objectives.iter().enumerate() {
                let asf = f
                    .iter()
                    .enumerate()
                    .map(|(k, &v)| if k == j { v } else { v / 1.0e-5 })
                    .fold(f64::NEG_INFINITY, f64::max);
                if asf < asf_min {
                    asf_min = asf;
                    asf_id = s;
                }
            }
            objectives[asf_id][j]
        })
        .collect()
}

/// Maps objectives into `[0, 1]`-ish range using ideal and nadir points.
pub fn normalize_objectives(objectives: &[f64], ideal: &[f64], nadir: &[f64]) -> Vec<f64> {
    assert_eq!(objectives.len(), ideal.len(), "objective and ideal dimensions differ");
    assert_eq!(objectives.len(), nadir.len(), "objective and nadir dimensions differ");
    objectives
        .iter()
        .zip(ideal)
        .zip(nadir)
        .map(|((&f, &z), &n)| {
            if (n - z).abs() < 1.0e-6 {
                (f - z) / 1.0e-6
            } else {
                (f - z) / (n - z + 1.0e-6)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Tchebycheff ----

    #[test]
    fn test_tchebycheff_reference_value() {
        let v = Scalarization::Tchebycheff.apply(&[2.0, 3.0], &[1.0, 1.0], &[0.0, 0.0]);
        assert!((v - 3.01).abs() < 1e-12, "got {v}");
    }

    #[test]
    fn test_tchebycheff_zero_weight_substituted() {
        // second objective has zero weight: 0.001 * 1000.01 = 1.00001 dominates 0.5 * 1.01
        let v = Scalarization::Tchebycheff.apply(&[1.0, 1000.0], &[0.5, 0.0], &[0.0, 0.0]);
        assert!((v - 1.00001).abs() < 1e-9, "got {v}");
    }

    #[test]
    fn test_tchebycheff_prefers_closer_point() {
        let w = [0.5, 0.5];
        let z = [0.0, 0.0];
        let near = Scalarization::Tchebycheff.apply(&[1.0, 1.0], &w, &z);
        let far = Scalarization::Tchebycheff.apply(&[2.0, 2.0], &w, &z);
        assert!(near < far);
    }

    // ---- PBI ----

    #[test]
    fn test_pbi_on_direction() {
        // f - z lies along w: d2 = 0, d1 = |f - z|
        let v = Scalarization::pbi().apply(&[3.0, 4.0], &[3.0, 4.0], &[0.0, 0.0]);
        assert!((v - 5.0).abs() < 1e-9, "got {v}");
    }

    #[test]
    fn test_pbi_perpendicular_penalty() {
        // w = (1, 0), f - z = (2, 1): d1 = 2, d2 = 1
        let v = Scalarization::Pbi { theta: 20.0 }.apply(&[2.0, 1.0], &[1.0, 0.0], &[0.0, 0.0]);
        assert!((v - 22.0).abs() < 1e-9, "got {v}");
    }

    #[test]
    fn test_pbi_negative_projection_keeps_expanded_form() {
        // w = (1, 0), f - z = (-2, 1): s = -2, d1 = 2, temp = 4 + 8 + 5 = 17
        let v = Scalarization::Pbi { theta: 1.0 }.apply(&[-2.0, 1.0], &[1.0, 0.0], &[0.0, 0.0]);
        assert!((v - (2.0 + 17f64.sqrt())).abs() < 1e-9, "got {v}");
    }

    #[test]
    fn test_pbi_rounding_on_direction_is_finite() {
        // on-direction points whose quadratic can round below zero: d2 clamps to 0
        let w = [0.1, 0.7];
        let z = [-0.3, 0.2];
        for k in 1..200 {
            let t = k as f64 * 0.037;
            let f = [z[0] + t * w[0], z[1] + t * w[1]];
            let d1 = t * norm2(&w);
            let v = Scalarization::pbi().apply(&f, &w, &z);
            assert!(v.is_finite(), "k = {k}: got {v}");
            assert!((v - d1).abs() < 1e-5, "k = {k}: got {v}, d1 = {d1}");
        }
    }

    #[test]
    fn test_pbi_rounding_does_not_block_replacement() {
        // a closer on-direction child must win over the incumbent
        let w = [0.3, 0.3];
        let z = [0.0, 0.0];
        let incumbent = Scalarization::pbi().apply(&[0.3, 0.3], &w, &z);
        let child = Scalarization::pbi().apply(&[0.1, 0.1], &w, &z);
        assert!(child < incumbent, "child {child}, incumbent {incumbent}");
    }

    #[test]
    #[should_panic(expected = "non-zero weight")]
    fn test_pbi_zero_weight_panics() {
        Scalarization::pbi().apply(&[1.0, 1.0], &[0.0, 0.0], &[0.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "dimensions differ")]
    fn test_dimension_mismatch_panics() {
        Scalarization::Tchebycheff.apply(&[1.0, 2.0, 3.0], &[1.0, 1.0], &[0.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_empty_weight_panics() {
        Scalarization::Tchebycheff.apply(&[], &[], &[]);
    }

    // ---- Vector utilities ----

    #[test]
    fn test_euclidean_distance() {
        assert!((euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert_eq!(euclidean_distance(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_normalize_sum() {
        let mut v = vec![1.0, 3.0];
        normalize_sum(&mut v);
        assert!((v[0] - 0.25).abs() < 1e-12);
        assert!((v[1] - 0.75).abs() < 1e-12);
    }

    // ---- Nadir / normalization ----

    #[test]
    fn test_nadir_point_two_objectives() {
        let a = [1.0, 9.0];
        let b = [5.0, 5.0];
        let c = [9.0, 1.0];
        let objs: Vec<&[f64]> = vec![&a, &b, &c];
        let nadir = nadir_point(&objs);
        // objective 0: c minimizes max(f0, f1 / 1e-5), nadir[0] = 9
        // objective 1: a minimizes max(f0 / 1e-5, f1), nadir[1] = 9
        assert_eq!(nadir, vec![9.0, 9.0]);
    }

    #[test]
    fn test_normalize_objectives() {
        let n = normalize_objectives(&[5.0, 0.0], &[0.0, 0.0], &[10.0, 0.0]);
        assert!((n[0] - 5.0 / (10.0 + 1e-6)).abs() < 1e-12);
        assert_eq!(n[1], 0.0);
    }
}
