//! Variation operators for installation vectors.
//!
//! An installation vector holds one bit per candidate site. Every operator
//! here keeps the installed count within `preinstalled + budget`:
//! initialization installs at most `budget` new sites, crossover never
//! exceeds the larger parent count, and mutation either deletes a site or
//! swaps one for another.
//!
//! Both operators take a [`RepresentationPolicy`]. Under
//! [`FixedSite`](RepresentationPolicy::FixedSite) pre-installed bits are set
//! in every child and are never chosen for deletion; under
//! [`Flexible`](RepresentationPolicy::Flexible) any bit may move.
//!
//! # Binary Operators
//!
//! - [`random_installation`]: pre-installed sites plus random new ones
//! - [`installation_crossover`]: count-bounded union of two parents
//! - [`installation_mutation`]: delete one site, optionally install another
//!
//! # Continuous Operators
//!
//! - [`sbx_crossover`]: simulated binary crossover (Deb & Agrawal, 1995)
//! - [`polynomial_mutation`]: bounded polynomial mutation (Deb & Goyal, 1996)
//!
//! # References
//!
//! - Deb & Agrawal (1995), "Simulated Binary Crossover for Continuous Search Space"
//! - Deb & Goyal (1996), "A Combined Genetic Adaptive Search (GeneAS)"

use super::config::{InitialFill, RepresentationPolicy};
use crate::instance::ProblemInstance;
use crate::random::{random_permutation, uniform};
use rand::Rng;

/// Distribution index of SBX and polynomial mutation.
pub const DISTRIBUTION_INDEX: f64 = 20.0;

/// Parent genes closer than this are copied instead of recombined.
const SBX_EPS: f64 = 1.0e-14;

/// What [`installation_mutation`] did to the vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The mutation-rate draw failed; nothing changed.
    Skipped,
    /// No removable site was found; nothing changed.
    NoCandidate,
    /// The site was cleared.
    Deleted(usize),
    /// `removed` was cleared and `added` was set.
    Swapped { removed: usize, added: usize },
}

impl MutationOutcome {
    /// Whether the vector was modified.
    pub fn changed(self) -> bool {
        matches!(self, MutationOutcome::Deleted(_) | MutationOutcome::Swapped { .. })
    }
}

// ============================================================================
// Binary operators
// ============================================================================

/// Builds a feasible initial installation vector.
///
/// Every pre-installed site is set, then sites are drawn in random order
/// from the free ones until the fill count is reached:
/// [`InitialFill::Budget`] installs `budget` sites,
/// [`InitialFill::Sampled`] a count drawn uniformly from `0..=budget`.
///
/// # Example
///
/// ```
/// use moead_drp::instance::{ProblemInstance, Site};
/// use moead_drp::moead::InitialFill;
/// use moead_drp::moead::operators::random_installation;
/// use moead_drp::random::create_rng;
///
/// let sites = (0..6).map(|i| Site::new(i, i as f64, 0.0)).collect();
/// let instance = ProblemInstance::new("line", sites, 2.0, 1.0, 1.0, 1.0);
/// let mut rng = create_rng(1);
///
/// let decision = random_installation(&instance, InitialFill::Budget, &mut rng);
/// assert_eq!(decision.iter().filter(|&&b| b).count(), 2);
/// ```
pub fn random_installation<R: Rng + ?Sized>(
    instance: &ProblemInstance,
    fill: InitialFill,
    rng: &mut R,
) -> Vec<bool> {
    let n = instance.site_count();
    let mut decision: Vec<bool> = (0..n).map(|i| instance.is_preinstalled(i)).collect();

    let budget = instance.budget();
    let target = match fill {
        InitialFill::Budget => budget,
        InitialFill::Sampled => rng.random_range(0..=budget),
    };

    let mut installed = 0;
    for site in random_permutation(n, rng) {
        if installed >= target {
            break;
        }
        if !decision[site] {
            decision[site] = true;
            installed += 1;
        }
    }
    decision
}

/// Recombines two installation vectors into one child.
///
/// # Algorithm
///
/// 1. Under `FixedSite`, set every pre-installed bit (`fixed` of them)
/// 2. Draw a target count uniformly between the parents' installed counts
/// 3. Scan positions circularly from a random start, skipping bits already
///    set, and install wherever either parent has a site, until
///    `target - fixed` sites were added or the scan wraps
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if the parents differ in length, are empty, or do not match the
/// instance size.
pub fn installation_crossover<R: Rng + ?Sized>(
    parent1: &[bool],
    parent2: &[bool],
    instance: &ProblemInstance,
    policy: RepresentationPolicy,
    rng: &mut R,
) -> Vec<bool> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");
    assert_eq!(n, instance.site_count(), "parents must match the instance size");

    let mut child = vec![false; n];
    let mut fixed = 0;
    if policy.protects_preinstalled() {
        for (i, bit) in child.iter_mut().enumerate() {
            if instance.is_preinstalled(i) {
                *bit = true;
                fixed += 1;
            }
        }
    }

    let count1 = count_installed(parent1);
    let count2 = count_installed(parent2);
    let (lo, hi) = (count1.min(count2), count1.max(count2));
    let target = if hi > lo { rng.random_range(lo..=hi) } else { lo };
    let to_install = target.saturating_sub(fixed);

    let start = rng.random_range(0..n);
    let mut installed = 0;
    for offset in 0..n {
        if installed >= to_install {
            break;
        }
        let idx = (start + offset) % n;
        if child[idx] {
            continue;
        }
        if parent1[idx] || parent2[idx] {
            child[idx] = true;
            installed += 1;
        }
    }
    child
}

/// Mutates an installation vector in place.
///
/// With probability `mutation_rate` one installed site, found by a circular
/// scan from a random start, is cleared. With probability
/// `1 - op1_probability` a second circular scan then installs a different
/// empty site, so the installed count is preserved (swap). Under
/// `FixedSite` pre-installed sites are never chosen for deletion.
///
/// # Panics
/// Panics if `decision` is empty or does not match the instance size.
pub fn installation_mutation<R: Rng + ?Sized>(
    decision: &mut [bool],
    instance: &ProblemInstance,
    policy: RepresentationPolicy,
    mutation_rate: f64,
    op1_probability: f64,
    rng: &mut R,
) -> MutationOutcome {
    let n = decision.len();
    assert!(n > 0, "decision vector must not be empty");
    assert_eq!(n, instance.site_count(), "decision must match the instance size");

    if uniform(rng) > mutation_rate {
        return MutationOutcome::Skipped;
    }
    let swap = uniform(rng) > op1_probability;

    let protect = policy.protects_preinstalled();
    let start = rng.random_range(0..n);
    let removed = (0..n)
        .map(|offset| (start + offset) % n)
        .find(|&idx| decision[idx] && !(protect && instance.is_preinstalled(idx)));
    let Some(removed) = removed else {
        return MutationOutcome::NoCandidate;
    };
    decision[removed] = false;

    if !swap {
        return MutationOutcome::Deleted(removed);
    }

    let start = rng.random_range(0..n);
    let added = (0..n)
        .map(|offset| (start + offset) % n)
        .find(|&idx| !decision[idx] && idx != removed);
    match added {
        Some(added) => {
            decision[added] = true;
            MutationOutcome::Swapped { removed, added }
        }
        None => MutationOutcome::Deleted(removed),
    }
}

/// Number of set bits.
pub fn count_installed(decision: &[bool]) -> usize {
    decision.iter().filter(|&&b| b).count()
}

// ============================================================================
// Continuous operators
// ============================================================================

/// Simulated binary crossover producing one child.
///
/// Each gene is recombined with probability 0.5 when the parents differ by
/// more than `1e-14`; otherwise it is copied from `parent1`. Children are
/// clamped to `[lower, upper]`.
///
/// # Panics
/// Panics if the parents differ in length or `lower >= upper`.
pub fn sbx_crossover<R: Rng + ?Sized>(
    parent1: &[f64],
    parent2: &[f64],
    lower: f64,
    upper: f64,
    rng: &mut R,
) -> Vec<f64> {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    assert!(lower < upper, "lower bound must be below upper bound");
    let eta = DISTRIBUTION_INDEX;

    parent1
        .iter()
        .zip(parent2)
        .map(|(&x1, &x2)| {
            if uniform(rng) > 0.5 || (x1 - x2).abs() <= SBX_EPS {
                return x1;
            }
            let (y1, y2) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
            let rnd = uniform(rng);

            let spread = |beta: f64| -> f64 {
                let alpha = 2.0 - beta.powf(-(eta + 1.0));
                if rnd <= 1.0 / alpha {
                    (rnd * alpha).powf(1.0 / (eta + 1.0))
                } else {
                    (1.0 / (2.0 - rnd * alpha)).powf(1.0 / (eta + 1.0))
                }
            };

            let betaq = spread(1.0 + 2.0 * (y1 - lower) / (y2 - y1));
            let c1 = (0.5 * ((y1 + y2) - betaq * (y2 - y1))).clamp(lower, upper);
            let betaq = spread(1.0 + 2.0 * (upper - y2) / (y2 - y1));
            let c2 = (0.5 * ((y1 + y2) + betaq * (y2 - y1))).clamp(lower, upper);

            if uniform(rng) <= 0.5 {
                c2
            } else {
                c1
            }
        })
        .collect()
}

/// Bounded polynomial mutation, in place.
///
/// Each gene is perturbed with probability `rate`; results are clamped to
/// `[lower, upper]`.
///
/// # Panics
/// Panics if `lower >= upper`.
pub fn polynomial_mutation<R: Rng + ?Sized>(
    genes: &mut [f64],
    rate: f64,
    lower: f64,
    upper: f64,
    rng: &mut R,
) {
    assert!(lower < upper, "lower bound must be below upper bound");
    let eta = DISTRIBUTION_INDEX;
    let mut_pow = 1.0 / (eta + 1.0);
    let range = upper - lower;

    for y in genes.iter_mut() {
        if uniform(rng) > rate {
            continue;
        }
        let delta1 = (*y - lower) / range;
        let delta2 = (upper - *y) / range;
        let r = uniform(rng);
        let deltaq = if r <= 0.5 {
            let xy = 1.0 - delta1;
            let val = 2.0 * r + (1.0 - 2.0 * r) * xy.powf(eta + 1.0);
            val.powf(mut_pow) - 1.0
        } else {
            let xy = 1.0 - delta2;
            let val = 2.0 * (1.0 - r) + 2.0 * (r - 0.5) * xy.powf(eta + 1.0);
            1.0 - val.powf(mut_pow)
        };
        *y = (*y + deltaq * range).clamp(lower, upper);
    }
}
