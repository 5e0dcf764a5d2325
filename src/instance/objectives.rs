//! Coverage/cost objective evaluators.
//!
//! Both evaluators return two minimized objectives:
//!
//! - `f[0]`: negated expected coverage, the sum of event probabilities of
//!   sites lying within the coverage radius of at least one installed site
//! - `f[1]`: cost of the decision
//!
//! They differ only in how cost is charged. [`CoverageCost`] pays the unit
//! installation cost for every installed site. [`RelocationCost`] treats a
//! removed pre-installed device plus a new site as one relocation, charged
//! at the relocation cost, and pays installation cost only for the rest.

use super::ProblemInstance;
use crate::moead::Evaluator;

/// Expected coverage of the events under an installation vector.
pub fn expected_coverage(instance: &ProblemInstance, decision: &[bool]) -> f64 {
    let radius = instance.coverage_radius();
    let sites = instance.sites();
    let installed: Vec<usize> = decision
        .iter()
        .enumerate()
        .filter_map(|(i, &b)| b.then_some(i))
        .collect();

    sites
        .iter()
        .filter(|event| event.event_probability > 0.0)
        .filter(|event| {
            installed
                .iter()
                .any(|&i| sites[i].distance(event) <= radius)
        })
        .map(|event| event.event_probability)
        .sum()
}

/// Coverage against plain installation cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverageCost;

impl Evaluator for CoverageCost {
    fn objective_count(&self) -> usize {
        2
    }

    fn evaluate(&self, instance: &ProblemInstance, decision: &[bool], objectives: &mut [f64]) {
        assert_eq!(
            decision.len(),
            instance.site_count(),
            "decision length must equal site count"
        );
        let installed = decision.iter().filter(|&&b| b).count();
        objectives[0] = -expected_coverage(instance, decision);
        objectives[1] = installed as f64 * instance.install_cost();
    }
}

/// Coverage against installation plus relocation cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelocationCost;

impl Evaluator for RelocationCost {
    fn objective_count(&self) -> usize {
        2
    }

    fn evaluate(&self, instance: &ProblemInstance, decision: &[bool], objectives: &mut [f64]) {
        assert_eq!(
            decision.len(),
            instance.site_count(),
            "decision length must equal site count"
        );
        let mut removed = 0usize;
        let mut added = 0usize;
        for (site, &bit) in instance.sites().iter().zip(decision) {
            match (site.preinstalled, bit) {
                (true, false) => removed += 1,
                (false, true) => added += 1,
                _ => {}
            }
        }
        let relocations = removed.min(added);
        let fresh = added - relocations;
        let cost = relocations as f64 * instance.relocation_cost()
            + fresh as f64 * instance.install_cost();

        objectives[0] = -expected_coverage(instance, decision);
        objectives[1] = cost;
    }
}

/// Evaluator selected at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectiveKind {
    /// Coverage vs. installation cost (`cam`).
    #[default]
    Coverage,
    /// Coverage vs. installation and relocation cost (`drp`).
    Relocation,
}

impl Evaluator for ObjectiveKind {
    fn objective_count(&self) -> usize {
        2
    }

    fn evaluate(&self, instance: &ProblemInstance, decision: &[bool], objectives: &mut [f64]) {
        match self {
            ObjectiveKind::Coverage => CoverageCost.evaluate(instance, decision, objectives),
            ObjectiveKind::Relocation => RelocationCost.evaluate(instance, decision, objectives),
        }
    }
}
