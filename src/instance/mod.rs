//! Problem instances for device location and relocation.
//!
//! A [`ProblemInstance`] is read once and shared by reference for the
//! whole run. Sites are addressed by their 0-based position, which is
//! also the bit position in every decision vector.
//!
//! # Submodules
//!
//! - [`reader`]: AMPL-style `.dat` instance reader
//! - [`objectives`]: coverage/cost evaluators

pub mod objectives;
pub mod reader;

pub use objectives::{CoverageCost, ObjectiveKind, RelocationCost};
pub use reader::read_instance;

/// A candidate location.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    /// 0-based site index.
    pub id: usize,
    pub x: f64,
    pub y: f64,
    /// Whether a device is already installed here before optimization.
    pub preinstalled: bool,
    /// Probability of an emergency event at this site.
    pub event_probability: f64,
}

impl Site {
    /// Creates a site at `(x, y)` with no device and no event mass.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            preinstalled: false,
            event_probability: 0.0,
        }
    }

    /// Euclidean distance to another site.
    pub fn distance(&self, other: &Site) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Immutable description of one location/relocation instance.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    name: String,
    sites: Vec<Site>,
    budget_amount: f64,
    radius: f64,
    install_cost: f64,
    relocation_cost: f64,
}

impl ProblemInstance {
    /// Creates an instance.
    ///
    /// - `budget_amount`: money available for new devices (`P`)
    /// - `radius`: coverage radius (`R`)
    /// - `install_cost`: cost of one new device (`c1`)
    /// - `relocation_cost`: cost of moving one pre-installed device (`c2`)
    pub fn new(
        name: impl Into<String>,
        sites: Vec<Site>,
        budget_amount: f64,
        radius: f64,
        install_cost: f64,
        relocation_cost: f64,
    ) -> Self {
        Self {
            name: name.into(),
            sites,
            budget_amount,
            radius,
            install_cost,
            relocation_cost,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of candidate sites (length of every decision vector).
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn site(&self, index: usize) -> &Site {
        &self.sites[index]
    }

    pub fn is_preinstalled(&self, index: usize) -> bool {
        self.sites[index].preinstalled
    }

    pub fn preinstalled_count(&self) -> usize {
        self.sites.iter().filter(|s| s.preinstalled).count()
    }

    /// Number of new devices the budget can pay for: `floor(P / c1)`.
    ///
    /// A non-positive unit cost places no monetary limit, so the budget
    /// becomes the number of free sites.
    pub fn budget(&self) -> usize {
        let free = self.site_count() - self.preinstalled_count();
        if self.install_cost <= 0.0 {
            return free;
        }
        let count = (self.budget_amount / self.install_cost).floor();
        if count <= 0.0 {
            0
        } else {
            (count as usize).min(free)
        }
    }

    /// Upper bound on installed sites in any feasible decision vector.
    pub fn max_installed(&self) -> usize {
        self.preinstalled_count() + self.budget()
    }

    pub fn budget_amount(&self) -> f64 {
        self.budget_amount
    }

    pub fn coverage_radius(&self) -> f64 {
        self.radius
    }

    pub fn install_cost(&self) -> f64 {
        self.install_cost
    }

    pub fn relocation_cost(&self) -> f64 {
        self.relocation_cost
    }
}
