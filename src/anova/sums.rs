// Per-group accumulators for the first-principles ANOVA path

use serde::{Deserialize, Serialize};

/// Size, total and raw sum of squares of one sample group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupSums {
    /// Number of observations (n)
    pub n: usize,

    /// Sum of observations (T)
    pub total: f64,

    /// Sum of squared observations (Σx²)
    pub sum_sq: f64,
}

impl GroupSums {
    /// Accumulate a group's sums in one pass
    pub fn from_samples(samples: &[f64]) -> Self {
        let (total, sum_sq) = samples
            .iter()
            .fold((0.0, 0.0), |(t, sq), &x| (t + x, sq + x * x));

        Self {
            n: samples.len(),
            total,
            sum_sq,
        }
    }

    /// Group mean (NaN for an empty group)
    pub fn mean(&self) -> f64 {
        self.total / self.n as f64
    }

    /// T² / n
    pub fn squared_total_over_n(&self) -> f64 {
        self.total * self.total / self.n as f64
    }

    /// Σx² − T²/n: this group's contribution to SSwithin
    pub fn within_ss(&self) -> f64 {
        self.sum_sq - self.squared_total_over_n()
    }
}

/// Accumulate sums for every group, indexed by group position
pub fn accumulate(groups: &[&[f64]]) -> Vec<GroupSums> {
    groups.iter().map(|g| GroupSums::from_samples(g)).collect()
}
