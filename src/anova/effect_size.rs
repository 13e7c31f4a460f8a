// Effect sizes for one-way ANOVA

use crate::anova::partition::VariancePartition;
use serde::{Deserialize, Serialize};

/// Proportion of variance attributable to group membership
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    /// SSbetween / SStotal
    pub eta_squared: f64,

    /// (SSbetween − DFbetween·MSwithin) / (SStotal + MSwithin)
    pub omega_squared: f64,
}

impl EffectSize {
    pub fn from_partition(partition: &VariancePartition) -> Self {
        Self {
            eta_squared: eta_squared(partition.ss_between, partition.ss_total),
            omega_squared: omega_squared(
                partition.ss_between,
                partition.ss_total,
                partition.df_between,
                partition.ms_within,
            ),
        }
    }
}

/// Sample effect size: the share of total variation explained by the groups.
pub fn eta_squared(ss_between: f64, ss_total: f64) -> f64 {
    ss_between / ss_total
}

/// Less biased population estimate of eta-squared.
///
/// Not clamped: weak effects where `SSbetween < DFbetween·MSwithin` yield a
/// negative value.
pub fn omega_squared(ss_between: f64, ss_total: f64, df_between: usize, ms_within: f64) -> f64 {
    (ss_between - df_between as f64 * ms_within) / (ss_total + ms_within)
}
