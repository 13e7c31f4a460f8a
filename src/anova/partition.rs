// First-principles variance partition for one-way ANOVA
//
// Derives SSbetween and SSwithin from group totals and raw sums of squares,
// checks them against the directly computed SStotal, then forms mean squares,
// the F-ratio and its p-value from the F-distribution survival function.

use crate::anova::error::{AnovaError, DegenerateInput, Result};
use crate::anova::sums::GroupSums;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// SSwithin at or below this fraction of Σx² is treated as zero
const ZERO_VARIANCE_RELATIVE_EPS: f64 = 64.0 * f64::EPSILON;

/// Sums of squares, degrees of freedom, mean squares and the F-test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariancePartition {
    /// Number of groups (k)
    pub groups: usize,

    /// Total number of observations (N)
    pub total_count: usize,

    /// Sum of all observations (GT)
    pub grand_total: f64,

    /// Σ(Tᵢ²/nᵢ) − GT²/N
    pub ss_between: f64,

    /// Σ(Σx²ᵢ − Tᵢ²/nᵢ)
    pub ss_within: f64,

    /// SSbetween + SSwithin
    pub ss_total: f64,

    /// Σx² − GT²/N, computed directly
    pub ss_total_direct: f64,

    /// k − 1
    pub df_between: usize,

    /// N − k
    pub df_within: usize,

    /// SSbetween / DFbetween
    pub ms_between: f64,

    /// SSwithin / DFwithin
    pub ms_within: f64,

    /// MSbetween / MSwithin
    pub f_statistic: f64,

    /// P(F > f) under the null hypothesis
    pub p_value: f64,
}

/// Round to `decimals` places, half away from zero
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Survival function of F(df_between, df_within) at `f`
pub fn f_survival(f: f64, df_between: usize, df_within: usize) -> Result<f64> {
    let dist = FisherSnedecor::new(df_between as f64, df_within as f64)
        .map_err(|e| AnovaError::Distribution(e.to_string()))?;
    Ok(dist.sf(f).clamp(0.0, 1.0))
}

/// Partition total variance into between- and within-group components
///
/// Callers validate that every group is non-empty; this function rejects
/// designs without within-group degrees of freedom or variance before any
/// ratio is formed.
///
/// The consistency check compares rounded values at absolute precision
/// `decimals`. Raw sums of squares grow with the square of the data, so for
/// observations around 1e7 (sums near 1e15) a one-ulp difference between the
/// two totals already fails the check with [`AnovaError::Consistency`].
/// Center such data before calling.
pub fn partition_variance(sums: &[GroupSums], decimals: u32) -> Result<VariancePartition> {
    let k = sums.len();
    if k < 2 {
        return Err(AnovaError::TooFewGroups(k));
    }
    if let Some(index) = sums.iter().position(|s| s.n == 0) {
        return Err(DegenerateInput::EmptyGroup { index }.into());
    }

    let total_count: usize = sums.iter().map(|s| s.n).sum();
    let grand_total: f64 = sums.iter().map(|s| s.total).sum();
    let sum_sq_all: f64 = sums.iter().map(|s| s.sum_sq).sum();
    let correction = grand_total * grand_total / total_count as f64;

    let ss_within: f64 = sums.iter().map(GroupSums::within_ss).sum();
    let ss_between: f64 = sums
        .iter()
        .map(GroupSums::squared_total_over_n)
        .sum::<f64>()
        - correction;
    let ss_total = ss_between + ss_within;
    let ss_total_direct = sum_sq_all - correction;

    tracing::debug!(
        ss_between,
        ss_within,
        ss_total,
        ss_total_direct,
        "partitioned sums of squares"
    );

    if round_to(ss_total, decimals) != round_to(ss_total_direct, decimals) {
        return Err(AnovaError::Consistency {
            derived: ss_total,
            direct: ss_total_direct,
            decimals,
        });
    }

    if total_count <= k {
        return Err(DegenerateInput::InsufficientDegreesOfFreedom {
            total: total_count,
            groups: k,
        }
        .into());
    }
    let df_between = k - 1;
    let df_within = total_count - k;

    if ss_within <= ZERO_VARIANCE_RELATIVE_EPS * sum_sq_all {
        return Err(DegenerateInput::ZeroWithinVariance.into());
    }

    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;
    // Cancellation can leave SSbetween a hair below zero for equal means
    let f_statistic = (ms_between / ms_within).max(0.0);
    let p_value = f_survival(f_statistic, df_between, df_within)?;

    Ok(VariancePartition {
        groups: k,
        total_count,
        grand_total,
        ss_between,
        ss_within,
        ss_total,
        ss_total_direct,
        df_between,
        df_within,
        ms_between,
        ms_within,
        f_statistic,
        p_value,
    })
}
