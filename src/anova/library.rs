// Library one-way ANOVA using aprender
//
// This is the independent half of the dual computation: aprender's
// `f_oneway` works from group means and deviations in single precision,
// while the first-principles path works from raw totals in double precision.
// Agreement of the two F-statistics guards against a derivation bug in either.

use crate::anova::error::{AnovaError, Result};
use crate::anova::evaluator::reject_null;
use crate::anova::partition::{f_survival, VariancePartition};
use serde::{Deserialize, Serialize};

/// F-test as reported by the statistics library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryAnova {
    /// F-statistic
    pub statistic: f64,

    /// p-value
    pub pvalue: f64,

    /// Between-groups degrees of freedom
    pub df_between: usize,

    /// Within-groups degrees of freedom
    pub df_within: usize,
}

/// How the library F-statistic was judged against the derived one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Agreement {
    /// Relative F error within the configured tolerance
    WithinTolerance,

    /// SSwithin is too small next to SStotal for single precision to
    /// resolve it, so the library F carries no information
    BelowF32Resolution,

    /// F differs beyond tolerance but both F values give the same decision
    SameDecision,
}

impl Agreement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Agreement::WithinTolerance => "within tolerance",
            Agreement::BelowF32Resolution => "below f32 resolution",
            Agreement::SameDecision => "same decision",
        }
    }
}

/// Outcome of comparing the library result with the derived one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryCrossCheck {
    /// The library's F-test
    pub library: LibraryAnova,

    /// |F_library − F_derived| / max(|F_derived|, 1)
    pub relative_error: f64,

    /// Absolute difference between the two p-values (informational)
    pub pvalue_difference: f64,

    pub agreement: Agreement,
}

/// SSwithin at or below this many f32 ulps of SStotal is unresolvable in
/// single precision
const F32_RESOLUTION_ULPS: f64 = 16.0;

/// Run aprender's one-way ANOVA over the groups
///
/// Observations are centered on the grand mean before narrowing to `f32`.
/// The F-test is invariant under a common shift, and centering keeps large
/// offsets from eating the single-precision mantissa.
pub fn library_oneway(groups: &[&[f64]]) -> Result<LibraryAnova> {
    let count: usize = groups.iter().map(|g| g.len()).sum();
    let center = if count == 0 {
        0.0
    } else {
        groups.iter().flat_map(|g| g.iter()).sum::<f64>() / count as f64
    };

    let groups_f32: Vec<Vec<f32>> = groups
        .iter()
        .map(|g| g.iter().map(|&x| (x - center) as f32).collect())
        .collect();

    let result = aprender::stats::hypothesis::f_oneway(&groups_f32)
        .map_err(|e| AnovaError::Library(e.to_string()))?;

    Ok(LibraryAnova {
        statistic: f64::from(result.statistic),
        pvalue: f64::from(result.pvalue),
        df_between: result.df_between,
        df_within: result.df_within,
    })
}

/// Compare the library F-test with the derived partition
///
/// Degrees of freedom must match exactly. The F-statistics must agree within
/// `tolerance` (relative), except where single precision cannot resolve the
/// within-group variance, or where both F values lead to the same decision
/// at `probability_level`. Those cases are logged at `warn`. Fails with
/// [`AnovaError::LibraryMismatch`] otherwise.
pub fn cross_check(
    library: LibraryAnova,
    derived: &VariancePartition,
    probability_level: f64,
    tolerance: f64,
) -> Result<LibraryCrossCheck> {
    let derived_f = derived.f_statistic;
    let derived_p = derived.p_value;
    let relative_error = (library.statistic - derived_f).abs() / derived_f.abs().max(1.0);
    let pvalue_difference = (library.pvalue - derived_p).abs();

    tracing::debug!(
        library_f = library.statistic,
        derived_f,
        library_p = library.pvalue,
        derived_p,
        relative_error,
        "library cross-check"
    );

    let mismatch = AnovaError::LibraryMismatch {
        library: library.statistic,
        derived: derived_f,
    };

    if (library.df_between, library.df_within) != (derived.df_between, derived.df_within) {
        return Err(mismatch);
    }

    // NaN relative error (library overflow) never counts as within tolerance
    let agreement = if relative_error <= tolerance {
        Agreement::WithinTolerance
    } else if derived.ss_within <= F32_RESOLUTION_ULPS * f64::from(f32::EPSILON) * derived.ss_total
    {
        tracing::warn!(
            "Library F {} unreliable: SSwithin {:.3e} is below f32 resolution of SStotal {:.3e}",
            library.statistic,
            derived.ss_within,
            derived.ss_total
        );
        Agreement::BelowF32Resolution
    } else {
        if !library.statistic.is_finite() {
            return Err(mismatch);
        }
        // Library F through the same survival function, so only the
        // statistic is compared, not aprender's p-value approximation
        let library_p = f_survival(library.statistic, derived.df_between, derived.df_within)?;
        if reject_null(probability_level, library_p) != reject_null(probability_level, derived_p)
        {
            return Err(mismatch);
        }
        tracing::warn!(
            "Library F {} differs from derived F {} (relative error {:.2e}) without changing the decision",
            library.statistic,
            derived_f,
            relative_error
        );
        Agreement::SameDecision
    };

    if pvalue_difference > tolerance {
        tracing::warn!(
            "Library p-value {} differs from derived p-value {} by {:.2e}",
            library.pvalue,
            derived_p,
            pvalue_difference
        );
    }

    Ok(LibraryCrossCheck {
        library,
        relative_error,
        pvalue_difference,
        agreement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anova::partition::partition_variance;
    use crate::anova::sums::accumulate;

    fn shifted_partition() -> VariancePartition {
        let sums = accumulate(&[
            &[1.0, 2.0, 3.0, 4.0],
            &[2.0, 3.0, 4.0, 5.0],
            &[3.0, 4.0, 5.0, 6.0],
        ]);
        partition_variance(&sums, 5).unwrap()
    }

    fn library_result(statistic: f64) -> LibraryAnova {
        LibraryAnova {
            statistic,
            pvalue: 0.146,
            df_between: 2,
            df_within: 9,
        }
    }

    #[test]
    fn test_library_oneway_shifted_groups() {
        let result = library_oneway(&[
            &[1.0, 2.0, 3.0, 4.0],
            &[2.0, 3.0, 4.0, 5.0],
            &[3.0, 4.0, 5.0, 6.0],
        ])
        .unwrap();

        assert!((result.statistic - 2.4).abs() < 1e-4);
        assert_eq!(result.df_between, 2);
        assert_eq!(result.df_within, 9);
        assert!((0.0..=1.0).contains(&result.pvalue));
    }

    #[test]
    fn test_library_oneway_large_offset() {
        let offset = 1.0e7;
        let base = [
            [1.0, 2.0, 3.0, 4.0],
            [2.0, 3.0, 4.0, 5.0],
            [3.0, 4.0, 5.0, 6.0],
        ];
        let shifted: Vec<Vec<f64>> = base
            .iter()
            .map(|g| g.iter().map(|x| x + offset).collect())
            .collect();
        let slices: Vec<&[f64]> = shifted.iter().map(Vec::as_slice).collect();

        let result = library_oneway(&slices).unwrap();
        assert!((result.statistic - 2.4).abs() < 1e-3);
    }

    #[test]
    fn test_library_oneway_rejects_empty_group() {
        let err = library_oneway(&[&[1.0, 2.0], &[]]).unwrap_err();
        assert!(matches!(err, AnovaError::Library(_)));
    }

    #[test]
    fn test_cross_check_accepts_agreement() {
        let check =
            cross_check(library_result(2.400_001), &shifted_partition(), 0.05, 1e-3).unwrap();
        assert_eq!(check.agreement, Agreement::WithinTolerance);
        assert!(check.relative_error < 1e-5);
        assert!(check.pvalue_difference < 1e-3);
    }

    #[test]
    fn test_cross_check_tolerates_same_decision() {
        // sf(3.0; 2, 9) ≈ 0.100 and sf(2.4; 2, 9) ≈ 0.146: neither rejects at 5%
        let check =
            cross_check(library_result(3.0), &shifted_partition(), 0.05, 1e-3).unwrap();
        assert_eq!(check.agreement, Agreement::SameDecision);
    }

    #[test]
    fn test_cross_check_rejects_decision_flip() {
        // At 12% the library F would reject and the derived F would not
        let err =
            cross_check(library_result(3.0), &shifted_partition(), 0.12, 1e-3).unwrap_err();
        assert_eq!(
            err,
            AnovaError::LibraryMismatch {
                library: 3.0,
                derived: 2.4
            }
        );
    }

    #[test]
    fn test_cross_check_rejects_degrees_of_freedom_mismatch() {
        let mut library = library_result(2.4);
        library.df_within = 10;
        let err = cross_check(library, &shifted_partition(), 0.05, 1e-3).unwrap_err();
        assert!(matches!(err, AnovaError::LibraryMismatch { .. }));
    }

    #[test]
    fn test_cross_check_rejects_nan_when_resolvable() {
        let err = cross_check(library_result(f64::NAN), &shifted_partition(), 0.5, 1e-3)
            .unwrap_err();
        assert!(matches!(err, AnovaError::LibraryMismatch { .. }));
    }

    #[test]
    fn test_cross_check_below_f32_resolution() {
        // Within-group spread of 0.001 on a between-group spread of 1000
        let sums = accumulate(&[
            &[0.0, 0.001, 0.002],
            &[1000.0, 1000.001, 1000.002],
            &[2000.0, 2000.001, 2000.002],
        ]);
        let partition = partition_variance(&sums, 5).unwrap();
        let library = LibraryAnova {
            statistic: 3.1e12,
            pvalue: 0.0,
            df_between: 2,
            df_within: 6,
        };

        let check = cross_check(library, &partition, 0.05, 1e-3).unwrap();
        assert_eq!(check.agreement, Agreement::BelowF32Resolution);
    }
}
