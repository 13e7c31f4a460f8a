// One-way ANOVA evaluator
//
// Validates groups and threshold, runs the first-principles partition and
// the library F-test, computes effect sizes and applies the decision rule:
// reject equal means iff probability_level > p_value.

use crate::anova::config::AnovaConfig;
use crate::anova::effect_size::EffectSize;
use crate::anova::error::{AnovaError, DegenerateInput, Result};
use crate::anova::library::{cross_check, library_oneway};
use crate::anova::partition::partition_variance;
use crate::anova::report::AnovaReport;
use crate::anova::sums::accumulate;

/// Evaluates one-way ANOVA under a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct AnovaEvaluator {
    config: AnovaConfig,
}

impl AnovaEvaluator {
    /// Create an evaluator, rejecting an invalid configuration
    pub fn new(config: AnovaConfig) -> Result<Self> {
        config.validate().map_err(AnovaError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnovaConfig {
        &self.config
    }

    /// Analyze at the configured significance level
    pub fn analyze(&self, groups: &[&[f64]]) -> Result<AnovaReport> {
        self.analyze_at(groups, self.config.significance_level)
    }

    /// Analyze at an explicit significance level
    ///
    /// # Example
    /// ```
    /// use anova_eval::anova::AnovaEvaluator;
    ///
    /// let evaluator = AnovaEvaluator::default();
    /// let report = evaluator
    ///     .analyze_at(
    ///         &[&[10.0, 11.0, 12.0, 13.0], &[20.0, 21.0, 22.0, 23.0], &[30.0, 31.0, 32.0, 33.0]],
    ///         0.05,
    ///     )
    ///     .unwrap();
    /// assert!(report.reject_null);
    /// ```
    pub fn analyze_at(&self, groups: &[&[f64]], probability_level: f64) -> Result<AnovaReport> {
        validate_threshold(probability_level)?;
        validate_groups(groups, self.config.require_balanced)?;

        let sums = accumulate(groups);
        let partition = partition_variance(&sums, self.config.consistency_decimals)?;

        let library = if self.config.library_cross_check {
            let library = library_oneway(groups)?;
            Some(cross_check(
                library,
                &partition,
                probability_level,
                self.config.cross_check_tolerance,
            )?)
        } else {
            None
        };

        let effect_size = EffectSize::from_partition(&partition);
        let reject_null = reject_null(probability_level, partition.p_value);

        let report = AnovaReport {
            groups: sums,
            partition,
            effect_size,
            library,
            probability_level,
            reject_null,
        };

        if self.config.emit_diagnostics {
            let d = report.diagnostics();
            tracing::info!(
                f_statistic = d.f_statistic,
                p_value = d.p_value,
                ss_total = d.ss_total,
                eta_squared = d.eta_squared,
                omega_squared = d.omega_squared,
                reject_null,
                "one-way ANOVA"
            );
        }

        Ok(report)
    }
}

/// Decision rule: reject equal means iff `probability_level > p_value`
///
/// Equality does not reject.
pub fn reject_null(probability_level: f64, p_value: f64) -> bool {
    probability_level > p_value
}

/// Reject thresholds outside the open interval (0, 1), including NaN
pub fn validate_threshold(probability_level: f64) -> Result<()> {
    if probability_level > 0.0 && probability_level < 1.0 {
        Ok(())
    } else {
        Err(AnovaError::InvalidThreshold(probability_level))
    }
}

/// Check group count, emptiness, finiteness and (optionally) equal sizes
pub fn validate_groups(groups: &[&[f64]], require_balanced: bool) -> Result<()> {
    if groups.len() < 2 {
        return Err(AnovaError::TooFewGroups(groups.len()));
    }

    for (group, samples) in groups.iter().enumerate() {
        if samples.is_empty() {
            return Err(DegenerateInput::EmptyGroup { index: group }.into());
        }
        if let Some(index) = samples.iter().position(|x| !x.is_finite()) {
            return Err(AnovaError::NonFiniteValue { group, index });
        }
    }

    if require_balanced {
        let expected = groups[0].len();
        if let Some((index, g)) = groups
            .iter()
            .enumerate()
            .find(|(_, g)| g.len() != expected)
        {
            return Err(AnovaError::UnequalGroupSizes {
                index,
                expected,
                actual: g.len(),
            });
        }
    }

    Ok(())
}

/// Three-group one-way ANOVA decision
///
/// Returns `true` when the null hypothesis of equal means is rejected at
/// `probability_level`. Groups must be non-empty and of equal length.
///
/// # Example
/// ```
/// use anova_eval::anova::evaluate;
///
/// let placebo = [1.0, 2.0, 3.0, 4.0];
/// let low_dose = [2.0, 3.0, 4.0, 5.0];
/// let moderate_dose = [3.0, 4.0, 5.0, 6.0];
///
/// // p ≈ 0.146: not significant at 5%
/// assert!(!evaluate(&placebo, &low_dose, &moderate_dose, 0.05).unwrap());
/// ```
pub fn evaluate(
    group1: &[f64],
    group2: &[f64],
    group3: &[f64],
    probability_level: f64,
) -> Result<bool> {
    evaluate_with_report(group1, group2, group3, probability_level).map(|r| r.reject_null)
}

/// Three-group one-way ANOVA with the full report
pub fn evaluate_with_report(
    group1: &[f64],
    group2: &[f64],
    group3: &[f64],
    probability_level: f64,
) -> Result<AnovaReport> {
    AnovaEvaluator::default().analyze_at(&[group1, group2, group3], probability_level)
}
