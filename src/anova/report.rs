// Structured ANOVA result and its human-readable rendering

use crate::anova::effect_size::EffectSize;
use crate::anova::library::LibraryCrossCheck;
use crate::anova::partition::VariancePartition;
use crate::anova::sums::GroupSums;
use serde::{Deserialize, Serialize};

/// Headline numbers of one evaluation
///
/// Replaces console printing of intermediate values: callers read the
/// fields instead of parsing text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub f_statistic: f64,
    pub p_value: f64,
    pub ss_total: f64,
    pub eta_squared: f64,
    pub omega_squared: f64,
}

/// Complete one-way ANOVA result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnovaReport {
    /// Per-group accumulators, in input order
    pub groups: Vec<GroupSums>,

    /// Sums of squares, degrees of freedom, F and p
    pub partition: VariancePartition,

    /// Eta-squared and omega-squared
    pub effect_size: EffectSize,

    /// Library comparison, absent when the cross-check is disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<LibraryCrossCheck>,

    /// Significance level the decision was made at
    pub probability_level: f64,

    /// True when the null hypothesis of equal means is rejected
    pub reject_null: bool,
}

impl AnovaReport {
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            f_statistic: self.partition.f_statistic,
            p_value: self.partition.p_value,
            ss_total: self.partition.ss_total,
            eta_squared: self.effect_size.eta_squared,
            omega_squared: self.effect_size.omega_squared,
        }
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let p = &self.partition;
        let mut report = String::new();

        if self.reject_null {
            report.push_str("❌ REJECT H0: at least one group mean differs\n\n");
        } else {
            report.push_str("✅ FAIL TO REJECT H0: no significant difference between means\n\n");
        }
        report.push_str(&format!(
            "Significance level: {} ({:.1}% confidence)\n",
            self.probability_level,
            (1.0 - self.probability_level) * 100.0
        ));
        report.push_str(&format!(
            "F({}, {}) = {:.4}, p = {:.6}\n",
            p.df_between, p.df_within, p.f_statistic, p.p_value
        ));

        report.push_str("\n📊 Groups:\n");
        for (i, g) in self.groups.iter().enumerate() {
            report.push_str(&format!(
                "  group {} (n={}, sum={:.4}, mean={:.4})\n",
                i + 1,
                g.n,
                g.total,
                g.mean()
            ));
        }

        report.push_str("\n📐 Sums of squares:\n");
        report.push_str(&format!(
            "  between = {:.5} (df={}, MS={:.5})\n",
            p.ss_between, p.df_between, p.ms_between
        ));
        report.push_str(&format!(
            "  within  = {:.5} (df={}, MS={:.5})\n",
            p.ss_within, p.df_within, p.ms_within
        ));
        report.push_str(&format!(
            "  total   = {:.5} (direct {:.5})\n",
            p.ss_total, p.ss_total_direct
        ));

        report.push_str("\n📏 Effect size:\n");
        report.push_str(&format!(
            "  eta² = {:.4}, ω² = {:.4}\n",
            self.effect_size.eta_squared, self.effect_size.omega_squared
        ));

        if let Some(check) = &self.library {
            report.push_str(&format!(
                "\n🔁 Library cross-check: F = {:.4}, p = {:.6} (relative error {:.2e}, {})\n",
                check.library.statistic,
                check.library.pvalue,
                check.relative_error,
                check.agreement.as_str()
            ));
        }

        report
    }
}
