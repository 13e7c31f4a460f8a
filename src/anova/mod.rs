// One-way Analysis of Variance with dual computation
//
// This module tests H0: μ₁ = μ₂ = ... = μₖ for independent sample groups and
// reports the F-statistic, p-value, eta-squared and omega-squared.
//
// Every F-test is computed twice:
// - From first principles: group totals and raw sums of squares (f64),
//   with SSbetween + SSwithin checked against the direct SStotal
// - By aprender's `f_oneway` (f32), whose F-statistic must agree unless
//   single precision cannot resolve SSwithin or the decision is unchanged
//
// Assumptions (not tested here): normally distributed populations, equal
// population variances, independent samples.
//
// Implementation:
// - Uses aprender (crates.io) for the library one-way ANOVA
// - Uses statrs (crates.io) for the F-distribution survival function
// - Post-hoc tests (Scheffé, Tukey) are out of scope

mod config;
mod effect_size;
mod error;
mod evaluator;
mod library;
mod partition;
mod report;
mod sums;

pub use config::AnovaConfig;
pub use effect_size::{eta_squared, omega_squared, EffectSize};
pub use error::{AnovaError, DegenerateInput, Result};
pub use evaluator::{
    evaluate, evaluate_with_report, reject_null, validate_groups, validate_threshold,
    AnovaEvaluator,
};
pub use library::{cross_check, library_oneway, Agreement, LibraryAnova, LibraryCrossCheck};
pub use partition::{f_survival, partition_variance, round_to, VariancePartition};
pub use report::{AnovaReport, Diagnostics};
pub use sums::{accumulate, GroupSums};
