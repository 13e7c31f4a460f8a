//! anova-eval - One-way analysis of variance with dual computation
//!
//! This library tests whether independent sample groups share a population
//! mean. The F-test is derived from first principles, checked for internal
//! consistency and cross-checked against a statistics library, then reported
//! with eta-squared and omega-squared effect sizes.

pub mod anova;
pub mod cli;
