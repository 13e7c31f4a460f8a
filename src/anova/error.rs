// Error taxonomy for one-way ANOVA evaluation
//
// Every error is an input-validation failure detected before a decision is
// produced. None are retryable.

use thiserror::Error;

/// Input shapes that make the F-ratio undefined
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateInput {
    #[error("group {index} is empty")]
    EmptyGroup { index: usize },

    /// `N - k <= 0`
    #[error("within-group degrees of freedom is non-positive ({total} observations across {groups} groups)")]
    InsufficientDegreesOfFreedom { total: usize, groups: usize },

    /// Every group is constant, so `MSwithin` would be zero
    #[error("within-group sum of squares is zero")]
    ZeroWithinVariance,
}

/// Errors for ANOVA evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnovaError {
    #[error(
        "Fatal calculation error: derived SStotal {derived} != direct SStotal {direct} at {decimals} decimal places"
    )]
    Consistency {
        derived: f64,
        direct: f64,
        decimals: u32,
    },

    #[error("Degenerate input: {0}")]
    DegenerateInput(DegenerateInput),

    #[error("Invalid threshold: probability level must be in (0, 1), got {0}")]
    InvalidThreshold(f64),

    #[error("Unequal group sizes: group {index} has {actual} observations, expected {expected}")]
    UnequalGroupSizes {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("ANOVA requires at least 2 groups, got {0}")]
    TooFewGroups(usize),

    #[error("Non-finite value in group {group} at position {index}")]
    NonFiniteValue { group: usize, index: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("F-distribution failed: {0}")]
    Distribution(String),

    #[error("Library ANOVA failed: {0}")]
    Library(String),

    #[error("Library F-statistic {library} disagrees with derived F-statistic {derived}")]
    LibraryMismatch { library: f64, derived: f64 },
}

impl From<DegenerateInput> for AnovaError {
    fn from(reason: DegenerateInput) -> Self {
        AnovaError::DegenerateInput(reason)
    }
}

pub type Result<T> = std::result::Result<T, AnovaError>;
