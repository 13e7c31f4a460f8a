// Configuration for one-way ANOVA evaluation
//
// Loaded from an `anova.toml` file or built in code. Every field has a
// default so a partial TOML table is valid.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest rounding precision accepted for the SStotal consistency check
pub const MAX_CONSISTENCY_DECIMALS: u32 = 12;

/// Configuration for ANOVA evaluation
///
/// # Example
/// ```
/// use anova_eval::anova::AnovaConfig;
///
/// let config = AnovaConfig::default();
/// assert_eq!(config.significance_level, 0.05);
/// assert_eq!(config.consistency_decimals, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnovaConfig {
    /// Significance level (alpha) used when the caller does not pass one
    ///
    /// - 0.05 (default): reject equal means when p < 0.05
    /// - 0.01: stricter
    /// - 0.10: looser
    pub significance_level: f64,

    /// Decimal places at which `SSbetween + SSwithin` must match the
    /// directly computed total sum of squares
    ///
    /// Default: 5
    pub consistency_decimals: u32,

    /// Reject groups of unequal length
    ///
    /// When false, each group's own size is used in the sums of squares.
    ///
    /// Default: true
    pub require_balanced: bool,

    /// Run the library one-way ANOVA and compare its F-statistic with the
    /// first-principles one
    ///
    /// Default: true
    pub library_cross_check: bool,

    /// Relative tolerance between the library and derived F-statistics
    ///
    /// The library works in single precision, so this cannot be tighter
    /// than roughly 1e-6.
    ///
    /// Default: 1e-3
    pub cross_check_tolerance: f64,

    /// Emit the diagnostics tuple as an `info` tracing event
    ///
    /// Default: false
    pub emit_diagnostics: bool,
}

impl Default for AnovaConfig {
    fn default() -> Self {
        Self {
            significance_level: 0.05, // 95% confidence
            consistency_decimals: 5,
            require_balanced: true,
            library_cross_check: true,
            cross_check_tolerance: 1e-3,
            emit_diagnostics: false,
        }
    }
}

impl AnovaConfig {
    /// Create a strict configuration (99% confidence, tighter checks)
    pub fn strict() -> Self {
        Self {
            significance_level: 0.01,
            consistency_decimals: 8,
            require_balanced: true,
            library_cross_check: true,
            cross_check_tolerance: 1e-4,
            emit_diagnostics: false,
        }
    }

    /// Create a permissive configuration (90% confidence, unbalanced groups allowed)
    pub fn permissive() -> Self {
        Self {
            significance_level: 0.10,
            consistency_decimals: 5,
            require_balanced: false,
            library_cross_check: true,
            cross_check_tolerance: 1e-2,
            emit_diagnostics: false,
        }
    }

    /// Load configuration from a TOML file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use anova_eval::anova::AnovaConfig;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = AnovaConfig::from_file("anova.toml")?;
    /// println!("alpha = {}", config.significance_level);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            ));
        }

        if self.consistency_decimals > MAX_CONSISTENCY_DECIMALS {
            return Err(format!(
                "consistency_decimals must be <= {}, got {}",
                MAX_CONSISTENCY_DECIMALS, self.consistency_decimals
            ));
        }

        if !self.cross_check_tolerance.is_finite() || self.cross_check_tolerance <= 0.0 {
            return Err(format!(
                "cross_check_tolerance must be positive and finite, got {}",
                self.cross_check_tolerance
            ));
        }

        Ok(())
    }
}
