//! CLI argument parsing for anova-eval

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// Output format for the ANOVA report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

/// One sample group given as comma-separated numbers (e.g. `1,2,3.5`)
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGroup(pub Vec<f64>);

impl FromStr for SampleGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| {
                v.parse::<f64>()
                    .map_err(|e| format!("invalid number '{}': {}", v, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if values.is_empty() {
            return Err("group must contain at least one number".to_string());
        }

        Ok(SampleGroup(values))
    }
}

#[derive(Parser, Debug)]
#[command(name = "anova-eval")]
#[command(version)]
#[command(about = "One-way ANOVA with F-test, p-value and effect sizes", long_about = None)]
pub struct Cli {
    /// Sample group as comma-separated numbers (repeat for each group)
    #[arg(
        short = 'g',
        long = "group",
        value_name = "VALUES",
        required = true,
        allow_hyphen_values = true
    )]
    pub groups: Vec<SampleGroup>,

    /// Significance level (overrides the config file)
    #[arg(short = 'a', long = "alpha", value_name = "ALPHA")]
    pub alpha: Option<f64>,

    /// Load analysis settings from a TOML file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Use each group's own size instead of requiring equal sizes
    #[arg(long = "allow-unbalanced")]
    pub allow_unbalanced: bool,

    /// Skip the library F-test cross-check
    #[arg(long = "no-cross-check")]
    pub no_cross_check: bool,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
