use anova_eval::anova::{AnovaConfig, AnovaEvaluator};
use anova_eval::cli::{Cli, OutputFormat};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Merge the config file (if any) with command-line overrides
fn build_config(args: &Cli) -> Result<AnovaConfig> {
    let mut config = match &args.config {
        Some(path) => AnovaConfig::from_file(path)?,
        None => AnovaConfig::default(),
    };

    if let Some(alpha) = args.alpha {
        config.significance_level = alpha;
    }
    if args.allow_unbalanced {
        config.require_balanced = false;
    }
    if args.no_cross_check {
        config.library_cross_check = false;
    }
    config.emit_diagnostics |= args.debug;

    Ok(config)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.groups.len() < 2 {
        anyhow::bail!(
            "At least 2 groups are required, got {} (repeat --group for each group)",
            args.groups.len()
        );
    }

    init_tracing(args.debug);

    let config = build_config(&args)?;
    let evaluator = AnovaEvaluator::new(config)?;

    let groups: Vec<&[f64]> = args.groups.iter().map(|g| g.0.as_slice()).collect();
    let report = evaluator
        .analyze(&groups)
        .context("One-way ANOVA failed")?;

    match args.format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
