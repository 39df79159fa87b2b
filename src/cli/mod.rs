// src/cli/mod.rs
//! CLI command handler.

pub mod args;

pub use args::{Cli, OutputFormat};

use crate::cancel::CancellationToken;
use crate::config::Config;
use crate::exit::PlotExit;
use crate::reporting;
use crate::series::StatisticsSeries;
use crate::workspace::LocalWorkspace;
use anyhow::Result;
use colored::Colorize;

/// Applies command-line overrides on top of the loaded config.
pub fn apply_overrides(config: &mut Config, cli: &Cli) {
    if !cli.patterns.is_empty() {
        config.patterns.clone_from(&cli.patterns);
    }
    if !cli.formats.is_empty() {
        config.formats.clone_from(&cli.formats);
    }
    if cli.encoding.is_some() {
        config.encoding.clone_from(&cli.encoding);
    }
    if cli.url.is_some() {
        config.url.clone_from(&cli.url);
    }
    if cli.sequential {
        config.parallel = false;
    }
    if cli.follow_links {
        config.follow_links = true;
    }
}

/// Resolves config, runs the pipeline and prints the points.
///
/// # Errors
/// Returns error if writing the output fails.
pub fn handle_run(cli: &Cli) -> Result<PlotExit> {
    let (config, series) = match load_series(cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            return Ok(PlotExit::InvalidConfig);
        }
    };

    let workspace = LocalWorkspace::new().follow_links(config.follow_links);
    let cancel = CancellationToken::new();
    let total = series
        .aggregate(&workspace, &cli.workspace, &cancel)
        .unwrap_or_default();
    let points = series.points(&total, cli.build);

    match cli.format {
        OutputFormat::Json => reporting::print_json(&points)?,
        OutputFormat::Text => reporting::print_points(series.label(), &points, &total),
    }

    if cli.fail_on_failures && (total.failed > 0 || total.errors > 0) {
        return Ok(PlotExit::TestsFailed);
    }
    Ok(PlotExit::Success)
}

fn load_series(cli: &Cli) -> crate::error::Result<(Config, StatisticsSeries)> {
    let mut config = Config::load(&cli.workspace, cli.config.as_deref())?;
    apply_overrides(&mut config, cli);
    config.validate()?;
    let series = StatisticsSeries::from_config(&config)?;
    Ok((config, series))
}
