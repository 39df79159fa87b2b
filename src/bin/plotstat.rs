// src/bin/plotstat.rs
use clap::Parser;
use colored::Colorize;
use plotstat_core::cli::{self, Cli};
use plotstat_core::exit::PlotExit;
use tracing_subscriber::EnvFilter;

fn main() -> PlotExit {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli::handle_run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            PlotExit::Error
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "plotstat_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
