use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser)]
#[command(
    name = "plotstat",
    version,
    about = "Aggregate test-report files into per-build plot points"
)]
pub struct Cli {
    /// Workspace root to search for reports
    #[arg(value_name = "WORKSPACE", default_value = ".")]
    pub workspace: PathBuf,
    /// Report glob (repeatable); replaces the configured patterns
    #[arg(long = "pattern", short, value_name = "GLOB")]
    pub patterns: Vec<String>,
    /// Build number substituted for %build% in point URLs
    #[arg(long, short, default_value = "0")]
    pub build: u32,
    /// Point URL template (%name%, %index%, %build%)
    #[arg(long, value_name = "TEMPLATE")]
    pub url: Option<String>,
    /// Charset of report files (e.g. UTF-8, windows-1252)
    #[arg(long, value_name = "LABEL")]
    pub encoding: Option<String>,
    /// Parser chain order, comma separated (xml, surefire)
    #[arg(long, value_delimiter = ',', value_name = "FORMAT")]
    pub formats: Vec<String>,
    /// Config file (defaults to plotstat.toml in the workspace)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Parse reports one at a time
    #[arg(long)]
    pub sequential: bool,
    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_links: bool,
    /// Exit with a distinct code when any test failed or errored
    #[arg(long)]
    pub fail_on_failures: bool,
    #[arg(long, short)]
    pub verbose: bool,
}
