//! Locates test-report files in a build workspace, parses each with the
//! first format parser that accepts it, and folds the counts into one set of
//! plot points per build.

pub mod cancel;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod parser;
pub mod reporting;
pub mod series;
pub mod stats;
pub mod workspace;

pub use cancel::CancellationToken;
pub use error::{ParseError, PlotError};
pub use series::{PlotPoint, StatisticsSeries};
pub use stats::TestStatistics;
