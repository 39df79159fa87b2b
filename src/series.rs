// src/series.rs
//! The aggregation pipeline: locate reports, parse each through the chain,
//! fold the successes and turn the build total into plot points.

use crate::cancel::CancellationToken;
use crate::config::Config;
use crate::discovery::{self, Candidate, PatternSet};
use crate::error::Result;
use crate::parser::{ParseOutcome, ParserChain};
use crate::stats::{Outcome, TestStatistics};
use crate::workspace::Workspace;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// Legend label of the series.
pub const SERIES_LABEL: &str = "Build's test statistics";

const NAME_TOKEN: &str = "%name%";
const INDEX_TOKEN: &str = "%index%";
const BUILD_TOKEN: &str = "%build%";

/// One labelled value destined for a build-history chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPoint {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub value: u64,
}

/// Substitutes `%name%`, `%index%` and `%build%` in a point URL template.
#[must_use]
pub fn expand_url(template: &str, label: &str, index: usize, build: u32) -> String {
    template
        .replace(NAME_TOKEN, label)
        .replace(INDEX_TOKEN, &index.to_string())
        .replace(BUILD_TOKEN, &build.to_string())
}

impl TestStatistics {
    /// Four points in the order passed, skipped, errors, failed.
    #[must_use]
    pub fn to_plot_points(&self, url_template: Option<&str>, build: u32) -> Vec<PlotPoint> {
        Outcome::ALL
            .iter()
            .enumerate()
            .map(|(index, &outcome)| PlotPoint {
                label: outcome.label().to_string(),
                url: url_template.map(|t| expand_url(t, outcome.label(), index, build)),
                value: self.get(outcome),
            })
            .collect()
    }
}

/// Test-statistics series for one build.
///
/// Holds no per-build state: every [`StatisticsSeries::load_series`] call
/// walks, parses and folds afresh, so one instance may serve concurrent builds.
#[derive(Debug, Clone)]
pub struct StatisticsSeries {
    patterns: PatternSet,
    chain: ParserChain,
    url: Option<String>,
    parallel: bool,
}

impl StatisticsSeries {
    #[must_use]
    pub fn new(patterns: PatternSet, chain: ParserChain) -> Self {
        Self {
            patterns,
            chain,
            url: None,
            parallel: true,
        }
    }

    /// Builds the series described by `config`.
    ///
    /// # Errors
    /// Returns error if the patterns, formats or encoding are invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        let patterns = config.pattern_set()?;
        let chain = ParserChain::new(&config.formats()?, config.encoding()?)?;
        Ok(Self::new(patterns, chain)
            .with_url(config.url.clone())
            .with_parallel(config.parallel))
    }

    #[must_use]
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        SERIES_LABEL
    }

    /// Plot points for the reports found under `root`.
    ///
    /// Always four points, zero-valued when nothing matched or nothing
    /// parsed. The only exception is cancellation during discovery, which
    /// yields an empty list; cancellation while parsing yields the points of
    /// whatever was parsed before it. In both cases `cancel` stays set.
    pub fn load_series(
        &self,
        workspace: &dyn Workspace,
        root: &Path,
        build: u32,
        cancel: &CancellationToken,
    ) -> Vec<PlotPoint> {
        match self.aggregate(workspace, root, cancel) {
            Some(total) => self.points(&total, build),
            None => Vec::new(),
        }
    }

    /// Points for an already computed aggregate, with this series' URLs.
    #[must_use]
    pub fn points(&self, total: &TestStatistics, build: u32) -> Vec<PlotPoint> {
        total.to_plot_points(self.url.as_deref(), build)
    }

    /// The build aggregate, or `None` if discovery was cancelled.
    pub fn aggregate(
        &self,
        workspace: &dyn Workspace,
        root: &Path,
        cancel: &CancellationToken,
    ) -> Option<TestStatistics> {
        let candidates = discovery::locate(workspace, root, &self.patterns, cancel);
        if cancel.is_cancelled() {
            return None;
        }

        if candidates.is_empty() {
            warn!(
                "For patterns {} no matching files were found in fs tree with root '{}'.",
                self.patterns,
                root.display()
            );
            return Some(TestStatistics::default());
        }

        let total = if self.parallel {
            candidates
                .par_iter()
                .filter_map(|c| self.parse_one(workspace, c, cancel))
                .reduce(TestStatistics::default, TestStatistics::merge)
        } else {
            candidates
                .iter()
                .filter_map(|c| self.parse_one(workspace, c, cancel))
                .sum::<TestStatistics>()
        };

        if cancel.is_cancelled() {
            warn!(
                "Aggregation under '{}' cancelled; totals are partial",
                root.display()
            );
        } else {
            info!(
                "Aggregated {} report(s) under '{}': {total:?}",
                candidates.len(),
                root.display()
            );
        }
        Some(total)
    }

    fn parse_one(
        &self,
        workspace: &dyn Workspace,
        candidate: &Candidate,
        cancel: &CancellationToken,
    ) -> Option<TestStatistics> {
        if cancel.is_cancelled() {
            return None;
        }
        match self.chain.parse(workspace, candidate) {
            ParseOutcome::Success(stats) => Some(stats),
            ParseOutcome::Failure(reason) => {
                warn!("Failed to parse file '{candidate}': {reason}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_tokens_are_substituted() {
        assert_eq!(
            expand_url("https://ci/%build%/tests#%name%-%index%-%name%", "failed", 3, 42),
            "https://ci/42/tests#failed-3-failed"
        );
        assert_eq!(expand_url("plain", "passed", 0, 1), "plain");
    }

    #[test]
    fn points_have_fixed_order_and_labels() {
        let points = TestStatistics::new(4, 3, 2, 1).to_plot_points(None, 7);
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        let values: Vec<u64> = points.iter().map(|p| p.value).collect();
        assert_eq!(labels, vec!["passed", "skipped", "errors", "failed"]);
        assert_eq!(values, vec![4, 3, 2, 1]);
        assert!(points.iter().all(|p| p.url.is_none()));
    }

    #[test]
    fn point_urls_use_position_and_build() {
        let points = TestStatistics::default().to_plot_points(Some("/job/%build%/%index%/%name%"), 9);
        assert_eq!(points[0].url.as_deref(), Some("/job/9/0/passed"));
        assert_eq!(points[3].url.as_deref(), Some("/job/9/3/failed"));
    }
}
