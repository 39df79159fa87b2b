// tests/unit_series_memory.rs
//! Pipeline behavior against the in-memory workspace.

use anyhow::Result;
use plotstat_core::discovery::PatternSet;
use plotstat_core::parser::{ParserChain, ReportFormat};
use plotstat_core::workspace::{MemoryWorkspace, Workspace};
use plotstat_core::{CancellationToken, PlotError, StatisticsSeries, TestStatistics};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

fn workspace() -> MemoryWorkspace {
    MemoryWorkspace::new()
        .with_file(
            "/ws/app/target/surefire-reports/AppTest.txt",
            "Tests run: 10, Failures: 1, Errors: 2, Skipped: 3\n",
        )
        .with_file(
            "/ws/lib/build/test-results/reports/TEST-Lib.xml",
            r#"<testsuite tests="20" failures="2" errors="1" skipped="0"/>"#,
        )
        .with_file("/ws/README.md", "# readme")
}

fn series() -> Result<StatisticsSeries> {
    let patterns = PatternSet::new(&["**/*.txt", "**/*.xml", "**/*.md"])?;
    Ok(StatisticsSeries::new(patterns, ParserChain::standard()?))
}

#[test]
fn aggregates_in_memory_tree() -> Result<()> {
    let total = series()?.aggregate(&workspace(), Path::new("/ws"), &CancellationToken::new());
    assert_eq!(total, Some(TestStatistics::new(21, 3, 3, 3)));
    Ok(())
}

#[test]
fn chain_order_does_not_change_totals() -> Result<()> {
    let patterns = PatternSet::new(&["**/*"])?;
    let reversed = ParserChain::new(
        &[ReportFormat::Surefire, ReportFormat::Xml],
        encoding_rs::UTF_8,
    )?;
    let total = StatisticsSeries::new(patterns, reversed)
        .with_parallel(false)
        .aggregate(&workspace(), Path::new("/ws"), &CancellationToken::new());
    assert_eq!(total, Some(TestStatistics::new(21, 3, 3, 3)));
    Ok(())
}

#[test]
fn empty_chain_fails_at_construction() {
    assert!(matches!(
        ParserChain::new(&[], encoding_rs::UTF_8),
        Err(PlotError::EmptyChain)
    ));
}

#[test]
fn cancelled_before_start_returns_no_points() -> Result<()> {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let points = series()?.load_series(&workspace(), Path::new("/ws"), 3, &cancel);
    assert!(points.is_empty());
    assert!(cancel.is_cancelled());
    Ok(())
}

/// Trips the token as soon as the first report is opened.
struct CancelOnOpen {
    inner: MemoryWorkspace,
    cancel: CancellationToken,
}

impl Workspace for CancelOnOpen {
    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        self.inner.list(dir)
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        self.inner.is_dir(path)
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        self.cancel.cancel();
        self.inner.open(path)
    }

    fn canonical(&self, path: &Path) -> io::Result<PathBuf> {
        self.inner.canonical(path)
    }
}

#[test]
fn cancelled_while_parsing_keeps_partial_totals() -> Result<()> {
    let cancel = CancellationToken::new();
    let ws = CancelOnOpen {
        inner: workspace(),
        cancel: cancel.clone(),
    };
    // Breadth-first order opens AppTest.txt before TEST-Lib.xml.
    let total = series()?
        .with_parallel(false)
        .aggregate(&ws, Path::new("/ws"), &cancel);
    assert_eq!(total, Some(TestStatistics::new(4, 3, 2, 1)));
    assert!(cancel.is_cancelled());
    Ok(())
}

#[test]
fn unreadable_directory_means_no_candidates() -> Result<()> {
    let ws = workspace().with_unreadable_dir("/ws/locked");
    let points = series()?.load_series(&ws, Path::new("/ws"), 3, &CancellationToken::new());
    let values: Vec<u64> = points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![0, 0, 0, 0]);
    Ok(())
}

#[test]
fn urls_follow_template() -> Result<()> {
    let points = series()?
        .with_url(Some("/job/%build%/%index%-%name%".to_string()))
        .load_series(&workspace(), Path::new("/ws"), 42, &CancellationToken::new());
    let urls: Vec<&str> = points.iter().filter_map(|p| p.url.as_deref()).collect();
    assert_eq!(
        urls,
        vec!["/job/42/0-passed", "/job/42/1-skipped", "/job/42/2-errors", "/job/42/3-failed"]
    );
    Ok(())
}
