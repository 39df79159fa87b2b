//! Console output for a build's plot points.

use crate::series::PlotPoint;
use crate::stats::TestStatistics;
use anyhow::Result;
use colored::{ColoredString, Colorize};
use std::fmt::Write;

/// Renders the points as an aligned table with a totals line.
#[must_use]
pub fn render_points(label: &str, points: &[PlotPoint], total: &TestStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", label.bold());

    for point in points {
        let value = colorize(&point.label, point.value);
        let _ = write!(out, "  {:<8} {value:>8}", point.label);
        if let Some(url) = &point.url {
            let _ = write!(out, "  {}", url.dimmed());
        }
        out.push('\n');
    }

    let _ = writeln!(out, "  {:<8} {:>8}", "total", total.total());
    out
}

fn colorize(label: &str, value: u64) -> ColoredString {
    let text = value.to_string();
    match label {
        _ if value == 0 => text.normal(),
        "passed" => text.green(),
        "skipped" => text.yellow(),
        _ => text.red().bold(),
    }
}

pub fn print_points(label: &str, points: &[PlotPoint], total: &TestStatistics) {
    print!("{}", render_points(label, points, total));
}

/// Writes the points as a JSON array to stdout.
///
/// # Errors
/// Returns error if serialization fails.
pub fn print_json(points: &[PlotPoint]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(points)?);
    Ok(())
}
