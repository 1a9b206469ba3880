//! Report rendering: console table, CSV and Markdown artifacts
//!
//! All three views share one column order and render records in encounter
//! order. The CSV and Markdown documents land at fixed relative filenames
//! and are overwritten unconditionally whenever a run produces results.

use crate::error::{MedirError, Result};
use crate::matrix::{SampleFormat, TrialSpec};
use crate::stats::SampleStats;
use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// CSV artifact filename, relative to the working directory.
pub const CSV_FILENAME: &str = "benchmark_results.csv";

/// Markdown artifact filename, relative to the working directory.
pub const MARKDOWN_FILENAME: &str = "benchmark_results.md";

/// Column order shared by the console table and both artifacts.
pub const REPORT_HEADERS: [&str; 9] = [
    "Filter",
    "Plugin",
    "Format",
    "Args",
    "Min",
    "Max",
    "Median",
    "Average",
    "Standard Deviation",
];

/// Reduced result of one trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Owning group (filter) name.
    pub filter: String,
    /// Plugin measured.
    pub plugin: String,
    /// Sample format measured.
    pub format: SampleFormat,
    /// Space-joined rendering of the trial arguments.
    pub args: String,
    /// Reduced statistics.
    pub stats: SampleStats,
}

impl TrialRecord {
    /// Builds the record for one finished trial.
    #[must_use]
    pub fn new(filter: &str, spec: &TrialSpec, stats: SampleStats) -> Self {
        Self {
            filter: filter.to_string(),
            plugin: spec.plugin.clone(),
            format: spec.format,
            args: spec.args.join(" "),
            stats,
        }
    }
}

// ============================================================================
// Renderers
// ============================================================================

/// Renders the CSV document: bare header row, quoted string fields, bare
/// numbers.
#[must_use]
pub fn render_csv(records: &[TrialRecord]) -> String {
    let mut csv = REPORT_HEADERS.join(",");
    csv.push('\n');
    for record in records {
        let stats = &record.stats;
        let _ = writeln!(
            csv,
            "\"{}\", \"{}\", \"{}\", \"{}\", {}, {}, {}, {}, {}",
            record.filter,
            record.plugin,
            record.format,
            record.args,
            stats.min,
            stats.max,
            stats.median,
            stats.average,
            stats.std_dev,
        );
    }
    csv
}

/// Renders the Markdown pipe-table: header row, centered-alignment separator
/// row, one row per record.
#[must_use]
pub fn render_markdown(records: &[TrialRecord]) -> String {
    let mut md = format!("| {} |\n", REPORT_HEADERS.join(" | "));
    let markers: Vec<&str> = REPORT_HEADERS.iter().map(|_| ":---: |").collect();
    let _ = writeln!(md, "| {}", markers.join(" "));
    for record in records {
        let stats = &record.stats;
        let _ = writeln!(
            md,
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} |",
            record.filter,
            record.plugin,
            record.format,
            record.args,
            stats.min,
            stats.max,
            stats.median,
            stats.average,
            stats.std_dev,
        );
    }
    md
}

/// Renders the aligned table printed to the console after all trials finish.
#[must_use]
pub fn render_console_table(records: &[TrialRecord]) -> String {
    let mut table = String::new();
    let _ = writeln!(
        table,
        "{:<18} {:<12} {:<7} {:<29} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Filter", "Plugin", "Format", "Args", "Min", "Max", "Median", "Average", "StdDev",
    );
    let _ = writeln!(table, "{}", "-".repeat(124));
    for record in records {
        let stats = &record.stats;
        let _ = writeln!(
            table,
            "{:<18} {:<12} {:<7} {:<29} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            record.filter,
            record.plugin,
            record.format.as_str(),
            record.args,
            stats.min,
            stats.max,
            stats.median,
            stats.average,
            stats.std_dev,
        );
    }
    table
}

// ============================================================================
// Artifact writes
// ============================================================================

fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| MedirError::ReportWrite {
        path: path.display().to_string(),
        source,
    })
}

/// Writes both artifacts into `dir`, overwriting unconditionally and
/// announcing each write on the console.
///
/// # Errors
///
/// Returns [`MedirError::ReportWrite`] when either file cannot be written.
pub fn write_reports(dir: &Path, records: &[TrialRecord]) -> Result<()> {
    println!("Writing results to {CSV_FILENAME}");
    write_artifact(&dir.join(CSV_FILENAME), &render_csv(records))?;

    println!("Writing results to {MARKDOWN_FILENAME}");
    write_artifact(&dir.join(MARKDOWN_FILENAME), &render_markdown(records))?;
    Ok(())
}

/// Writes the records as pretty-printed JSON to `path`.
///
/// # Errors
///
/// Returns [`MedirError::ReportWrite`] on serialization or write failure.
pub fn write_json(path: &Path, records: &[TrialRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).map_err(|source| MedirError::ReportWrite {
        path: path.display().to_string(),
        source: source.into(),
    })?;
    write_artifact(path, &json)
}

// ============================================================================
// Tests
// ============================================================================
