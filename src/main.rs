//! Medir CLI - VapourSynth filter benchmark harness
//!
//! Runs the full benchmark matrix (or a filtered slice of it) through
//! `vspipe`, then prints and writes frames-per-second statistics.
//!
//! # Examples
//!
//! - `medir` - run everything
//! - `medir --filter TemporalMedian` - one filter group
//! - `medir --plugin zsmooth --format u8` - narrow by plugin and format
//! - `medir --frame-count-scale 0.25 --list` - preview a quarter-length run

use std::path::{Path, PathBuf};

use clap::Parser;
use medir::{
    harness::run_selection,
    matrix::{benchmark_matrix, FrameBudget},
    report::{render_console_table, write_json, write_reports},
    runner::VspipeInvoker,
    select::{select, Selection, TrialFilter},
    Result,
};

/// Medir - VapourSynth filter benchmark harness
///
/// Benchmarks zsmooth filters against alternative plugin implementations.
#[derive(Parser)]
#[command(name = "medir")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Benchmark only the named filter groups (repeatable)
    #[arg(long, value_name = "NAME")]
    filter: Vec<String>,

    /// Benchmark only the named plugins (repeatable)
    #[arg(long, value_name = "NAME")]
    plugin: Vec<String>,

    /// Benchmark only the named sample formats: u8, u16, f16, f32 (repeatable)
    #[arg(long, value_name = "FORMAT")]
    format: Vec<String>,

    /// Skip the named plugins (repeatable)
    #[arg(long, value_name = "NAME")]
    exclude_plugin: Vec<String>,

    /// Scale factor applied to every trial's default frame count
    #[arg(long, default_value_t = 1.0, value_name = "FACTOR")]
    frame_count_scale: f64,

    /// Print the selected trials without running anything
    #[arg(long)]
    list: bool,

    /// Also write the summary records as JSON to PATH
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

/// Collapses clap's empty-when-absent vectors into the optional allow-lists
/// the selector expects.
fn optional(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn print_trial_list(selection: &Selection<'_>) {
    for selected in &selection.groups {
        for spec in &selected.trials {
            println!(
                "{} {} {} [{}] {} frames",
                selected.group.filter,
                spec.plugin,
                spec.format,
                spec.args.join(" "),
                spec.frames.round() as u64,
            );
        }
    }
    println!("{} trials selected", selection.trial_count());
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let budget = FrameBudget::from_scale(cli.frame_count_scale);
    let matrix = benchmark_matrix(budget);
    let trial_filter = TrialFilter {
        filter_names: optional(cli.filter),
        plugin_names: optional(cli.plugin),
        formats: optional(cli.format),
        exclude_plugins: optional(cli.exclude_plugin),
    };
    let selection = select(&matrix, &trial_filter);
    println!("Benchmarking {} filters", selection.group_count());

    if cli.list {
        print_trial_list(&selection);
        return Ok(());
    }

    let invoker = VspipeInvoker::default();
    let records = run_selection(&selection, &invoker)?;
    if records.is_empty() {
        return Ok(());
    }

    print!("{}", render_console_table(&records));
    write_reports(Path::new("."), &records)?;

    if let Some(path) = cli.output {
        write_json(&path, &records)?;
        println!("Results saved to {}", path.display());
    }
    Ok(())
}
