//! Trial orchestration loop
//!
//! Drives every selected trial through the pipeline invoker, reduces the
//! samples, and reports progress on the console as each trial finishes.
//! Extracted from main.rs for testability against stub invokers.

use crate::error::Result;
use crate::report::TrialRecord;
use crate::runner::{run_trial, PipelineInvoker};
use crate::select::Selection;
use crate::stats::SampleStats;

/// Runs every trial in `selection` in declaration order, one at a time.
///
/// Trials run strictly sequentially so that each measurement sees an
/// otherwise idle machine. The first trial failure aborts the run and
/// discards any records accumulated so far.
///
/// # Errors
///
/// Propagates the first [`crate::MedirError`] raised by any trial.
pub fn run_selection(
    selection: &Selection<'_>,
    invoker: &dyn PipelineInvoker,
) -> Result<Vec<TrialRecord>> {
    let mut records = Vec::with_capacity(selection.trial_count());
    for selected in &selection.groups {
        for &spec in &selected.trials {
            let samples = run_trial(invoker, selected.group, spec)?;
            let stats = SampleStats::from_samples(&samples)?;
            let record = TrialRecord::new(&selected.group.filter, spec, stats);
            println!(
                "{} {} {} [{}] Min: {}, Max: {}, Median: {}, Average: {}, StdDev: {}",
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
            records.push(record);
        }
    }
    Ok(records)
}
