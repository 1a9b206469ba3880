//! Harness integration tests
//!
//! Drives the selection -> runner -> stats -> report pipeline end to end
//! using stub invokers. These tests verify the orchestration logic without
//! requiring a VapourSynth installation.

use std::cell::{Cell, RefCell};
use std::path::Path;

use serial_test::serial;

use medir::harness::run_selection;
use medir::matrix::{benchmark_matrix, BenchmarkGroup, FrameBudget};
use medir::report::{write_json, write_reports, TrialRecord, CSV_FILENAME, MARKDOWN_FILENAME};
use medir::runner::{PipelineCommand, PipelineInvoker, ITERATIONS};
use medir::select::{select, TrialFilter};
use medir::{MedirError, Result};

// ============================================================================
// Stub invokers
// ============================================================================

/// Returns the same canned diagnostic output for every invocation.
struct FixedStub {
    stderr: String,
    calls: Cell<usize>,
}

impl FixedStub {
    fn new(stderr: &str) -> Self {
        Self {
            stderr: stderr.to_string(),
            calls: Cell::new(0),
        }
    }
}

impl PipelineInvoker for FixedStub {
    fn invoke(&self, _command: &PipelineCommand) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.stderr.clone())
    }
}

/// Captures every command it is asked to run, in order.
struct RecordingStub {
    stderr: String,
    commands: RefCell<Vec<PipelineCommand>>,
}

impl RecordingStub {
    fn new(stderr: &str) -> Self {
        Self {
            stderr: stderr.to_string(),
            commands: RefCell::new(Vec::new()),
        }
    }
}

impl PipelineInvoker for RecordingStub {
    fn invoke(&self, command: &PipelineCommand) -> Result<String> {
        self.commands.borrow_mut().push(command.clone());
        Ok(self.stderr.clone())
    }
}

/// Realistic pipeline diagnostic tail carrying the throughput token.
fn fps_stderr(fps: &str) -> String {
    format!("Output 1000 frames in 8.10 seconds ({fps} fps)")
}

fn full_matrix() -> Vec<BenchmarkGroup> {
    benchmark_matrix(FrameBudget::default())
}

// ============================================================================
// Orchestration
// ============================================================================

#[test]
fn test_constant_throughput_reduces_to_degenerate_stats() {
    let matrix = full_matrix();
    let filter = TrialFilter::new()
        .with_filters(vec!["FluxSmooth".to_string()])
        .with_plugins(vec!["zsmooth".to_string()])
        .with_formats(vec!["u8".to_string()]);
    let selection = select(&matrix, &filter);
    let stub = FixedStub::new(&fps_stderr("123.45"));

    let records = run_selection(&selection, &stub).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(stub.calls.get(), 2 * ITERATIONS);
    assert_eq!(records[0].args, "function=FluxSmoothT");
    assert_eq!(records[1].args, "function=FluxSmoothST");
    for record in &records {
        assert_eq!(record.filter, "FluxSmooth");
        assert_eq!(record.plugin, "zsmooth");
        assert_eq!(record.format.as_str(), "u8");
        assert_eq!(record.stats.min, 123.45);
        assert_eq!(record.stats.max, 123.45);
        assert_eq!(record.stats.median, 123.45);
        assert_eq!(record.stats.average, 123.45);
        assert_eq!(record.stats.std_dev, 0.0);
    }
}

#[test]
fn test_missing_fps_token_aborts_on_the_first_invocation() {
    let matrix = full_matrix();
    let filter = TrialFilter::new().with_filters(vec!["Repair".to_string()]);
    let selection = select(&matrix, &filter);
    let stub = RecordingStub::new("Script evaluation failed: Python exception: name 'core' is not defined");

    let err = run_selection(&selection, &stub).unwrap_err();

    match err {
        MedirError::FpsUnparseable { stderr } => {
            assert!(stderr.contains("Script evaluation failed"));
        },
        other => panic!("expected FpsUnparseable, got {other:?}"),
    }
    assert_eq!(stub.commands.borrow().len(), 1);
}

#[test]
fn test_full_float_run_covers_every_group() {
    let matrix = full_matrix();
    let filter = TrialFilter::new().with_formats(vec!["f32".to_string()]);
    let selection = select(&matrix, &filter);
    assert_eq!(selection.group_count(), 10);

    let stub = FixedStub::new(&fps_stderr("250"));
    let records = run_selection(&selection, &stub).unwrap();

    assert_eq!(records.len(), 54);
    assert_eq!(stub.calls.get(), 54 * ITERATIONS);
    assert_eq!(records[0].filter, "TemporalMedian");
    assert_eq!(records.last().unwrap().filter, "TTempSmooth");
    assert!(records.iter().all(|record| record.format.as_str() == "f32"));
}

#[test]
#[serial]
fn test_empty_selection_invokes_nothing_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let matrix = full_matrix();
    let filter = TrialFilter::new().with_filters(vec!["NoSuchFilter".to_string()]);
    let selection = select(&matrix, &filter);
    assert!(selection.is_empty());

    let stub = RecordingStub::new(&fps_stderr("99"));
    let records = run_selection(&selection, &stub).unwrap();

    assert!(records.is_empty());
    assert!(stub.commands.borrow().is_empty());
    // Nothing on the run path writes artifacts; only an explicit
    // write_reports call does, and the entrypoint skips it for empty runs.
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

// ============================================================================
// Command construction
// ============================================================================

#[test]
fn test_command_layout_for_an_argless_group() {
    let matrix = full_matrix();
    let filter = TrialFilter::new().with_filters(vec!["InterQuartileMean".to_string()]);
    let selection = select(&matrix, &filter);
    let stub = RecordingStub::new(&fps_stderr("404.4"));

    run_selection(&selection, &stub).unwrap();

    let commands = stub.commands.borrow();
    assert_eq!(commands.len(), 3 * ITERATIONS);

    assert_eq!(commands[0].script_args, ["output=zsmooth", "format=u8"]);
    assert_eq!(commands[0].frames, 2000);
    assert_eq!(commands[0].benchmark_path, "test_inter_quartile_mean.vpy");

    // One command per iteration, identical within a trial.
    assert_eq!(commands[0], commands[ITERATIONS - 1]);

    assert_eq!(commands[ITERATIONS].script_args[1], "format=u16");
    assert_eq!(commands[ITERATIONS].frames, 1000);
    assert_eq!(commands[2 * ITERATIONS].script_args[1], "format=f32");
    assert_eq!(commands[2 * ITERATIONS].frames, 500);
}

#[test]
fn test_frame_scale_flows_into_every_command() {
    let matrix = benchmark_matrix(FrameBudget::from_scale(0.5));
    let filter = TrialFilter::new()
        .with_filters(vec!["TemporalMedian".to_string()])
        .with_plugins(vec!["tmedian".to_string()])
        .with_formats(vec!["u8".to_string()]);
    let selection = select(&matrix, &filter);
    let stub = RecordingStub::new(&fps_stderr("77.7"));

    run_selection(&selection, &stub).unwrap();

    let commands = stub.commands.borrow();
    assert_eq!(commands.len(), 2 * ITERATIONS);
    // radius=1 runs the scaled default, radius=10 runs a thirtieth of it,
    // rounded to the nearest whole frame (1000 / 30 -> 33).
    assert_eq!(commands[0].frames, 1000);
    assert_eq!(commands[ITERATIONS].frames, 33);
    assert_eq!(commands[0].script_args, ["output=tmedian", "format=u8", "radius=1"]);
    assert_eq!(
        commands[ITERATIONS].script_args,
        ["output=tmedian", "format=u8", "radius=10"]
    );
}

#[test]
fn test_multi_arg_trials_keep_argument_order() {
    let matrix = full_matrix();
    let filter = TrialFilter::new()
        .with_filters(vec!["TTempSmooth".to_string()])
        .with_plugins(vec!["ttmpsm".to_string()])
        .with_formats(vec!["u16".to_string()]);
    let selection = select(&matrix, &filter);
    let stub = RecordingStub::new(&fps_stderr("18.21"));

    let records = run_selection(&selection, &stub).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].args, "radius=1 threshold=4 mdiff=2");
    let commands = stub.commands.borrow();
    assert_eq!(
        commands[0].script_args,
        ["output=ttmpsm", "format=u16", "radius=1", "threshold=4", "mdiff=2"]
    );
    // 2000 / 4 / 3 -> 166.67, rounded to the nearest frame.
    assert_eq!(commands[0].frames, 167);
}

// ============================================================================
// Artifacts
// ============================================================================

#[test]
#[serial]
fn test_artifacts_land_in_the_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let matrix = full_matrix();
    let filter = TrialFilter::new().with_filters(vec!["VerticalCleaner".to_string()]);
    let selection = select(&matrix, &filter);
    let stub = FixedStub::new(&fps_stderr("300.5"));
    let records = run_selection(&selection, &stub).unwrap();

    write_reports(Path::new("."), &records).unwrap();

    let csv = std::fs::read_to_string(dir.path().join(CSV_FILENAME)).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Filter,Plugin,Format,Args,Min,Max,Median,Average,Standard Deviation"
    );
    assert_eq!(lines.count(), records.len());
    assert!(csv.contains("\"VerticalCleaner\", \"zsmooth\", \"u8\", \"mode=1\", 300.5,"));

    let md = std::fs::read_to_string(dir.path().join(MARKDOWN_FILENAME)).unwrap();
    assert!(md.starts_with("| Filter | Plugin | Format | Args |"));
    assert!(md.contains("| VerticalCleaner | rg | f32 | mode=2 |"));
}

#[test]
fn test_json_output_roundtrips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");

    let matrix = full_matrix();
    let filter = TrialFilter::new().with_filters(vec!["InterQuartileMean".to_string()]);
    let selection = select(&matrix, &filter);
    let stub = FixedStub::new(&fps_stderr("123.45"));
    let records = run_selection(&selection, &stub).unwrap();

    write_json(&path, &records).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    let back: Vec<TrialRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, records);
    assert_eq!(back.len(), 3);
}
