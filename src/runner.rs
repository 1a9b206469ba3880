//! Trial execution against the external pipeline tool
//!
//! One trial is measured by running `vspipe` [`ITERATIONS`] times in sequence
//! and pulling a frames-per-second figure out of each run's diagnostic
//! output. Benchmark readings are contention-sensitive, so iterations never
//! overlap: each invocation blocks until the previous process has exited,
//! with no timeout and no retries.

use crate::error::{MedirError, Result};
use crate::matrix::{BenchmarkGroup, TrialSpec};
use regex::Regex;
use std::process::Command;
use std::sync::LazyLock;

/// Samples collected per trial.
pub const ITERATIONS: usize = 3;

const _: () = assert!(ITERATIONS >= 1, "a trial needs at least one sample");

/// Throughput token the pipeline tool must emit on its diagnostic stream:
/// `<number> fps`, integer or decimal. The first match wins.
static FPS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?) fps").expect("invalid FPS_PATTERN regex"));

/// Extracts the first fps reading from diagnostic text.
#[must_use]
pub fn extract_fps(stderr: &str) -> Option<f64> {
    FPS_PATTERN
        .captures(stderr)
        .and_then(|caps| caps.get(1))
        .and_then(|token| token.as_str().parse().ok())
}

// ============================================================================
// Invocations
// ============================================================================

/// One fully-built invocation of the pipeline tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineCommand {
    /// Script arguments passed as repeated `-a key=value` options; the
    /// plugin and format travel as the leading `output=` and `format=`
    /// entries, followed by the trial's raw arguments.
    pub script_args: Vec<String>,
    /// Frames to process, rounded to the nearest integer.
    pub frames: u64,
    /// Pipeline script path.
    pub benchmark_path: String,
}

impl PipelineCommand {
    /// Builds the invocation for one trial of `spec` within `group`.
    #[must_use]
    pub fn for_trial(group: &BenchmarkGroup, spec: &TrialSpec) -> Self {
        let mut script_args = vec![
            format!("output={}", spec.plugin),
            format!("format={}", spec.format),
        ];
        script_args.extend(spec.args.iter().cloned());
        Self {
            script_args,
            frames: spec.frames.round() as u64,
            benchmark_path: group.benchmark_path.clone(),
        }
    }

    /// Full argument vector, excluding the program name: the script args as
    /// `-a` pairs, the frame bound, a single frame request at a time, the
    /// script path and the no-output sentinel.
    #[must_use]
    pub fn to_argv(&self) -> Vec<String> {
        let mut argv: Vec<String> = self
            .script_args
            .iter()
            .flat_map(|arg| ["-a".to_string(), arg.clone()])
            .collect();
        argv.push("-e".to_string());
        argv.push(self.frames.to_string());
        argv.push("-r".to_string());
        argv.push("1".to_string());
        argv.push(self.benchmark_path.clone());
        argv.push("--".to_string());
        argv
    }
}

// ============================================================================
// Invokers
// ============================================================================

/// Seam for running the external pipeline tool.
///
/// The production implementation spawns `vspipe`; tests substitute stubs
/// that return canned diagnostic output.
pub trait PipelineInvoker {
    /// Runs one invocation to completion and returns its captured stderr.
    ///
    /// # Errors
    ///
    /// Returns [`MedirError::PipelineSpawn`] when the process cannot be
    /// launched.
    fn invoke(&self, command: &PipelineCommand) -> Result<String>;
}

/// Invoker that spawns the real `vspipe` binary.
#[derive(Debug, Clone)]
pub struct VspipeInvoker {
    /// Program name or path to execute.
    pub program: String,
}

impl Default for VspipeInvoker {
    fn default() -> Self {
        Self {
            program: "vspipe".to_string(),
        }
    }
}

impl PipelineInvoker for VspipeInvoker {
    fn invoke(&self, command: &PipelineCommand) -> Result<String> {
        let output = Command::new(&self.program)
            .args(command.to_argv())
            .output()
            .map_err(|source| MedirError::PipelineSpawn {
                program: self.program.clone(),
                source,
            })?;

        // The fps token on stderr is the sole oracle; the exit status is
        // not consulted. A crashed run without the token fails during
        // extraction, with the full diagnostic text attached.
        Ok(String::from_utf8_lossy(&output.stderr).into_owned())
    }
}

// ============================================================================
// Sampling
// ============================================================================

/// Collects exactly [`ITERATIONS`] throughput samples for one trial.
///
/// A missing fps token aborts the whole run: an unparseable reading is as
/// untrustworthy as a crashed process, and skipping it would corrupt the
/// downstream statistics.
///
/// # Errors
///
/// Returns [`MedirError::FpsUnparseable`] (carrying the captured stderr)
/// when an invocation's diagnostic output contains no fps token, or the
/// invoker's launch error.
pub fn run_trial(
    invoker: &dyn PipelineInvoker,
    group: &BenchmarkGroup,
    spec: &TrialSpec,
) -> Result<Vec<f64>> {
    let command = PipelineCommand::for_trial(group, spec);
    let mut samples = Vec::with_capacity(ITERATIONS);
    for _ in 0..ITERATIONS {
        let stderr = invoker.invoke(&command)?;
        let fps = extract_fps(&stderr).ok_or_else(|| MedirError::FpsUnparseable { stderr })?;
        samples.push(fps);
    }
    Ok(samples)
}

// ============================================================================
// Tests
// ============================================================================
