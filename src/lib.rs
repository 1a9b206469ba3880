//! # Medir
//!
//! Benchmark harness comparing zsmooth against alternative VapourSynth
//! filter plugin implementations.
//!
//! Medir (Spanish: "to measure") drives `vspipe` over a fixed matrix of
//! benchmark trials, scrapes the frames-per-second figure each run prints,
//! and reduces repeated runs into summary statistics.
//!
//! ## Pipeline
//!
//! ```text
//! matrix -> select -> runner (vspipe x3) -> stats -> report (console/CSV/MD)
//! ```
//!
//! ## Features
//!
//! - **Fixed trial matrix**: Ten filter groups, each pinning plugin, sample
//!   format, filter arguments, and a frame budget per trial
//! - **Sequential execution**: One pipeline invocation at a time so every
//!   measurement sees an otherwise idle machine
//! - **Fail-fast**: The first unreadable measurement aborts the run with the
//!   offending stderr attached
//!
//! ## Example
//!
//! ```rust
//! use medir::matrix::{benchmark_matrix, FrameBudget};
//! use medir::select::{select, TrialFilter};
//!
//! let matrix = benchmark_matrix(FrameBudget::default());
//! let filter = TrialFilter::new().with_plugins(vec!["zsmooth".to_string()]);
//! let selection = select(&matrix, &filter);
//!
//! // Every group benchmarks a zsmooth configuration.
//! assert_eq!(selection.group_count(), 10);
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

// Clippy allows (MUST come after deny/warn to override them)
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)] // usize -> f64 for sample counts is safe
#![allow(clippy::cast_possible_truncation)] // rounded f64 -> u64 frame counts fit
#![allow(clippy::cast_sign_loss)] // frame budgets are never negative
#![allow(clippy::must_use_candidate)] // Not all methods need #[must_use]
#![allow(clippy::missing_panics_doc)] // Allow missing Panics doc sections
#![allow(clippy::doc_markdown)] // Allow technical terms without backticks
#![allow(clippy::uninlined_format_args)] // Prefer explicit format args
#![allow(clippy::float_cmp)] // Allow float comparisons in tests

pub mod error;
/// Trial orchestration loop (extracted for testability)
pub mod harness;
/// The benchmark matrix: every trial the harness knows how to run
///
/// Groups are declared in a fixed order and trials within a group likewise.
/// Reports preserve this order, so runs are comparable line by line.
pub mod matrix;
pub mod report;
/// Pipeline invocation and FPS extraction
///
/// Builds the `vspipe` argument vector for a trial, runs it, and scrapes
/// the frames-per-second token from stderr.
pub mod runner;
pub mod select;
pub mod stats;

// Re-exports for convenience
pub use error::{MedirError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
