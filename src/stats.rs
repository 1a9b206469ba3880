//! Statistical reduction of repeated throughput samples
//!
//! One trial produces a small set of fps readings; this module reduces such
//! a set to the five summary figures the reports carry. The reduction is a
//! pure function and never mutates the caller's samples.

use crate::error::{MedirError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Five-figure summary of one trial's sample set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Middle-index element (`len / 2`) of the sorted samples.
    ///
    /// For even counts this is a single element, not the textbook average of
    /// the two middles. Historical reports were produced with this
    /// definition, so it is kept as-is.
    pub median: f64,
    /// Arithmetic mean.
    pub average: f64,
    /// Population standard deviation (divides by N, not N - 1).
    pub std_dev: f64,
}

impl SampleStats {
    /// Reduces a sample set, sorting a fresh copy internally.
    ///
    /// # Errors
    ///
    /// Returns [`MedirError::EmptySampleSet`] when `samples` is empty.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(MedirError::EmptySampleSet);
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let count = sorted.len() as f64;
        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let median = sorted[sorted.len() / 2];
        let average = sorted.iter().sum::<f64>() / count;
        let variance = sorted
            .iter()
            .map(|sample| (sample - average).powi(2))
            .sum::<f64>()
            / count;

        Ok(Self {
            min,
            max,
            median,
            average,
            std_dev: variance.sqrt(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
