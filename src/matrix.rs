//! Benchmark matrix: the declared set of trials to measure
//!
//! The matrix pairs each filter under test with the pipeline script that
//! exercises it and the concrete plugin/format/argument combinations worth
//! comparing. It is declared once at startup from a [`FrameBudget`] and never
//! mutated afterwards.
//!
//! Frame counts scale per format (u16 runs half the default, f32 a quarter)
//! so slower formats finish in comparable wall time, with further cuts for
//! plugins that fall well behind the rest of their group.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Frames a full-speed u8 trial processes before scaling.
pub const BASE_FRAME_COUNT: u32 = 2000;

// ============================================================================
// Sample formats
// ============================================================================

/// Sample format fed through the filter graph for one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// 8-bit unsigned integer samples.
    U8,
    /// 16-bit unsigned integer samples.
    U16,
    /// 16-bit half-precision float samples.
    F16,
    /// 32-bit single-precision float samples.
    F32,
}

impl SampleFormat {
    /// Wire name used in pipeline arguments, filter inputs and reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SampleFormat::U8 => "u8",
            SampleFormat::U16 => "u16",
            SampleFormat::F16 => "f16",
            SampleFormat::F32 => "f32",
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Frame budget
// ============================================================================

/// Default trial frame count, derived once at startup from the CLI scale
/// factor.
///
/// Trials reference this default through arithmetic expressions (half for
/// u16, a quarter for f32, deeper cuts for slow plugins), so individual
/// frame counts are fractional in general and only rounded when an
/// invocation is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameBudget {
    /// Frame count for a full-speed u8 trial.
    pub default_frames: f64,
}

impl FrameBudget {
    /// Derives the budget: `round(BASE_FRAME_COUNT * scale)`.
    #[must_use]
    pub fn from_scale(scale: f64) -> Self {
        Self {
            default_frames: (f64::from(BASE_FRAME_COUNT) * scale).round(),
        }
    }
}

impl Default for FrameBudget {
    fn default() -> Self {
        Self::from_scale(1.0)
    }
}

// ============================================================================
// Trials and groups
// ============================================================================

/// One concrete benchmark configuration to measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSpec {
    /// Implementation under test.
    pub plugin: String,
    /// Sample format fed through the filter graph.
    pub format: SampleFormat,
    /// Opaque `key=value` arguments, order-significant, passed through
    /// verbatim.
    pub args: Vec<String>,
    /// Frames to process; fractional until rounded at invocation time.
    pub frames: f64,
}

/// A named filter under test and the trials that exercise it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkGroup {
    /// Filter name, also the group key for `--filter` selection.
    pub filter: String,
    /// Pipeline script the external tool executes.
    pub benchmark_path: String,
    /// Trials in declaration order.
    pub specs: Vec<TrialSpec>,
}

fn trial(plugin: &str, format: SampleFormat, args: &[&str], frames: f64) -> TrialSpec {
    TrialSpec {
        plugin: plugin.to_string(),
        format,
        args: args.iter().map(ToString::to_string).collect(),
        frames,
    }
}

fn group(filter: &str, benchmark_path: &str, specs: Vec<TrialSpec>) -> BenchmarkGroup {
    BenchmarkGroup {
        filter: filter.to_string(),
        benchmark_path: benchmark_path.to_string(),
        specs,
    }
}

/// The full benchmark matrix, in declaration order.
#[must_use]
pub fn benchmark_matrix(budget: FrameBudget) -> Vec<BenchmarkGroup> {
    use SampleFormat::{F32, U16, U8};
    let d = budget.default_frames;
    vec![
        // neo_tmedian runs well behind the other two, and both tmedian and
        // neo_tmedian fall far behind on radius 10 (zsmooth has vectorized
        // sorting networks), so their frame counts are trimmed to keep total
        // wall time in check.
        group(
            "TemporalMedian",
            "test_temporal_median.vpy",
            vec![
                trial("zsmooth", U8, &["radius=1"], d),
                trial("tmedian", U8, &["radius=1"], d),
                trial("neo_tmedian", U8, &["radius=1"], d / 4.0),
                trial("zsmooth", U8, &["radius=10"], d),
                trial("tmedian", U8, &["radius=10"], d / 30.0),
                trial("neo_tmedian", U8, &["radius=10"], d / 30.0),

                trial("zsmooth", U16, &["radius=1"], d / 2.0),
                trial("tmedian", U16, &["radius=1"], d / 2.0),
                trial("neo_tmedian", U16, &["radius=1"], d / 2.0 / 4.0),
                trial("zsmooth", U16, &["radius=10"], d / 2.0),
                trial("tmedian", U16, &["radius=10"], d / 2.0 / 30.0),
                trial("neo_tmedian", U16, &["radius=10"], d / 2.0 / 30.0),

                trial("zsmooth", F32, &["radius=1"], d / 4.0),
                trial("tmedian", F32, &["radius=1"], d / 4.0),
                trial("neo_tmedian", F32, &["radius=1"], d / 4.0 / 4.0),
                trial("zsmooth", F32, &["radius=10"], d / 4.0),
                trial("tmedian", F32, &["radius=10"], d / 4.0 / 30.0),
                trial("neo_tmedian", F32, &["radius=10"], d / 4.0 / 30.0),
            ],
        ),
        // focus2 lags zsmooth at radius 7, so its runs (and the matching std
        // runs) are shortened.
        group(
            "TemporalSoften",
            "test_temporal_soften.vpy",
            vec![
                trial("zsmooth", U8, &["radius=1"], d),
                trial("focus2", U8, &["radius=1"], d),
                trial("std", U8, &["radius=1"], d),
                trial("zsmooth", U8, &["radius=7"], d),
                trial("focus2", U8, &["radius=7"], d / 2.0),
                trial("std", U8, &["radius=7"], d / 2.0),

                trial("zsmooth", U16, &["radius=1"], d / 2.0),
                trial("focus2", U16, &["radius=1"], d / 2.0),
                trial("std", U16, &["radius=1"], d / 2.0),
                trial("zsmooth", U16, &["radius=7"], d / 2.0),
                trial("focus2", U16, &["radius=7"], d / 2.0 / 2.0),
                trial("std", U16, &["radius=7"], d / 2.0 / 2.0),

                trial("zsmooth", F32, &["radius=1"], d / 4.0),
                trial("std", F32, &["radius=1"], d / 4.0),
                trial("zsmooth", F32, &["radius=7"], d / 4.0),
                trial("std", F32, &["radius=7"], d / 4.0),
            ],
        ),
        group(
            "FluxSmooth",
            "test_fluxsmooth.vpy",
            vec![
                trial("zsmooth", U8, &["function=FluxSmoothT"], d),
                trial("flux", U8, &["function=FluxSmoothT"], d),
                trial("zsmooth", U8, &["function=FluxSmoothST"], d),
                trial("flux", U8, &["function=FluxSmoothST"], d),

                trial("zsmooth", U16, &["function=FluxSmoothT"], d / 2.0),
                trial("flux", U16, &["function=FluxSmoothT"], d / 2.0),
                trial("zsmooth", U16, &["function=FluxSmoothST"], d / 2.0),
                trial("flux", U16, &["function=FluxSmoothST"], d / 2.0),

                trial("zsmooth", F32, &["function=FluxSmoothT"], d / 4.0),
                trial("zsmooth", F32, &["function=FluxSmoothST"], d / 4.0),
            ],
        ),
        group(
            "Clense",
            "test_clense.vpy",
            vec![
                trial("zsmooth", U8, &["function=Clense"], d),
                trial("rg", U8, &["function=Clense"], d),
                trial("zsmooth", U8, &["function=ForwardClense"], d),
                trial("rg", U8, &["function=ForwardClense"], d),
                trial("zsmooth", U8, &["function=BackwardClense"], d),
                trial("rg", U8, &["function=BackwardClense"], d),

                trial("zsmooth", U16, &["function=Clense"], d / 2.0),
                trial("rg", U16, &["function=Clense"], d / 2.0),
                trial("zsmooth", U16, &["function=ForwardClense"], d / 2.0),
                trial("rg", U16, &["function=ForwardClense"], d / 2.0),
                trial("zsmooth", U16, &["function=BackwardClense"], d / 2.0),
                trial("rg", U16, &["function=BackwardClense"], d / 2.0),

                trial("zsmooth", F32, &["function=Clense"], d / 4.0),
                trial("rg", F32, &["function=Clense"], d / 4.0),
                trial("zsmooth", F32, &["function=ForwardClense"], d / 4.0),
                trial("rg", F32, &["function=ForwardClense"], d / 4.0),
                trial("zsmooth", F32, &["function=BackwardClense"], d / 4.0),
                trial("rg", F32, &["function=BackwardClense"], d / 4.0),
            ],
        ),
        group(
            "VerticalCleaner",
            "test_vertical_cleaner.vpy",
            vec![
                trial("zsmooth", U8, &["mode=1"], d),
                trial("rg", U8, &["mode=1"], d),
                trial("zsmooth", U8, &["mode=2"], d),
                trial("rg", U8, &["mode=2"], d),

                trial("zsmooth", U16, &["mode=1"], d / 2.0),
                trial("rg", U16, &["mode=1"], d / 2.0),
                trial("zsmooth", U16, &["mode=2"], d / 2.0),
                trial("rg", U16, &["mode=2"], d / 2.0),

                trial("zsmooth", F32, &["mode=1"], d / 4.0),
                trial("rg", F32, &["mode=1"], d / 4.0),
                trial("zsmooth", F32, &["mode=2"], d / 4.0),
                trial("rg", F32, &["mode=2"], d / 4.0),
            ],
        ),
        // std ships RemoveGrain implementations for modes 4, 12 and 20 only.
        group(
            "RemoveGrain",
            "test_remove_grain.vpy",
            vec![
                trial("zsmooth", U8, &["mode=1"], d),
                trial("rg", U8, &["mode=1"], d),
                trial("zsmooth", U8, &["mode=4"], d),
                trial("rg", U8, &["mode=4"], d),
                trial("std", U8, &["mode=4"], d),
                trial("zsmooth", U8, &["mode=12"], d),
                trial("rg", U8, &["mode=12"], d),
                trial("std", U8, &["mode=12"], d),
                trial("zsmooth", U8, &["mode=17"], d),
                trial("rg", U8, &["mode=17"], d),
                trial("zsmooth", U8, &["mode=20"], d),
                trial("rg", U8, &["mode=20"], d),
                trial("std", U8, &["mode=20"], d),
                trial("zsmooth", U8, &["mode=22"], d),
                trial("rg", U8, &["mode=22"], d),

                trial("zsmooth", U16, &["mode=1"], d / 2.0),
                trial("rg", U16, &["mode=1"], d / 2.0),
                trial("zsmooth", U16, &["mode=4"], d / 2.0),
                trial("rg", U16, &["mode=4"], d / 2.0),
                trial("std", U16, &["mode=4"], d / 2.0),
                trial("zsmooth", U16, &["mode=12"], d / 2.0),
                trial("rg", U16, &["mode=12"], d / 2.0),
                trial("std", U16, &["mode=12"], d / 2.0),
                trial("zsmooth", U16, &["mode=17"], d / 2.0),
                trial("rg", U16, &["mode=17"], d / 2.0),
                trial("zsmooth", U16, &["mode=20"], d / 2.0),
                trial("rg", U16, &["mode=20"], d / 2.0),
                trial("std", U16, &["mode=20"], d / 2.0),
                trial("zsmooth", U16, &["mode=22"], d / 2.0),
                trial("rg", U16, &["mode=22"], d / 2.0),

                trial("zsmooth", F32, &["mode=1"], d / 4.0),
                trial("rg", F32, &["mode=1"], d / 4.0),
                trial("zsmooth", F32, &["mode=4"], d / 4.0),
                trial("rg", F32, &["mode=4"], d / 4.0),
                trial("std", F32, &["mode=4"], d / 4.0),
                trial("zsmooth", F32, &["mode=12"], d / 4.0),
                trial("rg", F32, &["mode=12"], d / 4.0),
                trial("std", F32, &["mode=12"], d / 4.0),
                trial("zsmooth", F32, &["mode=17"], d / 4.0),
                trial("rg", F32, &["mode=17"], d / 4.0),
                trial("zsmooth", F32, &["mode=20"], d / 4.0),
                trial("rg", F32, &["mode=20"], d / 4.0),
                trial("std", F32, &["mode=20"], d / 4.0),
                trial("zsmooth", F32, &["mode=22"], d / 4.0),
                trial("rg", F32, &["mode=22"], d / 4.0),
            ],
        ),
        group(
            "Repair",
            "test_repair.vpy",
            vec![
                trial("zsmooth", U8, &["mode=1"], d),
                trial("rg", U8, &["mode=1"], d),
                trial("zsmooth", U8, &["mode=12"], d),
                trial("rg", U8, &["mode=12"], d),
                trial("zsmooth", U8, &["mode=13"], d),
                trial("rg", U8, &["mode=13"], d),

                trial("zsmooth", U16, &["mode=1"], d / 2.0),
                trial("rg", U16, &["mode=1"], d / 2.0),
                trial("zsmooth", U16, &["mode=12"], d / 2.0),
                trial("rg", U16, &["mode=12"], d / 2.0),
                trial("zsmooth", U16, &["mode=13"], d / 2.0),
                trial("rg", U16, &["mode=13"], d / 2.0),

                trial("zsmooth", F32, &["mode=1"], d / 4.0),
                trial("rg", F32, &["mode=1"], d / 4.0),
                trial("zsmooth", F32, &["mode=12"], d / 4.0),
                trial("rg", F32, &["mode=12"], d / 4.0),
                trial("zsmooth", F32, &["mode=13"], d / 4.0),
                trial("rg", F32, &["mode=13"], d / 4.0),
            ],
        ),
        // dgm has no float support, so f32 runs zsmooth alone.
        group(
            "DegrainMedian",
            "test_degrain_median.vpy",
            vec![
                trial("zsmooth", U8, &["mode=0"], d),
                trial("dgm", U8, &["mode=0"], d),
                trial("zsmooth", U8, &["mode=1"], d),
                trial("dgm", U8, &["mode=1"], d),
                trial("zsmooth", U8, &["mode=2"], d),
                trial("dgm", U8, &["mode=2"], d),
                trial("zsmooth", U8, &["mode=3"], d),
                trial("dgm", U8, &["mode=3"], d),
                trial("zsmooth", U8, &["mode=4"], d),
                trial("dgm", U8, &["mode=4"], d),
                trial("zsmooth", U8, &["mode=5"], d),
                trial("dgm", U8, &["mode=5"], d),

                trial("zsmooth", U16, &["mode=0"], d / 2.0),
                trial("dgm", U16, &["mode=0"], d / 2.0),
                trial("zsmooth", U16, &["mode=1"], d / 2.0),
                trial("dgm", U16, &["mode=1"], d / 2.0),
                trial("zsmooth", U16, &["mode=2"], d / 2.0),
                trial("dgm", U16, &["mode=2"], d / 2.0),
                trial("zsmooth", U16, &["mode=3"], d / 2.0),
                trial("dgm", U16, &["mode=3"], d / 2.0),
                trial("zsmooth", U16, &["mode=4"], d / 2.0),
                trial("dgm", U16, &["mode=4"], d / 2.0),
                trial("zsmooth", U16, &["mode=5"], d / 2.0),
                trial("dgm", U16, &["mode=5"], d / 2.0),

                trial("zsmooth", F32, &["mode=0"], d / 4.0),
                trial("zsmooth", F32, &["mode=1"], d / 4.0),
                trial("zsmooth", F32, &["mode=2"], d / 4.0),
                trial("zsmooth", F32, &["mode=3"], d / 4.0),
                trial("zsmooth", F32, &["mode=4"], d / 4.0),
                trial("zsmooth", F32, &["mode=5"], d / 4.0),
            ],
        ),
        group(
            "InterQuartileMean",
            "test_inter_quartile_mean.vpy",
            vec![
                trial("zsmooth", U8, &[], d),
                trial("zsmooth", U16, &[], d / 2.0),
                trial("zsmooth", F32, &[], d / 4.0),
            ],
        ),
        // TTempSmooth is slow across the board, so every run takes a quarter
        // of the default; the original plugin is about 3x slower again.
        group(
            "TTempSmooth",
            "test_ttempsmooth.vpy",
            vec![
                trial("zsmooth", U8, &["radius=1", "threshold=4", "mdiff=2"], d / 4.0),
                trial("ttmpsm", U8, &["radius=1", "threshold=4", "mdiff=2"], d / 4.0 / 3.0),
                trial("zsmooth", U8, &["radius=1", "threshold=4", "mdiff=4"], d / 4.0),
                trial("ttmpsm", U8, &["radius=1", "threshold=4", "mdiff=4"], d / 4.0 / 3.0),

                trial("zsmooth", U16, &["radius=1", "threshold=4", "mdiff=2"], d / 4.0),
                trial("ttmpsm", U16, &["radius=1", "threshold=4", "mdiff=2"], d / 4.0 / 3.0),
                trial("zsmooth", U16, &["radius=1", "threshold=4", "mdiff=4"], d / 4.0),
                trial("ttmpsm", U16, &["radius=1", "threshold=4", "mdiff=4"], d / 4.0 / 3.0),

                trial("zsmooth", F32, &["radius=1", "threshold=4", "mdiff=2"], d / 4.0),
                trial("ttmpsm", F32, &["radius=1", "threshold=4", "mdiff=2"], d / 4.0 / 3.0),
                trial("zsmooth", F32, &["radius=1", "threshold=4", "mdiff=4"], d / 4.0),
                trial("ttmpsm", F32, &["radius=1", "threshold=4", "mdiff=4"], d / 4.0 / 3.0),
            ],
        ),
    ]
}

// ============================================================================
// Tests
// ============================================================================
