//! Narrowing the benchmark matrix to a runnable subset
//!
//! Selection is a pure function of the matrix and the CLI filter inputs.
//! Declaration order is preserved all the way through because the report
//! layout depends on it.

use crate::matrix::{BenchmarkGroup, TrialSpec};
use serde::{Deserialize, Serialize};

/// Optional allow and deny lists narrowing a benchmark run.
///
/// An absent list means "match everything", not "match nothing". Formats are
/// matched by their wire names, so an unrecognized format name simply selects
/// no trials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialFilter {
    /// Group names to include (`--filter`).
    pub filter_names: Option<Vec<String>>,
    /// Plugins to include (`--plugin`).
    pub plugin_names: Option<Vec<String>>,
    /// Sample-format names to include (`--format`).
    pub formats: Option<Vec<String>>,
    /// Plugins to exclude (`--exclude-plugin`).
    pub exclude_plugins: Option<Vec<String>>,
}

impl TrialFilter {
    /// Filter that matches every trial.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the run to the named filter groups.
    #[must_use]
    pub fn with_filters(mut self, names: Vec<String>) -> Self {
        self.filter_names = Some(names);
        self
    }

    /// Restricts the run to the named plugins.
    #[must_use]
    pub fn with_plugins(mut self, names: Vec<String>) -> Self {
        self.plugin_names = Some(names);
        self
    }

    /// Restricts the run to the named sample formats.
    #[must_use]
    pub fn with_formats(mut self, names: Vec<String>) -> Self {
        self.formats = Some(names);
        self
    }

    /// Records plugins to exclude from the run.
    #[must_use]
    pub fn with_excluded_plugins(mut self, names: Vec<String>) -> Self {
        self.exclude_plugins = Some(names);
        self
    }

    fn matches_group(&self, group: &BenchmarkGroup) -> bool {
        match &self.filter_names {
            Some(names) => names.iter().any(|name| *name == group.filter),
            None => true,
        }
    }

    // TODO: apply exclude_plugins as a deny-list here
    fn matches_spec(&self, spec: &TrialSpec) -> bool {
        let plugin_ok = match &self.plugin_names {
            Some(names) => names.iter().any(|name| *name == spec.plugin),
            None => true,
        };
        let format_ok = match &self.formats {
            Some(names) => names.iter().any(|name| name == spec.format.as_str()),
            None => true,
        };
        plugin_ok && format_ok
    }
}

/// One group that survived the group predicate, with its matching trials.
#[derive(Debug)]
pub struct GroupSelection<'a> {
    /// The owning group.
    pub group: &'a BenchmarkGroup,
    /// Matching trials in declaration order.
    pub trials: Vec<&'a TrialSpec>,
}

/// Result of narrowing the matrix.
#[derive(Debug)]
pub struct Selection<'a> {
    /// Groups whose name passed the group predicate, in declaration order.
    pub groups: Vec<GroupSelection<'a>>,
}

impl Selection<'_> {
    /// Number of selected groups, counted before the per-trial predicates.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of trials across all selected groups.
    #[must_use]
    pub fn trial_count(&self) -> usize {
        self.groups.iter().map(|group| group.trials.len()).sum()
    }

    /// True when no trial survived the filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trial_count() == 0
    }
}

/// Narrows `matrix` to the trials matching `filter`.
///
/// The group predicate runs first, so a group whose trials are all rejected
/// by the plugin or format predicates still counts as selected; the console
/// header line reports that group count.
#[must_use]
pub fn select<'a>(matrix: &'a [BenchmarkGroup], filter: &TrialFilter) -> Selection<'a> {
    let groups = matrix
        .iter()
        .filter(|group| filter.matches_group(group))
        .map(|group| GroupSelection {
            group,
            trials: group
                .specs
                .iter()
                .filter(|spec| filter.matches_spec(spec))
                .collect(),
        })
        .collect();
    Selection { groups }
}

// ============================================================================
// Tests
// ============================================================================
