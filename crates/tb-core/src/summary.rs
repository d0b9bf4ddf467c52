//! Aggregation of parsed timebook lines into a per-task summary.

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::Serialize;

use crate::extract::{self, ExpectationLine};
use crate::taxonomy::{Category, TaskCode, Taxonomy};

/// Aggregated time for one canonical task code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub task: TaskCode,
    pub task_name: &'static str,
    pub category: Category,
    pub category_name: &'static str,
    /// Number of task lines folded into this entry.
    pub count_tasks: usize,
    /// Declared expectation in minutes. Zero means none was declared.
    pub expected_minutes: u64,
    pub received_minutes: u64,
    /// `received / expected`, or 0 without an expectation. May exceed 1.
    pub factor_of_expected: f64,
    /// `received / total`, or 0 when nothing was logged.
    pub factor_of_total: f64,
}

/// Aggregated time for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub category_name: &'static str,
    pub count_tasks: usize,
    pub expected_minutes: u64,
    pub received_minutes: u64,
    pub factor_of_expected: f64,
    pub factor_of_total: f64,
}

/// Result of summarizing one timebook.
///
/// `entries` has no defined order; use [`TimebookSummary::sorted_entries`]
/// for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimebookSummary {
    pub taxonomy: Taxonomy,
    pub entries: Vec<SummaryEntry>,
    /// Sum of received minutes over all entries.
    pub total_minutes: u64,
}

impl TimebookSummary {
    /// Total number of task lines counted.
    pub fn count_tasks(&self) -> usize {
        self.entries.iter().map(|e| e.count_tasks).sum()
    }

    /// Entries ordered by received minutes (descending), then task code.
    pub fn sorted_entries(&self) -> Vec<&SummaryEntry> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_key(|e| (Reverse(e.received_minutes), e.task));
        entries
    }

    /// Rolls entries up by category, in the same order as
    /// [`TimebookSummary::sorted_entries`].
    pub fn by_category(&self) -> Vec<CategorySummary> {
        let mut grouped: HashMap<Category, (usize, u64, u64)> = HashMap::new();
        for entry in &self.entries {
            let slot = grouped.entry(entry.category).or_default();
            slot.0 = slot.0.saturating_add(entry.count_tasks);
            slot.1 = slot.1.saturating_add(entry.expected_minutes);
            slot.2 = slot.2.saturating_add(entry.received_minutes);
        }

        let mut categories: Vec<_> = grouped
            .into_iter()
            .map(|(category, (count_tasks, expected, received))| CategorySummary {
                category,
                category_name: category.name(),
                count_tasks,
                expected_minutes: expected,
                received_minutes: received,
                factor_of_expected: ratio(received, expected),
                factor_of_total: ratio(received, self.total_minutes),
            })
            .collect();
        categories.sort_by_key(|c| (Reverse(c.received_minutes), c.category));
        categories
    }
}

#[derive(Debug, Default)]
struct Bucket {
    count_tasks: usize,
    expected_minutes: u64,
    received_minutes: u64,
}

/// Folds parsed records into per-task buckets.
///
/// Buckets only exist for codes that were seen, either in a task entry or in
/// an expectation.
#[derive(Debug)]
pub struct Aggregator {
    taxonomy: Taxonomy,
    buckets: HashMap<TaskCode, Bucket>,
    total_minutes: u64,
}

impl Aggregator {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy,
            buckets: HashMap::new(),
            total_minutes: 0,
        }
    }

    /// Adds declared expected minutes for a code. Repeated declarations sum.
    pub fn add_expectation(&mut self, expectation: ExpectationLine) {
        let code = TaskCode::from_char(expectation.code);
        let bucket = self.buckets.entry(code).or_default();
        bucket.expected_minutes = bucket
            .expected_minutes
            .saturating_add(expectation.expected_minutes);
    }

    /// Adds one resolved task entry.
    pub fn add_task(&mut self, code: char, minutes: u64) {
        let code = TaskCode::from_char(code);
        let bucket = self.buckets.entry(code).or_default();
        bucket.count_tasks += 1;
        bucket.received_minutes = bucket.received_minutes.saturating_add(minutes);
        self.total_minutes = self.total_minutes.saturating_add(minutes);
    }

    pub fn finish(self) -> TimebookSummary {
        let Self {
            taxonomy,
            buckets,
            total_minutes,
        } = self;

        let entries = buckets
            .into_iter()
            .map(|(task, bucket)| {
                let category = taxonomy.category(task);
                SummaryEntry {
                    task,
                    task_name: task.name(),
                    category,
                    category_name: category.name(),
                    count_tasks: bucket.count_tasks,
                    expected_minutes: bucket.expected_minutes,
                    received_minutes: bucket.received_minutes,
                    factor_of_expected: ratio(bucket.received_minutes, bucket.expected_minutes),
                    factor_of_total: ratio(bucket.received_minutes, total_minutes),
                }
            })
            .collect();

        TimebookSummary {
            taxonomy,
            entries,
            total_minutes,
        }
    }
}

/// Summarizes already split lines.
///
/// Lines that are neither task entries nor expectations, or whose times do
/// not resolve, contribute nothing.
pub fn summarize<S: AsRef<str>>(lines: &[S], taxonomy: Taxonomy) -> TimebookSummary {
    let mut aggregator = Aggregator::new(taxonomy);

    for line in lines {
        let line = line.as_ref();

        if let Some(expectation) = extract::parse_expectation_line(line) {
            tracing::debug!(
                code = %expectation.code,
                expected_minutes = expectation.expected_minutes,
                "parsed expectation line"
            );
            aggregator.add_expectation(expectation);
            continue;
        }

        let Some(candidate) = extract::task_candidate(line) else {
            continue;
        };
        let Some(task) = extract::parse_task_line(candidate) else {
            tracing::trace!(line = candidate, "skipping malformed task line");
            continue;
        };
        match task.duration_minutes() {
            Ok(minutes) => {
                tracing::debug!(code = %task.code, minutes, "parsed task line");
                aggregator.add_task(task.code, minutes);
            }
            Err(err) => tracing::trace!(line = candidate, error = %err, "skipping task line"),
        }
    }

    let summary = aggregator.finish();
    tracing::debug!(
        entries = summary.entries.len(),
        total_minutes = summary.total_minutes,
        "summarized timebook"
    );
    summary
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(summary: &TimebookSummary, task: TaskCode) -> &SummaryEntry {
        summary
            .entries
            .iter()
            .find(|e| e.task == task)
            .unwrap_or_else(|| panic!("no entry for {task:?}"))
    }

    const SAMPLE: &[&str] = &[
        "# Week 42",
        "",
        "> - Planned work A: 4h",
        "> - Meetings M: 1h",
        "",
        "## Monday",
        "- (A 9:00 - 11:00) Feature work",
        "  - (m 11:00 - 11:30) Standup",
        "- (A 13:00 - 14:00) More feature work",
        "- (S 14:00 - 14:30) Ticket",
        "- (Z 15:00 - 16:00) Something else",
        "Notes about the day",
        "- (V -1:00 - 2:00) broken",
        "- (V 1:00 -) broken too",
    ];

    #[test]
    fn test_folds_tasks_and_expectations() {
        let summary = summarize(SAMPLE, Taxonomy::Standard);

        assert_eq!(summary.total_minutes, 300);
        assert_eq!(summary.entries.len(), 4);

        let planned = entry(&summary, TaskCode::PlannedWork);
        assert_eq!(planned.count_tasks, 2);
        assert_eq!(planned.received_minutes, 180);
        assert_eq!(planned.expected_minutes, 240);
        assert!((planned.factor_of_expected - 0.75).abs() < f64::EPSILON);
        assert!((planned.factor_of_total - 0.6).abs() < 1e-9);

        let meetings = entry(&summary, TaskCode::Meetings);
        assert_eq!(meetings.count_tasks, 1);
        assert_eq!(meetings.received_minutes, 30);
        assert!((meetings.factor_of_expected - 0.5).abs() < f64::EPSILON);

        let support = entry(&summary, TaskCode::Support);
        assert_eq!(support.expected_minutes, 0);
        assert!(support.factor_of_expected.abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_codes_fold_into_miscellaneous() {
        let summary = summarize(&["- (Z 1:00 - 2:00) x"], Taxonomy::Standard);
        let misc = entry(&summary, TaskCode::Miscellaneous);
        assert_eq!(misc.received_minutes, 60);
        assert_eq!(misc.category, Category::Miscellaneous);
        assert_eq!(misc.task_name, "Miscellaneous");
    }

    #[test]
    fn test_total_is_sum_of_received() {
        let summary = summarize(SAMPLE, Taxonomy::Merged);
        let sum: u64 = summary.entries.iter().map(|e| e.received_minutes).sum();
        assert_eq!(summary.total_minutes, sum);

        let factors: f64 = summary.entries.iter().map(|e| e.factor_of_total).sum();
        assert!((factors - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_lines_do_not_contribute() {
        let summary = summarize(&["- (V -1:23 - 4:56) x", "- (V 1:23) x"], Taxonomy::Standard);
        assert!(summary.entries.is_empty());
        assert_eq!(summary.total_minutes, 0);
    }

    #[test]
    fn test_expectation_only_entry_is_emitted() {
        let summary = summarize(&["> - Deployments D: 3h", "> - More D: 2h"], Taxonomy::Standard);
        assert_eq!(summary.total_minutes, 0);
        let deployments = entry(&summary, TaskCode::Deployments);
        assert_eq!(deployments.expected_minutes, 300);
        assert_eq!(deployments.count_tasks, 0);
        assert!(deployments.factor_of_expected.abs() < f64::EPSILON);
        assert!(deployments.factor_of_total.abs() < f64::EPSILON);
    }

    #[test]
    fn test_over_delivery_exceeds_one() {
        let summary = summarize(&["> - Support S: 1h", "- (S 8:00 - 10:00) fire"], Taxonomy::Standard);
        let support = entry(&summary, TaskCode::Support);
        assert!((support.factor_of_expected - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_taxonomy_only_changes_categories() {
        let standard = summarize(SAMPLE, Taxonomy::Standard);
        let merged = summarize(SAMPLE, Taxonomy::Merged);

        assert_eq!(standard.total_minutes, merged.total_minutes);
        assert_eq!(entry(&standard, TaskCode::Support).category, Category::Support);
        assert_eq!(entry(&merged, TaskCode::Support).category, Category::Maintenance);
        assert_eq!(entry(&merged, TaskCode::Support).category_name, "Maintenance");
    }

    #[test]
    fn test_summarizing_twice_is_identical_up_to_order() {
        let first = summarize(SAMPLE, Taxonomy::Standard);
        let second = summarize(SAMPLE, Taxonomy::Standard);
        assert_eq!(first.total_minutes, second.total_minutes);
        assert_eq!(first.sorted_entries(), second.sorted_entries());
    }

    #[test]
    fn test_sorted_entries_by_received_then_code() {
        let summary = summarize(SAMPLE, Taxonomy::Standard);
        let order: Vec<_> = summary.sorted_entries().iter().map(|e| e.task.as_char()).collect();
        assert_eq!(order, vec!['A', 'V', 'M', 'S']);
    }

    #[test]
    fn test_by_category_merges_maintenance_codes() {
        let lines = [
            "> - Support S: 2h",
            "- (D 8:00 - 9:00) deploy",
            "- (S 9:00 - 10:00) ticket",
            "- (W 10:00 - 11:00) upgrades",
            "- (A 11:00 - 12:00) feature",
        ];
        let summary = summarize(&lines, Taxonomy::Merged);
        let categories = summary.by_category();

        assert_eq!(categories.len(), 2);
        let maintenance = &categories[0];
        assert_eq!(maintenance.category, Category::Maintenance);
        assert_eq!(maintenance.count_tasks, 3);
        assert_eq!(maintenance.received_minutes, 180);
        assert_eq!(maintenance.expected_minutes, 120);
        assert!((maintenance.factor_of_expected - 1.5).abs() < f64::EPSILON);
        assert!((maintenance.factor_of_total - 0.75).abs() < f64::EPSILON);
        assert_eq!(categories[1].category, Category::PlannedWork);
    }

    #[test]
    fn test_by_category_saturates_large_durations() {
        let lines = [
            "- (D 0:00 - 300000000000000000:00) rollout",
            "- (S 0:00 - 300000000000000000:00) escalation",
        ];
        let summary = summarize(&lines, Taxonomy::Merged);
        assert_eq!(summary.total_minutes, u64::MAX);

        let categories = summary.by_category();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].category, Category::Maintenance);
        assert_eq!(categories[0].received_minutes, u64::MAX);
        assert_eq!(categories[0].count_tasks, 2);
    }

    #[test]
    fn test_empty_input_is_empty_summary() {
        let summary = summarize::<&str>(&[], Taxonomy::Standard);
        assert!(summary.entries.is_empty());
        assert_eq!(summary.total_minutes, 0);
        assert!(summary.by_category().is_empty());
    }
}
