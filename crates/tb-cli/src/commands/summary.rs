//! Summary command for reporting time per task code or category.
//!
//! This module implements `tb summary <FILE>` with per-task or per-category
//! rows and two output formats (human-readable, JSON).

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use tb_core::{CategorySummary, SummaryEntry, Taxonomy, TimebookSummary};

use crate::Config;
use crate::cli::SummaryArgs;

// ========== Duration Formatting ==========

/// Formats minutes as duration string.
/// Returns "Xh Ym" if >= 1 hour, "Xm" if < 1 hour.
pub fn format_duration(minutes: u64) -> String {
    let hours = minutes / 60;
    let minutes = minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Rounds a factor to a whole percentage.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(factor: f64) -> u64 {
    (factor * 100.0).round() as u64
}

// ========== Progress Bar ==========

/// Generates a 10-character progress bar.
/// Values <5% of max get a single block for visibility.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn progress_bar(value: u64, max: u64) -> String {
    if max == 0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value as f64 / max as f64;
    let filled = if ratio < 0.05 && value > 0 {
        1
    } else {
        (ratio * 10.0).round().min(10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

// ========== Report Rows ==========

/// One rendered line of the report, either a task code or a category.
#[derive(Debug)]
struct Row {
    code: char,
    name: &'static str,
    expected_minutes: u64,
    received_minutes: u64,
    factor_of_expected: f64,
    factor_of_total: f64,
}

impl From<&SummaryEntry> for Row {
    fn from(entry: &SummaryEntry) -> Self {
        Self {
            code: entry.task.as_char(),
            name: entry.task_name,
            expected_minutes: entry.expected_minutes,
            received_minutes: entry.received_minutes,
            factor_of_expected: entry.factor_of_expected,
            factor_of_total: entry.factor_of_total,
        }
    }
}

impl From<&CategorySummary> for Row {
    fn from(category: &CategorySummary) -> Self {
        Self {
            code: category.category.as_char(),
            name: category.category_name,
            expected_minutes: category.expected_minutes,
            received_minutes: category.received_minutes,
            factor_of_expected: category.factor_of_expected,
            factor_of_total: category.factor_of_total,
        }
    }
}

fn rows(summary: &TimebookSummary, by_category: bool) -> Vec<Row> {
    if by_category {
        summary.by_category().iter().map(Row::from).collect()
    } else {
        summary.sorted_entries().into_iter().map(Row::from).collect()
    }
}

// ========== Report Generation ==========

/// Writes the human-readable report.
pub fn write_report<W: Write>(
    writer: &mut W,
    label: &str,
    summary: &TimebookSummary,
    by_category: bool,
) -> std::io::Result<()> {
    writeln!(writer, "TIMEBOOK: {label} ({} taxonomy)", summary.taxonomy)?;

    if summary.entries.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "No task entries found.")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "Hint: task lines look like '- (A 9:00 - 10:30) description'."
        )?;
        return Ok(());
    }

    let rows = rows(summary, by_category);
    let max = rows.iter().map(|r| r.received_minutes).max().unwrap_or(0);

    writeln!(writer)?;
    if by_category {
        writeln!(writer, "BY CATEGORY")?;
        writeln!(writer, "───────────")?;
    } else {
        writeln!(writer, "BY TASK")?;
        writeln!(writer, "───────")?;
    }

    for row in &rows {
        let duration = format_duration(row.received_minutes);
        let share = percent(row.factor_of_total);
        let bar = progress_bar(row.received_minutes, max);
        write!(
            writer,
            "{}  {:<16}{duration:>7}  {share:>3}%  {bar}",
            row.code, row.name
        )?;
        if row.expected_minutes > 0 {
            write!(
                writer,
                "  of {} ({}%)",
                format_duration(row.expected_minutes),
                percent(row.factor_of_expected)
            )?;
        }
        writeln!(writer)?;
    }

    let total_expected = summary
        .entries
        .iter()
        .map(|e| e.expected_minutes)
        .fold(0, u64::saturating_add);

    writeln!(writer)?;
    writeln!(writer, "SUMMARY")?;
    writeln!(writer, "───────")?;
    writeln!(
        writer,
        "Total tracked:  {}",
        format_duration(summary.total_minutes)
    )?;
    if total_expected > 0 {
        writeln!(writer, "Total expected: {}", format_duration(total_expected))?;
    }
    writeln!(writer, "Task entries:   {}", summary.count_tasks())?;

    Ok(())
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub file: &'a str,
    pub taxonomy: Taxonomy,
    pub total_minutes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<&'a SummaryEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategorySummary>>,
}

/// Formats the summary as JSON.
pub fn format_report_json(
    label: &str,
    summary: &TimebookSummary,
    by_category: bool,
) -> Result<String> {
    let (entries, categories) = if by_category {
        (None, Some(summary.by_category()))
    } else {
        (Some(summary.sorted_entries()), None)
    };

    let report = JsonReport {
        file: label,
        taxonomy: summary.taxonomy,
        total_minutes: summary.total_minutes,
        entries,
        categories,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the summary command.
pub fn run<W: Write>(writer: &mut W, args: &SummaryArgs, config: &Config) -> Result<()> {
    let taxonomy = args.taxonomy.unwrap_or(config.taxonomy);
    let by_category = args.by_category || config.by_category;

    tracing::debug!(file = %args.file.display(), %taxonomy, by_category, "summarizing");
    let summary = tb_core::parse_file(&args.file, taxonomy)?;

    let label = args.file.display().to_string();
    if args.json {
        let output = format_report_json(&label, &summary, by_category)?;
        writeln!(writer, "{output}")?;
    } else {
        write_report(writer, &label, &summary, by_category).context("failed to write report")?;
    }

    Ok(())
}
