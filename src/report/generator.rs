//! Console report generation.
//!
//! This module renders collector and analyzer results as plain text for
//! the terminal, plus a JSON form of the analysis.

use crate::models::{
    AnalysisReport, CollectionStats, JobRecord, Ranked, TableOverview, WriteSummary, COLUMNS,
};
use anyhow::Result;

const WIDE_RULE: usize = 70;
const NARROW_RULE: usize = 40;

/// Number of rows shown in the post-collection preview.
pub const PREVIEW_ROWS: usize = 5;

/// Number of column names echoed after saving.
const SAVED_COLUMNS_SHOWN: usize = 5;

/// A horizontal rule of `=` characters.
pub fn rule(width: usize) -> String {
    "=".repeat(width)
}

/// Banner printed at the start of a command.
pub fn generate_banner(title: &str) -> String {
    format!("\n{}\n{}\n{}\n", rule(WIDE_RULE), title, rule(WIDE_RULE))
}

/// Confirmation block after the CSV has been written.
pub fn generate_saved_section(summary: &WriteSummary) -> String {
    let mut section = String::new();

    section.push_str(&format!("\n{}\n", rule(WIDE_RULE)));
    section.push_str(&format!(
        "{} jobs saved to {}\n",
        summary.rows,
        summary.path.display()
    ));
    section.push_str(&format!(
        "Columns: {}...\n",
        COLUMNS[..SAVED_COLUMNS_SHOWN].join(", ")
    ));
    section.push_str(&rule(WIDE_RULE));
    section.push('\n');

    section
}

/// Fixed-width preview of the first few records.
pub fn generate_preview_section(records: &[JobRecord]) -> String {
    let rows: Vec<[&str; 4]> = records
        .iter()
        .take(PREVIEW_ROWS)
        .map(|r| {
            [
                r.title.as_str(),
                r.company.as_str(),
                r.category.as_str(),
                r.job_type.as_str(),
            ]
        })
        .collect();

    let headers = ["Job Title", "Company", "Category", "Job Type"];
    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: &[&str; 4]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        format!("  {}", padded.join("  ").trim_end())
    };

    let mut section = generate_banner(&format!("PREVIEW (First {} jobs):", PREVIEW_ROWS));
    section.push_str(&format_row(&headers));
    section.push('\n');
    for row in &rows {
        section.push_str(&format_row(row));
        section.push('\n');
    }

    section
}

/// Quick stats over the freshly collected records.
pub fn generate_stats_section(stats: &CollectionStats) -> String {
    let mut section = generate_banner("QUICK STATS:");

    section.push_str(&format!("Total Jobs: {}\n", stats.total_jobs));
    section.push_str(&format!("Unique Companies: {}\n", stats.unique_companies));
    section.push_str(&format!("Categories: {}\n", stats.categories.join(", ")));
    section.push_str(&format!("Job Types: {}\n", stats.job_types.join(", ")));

    section
}

/// Full text rendering of the analysis.
pub fn generate_text_report(report: &AnalysisReport) -> String {
    let mut output = String::new();

    output.push_str(&generate_overview_section(&report.overview));
    output.push_str(&generate_ranked_section(
        &format!("📍 Top {} Locations with Most Jobs:", report.top_n),
        &report.top_locations,
        "jobs",
    ));
    output.push('\n');
    output.push_str(&generate_ranked_section(
        &format!("🏢 Top {} Companies Hiring:", report.top_n),
        &report.top_companies,
        "openings",
    ));
    output.push('\n');
    output.push_str(&generate_ranked_section(
        "🔑 Most Common Job Keywords:",
        &report.keywords,
        "times",
    ));

    output
}

/// Headline counts.
fn generate_overview_section(overview: &TableOverview) -> String {
    let mut section = String::new();

    section.push_str(&format!("Total Jobs: {}\n", overview.total_jobs));
    section.push_str(&format!("Total Companies: {}\n", overview.unique_companies));
    section.push_str(&format!("Total Locations: {}\n\n", overview.unique_locations));

    section
}

/// A numbered `value: count unit` listing under a heading.
fn generate_ranked_section(heading: &str, entries: &[Ranked], unit: &str) -> String {
    let mut section = String::new();

    section.push_str(heading);
    section.push('\n');
    section.push_str(&"-".repeat(NARROW_RULE));
    section.push('\n');

    if entries.is_empty() {
        section.push_str("(none)\n");
    }

    for (i, (value, count)) in entries.iter().enumerate() {
        section.push_str(&format!("{}. {}: {} {}\n", i + 1, value, count, unit));
    }

    section
}

/// Generate a JSON report.
pub fn generate_json_report(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
