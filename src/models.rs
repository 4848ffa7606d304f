//! Data models for the job collector and analyzer.
//!
//! This module contains the wire shape of a posting, the normalized
//! record persisted to CSV, the in-memory table and the report structures
//! produced by the analysis step.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Column headers of the persisted table, in storage order.
pub const COLUMNS: [&str; 11] = [
    "Job Title",
    "Company",
    "Location",
    "Job Type",
    "Category",
    "Tags",
    "Salary",
    "Description",
    "URL",
    "Publication Date",
    "Scraped On",
];

/// Separator used to flatten tags into a single CSV field.
pub const TAG_SEPARATOR: &str = ", ";

/// One job object as returned by the remote API.
///
/// Every field is optional on the wire; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJob {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub candidate_required_location: Option<String>,
    pub job_type: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub salary: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub publication_date: Option<String>,
}

/// A normalized job posting with every field populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "Job Title")]
    pub title: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Job Type")]
    pub job_type: String,
    #[serde(rename = "Category")]
    pub category: String,
    /// Tags joined with [`TAG_SEPARATOR`], stored and loaded as-is.
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "Salary")]
    pub salary: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Publication Date")]
    pub publication_date: String,
    /// Capture time, `%Y-%m-%d %H:%M:%S` in local time.
    #[serde(rename = "Scraped On")]
    pub scraped_on: String,
}

/// A posting that could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedJob {
    /// 1-based position of the entry in the fetched list.
    pub index: usize,
    /// Why the entry was rejected.
    pub reason: String,
}

/// The aggregator's read-only view of the persisted table.
#[derive(Debug, Clone, Default)]
pub struct JobTable {
    records: Vec<JobRecord>,
}

impl JobTable {
    pub fn new(records: Vec<JobRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    /// Values of the `Location` column, in row order.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.location.as_str())
    }

    /// Values of the `Company` column, in row order.
    pub fn companies(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.company.as_str())
    }

    /// Values of the `Job Title` column, in row order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.title.as_str())
    }
}

impl From<Vec<JobRecord>> for JobTable {
    fn from(records: Vec<JobRecord>) -> Self {
        Self::new(records)
    }
}

/// Result of persisting records to disk.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    pub rows: usize,
    pub path: PathBuf,
}

/// A value and how many rows carried it.
pub type Ranked = (String, usize);

/// Headline counts over a loaded table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableOverview {
    pub total_jobs: usize,
    pub unique_companies: usize,
    pub unique_locations: usize,
}

/// Quick stats printed after a collector run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    pub total_jobs: usize,
    pub unique_companies: usize,
    /// First few distinct categories, in order of appearance.
    pub categories: Vec<String>,
    /// All distinct job types, in order of appearance.
    pub job_types: Vec<String>,
}

/// Everything the `analyze` command reports.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source: PathBuf,
    pub overview: TableOverview,
    pub top_n: usize,
    pub top_locations: Vec<Ranked>,
    pub top_companies: Vec<Ranked>,
    pub keywords: Vec<Ranked>,
}

/// Build a record with fixed filler fields for tests.
#[cfg(test)]
pub(crate) fn sample_record(title: &str, company: &str, location: &str) -> JobRecord {
    JobRecord {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        job_type: "full_time".to_string(),
        category: "Software Development".to_string(),
        tags: "rust, backend".to_string(),
        salary: "Not specified".to_string(),
        description: "Build things...".to_string(),
        url: "https://example.com/job".to_string(),
        publication_date: "2024-01-01T00:00:00".to_string(),
        scraped_on: "2024-01-02 10:00:00".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_job_ignores_unknown_fields() {
        let raw: RawJob = serde_json::from_str(
            r#"{"id": 7, "title": "Engineer", "company_logo": "x.png", "tags": ["go"]}"#,
        )
        .unwrap();
        assert_eq!(raw.title.as_deref(), Some("Engineer"));
        assert_eq!(raw.tags, Some(vec!["go".to_string()]));
        assert!(raw.company_name.is_none());
    }

    #[test]
    fn test_raw_job_rejects_wrong_types() {
        let result = serde_json::from_str::<RawJob>(r#"{"title": 42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_tags_flatten_into_one_field() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(sample_record("Dev", "Acme", "USA")).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let header = text.lines().next().unwrap();
        assert_eq!(header.split(',').count(), COLUMNS.len());
        assert!(text.contains("\"rust, backend\""));
    }

    #[test]
    fn test_empty_tags_field_loads_as_empty_text() {
        let data = format!(
            "{}\nDev,Acme,USA,full_time,Dev,,Not specified,d...,u,p,s\n",
            COLUMNS.join(",")
        );
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let loaded: JobRecord = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(loaded.tags, "");
    }

    #[test]
    fn test_table_column_views() {
        let table = JobTable::from(vec![
            sample_record("Data Engineer", "Acme", "USA"),
            sample_record("Analyst", "Globex", "Europe"),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.locations().collect::<Vec<_>>(), vec!["USA", "Europe"]);
        assert_eq!(table.companies().collect::<Vec<_>>(), vec!["Acme", "Globex"]);
        assert_eq!(
            table.titles().collect::<Vec<_>>(),
            vec!["Data Engineer", "Analyst"]
        );
    }
}
