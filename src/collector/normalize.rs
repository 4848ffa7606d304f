//! Mapping raw API job objects into fully populated records.

use crate::models::{JobRecord, RawJob, TAG_SEPARATOR};
use chrono::NaiveDateTime;
use serde_json::Value;
use thiserror::Error;

/// Maximum number of characters kept from a description.
pub const DESCRIPTION_LIMIT: usize = 200;

/// Appended to every stored description.
pub const ELLIPSIS: &str = "...";

/// Format of the `Scraped On` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NOT_AVAILABLE: &str = "N/A";
const DEFAULT_LOCATION: &str = "Worldwide";
const DEFAULT_SALARY: &str = "Not specified";

/// Why a single job entry could not be normalized.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("expected a job object, found {0}")]
    NotAnObject(&'static str),

    #[error("unexpected job shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Decode one entry of the `jobs` array and normalize it.
pub fn normalize_value(value: Value, captured_at: NaiveDateTime) -> Result<JobRecord, NormalizeError> {
    if !value.is_object() {
        return Err(NormalizeError::NotAnObject(json_kind(&value)));
    }

    let raw: RawJob = serde_json::from_value(value)?;
    Ok(normalize(raw, captured_at))
}

/// Fill every missing field with its default.
pub fn normalize(raw: RawJob, captured_at: NaiveDateTime) -> JobRecord {
    let or_na = |field: Option<String>| field.unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let description = raw.description.unwrap_or_else(|| NOT_AVAILABLE.to_string());

    JobRecord {
        title: or_na(raw.title),
        company: or_na(raw.company_name),
        location: raw
            .candidate_required_location
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        job_type: or_na(raw.job_type),
        category: or_na(raw.category),
        tags: raw.tags.unwrap_or_default().join(TAG_SEPARATOR),
        salary: raw.salary.unwrap_or_else(|| DEFAULT_SALARY.to_string()),
        description: truncate_description(&description),
        url: or_na(raw.url),
        publication_date: or_na(raw.publication_date),
        scraped_on: captured_at.format(TIMESTAMP_FORMAT).to_string(),
    }
}

fn truncate_description(text: &str) -> String {
    let mut short: String = text.chars().take(DESCRIPTION_LIMIT).collect();
    short.push_str(ELLIPSIS);
    short
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn captured_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap()
    }

    #[test]
    fn test_empty_object_gets_defaults() {
        let record = normalize_value(json!({}), captured_at()).unwrap();

        assert_eq!(record.title, "N/A");
        assert_eq!(record.company, "N/A");
        assert_eq!(record.location, "Worldwide");
        assert_eq!(record.job_type, "N/A");
        assert_eq!(record.category, "N/A");
        assert_eq!(record.tags, "");
        assert_eq!(record.salary, "Not specified");
        assert_eq!(record.description, "N/A...");
        assert_eq!(record.url, "N/A");
        assert_eq!(record.publication_date, "N/A");
        assert_eq!(record.scraped_on, "2024-03-09 14:05:07");
    }

    #[test]
    fn test_null_fields_get_defaults() {
        let record = normalize_value(
            json!({"salary": null, "candidate_required_location": null}),
            captured_at(),
        )
        .unwrap();
        assert_eq!(record.salary, "Not specified");
        assert_eq!(record.location, "Worldwide");
    }

    #[test]
    fn test_full_object_maps_fields() {
        let record = normalize_value(
            json!({
                "id": 1,
                "title": "Senior Rust Engineer",
                "company_name": "Ferrous",
                "candidate_required_location": "Europe",
                "job_type": "full_time",
                "category": "Software Development",
                "tags": ["rust", "tokio"],
                "salary": "$120k",
                "description": "<p>Systems work</p>",
                "url": "https://remotive.com/jobs/1",
                "publication_date": "2024-03-01T10:00:00"
            }),
            captured_at(),
        )
        .unwrap();

        assert_eq!(record.title, "Senior Rust Engineer");
        assert_eq!(record.company, "Ferrous");
        assert_eq!(record.location, "Europe");
        assert_eq!(record.tags, "rust, tokio");
        assert_eq!(record.description, "<p>Systems work</p>...");
        assert_eq!(record.publication_date, "2024-03-01T10:00:00");
    }

    #[test]
    fn test_description_truncated_by_characters() {
        let long = "é".repeat(250);
        let record = normalize_value(json!({ "description": long }), captured_at()).unwrap();

        assert_eq!(record.description.chars().count(), DESCRIPTION_LIMIT + ELLIPSIS.len());
        assert!(record.description.ends_with("é..."));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = normalize_value(json!(["title", "company"]), captured_at()).unwrap_err();
        assert!(matches!(err, NormalizeError::NotAnObject("an array")));

        let err = normalize_value(Value::Null, captured_at()).unwrap_err();
        assert_eq!(err.to_string(), "expected a job object, found null");
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let err = normalize_value(json!({"tags": "rust"}), captured_at()).unwrap_err();
        assert!(matches!(err, NormalizeError::Shape(_)));
    }
}
