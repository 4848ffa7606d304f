//! Loading the persisted CSV table back into memory.

use crate::models::{JobRecord, JobTable};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{error, info};

/// Read the whole CSV at `path` into a [`JobTable`].
///
/// A missing file is reported and yields `Ok(None)`; any other read or
/// parse failure is an error.
pub fn load_table(path: &Path) -> Result<Option<JobTable>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            error!("File '{}' not found", path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to open {}", path.display()));
        }
    };

    let mut reader = csv::Reader::from_reader(file);
    reader
        .headers()
        .with_context(|| format!("Failed to read header of {}", path.display()))?;

    let records = reader
        .deserialize::<JobRecord>()
        .enumerate()
        .map(|(idx, row)| {
            row.with_context(|| format!("Failed to parse row {} of {}", idx + 1, path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Data loaded: {} jobs found", records.len());

    Ok(Some(JobTable::new(records)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_record, COLUMNS, TAG_SEPARATOR};
    use crate::storage::write_records;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = load_table(&temp_dir.path().join("absent.csv")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jobs.csv");

        let mut tricky = sample_record("Engineer, \"Platform\"", "Ünïcode GmbH", "USA, Canada");
        tricky.description = "multi\nline...".to_string();
        tricky.tags = String::new();
        let records = vec![
            sample_record("Data Engineer", "Acme", "Worldwide"),
            tricky,
            sample_record("Analyst", "Globex", "Europe"),
        ];

        write_records(&records, &path).unwrap();
        let table = load_table(&path).unwrap().unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.records(), records.as_slice());
    }

    #[test]
    fn test_round_trip_keeps_separator_inside_tags() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jobs.csv");

        let mut record = sample_record("Systems Engineer", "Acme", "USA");
        record.tags = ["C, C++", ""].join(TAG_SEPARATOR);
        let records = vec![record];

        write_records(&records, &path).unwrap();
        let table = load_table(&path).unwrap().unwrap();

        assert_eq!(table.records(), records.as_slice());
        assert_eq!(table.records()[0].tags, "C, C++, ");
    }

    #[test]
    fn test_unreadable_path_is_error_not_missing() {
        let temp_dir = TempDir::new().unwrap();

        // A directory exists but cannot be read as a CSV file.
        assert!(load_table(temp_dir.path()).is_err());
    }

    #[test]
    fn test_columns_matched_by_header_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jobs.csv");

        let mut reordered: Vec<&str> = COLUMNS.to_vec();
        reordered.reverse();
        let row = [
            "2024-01-02 10:00:00",
            "N/A",
            "u",
            "d...",
            "Not specified",
            "",
            "Dev",
            "full_time",
            "USA",
            "Acme",
            "Engineer",
        ];
        std::fs::write(&path, format!("{}\n{}\n", reordered.join(","), row.join(","))).unwrap();

        let table = load_table(&path).unwrap().unwrap();
        let record = &table.records()[0];
        assert_eq!(record.title, "Engineer");
        assert_eq!(record.company, "Acme");
        assert_eq!(record.location, "USA");
        assert_eq!(record.scraped_on, "2024-01-02 10:00:00");
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jobs.csv");
        std::fs::write(&path, "Job Title,Company\nDev,Acme\n").unwrap();

        assert!(load_table(&path).is_err());
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jobs.csv");
        std::fs::write(&path, format!("{}\n", COLUMNS.join(","))).unwrap();

        let table = load_table(&path).unwrap().unwrap();
        assert!(table.is_empty());
    }
}
