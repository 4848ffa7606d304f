//! CSV persistence of normalized records.

use crate::models::{JobRecord, WriteSummary};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Write `records` to `destination` as UTF-8 CSV with a header row.
///
/// Returns `Ok(None)` without touching the filesystem when there is
/// nothing to write. An existing file is overwritten.
pub fn write_records(records: &[JobRecord], destination: &Path) -> Result<Option<WriteSummary>> {
    if records.is_empty() {
        warn!("No jobs to save; {} not written", destination.display());
        println!("\n❌ No jobs found in collection!");
        return Ok(None);
    }

    let mut writer = csv::Writer::from_path(destination)
        .with_context(|| format!("Failed to create {}", destination.display()))?;

    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write row to {}", destination.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", destination.display()))?;

    debug!("Wrote {} rows", records.len());
    info!("Saved {} jobs to {}", records.len(), destination.display());

    Ok(Some(WriteSummary {
        rows: records.len(),
        path: destination.to_path_buf(),
    }))
}
