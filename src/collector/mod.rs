//! Job collection: fetch the listing, then normalize each posting.
//!
//! Failures never abort the run. Transport and HTTP errors turn into
//! [`Collection::Failed`]; a posting that cannot be normalized is logged
//! with its position and skipped, which makes the outcome
//! [`Collection::Partial`].

pub mod fetcher;
pub mod normalize;

pub use fetcher::{FetchError, Listing};

use fetcher::fetch_listing;
use normalize::normalize_value;

use crate::config::CollectorConfig;
use crate::models::{JobRecord, SkippedJob};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Options for a single collector run.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Maximum number of postings to keep.
    pub limit: usize,
    /// Print a progress line every this many postings (0 disables).
    pub progress_every: usize,
    /// Whether to show the spinner and progress lines.
    pub show_progress: bool,
}

impl CollectOptions {
    pub fn from_config(config: &CollectorConfig, show_progress: bool) -> Self {
        Self {
            limit: config.max_jobs,
            progress_every: config.progress_every,
            show_progress,
        }
    }

    /// Whether a progress line follows the posting at 1-based `position`.
    fn progress_due(&self, position: usize) -> bool {
        self.show_progress && self.progress_every > 0 && position % self.progress_every == 0
    }
}

/// Outcome of a collector run.
#[derive(Debug)]
pub enum Collection {
    /// Every kept posting was normalized. `records` is empty when the
    /// source had nothing to offer.
    Complete {
        records: Vec<JobRecord>,
        available: usize,
    },
    /// Some postings were skipped.
    Partial {
        records: Vec<JobRecord>,
        available: usize,
        skipped: Vec<SkippedJob>,
    },
    /// The listing could not be retrieved at all.
    Failed(FetchError),
}

impl Collection {
    pub fn records(&self) -> &[JobRecord] {
        match self {
            Collection::Complete { records, .. } | Collection::Partial { records, .. } => records,
            Collection::Failed(_) => &[],
        }
    }

    pub fn into_records(self) -> Vec<JobRecord> {
        match self {
            Collection::Complete { records, .. } | Collection::Partial { records, .. } => records,
            Collection::Failed(_) => Vec::new(),
        }
    }

    pub fn skipped(&self) -> &[SkippedJob] {
        match self {
            Collection::Partial { skipped, .. } => skipped,
            _ => &[],
        }
    }

    /// Postings offered by the source before truncation.
    pub fn available(&self) -> usize {
        match self {
            Collection::Complete { available, .. } | Collection::Partial { available, .. } => {
                *available
            }
            Collection::Failed(_) => 0,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Collection::Failed(_))
    }
}

/// Fetch the listing from the configured endpoint and normalize it.
pub async fn fetch_and_normalize(config: &CollectorConfig, options: &CollectOptions) -> Collection {
    info!("Fetching job listing from {}", config.endpoint);

    let spinner = options.show_progress.then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Sending request...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let fetched = fetch_listing(config).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    match fetched {
        Ok(listing) => {
            info!("API responded with {} postings", listing.available());
            normalize_listing(listing, options)
        }
        Err(e) => {
            error!("Collection failed: {}", e);
            Collection::Failed(e)
        }
    }
}

/// Truncate the listing to the limit and normalize each posting on its own.
pub fn normalize_listing(listing: Listing, options: &CollectOptions) -> Collection {
    let available = listing.available();
    let kept: Vec<_> = listing.jobs.into_iter().take(options.limit).collect();
    let total = kept.len();

    if options.show_progress {
        println!("   Processing {} of {} available jobs...", total, available);
    }

    let mut records = Vec::with_capacity(total);
    let mut skipped = Vec::new();

    for (idx, value) in kept.into_iter().enumerate() {
        let position = idx + 1;

        match normalize_value(value, Local::now().naive_local()) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Skipping job {}: {}", position, e);
                skipped.push(SkippedJob {
                    index: position,
                    reason: e.to_string(),
                });
            }
        }

        if options.progress_due(position) {
            println!("   ✓ Processed {}/{} jobs...", position, total);
        }
    }

    debug!(
        "Normalized {} postings, skipped {}",
        records.len(),
        skipped.len()
    );

    if skipped.is_empty() {
        Collection::Complete { records, available }
    } else {
        Collection::Partial {
            records,
            available,
            skipped,
        }
    }
}
