//! HTTP retrieval of the job listing.
//!
//! One GET, no retries. Every failure is classified into a [`FetchError`]
//! so the caller can degrade to an empty result instead of aborting.

use crate::config::CollectorConfig;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Characters of an error body kept for diagnostics.
pub const SNIPPET_LIMIT: usize = 200;

/// Why the listing could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("cannot connect to {endpoint}")]
    Connect { endpoint: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("API error {status}: {snippet}")]
    Status { status: u16, snippet: String },

    #[error("unreadable response: {0}")]
    Decode(String),
}

/// The `jobs` array of a successful response.
#[derive(Debug, Default)]
pub struct Listing {
    pub jobs: Vec<Value>,
}

impl Listing {
    /// Number of postings the source returned, before any truncation.
    pub fn available(&self) -> usize {
        self.jobs.len()
    }
}

/// Issue the GET and decode the listing.
pub async fn fetch_listing(config: &CollectorConfig) -> Result<Listing, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    debug!("GET {}", config.endpoint);

    let response = client
        .get(&config.endpoint)
        .send()
        .await
        .map_err(|e| classify(e, config))?;

    let status = response.status();
    let body = response.text().await.map_err(|e| classify(e, config))?;

    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            snippet: snippet(&body),
        });
    }

    parse_listing(&body)
}

/// Decode a response body into a listing.
///
/// A body without a `jobs` key is an empty listing, not an error.
pub fn parse_listing(body: &str) -> Result<Listing, FetchError> {
    let document: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let Value::Object(mut fields) = document else {
        return Err(FetchError::Decode(
            "expected a JSON object at the top level".to_string(),
        ));
    };

    match fields.remove("jobs") {
        None => {
            warn!("Response has no 'jobs' key; treating as empty");
            Ok(Listing::default())
        }
        Some(Value::Array(jobs)) => Ok(Listing { jobs }),
        Some(_) => Err(FetchError::Decode("'jobs' is not an array".to_string())),
    }
}

fn classify(error: reqwest::Error, config: &CollectorConfig) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            seconds: config.timeout_seconds,
        }
    } else if error.is_connect() {
        FetchError::Connect {
            endpoint: config.endpoint.clone(),
        }
    } else {
        FetchError::Transport(error.to_string())
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_LIMIT).collect()
}
