//! Counting reports over the job table.
//!
//! Every report is a pure function of an already loaded table. Counts
//! are accumulated in order of first appearance and then stable-sorted,
//! so equal counts keep that order.

use crate::config::AnalysisConfig;
use crate::models::{CollectionStats, JobRecord, JobTable, Ranked, TableOverview};
use std::collections::{HashMap, HashSet};

/// How many distinct categories the collector stats list.
const STATS_CATEGORY_LIMIT: usize = 5;

/// Count occurrences of each value, in order of first appearance.
pub fn count_in_order<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<Ranked> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<Ranked> = Vec::new();

    for value in values {
        match positions.get(value) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }

    counts
}

/// Sort counts descending, keeping first-appearance order for ties, and keep `n`.
pub fn rank(mut counts: Vec<Ranked>, n: usize) -> Vec<Ranked> {
    counts.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    counts.truncate(n);
    counts
}

/// Locations with the most postings.
pub fn top_locations(table: &JobTable, n: usize) -> Vec<Ranked> {
    rank(count_in_order(table.locations()), n)
}

/// Companies with the most postings.
pub fn top_companies(table: &JobTable, n: usize) -> Vec<Ranked> {
    rank(count_in_order(table.companies()), n)
}

/// Most frequent words across all job titles.
///
/// Titles are joined with single spaces, lower-cased and split on
/// whitespace. Stop words and tokens shorter than
/// `min_keyword_length` characters are dropped.
pub fn keyword_frequency(table: &JobTable, settings: &AnalysisConfig) -> Vec<Ranked> {
    let stop_words: HashSet<String> = settings
        .stop_words
        .iter()
        .map(|w| w.to_lowercase())
        .collect();

    let blob = table.titles().collect::<Vec<_>>().join(" ").to_lowercase();

    let tokens = blob.split_whitespace().filter(|token| {
        !stop_words.contains(*token) && token.chars().count() >= settings.min_keyword_length
    });

    rank(count_in_order(tokens), settings.keyword_limit)
}

/// Headline counts for a loaded table.
pub fn overview(table: &JobTable) -> TableOverview {
    TableOverview {
        total_jobs: table.len(),
        unique_companies: table.companies().collect::<HashSet<_>>().len(),
        unique_locations: table.locations().collect::<HashSet<_>>().len(),
    }
}

/// Quick stats over freshly collected records.
pub fn collection_stats(records: &[JobRecord]) -> CollectionStats {
    let mut categories = distinct_in_order(records.iter().map(|r| r.category.as_str()));
    categories.truncate(STATS_CATEGORY_LIMIT);

    CollectionStats {
        total_jobs: records.len(),
        unique_companies: records
            .iter()
            .map(|r| r.company.as_str())
            .collect::<HashSet<_>>()
            .len(),
        categories,
        job_types: distinct_in_order(records.iter().map(|r| r.job_type.as_str())),
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    count_in_order(values)
        .into_iter()
        .map(|(value, _)| value)
        .collect()
}
