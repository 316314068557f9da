//! Pure in-memory aggregation over exported records.
//!
//! Everything here operates on an already-validated slice; an empty input
//! yields zero counts and empty lists, never an error.

use std::collections::HashMap;

use regex::Regex;
use serde::Serialize;

use crate::models::{ExportedRecord, SentimentCategory, POSITIVE_THRESHOLD};
use crate::sentiment::Stopwords;

/// Default length of the top-word tables.
pub const TOP_WORDS: usize = 10;

/// Summary tables derived from a filtered record subset.
#[derive(Debug, Clone, Serialize, Default)]
pub struct AggregateView {
    pub total: usize,
    pub mean_polarity: f64,
    pub pct_positive: f64,
    pub pct_neutral: f64,
    pub pct_negative: f64,
    /// Index 0 holds the 1-star count; rendered 5 down to 1.
    pub star_histogram: [u64; 5],
    /// Rows are scores 1..=5, columns positive/neutral/negative.
    pub cross_tab: [[u64; 3]; 5],
    pub top_positive: Vec<(String, u64)>,
    pub top_negative: Vec<(String, u64)>,
}

/// Count of records per integer score 1-5. Out-of-range scores are ignored.
pub fn star_histogram(records: &[ExportedRecord]) -> [u64; 5] {
    let mut counts = [0u64; 5];
    for record in records {
        if (1..=5).contains(&record.score) {
            counts[(record.score - 1) as usize] += 1;
        }
    }
    counts
}

/// Count of records per (score, category) pair. Records without a valid
/// score or an assigned category contribute to no cell.
pub fn cross_tab(records: &[ExportedRecord]) -> [[u64; 3]; 5] {
    let mut table = [[0u64; 3]; 5];
    for record in records {
        if !(1..=5).contains(&record.score) {
            continue;
        }
        if let Some(category) = record.sentiment_type {
            table[(record.score - 1) as usize][category.column()] += 1;
        }
    }
    table
}

/// Top `n` words by occurrence in the raw text of records in `category`.
/// Tokens are lowercased, stripped of non-alphabetic characters, and dropped
/// when they are stopwords or shorter than 3 characters. Ties keep
/// first-encountered order.
pub fn top_words(
    records: &[ExportedRecord],
    category: SentimentCategory,
    stopwords: &Stopwords,
    n: usize,
) -> Vec<(String, u64)> {
    let strip = Regex::new(r"[^a-z\s]").expect("static pattern");

    let all_text: String = records
        .iter()
        .filter(|r| r.sentiment_type == Some(category))
        .map(|r| r.review.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let cleaned = strip.replace_all(&all_text, "");

    let mut counts: HashMap<&str, u64> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for token in cleaned.split_whitespace() {
        if token.len() <= 2 || stopwords.contains(token) {
            continue;
        }
        let entry = counts.entry(token).or_insert(0);
        if *entry == 0 {
            order.push(token);
        }
        *entry += 1;
    }

    let mut ranked: Vec<(String, u64)> = order
        .into_iter()
        .map(|word| (word.to_string(), counts[word]))
        .collect();
    // Stable sort keeps first-encountered order among equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Full aggregate view of a filtered subset.
pub fn summarize(
    records: &[ExportedRecord],
    stopwords: &Stopwords,
    top_n: usize,
) -> AggregateView {
    let total = records.len();
    if total == 0 {
        return AggregateView::default();
    }

    // Records lacking a polarity contribute 0.0 but count in the total.
    let sum: f64 = records.iter().map(|r| r.sentiment_raw.unwrap_or(0.0)).sum();
    let positive = records
        .iter()
        .filter(|r| r.sentiment_raw.map_or(false, |p| p > POSITIVE_THRESHOLD))
        .count();
    let negative = records
        .iter()
        .filter(|r| r.sentiment_raw.map_or(false, |p| p < -POSITIVE_THRESHOLD))
        .count();
    let neutral = records
        .iter()
        .filter(|r| {
            r.sentiment_raw
                .map_or(false, |p| (-POSITIVE_THRESHOLD..=POSITIVE_THRESHOLD).contains(&p))
        })
        .count();

    AggregateView {
        total,
        mean_polarity: sum / total as f64,
        pct_positive: positive as f64 / total as f64 * 100.0,
        pct_neutral: neutral as f64 / total as f64 * 100.0,
        pct_negative: negative as f64 / total as f64 * 100.0,
        star_histogram: star_histogram(records),
        cross_tab: cross_tab(records),
        top_positive: top_words(records, SentimentCategory::Positive, stopwords, top_n),
        top_negative: top_words(records, SentimentCategory::Negative, stopwords, top_n),
    }
}
