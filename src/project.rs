//! Projection of scored reviews into the exported record shape.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::models::{ExportedRecord, ScoredReview};

/// Platform label used when the source row has none.
pub const UNKNOWN_PLATFORM: &str = "unknown";

/// Normalize a raw timestamp to (`YYYY-MM-DD`, year). Unparseable input
/// yields an empty string and no year; such records never match a
/// year-bounded filter.
pub fn normalize_date(raw: &str) -> (String, Option<i32>) {
    match parse_date(raw) {
        Some(d) => (d.format("%Y-%m-%d").to_string(), Some(d.year())),
        None => (String::new(), None),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Convert one scored review into the immutable exported form.
pub fn project(scored: &ScoredReview) -> ExportedRecord {
    let review_text = scored.review.content.clone().unwrap_or_default();
    let (date, year) = normalize_date(&scored.review.review_date);

    ExportedRecord {
        score: scored.review.score,
        sentiment: scored
            .polarity
            .map(|p| format!("{p:.2}"))
            .unwrap_or_default(),
        sentiment_raw: scored.polarity,
        sentiment_type: scored.category,
        words: review_text.to_lowercase(),
        review: review_text,
        date,
        year,
        platform: scored
            .review
            .platform
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_PLATFORM.to_string()),
    }
}
