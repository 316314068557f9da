//! Filtering and ranking over the exported record set.
//!
//! The same semantics ship as JavaScript inside the rendered report; this
//! module is the pure, testable implementation and also produces the
//! report's initial tables. The record set is treated as read-only: every
//! state change is answered by a full recompute over it.

use anyhow::{Context, Result};
use regex::Regex;

use crate::aggregate::{self, AggregateView};
use crate::models::{ExportedRecord, POSITIVE_THRESHOLD};
use crate::sentiment::Stopwords;

/// Ranked comment lists are truncated to this many entries.
pub const RANKED_LIMIT: usize = 20;
/// Word-filtered matches must come from reviews at least this long.
pub const MIN_COMMENT_WORDS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentSide {
    Positive,
    Negative,
}

/// Filter state owned by the rendering context. Year bounds are inclusive.
#[derive(Debug, Clone)]
pub struct FilterState {
    pub year_start: i32,
    pub year_end: i32,
    /// None selects all platforms.
    pub platform: Option<String>,
    /// None hides the ranked comment table.
    pub word_filter: Option<String>,
    pub side: SentimentSide,
}

impl FilterState {
    /// Initial state: full observed year range, all platforms, no word
    /// filter, negative side.
    pub fn full_range(records: &[ExportedRecord]) -> Self {
        let (year_start, year_end) = year_bounds(records).unwrap_or((0, 0));
        Self {
            year_start,
            year_end,
            platform: None,
            word_filter: None,
            side: SentimentSide::Negative,
        }
    }
}

/// Observed (min, max) year across records that have one.
pub fn year_bounds(records: &[ExportedRecord]) -> Option<(i32, i32)> {
    let years = records.iter().filter_map(|r| r.year);
    let min = years.clone().min()?;
    let max = years.max()?;
    Some((min, max))
}

/// Year-range and platform predicate. Records without a year never match a
/// bounded range. Year-then-platform and platform-then-year commute.
pub fn filter_records<'a>(
    records: &'a [ExportedRecord],
    state: &FilterState,
) -> Vec<&'a ExportedRecord> {
    records
        .iter()
        .filter(|r| {
            r.year
                .map_or(false, |y| y >= state.year_start && y <= state.year_end)
        })
        .filter(|r| {
            state
                .platform
                .as_deref()
                .map_or(true, |p| r.platform == p)
        })
        .collect()
}

/// Recompute the aggregate view for the current filter state. Always derived
/// from the year/platform-filtered set, regardless of any word filter.
pub fn recompute(
    records: &[ExportedRecord],
    state: &FilterState,
    stopwords: &Stopwords,
    top_n: usize,
) -> AggregateView {
    let filtered: Vec<ExportedRecord> = filter_records(records, state)
        .into_iter()
        .cloned()
        .collect();
    aggregate::summarize(&filtered, stopwords, top_n)
}

/// Ranked comment list for the active sentiment side: newest first, then
/// strongest polarity for the side, then score as the final tie-break.
/// A word filter additionally requires a whole-word match in the token
/// string and at least [`MIN_COMMENT_WORDS`] tokens in the raw review.
pub fn ranked_comments(
    records: &[ExportedRecord],
    state: &FilterState,
) -> Result<Vec<ExportedRecord>> {
    let mut matches: Vec<&ExportedRecord> = filter_records(records, state)
        .into_iter()
        .filter(|r| match (state.side, r.sentiment_raw) {
            (SentimentSide::Positive, Some(p)) => p > POSITIVE_THRESHOLD,
            (SentimentSide::Negative, Some(p)) => p < -POSITIVE_THRESHOLD,
            (_, None) => false,
        })
        .collect();

    if let Some(word) = state.word_filter.as_deref() {
        let boundary = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
            .with_context(|| format!("invalid word filter '{word}'"))?;
        matches.retain(|r| {
            boundary.is_match(&r.words)
                && r.review.split_whitespace().count() >= MIN_COMMENT_WORDS
        });
    }

    matches.sort_by(|a, b| {
        b.date
            .cmp(&a.date) // ISO dates order lexicographically
            .then_with(|| {
                let pa = a.sentiment_raw.unwrap_or(0.0);
                let pb = b.sentiment_raw.unwrap_or(0.0);
                match state.side {
                    SentimentSide::Negative => pa.total_cmp(&pb),
                    SentimentSide::Positive => pb.total_cmp(&pa),
                }
            })
            .then_with(|| match state.side {
                SentimentSide::Negative => a.score.cmp(&b.score),
                SentimentSide::Positive => b.score.cmp(&a.score),
            })
    });

    matches.truncate(RANKED_LIMIT);
    Ok(matches.into_iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentimentCategory;

    fn record(
        score: i64,
        polarity: f64,
        review: &str,
        date: &str,
        platform: &str,
    ) -> ExportedRecord {
        ExportedRecord {
            score,
            sentiment: format!("{polarity:.2}"),
            sentiment_raw: Some(polarity),
            sentiment_type: Some(SentimentCategory::from_polarity(polarity)),
            review: review.to_string(),
            date: date.to_string(),
            year: date.get(..4).and_then(|y| y.parse().ok()),
            words: review.to_lowercase(),
            platform: platform.to_string(),
        }
    }

    fn long_review(lead: &str) -> String {
        format!("{lead} because the rest of this review keeps going on and on")
    }

    fn sample() -> Vec<ExportedRecord> {
        vec![
            record(5, 0.6, &long_review("good delivery"), "2024-03-01", "iOS"),
            record(1, -0.6, &long_review("slow delivery"), "2024-01-01", "Android"),
            record(2, -0.3, &long_review("slow checkout"), "2023-06-01", "iOS"),
            record(4, 0.3, &long_review("good goods"), "2023-05-01", "Android"),
        ]
    }

    #[test]
    fn full_range_observes_year_bounds() {
        let state = FilterState::full_range(&sample());
        assert_eq!((state.year_start, state.year_end), (2023, 2024));
        assert_eq!(state.side, SentimentSide::Negative);
        assert!(state.word_filter.is_none());
    }

    #[test]
    fn records_without_year_never_match_a_bounded_range() {
        let mut records = sample();
        records[0].year = None;
        records[0].date = String::new();
        let state = FilterState {
            year_start: 2000,
            year_end: 2100,
            ..FilterState::full_range(&sample())
        };
        let filtered = filter_records(&records, &state);
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn year_and_platform_filters_commute() {
        let records = sample();
        let year_only = FilterState {
            year_start: 2023,
            year_end: 2023,
            platform: None,
            word_filter: None,
            side: SentimentSide::Negative,
        };
        let both = FilterState {
            platform: Some("iOS".into()),
            ..year_only.clone()
        };

        // platform applied over the year-filtered set
        let year_first: Vec<_> = filter_records(&records, &year_only)
            .into_iter()
            .filter(|r| r.platform == "iOS")
            .map(|r| r.review.clone())
            .collect();
        let combined: Vec<_> = filter_records(&records, &both)
            .into_iter()
            .map(|r| r.review.clone())
            .collect();
        assert_eq!(year_first, combined);
    }

    #[test]
    fn empty_year_window_aggregates_to_zero() {
        let records = sample();
        let state = FilterState {
            year_start: 2020,
            year_end: 2020,
            platform: None,
            word_filter: None,
            side: SentimentSide::Negative,
        };
        let view = recompute(&records, &state, &Stopwords::default(), 10);
        assert_eq!(view.total, 0);
        assert_eq!(view.mean_polarity, 0.0);
    }

    #[test]
    fn word_filter_matches_whole_words_only() {
        let records = sample();
        let state = FilterState {
            word_filter: Some("good".into()),
            side: SentimentSide::Positive,
            ..FilterState::full_range(&records)
        };
        let ranked = ranked_comments(&records, &state).unwrap();
        // "good goods" matches via its standalone "good", never via "goods":
        // a review containing only "goods" must not appear.
        let only_goods = record(4, 0.4, &long_review("goods arrived"), "2023-04-01", "iOS");
        let mut extended = records.clone();
        extended.push(only_goods);
        let state = FilterState {
            word_filter: Some("good".into()),
            side: SentimentSide::Positive,
            ..FilterState::full_range(&extended)
        };
        let ranked_ext = ranked_comments(&extended, &state).unwrap();
        assert_eq!(ranked.len(), ranked_ext.len());
        assert!(ranked_ext.iter().all(|r| !r.review.contains("goods arrived")));
    }

    #[test]
    fn word_filter_requires_minimum_review_length() {
        let mut records = sample();
        records.push(record(1, -0.8, "slow", "2024-02-01", "iOS"));
        let state = FilterState {
            word_filter: Some("slow".into()),
            ..FilterState::full_range(&records)
        };
        let ranked = ranked_comments(&records, &state).unwrap();
        assert!(ranked
            .iter()
            .all(|r| r.review.split_whitespace().count() >= MIN_COMMENT_WORDS));
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn unfiltered_ranked_list_has_no_length_guard() {
        let mut records = sample();
        records.push(record(1, -0.8, "slow", "2024-02-01", "iOS"));
        let state = FilterState::full_range(&records);
        let ranked = ranked_comments(&records, &state).unwrap();
        assert!(ranked.iter().any(|r| r.review == "slow"));
    }

    #[test]
    fn newest_date_wins_regardless_of_polarity() {
        let records = vec![
            record(1, -0.2, &long_review("slow mildly"), "2024-05-01", "iOS"),
            record(1, -0.9, &long_review("slow awfully"), "2024-01-01", "iOS"),
        ];
        let state = FilterState::full_range(&records);
        let ranked = ranked_comments(&records, &state).unwrap();
        assert_eq!(ranked[0].date, "2024-05-01");
    }

    #[test]
    fn same_date_orders_by_side_polarity_then_score() {
        let records = vec![
            record(3, -0.3, &long_review("slow a bit"), "2024-05-01", "iOS"),
            record(1, -0.9, &long_review("slow terribly"), "2024-05-01", "iOS"),
            record(2, -0.9, &long_review("slow horribly"), "2024-05-01", "iOS"),
        ];
        let state = FilterState::full_range(&records);
        let ranked = ranked_comments(&records, &state).unwrap();
        assert_eq!(ranked[0].score, 1); // most negative polarity, lowest score
        assert_eq!(ranked[1].score, 2);
        assert_eq!(ranked[2].score, 3);
    }

    #[test]
    fn positive_side_orders_most_positive_first() {
        let records = vec![
            record(4, 0.3, &long_review("good enough overall"), "2024-05-01", "iOS"),
            record(5, 0.9, &long_review("good truly superb"), "2024-05-01", "iOS"),
        ];
        let state = FilterState {
            side: SentimentSide::Positive,
            ..FilterState::full_range(&records)
        };
        let ranked = ranked_comments(&records, &state).unwrap();
        assert_eq!(ranked[0].sentiment_raw, Some(0.9));
    }

    #[test]
    fn ranked_list_truncates_to_limit() {
        let records: Vec<ExportedRecord> = (0..30)
            .map(|i| {
                record(
                    1,
                    -0.5,
                    &long_review("slow again"),
                    &format!("2024-01-{:02}", i % 28 + 1),
                    "iOS",
                )
            })
            .collect();
        let state = FilterState::full_range(&records);
        let ranked = ranked_comments(&records, &state).unwrap();
        assert_eq!(ranked.len(), RANKED_LIMIT);
    }
}
