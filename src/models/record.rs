use serde::{Deserialize, Serialize};

use crate::models::SentimentCategory;

/// Normalized record embedded in the report. The serde field names are the
/// document-internal contract consumed by the in-report filtering script;
/// renaming any of them breaks the shipped reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedRecord {
    pub score: i64,
    /// Polarity formatted to two decimals, empty when polarity is absent.
    /// Kept alongside the raw float so display never re-parses.
    pub sentiment: String,
    pub sentiment_raw: Option<f64>,
    pub sentiment_type: Option<SentimentCategory>,
    pub review: String,
    /// `YYYY-MM-DD`, or empty when the source timestamp was unparseable.
    pub date: String,
    pub year: Option<i32>,
    /// Lowercased review text used for whole-word search.
    pub words: String,
    pub platform: String,
}
