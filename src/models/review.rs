use serde::{Deserialize, Serialize};

/// Polarity above this is positive, below the negated value is negative.
/// Boundary values resolve to neutral.
pub const POSITIVE_THRESHOLD: f64 = 0.15;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SentimentCategory {
    Positive,
    Neutral,
    Negative,
}

impl SentimentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "positive",
            SentimentCategory::Neutral => "neutral",
            SentimentCategory::Negative => "negative",
        }
    }

    /// Fixed-threshold classification. Exactly ±0.15 stays neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POSITIVE_THRESHOLD {
            SentimentCategory::Positive
        } else if polarity < -POSITIVE_THRESHOLD {
            SentimentCategory::Negative
        } else {
            SentimentCategory::Neutral
        }
    }

    /// Category order used by the cross-tab columns.
    pub const ALL: [SentimentCategory; 3] = [
        SentimentCategory::Positive,
        SentimentCategory::Neutral,
        SentimentCategory::Negative,
    ];

    pub fn column(&self) -> usize {
        match self {
            SentimentCategory::Positive => 0,
            SentimentCategory::Neutral => 1,
            SentimentCategory::Negative => 2,
        }
    }
}

/// A raw review row as read from the store. Immutable once read.
#[derive(Debug, Clone)]
pub struct Review {
    pub score: i64,
    pub content: Option<String>,
    /// Raw timestamp text; normalized later by the projector so a bad
    /// date degrades a single record instead of failing the fetch.
    pub review_date: String,
    pub platform: Option<String>,
}

/// A review with its computed polarity and category attached.
#[derive(Debug, Clone)]
pub struct ScoredReview {
    pub review: Review,
    /// None when the review has no text.
    pub polarity: Option<f64>,
    /// None whenever polarity is None.
    pub category: Option<SentimentCategory>,
}

impl ScoredReview {
    pub fn new(review: Review, polarity: Option<f64>) -> Self {
        let category = polarity.map(SentimentCategory::from_polarity);
        Self {
            review,
            polarity,
            category,
        }
    }
}
