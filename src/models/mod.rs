mod record;
mod review;

pub use record::ExportedRecord;
pub use review::{Review, ScoredReview, SentimentCategory, POSITIVE_THRESHOLD};
