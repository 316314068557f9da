pub mod aggregate;
pub mod db;
pub mod engine;
pub mod models;
pub mod project;
pub mod report;
pub mod sentiment;
pub mod settings;

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use log::info;

use models::{ExportedRecord, Review, ScoredReview};
use sentiment::{Classifier, Stopwords};
use settings::ReportSettings;

/// Score and project raw reviews into the exported record set.
pub fn score_reviews(reviews: Vec<Review>) -> Vec<ExportedRecord> {
    let classifier = Classifier::new();
    reviews
        .into_iter()
        .map(|review| {
            let polarity = review
                .content
                .as_deref()
                .and_then(|text| classifier.polarity(text));
            project::project(&ScoredReview::new(review, polarity))
        })
        .collect()
}

/// Distinct platform labels present in the source rows, sorted. Defaulted
/// "unknown" records are not offered as a tab, matching the source data
/// having no platform for them.
pub fn collect_platforms(reviews: &[Review]) -> Vec<String> {
    let set: BTreeSet<String> = reviews
        .iter()
        .filter_map(|r| r.platform.clone())
        .filter(|p| !p.trim().is_empty())
        .collect();
    set.into_iter().collect()
}

/// Full generation pass: fetch, classify, project, render, write.
pub fn run(settings: &ReportSettings) -> Result<PathBuf> {
    let store = db::ReviewStore::open(&settings.db_path)?;
    let reviews = store.fetch_reviews()?;

    let platforms = collect_platforms(&reviews);
    let records = score_reviews(reviews);
    info!(
        "Scored {} reviews across {} platforms",
        records.len(),
        platforms.len()
    );

    let stopwords = Stopwords::english_with(&settings.domain_stopwords);
    let html = report::render(&records, &platforms, &stopwords, settings)?;
    report::write_report(&html, &settings.output_path)?;

    if settings.open_browser {
        report::open_in_browser(&settings.output_path);
    }

    Ok(settings.output_path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_platforms_is_sorted_and_distinct() {
        let reviews = vec![
            Review {
                score: 5,
                content: Some("Great".into()),
                review_date: "2024-01-01".into(),
                platform: Some("iOS".into()),
            },
            Review {
                score: 4,
                content: Some("Good".into()),
                review_date: "2024-01-02".into(),
                platform: Some("Android".into()),
            },
            Review {
                score: 3,
                content: Some("Fine".into()),
                review_date: "2024-01-03".into(),
                platform: Some("iOS".into()),
            },
            Review {
                score: 2,
                content: Some("Meh".into()),
                review_date: "2024-01-04".into(),
                platform: None,
            },
        ];
        assert_eq!(collect_platforms(&reviews), vec!["Android", "iOS"]);
    }

    #[test]
    fn score_reviews_projects_every_row() {
        let reviews = vec![Review {
            score: 5,
            content: Some("Great app, love it, fast delivery".into()),
            review_date: "2024-03-01".into(),
            platform: Some("iOS".into()),
        }];
        let records = score_reviews(reviews);
        assert_eq!(records.len(), 1);
        assert!(records[0].sentiment_raw.unwrap() > 0.15);
        assert_eq!(records[0].year, Some(2024));
    }
}
