//! End-to-end pass: seeded SQLite file -> generated report document.

use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::Connection;

use reviewlens::settings::ReportSettings;

struct TempPaths {
    db: PathBuf,
    out: PathBuf,
}

impl TempPaths {
    fn new(tag: &str) -> Self {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let base = std::env::temp_dir();
        Self {
            db: base.join(format!("reviewlens-{tag}-{}-{stamp}.sqlite3", process::id())),
            out: base.join(format!("reviewlens-{tag}-{}-{stamp}.html", process::id())),
        }
    }
}

impl Drop for TempPaths {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db);
        let _ = fs::remove_file(&self.out);
    }
}

fn seed_database(path: &PathBuf) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE reviews (
             score INTEGER NOT NULL,
             content TEXT,
             review_date TEXT,
             platform TEXT
         );
         INSERT INTO reviews VALUES
             (5, 'Great app, love it, fast delivery', '2024-03-01', 'iOS'),
             (1, 'Terrible slow app never again', '2024-01-01', 'Android'),
             (3, '', '2024-02-01', 'iOS'),
             (4, 'Decent enough but the parcel arrived late', 'not a date', NULL);",
    )
    .unwrap();
}

#[test]
fn generates_report_from_seeded_database() {
    let paths = TempPaths::new("e2e");
    seed_database(&paths.db);

    let settings = ReportSettings {
        db_path: paths.db.clone(),
        output_path: paths.out.clone(),
        ..ReportSettings::default()
    };

    let written = reviewlens::run(&settings).unwrap();
    assert_eq!(written, paths.out);

    let html = fs::read_to_string(&paths.out).unwrap();

    // document shell and embedded engine
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("report-data"));
    assert!(html.contains("Review Sentiment Report"));

    // the empty-content row was excluded upstream; three records survive
    let start_tag = "<script id=\"report-data\" type=\"application/json\">";
    let start = html.find(start_tag).unwrap() + start_tag.len();
    let end = html[start..].find("</script>").unwrap() + start;
    let payload: serde_json::Value = serde_json::from_str(&html[start..end]).unwrap();
    let records = payload["records"].as_array().unwrap();
    assert_eq!(records.len(), 3);

    // scenario classification
    let great = records
        .iter()
        .find(|r| r["review"].as_str().unwrap().starts_with("Great"))
        .unwrap();
    assert_eq!(great["sentiment_type"], "positive");
    assert_eq!(great["year"], 2024);
    let terrible = records
        .iter()
        .find(|r| r["review"].as_str().unwrap().starts_with("Terrible"))
        .unwrap();
    assert_eq!(terrible["sentiment_type"], "negative");

    // unparseable date degrades to empty date / null year, platform defaults
    let dateless = records
        .iter()
        .find(|r| r["review"].as_str().unwrap().starts_with("Decent"))
        .unwrap();
    assert_eq!(dateless["date"], "");
    assert!(dateless["year"].is_null());
    assert_eq!(dateless["platform"], "unknown");

    // platform list excludes the defaulted label
    let platforms = payload["platforms"].as_array().unwrap();
    assert_eq!(platforms.len(), 2);
    assert!(platforms.iter().all(|p| p != "unknown"));

    // top negative words include the scenario complaints
    assert!(html.contains("data-word=\"terrible\""));
    assert!(html.contains("data-word=\"slow\""));
}

#[test]
fn run_fails_when_database_is_missing() {
    let paths = TempPaths::new("missing");
    let settings = ReportSettings {
        db_path: paths.db.clone(),
        output_path: paths.out.clone(),
        ..ReportSettings::default()
    };
    assert!(reviewlens::run(&settings).is_err());
}
