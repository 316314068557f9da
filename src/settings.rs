use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

fn default_db_path() -> PathBuf {
    PathBuf::from("reviews.sqlite3")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("report.html")
}

fn default_top_words() -> usize {
    10
}

fn default_domain_stopwords() -> Vec<String> {
    Vec::new()
}

/// Run configuration: JSON settings file (optional) with env overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Length of the top-word tables.
    #[serde(default = "default_top_words")]
    pub top_words: usize,
    /// Brand/platform terms excluded from the top-word tables on top of
    /// the built-in language and domain lists.
    #[serde(default = "default_domain_stopwords")]
    pub domain_stopwords: Vec<String>,
    #[serde(default)]
    pub open_browser: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            output_path: default_output_path(),
            top_words: default_top_words(),
            domain_stopwords: default_domain_stopwords(),
            open_browser: false,
        }
    }
}

impl ReportSettings {
    /// Load from a JSON file if one was given, then apply `REVIEWLENS_DB`
    /// and `REVIEWLENS_OUT` env overrides. A missing or unreadable file
    /// falls back to defaults with a warning.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let mut settings = match path {
            Some(path) if path.exists() => {
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read settings from {}", path.display()))?;
                serde_json::from_str(&contents).unwrap_or_else(|err| {
                    warn!(
                        "Settings file {} is invalid ({err}), using defaults",
                        path.display()
                    );
                    Self::default()
                })
            }
            Some(path) => {
                warn!("Settings file {} not found, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };

        if let Ok(db) = env::var("REVIEWLENS_DB") {
            settings.db_path = PathBuf::from(db);
        }
        if let Ok(out) = env::var("REVIEWLENS_OUT") {
            settings.output_path = PathBuf::from(out);
        }

        Ok(settings)
    }
}
