//! SQLite-backed review source.
//!
//! The store is read-only for this job: it yields raw review rows with the
//! upstream NULL/empty-content filter applied, newest first. How the rows
//! got into the table is not this crate's concern.

use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{error, info};
use rusqlite::Connection;

use crate::models::Review;

pub struct ReviewStore {
    conn: Connection,
}

impl ReviewStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        if !db_path.exists() {
            bail!("review database not found at {}", db_path.display());
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("failed to open review database {}", db_path.display()))?;

        if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
            error!("Failed to enable WAL mode: {err}");
        }
        if let Err(err) = conn.pragma_update(None, "foreign_keys", "ON") {
            error!("Failed to enable foreign keys: {err}");
        }

        info!("Review database opened at {}", db_path.display());

        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// All review rows with usable text, newest first. Empty and NULL
    /// content rows are filtered here, before any scoring happens.
    pub fn fetch_reviews(&self) -> Result<Vec<Review>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT score, content, review_date, platform
                 FROM reviews
                 WHERE content IS NOT NULL AND content != ''
                 ORDER BY review_date DESC",
            )
            .context("failed to prepare review query")?;

        let mut rows = stmt.query([]).context("failed to query reviews")?;
        let mut reviews = Vec::new();
        while let Some(row) = rows.next().context("failed to read review row")? {
            reviews.push(Review {
                score: row.get(0)?,
                content: row.get(1)?,
                review_date: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                platform: row.get(3)?,
            });
        }

        info!("Fetched {} reviews", reviews.len());
        Ok(reviews)
    }
}
