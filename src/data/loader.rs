//! Post Loader Module
//! Scoped storage access plus per-session memoization, returning Polars frames.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use log::debug;
use polars::prelude::*;
use thiserror::Error;

use super::store::{self, PostRow, StoreError};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to build dataframe: {0}")]
    Frame(#[from] PolarsError),
}

/// Loads post records for a date range and memoizes the result.
///
/// Cache entries are keyed by the exact `(start, end)` pair and live for the
/// whole session. The store is read-mostly, so staleness within a session is
/// acceptable.
pub struct DataLoader {
    db_path: PathBuf,
    cache: HashMap<(NaiveDate, NaiveDate), DataFrame>,
}

impl DataLoader {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            cache: HashMap::new(),
        }
    }

    /// Load all posts in `[start_date, end_date]` as a DataFrame with columns
    /// `timestamp` (epoch ms, UTC), `sentiment_score` and `text`.
    ///
    /// The connection lives only for the duration of the call; it is released
    /// on every exit path, including query failures. Repeated calls with the
    /// same range are served from the memo cache.
    pub fn load(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<DataFrame, LoaderError> {
        if let Some(df) = self.cache.get(&(start_date, end_date)) {
            debug!("cache hit for {start_date}..{end_date}");
            return Ok(df.clone());
        }

        debug!("querying posts in {start_date}..{end_date}");
        let conn = store::open_store(&self.db_path)?;
        let rows = store::fetch_range(&conn, start_date, end_date)?;
        let df = posts_to_dataframe(&rows)?;

        self.cache.insert((start_date, end_date), df.clone());
        Ok(df)
    }

    #[cfg(test)]
    fn cached_ranges(&self) -> usize {
        self.cache.len()
    }
}

/// Build the raw frame. Column order matches the store schema.
pub fn posts_to_dataframe(rows: &[PostRow]) -> Result<DataFrame, PolarsError> {
    let timestamps: Vec<i64> = rows.iter().map(|r| r.timestamp_ms).collect();
    let scores: Vec<f64> = rows.iter().map(|r| r.sentiment_score).collect();
    let texts: Vec<Option<String>> = rows.iter().map(|r| r.text.clone()).collect();

    DataFrame::new(vec![
        Column::new("timestamp".into(), timestamps),
        Column::new("sentiment_score".into(), scores),
        Column::new("text".into(), texts),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::tests::{date, ms, seed};
    use rusqlite::Connection;

    fn seeded_db(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("posts.db");
        let conn = store::open_store(&path).expect("open store");
        seed(&conn, ms("2024-12-04T10:00:00Z"), -0.237, Some("storm warning"));
        seed(&conn, ms("2024-12-04T15:30:00Z"), 0.8, Some("sunny spells"));
        path
    }

    #[test]
    fn load_builds_frame_with_fixed_columns() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut loader = DataLoader::new(seeded_db(&dir));

        let df = loader
            .load(date("2024-12-04"), date("2024-12-05"))
            .expect("load");

        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, ["timestamp", "sentiment_score", "text"]);
    }

    #[test]
    fn second_load_with_same_range_skips_storage() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = seeded_db(&dir);
        let mut loader = DataLoader::new(&path);

        let first = loader
            .load(date("2024-12-04"), date("2024-12-05"))
            .expect("first load");
        assert_eq!(first.height(), 2);

        // Mutate the store behind the loader's back; a cache hit must not see it.
        let conn = Connection::open(&path).expect("reopen");
        conn.execute("DELETE FROM posts", []).expect("delete");
        drop(conn);

        let second = loader
            .load(date("2024-12-04"), date("2024-12-05"))
            .expect("second load");
        assert_eq!(second.height(), 2);
        assert_eq!(loader.cached_ranges(), 1);
    }

    #[test]
    fn distinct_ranges_get_distinct_cache_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut loader = DataLoader::new(seeded_db(&dir));

        loader
            .load(date("2024-12-04"), date("2024-12-05"))
            .expect("load");
        loader
            .load(date("2024-12-04"), date("2024-12-04"))
            .expect("load");
        assert_eq!(loader.cached_ranges(), 2);
    }

    #[test]
    fn inverted_range_yields_empty_frame() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut loader = DataLoader::new(seeded_db(&dir));

        let df = loader
            .load(date("2024-12-05"), date("2024-12-04"))
            .expect("load");
        assert_eq!(df.height(), 0);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, ["timestamp", "sentiment_score", "text"]);
    }

    #[test]
    fn unreadable_path_surfaces_storage_unavailable() {
        let mut loader = DataLoader::new("/nonexistent-dir/posts.db");

        let result = loader.load(date("2024-12-04"), date("2024-12-05"));
        assert!(matches!(
            result,
            Err(LoaderError::Store(StoreError::StorageUnavailable(_)))
        ));
    }
}
