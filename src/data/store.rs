//! Posts Store Module
//! SQLite access for the posts table. Range queries bind their parameters;
//! nothing is spliced into SQL text.

use chrono::{Days, NaiveDate, NaiveTime};
use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] rusqlite::Error),
    #[error("query failed: {0}")]
    QueryError(#[from] rusqlite::Error),
}

/// One row of the posts table. `timestamp_ms` is epoch milliseconds, UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRow {
    pub timestamp_ms: i64,
    pub sentiment_score: f64,
    pub text: Option<String>,
}

/// Open the backing store and make sure the schema exists.
pub fn open_store(path: &std::path::Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(path).map_err(StoreError::StorageUnavailable)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Idempotent schema bootstrap. The dashboard only ever reads post rows;
/// ingestion happens elsewhere.
pub fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;

         CREATE TABLE IF NOT EXISTS posts (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             timestamp INTEGER NOT NULL,
             sentiment_score REAL NOT NULL,
             text TEXT
         );

         CREATE INDEX IF NOT EXISTS idx_posts_timestamp ON posts(timestamp);",
    )?;
    Ok(())
}

/// Epoch milliseconds for midnight UTC of `date`.
fn day_start_ms(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Fetch every post in `[start_date, end_date]`, end date inclusive of the
/// whole day. The filter is half-open on the timestamp column:
/// `start 00:00 <= ts < (end + 1 day) 00:00`, all UTC.
///
/// An inverted range matches nothing. Rows come back in storage order.
pub fn fetch_range(
    conn: &Connection,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<PostRow>, StoreError> {
    let start_ms = day_start_ms(start_date);
    let end_ms = match end_date.checked_add_days(Days::new(1)) {
        Some(next_day) => day_start_ms(next_day),
        None => i64::MAX,
    };

    let mut stmt = conn.prepare(
        "SELECT timestamp, sentiment_score, text FROM posts
         WHERE timestamp >= ?1 AND timestamp < ?2",
    )?;

    let rows = stmt
        .query_map(params![start_ms, end_ms], |row| {
            Ok(PostRow {
                timestamp_ms: row.get(0)?,
                sentiment_score: row.get(1)?,
                text: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::DateTime;

    pub(crate) fn ms(rfc3339: &str) -> i64 {
        DateTime::parse_from_rfc3339(rfc3339)
            .expect("valid timestamp")
            .timestamp_millis()
    }

    pub(crate) fn date(ymd: &str) -> NaiveDate {
        ymd.parse().expect("valid date")
    }

    pub(crate) fn seed(conn: &Connection, timestamp_ms: i64, score: f64, text: Option<&str>) {
        conn.execute(
            "INSERT INTO posts (timestamp, sentiment_score, text) VALUES (?1, ?2, ?3)",
            params![timestamp_ms, score, text],
        )
        .expect("insert post");
    }

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("in-memory db");
        init_schema(&conn).expect("schema init");
        conn
    }

    #[test]
    fn schema_init_is_idempotent() {
        let conn = test_conn();
        init_schema(&conn).expect("second init");
    }

    #[test]
    fn end_date_is_inclusive_of_day() {
        let conn = test_conn();
        seed(&conn, ms("2024-12-03T23:59:59.999Z"), 0.1, Some("before"));
        seed(&conn, ms("2024-12-04T00:00:00Z"), 0.2, Some("first instant"));
        seed(&conn, ms("2024-12-05T23:59:59.999Z"), 0.3, Some("last instant"));
        seed(&conn, ms("2024-12-06T00:00:00Z"), 0.4, Some("after"));

        let rows = fetch_range(&conn, date("2024-12-04"), date("2024-12-05")).expect("fetch");
        let texts: Vec<_> = rows.iter().filter_map(|r| r.text.as_deref()).collect();
        assert_eq!(texts, vec!["first instant", "last instant"]);
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let conn = test_conn();
        seed(&conn, ms("2024-12-04T12:00:00Z"), 0.5, Some("present"));

        let rows = fetch_range(&conn, date("2024-12-05"), date("2024-12-04")).expect("fetch");
        assert!(rows.is_empty());
    }

    #[test]
    fn null_text_round_trips() {
        let conn = test_conn();
        seed(&conn, ms("2024-12-04T12:00:00Z"), -0.3, None);

        let rows = fetch_range(&conn, date("2024-12-04"), date("2024-12-04")).expect("fetch");
        assert_eq!(rows.len(), 1);
        assert!(rows[0].text.is_none());
        assert_eq!(rows[0].sentiment_score, -0.3);
    }

    #[test]
    fn missing_table_surfaces_query_error() {
        let conn = test_conn();
        conn.execute_batch("DROP TABLE posts;").expect("drop");

        let result = fetch_range(&conn, date("2024-12-04"), date("2024-12-05"));
        assert!(matches!(result, Err(StoreError::QueryError(_))));
    }
}
