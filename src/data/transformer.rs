//! Display Transformer Module
//! Timezone shift, keyword filtering, rounding and column projection.

use chrono::FixedOffset;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// One row shaped for the views. `timestamp_ms` holds local wall-clock time,
/// expressed as epoch-style milliseconds after the offset shift.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub timestamp_ms: i64,
    pub sentiment_score: f64,
    pub text: Option<String>,
}

/// Converts raw post frames into the shape the views render.
///
/// The display offset is injected once at construction; the transform itself
/// never reads the environment.
pub struct Transformer {
    local_tz: FixedOffset,
}

impl Transformer {
    pub fn new(local_tz: FixedOffset) -> Self {
        Self { local_tz }
    }

    /// Produce a fresh frame with columns exactly
    /// `(timestamp, sentiment_score, text)`:
    ///
    /// 1. timestamps shifted from UTC to the display offset;
    /// 2. with a non-empty `keyword`, only rows whose `text` contains it
    ///    case-insensitively survive, and null text never matches;
    /// 3. `sentiment_score` rounded to 2 decimals, ties away from zero.
    ///
    /// The input frame is left untouched. An empty frame transforms to an
    /// empty frame.
    pub fn transform(&self, df: &DataFrame, keyword: &str) -> Result<DataFrame, TransformError> {
        let ts = df.column("timestamp")?.i64()?;
        let scores = df.column("sentiment_score")?.f64()?;
        let texts = df.column("text")?.str()?;

        let offset_ms = i64::from(self.local_tz.local_minus_utc()) * 1_000;
        let needle = keyword.to_lowercase();

        let mut out_ts: Vec<i64> = Vec::new();
        let mut out_scores: Vec<f64> = Vec::new();
        let mut out_texts: Vec<Option<String>> = Vec::new();

        for i in 0..df.height() {
            let text = texts.get(i);
            if !needle.is_empty() {
                let Some(text) = text else { continue };
                if !text.to_lowercase().contains(&needle) {
                    continue;
                }
            }
            let (Some(ts_ms), Some(score)) = (ts.get(i), scores.get(i)) else {
                continue;
            };
            out_ts.push(ts_ms + offset_ms);
            out_scores.push(round2(score));
            out_texts.push(text.map(str::to_string));
        }

        let out = DataFrame::new(vec![
            Column::new("timestamp".into(), out_ts),
            Column::new("sentiment_score".into(), out_scores),
            Column::new("text".into(), out_texts),
        ])?;

        Ok(out)
    }
}

/// Round to 2 decimal places, ties away from zero (`f64::round` semantics).
/// Stable under re-application.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Pull typed rows out of a transformed frame for the views.
pub fn collect_rows(df: &DataFrame) -> Result<Vec<DisplayRow>, TransformError> {
    let ts = df.column("timestamp")?.i64()?;
    let scores = df.column("sentiment_score")?.f64()?;
    let texts = df.column("text")?.str()?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let (Some(timestamp_ms), Some(sentiment_score)) = (ts.get(i), scores.get(i)) else {
            continue;
        };
        rows.push(DisplayRow {
            timestamp_ms,
            sentiment_score,
            text: texts.get(i).map(str::to_string),
        });
    }
    Ok(rows)
}
