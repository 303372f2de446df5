//! Posts Table Widget
//! Interactive grid of display rows with sentiment-colored score cells.

use chrono::DateTime;
use egui::{Color32, RichText};
use egui_extras::{Column, TableBuilder};

use crate::data::DisplayRow;

const ROW_HEIGHT: f32 = 22.0;

/// Three-way score color: negative, zero, positive.
fn sentiment_color(score: f64) -> Color32 {
    if score < 0.0 {
        Color32::DARK_RED
    } else if score == 0.0 {
        Color32::GRAY
    } else {
        Color32::from_rgb(0, 128, 0)
    }
}

/// Format a shifted wall-clock timestamp for display.
pub fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

/// Scrollable posts grid.
pub struct TableView;

impl TableView {
    pub fn show(ui: &mut egui::Ui, rows: &[DisplayRow]) {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(160.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::remainder())
            .header(24.0, |mut header| {
                header.col(|ui| {
                    ui.label(RichText::new("Timestamp").strong());
                });
                header.col(|ui| {
                    ui.label(RichText::new("Sentiment Score").strong());
                });
                header.col(|ui| {
                    ui.label(RichText::new("Text").strong());
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let item = &rows[row.index()];
                    row.col(|ui| {
                        ui.label(format_timestamp(item.timestamp_ms));
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(format!("{:.2}", item.sentiment_score))
                                .color(Color32::BLACK)
                                .background_color(sentiment_color(item.sentiment_score)),
                        );
                    });
                    row.col(|ui| {
                        ui.label(item.text.as_deref().unwrap_or(""));
                    });
                });
            });
    }
}
