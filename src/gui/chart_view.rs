//! Sentiment Trend Chart
//! Line chart of sentiment score over time using egui_plot.

use chrono::NaiveDate;
use egui::{Color32, RichText};
use egui_plot::{Line, Plot, PlotPoints};

use super::table_view::format_timestamp;
use crate::data::DisplayRow;

const LINE_COLOR: Color32 = Color32::from_rgb(52, 152, 219);

/// Score-over-time view with a header echoing the active query.
pub struct ChartView;

impl ChartView {
    pub fn show(
        ui: &mut egui::Ui,
        rows: &[DisplayRow],
        keyword: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) {
        ui.label(
            RichText::new("Sentiment Score Over Time")
                .size(16.0)
                .strong(),
        );
        let range_info = if keyword.is_empty() {
            format!("Start Date: {start_date}, End Date: {end_date}")
        } else {
            format!("Keyword: {keyword}, Start Date: {start_date}, End Date: {end_date}")
        };
        ui.label(RichText::new(range_info).size(12.0).color(Color32::GRAY));
        ui.add_space(8.0);

        // X is shifted wall-clock time in seconds. Duplicate timestamps are
        // plotted as-is.
        let points: PlotPoints = rows
            .iter()
            .map(|row| [row.timestamp_ms as f64 / 1000.0, row.sentiment_score])
            .collect();

        Plot::new("sentiment_trend")
            .allow_scroll(false)
            .y_axis_label("sentiment_score")
            .x_axis_formatter(|mark, _range| format_timestamp((mark.value * 1000.0) as i64))
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(points).color(LINE_COLOR).width(2.0));
            });
    }
}
