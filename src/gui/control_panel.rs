//! Control Panel Widget
//! Left side panel with the view selector, filters and the date range.

use chrono::NaiveDate;
use egui::{Color32, RichText};
use egui_extras::DatePickerButton;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which view the central panel renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    Posts,
    Analytics,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Posts
    }
}

/// User-adjustable query settings. The app re-runs the pipeline whenever
/// these change.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySettings {
    pub db_path: Option<PathBuf>,
    pub view: ViewMode,
    pub keyword: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Left side control panel with database selection and query controls.
pub struct ControlPanel {
    pub settings: QuerySettings,
    pub status: String,
}

impl ControlPanel {
    pub fn new(settings: QuerySettings) -> Self {
        Self {
            settings,
            status: "Ready".to_string(),
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 Sentiboard")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Post Sentiment Analytics")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Database Section =====
        ui.label(RichText::new("🗄 Posts Database").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .db_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No database selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.db_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Open").clicked() {
                            action = ControlPanelAction::BrowseDb;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== View Section =====
        ui.label(RichText::new("🔀 Choose View").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.radio_value(&mut self.settings.view, ViewMode::Posts, "Posts");
            ui.radio_value(&mut self.settings.view, ViewMode::Analytics, "Analytics");
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filter Section =====
        ui.label(RichText::new("🔍 Filters").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 100.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Keyword:"));
            ui.text_edit_singleline(&mut self.settings.keyword);
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Starting Date:"));
            ui.add(DatePickerButton::new(&mut self.settings.start_date).id_salt("start_date"));
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("End Date:"));
            ui.add(DatePickerButton::new(&mut self.settings.end_date).id_salt("end_date"));
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Explanation Section =====
        ui.label(RichText::new("💡 Explanation").size(14.0).strong());
        ui.add_space(5.0);
        ui.label(
            RichText::new(
                "Sentiment score indicates a positive sentiment when the score \
                 is positive and a negative sentiment when the score is negative.",
            )
            .size(11.0),
        );
        ui.add_space(3.0);
        ui.label(
            RichText::new(
                "Scores above 0.2 or below -0.2 are a small part and can be \
                 seen as very positive or very negative.",
            )
            .size(11.0)
            .italics(),
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.status.contains("failed") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set the status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseDb,
}
