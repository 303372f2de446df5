//! Sentiboard Main Application
//! Main window wiring the loader -> transformer pipeline into the views.

use std::path::PathBuf;

use chrono::FixedOffset;
use egui::{Color32, RichText, SidePanel};
use log::warn;

use crate::data::{collect_rows, DataLoader, DisplayRow, Transformer};
use crate::gui::control_panel::QuerySettings;
use crate::gui::{ChartView, ControlPanel, ControlPanelAction, TableView, ViewMode};
use crate::settings::{self, DashboardSettings};

/// Outcome of the last pipeline run.
enum PipelineState {
    /// No database selected yet.
    Idle,
    Ready(Vec<DisplayRow>),
    Empty,
    Failed(String),
}

/// Main application window.
pub struct SentiboardApp {
    loader: Option<DataLoader>,
    transformer: Transformer,
    control_panel: ControlPanel,
    state: PipelineState,
    last_run: Option<QuerySettings>,
    settings_path: Option<PathBuf>,
}

impl SentiboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, local_tz: FixedOffset) -> Self {
        let settings_path = settings::default_path();
        let persisted = settings_path
            .as_deref()
            .map(settings::load)
            .unwrap_or_default();

        let loader = persisted.db_path.clone().map(DataLoader::new);
        let query = QuerySettings {
            db_path: persisted.db_path,
            view: persisted.view,
            keyword: persisted.keyword,
            start_date: persisted.start_date,
            end_date: persisted.end_date,
        };

        Self {
            loader,
            transformer: Transformer::new(local_tz),
            control_panel: ControlPanel::new(query),
            state: PipelineState::Idle,
            last_run: None,
            settings_path,
        }
    }

    /// Handle database file selection.
    fn handle_browse_db(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("SQLite Database", &["db", "sqlite", "sqlite3"])
            .pick_file()
        {
            self.control_panel.settings.db_path = Some(path.clone());
            self.loader = Some(DataLoader::new(path));
            // Force a fresh run against the new store.
            self.last_run = None;
        }
    }

    /// One synchronous Loader -> Transformer run for the current settings.
    fn run_pipeline(&mut self) {
        let settings = self.control_panel.settings.clone();

        let Some(loader) = self.loader.as_mut() else {
            self.state = PipelineState::Idle;
            self.control_panel.set_status("Select a database to begin");
            self.last_run = Some(settings);
            return;
        };

        let loaded = loader.load(settings.start_date, settings.end_date);
        let result: anyhow::Result<Vec<DisplayRow>> = match loaded {
            Ok(df) => self
                .transformer
                .transform(&df, settings.keyword.trim())
                .map_err(anyhow::Error::from)
                .and_then(|out| collect_rows(&out).map_err(anyhow::Error::from)),
            Err(e) => Err(e.into()),
        };

        self.state = match result {
            Ok(rows) if rows.is_empty() => {
                self.control_panel
                    .set_status("No data for the current filters");
                PipelineState::Empty
            }
            Ok(rows) => {
                self.control_panel
                    .set_status(&format!("{} posts loaded", rows.len()));
                PipelineState::Ready(rows)
            }
            Err(e) => {
                warn!("pipeline failed: {e:#}");
                self.control_panel.set_status("Query failed");
                PipelineState::Failed(format!("Query failed: {e}"))
            }
        };
        self.last_run = Some(settings);
    }

    fn persisted_settings(&self) -> DashboardSettings {
        let s = &self.control_panel.settings;
        DashboardSettings {
            db_path: s.db_path.clone(),
            view: s.view,
            keyword: s.keyword.clone(),
            start_date: s.start_date,
            end_date: s.end_date,
        }
    }
}

impl eframe::App for SentiboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - query controls
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseDb => self.handle_browse_db(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // One pipeline run per interaction, not one per frame.
        if self.last_run.as_ref() != Some(&self.control_panel.settings) {
            self.run_pipeline();
        }

        // Central panel - the selected view, or a single notice
        egui::CentralPanel::default().show(ctx, |ui| match &self.state {
            PipelineState::Idle => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("Open a posts database to get started").size(18.0));
                });
            }
            PipelineState::Empty => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new("Your search parameters resulted in no data!").size(18.0),
                    );
                });
            }
            PipelineState::Failed(message) => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(message)
                            .size(16.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                });
            }
            PipelineState::Ready(rows) => match self.control_panel.settings.view {
                ViewMode::Posts => TableView::show(ui, rows),
                ViewMode::Analytics => ChartView::show(
                    ui,
                    rows,
                    self.control_panel.settings.keyword.trim(),
                    self.control_panel.settings.start_date,
                    self.control_panel.settings.end_date,
                ),
            },
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(path) = &self.settings_path {
            if let Err(e) = settings::save(path, &self.persisted_settings()) {
                warn!("failed to save settings: {e:#}");
            }
        }
    }
}
