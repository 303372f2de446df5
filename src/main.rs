//! Sentiboard - Post Sentiment Analytics & Trend Dashboard
//!
//! A Rust application for exploring ingested posts and their sentiment trend.

mod data;
mod gui;
mod settings;

use chrono::Local;
use eframe::egui;
use gui::SentiboardApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Resolve the display offset once at startup; everything downstream
    // receives it explicitly.
    let local_tz = *Local::now().offset();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Sentiboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Sentiboard",
        options,
        Box::new(move |cc| Ok(Box::new(SentiboardApp::new(cc, local_tz)))),
    )
}
