//! GUI module - User interface components

mod app;
mod chart_view;
mod control_panel;
mod table_view;

pub use app::SentiboardApp;
pub use chart_view::ChartView;
pub use control_panel::{ControlPanel, ControlPanelAction, ViewMode};
pub use table_view::TableView;
