//! Dashboard settings persistence - JSON save/load across restarts.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::gui::ViewMode;

/// Serializable subset of UI state that persists across restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    pub db_path: Option<PathBuf>,
    pub view: ViewMode,
    pub keyword: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            db_path: None,
            view: ViewMode::Posts,
            keyword: String::new(),
            start_date: NaiveDate::from_ymd_opt(2024, 12, 4).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 5).unwrap_or_default(),
        }
    }
}

/// Default location: `{config_dir}/sentiboard/settings.json`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sentiboard").join("settings.json"))
}

/// Load settings from disk. Returns defaults if the file is missing or corrupt.
pub fn load(path: &Path) -> DashboardSettings {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => DashboardSettings::default(),
    }
}

/// Save settings to disk. Creates parent directories if needed.
pub fn save(path: &Path, settings: &DashboardSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(settings)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");

        let mut settings = DashboardSettings::default();
        settings.keyword = "storm".to_string();
        settings.view = ViewMode::Analytics;
        settings.db_path = Some(PathBuf::from("/data/posts.db"));

        save(&path, &settings).expect("save");
        let loaded = load(&path);

        assert_eq!(loaded.keyword, "storm");
        assert_eq!(loaded.view, ViewMode::Analytics);
        assert_eq!(loaded.db_path.as_deref(), Some(Path::new("/data/posts.db")));
        assert_eq!(loaded.start_date, settings.start_date);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/settings.json"));
        assert_eq!(loaded.view, ViewMode::Posts);
        assert!(loaded.keyword.is_empty());
        assert!(loaded.db_path.is_none());
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").expect("write");

        let loaded = load(&path);
        assert_eq!(loaded.view, ViewMode::Posts);
    }
}
