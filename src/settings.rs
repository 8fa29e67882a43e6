use crate::classifier::DEFAULT_API_ENDPOINT;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSettings {
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
    /// Selections shorter than this never trigger a network call.
    #[serde(default = "default_min_selection_chars")]
    pub min_selection_chars: usize,
    /// Pause after the last pointer-up before the selection is inspected.
    #[serde(default = "default_selection_pause_ms")]
    pub selection_pause_ms: u64,
}

fn default_api_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_min_selection_chars() -> usize {
    10
}

fn default_selection_pause_ms() -> u64 {
    250
}

pub fn get_default_settings() -> AppSettings {
    AppSettings {
        api_endpoint: default_api_endpoint(),
        min_selection_chars: default_min_selection_chars(),
        selection_pause_ms: default_selection_pause_ms(),
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        get_default_settings()
    }
}

/// Reads settings from `path`. A missing or unparseable file falls back to
/// defaults and rewrites the store.
pub fn load_or_create_settings(path: &Path) -> AppSettings {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str::<AppSettings>(&contents).unwrap_or_else(|e| {
            warn!("Settings file did not parse ({}), restoring defaults", e);
            let defaults = get_default_settings();
            write_settings(path, &defaults);
            defaults
        }),
        Err(_) => {
            let defaults = get_default_settings();
            write_settings(path, &defaults);
            defaults
        }
    }
}

pub fn write_settings(path: &Path, settings: &AppSettings) {
    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                warn!("Failed to write settings to {}: {}", path.display(), e);
            }
        }
        Err(e) => warn!("Failed to serialize settings: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = get_default_settings();
        assert_eq!(settings.api_endpoint, "http://127.0.0.1:8000/predict");
        assert_eq!(settings.min_selection_chars, 10);
        assert_eq!(settings.selection_pause_ms, 250);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: AppSettings =
            serde_json::from_str(r#"{ "min_selection_chars": 25 }"#).unwrap();
        assert_eq!(settings.min_selection_chars, 25);
        assert_eq!(settings.api_endpoint, "http://127.0.0.1:8000/predict");
        assert_eq!(settings.selection_pause_ms, 250);
    }

    #[test]
    fn test_missing_file_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = load_or_create_settings(&path);
        assert_eq!(settings, get_default_settings());
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_restores_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let settings = load_or_create_settings(&path);
        assert_eq!(settings, get_default_settings());

        // The store is rewritten with parseable defaults.
        let reloaded = load_or_create_settings(&path);
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = AppSettings {
            api_endpoint: "http://10.0.0.5:9000/predict".to_string(),
            min_selection_chars: 16,
            selection_pause_ms: 400,
        };

        write_settings(&path, &settings);
        assert_eq!(load_or_create_settings(&path), settings);
    }
}
