// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Facemark";

/// Default fast-forward/rewind jump in frames.
pub const DEFAULT_STEP_FRAMES: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Whether the landmark overlay is visible when a video loads.
    #[serde(default)]
    pub show_landmarks: Option<bool>,
    /// Fast-forward/rewind jump size in frames.
    #[serde(default)]
    pub step_frames: Option<i64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_landmarks: Some(true),
            step_frames: Some(DEFAULT_STEP_FRAMES),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_shows_landmarks() {
        let config = Config::default();
        assert_eq!(config.show_landmarks, Some(true));
        assert_eq!(config.step_frames, Some(DEFAULT_STEP_FRAMES));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let config = Config {
            show_landmarks: Some(false),
            step_frames: Some(10),
        };
        save_to_path(&config, &path).expect("save config");

        let loaded = load_from_path(&path).expect("load config");
        assert_eq!(loaded.show_landmarks, Some(false));
        assert_eq!(loaded.step_frames, Some(10));
    }

    #[test]
    fn load_from_missing_file_is_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("does-not-exist.toml");
        assert!(load_from_path(&path).is_err());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        fs::write(&path, "not [valid toml").expect("write file");

        let loaded = load_from_path(&path).expect("load config");
        assert_eq!(loaded.show_landmarks, Some(true));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.toml");
        save_to_path(&Config::default(), &path).expect("save config");
        assert!(path.exists());
    }
}
