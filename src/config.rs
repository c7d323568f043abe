use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::placement::Anchor;

/// User-tunable settings, persisted as JSON in the platform config dir.
/// Defaults mirror the hardcoded constants the tool originally shipped with.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    pub image_path: PathBuf,
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
    #[serde(default = "default_vertical_offset")]
    pub vertical_offset: i32,
    #[serde(default = "default_anchor")]
    pub anchor: Anchor,
}

fn default_scale_factor() -> f64 {
    0.65
}
fn default_vertical_offset() -> i32 {
    -38
}
fn default_anchor() -> Anchor {
    Anchor::BottomLeft
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from("mrwashee.png"),
            scale_factor: default_scale_factor(),
            vertical_offset: default_vertical_offset(),
            anchor: default_anchor(),
        }
    }
}

fn config_dir() -> PathBuf {
    let dir = dirs::config_dir().unwrap_or_default().join("desk-overlay");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

pub fn get_config_path() -> PathBuf {
    config_dir().join("config.json")
}

pub fn get_log_path() -> PathBuf {
    config_dir().join("desk-overlay.log")
}

pub fn load_config() -> Config {
    let path = get_config_path();
    if path.exists() {
        let data = std::fs::read_to_string(&path).unwrap_or_default();
        match serde_json::from_str(&data) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "config at {} is unreadable ({}), using defaults",
                    path.display(),
                    e
                );
                Config::default()
            }
        }
    } else {
        let config = Config::default();
        save_config(&config);
        config
    }
}

pub fn save_config(config: &Config) {
    let path = get_config_path();
    let data = serde_json::to_string_pretty(config).unwrap();
    let _ = std::fs::write(path, data);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_constants() {
        let config = Config::default();
        assert_eq!(config.image_path, PathBuf::from("mrwashee.png"));
        assert_eq!(config.scale_factor, 0.65);
        assert_eq!(config.vertical_offset, -38);
        assert_eq!(config.anchor, Anchor::BottomLeft);
    }

    #[test]
    fn test_json_round_trip() {
        let config = Config {
            image_path: PathBuf::from("pin.png"),
            scale_factor: 1.25,
            vertical_offset: 12,
            anchor: Anchor::BottomLeft,
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.image_path, config.image_path);
        assert_eq!(back.scale_factor, config.scale_factor);
        assert_eq!(back.vertical_offset, config.vertical_offset);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let back: Config = serde_json::from_str(r#"{ "image_path": "only.png" }"#).unwrap();
        assert_eq!(back.image_path, PathBuf::from("only.png"));
        assert_eq!(back.scale_factor, 0.65);
        assert_eq!(back.vertical_offset, -38);
    }
}
