use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PORT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub feed_path: Option<String>,
    pub icon_map_path: Option<String>,
    pub icons_dir: String,
    pub port: u16,
    #[serde(default)]
    pub auto_open_browser: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_path: None,
            icon_map_path: None,
            icons_dir: "icons".to_string(),
            port: DEFAULT_PORT,
            auto_open_browser: false,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut settings = Settings::default();
        if !config_path.exists() {
            return Ok(settings);
        }

        let file = File::open(config_path).context("Failed to open config file")?;
        let reader = BufReader::new(file);
        let mut config_map = HashMap::new();

        for line in reader.lines() {
            let line = line.context("Failed to read line from config")?;
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        if let Some(feed_path) = config_map.get("feed_path") {
            settings.feed_path = Some(feed_path.trim_matches('"').to_string());
        }
        if let Some(icon_map_path) = config_map.get("icon_map_path") {
            settings.icon_map_path = Some(icon_map_path.trim_matches('"').to_string());
        }
        if let Some(icons_dir) = config_map.get("icons_dir") {
            settings.icons_dir = icons_dir.trim_matches('"').to_string();
        }
        if let Some(port_str) = config_map.get("port") {
            if let Ok(port) = port_str.parse::<u16>() {
                settings.port = port;
            }
        }
        if let Some(auto_open_str) = config_map.get("auto_open_browser") {
            if let Ok(auto_open) = auto_open_str.parse::<bool>() {
                settings.auto_open_browser = auto_open;
            }
        }

        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Creating config directory")?;
        }

        let mut content = String::new();
        content.push_str("# ZoneMap Configuration File\n");

        if let Some(ref feed_path) = self.feed_path {
            content.push_str(&format!("feed_path = \"{}\"\n", feed_path));
        }
        if let Some(ref icon_map_path) = self.icon_map_path {
            content.push_str(&format!("icon_map_path = \"{}\"\n", icon_map_path));
        }
        content.push_str(&format!("icons_dir = \"{}\"\n", self.icons_dir));
        content.push_str(&format!("port = {}\n", self.port));
        content.push_str(&format!("auto_open_browser = {}\n", self.auto_open_browser));

        std::fs::write(config_path, content).context("Failed to write to config file")?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push("zonemap.ini");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("zonemap_{}_{}.ini", name, std::process::id()))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/zonemap.ini")).unwrap();
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.icons_dir, "icons");
        assert!(settings.feed_path.is_none());
        assert!(!settings.auto_open_browser);
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = temp_config("round_trip");
        let settings = Settings {
            feed_path: Some("data/feed.json".to_string()),
            icon_map_path: None,
            icons_dir: "assets/icons".to_string(),
            port: 4100,
            auto_open_browser: true,
        };

        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.feed_path.as_deref(), Some("data/feed.json"));
        assert!(loaded.icon_map_path.is_none());
        assert_eq!(loaded.icons_dir, "assets/icons");
        assert_eq!(loaded.port, 4100);
        assert!(loaded.auto_open_browser);
    }

    #[test]
    fn comments_and_bad_values_are_ignored() {
        let path = temp_config("bad_values");
        std::fs::write(&path, "# comment\n\nport = not-a-port\nfeed_path = \"feed.json\"\n")
            .unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.port, DEFAULT_PORT);
        assert_eq!(loaded.feed_path.as_deref(), Some("feed.json"));
    }
}
