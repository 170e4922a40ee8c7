//! Configuration management

use crate::domain::{DateFormatting, EditMode, Theme};
use crate::error::{Result, TimelineError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const TIMELINE_DIR: &str = ".timeline";
const CONFIG_FILE: &str = "config.toml";

/// Variant settings for one timeline, stored in `.timeline/config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Write entries on every keystroke instead of on an explicit add
    pub autosave_on_input: bool,
    /// Whether the read-only toggle is offered at all
    pub allow_read_only: bool,
    pub date_formatting: DateFormatting,
    /// Keep entries created by an autosave that never received text
    pub keep_abandoned_blank: bool,
    pub default_theme: Theme,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            autosave_on_input: true,
            allow_read_only: true,
            date_formatting: DateFormatting::default(),
            keep_abandoned_blank: true,
            default_theme: Theme::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load config from .timeline/config.toml in the given directory.
    /// A missing file means defaults; a missing .timeline directory is an error.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let timeline_dir = path.join(TIMELINE_DIR);
        if !timeline_dir.is_dir() {
            return Err(TimelineError::NotTimelineDirectory(path.to_path_buf()));
        }

        let config_path = timeline_dir.join(CONFIG_FILE);
        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(TimelineError::Io(e)),
        };

        Ok(toml::from_str(&contents)?)
    }

    /// Save config to .timeline/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let timeline_dir = path.join(TIMELINE_DIR);

        if !timeline_dir.exists() {
            fs::create_dir(&timeline_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| TimelineError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(timeline_dir.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    pub fn edit_mode(&self) -> EditMode {
        if self.autosave_on_input {
            EditMode::Autosave
        } else {
            EditMode::ExplicitAdd
        }
    }

    /// Log level, with TIMELINE_LOG taking precedence over the file
    pub fn get_log_level(&self) -> String {
        std::env::var("TIMELINE_LOG").unwrap_or_else(|_| self.log_level.clone())
    }
}
