//! Config management use case

use crate::domain::{DateFormatting, Theme};
use crate::error::{Result, TimelineError};
use crate::infrastructure::logging::normalize_level;
use crate::infrastructure::{Config, FileSystemRepository};
use std::str::FromStr;

const VALID_KEYS: &str = "autosave_on_input, allow_read_only, date_formatting, \
    keep_abandoned_blank, default_theme, log_level";

/// Service for managing timeline configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "autosave_on_input" => Ok(config.autosave_on_input.to_string()),
            "allow_read_only" => Ok(config.allow_read_only.to_string()),
            "date_formatting" => Ok(config.date_formatting.to_string()),
            "keep_abandoned_blank" => Ok(config.keep_abandoned_blank.to_string()),
            "default_theme" => Ok(config.default_theme.as_str().to_string()),
            "log_level" => Ok(config.log_level),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "autosave_on_input" => config.autosave_on_input = parse_bool(key, value)?,
            "allow_read_only" => config.allow_read_only = parse_bool(key, value)?,
            "keep_abandoned_blank" => config.keep_abandoned_blank = parse_bool(key, value)?,
            "date_formatting" => {
                config.date_formatting =
                    DateFormatting::from_str(value).map_err(TimelineError::Config)?;
            }
            "default_theme" => {
                config.default_theme = Theme::from_str(value).map_err(TimelineError::Config)?;
            }
            "log_level" => {
                config.log_level = normalize_level(value).map_err(TimelineError::Config)?.to_string();
            }
            _ => return Err(unknown_key(key)),
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

fn unknown_key(key: &str) -> TimelineError {
    TimelineError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key, VALID_KEYS
    ))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        _ => Err(TimelineError::Config(format!(
            "Invalid value for {}: '{}'. Expected true or false",
            key, value
        ))),
    }
}
