//! Display preferences persisted next to the entries

use crate::domain::SortDirection;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const THEME_KEY: &str = "timeline-theme";
pub const DATE_FORMAT_KEY: &str = "timeline-date-format";
pub const SORT_DIRECTION_KEY: &str = "timeline-sort-direction";
pub const READ_ONLY_KEY: &str = "timeline-read-only";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!(
                "Invalid theme: '{}'. Valid themes are: light, dark",
                s
            )),
        }
    }
}

/// Which weekday layout the calendar formatter uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `Fri, Jan 1, 1993`
    #[default]
    Locale,
    /// `1993-01-01, Fri`
    IsoWeekday,
}

impl DateStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateStyle::Locale => "locale",
            DateStyle::IsoWeekday => "iso-weekday",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            DateStyle::Locale => DateStyle::IsoWeekday,
            DateStyle::IsoWeekday => DateStyle::Locale,
        }
    }
}

impl FromStr for DateStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "locale" => Ok(DateStyle::Locale),
            "iso-weekday" => Ok(DateStyle::IsoWeekday),
            _ => Err(format!(
                "Invalid date format: '{}'. Valid values are: locale, iso-weekday",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub theme: Theme,
    pub date_style: DateStyle,
    pub sort_direction: SortDirection,
    pub read_only: bool,
}

impl Preferences {
    /// Build preferences from stored strings; anything missing or unreadable
    /// keeps the default for that key.
    pub fn from_lookup<F>(default_theme: Theme, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Preferences {
            theme: parse_or(lookup(THEME_KEY), default_theme),
            date_style: parse_or(lookup(DATE_FORMAT_KEY), DateStyle::default()),
            sort_direction: parse_or(lookup(SORT_DIRECTION_KEY), SortDirection::default()),
            // stored as the literal string "true"
            read_only: lookup(READ_ONLY_KEY).as_deref() == Some("true"),
        }
    }
}

fn parse_or<T: FromStr>(stored: Option<String>, default: T) -> T {
    stored.and_then(|s| s.parse().ok()).unwrap_or(default)
}
