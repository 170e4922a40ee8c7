//! Error types for timeline

use crate::domain::EntryId;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the timeline application
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("Not a timeline directory: {0}")]
    NotTimelineDirectory(PathBuf),

    #[error("Entry not found: {0}")]
    NotFound(EntryId),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Malformed persisted data: {0}")]
    MalformedPersistedData(String),

    #[error("Timeline is read-only")]
    ReadOnly,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config.toml: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl TimelineError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TimelineError::NotTimelineDirectory(_) => 2,
            TimelineError::InvalidDate(_) => 3,
            TimelineError::NotFound(_) => 4,
            TimelineError::ReadOnly => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TimelineError::NotTimelineDirectory(path) => {
                format!(
                    "Not a timeline directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'timeline init' in this directory to create a new timeline\n\
                    • Navigate to an existing timeline directory\n\
                    • Set TIMELINE_ROOT environment variable to your timeline path",
                    path.display()
                )
            }
            TimelineError::InvalidDate(input) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Expected format: YYYY-MM-DD (e.g., 1993-01-01)\n\n\
                    Examples:\n\
                    timeline add --date 2023-05-01 \"hello\"\n\
                    timeline edit 1700000000000 --date 1999-12-31",
                    input
                )
            }
            TimelineError::NotFound(id) => {
                format!(
                    "No entry with id {}\n\n\
                    Suggestions:\n\
                    • Use 'timeline list --ids' to see entry ids\n\
                    • The entry may already have been deleted",
                    id
                )
            }
            TimelineError::ReadOnly => "Timeline is read-only\n\n\
                Suggestions:\n\
                • Turn read-only off: timeline prefs read-only"
                .to_string(),
            TimelineError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Example: timeline config autosave_on_input false",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            TimelineError::TomlDeserialize(e) => format!(
                "Failed to parse .timeline/config.toml:\n{}\n\n\
                Suggestions:\n\
                • Fix or remove the offending line; missing keys fall back to defaults\n\
                • Check the current values with 'timeline config --list' once it parses",
                e
            ),
            _ => self.to_string(),
        }
    }
}

/// Result type using TimelineError
pub type Result<T> = std::result::Result<T, TimelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_timeline_directory_suggestion() {
        let err = TimelineError::NotTimelineDirectory(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("timeline init"));
        assert!(msg.contains("TIMELINE_ROOT"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_invalid_date_examples() {
        let err = TimelineError::InvalidDate("baddate".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("YYYY-MM-DD"));
        assert!(msg.contains("baddate"));
    }

    #[test]
    fn test_not_found_mentions_id() {
        let err = TimelineError::NotFound(EntryId::new(42));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("42"));
        assert!(msg.contains("timeline list"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            TimelineError::NotTimelineDirectory(PathBuf::from(".")).exit_code(),
            2
        );
        assert_eq!(TimelineError::InvalidDate("x".into()).exit_code(), 3);
        assert_eq!(TimelineError::NotFound(EntryId::new(1)).exit_code(), 4);
        assert_eq!(TimelineError::ReadOnly.exit_code(), 5);
        assert_eq!(TimelineError::Config("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = TimelineError::StorageUnavailable("disk full".to_string());
        let msg = err.display_with_suggestions();
        assert_eq!(msg, "Storage unavailable: disk full");
    }
}
