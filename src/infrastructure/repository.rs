//! File system repository

use crate::domain::Entry;
use crate::error::{Result, TimelineError};
use crate::infrastructure::config::TIMELINE_DIR;
use crate::infrastructure::Config;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENTRIES_FILE: &str = "timeline-entries.json";
pub const PREFERENCES_FILE: &str = "preferences.toml";
const LOG_DIR: &str = "logs";

/// Load and save the entry collection and the preference strings
pub trait PersistenceAdapter {
    /// All persisted entries; an absent collection is an empty one
    fn load_entries(&self) -> Result<Vec<Entry>>;

    /// Replace the persisted collection
    fn save_entries(&mut self, entries: &[Entry]) -> Result<()>;

    fn load_preference(&self, key: &str) -> Result<Option<String>>;

    fn save_preference(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File system implementation of PersistenceAdapter.
///
/// Layout under the timeline root:
/// ```text
/// .timeline/
/// ├── config.toml
/// ├── timeline-entries.json
/// ├── preferences.toml
/// └── logs/
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Find the timeline root.
    /// First checks TIMELINE_ROOT environment variable, then walks up from the
    /// current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("TIMELINE_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_timeline_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(TimelineError::Config(format!(
                    "TIMELINE_ROOT is set to '{}' but no .timeline directory found. \
                    Run 'timeline init' in that directory or unset TIMELINE_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Walk up from `start` until a directory containing .timeline is found
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_timeline_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(TimelineError::NotTimelineDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_timeline_dir(path: &Path) -> bool {
        path.join(TIMELINE_DIR).is_dir()
    }

    pub fn is_initialized(&self) -> bool {
        Self::has_timeline_dir(&self.root)
    }

    /// Create the .timeline directory. Fails if it already exists.
    pub fn initialize(&self) -> Result<()> {
        let timeline_dir = self.data_dir();

        if timeline_dir.exists() {
            return Err(TimelineError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(&timeline_dir)?;
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(TIMELINE_DIR)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join(LOG_DIR)
    }

    pub fn entries_path(&self) -> PathBuf {
        self.data_dir().join(ENTRIES_FILE)
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn read_optional(path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TimelineError::StorageUnavailable(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Write via a temp file in the same directory, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so the
    /// destination is removed first.
    fn write_atomic(path: &Path, content: &str) -> Result<()> {
        let unavailable = |e: std::io::Error| {
            TimelineError::StorageUnavailable(format!("cannot write {}: {}", path.display(), e))
        };

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(unavailable)?;
            }
        }

        let tmp_name = format!(
            "{}.tmp-{}",
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("timeline"),
            std::process::id()
        );
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, content).map_err(unavailable)?;

        if cfg!(windows) && path.exists() {
            fs::remove_file(path).map_err(unavailable)?;
        }

        fs::rename(&tmp_path, path).map_err(unavailable)?;
        Ok(())
    }

    fn load_preference_table(&self) -> Result<BTreeMap<String, String>> {
        let path = self.data_dir().join(PREFERENCES_FILE);
        match Self::read_optional(&path)? {
            Some(content) => toml::from_str(&content).map_err(|e| {
                TimelineError::MalformedPersistedData(format!("{}: {}", PREFERENCES_FILE, e))
            }),
            None => Ok(BTreeMap::new()),
        }
    }
}

impl PersistenceAdapter for FileSystemRepository {
    fn load_entries(&self) -> Result<Vec<Entry>> {
        match Self::read_optional(&self.entries_path())? {
            Some(content) if content.trim().is_empty() => Ok(Vec::new()),
            Some(content) => serde_json::from_str(&content).map_err(|e| {
                TimelineError::MalformedPersistedData(format!("{}: {}", ENTRIES_FILE, e))
            }),
            None => Ok(Vec::new()),
        }
    }

    fn save_entries(&mut self, entries: &[Entry]) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)?;
        Self::write_atomic(&self.entries_path(), &content)
    }

    fn load_preference(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_preference_table()?.get(key).cloned())
    }

    fn save_preference(&mut self, key: &str, value: &str) -> Result<()> {
        // an unreadable table is replaced rather than blocking the write
        let mut table = self.load_preference_table().unwrap_or_default();
        table.insert(key.to_string(), value.to_string());

        let content = toml::to_string_pretty(&table)?;
        Self::write_atomic(&self.data_dir().join(PREFERENCES_FILE), &content)
    }
}
