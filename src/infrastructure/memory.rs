//! In-memory persistence for tests and embedding

use crate::domain::Entry;
use crate::error::{Result, TimelineError};
use crate::infrastructure::PersistenceAdapter;
use std::collections::HashMap;

/// Keeps everything in memory. Does NOT persist data.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    entries: Option<Vec<Entry>>,
    preferences: HashMap<String, String>,
    fail_writes: bool,
    saves: usize,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Entry>) -> Self {
        InMemoryRepository {
            entries: Some(entries),
            ..Self::default()
        }
    }

    pub fn with_preference(mut self, key: &str, value: &str) -> Self {
        self.preferences.insert(key.to_string(), value.to_string());
        self
    }

    /// Make every save fail with `StorageUnavailable`
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Entries as last saved
    pub fn stored_entries(&self) -> &[Entry] {
        self.entries.as_deref().unwrap_or_default()
    }

    /// Number of successful `save_entries` calls
    pub fn save_count(&self) -> usize {
        self.saves
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            return Err(TimelineError::StorageUnavailable(
                "in-memory store set to fail".to_string(),
            ));
        }
        Ok(())
    }
}

impl PersistenceAdapter for InMemoryRepository {
    fn load_entries(&self) -> Result<Vec<Entry>> {
        Ok(self.entries.clone().unwrap_or_default())
    }

    fn save_entries(&mut self, entries: &[Entry]) -> Result<()> {
        self.check_writable()?;
        self.entries = Some(entries.to_vec());
        self.saves += 1;
        Ok(())
    }

    fn load_preference(&self, key: &str) -> Result<Option<String>> {
        Ok(self.preferences.get(key).cloned())
    }

    fn save_preference(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.preferences.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
