//! In-memory entry store

use crate::domain::sort::{sort_entries, SortDirection};
use crate::domain::{DateValue, Entry, EntryId};
use chrono::Utc;
use log::{debug, warn};
use std::collections::BTreeMap;

/// The set of entries, keyed by id.
///
/// Storage order carries no meaning; callers get ordering from
/// [`EntryStore::sorted_view`]. Ids handed out by `create` are never reused
/// for the lifetime of the store, even after deletes.
#[derive(Debug, Default, Clone)]
pub struct EntryStore {
    entries: BTreeMap<EntryId, Entry>,
    last_issued: u64,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from persisted entries. Duplicate ids keep the first one seen.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut store = EntryStore::new();
        for entry in entries {
            if store.entries.contains_key(&entry.id) {
                warn!(
                    "event=entry_load module=store status=duplicate id={}",
                    entry.id
                );
                continue;
            }
            store.last_issued = store.last_issued.max(entry.id.get());
            store.entries.insert(entry.id, entry);
        }
        store
    }

    /// Insert a new entry stamped with the current time
    pub fn create(&mut self, date: DateValue, text: impl Into<String>) -> EntryId {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        self.create_at(now, date, text)
    }

    /// Insert a new entry using `stamp` as the preferred id.
    ///
    /// When `stamp` is not above every id issued so far the next id after
    /// them is used instead, so two creates in the same millisecond stay
    /// distinct. Once `u64::MAX` has been issued the lowest unused id is taken.
    pub fn create_at(&mut self, stamp: u64, date: DateValue, text: impl Into<String>) -> EntryId {
        let raw = match self.last_issued.checked_add(1) {
            Some(next) => stamp.max(next),
            None => {
                let free = self.lowest_unused_id();
                warn!(
                    "event=entry_create module=store status=id_space_exhausted fallback_id={}",
                    free
                );
                free
            }
        };
        self.last_issued = self.last_issued.max(raw);

        let id = EntryId::new(raw);
        self.entries.insert(id, Entry::new(id, date, text));
        debug!("event=entry_create module=store id={} date={}", id, date);
        id
    }

    /// Replace date and text. Returns `false` if the entry is gone.
    pub fn update(&mut self, id: EntryId, date: DateValue, text: impl Into<String>) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.date = date;
                entry.text = text.into();
                true
            }
            None => {
                debug!("event=entry_update module=store status=not_found id={}", id);
                false
            }
        }
    }

    /// Remove an entry. Returns `false` if it was not there.
    pub fn delete(&mut self, id: EntryId) -> bool {
        let removed = self.entries.remove(&id).is_some();
        if !removed {
            debug!("event=entry_delete module=store status=not_found id={}", id);
        }
        removed
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Freshly ordered view; the store itself is left untouched
    pub fn sorted_view(&self, direction: SortDirection) -> Vec<&Entry> {
        sort_entries(self.entries.values(), direction)
    }

    /// Owned copy of every entry, for persistence
    pub fn to_vec(&self) -> Vec<Entry> {
        self.entries.values().cloned().collect()
    }

    // keys are sorted, so the first gap in 1, 2, 3, ... is found in one pass
    fn lowest_unused_id(&self) -> u64 {
        let mut candidate = 1;
        for id in self.entries.keys() {
            match id.get().cmp(&candidate) {
                std::cmp::Ordering::Less => continue,
                std::cmp::Ordering::Equal => candidate += 1,
                std::cmp::Ordering::Greater => break,
            }
        }
        candidate
    }
}
