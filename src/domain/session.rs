//! Edit session state machine
//!
//! Coordinates "no active edit" and "editing entry X" on top of an
//! [`EntryStore`]. Every transition is infallible from the caller's point of
//! view: a stale id (entry already gone) is logged and the transition still
//! completes. Transitions report whether the store changed so the caller can
//! persist exactly once afterwards.
//!
//! Two editing modes exist:
//! - [`EditMode::Autosave`]: the first keystroke (or date pick) creates the
//!   entry, every later one writes through to it.
//! - [`EditMode::ExplicitAdd`]: typing only fills a draft; the store is
//!   touched when the draft is committed.

use crate::domain::{DateValue, EntryId, EntryStore};
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Autosave,
    ExplicitAdd,
}

/// Entry fields captured when editing of a pre-existing entry begins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub date: DateValue,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    /// Draft not yet in the store (explicit-add mode only)
    Creating { text: String },
    /// `snapshot` is `None` when the entry was created during this session.
    /// `pending` holds uncommitted text in explicit-add mode.
    Editing {
        id: EntryId,
        snapshot: Option<Snapshot>,
        pending: Option<String>,
    },
}

/// Whether a transition wrote to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEffect {
    Unchanged,
    Changed,
}

impl StoreEffect {
    pub fn is_changed(&self) -> bool {
        matches!(self, StoreEffect::Changed)
    }

    fn from_bool(changed: bool) -> Self {
        if changed {
            StoreEffect::Changed
        } else {
            StoreEffect::Unchanged
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditSession {
    mode: EditMode,
    keep_abandoned_blank: bool,
    state: EditState,
}

impl EditSession {
    /// `keep_abandoned_blank` decides what happens to an entry created in this
    /// session that still has no text when the user finishes: `true` keeps it.
    pub fn new(mode: EditMode, keep_abandoned_blank: bool) -> Self {
        EditSession {
            mode,
            keep_abandoned_blank,
            state: EditState::Idle,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == EditState::Idle
    }

    pub fn active_id(&self) -> Option<EntryId> {
        match &self.state {
            EditState::Editing { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match &self.state {
            EditState::Editing { snapshot, .. } => snapshot.as_ref(),
            _ => None,
        }
    }

    /// What the text input should currently show
    pub fn input_value(&self, store: &EntryStore) -> String {
        match &self.state {
            EditState::Idle => String::new(),
            EditState::Creating { text } => text.clone(),
            EditState::Editing { id, pending, .. } => match pending {
                Some(text) => text.clone(),
                None => store.get(*id).map(|e| e.text.clone()).unwrap_or_default(),
            },
        }
    }

    /// Start editing an existing entry, replacing any current session.
    ///
    /// Returns the entry's date for the picker, or `None` if the id is unknown
    /// (the session is then left as it was).
    pub fn enter_edit(&mut self, store: &EntryStore, id: EntryId) -> Option<DateValue> {
        let entry = store.get(id)?;
        self.state = EditState::Editing {
            id,
            snapshot: Some(Snapshot {
                date: entry.date,
                text: entry.text.clone(),
            }),
            pending: None,
        };
        debug!("event=edit_enter module=session id={}", id);
        Some(entry.date)
    }

    /// The text input changed
    pub fn input_text(&mut self, store: &mut EntryStore, date: DateValue, text: &str) -> StoreEffect {
        match self.mode {
            EditMode::Autosave => self.autosave(store, date, text),
            EditMode::ExplicitAdd => {
                match &mut self.state {
                    EditState::Idle => {
                        self.state = EditState::Creating {
                            text: text.to_string(),
                        };
                    }
                    EditState::Creating { text: draft } => *draft = text.to_string(),
                    EditState::Editing { pending, .. } => *pending = Some(text.to_string()),
                }
                StoreEffect::Unchanged
            }
        }
    }

    /// The picker date changed. Autosave mode writes it through immediately,
    /// creating a blank entry when idle.
    pub fn date_changed(&mut self, store: &mut EntryStore, date: DateValue) -> StoreEffect {
        match self.mode {
            EditMode::Autosave => {
                let text = self.input_value(store);
                self.autosave(store, date, &text)
            }
            EditMode::ExplicitAdd => StoreEffect::Unchanged,
        }
    }

    /// Explicit-add mode: write the draft or pending edit and go idle.
    /// In autosave mode there is nothing to write and this equals [`Self::finish`].
    pub fn commit(&mut self, store: &mut EntryStore, date: DateValue) -> StoreEffect {
        if self.mode == EditMode::Autosave {
            return self.finish(store);
        }

        let effect = match std::mem::take(&mut self.state) {
            EditState::Idle => StoreEffect::Unchanged,
            EditState::Creating { text } => {
                store.create(date, text);
                StoreEffect::Changed
            }
            EditState::Editing { id, pending, .. } => {
                let text = match pending {
                    Some(text) => text,
                    None => store.get(id).map(|e| e.text.clone()).unwrap_or_default(),
                };
                let updated = store.update(id, date, text);
                if !updated {
                    warn!("event=edit_commit module=session status=not_found id={}", id);
                }
                StoreEffect::from_bool(updated)
            }
        };
        debug!("event=edit_commit module=session changed={}", effect.is_changed());
        effect
    }

    /// Done / new: leave the entry as last saved and go idle.
    ///
    /// With `keep_abandoned_blank` off, an entry created during this session
    /// that never got any text is removed here.
    pub fn finish(&mut self, store: &mut EntryStore) -> StoreEffect {
        let effect = match std::mem::take(&mut self.state) {
            EditState::Editing {
                id, snapshot: None, ..
            } if !self.keep_abandoned_blank => {
                let blank = store.get(id).is_some_and(|e| e.text.is_empty());
                StoreEffect::from_bool(blank && store.delete(id))
            }
            _ => StoreEffect::Unchanged,
        };
        debug!("event=edit_finish module=session changed={}", effect.is_changed());
        effect
    }

    /// Roll back the in-progress edit and go idle.
    ///
    /// A pre-existing entry gets its snapshot back; an entry created during
    /// this session is deleted; a draft is dropped.
    pub fn cancel(&mut self, store: &mut EntryStore) -> StoreEffect {
        let effect = match std::mem::take(&mut self.state) {
            EditState::Editing {
                id,
                snapshot: Some(snapshot),
                ..
            } => {
                let current = store.get(id).map(|e| (e.date, e.text.as_str()));
                if current == Some((snapshot.date, snapshot.text.as_str())) {
                    StoreEffect::Unchanged
                } else {
                    let restored = store.update(id, snapshot.date, snapshot.text);
                    if !restored {
                        warn!("event=edit_cancel module=session status=not_found id={}", id);
                    }
                    StoreEffect::from_bool(restored)
                }
            }
            EditState::Editing {
                id, snapshot: None, ..
            } => {
                let deleted = store.delete(id);
                if !deleted {
                    warn!("event=edit_cancel module=session status=not_found id={}", id);
                }
                StoreEffect::from_bool(deleted)
            }
            EditState::Creating { .. } | EditState::Idle => StoreEffect::Unchanged,
        };
        debug!("event=edit_cancel module=session changed={}", effect.is_changed());
        effect
    }

    /// Delete the entry being edited (if any) and go idle
    pub fn delete_active(&mut self, store: &mut EntryStore) -> StoreEffect {
        let effect = match std::mem::take(&mut self.state) {
            EditState::Editing { id, .. } => {
                let deleted = store.delete(id);
                if !deleted {
                    warn!("event=edit_delete module=session status=not_found id={}", id);
                }
                StoreEffect::from_bool(deleted)
            }
            EditState::Creating { .. } | EditState::Idle => StoreEffect::Unchanged,
        };
        debug!("event=edit_delete module=session changed={}", effect.is_changed());
        effect
    }

    /// Forget the active entry without touching the store
    pub fn detach(&mut self) {
        self.state = EditState::Idle;
    }

    fn autosave(&mut self, store: &mut EntryStore, date: DateValue, text: &str) -> StoreEffect {
        match &self.state {
            EditState::Editing { id, .. } => {
                let id = *id;
                if !store.update(id, date, text) {
                    // entry vanished under us; keep the session, nothing to write
                    warn!("event=autosave module=session status=not_found id={}", id);
                    return StoreEffect::Unchanged;
                }
                StoreEffect::Changed
            }
            EditState::Idle | EditState::Creating { .. } => {
                let id = store.create(date, text);
                self.state = EditState::Editing {
                    id,
                    snapshot: None,
                    pending: None,
                };
                debug!("event=autosave module=session status=created id={}", id);
                StoreEffect::Changed
            }
        }
    }
}
