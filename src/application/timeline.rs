//! Timeline controller
//!
//! Owns the entry store, the edit session, the picker date and the
//! preferences for one timeline, and turns presentation intents into
//! transitions. After a transition that changed the store, the whole
//! collection is written through the persistence adapter once.
//!
//! Nothing here fails from the caller's point of view. Stale ids are
//! ignored, storage failures are logged and the in-memory state carries on.

use crate::application::export::{render_export, ExportDocument, EXPORT_FILE_NAME};
use crate::domain::preferences::{DATE_FORMAT_KEY, READ_ONLY_KEY, SORT_DIRECTION_KEY, THEME_KEY};
use crate::domain::{
    DateValue, EditMode, EditSession, Entry, EntryId, EntryStore, Preferences, StoreEffect,
    Theme, WheelPick,
};
use crate::infrastructure::{Config, PersistenceAdapter};
use log::{info, warn};

/// A user action forwarded by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The text input now holds this text
    InputText(String),
    SelectDate(DateValue),
    PickWheel(WheelPick),
    EnterEdit(EntryId),
    CancelEdit,
    /// Done / new
    CommitExit,
    /// Add button of the explicit-add variant
    Add,
    DeleteActive,
    DuplicateDate(EntryId),
    ToggleSortDirection,
    ToggleReadOnly,
    ToggleDateFormat,
    SetTheme(Theme),
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    ReadOnly,
    UnknownEntry(EntryId),
    /// The configured variant does not offer this action
    NotInVariant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(IgnoreReason),
    Exported(ExportDocument),
}

/// One rendered line of the timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRow {
    pub id: EntryId,
    pub date_label: String,
    pub text: String,
    pub editing: bool,
}

pub struct Timeline<P: PersistenceAdapter> {
    config: Config,
    store: EntryStore,
    session: EditSession,
    selected_date: DateValue,
    preferences: Preferences,
    adapter: P,
    degraded: bool,
}

impl<P: PersistenceAdapter> Timeline<P> {
    /// Load entries and preferences through `adapter`.
    ///
    /// Unreadable or malformed storage starts an empty timeline.
    pub fn load(config: Config, adapter: P) -> Self {
        let mut degraded = false;

        let entries = adapter.load_entries().unwrap_or_else(|e| {
            warn!("event=load_entries module=timeline status=fallback_empty error={}", e);
            degraded = true;
            Vec::new()
        });

        let mut preferences = Preferences::from_lookup(config.default_theme, |key| {
            adapter.load_preference(key).unwrap_or_else(|e| {
                warn!(
                    "event=load_preference module=timeline status=fallback key={} error={}",
                    key, e
                );
                None
            })
        });
        if !config.allow_read_only {
            preferences.read_only = false;
        }

        let store = EntryStore::from_entries(entries);
        info!(
            "event=timeline_load module=timeline entries={} mode={:?}",
            store.len(),
            config.edit_mode()
        );

        Timeline {
            session: EditSession::new(config.edit_mode(), config.keep_abandoned_blank),
            config,
            store,
            selected_date: DateValue::default(),
            preferences,
            adapter,
            degraded,
        }
    }

    pub fn handle(&mut self, intent: Intent) -> Outcome {
        let read_only = self.preferences.read_only;

        match intent {
            Intent::InputText(text) => {
                if read_only {
                    return Outcome::Ignored(IgnoreReason::ReadOnly);
                }
                let effect = self
                    .session
                    .input_text(&mut self.store, self.selected_date, &text);
                self.persist(effect);
                Outcome::Applied
            }
            Intent::SelectDate(date) => {
                self.selected_date = date;
                self.date_changed();
                Outcome::Applied
            }
            Intent::PickWheel(pick) => {
                self.selected_date = self.selected_date.apply(pick);
                self.date_changed();
                Outcome::Applied
            }
            Intent::EnterEdit(id) => {
                if read_only {
                    return Outcome::Ignored(IgnoreReason::ReadOnly);
                }
                match self.session.enter_edit(&self.store, id) {
                    Some(date) => {
                        self.selected_date = date;
                        Outcome::Applied
                    }
                    None => Outcome::Ignored(IgnoreReason::UnknownEntry(id)),
                }
            }
            Intent::CancelEdit => {
                let effect = self.session.cancel(&mut self.store);
                self.persist(effect);
                self.exit_edit();
                Outcome::Applied
            }
            Intent::CommitExit => self.commit_exit(read_only),
            Intent::Add => {
                if self.session.mode() != EditMode::ExplicitAdd {
                    return Outcome::Ignored(IgnoreReason::NotInVariant);
                }
                self.commit_exit(read_only)
            }
            Intent::DeleteActive => {
                let effect = self.session.delete_active(&mut self.store);
                self.persist(effect);
                self.exit_edit();
                Outcome::Applied
            }
            Intent::DuplicateDate(id) => self.duplicate_date(id, read_only),
            Intent::ToggleSortDirection => {
                self.preferences.sort_direction = self.preferences.sort_direction.toggled();
                let value = self.preferences.sort_direction.to_string();
                self.save_preference(SORT_DIRECTION_KEY, &value);
                Outcome::Applied
            }
            Intent::ToggleReadOnly => {
                if !self.config.allow_read_only {
                    return Outcome::Ignored(IgnoreReason::NotInVariant);
                }
                self.preferences.read_only = !read_only;
                let value = self.preferences.read_only.to_string();
                self.save_preference(READ_ONLY_KEY, &value);
                Outcome::Applied
            }
            Intent::ToggleDateFormat => {
                self.preferences.date_style = self.preferences.date_style.toggled();
                let value = self.preferences.date_style.as_str();
                self.save_preference(DATE_FORMAT_KEY, value);
                Outcome::Applied
            }
            Intent::SetTheme(theme) => {
                self.preferences.theme = theme;
                self.save_preference(THEME_KEY, theme.as_str());
                Outcome::Applied
            }
            Intent::Export => Outcome::Exported(self.export()),
        }
    }

    /// Entries in display order; export uses the same ordering
    pub fn sorted_entries(&self) -> Vec<&Entry> {
        self.store.sorted_view(self.preferences.sort_direction)
    }

    /// Rows ready for rendering
    pub fn view(&self) -> Vec<TimelineRow> {
        let active = self.session.active_id();
        self.sorted_entries()
            .into_iter()
            .map(|entry| TimelineRow {
                id: entry.id,
                date_label: self.format_date(&entry.date),
                text: entry.text.clone(),
                editing: active == Some(entry.id),
            })
            .collect()
    }

    pub fn export(&self) -> ExportDocument {
        ExportDocument {
            file_name: EXPORT_FILE_NAME.to_string(),
            content: render_export(self.sorted_entries()),
        }
    }

    pub fn format_date(&self, date: &DateValue) -> String {
        self.config
            .date_formatting
            .format(date, self.preferences.date_style)
    }

    /// Current contents of the text input
    pub fn input_value(&self) -> String {
        self.session.input_value(&self.store)
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn selected_date(&self) -> DateValue {
        self.selected_date
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn adapter(&self) -> &P {
        &self.adapter
    }

    /// True once any load or save fell back to in-memory state
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    fn date_changed(&mut self) {
        // picking a date never creates entries while read-only
        if self.preferences.read_only {
            return;
        }
        let effect = self.session.date_changed(&mut self.store, self.selected_date);
        self.persist(effect);
    }

    fn commit_exit(&mut self, read_only: bool) -> Outcome {
        if read_only && self.session.mode() == EditMode::ExplicitAdd {
            self.session.detach();
            self.exit_edit();
            return Outcome::Ignored(IgnoreReason::ReadOnly);
        }

        let effect = self.session.commit(&mut self.store, self.selected_date);
        self.persist(effect);
        self.exit_edit();
        Outcome::Applied
    }

    fn duplicate_date(&mut self, id: EntryId, read_only: bool) -> Outcome {
        let Some(date) = self.store.get(id).map(|entry| entry.date) else {
            return Outcome::Ignored(IgnoreReason::UnknownEntry(id));
        };
        self.selected_date = date;

        // autosave starts a fresh blank entry on that date
        if self.session.mode() == EditMode::Autosave && !read_only {
            self.session.detach();
            let effect = self.session.input_text(&mut self.store, date, "");
            self.persist(effect);
        }
        Outcome::Applied
    }

    fn exit_edit(&mut self) {
        self.selected_date = DateValue::default();
    }

    fn persist(&mut self, effect: StoreEffect) {
        if !effect.is_changed() {
            return;
        }
        if let Err(e) = self.adapter.save_entries(&self.store.to_vec()) {
            warn!("event=save_entries module=timeline status=failed error={}", e);
            self.degraded = true;
        }
    }

    fn save_preference(&mut self, key: &str, value: &str) {
        if let Err(e) = self.adapter.save_preference(key, value) {
            warn!(
                "event=save_preference module=timeline status=failed key={} error={}",
                key, e
            );
            self.degraded = true;
        }
    }
}
