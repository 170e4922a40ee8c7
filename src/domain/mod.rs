//! Domain layer - Entries, ordering and the edit state machine

pub mod date;
pub mod entry;
pub mod preferences;
pub mod session;
pub mod sort;
pub mod store;

pub use date::{DateFormatting, DateValue, WheelPick};
pub use entry::{Entry, EntryId};
pub use preferences::{DateStyle, Preferences, Theme};
pub use session::{EditMode, EditSession, EditState, Snapshot, StoreEffect};
pub use sort::{sort_entries, SortDirection};
pub use store::EntryStore;
