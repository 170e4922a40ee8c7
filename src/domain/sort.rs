//! Display and export ordering

use crate::domain::{DateValue, Entry, EntryId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!(
                "Invalid sort direction: '{}'. Valid values are: asc, desc",
                s
            )),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// Total order key: (year, month, day, id)
pub fn sort_key(entry: &Entry) -> (DateValue, EntryId) {
    (entry.date, entry.id)
}

/// Order entries for rendering and export.
///
/// Descending is the exact reverse of ascending; ties on date keep their
/// id order reversed as well.
pub fn sort_entries<'a, I>(entries: I, direction: SortDirection) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut sorted: Vec<&Entry> = entries.into_iter().collect();
    sorted.sort_by_key(|e| sort_key(e));
    if direction == SortDirection::Desc {
        sorted.reverse();
    }
    sorted
}
