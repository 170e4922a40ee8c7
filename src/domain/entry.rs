//! Timeline entries

use crate::domain::DateValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of an entry.
///
/// Derived from the creation time in milliseconds and strictly increasing
/// within a store, so it doubles as the tie-break for entries on the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    pub fn new(raw: u64) -> Self {
        EntryId(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EntryId)
    }
}

/// A dated piece of free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub date: DateValue,
    pub text: String,
}

impl Entry {
    pub fn new(id: EntryId, date: DateValue, text: impl Into<String>) -> Self {
        Entry {
            id,
            date,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let entry = Entry::new(EntryId::new(100), DateValue::new(2023, 5, 1), "hi");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 100,
                "date": {"year": 2023, "month": 5, "day": 1},
                "text": "hi"
            })
        );
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("1700000000000".parse::<EntryId>().unwrap().get(), 1700000000000);
        assert!("abc".parse::<EntryId>().is_err());
    }
}
