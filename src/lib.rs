//! timeline - Dated journal entries on the command line
//!
//! Entries pair a calendar date with free text and are always shown in date
//! order. Edits are written through to `.timeline/` as they happen, and the
//! whole timeline can be exported as a plain-text document.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::TimelineError;
