//! Application layer - Controller and use cases

pub mod export;
pub mod init;
pub mod manage_config;
pub mod timeline;

pub use export::{parse_export, render_export, ExportDocument, EXPORT_FILE_NAME};
pub use manage_config::ConfigService;
pub use timeline::{IgnoreReason, Intent, Outcome, Timeline, TimelineRow};
