//! CLI layer - Command-line interface

pub mod commands;
pub mod output;
pub mod shell;

pub use commands::{Cli, Commands, PrefSetting};
pub use output::format_timeline;
pub use shell::run_shell;
