//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "timeline")]
#[command(about = "Dated journal entries kept in a sorted timeline", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new timeline
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Use an explicit add step instead of saving on every input
        #[arg(long)]
        explicit_add: bool,

        /// Date formatting strategy (iso, locale-weekday)
        #[arg(long, default_value = "locale-weekday")]
        date_formatting: String,
    },

    /// Show entries in timeline order
    List {
        /// Include entry ids
        #[arg(long)]
        ids: bool,
    },

    /// Add an entry
    Add {
        /// Entry date as YYYY-MM-DD (default: 1993-01-01)
        #[arg(short, long)]
        date: Option<String>,

        /// Entry text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Change an entry's text and/or date
    Edit {
        id: String,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        text: Option<String>,
    },

    /// Delete an entry
    Delete { id: String },

    /// Start from another entry's date
    Duplicate { id: String },

    /// Write the timeline as a text document
    Export {
        /// Output file (default: ./timeline-export.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Toggle display preferences
    Prefs {
        #[arg(value_enum)]
        setting: PrefSetting,

        /// Theme name when setting the theme (light, dark)
        value: Option<String>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Interactive session reading one action per line from stdin
    Shell,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrefSetting {
    Sort,
    ReadOnly,
    DateFormat,
    Theme,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_joins_words() {
        let cli = Cli::parse_from(["timeline", "add", "--date", "2023-05-01", "hello", "world"]);
        match cli.command {
            Some(Commands::Add { date, text }) => {
                assert_eq!(date.as_deref(), Some("2023-05-01"));
                assert_eq!(text, vec!["hello", "world"]);
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn test_parse_prefs() {
        let cli = Cli::parse_from(["timeline", "prefs", "read-only"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Prefs {
                setting: PrefSetting::ReadOnly,
                value: None
            })
        ));
    }

    #[test]
    fn test_export_flags_conflict() {
        let result = Cli::try_parse_from(["timeline", "export", "--stdout", "-o", "x.txt"]);
        assert!(result.is_err());
    }
}
