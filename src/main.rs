use clap::Parser;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use timeline::application::{
    init::init, manage_config::ConfigService, IgnoreReason, Intent, Outcome, Timeline,
    EXPORT_FILE_NAME,
};
use timeline::cli::{format_timeline, run_shell, Cli, Commands, PrefSetting};
use timeline::domain::{DateFormatting, DateValue, EntryId, Theme};
use timeline::error::TimelineError;
use timeline::infrastructure::logging::init_logging;
use timeline::infrastructure::{Config, FileSystemRepository};

fn main() {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("{}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), TimelineError> {
    let Some(command) = cli.command else {
        println!("timeline - Dated journal entries in a sorted timeline");
        println!("Use --help for usage information");
        return Ok(());
    };

    match command {
        Commands::Init {
            path,
            explicit_add,
            date_formatting,
        } => {
            let config = Config {
                autosave_on_input: !explicit_add,
                date_formatting: DateFormatting::from_str(&date_formatting)
                    .map_err(TimelineError::Config)?,
                ..Config::default()
            };
            let repo = init(&path, &config)?;
            println!("Initialized timeline at {}", repo.data_dir().display());
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("autosave_on_input = {}", config.autosave_on_input);
                println!("allow_read_only = {}", config.allow_read_only);
                println!("date_formatting = {}", config.date_formatting);
                println!("keep_abandoned_blank = {}", config.keep_abandoned_blank);
                println!("default_theme = {}", config.default_theme.as_str());
                println!("log_level = {}", config.log_level);
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: timeline config [--list | <key> [<value>]]");
                println!(
                    "Valid keys: autosave_on_input, allow_read_only, date_formatting, \
                     keep_abandoned_blank, default_theme, log_level"
                );
                Ok(())
            }
        }
        command => {
            let mut timeline = open_timeline()?;
            run_on_timeline(&mut timeline, command)
        }
    }
}

/// Discover the timeline, start logging and load its contents
fn open_timeline() -> Result<Timeline<FileSystemRepository>, TimelineError> {
    let repo = FileSystemRepository::discover()?;
    let config = repo.load_config()?;

    if let Err(e) = start_logging(&repo, &config) {
        eprintln!("Warning: {:#}", e);
    }

    Ok(Timeline::load(config, repo))
}

fn start_logging(repo: &FileSystemRepository, config: &Config) -> anyhow::Result<()> {
    init_logging(&config.get_log_level(), &repo.log_dir())
        .map_err(|e| anyhow::anyhow!("logging disabled: {}", e))
}

fn run_on_timeline(
    timeline: &mut Timeline<FileSystemRepository>,
    command: Commands,
) -> Result<(), TimelineError> {
    match command {
        Commands::List { ids } => {
            print!("{}", with_newline(format_timeline(&timeline.view(), ids)));
            Ok(())
        }
        Commands::Add { date, text } => {
            if let Some(date) = date {
                expect_applied(timeline.handle(Intent::SelectDate(DateValue::from_str(&date)?)))?;
            }
            expect_applied(timeline.handle(Intent::InputText(text.join(" "))))?;
            expect_applied(timeline.handle(Intent::CommitExit))?;

            match newest_id(timeline) {
                Some(id) => println!("Added entry {}", id),
                None => println!("Nothing added"),
            }
            Ok(())
        }
        Commands::Edit { id, date, text } => {
            let id = parse_id(&id)?;
            expect_applied(timeline.handle(Intent::EnterEdit(id)))?;
            if let Some(date) = date {
                let date = DateValue::from_str(&date)?;
                expect_applied(timeline.handle(Intent::SelectDate(date)))?;
            }
            if let Some(text) = text {
                expect_applied(timeline.handle(Intent::InputText(text)))?;
            }
            expect_applied(timeline.handle(Intent::CommitExit))?;
            println!("Updated entry {}", id);
            Ok(())
        }
        Commands::Delete { id } => {
            let id = parse_id(&id)?;
            expect_applied(timeline.handle(Intent::EnterEdit(id)))?;
            expect_applied(timeline.handle(Intent::DeleteActive))?;
            println!("Deleted entry {}", id);
            Ok(())
        }
        Commands::Duplicate { id } => {
            let id = parse_id(&id)?;
            let before = newest_id(timeline);
            expect_applied(timeline.handle(Intent::DuplicateDate(id)))?;
            let date = timeline.selected_date();
            let created = newest_id(timeline).filter(|newest| Some(*newest) != before);
            expect_applied(timeline.handle(Intent::CommitExit))?;

            match created.filter(|new_id| timeline.store().contains(*new_id)) {
                Some(new_id) => println!("Added entry {} on {}", new_id, date),
                None => println!("Picked date {}", date),
            }
            Ok(())
        }
        Commands::Export { output, stdout } => {
            let doc = timeline.export();
            if stdout {
                print!("{}", doc.content);
            } else {
                let path = output.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
                fs::write(&path, &doc.content)?;
                println!("Exported {} entries to {}", timeline.store().len(), path.display());
            }
            Ok(())
        }
        Commands::Prefs { setting, value } => {
            let intent = match setting {
                PrefSetting::Sort => Intent::ToggleSortDirection,
                PrefSetting::ReadOnly => Intent::ToggleReadOnly,
                PrefSetting::DateFormat => Intent::ToggleDateFormat,
                PrefSetting::Theme => {
                    let value = value.ok_or_else(|| {
                        TimelineError::Config("Theme requires a value: light or dark".to_string())
                    })?;
                    Intent::SetTheme(Theme::from_str(&value).map_err(TimelineError::Config)?)
                }
            };
            expect_applied(timeline.handle(intent))?;

            let prefs = timeline.preferences();
            match setting {
                PrefSetting::Sort => println!("sort = {}", prefs.sort_direction),
                PrefSetting::ReadOnly => println!("read-only = {}", prefs.read_only),
                PrefSetting::DateFormat => println!("date-format = {}", prefs.date_style.as_str()),
                PrefSetting::Theme => println!("theme = {}", prefs.theme.as_str()),
            }
            Ok(())
        }
        Commands::Shell => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            let export_dir = std::env::current_dir()?;
            run_shell(timeline, stdin.lock(), &mut stdout, &export_dir)
        }
        Commands::Init { .. } | Commands::Config { .. } => Ok(()),
    }
}

/// Turn an ignored intent into the matching command error
fn expect_applied(outcome: Outcome) -> Result<(), TimelineError> {
    match outcome {
        Outcome::Applied | Outcome::Exported(_) => Ok(()),
        Outcome::Ignored(IgnoreReason::ReadOnly) => Err(TimelineError::ReadOnly),
        Outcome::Ignored(IgnoreReason::UnknownEntry(id)) => Err(TimelineError::NotFound(id)),
        Outcome::Ignored(IgnoreReason::NotInVariant) => Err(TimelineError::Config(
            "This action is disabled for this timeline".to_string(),
        )),
    }
}

// ids are strictly increasing, so the newest entry has the largest id
fn newest_id(timeline: &Timeline<FileSystemRepository>) -> Option<EntryId> {
    timeline.store().iter().map(|entry| entry.id).max()
}

fn parse_id(raw: &str) -> Result<EntryId, TimelineError> {
    raw.parse()
        .map_err(|_| TimelineError::Config(format!("Invalid entry id: '{}'", raw)))
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
