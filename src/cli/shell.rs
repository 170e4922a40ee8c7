//! Line-oriented interactive session.
//!
//! Each input line is one user action; it is fully applied before the next
//! line is read.

use crate::application::{IgnoreReason, Intent, Outcome, Timeline};
use crate::cli::output::format_timeline;
use crate::domain::{DateValue, EntryId, Theme, WheelPick};
use crate::error::{Result, TimelineError};
use crate::infrastructure::PersistenceAdapter;
use log::warn;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

const HELP: &str = "\
text <words>          replace the input text
append <words>        add to the input text
date <YYYY-MM-DD>     pick a date
wheel <column> <n>    pick one wheel digit (day-tens, day-ones, month, century, year-tens, year-ones)
edit <id>             edit an entry
cancel | done | new   leave the current edit
add                   commit the draft (explicit-add timelines)
delete                delete the entry being edited
dup <id>              reuse an entry's date
sort | readonly | format | theme <light|dark>
export                write timeline-export.txt
list | status | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Intent(Intent),
    Append(String),
    List,
    Status,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed.trim_end(), ""),
    };

    let command = match word {
        "text" => ShellCommand::Intent(Intent::InputText(rest.to_string())),
        "append" => ShellCommand::Append(rest.to_string()),
        "date" => ShellCommand::Intent(Intent::SelectDate(DateValue::from_str(rest)?)),
        "wheel" => {
            let mut args = rest.split_whitespace();
            let (Some(column), Some(digit)) = (args.next(), args.next()) else {
                return Err(TimelineError::InvalidDate(format!("wheel {}", rest)));
            };
            ShellCommand::Intent(Intent::PickWheel(WheelPick::parse(column, digit)?))
        }
        "edit" => ShellCommand::Intent(Intent::EnterEdit(parse_id(rest)?)),
        "cancel" => ShellCommand::Intent(Intent::CancelEdit),
        "done" | "new" => ShellCommand::Intent(Intent::CommitExit),
        "add" => ShellCommand::Intent(Intent::Add),
        "delete" => ShellCommand::Intent(Intent::DeleteActive),
        "dup" | "duplicate" => ShellCommand::Intent(Intent::DuplicateDate(parse_id(rest)?)),
        "sort" => ShellCommand::Intent(Intent::ToggleSortDirection),
        "readonly" => ShellCommand::Intent(Intent::ToggleReadOnly),
        "format" => ShellCommand::Intent(Intent::ToggleDateFormat),
        "theme" => ShellCommand::Intent(Intent::SetTheme(
            Theme::from_str(rest.trim()).map_err(TimelineError::Config)?,
        )),
        "export" => ShellCommand::Intent(Intent::Export),
        "list" => ShellCommand::List,
        "status" => ShellCommand::Status,
        "help" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        _ => {
            return Err(TimelineError::Config(format!(
                "Unknown command: '{}'. Type 'help' for a list",
                word
            )))
        }
    };

    Ok(Some(command))
}

fn parse_id(raw: &str) -> Result<EntryId> {
    raw.parse()
        .map_err(|_| TimelineError::Config(format!("Invalid entry id: '{}'", raw.trim())))
}

/// Run the session until `quit` or end of input.
///
/// Bad lines are reported on `out` and skipped; only I/O failures on the
/// streams themselves end the session with an error.
pub fn run_shell<P, R, W>(
    timeline: &mut Timeline<P>,
    input: R,
    out: &mut W,
    export_dir: &Path,
) -> Result<()>
where
    P: PersistenceAdapter,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::List => write_list(timeline, out)?,
            ShellCommand::Status => write_status(timeline, out)?,
            ShellCommand::Append(more) => {
                let text = format!("{}{}", timeline.input_value(), more);
                report(timeline.handle(Intent::InputText(text)), out, export_dir)?;
            }
            ShellCommand::Intent(intent) => {
                report(timeline.handle(intent), out, export_dir)?;
            }
        }
        out.flush()?;
    }
    Ok(())
}

fn write_list<P: PersistenceAdapter, W: Write>(timeline: &Timeline<P>, out: &mut W) -> Result<()> {
    let listing = format_timeline(&timeline.view(), true);
    write!(out, "{}", listing)?;
    if !listing.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

fn write_status<P: PersistenceAdapter, W: Write>(
    timeline: &Timeline<P>,
    out: &mut W,
) -> Result<()> {
    let editing = match timeline.session().active_id() {
        Some(id) => id.to_string(),
        None if timeline.session().is_idle() => "none".to_string(),
        None => "draft".to_string(),
    };
    let prefs = timeline.preferences();
    writeln!(
        out,
        "date={} editing={} input={:?} sort={} read-only={} theme={}",
        timeline.selected_date(),
        editing,
        timeline.input_value(),
        prefs.sort_direction,
        prefs.read_only,
        prefs.theme.as_str()
    )?;
    Ok(())
}

fn report<W: Write>(outcome: Outcome, out: &mut W, export_dir: &Path) -> Result<()> {
    match outcome {
        Outcome::Applied => {}
        Outcome::Ignored(IgnoreReason::ReadOnly) => writeln!(out, "ignored: timeline is read-only")?,
        Outcome::Ignored(IgnoreReason::UnknownEntry(id)) => {
            writeln!(out, "ignored: no entry with id {}", id)?
        }
        Outcome::Ignored(IgnoreReason::NotInVariant) => {
            writeln!(out, "ignored: not available in this timeline")?
        }
        Outcome::Exported(doc) => {
            let path = export_dir.join(&doc.file_name);
            match fs::write(&path, &doc.content) {
                Ok(()) => writeln!(out, "exported to {}", path.display())?,
                Err(e) => {
                    warn!("event=export_write module=shell status=failed error={}", e);
                    writeln!(out, "error: cannot write {}: {}", path.display(), e)?
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{Config, InMemoryRepository};
    use tempfile::TempDir;

    fn run(script: &str) -> (Timeline<InMemoryRepository>, String, TempDir) {
        let temp = TempDir::new().unwrap();
        let mut timeline = Timeline::load(Config::default(), InMemoryRepository::new());
        let mut out = Vec::new();
        run_shell(&mut timeline, script.as_bytes(), &mut out, temp.path()).unwrap();
        (timeline, String::from_utf8(out).unwrap(), temp)
    }

    #[test]
    fn test_parse_lines() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(
            parse_line("text hello  world").unwrap(),
            Some(ShellCommand::Intent(Intent::InputText("hello  world".into())))
        );
        assert_eq!(
            parse_line("date 2023-05-01").unwrap(),
            Some(ShellCommand::Intent(Intent::SelectDate(DateValue::new(
                2023, 5, 1
            ))))
        );
        assert_eq!(
            parse_line("wheel month 7").unwrap(),
            Some(ShellCommand::Intent(Intent::PickWheel(WheelPick::Month(7))))
        );
        assert_eq!(
            parse_line("done").unwrap(),
            Some(ShellCommand::Intent(Intent::CommitExit))
        );
        assert_eq!(parse_line("quit").unwrap(), Some(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_line("date tomorrow").is_err());
        assert!(parse_line("wheel month").is_err());
        assert!(parse_line("edit abc").is_err());
        assert!(parse_line("theme neon").is_err());
        assert!(parse_line("frobnicate").is_err());
    }

    #[test]
    fn test_session_script() {
        let (timeline, out, _temp) = run(
            "date 2023-05-01\n\
             append hello\n\
             append , world\n\
             done\n\
             list\n",
        );
        assert_eq!(timeline.store().len(), 1);
        let entry = timeline.store().iter().next().unwrap();
        assert_eq!(entry.text, "hello, world");
        assert_eq!(entry.date, DateValue::new(2023, 5, 1));
        assert!(out.contains("Mon, May 1, 2023  hello, world"));
    }

    #[test]
    fn test_bad_line_does_not_stop_session() {
        let (timeline, out, _temp) = run("bogus\ntext still here\n");
        assert!(out.contains("error: "));
        assert_eq!(timeline.store().len(), 1);
    }

    #[test]
    fn test_quit_stops_reading() {
        let (timeline, _out, _temp) = run("quit\ntext never\n");
        assert!(timeline.store().is_empty());
    }

    #[test]
    fn test_export_writes_file() {
        let (_timeline, out, temp) = run("text hello\ndone\nexport\n");
        let written = fs::read_to_string(temp.path().join("timeline-export.txt")).unwrap();
        assert_eq!(written, "Timeline Export\n\n[1993-01-01]\nhello\n\n");
        assert!(out.contains("exported to"));
    }

    #[test]
    fn test_failed_export_does_not_stop_session() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("no/such/dir");
        let mut timeline = Timeline::load(Config::default(), InMemoryRepository::new());
        let mut out = Vec::new();

        run_shell(
            &mut timeline,
            "export\ntext after\n".as_bytes(),
            &mut out,
            &missing,
        )
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("error: cannot write "));
        assert_eq!(timeline.store().len(), 1);
        assert_eq!(timeline.input_value(), "after");
    }

    #[test]
    fn test_ignored_outcomes_reported() {
        let (_timeline, out, _temp) = run("edit 12345\nreadonly\ntext x\nadd\n");
        assert!(out.contains("ignored: no entry with id 12345"));
        assert!(out.contains("ignored: timeline is read-only"));
        assert!(out.contains("ignored: not available in this timeline"));
    }

    #[test]
    fn test_status_line() {
        let (_timeline, out, _temp) = run("status\n");
        assert_eq!(
            out,
            "date=1993-01-01 editing=none input=\"\" sort=asc read-only=false theme=light\n"
        );
    }
}
