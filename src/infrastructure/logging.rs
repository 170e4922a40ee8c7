//! File logging bootstrap.
//!
//! Logs rotate by size under `.timeline/logs/`. Initialization happens at most
//! once per process; a second call for the same directory is a no-op and a
//! call for a different directory is rejected.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const LOG_FILE_BASENAME: &str = "timeline";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const SUPPORTED_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

static LOGGING_STATE: OnceLock<LoggingState> = OnceLock::new();

struct LoggingState {
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Start file logging at `level` into `log_dir`.
///
/// # Errors
/// - unsupported level
/// - directory cannot be created or logger backend fails to start
/// - logging was already started for another directory
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), String> {
    let level = normalize_level(level)?;

    if let Some(state) = LOGGING_STATE.get() {
        return check_same_dir(state, log_dir);
    }

    std::fs::create_dir_all(log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            log_dir.display()
        )
    })?;

    let logger = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::Direct)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    let state = LOGGING_STATE.get_or_init(|| LoggingState {
        log_dir: log_dir.to_path_buf(),
        _logger: logger,
    });

    info!(
        "event=app_start module=logging status=ok level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );

    check_same_dir(state, log_dir)
}

/// Directory logging writes to, if started
pub fn log_dir() -> Option<PathBuf> {
    LOGGING_STATE.get().map(|state| state.log_dir.clone())
}

fn check_same_dir(state: &LoggingState, log_dir: &Path) -> Result<(), String> {
    if state.log_dir == log_dir {
        Ok(())
    } else {
        Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            state.log_dir.display(),
            log_dir.display()
        ))
    }
}

/// Canonical lowercase name of a supported log level
pub fn normalize_level(level: &str) -> Result<&'static str, String> {
    let lowered = level.trim().to_ascii_lowercase();
    SUPPORTED_LEVELS
        .iter()
        .find(|candidate| **candidate == lowered)
        .copied()
        .ok_or_else(|| {
            format!(
                "unsupported log level `{}`; expected one of {}",
                level,
                SUPPORTED_LEVELS.join(", ")
            )
        })
}
