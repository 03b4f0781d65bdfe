//! Logging initialization for intake_app.
//!
//! The log file path comes from `docintake.ron` (`log_file`), so the config
//! must be loaded before logging is set up. Log calls made before
//! initialization are dropped by the `log` facade, which is acceptable for
//! the config-load warnings.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Destination for log output.
#[allow(dead_code)]
pub enum LogDestination {
    /// Write to the configured log file.
    File,
    /// Write to terminal (stdout).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

impl LogDestination {
    fn to_terminal(&self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    fn to_file(&self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

/// Initialize the logger, truncating `log_path` when a file sink is wanted.
///
/// An unwritable log path degrades to a warning on stderr rather than an
/// error; the application runs without a file log in that case.
pub fn initialize(destination: LogDestination, log_path: &Path) {
    let level = LevelFilter::Info;
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        match File::create(log_path) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!(
                "Warning: could not create log file {}: {}",
                log_path.display(),
                err
            ),
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

#[cfg(test)]
mod tests {
    use super::{initialize, LogDestination};

    #[test]
    fn file_destination_creates_the_configured_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("custom.log");

        initialize(LogDestination::File, &path);

        assert!(path.exists());
    }

    #[test]
    fn unwritable_path_does_not_panic() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("no-such-dir").join("custom.log");

        initialize(LogDestination::File, &path);

        assert!(!path.exists());
    }
}
