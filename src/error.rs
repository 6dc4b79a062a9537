//! Error types for the picker, the roster collaborators and configuration.

use std::io;
use std::path::PathBuf;

/// Errors returned when starting a selection run.
#[derive(Debug, thiserror::Error)]
pub enum PickError {
    /// The roster has no names to pick from.
    #[error("roster is empty, import some names first")]
    EmptyRoster,
    /// Another run is still animating or settling.
    #[error("a selection run is already in progress")]
    RunInProgress,
    /// The worker thread could not be created.
    #[error("failed to spawn picker thread: {0}")]
    Spawn(#[source] io::Error),
}

/// Errors from loading, saving or importing a roster.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// Reading or writing a file failed.
    #[error("roster I/O error: {0}")]
    Io(#[from] io::Error),
    /// The stored roster is not a JSON array of strings.
    #[error("roster JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The import file could not be parsed.
    #[error("roster import error: {0}")]
    Csv(#[from] csv::Error),
    /// The import workbook could not be opened or read.
    #[error("roster workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    /// The import file contained no names.
    #[error("no names found in {}", .0.display())]
    NoNames(PathBuf),
}

/// Errors from validating a [`PickerConfig`](crate::PickerConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The total run duration is zero.
    #[error("total duration must be greater than zero")]
    ZeroDuration,
    /// The base tick interval is zero.
    #[error("base interval must be greater than zero")]
    ZeroInterval,
    /// A band starts at or past the total duration, band starts are not
    /// strictly increasing, or their increments decrease.
    #[error("band starts must be below the total duration, strictly increasing, with non-decreasing increments")]
    BandOrder,
}
