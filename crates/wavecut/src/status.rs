//! User-facing status messages for file operations

use std::path::Path;

use wavecut_core::{ExportOutcome, ImportOutcome};

pub const OPEN_FAILED: &str = "Error occurred while opening file!";
pub const NO_SELECTION: &str = "Please choose a valid slice with at least 2 points!";
pub const WORKER_UNAVAILABLE: &str = "File worker is not running!";

/// Message for a finished import, `None` when it loaded cleanly
pub fn import_message(outcome: &ImportOutcome) -> Option<String> {
    match outcome {
        ImportOutcome::Success(_) => None,
        ImportOutcome::FileIsTooBig(_) => Some("File is too big, imported only part".to_string()),
        ImportOutcome::InvalidFile { .. } => Some("File is invalid!".to_string()),
        ImportOutcome::NotEnoughPoints { min_points, .. } => {
            Some(format!("File must have at least {} points!", min_points))
        }
        ImportOutcome::UnknownError(_) => {
            Some("Unknown error occurred while opening file!".to_string())
        }
    }
}

pub fn export_message(outcome: &ExportOutcome) -> String {
    match outcome {
        ExportOutcome::Success(path) => format!("Success! Saved {}", file_label(path)),
        ExportOutcome::Error(_) => "Error!".to_string(),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
