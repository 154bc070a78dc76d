//! Exporting a selected range to a new sample file
//!
//! Files are written to a directory (by default the user's downloads folder)
//! as `audiowave-<unix millis>.txt`. A name that is already taken is never
//! overwritten; a fresh timestamp is tried instead.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::{WaveError, WaveResult};
use crate::selection::SelectedRange;
use crate::series::Sample;
use crate::text_format::write_samples;

/// Prefix of exported file names
pub const EXPORT_FILE_PREFIX: &str = "audiowave-";

/// How many names to try before giving up
const MAX_NAME_ATTEMPTS: u32 = 16;

/// Result of an export
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// File written at this path
    Success(PathBuf),
    /// Anything went wrong; carries a description
    Error(String),
}

impl ExportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Reject selections too small to export (fewer than 2 samples)
pub fn ensure_exportable(range: &SelectedRange) -> WaveResult<&[Sample]> {
    if range.len() < 2 {
        return Err(WaveError::NoSelection { count: range.len() });
    }
    Ok(range.samples())
}

/// Default export directory: downloads, then home, then the working directory
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `audiowave-<millis>.txt`, with an attempt counter appended after the first try
fn export_file_name(attempt: u32) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    if attempt == 0 {
        format!("{}{}.txt", EXPORT_FILE_PREFIX, millis)
    } else {
        format!("{}{}-{}.txt", EXPORT_FILE_PREFIX, millis, attempt)
    }
}

/// Create a new, previously non-existent file in `dir`
fn create_unique_file(dir: &Path) -> io::Result<(PathBuf, File)> {
    let mut last_err = None;
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(export_file_name(attempt));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                log::debug!("create_unique_file: {:?} exists, retrying", path);
                last_err = Some(e);
            }
            Err(e) => return Err(e),
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::other("no file name available")))
}

fn try_export(dir: &Path, samples: &[Sample]) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let (path, file) = create_unique_file(dir)?;
    if let Err(e) = write_samples(BufWriter::new(file), samples) {
        // Don't leave a partial file behind
        let _ = fs::remove_file(&path);
        return Err(e);
    }
    Ok(path)
}

/// Write `samples` to a new file in `dir`
pub fn export_samples(dir: &Path, samples: &[Sample]) -> ExportOutcome {
    log::info!("export_samples: Exporting {} samples to {:?}", samples.len(), dir);
    match try_export(dir, samples) {
        Ok(path) => {
            log::info!("export_samples: Wrote {:?}", path);
            ExportOutcome::Success(path)
        }
        Err(e) => {
            log::error!("export_samples: Failed to export to {:?}: {}", dir, e);
            ExportOutcome::Error(e.to_string())
        }
    }
}
