//! Plain-text sample files
//!
//! One record per line, two numbers separated by a single space:
//!
//! ```text
//! -0.5 0.5
//! -0.25 0.75
//! -1 1
//! ```
//!
//! The first number is the lower lobe in [-1, 0], the second the upper lobe
//! in [0, 1]. No header, no trailing metadata. Import is all-or-nothing: one
//! malformed line rejects the whole file.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::error::WaveError;
use crate::series::{Sample, MAX_POINTS, MIN_POINTS};

/// Result of importing a sample file
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// All lines valid, count within limits
    Success(Vec<Sample>),
    /// More than `MAX_POINTS` records; carries the first `MAX_POINTS`
    FileIsTooBig(Vec<Sample>),
    /// Fewer than `min_points` records
    NotEnoughPoints { found: usize, min_points: usize },
    /// A line was malformed or out of range (1-based line number)
    InvalidFile { line: usize, reason: String },
    /// Unexpected read failure
    UnknownError(String),
}

impl ImportOutcome {
    /// Samples to display, for the outcomes that carry any
    pub fn samples(&self) -> Option<&[Sample]> {
        match self {
            Self::Success(samples) | Self::FileIsTooBig(samples) => Some(samples),
            _ => None,
        }
    }

    /// Convert into the error taxonomy (truncation counts as an error here)
    pub fn into_result(self) -> Result<Vec<Sample>, WaveError> {
        match self {
            Self::Success(samples) => Ok(samples),
            Self::FileIsTooBig(samples) => Err(WaveError::FileTooBig {
                kept: samples.len(),
            }),
            Self::NotEnoughPoints { found, min_points } => Err(WaveError::TooFewSamples {
                count: found,
                min: min_points,
            }),
            Self::InvalidFile { line, reason } => Err(WaveError::InvalidLine { line, reason }),
            Self::UnknownError(message) => Err(WaveError::Io(io::Error::other(message))),
        }
    }
}

/// Parse one record
fn parse_line(line: &str) -> Result<Sample, String> {
    let tokens: Vec<&str> = line.split(' ').collect();
    if tokens.len() != 2 {
        return Err(format!("expected 2 values, found {}", tokens.len()));
    }

    let neg: f32 = tokens[0]
        .parse()
        .map_err(|_| format!("not a number: {:?}", tokens[0]))?;
    let pos: f32 = tokens[1]
        .parse()
        .map_err(|_| format!("not a number: {:?}", tokens[1]))?;

    let sample = Sample::new(neg, pos);
    if !sample.is_in_range() {
        return Err(format!("values out of range: {} {}", neg, pos));
    }
    Ok(sample)
}

/// Parse a sample file from any buffered reader
pub fn parse_samples<R: BufRead>(reader: R) -> ImportOutcome {
    let mut samples = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return ImportOutcome::InvalidFile {
                    line: line_number,
                    reason: "not valid text".to_string(),
                };
            }
            Err(e) => {
                log::error!("parse_samples: Read failed at line {}: {}", line_number, e);
                return ImportOutcome::UnknownError(e.to_string());
            }
        };

        match parse_line(&line) {
            Ok(sample) => {
                if samples.len() == MAX_POINTS {
                    log::warn!("parse_samples: More than {} records, truncating", MAX_POINTS);
                    return ImportOutcome::FileIsTooBig(samples);
                }
                samples.push(sample);
            }
            Err(reason) => {
                log::warn!("parse_samples: Invalid line {}: {}", line_number, reason);
                return ImportOutcome::InvalidFile {
                    line: line_number,
                    reason,
                };
            }
        }
    }

    if samples.len() < MIN_POINTS {
        return ImportOutcome::NotEnoughPoints {
            found: samples.len(),
            min_points: MIN_POINTS,
        };
    }

    log::info!("parse_samples: Parsed {} samples", samples.len());
    ImportOutcome::Success(samples)
}

/// Open and parse a sample file
pub fn import_file(path: &Path) -> ImportOutcome {
    log::info!("import_file: Reading {:?}", path);
    match File::open(path) {
        Ok(file) => parse_samples(BufReader::new(file)),
        Err(e) => {
            log::error!("import_file: Failed to open {:?}: {}", path, e);
            ImportOutcome::UnknownError(e.to_string())
        }
    }
}

/// Write samples as `"<neg> <pos>"` lines, without a trailing newline
pub fn write_samples<W: Write>(mut writer: W, samples: &[Sample]) -> io::Result<()> {
    for (index, sample) in samples.iter().enumerate() {
        if index > 0 {
            writer.write_all(b"\n")?;
        }
        write!(writer, "{} {}", sample.neg, sample.pos)?;
    }
    writer.flush()
}
