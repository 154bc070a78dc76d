//! Error types for series loading, sample file I/O and export

use thiserror::Error;

/// Errors that can occur while loading, importing or exporting samples
#[derive(Error, Debug)]
pub enum WaveError {
    /// Series shorter than the minimum drawable length
    #[error("Not enough samples: got {count}, need at least {min}")]
    TooFewSamples { count: usize, min: usize },

    /// A sample lies outside [-1, 0] x [0, 1]
    #[error("Sample {index} out of range: ({neg}, {pos})")]
    InvalidRange { index: usize, neg: f32, pos: f32 },

    /// Input was truncated to the maximum series length (non-fatal)
    #[error("File is too big, kept the first {kept} samples")]
    FileTooBig { kept: usize },

    /// Malformed line in a sample file
    #[error("Invalid line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },

    /// Unexpected read/write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Export attempted with fewer than two selected samples
    #[error("Selection has {count} samples, at least 2 are required")]
    NoSelection { count: usize },
}

/// Result type for wavecut operations
pub type WaveResult<T> = Result<T, WaveError>;
