//! Sample series: the immutable source of truth for waveform shape
//!
//! A series is a validated, ordered list of amplitude pairs. Validation is
//! all-or-nothing: one bad sample rejects the whole input.

use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::error::{WaveError, WaveResult};

/// Minimum number of samples needed to draw a waveform
pub const MIN_POINTS: usize = 3;

/// Maximum number of samples kept from an import
pub const MAX_POINTS: usize = 500;

/// One time step of the waveform: lower and upper lobe amplitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Lower lobe, in [-1, 0]
    pub neg: f32,
    /// Upper lobe, in [0, 1]
    pub pos: f32,
}

impl Sample {
    pub const fn new(neg: f32, pos: f32) -> Self {
        Self { neg, pos }
    }

    /// Check both lobes against their ranges (NaN is never in range)
    pub fn is_in_range(&self) -> bool {
        (-1.0..=0.0).contains(&self.neg) && (0.0..=1.0).contains(&self.pos)
    }
}

impl From<(f32, f32)> for Sample {
    fn from((neg, pos): (f32, f32)) -> Self {
        Self::new(neg, pos)
    }
}

/// Validated, immutable sample sequence
///
/// Cloning is cheap (shared storage), so the series can be handed to
/// other threads or kept alongside a selection without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    samples: Arc<[Sample]>,
}

impl SampleSeries {
    /// Validate and wrap a list of samples
    ///
    /// Fails with `TooFewSamples` below `MIN_POINTS`, or `InvalidRange`
    /// naming the first sample outside [-1, 0] x [0, 1].
    pub fn new(samples: Vec<Sample>) -> WaveResult<Self> {
        if samples.len() < MIN_POINTS {
            return Err(WaveError::TooFewSamples {
                count: samples.len(),
                min: MIN_POINTS,
            });
        }

        if let Some((index, bad)) = samples
            .iter()
            .enumerate()
            .find(|(_, sample)| !sample.is_in_range())
        {
            return Err(WaveError::InvalidRange {
                index,
                neg: bad.neg,
                pos: bad.pos,
            });
        }

        Ok(Self {
            samples: samples.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed series
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Copy out an inclusive index range (caller guarantees bounds)
    pub fn slice(&self, range: RangeInclusive<usize>) -> Vec<Sample> {
        self.samples[range].to_vec()
    }
}
