//! Interactive range selection
//!
//! `SelectionModel` owns the loaded series, the viewport, and two selector
//! positions in pixel space. Pointer events move the selectors under a small
//! drag state machine; releasing the pointer projects the selector pixels
//! back onto sample indices and commits the result.
//!
//! ## Geometry
//!
//! ```text
//!  0        left_x  left_x+sw                right_x  right_x+sw      W
//!  |  unselected |##|   selected samples   |##|  unselected  |
//!                 ^ left selector                ^ right selector
//! ```
//!
//! Invariants kept after every event:
//! - `0 <= left_x <= right_x - sw - min_selection_width`
//! - `right_x <= W - sw`
//!
//! The model is synchronous and single-threaded; each handler runs to
//! completion before the next event.

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::error::WaveResult;
use crate::geometry::{clamp, Viewport};
use crate::render::{self, DrawCommands, EditorStyle, WaveformPath};
use crate::series::{Sample, SampleSeries, MIN_POINTS};

/// Selector sizes in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorMetrics {
    /// Width of the selector bar
    pub width: f32,
    /// Side of the square grip drawn next to each bar
    pub grip: f32,
    /// Extra hit area on each side of a selector
    pub touch_area: f32,
    /// Minimum gap between the two selectors
    pub min_selection_width: f32,
}

impl Default for SelectorMetrics {
    fn default() -> Self {
        Self {
            width: 2.0,
            grip: 8.0,
            touch_area: 16.0,
            min_selection_width: 50.0,
        }
    }
}

/// Which selector (if any) a gesture is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragTarget {
    #[default]
    None,
    Left,
    Right,
}

/// Selector positions plus drag bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionState {
    pub left_x: f32,
    pub right_x: f32,
    pub dragging: DragTarget,
    /// Pointer x the last move was measured from (bound-clamped)
    pub last_touch_x: Option<f32>,
}

impl SelectionState {
    /// Full-width selection for a viewport
    pub fn full_width(viewport: Viewport, metrics: &SelectorMetrics) -> Self {
        let right_x = if viewport.width > 0.0 {
            viewport.width - metrics.width
        } else {
            0.0
        };
        Self {
            left_x: 0.0,
            right_x,
            dragging: DragTarget::None,
            last_touch_x: None,
        }
    }
}

/// Committed selection: an inclusive index range and the samples in it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectedRange {
    indices: Option<RangeInclusive<usize>>,
    samples: Vec<Sample>,
}

impl SelectedRange {
    /// Nothing explicitly selected
    pub fn empty() -> Self {
        Self::default()
    }

    fn from_series(series: &SampleSeries, indices: RangeInclusive<usize>) -> Self {
        Self {
            samples: series.slice(indices.clone()),
            indices: Some(indices),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Inclusive sample index range, `None` when empty
    pub fn indices(&self) -> Option<RangeInclusive<usize>> {
        self.indices.clone()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

/// Callback receiving each committed selection
pub type SelectionListener = Box<dyn FnMut(&SelectedRange)>;

/// Selection state machine over a loaded series
pub struct SelectionModel {
    series: Option<SampleSeries>,
    viewport: Viewport,
    metrics: SelectorMetrics,
    style: EditorStyle,
    state: SelectionState,
    selected: SelectedRange,
    /// Waveform contours for the current series + viewport
    path: Option<Arc<WaveformPath>>,
    listener: Option<SelectionListener>,
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::new(SelectorMetrics::default(), EditorStyle::default())
    }
}

impl fmt::Debug for SelectionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionModel")
            .field("samples", &self.series.as_ref().map(SampleSeries::len))
            .field("viewport", &self.viewport)
            .field("state", &self.state)
            .field("selected", &self.selected.indices)
            .finish()
    }
}

impl SelectionModel {
    pub fn new(metrics: SelectorMetrics, style: EditorStyle) -> Self {
        Self {
            series: None,
            viewport: Viewport::default(),
            metrics,
            style,
            state: SelectionState::default(),
            selected: SelectedRange::empty(),
            path: None,
            listener: None,
        }
    }

    /// Register the collaborator notified on every committed selection
    pub fn set_listener(&mut self, listener: SelectionListener) {
        self.listener = Some(listener);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Ingestion and layout
    // ─────────────────────────────────────────────────────────────────────

    /// Replace the series and reset the selection to full width
    ///
    /// Invalid input leaves the model untouched.
    pub fn load_series(&mut self, samples: Vec<Sample>) -> WaveResult<()> {
        let series = match SampleSeries::new(samples) {
            Ok(series) => series,
            Err(e) => {
                log::warn!("load_series: Rejected series: {}", e);
                return Err(e);
            }
        };

        log::info!("load_series: Loaded {} samples", series.len());
        self.series = Some(series);
        self.selected = SelectedRange::empty();
        self.reset_selection();
        Ok(())
    }

    /// Update the viewport; any change resets the selection
    ///
    /// A committed range is cleared too, since the handles that produced
    /// it no longer exist on screen.
    pub fn resize(&mut self, width: f32, height: f32) {
        let viewport = Viewport::new(width, height);
        if viewport == self.viewport {
            return;
        }

        log::debug!("resize: {}x{} -> {}x{}", self.viewport.width, self.viewport.height, width, height);
        self.viewport = viewport;
        self.selected = SelectedRange::empty();
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        self.state = SelectionState::full_width(self.viewport, &self.metrics);
        self.path = self
            .series
            .as_ref()
            .and_then(|series| render::build_path(series, self.viewport))
            .map(Arc::new);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Pointer handling
    // ─────────────────────────────────────────────────────────────────────

    /// Start a gesture; returns the selector it grabbed, if any
    ///
    /// The committed selection is cleared whether or not a selector is hit.
    pub fn pointer_down(&mut self, x: f32) -> DragTarget {
        let x = clamp(x, 0.0, self.viewport.width);
        self.selected = SelectedRange::empty();

        let sw = self.metrics.width;
        let touch = self.metrics.touch_area;
        let left = self.state.left_x;
        let right = self.state.right_x;

        // Left zone first: on overlap the left selector wins
        let target = if (left - touch..=left + sw + touch).contains(&x) {
            DragTarget::Left
        } else if (right - touch..=right + sw + touch).contains(&x) {
            DragTarget::Right
        } else {
            DragTarget::None
        };

        self.state.dragging = target;
        self.state.last_touch_x = Some(x);
        target
    }

    /// Move the active selector by the pointer delta, within its bounds
    ///
    /// The reference point is stored clamped to the same bounds, so motion
    /// past a bound is absorbed until the pointer comes back.
    pub fn pointer_move(&mut self, x: f32) {
        let Some(last) = self.state.last_touch_x else {
            return;
        };
        let x = clamp(x, 0.0, self.viewport.width);
        let sw = self.metrics.width;
        let min_width = self.metrics.min_selection_width;

        match self.state.dragging {
            DragTarget::None => {}
            DragTarget::Left => {
                let max = self.state.right_x - min_width - sw;
                self.state.left_x = clamp(self.state.left_x + (x - last), 0.0, max);
                self.state.last_touch_x = Some(clamp(x, 0.0, max));
            }
            DragTarget::Right => {
                let min = self.state.left_x + sw + min_width;
                let max = self.viewport.width - sw;
                self.state.right_x = clamp(self.state.right_x + (x - last), min, max);
                self.state.last_touch_x = Some(clamp(x, min, max));
            }
        }
    }

    /// End the gesture, commit and emit the selection
    pub fn pointer_up(&mut self) -> SelectedRange {
        self.state.dragging = DragTarget::None;
        self.state.last_touch_x = None;

        self.selected = self.project_selection();
        if let Some(indices) = self.selected.indices() {
            log::debug!(
                "pointer_up: Selected samples {}..={} of {}",
                indices.start(),
                indices.end(),
                self.series.as_ref().map_or(0, SampleSeries::len)
            );
        }

        if let Some(listener) = self.listener.as_mut() {
            listener(&self.selected);
        }
        self.selected.clone()
    }

    /// Pixel -> index projection of the current selector positions
    ///
    /// The left bound rounds up and the right bound rounds down, so the
    /// committed range is never wider than the handles on screen.
    fn project_selection(&self) -> SelectedRange {
        let Some(series) = self.series.as_ref() else {
            return SelectedRange::empty();
        };
        let width = self.viewport.width;
        if width == 0.0 || series.len() < MIN_POINTS {
            return SelectedRange::empty();
        }

        let right_edge = self.state.right_x + self.metrics.width;
        if self.state.left_x == 0.0 && right_edge == width {
            return SelectedRange::empty();
        }

        let (left_index, right_index) =
            project_indices(self.state.left_x, right_edge, width, series.len());
        if left_index >= right_index {
            SelectedRange::empty()
        } else {
            SelectedRange::from_series(series, left_index..=right_index)
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Read access
    // ─────────────────────────────────────────────────────────────────────

    /// Draw commands for the current state, `None` when there is nothing to draw
    pub fn render(&self) -> Option<DrawCommands> {
        let path = self.path.as_ref()?;
        Some(render::render(
            Arc::clone(path),
            self.viewport,
            &self.state,
            &self.metrics,
            &self.style,
        ))
    }

    pub fn selection_state(&self) -> &SelectionState {
        &self.state
    }

    /// Last committed selection (empty while a gesture is in progress)
    pub fn selected_range(&self) -> &SelectedRange {
        &self.selected
    }

    pub fn series(&self) -> Option<&SampleSeries> {
        self.series.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn metrics(&self) -> &SelectorMetrics {
        &self.metrics
    }
}

/// Map selector pixel edges to `(left_index, right_index)`
///
/// `step = width / (count - 1)`; left is `ceil(left_x / step)`, right is
/// `floor(right_edge / step)` capped to the last sample.
pub fn project_indices(left_x: f32, right_edge: f32, width: f32, count: usize) -> (usize, usize) {
    let last = count.saturating_sub(1);
    let step = width / last as f32;
    let left_index = (left_x / step).ceil().max(0.0) as usize;
    let right_index = ((right_edge / step).floor().max(0.0) as usize).min(last);
    (left_index, right_index)
}
