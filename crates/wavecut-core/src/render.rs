//! Waveform rendering to backend-agnostic draw commands
//!
//! Rendering is split in two steps:
//!
//! 1. `build_path`: series + viewport -> two closed contours. Only depends on
//!    data that changes on load/resize, so the selection model caches it.
//! 2. `render`: path + selection -> `DrawCommands`. Pure and cheap, run on
//!    every frame.
//!
//! A backend (see `wavecut-widgets`) fills the path once per band with the
//! band's clip rectangle applied, then strokes the selector marks.

use std::sync::Arc;

use crate::geometry::{Point, Rect, Rgba, Viewport};
use crate::selection::{DragTarget, SelectionState, SelectorMetrics};
use crate::series::{Sample, SampleSeries, MIN_POINTS};

/// Alpha of a selector that is not being dragged
pub const SELECTOR_IDLE_ALPHA: u8 = 170;

/// Colors used by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorStyle {
    pub background: Rgba,
    /// Fill of the selected band
    pub wave: Rgba,
    /// Fill of the bands outside the selection
    pub unselected_wave: Rgba,
    /// Selector color when active; idle selectors use `selector_idle_alpha`
    pub selector: Rgba,
    pub selector_idle_alpha: u8,
}

impl Default for EditorStyle {
    fn default() -> Self {
        Self {
            background: Rgba::DARK_GRAY,
            wave: Rgba::rgb(0x03, 0xda, 0xc5),
            unselected_wave: Rgba::GRAY,
            selector: Rgba::WHITE,
            selector_idle_alpha: SELECTOR_IDLE_ALPHA,
        }
    }
}

impl EditorStyle {
    /// Selector color derived from whether that selector is being dragged
    pub fn selector_color(&self, active: bool) -> Rgba {
        if active {
            self.selector
        } else {
            self.selector.with_alpha(self.selector_idle_alpha)
        }
    }
}

/// Upper and lower lobe contours, each a closed polygon
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformPath {
    pub upper: Vec<Point>,
    pub lower: Vec<Point>,
}

impl WaveformPath {
    pub fn contours(&self) -> [&[Point]; 2] {
        [&self.upper, &self.lower]
    }
}

/// Which part of the waveform a band covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandKind {
    UnselectedLeft,
    Selected,
    UnselectedRight,
}

/// The waveform path filled with one color inside a clip rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub kind: BandKind,
    pub clip: Rect,
    pub fill: Rgba,
}

/// A selector: vertical bar plus a square grip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorMark {
    pub line_start: Point,
    pub line_end: Point,
    pub stroke_width: f32,
    pub grip: Rect,
    pub color: Rgba,
    pub active: bool,
}

/// Everything needed to draw one frame of the editor
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommands {
    pub viewport: Viewport,
    pub background: Rgba,
    pub path: Arc<WaveformPath>,
    /// Non-empty bands, left to right
    pub bands: Vec<Band>,
    pub left_selector: SelectorMark,
    pub right_selector: SelectorMark,
}

/// Build both lobe contours by linear interpolation over `n - 1` segments
///
/// Returns `None` for a zero-width viewport or a too-short series.
pub fn build_path(series: &SampleSeries, viewport: Viewport) -> Option<WaveformPath> {
    let count = series.len();
    if viewport.width == 0.0 || count < MIN_POINTS {
        return None;
    }

    let width = viewport.width;
    let mid = viewport.midline();
    let step = width / (count - 1) as f32;

    let contour = |lobe: fn(&Sample) -> f32| -> Vec<Point> {
        let mut points = Vec::with_capacity(count + 2);
        points.push(Point::new(0.0, mid));
        points.extend(
            series
                .samples()
                .iter()
                .enumerate()
                .map(|(i, sample)| Point::new(i as f32 * step, mid - lobe(sample) * mid)),
        );
        points.push(Point::new(width, mid));
        points
    };

    Some(WaveformPath {
        upper: contour(|s| s.pos),
        // neg is <= 0, so this lands below the midline
        lower: contour(|s| s.neg),
    })
}

/// Lay out bands and selector marks for the current selection
pub fn render(
    path: Arc<WaveformPath>,
    viewport: Viewport,
    state: &SelectionState,
    metrics: &SelectorMetrics,
    style: &EditorStyle,
) -> DrawCommands {
    let width = viewport.width;
    let height = viewport.height;
    let sw = metrics.width;
    let left_edge = state.left_x + sw;
    let right_edge = state.right_x + sw;

    let mut bands = Vec::with_capacity(3);
    if state.left_x > 0.0 {
        bands.push(Band {
            kind: BandKind::UnselectedLeft,
            clip: Rect::new(0.0, 0.0, state.left_x, height),
            fill: style.unselected_wave,
        });
    }
    bands.push(Band {
        kind: BandKind::Selected,
        clip: Rect::new(left_edge, 0.0, state.right_x, height),
        fill: style.wave,
    });
    if right_edge < width {
        bands.push(Band {
            kind: BandKind::UnselectedRight,
            clip: Rect::new(right_edge, 0.0, width, height),
            fill: style.unselected_wave,
        });
    }
    bands.retain(|band| !band.clip.is_empty());

    let mark = |x: f32, grip: Rect, active: bool| SelectorMark {
        line_start: Point::new(x + sw / 2.0, 0.0),
        line_end: Point::new(x + sw / 2.0, height),
        stroke_width: sw,
        grip,
        color: style.selector_color(active),
        active,
    };

    let left_selector = mark(
        state.left_x,
        Rect::new(left_edge, 0.0, left_edge + metrics.grip, metrics.grip),
        state.dragging == DragTarget::Left,
    );
    let right_selector = mark(
        state.right_x,
        Rect::new(state.right_x - metrics.grip, height - metrics.grip, state.right_x, height),
        state.dragging == DragTarget::Right,
    );

    DrawCommands {
        viewport,
        background: style.background,
        path,
        bands,
        left_selector,
        right_selector,
    }
}
