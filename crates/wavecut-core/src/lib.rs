//! Wavecut Core - selection model, waveform rendering and sample file I/O
//!
//! Nothing in this crate depends on a GUI toolkit. Widgets feed pointer
//! events into `SelectionModel` and draw the `DrawCommands` it produces.

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod render;
pub mod selection;
pub mod series;
pub mod text_format;
pub mod worker;

pub use error::{WaveError, WaveResult};
pub use export::ExportOutcome;
pub use geometry::{Point, Rect, Rgba, Viewport};
pub use render::{Band, BandKind, DrawCommands, EditorStyle, SelectorMark, WaveformPath};
pub use selection::{DragTarget, SelectedRange, SelectionModel, SelectionState, SelectorMetrics};
pub use series::{Sample, SampleSeries, MAX_POINTS, MIN_POINTS};
pub use text_format::ImportOutcome;
pub use worker::{FileWorker, WorkerResult};
