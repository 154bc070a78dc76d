//! iced widgets for wavecut
//!
//! - `waveform_editor`: view function returning the editor canvas
//! - `EditorEvent`: pointer/resize input to forward to a `SelectionModel`
//! - `theme`: color conversion and empty-state colors

pub mod editor;
pub mod theme;

pub use editor::{waveform_editor, EditorCanvas, EditorEvent, EditorInteraction, PointerOwner};
pub use theme::to_color;
