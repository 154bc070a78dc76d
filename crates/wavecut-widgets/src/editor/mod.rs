//! Waveform editor widget
//!
//! The widget holds no selection state of its own. It translates mouse and
//! touch input into `EditorEvent`s, which the application forwards to its
//! `SelectionModel` with `EditorEvent::apply`, and draws whatever
//! `DrawCommands` the model last produced.
//!
//! ```ignore
//! fn view(&self) -> Element<Message> {
//!     waveform_editor(self.model.render(), self.model.viewport(), Message::Editor)
//! }
//!
//! fn update(&mut self, message: Message) {
//!     if let Message::Editor(event) = message {
//!         if let Some(range) = event.apply(&mut self.model) {
//!             self.selection = range;
//!         }
//!     }
//! }
//! ```

mod canvas;
mod view;

pub use canvas::{EditorCanvas, EditorInteraction, PointerOwner};
pub use view::waveform_editor;

use wavecut_core::{SelectedRange, SelectionModel};

/// Input for the selection model, in canvas-local pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    /// Canvas bounds differ from the model's viewport
    Resized { width: f32, height: f32 },
    PointerDown(f32),
    PointerMove(f32),
    PointerUp,
}

impl EditorEvent {
    /// Forward to the model; returns the committed range on `PointerUp`
    pub fn apply(self, model: &mut SelectionModel) -> Option<SelectedRange> {
        match self {
            Self::Resized { width, height } => {
                model.resize(width, height);
                None
            }
            Self::PointerDown(x) => {
                model.pointer_down(x);
                None
            }
            Self::PointerMove(x) => {
                model.pointer_move(x);
                None
            }
            Self::PointerUp => Some(model.pointer_up()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavecut_core::{DragTarget, Sample};

    #[test]
    fn test_apply_drives_model() {
        let mut model = SelectionModel::default();
        EditorEvent::Resized {
            width: 100.0,
            height: 40.0,
        }
        .apply(&mut model);
        model.load_series(vec![Sample::new(-0.5, 0.5); 5]).unwrap();

        assert_eq!(EditorEvent::PointerDown(98.0).apply(&mut model), None);
        assert_eq!(model.selection_state().dragging, DragTarget::Right);
        EditorEvent::PointerMove(73.0).apply(&mut model);

        let range = EditorEvent::PointerUp.apply(&mut model).unwrap();
        // step = 25: right edge 75 -> index 3
        assert_eq!(range.indices(), Some(0..=3));
        assert_eq!(model.selection_state().dragging, DragTarget::None);
    }
}
