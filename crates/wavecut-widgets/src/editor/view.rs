use super::canvas::EditorCanvas;
use super::EditorEvent;
use iced::widget::Canvas;
use iced::{Element, Length};
use wavecut_core::{DrawCommands, Viewport};

/// Create the waveform editor element
///
/// # Arguments
///
/// * `commands` - Output of `SelectionModel::render()`
/// * `viewport` - The model's current viewport, used to detect resizes
/// * `on_event` - Called with every pointer or resize event for the model
///
/// # Example
///
/// ```ignore
/// let editor = waveform_editor(
///     self.model.render(),
///     self.model.viewport(),
///     Message::Editor,
/// );
/// ```
pub fn waveform_editor<'a, Message>(
    commands: Option<DrawCommands>,
    viewport: Viewport,
    on_event: impl Fn(EditorEvent) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    Canvas::new(EditorCanvas {
        commands,
        viewport,
        on_event,
    })
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
