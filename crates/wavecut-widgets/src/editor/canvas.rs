//! Canvas program for the waveform editor
//!
//! Input is single-pointer: the left mouse button or the first finger down
//! owns the gesture until it is released. Positions are reported relative to
//! the canvas origin and are not clamped here; the model clamps.
//!
//! A resize is published before any pointer input that arrives while the
//! canvas bounds and the model's viewport disagree. That input is queued
//! and replayed, in order, on the following updates.

use std::collections::VecDeque;

use iced::touch;
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Stroke};
use iced::{mouse, Color, Point, Rectangle, Size, Theme};
use wavecut_core::{DrawCommands, Point as CorePoint, Rect, SelectorMark, Viewport};

use super::EditorEvent;
use crate::theme::{to_color, EMPTY_BACKGROUND, EMPTY_MIDLINE};

/// Which pointer currently owns the gesture
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PointerOwner {
    #[default]
    Idle,
    Mouse,
    Finger(touch::Finger),
}

/// Canvas interaction state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorInteraction {
    pub owner: PointerOwner,
    /// Pointer input held back until a pending resize is applied
    pub deferred: VecDeque<EditorEvent>,
}

/// Canvas program drawing `DrawCommands` and reporting pointer input
pub struct EditorCanvas<Message, F>
where
    F: Fn(EditorEvent) -> Message,
{
    /// Latest frame from the model, `None` when there is nothing loaded
    pub commands: Option<DrawCommands>,
    /// Viewport the model currently uses
    pub viewport: Viewport,
    pub on_event: F,
}

impl<Message, F> Program<Message> for EditorCanvas<Message, F>
where
    Message: Clone,
    F: Fn(EditorEvent) -> Message,
{
    type State = EditorInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        next_event(interaction, self.viewport, event, bounds, cursor)
            .map(|editor_event| canvas::Action::publish((self.on_event)(editor_event)))
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if interaction.owner != PointerOwner::Idle {
            return mouse::Interaction::Grabbing;
        }
        let Some(position) = cursor.position_in(bounds) else {
            return mouse::Interaction::default();
        };
        match &self.commands {
            Some(commands) if near_selector(commands, position.x) => {
                mouse::Interaction::ResizingHorizontally
            }
            _ => mouse::Interaction::default(),
        }
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        let Some(commands) = &self.commands else {
            frame.fill_rectangle(Point::ORIGIN, bounds.size(), EMPTY_BACKGROUND);
            let mid = bounds.height / 2.0;
            frame.stroke(
                &Path::line(Point::new(0.0, mid), Point::new(bounds.width, mid)),
                Stroke::default().with_color(EMPTY_MIDLINE).with_width(1.0),
            );
            return vec![frame.into_geometry()];
        };

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), to_color(commands.background));

        // Clipped frames share the parent's coordinates, so the same
        // contours are filled untransformed inside every band
        let contours: Vec<Path> = contour_points(commands)
            .iter()
            .map(|points| contour_path(points))
            .collect();
        for (clip, fill) in band_layers(commands) {
            frame.with_clip(clip, |clipped| {
                for contour in &contours {
                    clipped.fill(contour, fill);
                }
            });
        }

        draw_selector(&mut frame, &commands.left_selector);
        draw_selector(&mut frame, &commands.right_selector);

        vec![frame.into_geometry()]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Input translation
// ─────────────────────────────────────────────────────────────────────────────

/// Decide what one iced event publishes, given the model's viewport
fn next_event(
    interaction: &mut EditorInteraction,
    viewport: Viewport,
    event: &Event,
    bounds: Rectangle,
    cursor: mouse::Cursor,
) -> Option<EditorEvent> {
    let translated = translate_event(&mut interaction.owner, event, bounds, cursor);

    if let Some(resized) = resize_event(viewport, bounds) {
        if let Some(pointer) = translated {
            log::debug!("next_event: Deferring {:?} until resize is applied", pointer);
            interaction.deferred.push_back(pointer);
        }
        return Some(resized);
    }

    match interaction.deferred.pop_front() {
        Some(replayed) => {
            interaction.deferred.extend(translated);
            Some(replayed)
        }
        None => translated,
    }
}

/// `Resized` when the canvas bounds no longer match the model's viewport
fn resize_event(viewport: Viewport, bounds: Rectangle) -> Option<EditorEvent> {
    if viewport.width == bounds.width && viewport.height == bounds.height {
        return None;
    }
    log::debug!(
        "resize_event: Canvas is {}x{}, model has {}x{}",
        bounds.width,
        bounds.height,
        viewport.width,
        viewport.height
    );
    Some(EditorEvent::Resized {
        width: bounds.width,
        height: bounds.height,
    })
}

/// Map one iced event to an editor event, tracking the owning pointer
fn translate_event(
    owner: &mut PointerOwner,
    event: &Event,
    bounds: Rectangle,
    cursor: mouse::Cursor,
) -> Option<EditorEvent> {
    match (*owner, event) {
        (PointerOwner::Idle, Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))) => {
            let position = cursor.position_in(bounds)?;
            *owner = PointerOwner::Mouse;
            log::trace!("translate_event: Mouse gesture started at {}", position.x);
            Some(EditorEvent::PointerDown(position.x))
        }
        (PointerOwner::Mouse, Event::Mouse(mouse::Event::CursorMoved { position })) => {
            Some(EditorEvent::PointerMove(position.x - bounds.x))
        }
        (PointerOwner::Mouse, Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)))
        | (PointerOwner::Mouse, Event::Mouse(mouse::Event::CursorLeft)) => {
            *owner = PointerOwner::Idle;
            Some(EditorEvent::PointerUp)
        }
        (PointerOwner::Idle, Event::Touch(touch::Event::FingerPressed { id, position })) => {
            if !bounds.contains(*position) {
                return None;
            }
            *owner = PointerOwner::Finger(*id);
            log::trace!("translate_event: {:?} owns the gesture", id);
            Some(EditorEvent::PointerDown(position.x - bounds.x))
        }
        (PointerOwner::Finger(finger), Event::Touch(touch::Event::FingerMoved { id, position }))
            if finger == *id =>
        {
            Some(EditorEvent::PointerMove(position.x - bounds.x))
        }
        (PointerOwner::Finger(finger), Event::Touch(touch::Event::FingerLifted { id, .. }))
        | (PointerOwner::Finger(finger), Event::Touch(touch::Event::FingerLost { id, .. }))
            if finger == *id =>
        {
            *owner = PointerOwner::Idle;
            Some(EditorEvent::PointerUp)
        }
        _ => None,
    }
}

/// Whether `x` is within grabbing distance of either selector bar
fn near_selector(commands: &DrawCommands, x: f32) -> bool {
    [&commands.left_selector, &commands.right_selector]
        .into_iter()
        .any(|mark| (mark.line_start.x - x).abs() <= mark.stroke_width / 2.0 + mark.grip.width())
}

// ─────────────────────────────────────────────────────────────────────────────
// Drawing helpers
// ─────────────────────────────────────────────────────────────────────────────

fn to_rectangle(rect: Rect) -> Rectangle {
    Rectangle::new(
        Point::new(rect.left, rect.top),
        Size::new(rect.width(), rect.height()),
    )
}

/// Both waveform contours in canvas coordinates
fn contour_points(commands: &DrawCommands) -> [Vec<Point>; 2] {
    commands
        .path
        .contours()
        .map(|contour| contour.iter().map(|p: &CorePoint| Point::new(p.x, p.y)).collect())
}

/// Clip rectangle and fill color of each band, left to right
fn band_layers(commands: &DrawCommands) -> Vec<(Rectangle, Color)> {
    commands
        .bands
        .iter()
        .map(|band| (to_rectangle(band.clip), to_color(band.fill)))
        .collect()
}

fn contour_path(points: &[Point]) -> Path {
    Path::new(|builder| {
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            builder.move_to(*first);
            for p in iter {
                builder.line_to(*p);
            }
            builder.close();
        }
    })
}

fn draw_selector(frame: &mut Frame, mark: &SelectorMark) {
    let color = to_color(mark.color);
    frame.stroke(
        &Path::line(
            Point::new(mark.line_start.x, mark.line_start.y),
            Point::new(mark.line_end.x, mark.line_end.y),
        ),
        Stroke::default().with_color(color).with_width(mark.stroke_width),
    );
    frame.fill_rectangle(
        Point::new(mark.grip.left, mark.grip.top),
        Size::new(mark.grip.width(), mark.grip.height()),
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavecut_core::{Sample, SelectionModel};

    fn bounds() -> Rectangle {
        Rectangle::new(Point::new(10.0, 20.0), Size::new(100.0, 40.0))
    }

    fn at(x: f32, y: f32) -> mouse::Cursor {
        mouse::Cursor::Available(Point::new(x, y))
    }

    fn press() -> Event {
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
    }

    fn moved(x: f32, y: f32) -> Event {
        Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(x, y),
        })
    }

    #[test]
    fn test_resize_reported_when_bounds_change() {
        assert_eq!(resize_event(Viewport::new(100.0, 40.0), bounds()), None);
        assert_eq!(
            resize_event(Viewport::default(), bounds()),
            Some(EditorEvent::Resized {
                width: 100.0,
                height: 40.0
            })
        );
    }

    #[test]
    fn test_press_during_resize_is_replayed() {
        let mut state = EditorInteraction::default();
        let stale = Viewport::new(80.0, 40.0);
        let current = Viewport::new(100.0, 40.0);

        // Press and a move arrive while the model still has the old size
        assert_eq!(
            next_event(&mut state, stale, &press(), bounds(), at(40.0, 30.0)),
            Some(EditorEvent::Resized {
                width: 100.0,
                height: 40.0
            })
        );
        assert!(matches!(
            next_event(&mut state, stale, &moved(50.0, 30.0), bounds(), at(50.0, 30.0)),
            Some(EditorEvent::Resized { .. })
        ));
        assert_eq!(state.owner, PointerOwner::Mouse);

        // Once the model caught up, queued input comes out in order on
        // events that publish nothing themselves
        let idle = Event::Mouse(mouse::Event::CursorEntered);
        assert_eq!(
            next_event(&mut state, current, &idle, bounds(), at(50.0, 30.0)),
            Some(EditorEvent::PointerDown(30.0))
        );
        assert_eq!(
            next_event(&mut state, current, &idle, bounds(), at(50.0, 30.0)),
            Some(EditorEvent::PointerMove(40.0))
        );
        assert_eq!(next_event(&mut state, current, &idle, bounds(), at(50.0, 30.0)), None);
        assert!(state.deferred.is_empty());
    }

    #[test]
    fn test_unrelated_event_during_resize_queues_nothing() {
        let mut state = EditorInteraction::default();
        let _ = next_event(
            &mut state,
            Viewport::default(),
            &moved(50.0, 30.0),
            bounds(),
            at(50.0, 30.0),
        );
        assert!(state.deferred.is_empty());
        assert_eq!(state.owner, PointerOwner::Idle);
    }

    #[test]
    fn test_mouse_gesture_is_canvas_local() {
        let mut owner = PointerOwner::Idle;
        assert_eq!(
            translate_event(&mut owner, &press(), bounds(), at(40.0, 30.0)),
            Some(EditorEvent::PointerDown(30.0))
        );
        assert_eq!(owner, PointerOwner::Mouse);

        // Moves outside the canvas still track
        assert_eq!(
            translate_event(&mut owner, &moved(150.0, 90.0), bounds(), at(150.0, 90.0)),
            Some(EditorEvent::PointerMove(140.0))
        );

        let release = Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left));
        assert_eq!(
            translate_event(&mut owner, &release, bounds(), at(150.0, 90.0)),
            Some(EditorEvent::PointerUp)
        );
        assert_eq!(owner, PointerOwner::Idle);
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut owner = PointerOwner::Idle;
        assert_eq!(translate_event(&mut owner, &press(), bounds(), at(5.0, 5.0)), None);
        assert_eq!(owner, PointerOwner::Idle);
    }

    #[test]
    fn test_idle_moves_are_ignored() {
        let mut owner = PointerOwner::Idle;
        assert_eq!(
            translate_event(&mut owner, &moved(50.0, 30.0), bounds(), at(50.0, 30.0)),
            None
        );
    }

    #[test]
    fn test_second_finger_is_ignored() {
        let mut owner = PointerOwner::Idle;
        let first = touch::Finger(1);
        let second = touch::Finger(2);

        let down = Event::Touch(touch::Event::FingerPressed {
            id: first,
            position: Point::new(60.0, 30.0),
        });
        assert_eq!(
            translate_event(&mut owner, &down, bounds(), mouse::Cursor::Unavailable),
            Some(EditorEvent::PointerDown(50.0))
        );

        let other_down = Event::Touch(touch::Event::FingerPressed {
            id: second,
            position: Point::new(30.0, 30.0),
        });
        let other_move = Event::Touch(touch::Event::FingerMoved {
            id: second,
            position: Point::new(35.0, 30.0),
        });
        assert_eq!(translate_event(&mut owner, &other_down, bounds(), mouse::Cursor::Unavailable), None);
        assert_eq!(translate_event(&mut owner, &other_move, bounds(), mouse::Cursor::Unavailable), None);

        let lifted = Event::Touch(touch::Event::FingerLifted {
            id: first,
            position: Point::new(70.0, 30.0),
        });
        assert_eq!(
            translate_event(&mut owner, &lifted, bounds(), mouse::Cursor::Unavailable),
            Some(EditorEvent::PointerUp)
        );
        assert_eq!(owner, PointerOwner::Idle);
    }

    #[test]
    fn test_to_rectangle() {
        let r = to_rectangle(Rect::new(2.0, 0.0, 98.0, 40.0));
        assert_eq!(r, Rectangle::new(Point::new(2.0, 0.0), Size::new(96.0, 40.0)));
    }

    #[test]
    fn test_bands_clip_the_waveform_in_place() {
        let mut model = SelectionModel::default();
        model.resize(400.0, 100.0);
        model.load_series(vec![Sample::new(-0.5, 0.5); 5]).unwrap();
        // Narrow from both sides so all three bands exist
        model.pointer_down(0.0);
        model.pointer_move(150.0);
        model.pointer_up();
        model.pointer_down(398.0);
        model.pointer_move(300.0);
        model.pointer_up();
        let commands = model.render().unwrap();

        // Filled contours span the full canvas, untranslated
        for contour in contour_points(&commands) {
            assert_eq!(contour.first().map(|p| p.x), Some(0.0));
            assert_eq!(contour.last().map(|p| p.x), Some(400.0));
        }
        assert_eq!(contour_points(&commands)[0][2], Point::new(100.0, 25.0));

        let layers = band_layers(&commands);
        let clips: Vec<(f32, f32)> = layers
            .iter()
            .map(|(clip, _)| (clip.x, clip.x + clip.width))
            .collect();
        assert_eq!(clips, vec![(0.0, 150.0), (152.0, 300.0), (302.0, 400.0)]);
        assert_eq!(layers[1].1, to_color(commands.bands[1].fill));
    }
}
