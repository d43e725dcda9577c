//! Input events and the source that produces them.
//!
//! The simulation never polls devices itself. An `InputSource` hands it a
//! batch of discrete events once per frame; cursor updates are last-write-wins.

use crate::types::Point;
use crate::viewport::ScreenSize;
use macroquad::prelude::{
    KeyCode, MouseButton, get_keys_pressed, get_keys_released, is_mouse_button_pressed,
    is_mouse_button_released, mouse_position, screen_height, screen_width,
};

/// Keyboard commands understood by the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Control),
    KeyUp(Control),
    MouseDown(Button),
    MouseUp(Button),
    /// Cursor position in window pixels.
    CursorMoved { position: Point, screen: ScreenSize },
}

pub trait InputSource {
    /// Events that arrived since the previous call, in delivery order.
    fn poll(&mut self) -> Vec<InputEvent>;
}

const KEY_BINDINGS: [(KeyCode, Control); 8] = [
    (KeyCode::P, Control::ZoomIn),
    (KeyCode::M, Control::ZoomOut),
    (KeyCode::A, Control::PanLeft),
    (KeyCode::D, Control::PanRight),
    (KeyCode::W, Control::PanUp),
    (KeyCode::S, Control::PanDown),
    (KeyCode::Escape, Control::Quit),
    (KeyCode::Q, Control::Quit),
];

pub fn control_for_key(key: KeyCode) -> Option<Control> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, control)| *control)
}

/// Key transitions mapped to controls, presses before releases. Unbound keys are dropped.
pub fn key_events(
    pressed: impl IntoIterator<Item = KeyCode>,
    released: impl IntoIterator<Item = KeyCode>,
) -> Vec<InputEvent> {
    let down = pressed
        .into_iter()
        .filter_map(control_for_key)
        .map(InputEvent::KeyDown);
    let up = released
        .into_iter()
        .filter_map(control_for_key)
        .map(InputEvent::KeyUp);
    down.chain(up).collect()
}

/// Polls macroquad's per-frame input state.
#[derive(Debug, Default)]
pub struct MacroquadInput {
    last_sample: Option<(f32, f32, f32, f32)>,
}

impl MacroquadInput {
    pub fn new() -> Self {
        Default::default()
    }
}

impl InputSource for MacroquadInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        // Cursor first so a press in the same frame sees the fresh position
        let (x, y) = mouse_position();
        let sample = (x, y, screen_width(), screen_height());
        if self.last_sample != Some(sample) {
            self.last_sample = Some(sample);
            events.push(InputEvent::CursorMoved {
                position: Point::new(x as f64, y as f64),
                screen: ScreenSize::new(sample.2 as f64, sample.3 as f64),
            });
        }

        for (mq_button, button) in [
            (MouseButton::Left, Button::Primary),
            (MouseButton::Right, Button::Secondary),
        ] {
            if is_mouse_button_pressed(mq_button) {
                events.push(InputEvent::MouseDown(button));
            }
            if is_mouse_button_released(mq_button) {
                events.push(InputEvent::MouseUp(button));
            }
        }

        events.extend(key_events(get_keys_pressed(), get_keys_released()));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(control_for_key(KeyCode::P), Some(Control::ZoomIn));
        assert_eq!(control_for_key(KeyCode::M), Some(Control::ZoomOut));
        assert_eq!(control_for_key(KeyCode::A), Some(Control::PanLeft));
        assert_eq!(control_for_key(KeyCode::D), Some(Control::PanRight));
        assert_eq!(control_for_key(KeyCode::W), Some(Control::PanUp));
        assert_eq!(control_for_key(KeyCode::S), Some(Control::PanDown));
        assert_eq!(control_for_key(KeyCode::Escape), Some(Control::Quit));
        assert_eq!(control_for_key(KeyCode::Q), Some(Control::Quit));
        assert_eq!(control_for_key(KeyCode::Z), None);
    }

    #[test]
    fn test_key_events_map_bound_keys() {
        let events = key_events([KeyCode::W, KeyCode::Z], [KeyCode::P, KeyCode::Q]);
        assert_eq!(
            events,
            vec![
                InputEvent::KeyDown(Control::PanUp),
                InputEvent::KeyUp(Control::ZoomIn),
                InputEvent::KeyUp(Control::Quit),
            ]
        );
        assert!(key_events(Vec::new(), Vec::new()).is_empty());
    }
}
