//! Macroquad input -> kernel events
//!
//! Polls macroquad once per frame and emits the [`PointerEvent`]s the kernel
//! understands. Drag events are only emitted when the pointer actually moved.

use macroquad::prelude::{
    is_key_down, is_key_pressed, is_mouse_button_down, is_mouse_button_pressed, is_mouse_button_released,
    mouse_position, mouse_wheel, KeyCode, MouseButton as MqButton,
};
use uvee::{Key, Modifiers, MouseButton, PointerEvent, Vec2};

/// Scroll delta sent per wheel notch
const SCROLL_STEP: f32 = 3.0;

const BUTTONS: [(MqButton, MouseButton); 3] = [
    (MqButton::Left, MouseButton::Left),
    (MqButton::Right, MouseButton::Right),
    (MqButton::Middle, MouseButton::Middle),
];

/// Current modifier keys
pub fn modifiers() -> Modifiers {
    Modifiers {
        shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
        ctrl: is_key_down(KeyCode::LeftControl)
            || is_key_down(KeyCode::RightControl)
            || is_key_down(KeyCode::LeftSuper)
            || is_key_down(KeyCode::RightSuper),
        alt: is_key_down(KeyCode::LeftAlt) || is_key_down(KeyCode::RightAlt),
    }
}

/// Wheel movement to a kernel scroll delta (positive = towards the user)
pub fn scroll_delta(wheel_y: f32) -> f32 {
    if wheel_y == 0.0 {
        0.0
    } else {
        -wheel_y.signum() * SCROLL_STEP
    }
}

/// Frame-to-frame pointer tracking
#[derive(Debug, Default)]
pub struct InputCollector {
    last_position: Vec2,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events for this frame, in the order the kernel should see them
    pub fn poll(&mut self) -> Vec<PointerEvent> {
        let (x, y) = mouse_position();
        let position = Vec2::new(x, y);
        let moved = position != self.last_position;
        self.last_position = position;
        let mods = modifiers();

        let mut events = Vec::new();
        for (mq, button) in BUTTONS {
            if is_mouse_button_pressed(mq) {
                events.push(PointerEvent::down(position, button).with_modifiers(mods));
            } else if is_mouse_button_released(mq) {
                events.push(PointerEvent::up(position, button).with_modifiers(mods));
            } else if moved && is_mouse_button_down(mq) {
                events.push(PointerEvent::drag(position, button).with_modifiers(mods));
            }
        }

        let (_, wheel_y) = mouse_wheel();
        let delta = scroll_delta(wheel_y);
        if delta != 0.0 {
            events.push(PointerEvent::scroll(position, delta).with_modifiers(mods));
        }

        if is_key_pressed(KeyCode::Key0) || is_key_pressed(KeyCode::Kp0) {
            events.push(PointerEvent::key(Key::ResetView));
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_delta() {
        assert_eq!(scroll_delta(0.0), 0.0);
        // Wheel up (away from the user) zooms in
        assert_eq!(scroll_delta(1.0), -3.0);
        assert_eq!(scroll_delta(-120.0), 3.0);
    }
}
