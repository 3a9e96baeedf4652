//! Abstract input events
//!
//! The kernel never sees a GUI toolkit's event type. Hosts translate their
//! input into [`PointerEvent`]s and feed them to `UvKernel::handle_event`.

use crate::math::Vec2;

/// Modifier key state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false, alt: false };
    pub const ALT: Modifiers = Modifiers { shift: false, ctrl: false, alt: true };

    /// Check if any modifier is held
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Keys the kernel reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Restore pan and zoom (the `0` key)
    ResetView,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// Button pressed
    Down,
    /// Pointer moved with a button held
    Drag,
    /// Button released
    Up,
    /// Scroll wheel, positive = towards the user
    Scroll { delta: f32 },
    Key(Key),
}

/// One input event in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Vec2,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    pub kind: EventKind,
}

impl PointerEvent {
    pub fn new(kind: EventKind, position: Vec2, button: MouseButton) -> Self {
        Self {
            position,
            button,
            modifiers: Modifiers::NONE,
            kind,
        }
    }

    pub fn down(position: Vec2, button: MouseButton) -> Self {
        Self::new(EventKind::Down, position, button)
    }

    pub fn drag(position: Vec2, button: MouseButton) -> Self {
        Self::new(EventKind::Drag, position, button)
    }

    pub fn up(position: Vec2, button: MouseButton) -> Self {
        Self::new(EventKind::Up, position, button)
    }

    pub fn scroll(position: Vec2, delta: f32) -> Self {
        Self::new(EventKind::Scroll { delta }, position, MouseButton::Middle)
    }

    pub fn key(key: Key) -> Self {
        Self::new(EventKind::Key(key), Vec2::ZERO, MouseButton::Left)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers() {
        assert!(!Modifiers::NONE.any());
        assert!(Modifiers::SHIFT.any());
        assert!(Modifiers { ctrl: true, ..Default::default() }.any());
    }

    #[test]
    fn test_builders() {
        let e = PointerEvent::down(Vec2::new(3.0, 4.0), MouseButton::Right).with_modifiers(Modifiers::ALT);
        assert_eq!(e.kind, EventKind::Down);
        assert_eq!(e.button, MouseButton::Right);
        assert!(e.modifiers.alt);

        assert_eq!(PointerEvent::scroll(Vec2::ZERO, 1.0).kind, EventKind::Scroll { delta: 1.0 });
        assert_eq!(PointerEvent::key(Key::ResetView).kind, EventKind::Key(Key::ResetView));
    }
}
