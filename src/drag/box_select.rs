//! Box Select Drag Tracker
//!
//! Handles rectangular selection in viewport space.

use crate::math::{Rect, Vec2};

/// Tracks a box selection drag operation
#[derive(Debug, Clone)]
pub struct BoxSelectTracker {
    /// Pointer position when the drag started (corner of box)
    pub start: Vec2,
    /// Current pointer position (opposite corner)
    pub current: Vec2,
}

impl BoxSelectTracker {
    pub fn new(start: Vec2) -> Self {
        Self {
            start,
            current: start,
        }
    }

    pub fn update(&mut self, current: Vec2) {
        self.current = current;
    }

    /// Normalized selection rectangle
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.start, self.current)
    }

    /// The box is only drawn once the pointer moved past `threshold` pixels
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.start.distance(self.current) > threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect() {
        let mut tracker = BoxSelectTracker::new(Vec2::new(100.0, 100.0));
        tracker.update(Vec2::new(50.0, 150.0)); // Dragged left and down

        let r = tracker.rect();
        assert!((r.x - 50.0).abs() < 0.001);
        assert!((r.y - 100.0).abs() < 0.001);
        assert!((r.right() - 100.0).abs() < 0.001);
        assert!((r.bottom() - 150.0).abs() < 0.001);
    }

    #[test]
    fn test_visibility_threshold() {
        let mut tracker = BoxSelectTracker::new(Vec2::new(0.0, 0.0));
        tracker.update(Vec2::new(6.0, 8.0));
        assert!(!tracker.is_visible(10.0));
        tracker.update(Vec2::new(6.0, 9.0));
        assert!(tracker.is_visible(10.0));
    }
}
