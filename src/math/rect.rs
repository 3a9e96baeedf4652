//! Rectangle type for viewport-space hit tests

use super::Vec2;

/// A rectangle defined by position and size (viewport pixels, Y-down)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rectangle from two arbitrary corners (normalized min/max per axis)
    pub fn from_points(p0: Vec2, p1: Vec2) -> Self {
        let min = p0.min(p1);
        let max = p0.max(p1);
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Square of side `size` centered on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        Self::new(center.x - size * 0.5, center.y - size * 0.5, size, size)
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Half-open containment, used for UI hit tests (panel, move handle)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Closed containment, used for rectangle selection so points on the
    /// border are picked
    pub fn contains_inclusive(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Containing box of a point list. `None` for an empty list.
pub fn bounds_of(points: &[Vec2]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    let (min, max) = rest
        .iter()
        .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
    Some(Rect::from_points(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_normalizes() {
        let r = Rect::from_points(Vec2::new(100.0, 100.0), Vec2::new(50.0, 150.0));
        assert!((r.x - 50.0).abs() < 0.001);
        assert!((r.y - 100.0).abs() < 0.001);
        assert!((r.right() - 100.0).abs() < 0.001);
        assert!((r.bottom() - 150.0).abs() < 0.001);
    }

    #[test]
    fn test_contains_inclusive() {
        let r = Rect::from_points(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        assert!(r.contains_inclusive(Vec2::new(50.0, 50.0)));
        assert!(r.contains_inclusive(Vec2::new(0.0, 0.0)));
        assert!(r.contains_inclusive(Vec2::new(100.0, 100.0)));
        assert!(!r.contains_inclusive(Vec2::new(-1.0, 50.0)));
        assert!(!r.contains_inclusive(Vec2::new(101.0, 50.0)));

        // Half-open variant excludes the far edges
        assert!(!r.contains(Vec2::new(100.0, 50.0)));
    }

    #[test]
    fn test_bounds_of() {
        assert!(bounds_of(&[]).is_none());

        let b = bounds_of(&[
            Vec2::new(3.0, 1.0),
            Vec2::new(-1.0, 4.0),
            Vec2::new(2.0, -2.0),
        ])
        .unwrap();
        assert_eq!(b.min(), Vec2::new(-1.0, -2.0));
        assert_eq!(b.max(), Vec2::new(3.0, 4.0));
    }
}
