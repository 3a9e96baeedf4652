//! Viewport transform
//!
//! UV space has its origin at the workspace center with Y pointing up.
//! Viewport space is window pixels, origin top-left, Y pointing down.
//!
//! The forward mapping (`uv_to_viewport`) rounds to whole pixels, the inverse
//! does not. A round trip `viewport_to_uv(uv_to_viewport(p))` therefore only
//! recovers `p` to within `0.5 / scale` per axis, see
//! [`ViewportTransform::round_trip_tolerance`].

use crate::config::ViewerConfig;
use crate::math::{Rect, Vec2};

/// Snapshot of the UV <-> viewport mapping for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    /// Viewport position of UV (0, 0)
    center: Vec2,
    /// Pixels per UV unit (half the workspace extent)
    scale: f32,
}

impl ViewportTransform {
    /// `scale` must be positive; [`ViewportState`] guarantees this through zoom
    /// clamping.
    pub fn new(center: Vec2, scale: f32) -> Self {
        debug_assert!(scale > 0.0, "viewport scale must be positive");
        Self { center, scale }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// UV -> viewport: flip Y, scale, translate, snap to the nearest pixel
    pub fn uv_to_viewport(&self, uv: Vec2) -> Vec2 {
        (uv.flip_y() * self.scale + self.center).round()
    }

    /// Viewport -> UV: exact inverse of the unrounded forward mapping
    pub fn viewport_to_uv(&self, point: Vec2) -> Vec2 {
        ((point - self.center) / self.scale).flip_y()
    }

    /// Map a whole UV buffer, keeping indices aligned
    pub fn uvs_to_viewport(&self, uvs: &[Vec2]) -> Vec<Vec2> {
        uvs.iter().map(|uv| self.uv_to_viewport(*uv)).collect()
    }

    /// Largest per-axis error of a viewport round trip, in UV units
    pub fn round_trip_tolerance(&self) -> f32 {
        0.5 / self.scale
    }

    /// The square spanning UV -1..1 on both axes (the workspace background)
    pub fn workspace_rect(&self) -> Rect {
        Rect::centered(self.center, self.scale * 2.0)
    }
}

/// Pan, zoom and window layout that produce the per-frame transform
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    /// Pan offset in viewport pixels
    pub pan: Vec2,
    /// Zoom in percent, always within `min_zoom..=max_zoom`
    zoom: i32,
    min_zoom: i32,
    max_zoom: i32,
    default_zoom: i32,
    /// Window size in pixels
    window: Vec2,
    /// Height reserved at the top of the window for the preferences panel
    panel_height: f32,
    padding: f32,
}

impl ViewportState {
    pub fn new(config: &ViewerConfig) -> Self {
        // Guard against unvalidated configs so the scale stays positive
        let min_zoom = config.min_zoom.max(crate::config::MIN_ZOOM);
        let max_zoom = config.max_zoom.max(min_zoom);
        Self {
            pan: Vec2::ZERO,
            zoom: config.default_zoom.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            default_zoom: config.default_zoom.clamp(min_zoom, max_zoom),
            window: Vec2::ZERO,
            panel_height: config.panel_height(),
            padding: config.padding,
        }
    }

    pub fn zoom(&self) -> i32 {
        self.zoom
    }

    pub fn zoom_range(&self) -> (i32, i32) {
        (self.min_zoom, self.max_zoom)
    }

    pub fn window_size(&self) -> Vec2 {
        self.window
    }

    pub fn panel_height(&self) -> f32 {
        self.panel_height
    }

    /// Set the zoom percentage (clamped)
    pub fn set_zoom(&mut self, zoom: i32) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Change the zoom by a fractional amount of percent, truncating like an
    /// integer slider
    pub fn zoom_by(&mut self, amount: f32) {
        let target = (self.zoom as f32 + amount).clamp(self.min_zoom as f32, self.max_zoom as f32);
        self.zoom = target as i32;
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Scroll wheel: shifts the view diagonally and zooms out for positive deltas
    pub fn scroll(&mut self, delta: f32) {
        self.pan += Vec2::new(delta, delta);
        self.zoom_by(-delta);
    }

    /// Zoom drag: `delta` is previous pointer minus current pointer.
    /// Dragging right or down zooms in.
    pub fn zoom_drag(&mut self, delta: Vec2) {
        self.zoom_by(-(delta.x - delta.y));
    }

    /// Back to no pan and the default zoom
    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = self.default_zoom;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.window = Vec2::new(width.max(0.0), height.max(0.0));
    }

    pub fn set_panel_height(&mut self, height: f32) {
        self.panel_height = height.max(0.0);
    }

    /// Area of the window taken by the preferences panel
    pub fn panel_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.window.x, self.panel_height)
    }

    /// Side of the workspace square at the current zoom
    ///
    /// At 100% it is the largest square that fits below the panel, minus
    /// padding on both sides. Floored to one pixel so the scale never collapses.
    pub fn workspace_extent(&self) -> f32 {
        let available_h = self.window.y - self.panel_height;
        let fit = if self.window.x > available_h {
            available_h - self.padding * 2.0
        } else {
            self.window.x - self.padding * 2.0
        };
        fit.max(1.0) * (self.zoom as f32 / 100.0)
    }

    /// Workspace center: middle of the area below the panel, plus pan
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.window.x / 2.0, (self.window.y + self.panel_height) / 2.0) + self.pan
    }

    pub fn transform(&self) -> ViewportTransform {
        ViewportTransform::new(self.center(), self.workspace_extent() / 2.0)
    }
}
