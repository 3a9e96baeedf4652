//! UV kernel
//!
//! The explicit editing state machine: viewport, topology, selection, the
//! derived render geometry and the active gesture. Hosts call it from their
//! event loop:
//!
//! - `on_working_set_changed` when the set of edited meshes changes
//! - `on_resize` when the window size changes
//! - `handle_event` for every input event
//! - `refresh` + `geometry` before drawing
//!
//! Mutations mark the geometry dirty; `handle_event` rebuilds before it
//! returns so the host never draws a cache older than the last mutation.

use crate::config::ViewerConfig;
use crate::drag::{BoxSelectTracker, DragTranslator};
use crate::events::{EventKind, Key, MouseButton, PointerEvent};
use crate::geometry::RenderGeometry;
use crate::math::{Rect, Vec2};
use crate::mesh::{MeshHandle, UvChannel};
use crate::selection::{SelectMode, SelectOutcome, Selection};
use crate::topology::{build_all, SubmeshFilter, TopologyIndex};
use crate::viewport::{ViewportState, ViewportTransform};

/// Gesture currently driven by the pointer
#[derive(Debug, Clone)]
enum Interaction {
    Idle,
    Panning { last: Vec2, button: MouseButton },
    Zooming { last: Vec2 },
    BoxSelect(BoxSelectTracker),
    MovingUvs,
}

impl Interaction {
    /// Button that started the gesture; only its drag and release events
    /// continue or end it
    fn button(&self) -> Option<MouseButton> {
        match self {
            Interaction::Idle => None,
            Interaction::Panning { button, .. } => Some(*button),
            Interaction::Zooming { .. } => Some(MouseButton::Right),
            Interaction::BoxSelect(_) | Interaction::MovingUvs => Some(MouseButton::Left),
        }
    }
}

/// What an event changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The event started, continued or finished a gesture
    pub handled: bool,
    /// UVs were written back to at least one mesh; the host should mark the
    /// owning assets dirty
    pub uvs_changed: bool,
    /// Result of a committed rectangle pick
    pub selection: Option<SelectOutcome>,
}

/// Interactive UV viewer/editor state
#[derive(Debug, Clone)]
pub struct UvKernel {
    config: ViewerConfig,
    viewport: ViewportState,
    channel: UvChannel,
    submesh: SubmeshFilter,
    topologies: Vec<TopologyIndex>,
    selection: Selection,
    geometry: RenderGeometry,
    translator: DragTranslator,
    interaction: Interaction,
    dirty: bool,
}

impl UvKernel {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            viewport: ViewportState::new(&config),
            channel: config.channel,
            submesh: SubmeshFilter::All,
            topologies: Vec::new(),
            selection: Selection::default(),
            geometry: RenderGeometry::default(),
            translator: DragTranslator::default(),
            interaction: Interaction::Idle,
            dirty: true,
            config,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn transform(&self) -> ViewportTransform {
        self.viewport.transform()
    }

    pub fn channel(&self) -> UvChannel {
        self.channel
    }

    pub fn submesh(&self) -> SubmeshFilter {
        self.submesh
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn topologies(&self) -> &[TopologyIndex] {
        &self.topologies
    }

    /// Geometry from the last rebuild. Call `refresh` first if `is_dirty`.
    pub fn geometry(&self) -> &RenderGeometry {
        &self.geometry
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_dragging_uvs(&self) -> bool {
        matches!(self.interaction, Interaction::MovingUvs)
    }

    /// UV coordinate under a viewport point (for coordinate labels)
    pub fn uv_at(&self, point: Vec2) -> Vec2 {
        self.transform().viewport_to_uv(point)
    }

    /// Square handle on the selection centroid that starts a UV move.
    /// `None` when nothing is selected.
    pub fn move_handle_rect(&self) -> Option<Rect> {
        self.geometry
            .has_selection()
            .then(|| Rect::centered(self.geometry.centroid, self.config.move_handle_size))
    }

    /// Selection box being dragged, once it is large enough to draw
    pub fn box_select_rect(&self) -> Option<Rect> {
        match &self.interaction {
            Interaction::BoxSelect(tracker) if tracker.is_visible(self.config.drag_box_threshold) => {
                Some(tracker.rect())
            }
            _ => None,
        }
    }

    // ========================================================================
    // Host notifications
    // ========================================================================

    /// Replace the working set. Selections, topology and the instancing
    /// session all start over.
    pub fn on_working_set_changed<M: MeshHandle>(&mut self, meshes: &[M]) {
        log::info!("working set changed: {} meshes", meshes.len());
        self.translator.reset_session(meshes.len());
        self.interaction = Interaction::Idle;
        self.reload(meshes);
        self.refresh(meshes);
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        if self.viewport.window_size() != Vec2::new(width, height) {
            self.viewport.resize(width, height);
            self.dirty = true;
        }
    }

    /// Collapse or expand the preferences panel (changes the reserved height)
    pub fn set_show_preferences(&mut self, show: bool) {
        self.config.show_preferences = show;
        self.viewport.set_panel_height(self.config.panel_height());
        self.dirty = true;
    }

    pub fn set_panel_height(&mut self, height: f32) {
        self.viewport.set_panel_height(height);
        self.dirty = true;
    }

    /// Switch UV channel. Selections refer to the old channel and are cleared.
    pub fn set_channel<M: MeshHandle>(&mut self, meshes: &[M], channel: UvChannel) {
        if self.channel == channel {
            return;
        }
        self.channel = channel;
        self.config.channel = channel;
        self.reload(meshes);
        self.refresh(meshes);
    }

    /// Restrict picking and display to one submesh. Clears selections.
    pub fn set_submesh<M: MeshHandle>(&mut self, meshes: &[M], submesh: SubmeshFilter) {
        if self.submesh == submesh {
            return;
        }
        self.submesh = submesh;
        self.reload(meshes);
        self.refresh(meshes);
    }

    pub fn set_zoom(&mut self, zoom: i32) {
        self.viewport.set_zoom(zoom);
        self.dirty = true;
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.dirty = true;
    }

    pub fn select_all<M: MeshHandle>(&mut self, meshes: &[M]) {
        self.selection.select_all(&self.topologies);
        self.dirty = true;
        self.refresh(meshes);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.dirty = true;
    }

    /// Rebuild the render geometry if anything changed since the last rebuild.
    /// Returns whether a rebuild happened.
    pub fn refresh<M: MeshHandle>(&mut self, meshes: &[M]) -> bool {
        if !self.dirty {
            return false;
        }
        let transform = self.viewport.transform();
        self.geometry = RenderGeometry::rebuild(meshes, &self.topologies, &self.selection, &transform, self.channel);
        self.dirty = false;
        true
    }

    // ========================================================================
    // Event handling
    // ========================================================================

    /// Route one input event to the active gesture, then rebuild if needed
    pub fn handle_event<M: MeshHandle>(&mut self, meshes: &mut [M], event: PointerEvent) -> EventResponse {
        // The host is expected to report working-set changes; resync if it did not
        if meshes.len() != self.selection.mesh_count() {
            log::warn!(
                "working set size changed without notification ({} -> {})",
                self.selection.mesh_count(),
                meshes.len()
            );
            self.on_working_set_changed(meshes);
        }

        let response = match event.kind {
            EventKind::Down => self.pointer_down(meshes, &event),
            EventKind::Drag => self.pointer_drag(meshes, &event),
            EventKind::Up => self.pointer_up(meshes, &event),
            EventKind::Scroll { delta } => {
                self.viewport.scroll(delta);
                self.dirty = true;
                EventResponse { handled: true, ..Default::default() }
            }
            EventKind::Key(Key::ResetView) => {
                self.reset_view();
                EventResponse { handled: true, ..Default::default() }
            }
            EventKind::Key(Key::Other) => EventResponse::default(),
        };

        self.refresh(meshes);
        response
    }

    fn pointer_down<M: MeshHandle>(&mut self, meshes: &[M], event: &PointerEvent) -> EventResponse {
        // One gesture at a time; a second button is ignored until it ends
        if self.interaction.button().is_some() || self.viewport.panel_rect().contains(event.position) {
            return EventResponse::default();
        }
        // Make sure the move handle reflects the latest state before hit-testing it
        self.refresh(meshes);

        let alt = event.modifiers.alt;
        self.interaction = match event.button {
            MouseButton::Middle => Interaction::Panning { last: event.position, button: MouseButton::Middle },
            MouseButton::Left if alt => Interaction::Panning { last: event.position, button: MouseButton::Left },
            MouseButton::Right if alt => Interaction::Zooming { last: event.position },
            MouseButton::Right => return EventResponse::default(),
            MouseButton::Left => {
                let on_handle = self
                    .move_handle_rect()
                    .is_some_and(|handle| handle.contains(event.position));
                if on_handle && !event.modifiers.any() {
                    self.translator.begin(event.position);
                    Interaction::MovingUvs
                } else {
                    Interaction::BoxSelect(BoxSelectTracker::new(event.position))
                }
            }
        };
        EventResponse { handled: true, ..Default::default() }
    }

    fn pointer_drag<M: MeshHandle>(&mut self, meshes: &mut [M], event: &PointerEvent) -> EventResponse {
        if self.interaction.button() != Some(event.button) {
            return EventResponse::default();
        }
        let mut response = EventResponse { handled: true, ..Default::default() };
        if self.is_dragging_uvs() {
            response.uvs_changed = self.move_selection(meshes, event.position);
            return response;
        }
        match &mut self.interaction {
            Interaction::Idle | Interaction::MovingUvs => return EventResponse::default(),
            Interaction::Panning { last, .. } => {
                let delta = event.position - *last;
                *last = event.position;
                self.viewport.pan_by(delta);
                self.dirty = true;
            }
            Interaction::Zooming { last } => {
                let delta = *last - event.position;
                *last = event.position;
                self.viewport.zoom_drag(delta);
                self.dirty = true;
            }
            Interaction::BoxSelect(tracker) => {
                tracker.update(event.position);
            }
        }
        response
    }

    fn pointer_up<M: MeshHandle>(&mut self, meshes: &mut [M], event: &PointerEvent) -> EventResponse {
        if self.interaction.button() != Some(event.button) {
            return EventResponse::default();
        }
        let interaction = std::mem::replace(&mut self.interaction, Interaction::Idle);
        let mut response = EventResponse { handled: true, ..Default::default() };
        match interaction {
            Interaction::Idle => return EventResponse::default(),
            Interaction::Panning { last, .. } => {
                self.viewport.pan_by(event.position - last);
                self.dirty = true;
            }
            Interaction::Zooming { last } => {
                self.viewport.zoom_drag(last - event.position);
                self.dirty = true;
            }
            Interaction::BoxSelect(mut tracker) => {
                tracker.update(event.position);
                let mode = if event.modifiers.shift { SelectMode::Toggle } else { SelectMode::Replace };
                response.selection = Some(self.commit_box_select(meshes, tracker.rect(), mode));
            }
            Interaction::MovingUvs => {
                response.uvs_changed = self.move_selection(meshes, event.position);
                self.translator.end();
                self.dirty = true;
            }
        }
        response
    }

    fn commit_box_select<M: MeshHandle>(&mut self, meshes: &[M], rect: Rect, mode: SelectMode) -> SelectOutcome {
        // Picking tests against the points the user is looking at
        self.refresh(meshes);
        let points: Vec<Vec<Vec2>> = self.geometry.meshes.iter().map(|g| g.points.clone()).collect();
        let outcome = self.selection.select_rect(&points, &self.topologies, rect, mode);
        if outcome == SelectOutcome::Reset {
            log::debug!("empty selection box, reloading working set");
            self.reload(meshes);
        }
        self.dirty = true;
        outcome
    }

    fn move_selection<M: MeshHandle>(&mut self, meshes: &mut [M], position: Vec2) -> bool {
        let transform = self.viewport.transform();
        let delta = self.translator.update(position, &transform, meshes, &self.topologies, &self.selection, self.channel);
        if delta == Vec2::ZERO || self.selection.is_empty() {
            return false;
        }
        self.dirty = true;
        true
    }

    /// Rebuild topology for the current channel/submesh and clear selections
    fn reload<M: MeshHandle>(&mut self, meshes: &[M]) {
        self.topologies = build_all(meshes, self.channel, self.submesh);
        self.selection.reset(meshes.len());
        self.dirty = true;
    }
}
