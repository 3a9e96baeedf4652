//! Selection sets
//!
//! One set of selected UV indices per working-set mesh. Membership tests run
//! once per triangle corner on every rebuild, so a hash set is used rather
//! than a list.

use std::collections::HashSet;

use crate::math::{Rect, Vec2};
use crate::topology::TopologyIndex;

/// How a rectangle pick combines with the existing selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// Clear, then select what is inside the rectangle
    Replace,
    /// Flip membership of what is inside the rectangle (Shift held)
    Toggle,
}

/// Result of a rectangle pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Number of points inside the rectangle across the working set
    Selected(usize),
    /// A replace pick hit nothing; every selection was cleared as if the
    /// working set had been reloaded
    Reset,
}

/// Selected UV indices of a single mesh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    indices: HashSet<u32>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: u32) -> bool {
        self.indices.contains(&index)
    }

    pub fn insert(&mut self, index: u32) -> bool {
        self.indices.insert(index)
    }

    /// Add if absent, remove if present
    pub fn toggle(&mut self, index: u32) {
        if !self.indices.remove(&index) {
            self.indices.insert(index);
        }
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn as_set(&self) -> &HashSet<u32> {
        &self.indices
    }

    /// Selected indices in ascending order
    pub fn sorted(&self) -> Vec<u32> {
        let mut indices: Vec<u32> = self.indices.iter().copied().collect();
        indices.sort_unstable();
        indices
    }
}

impl FromIterator<u32> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

/// Selection state for the whole working set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    sets: Vec<SelectionSet>,
}

impl Selection {
    /// Empty selection for a working set of `mesh_count` meshes
    pub fn new(mesh_count: usize) -> Self {
        Self {
            sets: vec![SelectionSet::new(); mesh_count],
        }
    }

    pub fn mesh_count(&self) -> usize {
        self.sets.len()
    }

    pub fn get(&self, mesh: usize) -> Option<&SelectionSet> {
        self.sets.get(mesh)
    }

    pub fn get_mut(&mut self, mesh: usize) -> Option<&mut SelectionSet> {
        self.sets.get_mut(mesh)
    }

    pub fn contains(&self, mesh: usize, index: u32) -> bool {
        self.sets.get(mesh).is_some_and(|set| set.contains(index))
    }

    /// Selected points across all meshes
    pub fn total(&self) -> usize {
        self.sets.iter().map(SelectionSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(SelectionSet::is_empty)
    }

    /// Clear every set, keeping one entry per mesh
    pub fn clear(&mut self) {
        for set in &mut self.sets {
            set.clear();
        }
    }

    /// Discard everything and size for a new working set
    pub fn reset(&mut self, mesh_count: usize) {
        self.sets = vec![SelectionSet::new(); mesh_count];
    }

    /// Select every pickable point of every valid mesh
    pub fn select_all(&mut self, topologies: &[TopologyIndex]) {
        for (set, topology) in self.sets.iter_mut().zip(topologies) {
            set.clear();
            if topology.is_valid() {
                set.indices.extend(topology.selectable_indices());
            }
        }
    }

    /// Rectangle pick in viewport space
    ///
    /// `points[i]` holds the viewport positions of mesh i's UVs (index-aligned
    /// with its UV array). Only indices referenced by mesh i's triangles are
    /// candidates, each tested once with an inclusive bounds check. Invalid
    /// meshes are skipped and keep their (empty) set.
    pub fn select_rect(
        &mut self,
        points: &[Vec<Vec2>],
        topologies: &[TopologyIndex],
        rect: Rect,
        mode: SelectMode,
    ) -> SelectOutcome {
        let mut hits = 0;

        for (mesh, set) in self.sets.iter_mut().enumerate() {
            let (Some(topology), Some(mesh_points)) = (topologies.get(mesh), points.get(mesh)) else {
                continue;
            };
            if !topology.is_valid() {
                continue;
            }

            if mode == SelectMode::Replace {
                set.clear();
            }

            for index in topology.selectable_indices() {
                let Some(point) = mesh_points.get(index as usize) else {
                    continue;
                };
                if !rect.contains_inclusive(*point) {
                    continue;
                }
                hits += 1;
                match mode {
                    SelectMode::Replace => {
                        set.insert(index);
                    }
                    SelectMode::Toggle => set.toggle(index),
                }
            }
        }

        // An empty toggle pick leaves the selection alone; an empty replace
        // pick restores a fresh state instead of leaving stale selections
        if hits == 0 && mode == SelectMode::Replace {
            self.clear();
            return SelectOutcome::Reset;
        }
        SelectOutcome::Selected(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{MeshHandle, SharedMesh, UvChannel};
    use crate::topology::SubmeshFilter;
    use crate::viewport::ViewportTransform;

    fn triangle_setup() -> (Vec<Vec<Vec2>>, Vec<TopologyIndex>) {
        let mesh = SharedMesh::new(
            "tri",
            vec![0, 1, 2],
            vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
        );
        let t = ViewportTransform::new(Vec2::new(100.0, 100.0), 50.0);
        let points = vec![t.uvs_to_viewport(mesh.uvs(UvChannel::Primary).unwrap())];
        let topologies = vec![TopologyIndex::build(&mesh, UvChannel::Primary, SubmeshFilter::All)];
        (points, topologies)
    }

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        Rect::from_points(Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    #[test]
    fn test_replace_selects_inside() {
        let (points, topologies) = triangle_setup();
        let mut selection = Selection::new(1);

        let outcome = selection.select_rect(&points, &topologies, rect(140.0, 90.0, 160.0, 110.0), SelectMode::Replace);
        assert_eq!(outcome, SelectOutcome::Selected(1));
        assert_eq!(selection.get(0).unwrap().sorted(), vec![1]);
    }

    #[test]
    fn test_corners_in_any_order() {
        let (points, topologies) = triangle_setup();
        let mut selection = Selection::new(1);

        selection.select_rect(&points, &topologies, rect(160.0, 110.0, 140.0, 90.0), SelectMode::Replace);
        assert_eq!(selection.get(0).unwrap().sorted(), vec![1]);
    }

    #[test]
    fn test_inclusive_bounds() {
        let (points, topologies) = triangle_setup();
        let mut selection = Selection::new(1);

        // Point 1 sits exactly on the rectangle's left edge
        selection.select_rect(&points, &topologies, rect(150.0, 100.0, 170.0, 120.0), SelectMode::Replace);
        assert!(selection.contains(0, 1));
    }

    #[test]
    fn test_empty_replace_resets() {
        let (points, topologies) = triangle_setup();
        let mut selection = Selection::new(1);
        selection.get_mut(0).unwrap().insert(2);

        let outcome = selection.select_rect(&points, &topologies, rect(0.0, 0.0, 10.0, 10.0), SelectMode::Replace);
        assert_eq!(outcome, SelectOutcome::Reset);
        assert!(selection.is_empty());
        assert_eq!(selection.mesh_count(), 1);
    }

    #[test]
    fn test_empty_toggle_keeps_selection() {
        let (points, topologies) = triangle_setup();
        let mut selection = Selection::new(1);
        selection.get_mut(0).unwrap().insert(2);

        let outcome = selection.select_rect(&points, &topologies, rect(0.0, 0.0, 10.0, 10.0), SelectMode::Toggle);
        assert_eq!(outcome, SelectOutcome::Selected(0));
        assert_eq!(selection.get(0).unwrap().sorted(), vec![2]);
    }

    #[test]
    fn test_toggle_flips_membership() {
        let (points, topologies) = triangle_setup();
        let mut selection = Selection::new(1);
        selection.get_mut(0).unwrap().insert(0);

        // Covers points 0 (100,100) and 1 (150,100)
        let r = rect(90.0, 90.0, 160.0, 110.0);
        selection.select_rect(&points, &topologies, r, SelectMode::Toggle);
        assert_eq!(selection.get(0).unwrap().sorted(), vec![1]);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let (points, topologies) = triangle_setup();
        let mut selection = Selection::new(1);
        selection.get_mut(0).unwrap().insert(2);
        let before = selection.clone();

        let r = rect(0.0, 0.0, 200.0, 200.0);
        selection.select_rect(&points, &topologies, r, SelectMode::Toggle);
        assert_ne!(selection, before);
        selection.select_rect(&points, &topologies, r, SelectMode::Toggle);
        assert_eq!(selection, before);
    }

    #[test]
    fn test_replace_is_deterministic() {
        let (points, topologies) = triangle_setup();
        let r = rect(90.0, 40.0, 160.0, 110.0);

        let mut selection = Selection::new(1);
        selection.select_rect(&points, &topologies, r, SelectMode::Replace);
        let first = selection.clone();
        selection.select_rect(&points, &topologies, r, SelectMode::Replace);
        assert_eq!(selection, first);
        assert_eq!(selection.total(), 3);
    }

    #[test]
    fn test_shared_vertex_toggled_once() {
        // Vertex 1 and 2 are used by both triangles
        let mesh = SharedMesh::new(
            "quad",
            vec![0, 1, 2, 2, 1, 3],
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
            ],
        );
        let t = ViewportTransform::new(Vec2::new(100.0, 100.0), 50.0);
        let points = vec![t.uvs_to_viewport(mesh.uvs(UvChannel::Primary).unwrap())];
        let topologies = vec![TopologyIndex::build(&mesh, UvChannel::Primary, SubmeshFilter::All)];

        let mut selection = Selection::new(1);
        let outcome = selection.select_rect(&points, &topologies, rect(0.0, 0.0, 200.0, 200.0), SelectMode::Toggle);
        assert_eq!(outcome, SelectOutcome::Selected(4));
        assert_eq!(selection.get(0).unwrap().sorted(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_invalid_mesh_is_skipped() {
        let (mut points, mut topologies) = triangle_setup();
        points.push(Vec::new());
        topologies.push(TopologyIndex::invalid());

        let mut selection = Selection::new(2);
        let outcome = selection.select_rect(&points, &topologies, rect(0.0, 0.0, 200.0, 200.0), SelectMode::Replace);
        assert_eq!(outcome, SelectOutcome::Selected(3));
        assert!(selection.get(1).unwrap().is_empty());
    }

    #[test]
    fn test_select_all() {
        let (_points, topologies) = triangle_setup();
        let mut selection = Selection::new(1);
        selection.select_all(&topologies);
        assert_eq!(selection.total(), 3);
    }

    #[test]
    fn test_membership_scales() {
        let set: SelectionSet = (0..100_000u32).collect();
        let hits = (0..200_000u32).filter(|i| set.contains(*i)).count();
        assert_eq!(hits, 100_000);
    }
}
