//! Move Drag Translator
//!
//! Translates the selected UVs of every working-set mesh by the pointer motion
//! of each frame. Only the previous pointer position is carried between
//! frames, so rounding error never accumulates past a single step.

use crate::math::Vec2;
use crate::mesh::{MeshHandle, UvChannel};
use crate::selection::{Selection, SelectionSet};
use crate::topology::TopologyIndex;
use crate::viewport::ViewportTransform;

/// Tracks a UV move drag
#[derive(Debug, Clone, Default)]
pub struct DragTranslator {
    /// Pointer position of the previous update (viewport space)
    anchor: Option<Vec2>,
    /// Meshes detached from shared buffers during this editing session
    instanced: Vec<bool>,
}

impl DragTranslator {
    pub fn new(mesh_count: usize) -> Self {
        Self {
            anchor: None,
            instanced: vec![false; mesh_count],
        }
    }

    /// Start a new editing session for a freshly loaded working set
    pub fn reset_session(&mut self, mesh_count: usize) {
        self.anchor = None;
        self.instanced = vec![false; mesh_count];
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    pub fn begin(&mut self, anchor: Vec2) {
        self.anchor = Some(anchor);
    }

    /// Move the selection by the pointer motion since the last update
    ///
    /// Returns the UV delta that was subtracted from every selected UV
    /// (`Vec2::ZERO` when no drag is active).
    pub fn update<M: MeshHandle>(
        &mut self,
        current: Vec2,
        transform: &ViewportTransform,
        meshes: &mut [M],
        topologies: &[TopologyIndex],
        selection: &Selection,
        channel: UvChannel,
    ) -> Vec2 {
        let Some(previous) = self.anchor else {
            return Vec2::ZERO;
        };

        let delta = transform.viewport_to_uv(previous) - transform.viewport_to_uv(current);
        self.anchor = Some(current);
        if delta == Vec2::ZERO {
            return delta;
        }

        for (i, mesh) in meshes.iter_mut().enumerate() {
            let (Some(topology), Some(set)) = (topologies.get(i), selection.get(i)) else {
                continue;
            };
            if !topology.is_valid() || set.is_empty() {
                continue;
            }
            self.ensure_instance(i, mesh);
            translate_uvs(mesh, topology, set, channel, delta);
        }

        delta
    }

    /// Finish the drag. Returns whether a drag was in progress.
    pub fn end(&mut self) -> bool {
        self.anchor.take().is_some()
    }

    /// Copy-on-first-write: detach a mesh from shared buffers before its
    /// first edit of the session
    fn ensure_instance<M: MeshHandle>(&mut self, mesh_index: usize, mesh: &mut M) {
        if mesh_index >= self.instanced.len() {
            self.instanced.resize(mesh_index + 1, false);
        }
        if self.instanced[mesh_index] {
            return;
        }
        if !mesh.is_instance() {
            log::info!("{}: instancing mesh before first UV edit", mesh.name());
            mesh.make_instance();
        }
        self.instanced[mesh_index] = true;
    }
}

/// Subtract `delta` from the selected UVs of one mesh and write the array back
/// through the mesh's setter
///
/// Returns false without touching the mesh when the channel is invalid or its
/// length no longer matches the topology.
pub fn translate_uvs<M: MeshHandle + ?Sized>(
    mesh: &mut M,
    topology: &TopologyIndex,
    selected: &SelectionSet,
    channel: UvChannel,
    delta: Vec2,
) -> bool {
    if !topology.is_valid() {
        return false;
    }
    let Some(uvs) = mesh.uvs(channel) else {
        return false;
    };
    if uvs.len() != topology.uv_len() {
        return false;
    }

    let mut uvs = uvs.to_vec();
    for index in selected.as_set() {
        if let Some(uv) = uvs.get_mut(*index as usize) {
            *uv -= delta;
        }
    }
    mesh.set_uvs(channel, uvs);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::SharedMesh;
    use crate::topology::{build_all, SubmeshFilter};

    fn transform() -> ViewportTransform {
        ViewportTransform::new(Vec2::new(100.0, 100.0), 50.0)
    }

    fn triangle() -> SharedMesh {
        SharedMesh::new(
            "tri",
            vec![0, 1, 2],
            vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
        )
    }

    fn select(mesh_count: usize, picks: &[(usize, u32)]) -> Selection {
        let mut selection = Selection::new(mesh_count);
        for (mesh, index) in picks {
            selection.get_mut(*mesh).unwrap().insert(*index);
        }
        selection
    }

    #[test]
    fn test_drag_moves_selected_uv() {
        let mut meshes = vec![triangle()];
        let topologies = build_all(&meshes, UvChannel::Primary, SubmeshFilter::All);
        let selection = select(1, &[(0, 1)]);
        let t = transform();

        let mut drag = DragTranslator::new(1);
        drag.begin(Vec2::new(150.0, 100.0));
        let delta = drag.update(Vec2::new(145.0, 100.0), &t, &mut meshes, &topologies, &selection, UvChannel::Primary);

        assert!((delta.x - 0.1).abs() < 1e-6 && delta.y.abs() < 1e-6);
        let uvs = meshes[0].uvs(UvChannel::Primary).unwrap();
        assert!((uvs[1].x - 0.9).abs() < 1e-6 && uvs[1].y.abs() < 1e-6);
        assert_eq!(uvs[0], Vec2::new(0.0, 0.0));
        assert_eq!(t.uv_to_viewport(uvs[1]), Vec2::new(145.0, 100.0));

        assert!(drag.end());
        assert!(!drag.is_active());
    }

    #[test]
    fn test_drag_there_and_back() {
        let mut meshes = vec![triangle()];
        let before = meshes[0].uvs(UvChannel::Primary).unwrap().to_vec();
        let topologies = build_all(&meshes, UvChannel::Primary, SubmeshFilter::All);
        let selection = select(1, &[(0, 0), (0, 2)]);
        let t = transform();

        let mut drag = DragTranslator::new(1);
        drag.begin(Vec2::new(100.0, 100.0));
        drag.update(Vec2::new(137.0, 81.0), &t, &mut meshes, &topologies, &selection, UvChannel::Primary);
        drag.update(Vec2::new(100.0, 100.0), &t, &mut meshes, &topologies, &selection, UvChannel::Primary);
        drag.end();

        let after = meshes[0].uvs(UvChannel::Primary).unwrap();
        for (a, b) in before.iter().zip(after) {
            assert!((a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5);
        }
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let original = triangle();
        let mut meshes = vec![original.clone()];
        let topologies = build_all(&meshes, UvChannel::Primary, SubmeshFilter::All);
        let selection = Selection::new(1);

        let mut drag = DragTranslator::new(1);
        drag.begin(Vec2::new(100.0, 100.0));
        drag.update(Vec2::new(140.0, 60.0), &transform(), &mut meshes, &topologies, &selection, UvChannel::Primary);

        assert_eq!(meshes[0], original);
        assert!(!meshes[0].is_instance());
    }

    #[test]
    fn test_invalid_channel_is_skipped() {
        let mut meshes = vec![triangle()];
        let topologies = build_all(&meshes, UvChannel::Secondary, SubmeshFilter::All);
        let selection = select(1, &[(0, 1)]);

        let mut drag = DragTranslator::new(1);
        drag.begin(Vec2::new(100.0, 100.0));
        drag.update(Vec2::new(140.0, 60.0), &transform(), &mut meshes, &topologies, &selection, UvChannel::Secondary);

        assert!(meshes[0].uvs(UvChannel::Secondary).is_none());
        assert!(!meshes[0].is_instance());
    }

    #[test]
    fn test_update_without_begin() {
        let mut meshes = vec![triangle()];
        let topologies = build_all(&meshes, UvChannel::Primary, SubmeshFilter::All);
        let selection = select(1, &[(0, 1)]);

        let mut drag = DragTranslator::new(1);
        let delta = drag.update(Vec2::new(10.0, 10.0), &transform(), &mut meshes, &topologies, &selection, UvChannel::Primary);
        assert_eq!(delta, Vec2::ZERO);
        assert!(!drag.end());
    }

    /// Counts `make_instance` calls on the way through to a `SharedMesh`
    struct CountingMesh {
        inner: SharedMesh,
        instance_calls: usize,
    }

    impl MeshHandle for CountingMesh {
        fn name(&self) -> &str {
            self.inner.name()
        }

        fn vertex_count(&self) -> usize {
            self.inner.vertex_count()
        }

        fn triangles(&self) -> &[u32] {
            self.inner.triangles()
        }

        fn uvs(&self, channel: UvChannel) -> Option<&[Vec2]> {
            self.inner.uvs(channel)
        }

        fn set_uvs(&mut self, channel: UvChannel, uvs: Vec<Vec2>) {
            self.inner.set_uvs(channel, uvs)
        }

        fn is_instance(&self) -> bool {
            self.inner.is_instance()
        }

        fn make_instance(&mut self) {
            self.instance_calls += 1;
            self.inner.make_instance();
        }
    }

    #[test]
    fn test_drag_moves_every_mesh() {
        let shared = triangle();
        let mut meshes = vec![
            CountingMesh { inner: shared.clone(), instance_calls: 0 },
            CountingMesh { inner: shared.clone(), instance_calls: 0 },
        ];
        let topologies = build_all(&meshes, UvChannel::Primary, SubmeshFilter::All);
        let selection = select(2, &[(0, 1), (1, 0), (1, 2)]);
        let t = transform();

        let mut drag = DragTranslator::new(2);
        drag.begin(Vec2::new(100.0, 100.0));
        drag.update(Vec2::new(110.0, 100.0), &t, &mut meshes, &topologies, &selection, UvChannel::Primary);
        drag.update(Vec2::new(120.0, 100.0), &t, &mut meshes, &topologies, &selection, UvChannel::Primary);
        drag.end();

        let a = meshes[0].uvs(UvChannel::Primary).unwrap();
        assert!((a[1].x - 1.4).abs() < 1e-5);
        assert_eq!(a[0], Vec2::new(0.0, 0.0));

        let b = meshes[1].uvs(UvChannel::Primary).unwrap();
        assert!((b[0].x - 0.4).abs() < 1e-5);
        assert!((b[2].x - 0.4).abs() < 1e-5 && (b[2].y - 1.0).abs() < 1e-5);
        assert_eq!(b[1], Vec2::new(1.0, 0.0));

        for mesh in &meshes {
            assert_eq!(mesh.instance_calls, 1);
            assert!(mesh.is_instance());
        }
        assert_eq!(shared.uvs(UvChannel::Primary).unwrap()[1], Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_copy_on_first_write() {
        let shared = triangle();
        let mut meshes = vec![shared.clone()];
        let topologies = build_all(&meshes, UvChannel::Primary, SubmeshFilter::All);
        let selection = select(1, &[(0, 1)]);
        let t = transform();

        let mut drag = DragTranslator::new(1);
        drag.begin(Vec2::new(150.0, 100.0));
        drag.update(Vec2::new(160.0, 100.0), &t, &mut meshes, &topologies, &selection, UvChannel::Primary);
        drag.update(Vec2::new(170.0, 100.0), &t, &mut meshes, &topologies, &selection, UvChannel::Primary);

        // The other user of the buffers never sees the edit
        assert_eq!(shared.uvs(UvChannel::Primary).unwrap()[1], Vec2::new(1.0, 0.0));
        assert!(meshes[0].is_instance());
        assert_eq!(meshes[0].name(), "uvee-tri");
        assert!((meshes[0].uvs(UvChannel::Primary).unwrap()[1].x - 1.4).abs() < 1e-5);
    }
}
