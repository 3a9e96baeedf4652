//! Render geometry cache
//!
//! Everything the host draws, in viewport space. Rebuilt wholesale from the
//! working set, topology, selection and transform; never patched in place.

use crate::math::{bounds_of, Rect, Vec2};
use crate::mesh::{MeshHandle, UvChannel};
use crate::selection::Selection;
use crate::topology::TopologyIndex;
use crate::viewport::ViewportTransform;

/// A line segment in viewport space
pub type Edge = (Vec2, Vec2);

/// Drawable geometry of one working-set mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshGeometry {
    /// False when the active channel is not editable; all arrays are empty
    pub valid: bool,
    /// Every UV of the channel, index-aligned with the UV array
    pub points: Vec<Vec2>,
    /// Selected UVs, one per distinct selected index (ascending index order)
    pub selected_points: Vec<Vec2>,
    /// Three edges per triangle, shared edges repeated
    pub all_edges: Vec<Edge>,
    /// Edges whose two endpoints are selected
    pub highlight_edges: Vec<Edge>,
    /// Box containing the selected points
    pub selected_bounds: Option<Rect>,
}

/// Geometry for the whole working set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderGeometry {
    pub meshes: Vec<MeshGeometry>,
    /// Mean of all selected points; `Vec2::ZERO` when nothing is selected
    pub centroid: Vec2,
    /// Number of points that went into `centroid`
    pub selected_count: usize,
}

impl RenderGeometry {
    /// Rebuild from scratch
    ///
    /// `meshes`, `topologies` and `selection` must be index-aligned; entries
    /// missing from any of them produce an invalid placeholder.
    pub fn rebuild<M: MeshHandle>(
        meshes: &[M],
        topologies: &[TopologyIndex],
        selection: &Selection,
        transform: &ViewportTransform,
        channel: UvChannel,
    ) -> Self {
        let mut sum = Vec2::ZERO;
        let mut selected_count = 0;

        let geometry: Vec<MeshGeometry> = meshes
            .iter()
            .enumerate()
            .map(|(i, mesh)| {
                let (Some(topology), Some(set), Some(uvs)) =
                    (topologies.get(i), selection.get(i), mesh.uvs(channel))
                else {
                    return MeshGeometry::default();
                };
                if !topology.is_valid() || topology.uv_len() != uvs.len() {
                    return MeshGeometry::default();
                }

                let points = transform.uvs_to_viewport(uvs);

                let selected_points: Vec<Vec2> = set
                    .sorted()
                    .into_iter()
                    .filter_map(|index| points.get(index as usize).copied())
                    .collect();

                let all_edges = topology
                    .iter_triangles()
                    .flat_map(|[a, b, c]| {
                        let (p0, p1, p2) = (points[a as usize], points[b as usize], points[c as usize]);
                        [(p0, p1), (p1, p2), (p2, p0)]
                    })
                    .collect();

                let highlight_edges = topology
                    .fully_selected_edges(set.as_set())
                    .into_iter()
                    .map(|(a, b)| (points[a as usize], points[b as usize]))
                    .collect();

                for p in &selected_points {
                    sum += *p;
                }
                selected_count += selected_points.len();

                MeshGeometry {
                    valid: true,
                    selected_bounds: bounds_of(&selected_points),
                    points,
                    selected_points,
                    all_edges,
                    highlight_edges,
                }
            })
            .collect();

        let centroid = if selected_count > 0 {
            sum / selected_count as f32
        } else {
            Vec2::ZERO
        };

        log::debug!(
            "rebuilt geometry: {} meshes, {} selected points",
            geometry.len(),
            selected_count
        );

        Self {
            meshes: geometry,
            centroid,
            selected_count,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selected_count > 0
    }

    pub fn get(&self, mesh: usize) -> Option<&MeshGeometry> {
        self.meshes.get(mesh)
    }
}
