//! Topology index
//!
//! Per-mesh triangle list for the active channel and submesh filter, plus the
//! validity flag that keeps meshes with unusable UVs out of picking, selection
//! and centroid math. Invalid meshes still get an (empty) entry so per-mesh
//! arrays stay index-aligned with the working set.

use std::collections::{BTreeSet, HashSet};

use crate::mesh::{MeshHandle, UvChannel};

/// Which triangles of a mesh are shown and pickable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmeshFilter {
    #[default]
    All,
    Only(usize),
}

impl SubmeshFilter {
    pub fn label(&self) -> String {
        match self {
            SubmeshFilter::All => "All".to_string(),
            SubmeshFilter::Only(i) => i.to_string(),
        }
    }
}

/// Triangle topology of one working-set mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopologyIndex {
    valid: bool,
    /// Flattened triangle list after the submesh filter
    triangles: Vec<u32>,
    /// Length of the UV array this index was built against
    uv_len: usize,
}

impl TopologyIndex {
    /// Placeholder for a mesh whose channel cannot be edited
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Build the index for `mesh` on `channel`
    ///
    /// The mesh is invalid when the channel is missing, its length differs
    /// from the vertex count, no triangle survives the submesh filter, or a
    /// triangle references a vertex past the end of the UV array.
    pub fn build<M: MeshHandle + ?Sized>(mesh: &M, channel: UvChannel, submesh: SubmeshFilter) -> Self {
        let Some(uvs) = mesh.uvs(channel) else {
            return Self::invalid();
        };
        if uvs.is_empty() || uvs.len() != mesh.vertex_count() {
            return Self::invalid();
        }

        let triangles = match submesh {
            SubmeshFilter::All => mesh.triangles(),
            SubmeshFilter::Only(i) => match mesh.submesh_triangles(i) {
                Some(tris) => tris,
                None => return Self::invalid(),
            },
        };

        let whole = triangles.len() - triangles.len() % 3;
        let triangles = &triangles[..whole];
        if triangles.is_empty() || triangles.iter().any(|&i| i as usize >= uvs.len()) {
            return Self::invalid();
        }

        Self {
            valid: true,
            triangles: triangles.to_vec(),
            uv_len: uvs.len(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn uv_len(&self) -> usize {
        self.uv_len
    }

    /// Iterate triangles as index triples
    pub fn iter_triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.triangles.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Distinct indices referenced by the triangles, ascending
    ///
    /// Only these points can be picked; vertices outside the filtered
    /// triangles are never selected.
    pub fn selectable_indices(&self) -> BTreeSet<u32> {
        self.triangles.iter().copied().collect()
    }

    /// Edges of the triangle walk whose two endpoints are both selected
    ///
    /// Per triangle (a, b, c) the candidates are (a, b), (b, c), (c, a).
    /// Shared edges are reported once per triangle.
    pub fn fully_selected_edges(&self, selected: &HashSet<u32>) -> Vec<(u32, u32)> {
        let mut edges = Vec::new();
        for [a, b, c] in self.iter_triangles() {
            let (sa, sb, sc) = (selected.contains(&a), selected.contains(&b), selected.contains(&c));
            if sa && sb {
                edges.push((a, b));
            }
            if sb && sc {
                edges.push((b, c));
            }
            if sc && sa {
                edges.push((c, a));
            }
        }
        edges
    }
}

/// Build one index per working-set mesh, in order
pub fn build_all<M: MeshHandle>(meshes: &[M], channel: UvChannel, submesh: SubmeshFilter) -> Vec<TopologyIndex> {
    meshes
        .iter()
        .map(|mesh| {
            let index = TopologyIndex::build(mesh, channel, submesh);
            if !index.is_valid() {
                log::warn!("{}: channel {} is not editable, skipping", mesh.name(), channel.label());
            }
            index
        })
        .collect()
}
