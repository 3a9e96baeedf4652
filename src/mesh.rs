//! Mesh handles
//!
//! The kernel reads and writes UV buffers through [`MeshHandle`]; the host owns
//! the meshes. Handles are only borrowed for the duration of a kernel call and
//! never stored, since the host may destroy or replace a mesh at any time.

use std::rc::Rc;
use serde::{Serialize, Deserialize};

use crate::math::Vec2;

/// Which of the two parallel per-vertex UV arrays is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UvChannel {
    #[default]
    Primary,
    Secondary,
}

impl UvChannel {
    pub fn label(&self) -> &'static str {
        match self {
            UvChannel::Primary => "UV",
            UvChannel::Secondary => "UV2",
        }
    }
}

/// Host-side mesh, as seen by the kernel
///
/// `triangles()` is a flattened index list: `triangles[3k..3k + 3]` is triangle k.
pub trait MeshHandle {
    /// Display name (used in logs)
    fn name(&self) -> &str;

    fn vertex_count(&self) -> usize;

    fn triangles(&self) -> &[u32];

    fn submesh_count(&self) -> usize {
        1
    }

    /// Triangles of a single submesh. The default treats the whole mesh as
    /// submesh 0.
    fn submesh_triangles(&self, submesh: usize) -> Option<&[u32]> {
        (submesh == 0).then(|| self.triangles())
    }

    /// UV array of a channel, `None` when the channel was never authored
    fn uvs(&self, channel: UvChannel) -> Option<&[Vec2]>;

    /// Write a full UV array back to the mesh
    fn set_uvs(&mut self, channel: UvChannel, uvs: Vec<Vec2>);

    /// Texture shown behind the UVs, if any
    fn texture(&self) -> Option<&str> {
        None
    }

    /// Whether this mesh already owns its buffers exclusively
    fn is_instance(&self) -> bool;

    /// Detach the mesh from any shared asset by copying its buffers
    fn make_instance(&mut self);
}

/// Prefix given to meshes detached by [`MeshHandle::make_instance`]
pub const INSTANCE_PREFIX: &str = "uvee-";

/// Reference mesh backed by reference-counted buffers
///
/// Cloning a `SharedMesh` shares every buffer, like several scene objects using
/// the same mesh asset. `make_instance` gives one clone its own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedMesh {
    name: String,
    vertex_count: usize,
    /// Triangle lists per submesh
    submeshes: Rc<Vec<Vec<u32>>>,
    /// Flattened concatenation of all submeshes
    triangles: Rc<Vec<u32>>,
    uv: Option<Rc<Vec<Vec2>>>,
    uv2: Option<Rc<Vec<Vec2>>>,
    texture: Option<String>,
    instanced: bool,
}

impl SharedMesh {
    /// Mesh with a single submesh and a primary UV channel
    pub fn new(name: &str, triangles: Vec<u32>, uv: Vec<Vec2>) -> Self {
        let vertex_count = uv.len();
        Self {
            name: name.to_string(),
            vertex_count,
            submeshes: Rc::new(vec![triangles.clone()]),
            triangles: Rc::new(triangles),
            uv: Some(Rc::new(uv)),
            uv2: None,
            texture: None,
            instanced: false,
        }
    }

    /// Override the vertex count (e.g. to model a channel shorter than the mesh)
    pub fn with_vertex_count(mut self, count: usize) -> Self {
        self.vertex_count = count;
        self
    }

    pub fn with_uv2(mut self, uv2: Vec<Vec2>) -> Self {
        self.uv2 = Some(Rc::new(uv2));
        self
    }

    pub fn with_texture(mut self, texture: &str) -> Self {
        self.texture = Some(texture.to_string());
        self
    }

    /// Replace the triangle list with several submeshes
    pub fn with_submeshes(mut self, submeshes: Vec<Vec<u32>>) -> Self {
        let flat: Vec<u32> = submeshes.iter().flatten().copied().collect();
        self.triangles = Rc::new(flat);
        self.submeshes = Rc::new(submeshes);
        self
    }

    fn channel(&self, channel: UvChannel) -> Option<&Rc<Vec<Vec2>>> {
        match channel {
            UvChannel::Primary => self.uv.as_ref(),
            UvChannel::Secondary => self.uv2.as_ref(),
        }
    }
}

impl MeshHandle for SharedMesh {
    fn name(&self) -> &str {
        &self.name
    }

    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    fn submesh_count(&self) -> usize {
        self.submeshes.len()
    }

    fn submesh_triangles(&self, submesh: usize) -> Option<&[u32]> {
        self.submeshes.get(submesh).map(Vec::as_slice)
    }

    fn uvs(&self, channel: UvChannel) -> Option<&[Vec2]> {
        self.channel(channel).map(|uvs| uvs.as_slice())
    }

    fn set_uvs(&mut self, channel: UvChannel, uvs: Vec<Vec2>) {
        let slot = match channel {
            UvChannel::Primary => &mut self.uv,
            UvChannel::Secondary => &mut self.uv2,
        };
        // Reuse the allocation when nobody else holds it
        if let Some(existing) = slot.as_mut() {
            *Rc::make_mut(existing) = uvs;
            return;
        }
        *slot = Some(Rc::new(uvs));
    }

    fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    fn is_instance(&self) -> bool {
        self.instanced
    }

    fn make_instance(&mut self) {
        if self.instanced {
            return;
        }
        Rc::make_mut(&mut self.submeshes);
        Rc::make_mut(&mut self.triangles);
        if let Some(uv) = self.uv.as_mut() {
            Rc::make_mut(uv);
        }
        if let Some(uv2) = self.uv2.as_mut() {
            Rc::make_mut(uv2);
        }
        self.name = format!("{}{}", INSTANCE_PREFIX, self.name);
        self.instanced = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shares_uvs(a: &SharedMesh, b: &SharedMesh, channel: UvChannel) -> bool {
        match (a.channel(channel), b.channel(channel)) {
            (Some(x), Some(y)) => Rc::ptr_eq(x, y),
            _ => false,
        }
    }

    fn quad() -> SharedMesh {
        SharedMesh::new(
            "quad",
            vec![0, 1, 2, 2, 1, 3],
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
            ],
        )
    }

    #[test]
    fn test_clones_share_buffers() {
        let a = quad();
        let b = a.clone();
        assert!(shares_uvs(&a, &b, UvChannel::Primary));
        assert!(!shares_uvs(&a, &b, UvChannel::Secondary));
    }

    #[test]
    fn test_make_instance_detaches() {
        let original = quad();
        let mut instance = original.clone();
        instance.make_instance();

        assert!(instance.is_instance());
        assert_eq!(instance.name(), "uvee-quad");
        assert!(!shares_uvs(&instance, &original, UvChannel::Primary));

        instance.set_uvs(UvChannel::Primary, vec![Vec2::ZERO; 4]);
        assert_eq!(original.uvs(UvChannel::Primary).unwrap()[1], Vec2::new(1.0, 0.0));
        assert_eq!(instance.uvs(UvChannel::Primary).unwrap()[1], Vec2::ZERO);

        // A second call is a no-op
        instance.make_instance();
        assert_eq!(instance.name(), "uvee-quad");
    }

    #[test]
    fn test_submeshes() {
        let mesh = quad().with_submeshes(vec![vec![0, 1, 2], vec![2, 1, 3]]);
        assert_eq!(mesh.submesh_count(), 2);
        assert_eq!(mesh.triangles(), &[0, 1, 2, 2, 1, 3]);
        assert_eq!(mesh.submesh_triangles(1), Some(&[2u32, 1, 3][..]));
        assert_eq!(mesh.submesh_triangles(2), None);
    }

    #[test]
    fn test_set_uvs_creates_missing_channel() {
        let mut mesh = quad();
        assert!(mesh.uvs(UvChannel::Secondary).is_none());
        mesh.set_uvs(UvChannel::Secondary, vec![Vec2::ZERO; 4]);
        assert_eq!(mesh.uvs(UvChannel::Secondary).map(<[Vec2]>::len), Some(4));
    }
}
