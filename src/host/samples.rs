//! Built-in working set
//!
//! Two meshes so every path of the viewer is reachable without an importer:
//! a quad with both UV channels and a two-submesh strip with only the primary
//! channel authored.

use uvee::{SharedMesh, Vec2};

/// Unit quad, primary channel on 0..1 and a half-scale lightmap channel
pub fn quad() -> SharedMesh {
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
    .with_uv2(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(0.5, 0.0),
        Vec2::new(0.0, 0.5),
        Vec2::new(0.5, 0.5),
    ])
    .with_texture("checker")
}

/// Strip of two quads below the origin, one quad per submesh, no UV2
pub fn strip() -> SharedMesh {
    let mut uvs = Vec::with_capacity(6);
    for row in 0..2 {
        for col in 0..3 {
            uvs.push(Vec2::new(-0.9 + col as f32 * 0.4, -0.8 + row as f32 * 0.4));
        }
    }
    SharedMesh::new("strip", Vec::new(), uvs).with_submeshes(vec![
        vec![0, 1, 3, 3, 1, 4],
        vec![1, 2, 4, 4, 2, 5],
    ])
}

pub fn working_set() -> Vec<SharedMesh> {
    vec![quad(), strip()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use uvee::{MeshHandle, SubmeshFilter, TopologyIndex, UvChannel};

    #[test]
    fn test_samples_are_valid() {
        for mesh in working_set() {
            let index = TopologyIndex::build(&mesh, UvChannel::Primary, SubmeshFilter::All);
            assert!(index.is_valid(), "{} should be editable", mesh.name());
        }
    }

    #[test]
    fn test_strip_has_no_uv2() {
        let strip = strip();
        assert_eq!(strip.submesh_count(), 2);
        assert!(!TopologyIndex::build(&strip, UvChannel::Secondary, SubmeshFilter::All).is_valid());
        assert!(TopologyIndex::build(&quad(), UvChannel::Secondary, SubmeshFilter::All).is_valid());
    }
}
