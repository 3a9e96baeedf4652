//! Macroquad host for the UV kernel
//!
//! Owns the meshes and the window; translates input and draws kernel output.

mod draw;
mod input;
pub mod samples;
pub mod theme;

pub use draw::*;
pub use input::*;

use uvee::{SharedMesh, SubmeshFilter};

/// Next submesh filter in the cycle All -> 0 -> 1 -> ... -> All
pub fn next_submesh(current: SubmeshFilter, meshes: &[SharedMesh]) -> SubmeshFilter {
    use uvee::MeshHandle;
    let count = meshes.iter().map(|m| m.submesh_count()).max().unwrap_or(1);
    match current {
        SubmeshFilter::All => SubmeshFilter::Only(0),
        SubmeshFilter::Only(i) if i + 1 < count => SubmeshFilter::Only(i + 1),
        SubmeshFilter::Only(_) => SubmeshFilter::All,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submesh_cycle() {
        let meshes = samples::working_set();
        let mut filter = SubmeshFilter::All;
        let mut seen = Vec::new();
        for _ in 0..3 {
            filter = next_submesh(filter, &meshes);
            seen.push(filter);
        }
        assert_eq!(seen, vec![SubmeshFilter::Only(0), SubmeshFilter::Only(1), SubmeshFilter::All]);
    }
}
