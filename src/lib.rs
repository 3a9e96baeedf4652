//! UVee: interactive UV viewing and editing
//!
//! A host-independent kernel that displays the UV coordinates of a working
//! set of meshes in a 2D viewport and lets the user:
//! - Pan and zoom the view (middle drag, Alt+drag, scroll wheel)
//! - Box-select UV points (Shift toggles)
//! - Drag the selection by a handle on its centroid
//!
//! The kernel borrows meshes through [`MeshHandle`] for the duration of each
//! call and hands back render-ready geometry in viewport pixels. Drawing and
//! windowing are left to the host; the `uvee` binary is a macroquad host.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod drag;
pub mod events;
pub mod geometry;
pub mod kernel;
pub mod math;
pub mod mesh;
pub mod selection;
pub mod topology;
pub mod viewport;

pub use config::{ConfigError, ViewerConfig};
pub use events::{EventKind, Key, Modifiers, MouseButton, PointerEvent};
pub use geometry::{MeshGeometry, RenderGeometry};
pub use kernel::{EventResponse, UvKernel};
pub use math::{Rect, Vec2};
pub use mesh::{MeshHandle, SharedMesh, UvChannel};
pub use selection::{SelectMode, SelectOutcome, Selection, SelectionSet};
pub use topology::{SubmeshFilter, TopologyIndex};
pub use viewport::{ViewportState, ViewportTransform};
