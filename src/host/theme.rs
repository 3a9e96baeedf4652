//! Host Theme - Colors and sizes for the UV viewer window

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// Window background outside the workspace
pub const BG_COLOR: Color = Color::new(0.11, 0.11, 0.13, 1.0);

/// Preferences panel background
pub const HEADER_COLOR: Color = Color::new(0.15, 0.15, 0.18, 1.0);

pub const TEXT_COLOR: Color = Color::new(0.8, 0.8, 0.85, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.4, 0.4, 0.45, 1.0);

/// Active toggles and the current channel
pub const ACCENT_COLOR: Color = Color::new(0.0, 0.75, 0.9, 1.0);

// =============================================================================
// Font Sizes
// =============================================================================

pub const FONT_SIZE_HEADER: f32 = 14.0;

pub const FONT_SIZE_CONTENT: f32 = 12.0;

/// Coordinate labels next to selected points
pub const FONT_SIZE_SMALL: f32 = 10.0;

// =============================================================================
// Workspace
// =============================================================================

/// The UV -1..1 square
pub const WORKSPACE_BG: Color = Color::new(0.16, 0.16, 0.18, 1.0);

pub const WORKSPACE_BORDER: Color = Color::new(0.314, 0.314, 0.314, 1.0);

/// U and V axes through the origin
pub const AXIS_COLOR: Color = Color::new(0.35, 0.35, 0.4, 1.0);

/// UV 0..1 square of a textured mesh
pub const TEXTURE_AREA: Color = Color::new(0.22, 0.22, 0.25, 1.0);

/// Unselected wireframe
pub const WIREFRAME_DIM: Color = Color::new(0.2, 0.2, 0.2, 0.2);

/// Unselected UV points
pub const POINT_DIM: Color = Color::new(0.5, 0.5, 0.55, 0.5);

// =============================================================================
// Selection
// =============================================================================

/// Per-mesh colors, cycled by working-set index
pub const MESH_PALETTE: [Color; 5] = [
    Color::new(0.0, 1.0, 0.0, 1.0),
    Color::new(0.0, 1.0, 1.0, 1.0),
    Color::new(0.0, 0.0, 1.0, 1.0),
    Color::new(0.0, 0.0, 0.0, 1.0),
    Color::new(1.0, 0.0, 1.0, 1.0),
];

/// Selection box fill
pub const DRAG_BOX_FILL: Color = Color::new(0.3, 0.5, 0.8, 0.15);

pub const DRAG_BOX_BORDER: Color = Color::new(0.3, 0.5, 0.8, 0.8);

/// Move handle body and outline
pub const HANDLE_COLOR: Color = Color::new(0.9, 0.85, 0.5, 0.6);

pub const HANDLE_OUTLINE: Color = Color::new(0.9, 0.85, 0.5, 1.0);

/// Extra pixels of the handle outline on each side
pub const HANDLE_OUTLINE_GROW: f32 = 2.0;

/// Side of a drawn UV point
pub const POINT_SIZE: f32 = 2.0;

pub const SELECTED_POINT_SIZE: f32 = 4.0;

/// Color for working-set mesh `index`
pub fn mesh_color(index: usize) -> Color {
    MESH_PALETTE[index % MESH_PALETTE.len()]
}
