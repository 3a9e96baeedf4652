//! Frame drawing
//!
//! Everything here reads kernel output; nothing mutates kernel state.

use macroquad::prelude::*;
use uvee::{MeshHandle, Rect as UvRect, SharedMesh, UvKernel, Vec2 as UvVec2, ViewerConfig, VERSION};

use super::theme::*;

pub fn draw_frame(kernel: &UvKernel, meshes: &[SharedMesh], prefs: &ViewerConfig) {
    clear_background(BG_COLOR);

    draw_workspace(kernel);
    if prefs.show_texture {
        draw_texture_area(kernel, meshes);
    }
    draw_meshes(kernel, prefs);
    if prefs.show_coordinates {
        draw_coordinates(kernel);
    }
    draw_overlays(kernel);
    draw_panel(kernel, meshes, prefs);
}

// =============================================================================
// Workspace
// =============================================================================

fn draw_workspace(kernel: &UvKernel) {
    let t = kernel.transform();
    let ws = t.workspace_rect();
    draw_rectangle(ws.x, ws.y, ws.w, ws.h, WORKSPACE_BG);
    draw_rectangle_lines(ws.x, ws.y, ws.w, ws.h, 1.0, WORKSPACE_BORDER);

    let c = t.center();
    draw_line(ws.x, c.y, ws.right(), c.y, 1.0, AXIS_COLOR);
    draw_line(c.x, ws.y, c.x, ws.bottom(), 1.0, AXIS_COLOR);
}

/// Shade UV 0..1 and label it with the texture name, when a mesh has one.
/// Texture pixels are not drawn.
fn draw_texture_area(kernel: &UvKernel, meshes: &[SharedMesh]) {
    let Some(name) = meshes.iter().find_map(|m| m.texture()) else {
        return;
    };
    let t = kernel.transform();
    let area = UvRect::from_points(t.uv_to_viewport(UvVec2::new(0.0, 0.0)), t.uv_to_viewport(UvVec2::new(1.0, 1.0)));
    draw_rectangle(area.x, area.y, area.w, area.h, TEXTURE_AREA);
    draw_text(name, area.x + 2.0, area.y - 4.0, FONT_SIZE_SMALL, TEXT_DIM);
}

fn draw_meshes(kernel: &UvKernel, prefs: &ViewerConfig) {
    for (i, g) in kernel.geometry().meshes.iter().enumerate() {
        if !g.valid {
            continue;
        }
        let color = mesh_color(i);

        if prefs.draw_triangles {
            for (a, b) in &g.all_edges {
                draw_line(a.x, a.y, b.x, b.y, 1.0, WIREFRAME_DIM);
            }
            for p in &g.points {
                draw_rectangle(p.x - POINT_SIZE * 0.5, p.y - POINT_SIZE * 0.5, POINT_SIZE, POINT_SIZE, POINT_DIM);
            }
        }

        for (a, b) in &g.highlight_edges {
            draw_line(a.x, a.y, b.x, b.y, 1.5, color);
        }
        for p in &g.selected_points {
            let s = SELECTED_POINT_SIZE;
            draw_rectangle(p.x - s * 0.5, p.y - s * 0.5, s, s, color);
        }

        if prefs.draw_bounding_box {
            if let Some(b) = g.selected_bounds {
                draw_rectangle_lines(b.x, b.y, b.w, b.h, 1.0, color);
            }
        }
    }
}

/// UV value next to every selected point
fn draw_coordinates(kernel: &UvKernel) {
    for g in &kernel.geometry().meshes {
        for p in &g.selected_points {
            let uv = kernel.uv_at(*p);
            draw_text(&format!("({:.3}, {:.3})", uv.x, uv.y), p.x + 6.0, p.y - 6.0, FONT_SIZE_SMALL, TEXT_COLOR);
        }
    }
}

/// Selection box and move handle
fn draw_overlays(kernel: &UvKernel) {
    if let Some(r) = kernel.box_select_rect() {
        draw_rectangle(r.x, r.y, r.w, r.h, DRAG_BOX_FILL);
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, DRAG_BOX_BORDER);
    }

    if let Some(h) = kernel.move_handle_rect() {
        let g = HANDLE_OUTLINE_GROW;
        draw_rectangle(h.x, h.y, h.w, h.h, HANDLE_COLOR);
        draw_rectangle_lines(h.x - g, h.y - g, h.w + g * 2.0, h.h + g * 2.0, 1.0, HANDLE_OUTLINE);
    }
}

// =============================================================================
// Preferences panel
// =============================================================================

fn toggle_color(on: bool) -> Color {
    if on {
        ACCENT_COLOR
    } else {
        TEXT_DIM
    }
}

fn draw_panel(kernel: &UvKernel, meshes: &[SharedMesh], prefs: &ViewerConfig) {
    let panel = kernel.viewport().panel_rect();
    draw_rectangle(panel.x, panel.y, panel.w, panel.h, HEADER_COLOR);

    let pad = kernel.config().padding;
    let x = panel.x + pad;
    let mut y = panel.y + pad + FONT_SIZE_HEADER;

    let status = format!(
        "UVee v{}   Zoom: {}%   Channel: {}   Submesh: {}   Selected: {}",
        VERSION,
        kernel.viewport().zoom(),
        kernel.channel().label(),
        kernel.submesh().label(),
        kernel.selection().total(),
    );
    draw_text(&status, x, y, FONT_SIZE_HEADER, TEXT_COLOR);

    if !kernel.config().show_preferences {
        draw_text("Tab: show preferences", x, y + FONT_SIZE_CONTENT + 4.0, FONT_SIZE_CONTENT, TEXT_DIM);
        return;
    }

    // Working set, one line per mesh in its palette color
    y += FONT_SIZE_HEADER + 6.0;
    for (i, mesh) in meshes.iter().enumerate() {
        let valid = kernel.topologies().get(i).is_some_and(|t| t.is_valid());
        let label = if valid {
            format!("{} ({} verts)", mesh.name(), mesh.vertex_count())
        } else {
            format!("{} (no {})", mesh.name(), kernel.channel().label())
        };
        draw_rectangle(x, y - 8.0, 8.0, 8.0, mesh_color(i));
        draw_text(&label, x + 14.0, y, FONT_SIZE_CONTENT, if valid { TEXT_COLOR } else { TEXT_DIM });
        y += FONT_SIZE_CONTENT + 4.0;
    }

    y += 4.0;
    let toggles = [
        ("[C] Coordinates", prefs.show_coordinates),
        ("[T] Triangles", prefs.draw_triangles),
        ("[B] Containing box", prefs.draw_bounding_box),
        ("[X] Texture", prefs.show_texture),
    ];
    let mut tx = x;
    for (label, on) in toggles {
        draw_text(label, tx, y, FONT_SIZE_CONTENT, toggle_color(on));
        tx += measure_text(label, None, FONT_SIZE_CONTENT as u16, 1.0).width + 16.0;
    }

    y += FONT_SIZE_CONTENT + 8.0;
    let help = [
        "Drag: box select (Shift toggles)   Drag handle: move UVs   A: select all   Esc: clear",
        "Middle / Alt+drag: pan   Alt+right drag, wheel: zoom   0: reset view",
        "1 / 2: UV channel   M: next submesh   Tab: hide preferences",
    ];
    for line in help {
        if y > panel.bottom() - pad {
            break;
        }
        draw_text(line, x, y, FONT_SIZE_CONTENT, TEXT_DIM);
        y += FONT_SIZE_CONTENT + 4.0;
    }
}
