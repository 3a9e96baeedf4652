//! UVee: a UV viewer/editor window
//!
//! Macroquad host around the `uvee` kernel. Shows the built-in working set;
//! preferences are loaded from and saved to the user config directory.

mod host;

use macroquad::prelude::*;
use uvee::{UvChannel, UvKernel, ViewerConfig, VERSION};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("UVee v{}", VERSION),
        window_width: 900,
        window_height: 900,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Load preferences, falling back to defaults on any error
fn load_config() -> ViewerConfig {
    let path = ViewerConfig::default_path();
    if !path.exists() {
        return ViewerConfig::default();
    }
    match ViewerConfig::load(&path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("Failed to load config {}: {}, using defaults", path.display(), e);
            ViewerConfig::default()
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut prefs = load_config();
    let mut kernel = UvKernel::new(prefs.clone());
    let mut meshes = host::samples::working_set();
    let mut input = host::InputCollector::new();
    let mut uvs_modified = false;

    kernel.on_resize(screen_width(), screen_height());
    kernel.on_working_set_changed(&meshes);
    prevent_quit();

    log::info!("=== UVee v{} ===", VERSION);

    loop {
        kernel.on_resize(screen_width(), screen_height());

        // Host-level shortcuts
        if is_key_pressed(KeyCode::Key1) {
            kernel.set_channel(&meshes, UvChannel::Primary);
        }
        if is_key_pressed(KeyCode::Key2) {
            kernel.set_channel(&meshes, UvChannel::Secondary);
        }
        if is_key_pressed(KeyCode::M) {
            let next = host::next_submesh(kernel.submesh(), &meshes);
            kernel.set_submesh(&meshes, next);
        }
        if is_key_pressed(KeyCode::A) {
            kernel.select_all(&meshes);
        }
        if is_key_pressed(KeyCode::Escape) {
            kernel.clear_selection();
        }
        if is_key_pressed(KeyCode::Tab) {
            kernel.set_show_preferences(!kernel.config().show_preferences);
        }
        if is_key_pressed(KeyCode::C) {
            prefs.show_coordinates = !prefs.show_coordinates;
        }
        if is_key_pressed(KeyCode::T) {
            prefs.draw_triangles = !prefs.draw_triangles;
        }
        if is_key_pressed(KeyCode::B) {
            prefs.draw_bounding_box = !prefs.draw_bounding_box;
        }
        if is_key_pressed(KeyCode::X) {
            prefs.show_texture = !prefs.show_texture;
        }

        for event in input.poll() {
            let response = kernel.handle_event(&mut meshes, event);
            if response.uvs_changed && !uvs_modified {
                log::info!("UVs modified");
                uvs_modified = true;
            }
        }

        kernel.refresh(&meshes);
        host::draw_frame(&kernel, &meshes, &prefs);

        if is_quit_requested() {
            break;
        }
        next_frame().await;
    }

    // Layout and channel live in the kernel, display toggles in prefs
    prefs.channel = kernel.channel();
    prefs.show_preferences = kernel.config().show_preferences;
    let path = ViewerConfig::default_path();
    match prefs.save(&path) {
        Ok(()) => log::info!("Saved config to {}", path.display()),
        Err(e) => log::error!("Failed to save config: {}", e),
    }
}
