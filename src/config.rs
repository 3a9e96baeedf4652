//! Viewer configuration
//!
//! Stored as RON (Rusty Object Notation) so it stays hand-editable.
//! Missing fields fall back to their defaults.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};

use crate::mesh::UvChannel;

/// Lowest zoom percentage any config may request
pub const MIN_ZOOM: i32 = 1;
/// Highest zoom percentage any config may request
pub const MAX_ZOOM: i32 = 2000;
/// Zoom percentage restored by a view reset
pub const DEFAULT_ZOOM: i32 = 100;

/// Error type for config loading and saving
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::ParseError(e) => Some(e),
            ConfigError::SerializeError(e) => Some(e),
            ConfigError::ValidationError(_) => None,
        }
    }
}

/// Viewer preferences and layout constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Zoom clamp range, in percent
    pub min_zoom: i32,
    pub max_zoom: i32,
    /// Zoom used at startup and on view reset, in percent
    pub default_zoom: i32,
    /// Gap between the window edge and the workspace at 100% zoom
    pub padding: f32,
    /// Height reserved at the top for the preferences panel
    pub expanded_panel_height: f32,
    pub compact_panel_height: f32,
    pub show_preferences: bool,
    /// Side length of the square move handle drawn on the selection centroid
    pub move_handle_size: f32,
    /// Drag distance before the selection box is drawn
    pub drag_box_threshold: f32,
    pub channel: UvChannel,
    pub show_coordinates: bool,
    pub draw_triangles: bool,
    pub draw_bounding_box: bool,
    pub show_texture: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            default_zoom: DEFAULT_ZOOM,
            padding: 10.0,
            expanded_panel_height: 180.0,
            compact_panel_height: 50.0,
            show_preferences: true,
            move_handle_size: 32.0,
            drag_box_threshold: 10.0,
            channel: UvChannel::Primary,
            show_coordinates: false,
            draw_triangles: true,
            draw_bounding_box: false,
            show_texture: true,
        }
    }
}

impl ViewerConfig {
    /// Height currently reserved for the preferences panel
    pub fn panel_height(&self) -> f32 {
        if self.show_preferences {
            self.expanded_panel_height
        } else {
            self.compact_panel_height
        }
    }

    /// Reject configs that would let the viewport scale reach zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_zoom < MIN_ZOOM || self.max_zoom > MAX_ZOOM {
            return Err(ConfigError::ValidationError(format!(
                "zoom range {}..={} outside {}..={}",
                self.min_zoom, self.max_zoom, MIN_ZOOM, MAX_ZOOM
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::ValidationError(format!(
                "min_zoom {} greater than max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.default_zoom) {
            return Err(ConfigError::ValidationError(format!(
                "default_zoom {} outside {}..={}",
                self.default_zoom, self.min_zoom, self.max_zoom
            )));
        }
        let sizes = [
            ("padding", self.padding),
            ("expanded_panel_height", self.expanded_panel_height),
            ("compact_panel_height", self.compact_panel_height),
            ("move_handle_size", self.move_handle_size),
            ("drag_box_threshold", self.drag_box_threshold),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be a non-negative number (got {})",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Default location: `<config dir>/uvee/config.ron`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("uvee")
            .join("config.ron")
    }

    /// Load and validate a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    /// Parse and validate a config from a RON string
    pub fn load_from_str(s: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Save as pretty-printed RON, creating parent directories as needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        let contents = ron::ser::to_string_pretty(self, config)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_is_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.min_zoom, config.max_zoom), (1, 2000));
        assert!((config.panel_height() - 180.0).abs() < 0.001);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ron");

        let config = ViewerConfig {
            default_zoom: 250,
            channel: UvChannel::Secondary,
            show_coordinates: true,
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = ViewerConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded = ViewerConfig::load_from_str("(default_zoom: 400)").unwrap();
        assert_eq!(loaded.default_zoom, 400);
        assert_eq!(loaded.max_zoom, MAX_ZOOM);
        assert!(loaded.draw_triangles);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "not valid ron data").unwrap();

        let result = ViewerConfig::load(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_rejects_bad_zoom_range() {
        let result = ViewerConfig::load_from_str("(min_zoom: 0)");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        let result = ViewerConfig::load_from_str("(min_zoom: 500, max_zoom: 400)");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        let result = ViewerConfig::load_from_str("(default_zoom: 3000)");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = ViewerConfig::load(dir.path().join("nope.ron"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
