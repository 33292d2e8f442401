use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compositor::DEFAULT_OVERLAY_ALPHA;
use crate::error::ConfigError;
use crate::geometry::{HandlePriority, HANDLE_HALF_WIDTH};

/// Environment variable naming a JSON file that overrides persisted settings
pub const CONFIG_ENV_VAR: &str = "EFRAME_CROP_CONFIG";

/// User-tunable viewer settings.
///
/// Persisted through eframe storage between runs; missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Opacity of the overlay painted outside the selection
    pub overlay_alpha: f32,
    pub overlay_color: [u8; 3],
    pub handle_half_width: f32,
    pub handle_priority: HandlePriority,
    /// Downscale larger images to fit this box for display. `None` shows source pixels 1:1.
    pub max_display_size: Option<[u32; 2]>,
    pub default_export_extension: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            overlay_alpha: DEFAULT_OVERLAY_ALPHA,
            overlay_color: [0, 0, 0],
            handle_half_width: HANDLE_HALF_WIDTH,
            handle_priority: HandlePriority::FirstMatch,
            max_display_size: None,
            default_export_extension: "png".to_owned(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(text).map(Self::sanitized)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], if the variable is set
    pub fn from_env() -> Option<Result<Self, ConfigError>> {
        let path = std::env::var_os(CONFIG_ENV_VAR)?;
        Some(Self::from_json_file(Path::new(&path)))
    }

    /// Clamps values that would make compositing or hit testing meaningless
    pub fn sanitized(mut self) -> Self {
        if !self.overlay_alpha.is_finite() {
            self.overlay_alpha = DEFAULT_OVERLAY_ALPHA;
        }
        self.overlay_alpha = self.overlay_alpha.clamp(0.0, 1.0);
        if !self.handle_half_width.is_finite() || self.handle_half_width < 0.0 {
            self.handle_half_width = HANDLE_HALF_WIDTH;
        }
        if let Some([w, h]) = self.max_display_size {
            if w == 0 || h == 0 {
                self.max_display_size = None;
            }
        }
        let ext = self.default_export_extension.trim_start_matches('.');
        self.default_export_extension = if ext.is_empty() { "png".to_owned() } else { ext.to_owned() };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ViewerConfig::from_json_str(r#"{ "overlay_alpha": 0.25 }"#).unwrap();

        assert_eq!(config.overlay_alpha, 0.25);
        assert_eq!(config.handle_half_width, HANDLE_HALF_WIDTH);
        assert_eq!(config.handle_priority, HandlePriority::FirstMatch);
        assert_eq!(config.max_display_size, None);
        assert_eq!(config.default_export_extension, "png");
    }

    #[test]
    fn test_sanitize_out_of_range_values() {
        let config = ViewerConfig::from_json_str(
            r#"{
                "overlay_alpha": 3.0,
                "handle_half_width": -1.0,
                "handle_priority": "Nearest",
                "max_display_size": [0, 600],
                "default_export_extension": ".jpg"
            }"#,
        )
        .unwrap();

        assert_eq!(config.overlay_alpha, 1.0);
        assert_eq!(config.handle_half_width, HANDLE_HALF_WIDTH);
        assert_eq!(config.handle_priority, HandlePriority::Nearest);
        assert_eq!(config.max_display_size, None);
        assert_eq!(config.default_export_extension, "jpg");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ViewerConfig::from_json_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
