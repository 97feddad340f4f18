use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::palette::Palette;

pub const DEFAULT_CATALOG_PATH: &str = "data/stars.json";
pub const DEFAULT_FONT: &str = "helvetiker_regular";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config format error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub catalog_path: PathBuf,
    /// Named font asset used for star labels.
    pub font: String,
    pub palette: Palette,
    pub viewport: Viewport,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            font: DEFAULT_FONT.to_string(),
            palette: Palette::default(),
            viewport: Viewport::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)?;
        Self::from_json(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn empty_object_is_all_defaults() {
        let cfg = ViewerConfig::from_json(b"{}").unwrap();
        assert_eq!(cfg, ViewerConfig::default());
    }

    #[test]
    fn overrides_merge_with_defaults() {
        let cfg = ViewerConfig::from_json(
            br##"{
                "catalog_path": "/srv/stars.json",
                "palette": { "background": "#000000" },
                "viewport": { "width": 640, "height": 480 }
            }"##,
        )
        .unwrap();
        assert_eq!(cfg.catalog_path, PathBuf::from("/srv/stars.json"));
        assert_eq!(cfg.palette.background, Color(0));
        assert_eq!(cfg.palette.connection_line, Color(0xcccccc));
        assert_eq!(cfg.font, DEFAULT_FONT);
        assert_eq!(cfg.viewport.width, 640.0);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(matches!(
            ViewerConfig::from_json(b"[1, 2]"),
            Err(ConfigError::Json(_))
        ));
    }
}
