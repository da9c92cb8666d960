use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::resolver::MAX_VIEW_RADIUS;

/// Errors from loading a view configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("viewport must be at least one cell each way, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
}

/// Viewport the fog is drawn into, in cells.
///
/// The width bounds how far the resolver looks; both sides bound the window
/// of the map that gets drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            viewport_width: 80,
            viewport_height: 24,
        }
    }
}

impl ViewConfig {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Result<Self, ConfigError> {
        let config = Self {
            viewport_width,
            viewport_height,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_reader(std::fs::File::open(path)?)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(ConfigError::EmptyViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        Ok(())
    }

    /// View radius handed to the resolver: half the viewport width, capped
    /// at [`MAX_VIEW_RADIUS`].
    pub fn max_horizontal_radius(&self) -> u32 {
        (self.viewport_width / 2).min(MAX_VIEW_RADIUS)
    }
}
