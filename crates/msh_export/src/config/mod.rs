//! Configuration system
//!
//! Export options chosen by the user, loadable from TOML or RON files.

use std::path::Path;

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        match extension(path) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Which objects of the host scene are gathered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExportTarget {
    /// Every object in the scene
    #[default]
    Scene,
    /// Only the selected objects
    Selected,
    /// The selected objects and all of their descendants
    SelectedWithChildren,
}

/// Options controlling scene assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Build real triangle strips instead of one strip per triangle
    pub generate_triangle_strips: bool,
    /// Passed through to the gather step
    pub apply_modifiers: bool,
    /// Passed through to the gather step
    pub export_target: ExportTarget,
    /// Export the skeleton only, without render geometry
    pub skeleton_only: bool,
    /// Extract an animation from the gathered armature
    pub export_animation: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            generate_triangle_strips: true,
            apply_modifiers: true,
            export_target: ExportTarget::Scene,
            skeleton_only: false,
            export_animation: false,
        }
    }
}

impl Config for ExportConfig {}

impl ExportConfig {
    /// Configuration for an animation-only export (skeleton plus keyframes)
    pub fn animation_only() -> Self {
        Self {
            skeleton_only: true,
            export_animation: true,
            ..Self::default()
        }
    }
}
