//! Configuration system
//!
//! Settings are plain serde structs that can be read from and written to
//! TOML or RON files; the format is picked from the file extension.

pub use serde::{Deserialize, Serialize};

use crate::foundation::logging::{self, LevelFilter};
use crate::physics::collision::Rect2;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            Self::from_toml_str(&contents)
        } else if path.ends_with(".ron") {
            Self::from_ron_str(&contents)
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }

    /// Parse configuration from TOML text
    fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse configuration from RON text
    fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
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

/// Quadtree construction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadTreeConfig {
    /// World region covered by the root node
    pub bounds: Rect2,
    /// Maximum subdivision depth
    pub max_depth: u32,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            bounds: Rect2::new(0, 0, 640, 480),
            max_depth: 4,
        }
    }
}

impl Config for QuadTreeConfig {}

/// Top-level settings for a scene driven by this crate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Default log level, overridden by `RUST_LOG`
    pub log_level: String,
    /// Broad-phase index settings
    pub quadtree: QuadTreeConfig,
}

impl CoreConfig {
    /// Parsed log level, falling back to `Info` for unknown names
    pub fn level_filter(&self) -> LevelFilter {
        logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            quadtree: QuadTreeConfig::default(),
        }
    }
}

impl Config for CoreConfig {}
