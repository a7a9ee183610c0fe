//! Configuration system
//!
//! Settings that change query behavior are plain serde structs that can be
//! loaded from TOML or RON files through the [`Config`] trait.

pub use serde::{Serialize, Deserialize};

use serde::Deserializer;

use crate::foundation::logging::debug;
use crate::foundation::math::EPSILON;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        let config = if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        debug!("Loaded configuration from {}", path);
        Ok(config)
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

/// How a pair of overlapping leaf volumes is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeafTest {
    /// Transform both triangles and run an exact triangle/triangle test
    #[default]
    Exact,

    /// Report a collision as soon as two leaf spheres overlap.
    ///
    /// Cheaper, but reports false positives whenever the spheres touch
    /// while the triangles inside them do not.
    AssumeContact,
}

/// Collision query settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Leaf pair resolution
    pub leaf_test: LeafTest,

    /// Margin added to every world-space volume; finite and non-negative.
    /// Files with a negative or non-finite value are rejected on load.
    #[serde(deserialize_with = "non_negative")]
    pub epsilon: f32,
}

fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    let value = f32::deserialize(deserializer)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(format!(
            "epsilon must be finite and non-negative, got {value}"
        )))
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            leaf_test: LeafTest::Exact,
            epsilon: EPSILON,
        }
    }
}

impl Config for CollisionConfig {}
