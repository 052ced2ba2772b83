//! # World Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file is a valid configuration.
//!
//! ```toml
//! change_feed_capacity = 1024
//!
//! [streaming]
//! follow_viewpoint = true
//!
//! [streaming.bounds]
//! min = [-5, 0, -5]
//! max = [5, 2, 5]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use voxels_core::{VoxelError, VoxelResult};

/// Half-open chunk-space box `[min, max)` relative to a streaming origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkBounds {
    /// Inclusive lower corner.
    pub min: [i32; 3],
    /// Exclusive upper corner.
    pub max: [i32; 3],
}

impl ChunkBounds {
    /// Creates new bounds.
    #[must_use]
    pub const fn new(min: [i32; 3], max: [i32; 3]) -> Self {
        Self { min, max }
    }

    /// Number of chunks covered.
    #[must_use]
    pub fn volume(&self) -> usize {
        (0..3)
            .map(|axis| usize::try_from(self.max[axis] - self.min[axis]).unwrap_or(0))
            .product()
    }

    /// Checks `min <= max` on every axis.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::InvalidConfig`] naming the first inverted axis.
    pub fn validate(&self) -> VoxelResult<()> {
        for (axis, name) in ["x", "y", "z"].iter().enumerate() {
            if self.min[axis] > self.max[axis] {
                return Err(VoxelError::InvalidConfig(format!(
                    "streaming bounds: min.{name} ({}) > max.{name} ({})",
                    self.min[axis], self.max[axis]
                )));
            }
        }
        Ok(())
    }
}

impl Default for ChunkBounds {
    fn default() -> Self {
        Self {
            min: [-5, 0, -5],
            max: [5, 2, 5],
        }
    }
}

/// Configuration for the streaming window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Chunks to keep loaded around the origin.
    pub bounds: ChunkBounds,
    /// Move the origin with the viewpoint (x/z only). When false the origin
    /// stays at the world origin.
    pub follow_viewpoint: bool,
}

/// Top-level world configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Streaming window settings.
    pub streaming: StreamingConfig,
    /// Events buffered per change-feed subscriber.
    pub change_feed_capacity: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            streaming: StreamingConfig::default(),
            change_feed_capacity: 1024,
        }
    }
}

impl WorldConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::InvalidConfig`] on syntax errors, unknown value
    /// types or failed validation.
    pub fn from_toml_str(content: &str) -> VoxelResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| VoxelError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::InvalidConfig`] if the file cannot be read or
    /// does not hold a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> VoxelResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| VoxelError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> VoxelResult<String> {
        toml::to_string_pretty(self).map_err(|e| VoxelError::InvalidConfig(e.to_string()))
    }

    /// Checks internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::InvalidConfig`] on inverted bounds or a zero
    /// change-feed capacity.
    pub fn validate(&self) -> VoxelResult<()> {
        self.streaming.bounds.validate()?;
        if self.change_feed_capacity == 0 {
            return Err(VoxelError::InvalidConfig(
                "change_feed_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(WorldConfig::from_toml_str("").unwrap(), WorldConfig::default());
    }

    #[test]
    fn test_default_bounds() {
        let bounds = ChunkBounds::default();
        assert_eq!(bounds.min, [-5, 0, -5]);
        assert_eq!(bounds.max, [5, 2, 5]);
        assert_eq!(bounds.volume(), 200);
    }

    #[test]
    fn test_partial_document() {
        let config = WorldConfig::from_toml_str(
            "[streaming]\nfollow_viewpoint = true\n[streaming.bounds]\nmin = [-1, 0, -1]\nmax = [1, 1, 1]\n",
        )
        .unwrap();
        assert!(config.streaming.follow_viewpoint);
        assert_eq!(config.streaming.bounds, ChunkBounds::new([-1, 0, -1], [1, 1, 1]));
        assert_eq!(config.change_feed_capacity, 1024);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = WorldConfig::from_toml_str("[streaming.bounds]\nmin = [0, 3, 0]\nmax = [1, 1, 1]\n")
            .unwrap_err();
        assert!(matches!(err, VoxelError::InvalidConfig(msg) if msg.contains("min.y")));
    }

    #[test]
    fn test_syntax_error_rejected() {
        assert!(matches!(
            WorldConfig::from_toml_str("streaming = ["),
            Err(VoxelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(WorldConfig::from_toml_str("change_feed_capacity = 0").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = WorldConfig::default();
        config.streaming.follow_viewpoint = true;
        let text = config.to_toml_string().unwrap();
        assert_eq!(WorldConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            WorldConfig::load("/nonexistent/voxels.toml"),
            Err(VoxelError::InvalidConfig(_))
        ));
    }
}
