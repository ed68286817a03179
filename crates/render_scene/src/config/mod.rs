//! Configuration system

pub use serde::{Serialize, Deserialize};

use crate::render::MAX_LIGHT_COUNT;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
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

    /// A value is outside its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Scene extraction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of point/spot lights the GPU light buffer holds
    pub light_capacity: usize,

    /// Entities to reserve room for in the membership set
    pub initial_entity_capacity: usize,

    /// Log at debug level when budgeting drops lights
    pub log_dropped_lights: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            light_capacity: MAX_LIGHT_COUNT,
            initial_entity_capacity: 0,
            log_dropped_lights: true,
        }
    }
}

impl SceneConfig {
    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.light_capacity == 0 || self.light_capacity > MAX_LIGHT_COUNT {
            return Err(ConfigError::Invalid(format!(
                "light_capacity must be in 1..={}, got {}",
                MAX_LIGHT_COUNT, self.light_capacity
            )));
        }
        Ok(())
    }
}

impl Config for SceneConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = SceneConfig::from_toml_str("light_capacity = 64").unwrap();
        assert_eq!(config.light_capacity, 64);
        assert_eq!(config.initial_entity_capacity, 0);
        assert!(config.log_dropped_lights);
    }

    #[test]
    fn test_rejects_capacity_over_gpu_limit() {
        let err = SceneConfig::from_toml_str("light_capacity = 300").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = SceneConfig::from_toml_str("light_capacity = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = SceneConfig::default().save_to_file("scene.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_ron_file_round_trip() {
        let path = std::env::temp_dir().join(format!("render_scene_config_{}.ron", std::process::id()));
        let path = path.to_string_lossy().to_string();
        let config = SceneConfig {
            light_capacity: 32,
            initial_entity_capacity: 128,
            log_dropped_lights: false,
        };

        config.save_to_file(&path).unwrap();
        let loaded = SceneConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }
}
