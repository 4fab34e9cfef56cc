use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Directory name under the platform config dir holding config and logs.
pub const APP_CONFIG_DIR: &str = "SvgColorShifter";

/// How many recently opened files are remembered.
const MAX_RECENT_FILES: usize = 8;

pub const EXPORT_SCALE_MIN: f32 = 0.25;
pub const EXPORT_SCALE_MAX: f32 = 8.0;

fn default_export_scale() -> f32 {
    1.0
}

/// UI conveniences persisted between runs. Nothing in here changes recolor
/// semantics; deleting the file only loses dialog seeds and the recents
/// list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory the file dialogs open in, updated on every successful load
    #[serde(default)]
    pub last_open_dir: Option<PathBuf>,

    /// Raster scale for PNG export and batch conversion
    #[serde(default = "default_export_scale")]
    pub export_scale: f32,

    /// Recently opened files, most recent first
    #[serde(default)]
    pub recent_files: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            last_open_dir: None,
            export_scale: default_export_scale(),
            recent_files: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from the platform-specific config directory.
    /// Creates a default config file if none exists.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content =
                fs::read_to_string(&config_path).map_err(|source| ConfigError::LoadFailed {
                    path: config_path.display().to_string(),
                    source: Box::new(source),
                })?;
            let config: Config =
                serde_json::from_str(&content).map_err(|source| ConfigError::LoadFailed {
                    path: config_path.display().to_string(),
                    source: Box::new(source),
                })?;
            tracing::info!("Loaded config from: {}", config_path.display());
            Ok(config.normalized())
        } else {
            let config = Config::default();
            config.save()?;
            tracing::info!("Created default config at: {}", config_path.display());
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let json =
            serde_json::to_string_pretty(self).map_err(|source| ConfigError::SaveFailed {
                path: config_path.display().to_string(),
                source: Box::new(source),
            })?;
        fs::write(&config_path, json).map_err(|source| ConfigError::SaveFailed {
            path: config_path.display().to_string(),
            source: Box::new(source),
        })?;

        Ok(())
    }

    /// Clamp loaded values into their valid ranges.
    fn normalized(mut self) -> Self {
        self.export_scale = self.export_scale.clamp(EXPORT_SCALE_MIN, EXPORT_SCALE_MAX);
        self.recent_files.truncate(MAX_RECENT_FILES);
        self
    }

    /// Record a successfully opened file: front of the recents list, dialog
    /// seed directory updated.
    pub fn remember_opened(&mut self, path: &Path) {
        self.recent_files.retain(|recent| recent != path);
        self.recent_files.insert(0, path.to_path_buf());
        self.recent_files.truncate(MAX_RECENT_FILES);
        self.last_open_dir = path.parent().map(Path::to_path_buf);
    }

    /// Application directory under the platform config dir.
    pub fn app_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_CONFIG_DIR))
            .ok_or(ConfigError::NoConfigDir)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::app_dir()?.join("config.json"))
    }

    /// Get the config file path (for display purposes)
    pub fn config_path_display() -> String {
        Self::config_path()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.export_scale, 1.0);
        assert!(config.last_open_dir.is_none());
        assert!(config.recent_files.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.export_scale = 2.0;
        config.remember_opened(Path::new("/icons/logo.svg"));

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.export_scale, 2.0);
        assert_eq!(deserialized.recent_files, config.recent_files);
        assert_eq!(deserialized.last_open_dir, Some(PathBuf::from("/icons")));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.export_scale, 1.0);
        assert!(config.recent_files.is_empty());
    }

    #[test]
    fn test_normalized_clamps_scale() {
        let config: Config = serde_json::from_str(r#"{"export_scale": 100.0}"#).unwrap();
        assert_eq!(config.normalized().export_scale, EXPORT_SCALE_MAX);

        let config: Config = serde_json::from_str(r#"{"export_scale": 0.0}"#).unwrap();
        assert_eq!(config.normalized().export_scale, EXPORT_SCALE_MIN);
    }

    #[test]
    fn test_remember_opened_dedupes_and_caps() {
        let mut config = Config::default();
        for index in 0..12 {
            config.remember_opened(Path::new(&format!("/icons/file-{index}.svg")));
        }
        assert_eq!(config.recent_files.len(), 8);
        assert_eq!(config.recent_files[0], PathBuf::from("/icons/file-11.svg"));

        config.remember_opened(Path::new("/icons/file-9.svg"));
        assert_eq!(config.recent_files.len(), 8);
        assert_eq!(config.recent_files[0], PathBuf::from("/icons/file-9.svg"));
        assert_eq!(
            config
                .recent_files
                .iter()
                .filter(|path| path.ends_with("file-9.svg"))
                .count(),
            1
        );
    }
}
