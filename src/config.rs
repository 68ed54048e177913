use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::models::Gender;
use crate::tables::{ReferenceTables, REFERENCE_DISTANCE_M};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// Reference table locations
    pub tables: TableSettings,

    /// Values used when a command leaves them out
    pub defaults: DefaultSettings,

    /// Output preferences
    pub output: OutputSettings,

    /// Logging setup
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,
}

/// Reference table files; unset paths use the bundled tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Rowing table JSON file
    pub rowing_path: Option<PathBuf>,

    /// Strength table JSON file
    pub strength_path: Option<PathBuf>,
}

/// Athlete defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSettings {
    pub gender: Option<Gender>,

    /// Body weight in kg
    pub body_weight: Option<Decimal>,

    /// Erg distance in meters
    pub distance: u32,
}

/// Output format of command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,

    /// Colored terminal output
    pub color: bool,
}

impl Default for ConfigMetadata {
    fn default() -> Self {
        ConfigMetadata {
            version: "1.0".to_string(),
        }
    }
}

impl Default for DefaultSettings {
    fn default() -> Self {
        DefaultSettings {
            gender: None,
            body_weight: None,
            distance: REFERENCE_DISTANCE_M,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        // Create directory if it doesn't exist
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let toml_content = self.to_toml()?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).with_context(|| "Failed to serialize configuration to TOML")
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rowstrength")
            .join("config.toml")
    }

    /// Load configuration, using defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the configuration for a command line run
    ///
    /// An explicitly given file must exist unless `allow_missing` is set,
    /// which is the case when the caller is about to create it. Without an
    /// explicit file the default location is used and may be absent.
    pub fn resolve(explicit: Option<&Path>, allow_missing: bool) -> Result<(PathBuf, Self)> {
        match explicit {
            Some(path) if !allow_missing => Ok((path.to_path_buf(), Self::load_from_file(path)?)),
            Some(path) => Ok((path.to_path_buf(), Self::load_or_default(path)?)),
            None => {
                let path = Self::default_config_path();
                let config = Self::load_or_default(&path)?;
                Ok((path, config))
            }
        }
    }

    /// Write a default configuration unless `path` already exists
    ///
    /// Returns whether a file was written.
    pub fn init_file<P: AsRef<Path>>(path: P) -> Result<bool> {
        if path.as_ref().exists() {
            return Ok(false);
        }
        Self::default().save_to_file(path)?;
        Ok(true)
    }

    /// Load the reference tables this configuration points at
    pub fn load_tables(&self) -> Result<ReferenceTables> {
        ReferenceTables::load(
            self.tables.rowing_path.as_deref(),
            self.tables.strength_path.as_deref(),
        )
        .with_context(|| "Failed to load reference tables")
    }
}
