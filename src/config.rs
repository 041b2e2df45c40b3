//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONFIG_DIR_NAME, DEFAULT_CONTINUE_LABEL, DEFAULT_FINISH_LABEL, DEFAULT_LOADING_LABEL,
    DEFAULT_PLACEHOLDER_LABEL, DEFAULT_UNAVAILABLE_LABEL,
};
use crate::models::{default_layers, LayerDescriptor};

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// How loaded catalogs reach the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PopulationMode {
    /// Each control is populated as soon as its own catalog arrives
    #[default]
    Incremental,
    /// Controls are populated together once every catalog has arrived
    Batch,
}

/// Where color catalogs come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// Directory holding catalog files; defaults to the config directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Base URL for catalogs served over HTTP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-catalog fetch timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl CatalogConfig {
    /// Fetch timeout as a [`Duration`], if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Session behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Select the first color of a freshly loaded catalog
    #[serde(default = "default_true")]
    pub default_to_first_color: bool,
    /// Control population strategy
    #[serde(default)]
    pub population: PopulationMode,
}

fn default_true() -> bool {
    true
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            default_to_first_color: true,
            population: PopulationMode::default(),
        }
    }
}

/// UI texts and preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Forward button label on every step but the last
    pub continue_label: String,
    /// Forward button label on the last step
    pub finish_label: String,
    /// Placeholder option of every selection control
    pub placeholder_label: String,
    /// Gallery text while a catalog is loading
    pub loading_label: String,
    /// Gallery text when a catalog has no colors
    pub unavailable_label: String,
    /// Theme mode preference (Auto, Dark, Light)
    pub theme_mode: ThemeMode,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            continue_label: DEFAULT_CONTINUE_LABEL.to_string(),
            finish_label: DEFAULT_FINISH_LABEL.to_string(),
            placeholder_label: DEFAULT_PLACEHOLDER_LABEL.to_string(),
            loading_label: DEFAULT_LOADING_LABEL.to_string(),
            unavailable_label: DEFAULT_UNAVAILABLE_LABEL.to_string(),
            theme_mode: ThemeMode::default(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/OutfitWizard/config.toml`
/// - macOS: `~/Library/Application Support/OutfitWizard/config.toml`
/// - Windows: `%APPDATA%\OutfitWizard\config.toml`
///
/// # Validation
///
/// - at least one layer
/// - layer ids are unique and non-empty
/// - every layer names a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog source settings
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Session behavior
    #[serde(default)]
    pub behavior: BehaviorConfig,
    /// UI texts
    #[serde(default)]
    pub ui: UiConfig,
    /// Layers in wizard order
    #[serde(default = "default_layers")]
    pub layers: Vec<LayerDescriptor>,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            behavior: BehaviorConfig::default(),
            ui: UiConfig::default(),
            layers: default_layers(),
        }
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/OutfitWizard/`
    /// - macOS: `~/Library/Application Support/OutfitWizard/`
    /// - Windows: `%APPDATA%\OutfitWizard\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default location.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the default location using atomic write.
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to `path`.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            anyhow::bail!("At least one layer must be configured");
        }

        let mut seen = HashSet::new();
        for layer in &self.layers {
            if layer.id.trim().is_empty() {
                anyhow::bail!("Layer id must not be empty");
            }
            if !seen.insert(layer.id.as_str()) {
                anyhow::bail!("Duplicate layer id: {}", layer.id);
            }
            if layer.catalog_source.trim().is_empty() {
                anyhow::bail!("Layer '{}' has no catalog locator", layer.id);
            }
        }

        if let Some(url) = &self.catalog.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("Catalog base URL must be http(s): {url}");
            }
        }

        if self.catalog.timeout_ms == Some(0) {
            anyhow::bail!("Catalog timeout must be greater than zero");
        }

        Ok(())
    }

    /// Directory used for file catalogs: the configured root, or the config directory.
    pub fn catalog_root(&self) -> Result<PathBuf> {
        match &self.catalog.root {
            Some(root) => Ok(root.clone()),
            None => Self::config_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
