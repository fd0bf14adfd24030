//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cart_commerce::CartConfig;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["cart.toml", ".cart.toml", "cart.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart widget settings.
    #[serde(default)]
    pub widget: CartConfig,

    /// Where the cart record lives.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Pixel event output.
    #[serde(default)]
    pub pixel: PixelConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

/// Generate a default config file.
pub fn generate_default_config() -> Result<String> {
    let body = toml::to_string_pretty(&CliConfig::default())?;
    Ok(format!(
        "# Cart CLI configuration\n# See `cart config show` for the effective values.\n\n{}",
        body
    ))
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one file per record. Relative paths resolve against
    /// the directory of the config file.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".cart")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

/// Pixel event configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelConfig {
    /// Whether a tracker is loaded. When false, events are dropped.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// File to append events to as JSON lines. Events go to stderr when
    /// unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for PixelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log: None,
        }
    }
}
