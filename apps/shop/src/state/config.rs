//! # Shop Configuration
//!
//! Settings loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     QRX_STORE_NAME="Samio Shop Dhaka"                                  │
//! │     QRX_QR_SIZE=256                                                    │
//! │     QRX_EXPORT_DIR=/tmp/qr                                             │
//! │     QRX_CLIPBOARD=off                                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <PATH>, or                                                │
//! │     ~/.config/qrx/shop.toml (Linux)                                    │
//! │     ~/Library/Application Support/com.samio.qrx/shop.toml (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shop.toml
//! store_name = "Samio Shop"
//! currency_symbol = "$"
//!
//! [qr]
//! size = 180
//! dark_color = "#000000"
//! light_color = "#ffffff"
//! quiet_zone = true
//!
//! [export]
//! directory = "/home/ada/Downloads"
//!
//! [clipboard]
//! enabled = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use qrx_core::{Money, STORE_NAME};
use qrx_export::RenderOptions;

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// How the QR symbol looks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrSettings {
    /// Minimum SVG edge length in pixels.
    pub size: u32,
    pub dark_color: String,
    pub light_color: String,
    pub quiet_zone: bool,
}

impl Default for QrSettings {
    fn default() -> Self {
        let defaults = RenderOptions::default();
        QrSettings {
            size: defaults.size,
            dark_color: defaults.dark_color,
            light_color: defaults.light_color,
            quiet_zone: defaults.quiet_zone,
        }
    }
}

/// Where `qr-code.svg` goes when `download` is given no directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardSettings {
    /// Off means every copy fails with "clipboard unavailable".
    pub enabled: bool,
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        ClipboardSettings { enabled: true }
    }
}

// =============================================================================
// Shop Config
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Shown in the session banner.
    pub store_name: String,

    /// Prefix for amounts in the cart table.
    pub currency_symbol: String,

    pub qr: QrSettings,

    pub export: ExportSettings,

    pub clipboard: ClipboardSettings,
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            store_name: STORE_NAME.to_string(),
            currency_symbol: "$".to_string(),
            qr: QrSettings::default(),
            export: ExportSettings::default(),
            clipboard: ClipboardSettings::default(),
        }
    }
}

impl ShopConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `config_path` if given (must exist), otherwise the
    ///    platform default path if present
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(path = %path.display(), "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(path = %path.display(), "Loading shop config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.qr.size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "qr.size".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        for (field, color) in [
            ("qr.dark_color", &self.qr.dark_color),
            ("qr.light_color", &self.qr.light_color),
        ] {
            if !is_hex_color(color) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("expected #rgb or #rrggbb, got '{}'", color),
                });
            }
        }

        Ok(())
    }

    /// Applies `QRX_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = var("QRX_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(size) = var("QRX_QR_SIZE") {
            match size.parse::<u32>() {
                Ok(size) => {
                    debug!(size, "Overriding QR size from environment");
                    self.qr.size = size;
                }
                Err(_) => warn!(value = %size, "Ignoring non-numeric QRX_QR_SIZE"),
            }
        }

        if let Some(dir) = var("QRX_EXPORT_DIR") {
            debug!(dir = %dir, "Overriding export directory from environment");
            self.export.directory = Some(PathBuf::from(dir));
        }

        if let Some(flag) = var("QRX_CLIPBOARD") {
            match flag.to_lowercase().as_str() {
                "on" | "true" | "1" => self.clipboard.enabled = true,
                "off" | "false" | "0" => self.clipboard.enabled = false,
                _ => warn!(value = %flag, "Unknown QRX_CLIPBOARD value"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "samio", "qrx")
            .map(|dirs| dirs.config_dir().join("shop.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Renderer settings for the QR symbol.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            size: self.qr.size,
            dark_color: self.qr.dark_color.clone(),
            light_color: self.qr.light_color.clone(),
            quiet_zone: self.qr.quiet_zone,
        }
    }

    /// Directory for `qr-code.svg`; the working directory if unset.
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Formats an amount with the configured currency symbol.
    pub fn format_money(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ShopConfig::default();
        assert_eq!(config.store_name, "Samio Shop");
        assert_eq!(config.qr.size, 180);
        assert!(config.clipboard.enabled);
        assert_eq!(config.export_dir(), PathBuf::from("."));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ShopConfig::default();

        config.qr.size = 0;
        assert!(config.validate().is_err());

        config.qr.size = 256;
        config.qr.dark_color = "black".to_string();
        assert!(config.validate().is_err());

        config.qr.dark_color = "#123".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ShopConfig = toml::from_str(
            r##"
            store_name = "Samio Shop Dhaka"

            [qr]
            size = 240
            "##,
        )
        .unwrap();

        assert_eq!(config.store_name, "Samio Shop Dhaka");
        assert_eq!(config.qr.size, 240);
        assert_eq!(config.qr.dark_color, "#000000");
        assert!(config.clipboard.enabled);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        std::fs::write(&path, "currency_symbol = \"€\"\n").unwrap();

        let config = ShopConfig::load(Some(&path)).unwrap();
        assert_eq!(config.currency_symbol, "€");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = ShopConfig::load(Some(Path::new("/definitely/not/here/shop.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("QRX_STORE_NAME", "Night Market"),
            ("QRX_QR_SIZE", "320"),
            ("QRX_EXPORT_DIR", "/tmp/qr"),
            ("QRX_CLIPBOARD", "off"),
        ]
        .into_iter()
        .collect();

        let mut config = ShopConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.store_name, "Night Market");
        assert_eq!(config.qr.size, 320);
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/qr"));
        assert!(!config.clipboard.enabled);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = ShopConfig::default();
        config.apply_overrides(|key| match key {
            "QRX_QR_SIZE" => Some("huge".to_string()),
            "QRX_CLIPBOARD" => Some("maybe".to_string()),
            _ => None,
        });

        assert_eq!(config.qr.size, 180);
        assert!(config.clipboard.enabled);
    }

    #[test]
    fn test_format_money() {
        let mut config = ShopConfig::default();
        assert_eq!(config.format_money(Money::from_cents(169_700)), "$1697.00");

        config.currency_symbol = "৳".to_string();
        assert_eq!(config.format_money(Money::from_cents(4999)), "৳49.99");
    }

    #[test]
    fn test_toml_round_trip_sections() {
        let toml_str = toml::to_string_pretty(&ShopConfig::default()).unwrap();
        assert!(toml_str.contains("[qr]"));
        assert!(toml_str.contains("[clipboard]"));
    }
}
