//! Configuration file support for strokepick.
//!
//! This module handles loading and validating engine settings from the
//! configuration file located at `~/.config/strokepick/config.toml`.
//! Settings include the selection policy, pointer handling, stroke
//! styling hints, and gesture lifecycle tuning.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ArmingMode, SelectionPolicy};
pub use types::{GestureConfig, PointerConfig, SelectionConfig, StrokeConfig};

// Re-export for public API (unused internally but part of public interface)
#[allow(unused_imports)]
pub use enums::ColorSpec;

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure containing all engine settings.
///
/// This is the root configuration type that gets deserialized from the
/// TOML file. All fields have sensible defaults and will use those if not
/// specified in the config file.
///
/// # Example TOML
/// ```toml
/// [selection]
/// policy = "toggle"
/// clear_on_disable = true
///
/// [pointer]
/// multi_pointer = true
/// arming = "double-tap"
///
/// [stroke]
/// line_color = "black"
/// line_width = 5.0
///
/// [gesture]
/// cooldown_ms = 50
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Selection behavior (policy, clear-on-disable)
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Pointer handling (multi-pointer, arming)
    #[serde(default)]
    pub pointer: PointerConfig,

    /// Stroke styling hints for the renderer
    #[serde(default)]
    pub stroke: StrokeConfig,

    /// Gesture lifecycle tuning
    #[serde(default)]
    pub gesture: GestureConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// This method ensures that user-provided config values won't cause
    /// erratic behavior. Invalid values are clamped to the nearest valid
    /// value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `stroke.line_width`: 1.0 - 20.0
    /// - `gesture.cooldown_ms`: 0 - 1000
    /// - `pointer.double_tap_window_ms`: 50 - 2000
    fn validate_and_clamp(&mut self) {
        // Line width: 1.0 - 20.0
        if !(1.0..=20.0).contains(&self.stroke.line_width) {
            log::warn!(
                "Invalid line_width {:.1}, clamping to 1.0-20.0 range",
                self.stroke.line_width
            );
            self.stroke.line_width = self.stroke.line_width.clamp(1.0, 20.0);
        }

        // Cooldown: 0 - 1000 ms
        if self.gesture.cooldown_ms > 1000 {
            log::warn!(
                "Invalid cooldown_ms {}, clamping to 0-1000 range",
                self.gesture.cooldown_ms
            );
            self.gesture.cooldown_ms = 1000;
        }

        // Double-tap window: 50 - 2000 ms
        if !(50..=2000).contains(&self.pointer.double_tap_window_ms) {
            log::warn!(
                "Invalid double_tap_window_ms {}, clamping to 50-2000 range",
                self.pointer.double_tap_window_ms
            );
            self.pointer.double_tap_window_ms = self.pointer.double_tap_window_ms.clamp(50, 2000);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/strokepick/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    /// (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("strokepick");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// Attempts to read and parse the config file at
    /// `~/.config/strokepick/config.toml`. If the file doesn't exist,
    /// returns a Config with default values. All loaded values are
    /// validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to file.
    ///
    /// Serializes the config to TOML format and writes it to
    /// `~/.config/strokepick/config.toml`. Creates the parent directory if
    /// it doesn't exist.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Create directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to the user's
    /// config directory.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file() -> Result<()> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        // Create directory
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(&config_path, default_config)?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file format, for external
    /// tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
