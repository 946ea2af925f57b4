// SPDX-License-Identifier: MPL-2.0
//! This module handles the engine's persisted settings, stored as a
//! sectioned `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[timing]` - Collapse delay, hover suppression, success dismiss, animation
//! - `[behavior]` - Auto-collapse switch and event log size
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass a directory to `load_with_override()`
//! 3. Set `TOASTLINE_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use toastline::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.timing.collapse_delay_ms = Some(3_000);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::diagnostics::BufferCapacity;
use crate::domain::timing::{
    AnimationDuration, CollapseDelay, DismissDelay, EngineConfig, HoverSuppression,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Toastline";

/// Environment variable overriding the config directory.
pub const ENV_CONFIG_DIR: &str = "TOASTLINE_CONFIG_DIR";

/// Warning key returned by [`load`] when the settings file cannot be parsed.
pub const LOAD_ERROR_WARNING: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// Timing settings, all in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    /// Delay before a visible notification collapses.
    #[serde(
        default = "default_collapse_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub collapse_delay_ms: Option<u64>,

    /// Window during which auto-collapse is suppressed after an expand.
    #[serde(
        default = "default_hover_suppression_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub hover_suppression_ms: Option<u64>,

    /// Delay before a success notification dismisses itself.
    #[serde(
        default = "default_success_dismiss_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub success_dismiss_ms: Option<u64>,

    /// Duration of a collapse or expand transition.
    #[serde(default = "default_animation_ms", skip_serializing_if = "Option::is_none")]
    pub animation_ms: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            collapse_delay_ms: default_collapse_delay_ms(),
            hover_suppression_ms: default_hover_suppression_ms(),
            success_dismiss_ms: default_success_dismiss_ms(),
            animation_ms: default_animation_ms(),
        }
    }
}

/// Behavior switches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BehaviorConfig {
    /// Whether visible notifications collapse on their own.
    #[serde(default = "default_auto_collapse", skip_serializing_if = "Option::is_none")]
    pub auto_collapse: Option<bool>,

    /// Number of lifecycle events kept in memory.
    #[serde(
        default = "default_event_log_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_log_capacity: Option<usize>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            auto_collapse: default_auto_collapse(),
            event_log_capacity: default_event_log_capacity(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Engine settings with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Timing settings.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Behavior switches.
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

impl Config {
    /// Converts the raw settings into validated engine settings.
    ///
    /// Out-of-range values are clamped, and the hover window is stretched
    /// to outlast the collapse delay.
    #[must_use]
    pub fn engine(&self) -> EngineConfig {
        let timing = &self.timing;
        EngineConfig {
            collapse_delay: CollapseDelay::from_millis(
                timing.collapse_delay_ms.unwrap_or(DEFAULT_COLLAPSE_DELAY_MS),
            ),
            hover_suppression: HoverSuppression::from_millis(
                timing
                    .hover_suppression_ms
                    .unwrap_or(DEFAULT_HOVER_SUPPRESSION_MS),
            ),
            dismiss_delay: DismissDelay::from_millis(
                timing.success_dismiss_ms.unwrap_or(DEFAULT_SUCCESS_DISMISS_MS),
            ),
            animation: AnimationDuration::from_millis(
                timing.animation_ms.unwrap_or(DEFAULT_ANIMATION_MS),
            ),
            auto_collapse: self.behavior.auto_collapse.unwrap_or(DEFAULT_AUTO_COLLAPSE),
        }
        .normalized()
    }

    /// Returns the validated event log capacity.
    #[must_use]
    pub fn event_log_capacity(&self) -> BufferCapacity {
        BufferCapacity::from_setting(self.behavior.event_log_capacity)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

#[allow(clippy::unnecessary_wraps)]
fn default_collapse_delay_ms() -> Option<u64> {
    Some(DEFAULT_COLLAPSE_DELAY_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_hover_suppression_ms() -> Option<u64> {
    Some(DEFAULT_HOVER_SUPPRESSION_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_success_dismiss_ms() -> Option<u64> {
    Some(DEFAULT_SUCCESS_DISMISS_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_animation_ms() -> Option<u64> {
    Some(DEFAULT_ANIMATION_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_auto_collapse() -> Option<bool> {
    Some(DEFAULT_AUTO_COLLAPSE)
}

#[allow(clippy::unnecessary_wraps)]
fn default_event_log_capacity() -> Option<usize> {
    Some(DEFAULT_EVENT_LOG_CAPACITY)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory.
///
/// # Resolution Order
///
/// 1. `override_path` parameter (if `Some`)
/// 2. `TOASTLINE_CONFIG_DIR` environment variable (if set and non-empty)
/// 3. Platform config directory with the app name appended
///
/// Returns `None` if no platform config directory exists.
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional warning). If the file exists but
/// cannot be read, the defaults are returned with [`LOAD_ERROR_WARNING`].
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    warn!(path = %path.display(), %err, "falling back to default settings");
                    return (Config::default(), Some(LOAD_ERROR_WARNING.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration into a custom directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific file, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
