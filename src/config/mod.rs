// SPDX-License-Identifier: MPL-2.0
//! This module handles the engine's tunables, including loading and saving
//! them to a `lightbox.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use iced_lightbox::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Slow the transitions down
//! config.transition_duration_ms = Some(800);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // Resolve into the values the engine runs with
//! let tuning = config.tuning();
//! assert_eq!(tuning.transition_duration.as_millis(), 800);
//! ```

mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "lightbox.toml";
const APP_NAME: &str = "IcedLightbox";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub transition_duration_ms: Option<u64>,
    #[serde(default)]
    pub spring_damping: Option<f32>,
    #[serde(default)]
    pub max_zoom_scale: Option<f32>,
    #[serde(default)]
    pub double_tap_scale: Option<f32>,
    #[serde(default)]
    pub chrome_fade_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transition_duration_ms: Some(DEFAULT_TRANSITION_DURATION_MS),
            spring_damping: Some(DEFAULT_SPRING_DAMPING),
            max_zoom_scale: Some(DEFAULT_MAX_ZOOM_SCALE),
            double_tap_scale: Some(DEFAULT_DOUBLE_TAP_SCALE),
            chrome_fade_ms: Some(DEFAULT_CHROME_FADE_MS),
        }
    }
}

impl Config {
    /// Resolves optional fields into the values the engine runs with.
    ///
    /// Out-of-range values fall back to their defaults: a damping ratio must
    /// be in `(0, 1]`, scales must be at least 1.0 and durations non-zero.
    #[must_use]
    pub fn tuning(&self) -> Tuning {
        let duration_ms = self
            .transition_duration_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TRANSITION_DURATION_MS);
        let fade_ms = self
            .chrome_fade_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_CHROME_FADE_MS);

        Tuning {
            transition_duration: Duration::from_millis(duration_ms),
            spring_damping: self
                .spring_damping
                .filter(|d| *d > 0.0 && *d <= 1.0)
                .unwrap_or(DEFAULT_SPRING_DAMPING),
            max_zoom_scale: self
                .max_zoom_scale
                .filter(|s| *s >= 1.0)
                .unwrap_or(DEFAULT_MAX_ZOOM_SCALE),
            double_tap_scale: self
                .double_tap_scale
                .filter(|s| *s >= 1.0)
                .unwrap_or(DEFAULT_DOUBLE_TAP_SCALE),
            chrome_fade: Duration::from_millis(fade_ms),
        }
    }
}

/// Resolved engine tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub transition_duration: Duration,
    pub spring_damping: f32,
    pub max_zoom_scale: f32,
    pub double_tap_scale: f32,
    pub chrome_fade: Duration,
}

impl Default for Tuning {
    fn default() -> Self {
        Config::default().tuning()
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!("Failed to parse config at {:?}: {}", path, err);
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
