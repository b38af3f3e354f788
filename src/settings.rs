//! Optional JSON settings file layered over the built-in defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::{
    ArenaSize, ConfigError, ReversalRule, SelfCollisionRule, SimConfig, DEFAULT_ARENA_HEIGHT,
    DEFAULT_ARENA_WIDTH, DEFAULT_PICKUP_TOLERANCE, DEFAULT_STEP_LENGTH, DEFAULT_TICK_INTERVAL_MS,
    MIN_TICK_INTERVAL_MS,
};

const APP_DIR_NAME: &str = "pixel-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Failure to load or validate a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

impl From<SettingsError> for io::Error {
    fn from(error: SettingsError) -> Self {
        let kind = match &error {
            SettingsError::Read { source, .. } => source.kind(),
            SettingsError::Parse { .. } => io::ErrorKind::InvalidData,
            SettingsError::Invalid(_) => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, error)
    }
}

/// Raw settings as stored on disk; every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub arena_width: Option<f64>,
    pub arena_height: Option<f64>,
    pub step_length: Option<f64>,
    pub pickup_tolerance: Option<f64>,
    pub tick_interval_ms: Option<u64>,
    pub self_collision: Option<SelfCollisionRule>,
    pub reversal: Option<ReversalRule>,
}

/// Validated settings ready for the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub sim: SimConfig,
    pub tick_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}

impl SettingsFile {
    /// Fills omitted fields with defaults and validates the result.
    pub fn resolve(&self) -> Result<Settings, ConfigError> {
        let arena = ArenaSize::new(
            self.arena_width.unwrap_or(DEFAULT_ARENA_WIDTH),
            self.arena_height.unwrap_or(DEFAULT_ARENA_HEIGHT),
        )?;

        let sim = SimConfig::new(
            arena,
            self.step_length.unwrap_or(DEFAULT_STEP_LENGTH),
            self.pickup_tolerance.unwrap_or(DEFAULT_PICKUP_TOLERANCE),
        )?
        .with_self_collision(self.self_collision.unwrap_or_default())
        .with_reversal(self.reversal.unwrap_or_default());

        let tick_interval_ms = self.tick_interval_ms.unwrap_or(DEFAULT_TICK_INTERVAL_MS);
        if tick_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(ConfigError::TickIntervalTooShort(tick_interval_ms));
        }

        Ok(Settings {
            sim,
            tick_interval: Duration::from_millis(tick_interval_ms),
        })
    }
}

/// Returns the platform-correct default settings path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads settings from `explicit`, or from the default path when `None`.
///
/// A missing default file yields the built-in defaults. A missing explicit
/// file is an error since the user asked for it by name.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, SettingsError> {
    match explicit {
        Some(path) => load_settings_from_path(path, false),
        None => load_settings_from_path(&settings_path(), true),
    }
}

fn load_settings_from_path(path: &Path, missing_ok: bool) -> Result<Settings, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if missing_ok && e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let file: SettingsFile =
        serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let settings = file.resolve()?;
    info!(path = %path.display(), ?settings, "loaded settings");
    Ok(settings)
}
