//! Business settings loading from settings.toml
//!
//! Holds the fixed store coordinates, the proximity-alert policy, and the
//! gamification / quota constants. Every field has a default matching the
//! shipped store, so a missing settings file is not an error.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Settings that shape derived views: proximity checks, the daily reward,
/// and the AI quota. Loaded from `settings.toml` when present.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreSettings {
    /// Latitude of the physical store
    pub store_lat: f64,
    /// Longitude of the physical store
    pub store_lng: f64,
    /// "Near the store" radius in kilometers
    pub proximity_radius_km: f64,
    /// Minimum hours between proximity notifications while a customer stays
    /// inside the radius (0 re-alerts on every check)
    pub proximity_realert_hours: i64,
    /// Points granted by the once-per-day login reward
    pub daily_reward_points: i64,
    /// Daily ceiling on mascot AI calls before the mascot is "tired"
    pub api_daily_limit: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            store_lat: 18.281_883_582_694_103,
            store_lng: -70.328_282_774_732_07,
            proximity_radius_km: 0.5,
            proximity_realert_hours: 6,
            daily_reward_points: 50,
            api_daily_limit: 100,
        }
    }
}

/// Loads business settings from a TOML file.
///
/// # Errors
/// Returns `Error::Config` if the file exists but cannot be read or parsed.
/// A missing file yields the defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<StoreSettings> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        tracing::debug!("No settings file at {:?}, using defaults", path_ref);
        return Ok(StoreSettings::default());
    }

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read settings file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {path_ref:?}: {e}"),
    })
}

/// Loads business settings from the default location (./settings.toml).
pub fn load_default_settings() -> Result<StoreSettings> {
    load_settings("settings.toml")
}
