//! Monitor configuration
//!
//! Loaded from TOML; every field has a default so a partial (or missing)
//! file is valid. Values outside their allowed range are rejected by
//! `validate`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{
    DEFAULT_HAZARD_RANGE, DEFAULT_LOW_HEALTH_PERCENT, DEFAULT_SALVAGE_IDLE_MS,
    DEFAULT_THIEVING_IDLE_SECS,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

/// Salvaging section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalvageConfig {
    /// Health percentage at or below which the low-health alert fires
    pub low_health_percent: u32,
    /// Debounce window before the player counts as idle
    pub idle_threshold_ms: u64,
    /// Tiles within which a sea monster counts as a hazard
    pub hazard_range: i32,
    pub hide_other_vessels: bool,

    pub alert_low_health: bool,
    pub alert_inventory_full: bool,
    pub alert_cargo_full: bool,
    pub alert_player_idle: bool,
    pub alert_sorting_done: bool,
    pub alert_crew_idle: bool,
    pub alert_hazard: bool,
}

impl Default for SalvageConfig {
    fn default() -> Self {
        Self {
            low_health_percent: DEFAULT_LOW_HEALTH_PERCENT,
            idle_threshold_ms: DEFAULT_SALVAGE_IDLE_MS,
            hazard_range: DEFAULT_HAZARD_RANGE,
            hide_other_vessels: true,
            alert_low_health: true,
            alert_inventory_full: false,
            alert_cargo_full: true,
            alert_player_idle: true,
            alert_sorting_done: true,
            alert_crew_idle: false,
            alert_hazard: true,
        }
    }
}

/// Thieving section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThievingConfig {
    pub enabled: bool,
    pub idle_threshold_secs: u64,
    pub hide_npcs_during_distraction: bool,

    pub alert_distraction_start: bool,
    pub alert_distraction_end: bool,
    pub alert_pouch_full: bool,
    pub alert_player_idle: bool,
}

impl Default for ThievingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            idle_threshold_secs: DEFAULT_THIEVING_IDLE_SECS,
            hide_npcs_during_distraction: false,
            alert_distraction_start: true,
            alert_distraction_end: true,
            alert_pouch_full: true,
            alert_player_idle: true,
        }
    }
}

impl ThievingConfig {
    pub fn idle_threshold_ms(&self) -> u64 {
        self.idle_threshold_secs.saturating_mul(1000)
    }
}

/// Complete monitor configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub salvage: SalvageConfig,
    pub thieving: ThievingConfig,
}

impl MonitorConfig {
    /// Load from a TOML file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: MonitorConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every bounded value
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "salvage.low_health_percent",
            self.salvage.low_health_percent as u64,
            1,
            100,
        )?;
        check_range(
            "salvage.idle_threshold_ms",
            self.salvage.idle_threshold_ms,
            500,
            10_000,
        )?;
        check_range(
            "salvage.hazard_range",
            self.salvage.hazard_range.max(0) as u64,
            1,
            20,
        )?;
        check_range(
            "thieving.idle_threshold_secs",
            self.thieving.idle_threshold_secs,
            1,
            60,
        )?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
