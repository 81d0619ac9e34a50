//! Alert conditions and alert events
//! Codes follow the A1xx (salvaging) / A2xx (thieving) / A0xx (shared) taxonomy

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ActivityKind;

/// Every named alert condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    // =========================================================================
    // A0xx: Shared
    // =========================================================================
    /// Subject stopped performing the activity
    PlayerIdle,

    // =========================================================================
    // A1xx: Salvaging
    // =========================================================================
    /// Boat health at or below the configured threshold
    LowHealth,
    /// Inventory full while actively salvaging
    InventoryFull,
    /// Cargo hold full
    CargoFull,
    /// Crew present but none salvaging
    CrewIdle,
    /// Boat under attack
    Hazard,
    /// Sorting finished (authoritative message, one-shot)
    SortingDone,

    // =========================================================================
    // A2xx: Thieving
    // =========================================================================
    /// A wealthy citizen became distracted
    DistractionStart,
    /// The distraction ended
    DistractionEnd,
    /// Coin pouches at the carry limit
    PouchFull,
}

impl AlertKind {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::PlayerIdle => "A001_PLAYER_IDLE",
            Self::LowHealth => "A101_LOW_HEALTH",
            Self::InventoryFull => "A102_INVENTORY_FULL",
            Self::CargoFull => "A103_CARGO_FULL",
            Self::CrewIdle => "A104_CREW_IDLE",
            Self::Hazard => "A105_HAZARD",
            Self::SortingDone => "A106_SORTING_DONE",
            Self::DistractionStart => "A201_DISTRACTION_START",
            Self::DistractionEnd => "A202_DISTRACTION_END",
            Self::PouchFull => "A203_POUCH_FULL",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::PlayerIdle => "Player is idle",
            Self::LowHealth => "Boat health is low",
            Self::InventoryFull => "Inventory is full",
            Self::CargoFull => "Cargo hold is full",
            Self::CrewIdle => "Crew stopped salvaging",
            Self::Hazard => "Boat is under attack",
            Self::SortingDone => "No more salvage to sort",
            Self::DistractionStart => "Citizen distracted",
            Self::DistractionEnd => "Citizen no longer distracted",
            Self::PouchFull => "Coin pouches are full",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// One condition evaluated during a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub kind: AlertKind,
    /// Predicate result for this pass
    pub holds: bool,
    /// Disabled conditions are skipped entirely
    pub enabled: bool,
    /// Current values, used as alert context
    pub detail: String,
}

impl Condition {
    pub fn new(kind: AlertKind, holds: bool, enabled: bool, detail: impl Into<String>) -> Self {
        Self {
            kind,
            holds,
            enabled,
            detail: detail.into(),
        }
    }
}

/// A fired alert, handed to whatever turns it into a cue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub kind: AlertKind,
    pub activity: ActivityKind,
    pub timestamp: DateTime<Utc>,
    /// Values that made the condition true
    pub detail: String,
}

impl AlertEvent {
    pub fn new(
        kind: AlertKind,
        activity: ActivityKind,
        timestamp: DateTime<Utc>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            activity,
            timestamp,
            detail: detail.into(),
        }
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "alert={} | activity={} | {}",
            self.kind.code(),
            self.activity.slug(),
            self.detail
        )
    }
}
