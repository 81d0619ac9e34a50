//! Activity status and engine phase definitions

use serde::{Deserialize, Serialize};

/// Which monitored activity a session belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Salvaging,
    Thieving,
}

impl ActivityKind {
    /// Lowercase identifier used in URLs and persisted keys
    pub fn slug(&self) -> &'static str {
        match self {
            ActivityKind::Salvaging => "salvaging",
            ActivityKind::Thieving => "thieving",
        }
    }

    /// Parse a slug back into a kind
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.to_ascii_lowercase().as_str() {
            "salvaging" | "salvage" => Some(ActivityKind::Salvaging),
            "thieving" => Some(ActivityKind::Thieving),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActivityKind::Salvaging => "Salvaging",
            ActivityKind::Thieving => "Thieving",
        };
        write!(f, "{}", name)
    }
}

/// The debounced semantic status of the monitored subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
    /// Performing the primary activity (salvaging, pickpocketing)
    Active,
    /// Performing the secondary activity (sorting salvage)
    SecondaryActive,
    /// No activity for longer than the debounce window
    #[default]
    Idle,
}

impl ActivityStatus {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            ActivityStatus::Active => "\x1b[32m",          // Green
            ActivityStatus::SecondaryActive => "\x1b[33m", // Yellow
            ActivityStatus::Idle => "\x1b[31m",            // Red
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for status
    pub fn emoji(&self) -> &'static str {
        match self {
            ActivityStatus::Active => "⚓",
            ActivityStatus::SecondaryActive => "📦",
            ActivityStatus::Idle => "💤",
        }
    }

    /// Status label as the activity names it
    pub fn label(&self, kind: ActivityKind) -> &'static str {
        match (self, kind) {
            (ActivityStatus::Active, ActivityKind::Salvaging) => "SALVAGING",
            (ActivityStatus::Active, ActivityKind::Thieving) => "PICKPOCKETING",
            (ActivityStatus::SecondaryActive, _) => "SORTING",
            (ActivityStatus::Idle, _) => "IDLE",
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == ActivityStatus::Idle
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActivityStatus::Active => "ACTIVE",
            ActivityStatus::SecondaryActive => "SECONDARY_ACTIVE",
            ActivityStatus::Idle => "IDLE",
        };
        write!(f, "{}", name)
    }
}

/// Whole-engine phase, driven by the spatial gate
///
/// - DORMANT → MONITORING: gate becomes true
/// - MONITORING → DORMANT: gate becomes false, state frozen at last values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnginePhase {
    #[default]
    Dormant,
    Monitoring,
}

impl std::fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EnginePhase::Dormant => "DORMANT",
            EnginePhase::Monitoring => "MONITORING",
        };
        write!(f, "{}", name)
    }
}
