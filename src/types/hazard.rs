//! Threat and distraction sub-states

use serde::{Deserialize, Serialize};

/// Cause recorded when the boat is losing health
pub const UNDER_ATTACK: &str = "Under Attack!";

/// "Under threat" flag with a free-text cause
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hazard {
    pub active: bool,
    /// Cause label, empty when unknown or safe
    pub cause: String,
}

impl Hazard {
    pub fn safe() -> Self {
        Self::default()
    }

    pub fn threat(cause: impl Into<String>) -> Self {
        Self {
            active: true,
            cause: cause.into(),
        }
    }

    /// Health is dropping, attacker unknown
    pub fn under_attack() -> Self {
        Self::threat(UNDER_ATTACK)
    }

    pub fn text(&self) -> String {
        if !self.active {
            return "Safe".to_string();
        }
        if self.cause.is_empty() || self.cause == UNDER_ATTACK {
            "UNDER ATTACK!".to_string()
        } else {
            format!("{} ATTACKING!", self.cause)
        }
    }
}

/// Whether a pickpocket target is currently distracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Distraction {
    pub distracted: bool,
    /// Seconds the current distraction has lasted (0 when not distracted)
    pub distracted_secs: u64,
    /// Seconds since the last distraction ended (0 while distracted or never seen)
    pub secs_since_last: u64,
}

impl Distraction {
    pub fn status_text(&self) -> &'static str {
        if self.distracted {
            "DISTRACTED"
        } else {
            "ALERT"
        }
    }

    /// " (12s)" while distracted, " (30s ago)" afterwards
    pub fn time_text(&self) -> String {
        if self.distracted && self.distracted_secs > 0 {
            return format!(" ({}s)", self.distracted_secs);
        }
        if !self.distracted && self.secs_since_last > 0 {
            return format!(" ({}s ago)", self.secs_since_last);
        }
        String::new()
    }
}
