//! Progression values derived from the experience curve

use serde::{Deserialize, Serialize};

/// Progress within the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelProgress {
    /// Percent of the current level completed (0-100)
    Percent(u32),
    /// Level 99 reached; no next level exists
    MaxLevel,
}

/// Derived progression for one skill
///
/// At the max level every "next level" figure is zero and
/// `progress` is `LevelProgress::MaxLevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    /// Total experience
    pub experience: u32,
    /// Current level (1..=99)
    pub level: u8,
    /// Experience at which the current level starts
    pub xp_for_current_level: u32,
    /// Experience at which the next level starts
    pub xp_for_next_level: u32,
    /// Experience earned inside the current level
    pub xp_in_level: u32,
    /// Experience span of the current level
    pub xp_needed: u32,
    /// Experience still missing for the next level
    pub xp_remaining: u32,
    pub progress: LevelProgress,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            experience: 0,
            level: 1,
            xp_for_current_level: 0,
            xp_for_next_level: 0,
            xp_in_level: 0,
            xp_needed: 0,
            xp_remaining: 0,
            progress: LevelProgress::Percent(0),
        }
    }
}

impl Progression {
    pub fn is_max_level(&self) -> bool {
        self.progress == LevelProgress::MaxLevel
    }

    /// Percent for a progress bar; a maxed bar is full
    pub fn bar_percent(&self) -> u32 {
        match self.progress {
            LevelProgress::Percent(p) => p,
            LevelProgress::MaxLevel => 100,
        }
    }

    /// "12.3K left" or "Max Level"
    pub fn remaining_text(&self) -> String {
        if self.is_max_level() || self.xp_remaining == 0 {
            return "Max Level".to_string();
        }
        format!("{} left", format_number(self.xp_remaining))
    }
}

/// Compact number formatting: 1.2M, 45.6K, 999
pub fn format_number(num: u32) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}
