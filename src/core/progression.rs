//! Experience curve: level ↔ experience lookups and level progress
//!
//! The table is the standard 99-level curve:
//! xp(L) = floor( Σ_{l=1}^{L-1} floor(l + 300 · 2^(l/7)) / 4 )

use lazy_static::lazy_static;

use crate::types::{LevelProgress, Progression};
use crate::MAX_LEVEL;

lazy_static! {
    /// XP_TABLE[i] = experience required for level i + 1
    static ref XP_TABLE: Vec<u32> = {
        let mut table = Vec::with_capacity(MAX_LEVEL as usize);
        table.push(0);
        let mut points: u64 = 0;
        for level in 1..MAX_LEVEL as u64 {
            points += (level as f64 + 300.0 * 2f64.powf(level as f64 / 7.0)).floor() as u64;
            table.push((points / 4) as u32);
        }
        table
    };
}

/// Experience needed to reach `level`; levels outside 1..=99 are clamped
pub fn experience_for_level(level: u8) -> u32 {
    let level = level.clamp(1, MAX_LEVEL);
    XP_TABLE[(level - 1) as usize]
}

/// Highest level whose experience requirement is met
pub fn level_for_experience(xp: u32) -> u8 {
    // partition_point: number of table entries <= xp, i.e. the level itself
    let reached = XP_TABLE.partition_point(|&required| required <= xp);
    (reached as u8).clamp(1, MAX_LEVEL)
}

/// Derive every progression figure from experience and level
///
/// `level` is clamped to 1..=99. At the max level all next-level figures are 0.
pub fn compute(experience: u32, level: u8) -> Progression {
    let level = level.clamp(1, MAX_LEVEL);

    if level >= MAX_LEVEL {
        return Progression {
            experience,
            level,
            xp_for_current_level: 0,
            xp_for_next_level: 0,
            xp_in_level: 0,
            xp_needed: 0,
            xp_remaining: 0,
            progress: LevelProgress::MaxLevel,
        };
    }

    let xp_for_current_level = experience_for_level(level);
    let xp_for_next_level = experience_for_level(level + 1);
    let xp_in_level = experience.saturating_sub(xp_for_current_level);
    let xp_needed = xp_for_next_level - xp_for_current_level;
    let xp_remaining = xp_for_next_level.saturating_sub(experience);
    let percent = if xp_needed == 0 {
        0
    } else {
        ((xp_in_level as u64 * 100) / xp_needed as u64).min(100) as u32
    };

    Progression {
        experience,
        level,
        xp_for_current_level,
        xp_for_next_level,
        xp_in_level,
        xp_needed,
        xp_remaining,
        progress: LevelProgress::Percent(percent),
    }
}

/// Progression from experience alone
pub fn from_experience(experience: u32) -> Progression {
    compute(experience, level_for_experience(experience))
}

// =============================================================================
// TESTS
// =============================================================================
