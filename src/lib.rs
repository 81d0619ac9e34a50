//! Idlewatch: detection and alert engine for AFK activity sessions
//!
//! One tick in: raw world signals → spatial gate → activity classifier →
//! progression → alert latches → snapshot diff → at most one notification.

pub mod config;
pub mod core;
pub mod store;
pub mod types;

// =============================================================================
// PROGRESSION
// =============================================================================

/// Highest attainable level; there is no level 100 lookup
pub const MAX_LEVEL: u8 = 99;

// =============================================================================
// SALVAGING
// =============================================================================

/// Tiles around a shipwreck footprint that still count as in range
pub const SALVAGE_RANGE: i32 = 7;

/// Shipwrecks occupy a 2x2 tile footprint
pub const SHIPWRECK_SIZE: i32 = 2;

/// Fixed inventory size
pub const INVENTORY_SLOTS: u32 = 28;

/// Cargo capacity used until the hold reports its own
pub const DEFAULT_CARGO_CAPACITY: u32 = 60;

/// Default debounce window before salvaging is considered idle (milliseconds)
/// 1.2 seconds - two game ticks, enough to bridge animation restarts
pub const DEFAULT_SALVAGE_IDLE_MS: u64 = 1200;

/// Default low boat health alert threshold (percent)
pub const DEFAULT_LOW_HEALTH_PERCENT: u32 = 30;

/// Default hazard proximity range (tiles)
pub const DEFAULT_HAZARD_RANGE: i32 = 15;

// =============================================================================
// THIEVING
// =============================================================================

/// Tiles around a wealthy citizen that count as the thieving area
pub const THIEVING_RANGE: i32 = 10;

/// Default seconds without pickpocketing before the player is idle
pub const DEFAULT_THIEVING_IDLE_SECS: u64 = 5;

/// Coin pouch limits by Ardougne diary tier
pub const BASE_POUCH_LIMIT: u32 = 28;
pub const MEDIUM_POUCH_LIMIT: u32 = 56;
pub const HARD_POUCH_LIMIT: u32 = 84;
pub const ELITE_POUCH_LIMIT: u32 = 140;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
