//! Resource counters and count-based sub-statuses

use serde::{Deserialize, Serialize};

/// Named resource tracked as a (current, max) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Boat hitpoints
    Health,
    /// Occupied inventory slots
    Inventory,
    /// Cargo hold occupancy
    Cargo,
    /// Coin pouches carried
    CoinPouches,
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Health => "Health",
            ResourceKind::Inventory => "Inventory",
            ResourceKind::Cargo => "Cargo",
            ResourceKind::CoinPouches => "Coin pouches",
        }
    }
}

/// A (current, max) counter
///
/// `current` never exceeds `max` once `max` is known (non-zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceCounter {
    pub current: u32,
    pub max: u32,
}

impl ResourceCounter {
    pub fn new(current: u32, max: u32) -> Self {
        let current = if max > 0 { current.min(max) } else { current };
        Self { current, max }
    }

    /// `current * 100 / max`, clamped to [0, 100]; 0 when max is unknown
    pub fn percentage(&self) -> u32 {
        percentage(self.current, self.max)
    }

    pub fn is_full(&self) -> bool {
        self.max > 0 && self.current >= self.max
    }

    /// "current/max (p%)"
    pub fn text(&self) -> String {
        format!("{}/{} ({}%)", self.current, self.max, self.percentage())
    }
}

/// Integer percentage guarded against a zero denominator
pub fn percentage(current: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    let pct = (current as u64 * 100) / max as u64;
    pct.min(100) as u32
}

/// Count-based sub-status, e.g. crew members actively working
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CrewStatus {
    pub active: u32,
    pub total: u32,
}

impl CrewStatus {
    pub fn new(active: u32, total: u32) -> Self {
        Self {
            active: active.min(total),
            total,
        }
    }

    /// No members at all is its own state, not "0/0"
    pub fn is_none_present(&self) -> bool {
        self.total == 0
    }

    /// Members present but nobody working
    pub fn is_idle(&self) -> bool {
        self.total > 0 && self.active == 0
    }

    pub fn text(&self) -> String {
        if self.is_none_present() {
            return "No Crew".to_string();
        }
        format!("{}/{} Active", self.active, self.total)
    }
}
