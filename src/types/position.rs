//! Grid positions and gate anchors

use serde::{Deserialize, Serialize};

/// A tile on the world grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: i32,
    pub y: i32,
    /// Vertical plane; must match exactly for any proximity check
    pub plane: i32,
}

impl WorldPoint {
    pub fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }

    /// Chebyshev tile distance, `None` across planes
    pub fn distance_to(&self, other: &WorldPoint) -> Option<i32> {
        if self.plane != other.plane {
            return None;
        }
        Some((self.x - other.x).abs().max((self.y - other.y).abs()))
    }
}

impl std::fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.plane)
    }
}

/// A point of interest whose proximity opens the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    /// External identifier of the object or NPC
    pub id: u32,
    /// South-west tile of the footprint
    pub position: WorldPoint,
    /// Footprint edge length in tiles (1 for NPCs)
    pub footprint: i32,
    /// Whether the anchor is in its usable state (e.g. salvageable, not depleted)
    pub active: bool,
}

impl Anchor {
    pub fn new(id: u32, position: WorldPoint, footprint: i32, active: bool) -> Self {
        Self {
            id,
            position,
            footprint: footprint.max(1),
            active,
        }
    }
}
