//! Spatial gate: is the subject within range of any anchor?
//!
//! An anchor at (x, y) with footprint f and radius r covers the inclusive box
//! [x - r, x + f - 1 + r] on both axes, on its own plane only. The gate keeps
//! no memory: anchors that vanished since the last pass simply stop counting.

use serde::{Deserialize, Serialize};

use crate::types::{Anchor, WorldPoint};

/// Result of one gate evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GateResult {
    pub in_range: bool,
    /// First anchor that satisfied the gate
    pub anchor: Option<Anchor>,
}

/// Stateless proximity gate with a fixed inclusion radius
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpatialGate {
    radius: i32,
}

impl SpatialGate {
    pub fn new(radius: i32) -> Self {
        Self {
            radius: radius.max(0),
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Evaluate from scratch against this pass's anchors
    pub fn evaluate(&self, subject: Option<WorldPoint>, anchors: &[Anchor]) -> GateResult {
        let Some(subject) = subject else {
            return GateResult::default();
        };

        anchors
            .iter()
            .find(|anchor| covers(anchor, self.radius, &subject))
            .map(|anchor| GateResult {
                in_range: true,
                anchor: Some(*anchor),
            })
            .unwrap_or_default()
    }
}

/// Inclusive box test for one anchor
pub fn covers(anchor: &Anchor, radius: i32, point: &WorldPoint) -> bool {
    if anchor.position.plane != point.plane {
        return false;
    }
    let min_x = anchor.position.x - radius;
    let max_x = anchor.position.x + anchor.footprint - 1 + radius;
    let min_y = anchor.position.y - radius;
    let max_y = anchor.position.y + anchor.footprint - 1 + radius;

    point.x >= min_x && point.x <= max_x && point.y >= min_y && point.y <= max_y
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn wreck(x: i32, y: i32) -> Anchor {
        Anchor::new(60464, WorldPoint::new(x, y, 0), 2, true)
    }

    #[test]
    fn test_unknown_subject_is_out_of_range() {
        let gate = SpatialGate::new(7);
        let result = gate.evaluate(None, &[wreck(100, 100)]);
        assert!(!result.in_range);
        assert!(result.anchor.is_none());
    }

    #[test]
    fn test_no_anchors_is_out_of_range() {
        let gate = SpatialGate::new(7);
        assert!(!gate.evaluate(Some(WorldPoint::new(100, 100, 0)), &[]).in_range);
    }

    #[test]
    fn test_lower_boundary_inclusive() {
        let gate = SpatialGate::new(7);
        let anchors = [wreck(100, 100)];
        assert!(gate.evaluate(Some(WorldPoint::new(93, 100, 0)), &anchors).in_range);
        assert!(!gate.evaluate(Some(WorldPoint::new(92, 100, 0)), &anchors).in_range);
    }

    #[test]
    fn test_upper_boundary_includes_footprint() {
        let gate = SpatialGate::new(7);
        let anchors = [wreck(100, 100)];
        // 100 + 2 - 1 + 7 = 108
        assert!(gate.evaluate(Some(WorldPoint::new(108, 108, 0)), &anchors).in_range);
        assert!(!gate.evaluate(Some(WorldPoint::new(109, 100, 0)), &anchors).in_range);
        assert!(!gate.evaluate(Some(WorldPoint::new(100, 109, 0)), &anchors).in_range);
    }

    #[test]
    fn test_plane_must_match() {
        let gate = SpatialGate::new(7);
        let anchors = [wreck(100, 100)];
        assert!(!gate.evaluate(Some(WorldPoint::new(100, 100, 1)), &anchors).in_range);
    }

    #[test]
    fn test_anchors_are_or_ed() {
        let gate = SpatialGate::new(7);
        let far = wreck(500, 500);
        let near = wreck(100, 100);
        let result = gate.evaluate(Some(WorldPoint::new(95, 95, 0)), &[far, near]);
        assert!(result.in_range);
        assert_eq!(result.anchor, Some(near));
    }

    #[test]
    fn test_inactive_anchor_still_gates() {
        let gate = SpatialGate::new(7);
        let depleted = Anchor::new(60465, WorldPoint::new(100, 100, 0), 2, false);
        assert!(gate.evaluate(Some(WorldPoint::new(100, 100, 0)), &[depleted]).in_range);
    }
}
