//! Edge-triggered alert latches
//!
//! One latch per named condition. A latch fires on the rising edge of its
//! condition and re-arms only after the condition has been observed false.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::types::{ActivityKind, AlertEvent, AlertKind, Condition};

/// Remembers whether the current rising edge has been reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertLatch {
    fired: bool,
}

impl AlertLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one evaluation; true exactly when an alert should be emitted
    pub fn evaluate(&mut self, holds: bool) -> bool {
        match (holds, self.fired) {
            (true, false) => {
                self.fired = true;
                true
            }
            (true, true) => false,
            (false, _) => {
                self.fired = false;
                false
            }
        }
    }

    pub fn fired(&self) -> bool {
        self.fired
    }
}

/// All latches of one activity, keyed by condition
///
/// Latches are created lazily on first evaluation and live as long as the set.
#[derive(Debug, Clone, Default)]
pub struct AlertSet {
    latches: BTreeMap<AlertKind, AlertLatch>,
}

impl AlertSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate every condition for one pass
    ///
    /// Disabled conditions are skipped: their latch neither fires nor resets.
    pub fn evaluate(
        &mut self,
        conditions: &[Condition],
        activity: ActivityKind,
        now: DateTime<Utc>,
    ) -> Vec<AlertEvent> {
        let mut events = Vec::new();

        for condition in conditions {
            if !condition.enabled {
                continue;
            }
            let latch = self.latches.entry(condition.kind).or_default();
            if latch.evaluate(condition.holds) {
                debug!(alert = condition.kind.code(), %activity, "alert latched");
                events.push(AlertEvent::new(
                    condition.kind,
                    activity,
                    now,
                    condition.detail.clone(),
                ));
            }
        }

        events.sort_by_key(|e| e.kind);
        events
    }

    /// Whether the latch for `kind` currently holds a reported edge
    pub fn is_fired(&self, kind: AlertKind) -> bool {
        self.latches.get(&kind).map(|l| l.fired()).unwrap_or(false)
    }
}

// =============================================================================
// TESTS
// =============================================================================
