//! Snapshot diff: value comparison of consecutive session snapshots

use crate::types::SessionState;

/// Names of the observable fields that differ between two snapshots
///
/// With no previous snapshot every field counts as changed.
pub fn changed_fields(previous: Option<&SessionState>, next: &SessionState) -> Vec<&'static str> {
    let Some(prev) = previous else {
        return vec!["*"];
    };

    let mut changed = Vec::new();
    if prev.activity != next.activity {
        changed.push("activity");
    }
    if prev.subject != next.subject {
        changed.push("subject");
    }
    if prev.in_range != next.in_range {
        changed.push("in_range");
    }
    if prev.anchor != next.anchor {
        changed.push("anchor");
    }
    if prev.status != next.status {
        changed.push("status");
    }
    if prev.idle_secs != next.idle_secs {
        changed.push("idle_secs");
    }
    if prev.resources != next.resources {
        changed.push("resources");
    }
    if prev.progression != next.progression {
        changed.push("progression");
    }
    if prev.hazard != next.hazard {
        changed.push("hazard");
    }
    if prev.crew != next.crew {
        changed.push("crew");
    }
    if prev.distraction != next.distraction {
        changed.push("distraction");
    }
    changed
}

/// True when `next` should be pushed to renderers
pub fn has_changed(previous: Option<&SessionState>, next: &SessionState) -> bool {
    previous != Some(next)
}
