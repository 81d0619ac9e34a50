//! The per-activity session aggregate

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{
    ActivityKind, ActivityStatus, Anchor, CrewStatus, Distraction, Hazard, Progression,
    ResourceCounter, ResourceKind,
};

/// Everything derived about one monitored activity
///
/// Owned and mutated only by that activity's engine. Renderers get clones;
/// a clone taken after a pass is also the snapshot used for change detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub activity: ActivityKind,
    /// Subject name, empty until observed
    pub subject: String,
    /// Gate status
    pub in_range: bool,
    /// Anchor that satisfied the gate this pass
    pub anchor: Option<Anchor>,
    pub status: ActivityStatus,
    /// Whole seconds idle; exactly 0 whenever status is not Idle
    pub idle_secs: u64,
    pub resources: BTreeMap<ResourceKind, ResourceCounter>,
    pub progression: Option<Progression>,
    pub hazard: Hazard,
    pub crew: Option<CrewStatus>,
    pub distraction: Option<Distraction>,
}

impl SessionState {
    pub fn new(activity: ActivityKind) -> Self {
        Self {
            activity,
            subject: String::new(),
            in_range: false,
            anchor: None,
            status: ActivityStatus::Idle,
            idle_secs: 0,
            resources: BTreeMap::new(),
            progression: None,
            hazard: Hazard::safe(),
            crew: None,
            distraction: None,
        }
    }

    pub fn resource(&self, kind: ResourceKind) -> Option<ResourceCounter> {
        self.resources.get(&kind).copied()
    }

    /// Percentage of a resource, 0 when not tracked
    pub fn resource_percent(&self, kind: ResourceKind) -> u32 {
        self.resource(kind).map(|c| c.percentage()).unwrap_or(0)
    }

    pub fn set_resource(&mut self, kind: ResourceKind, counter: ResourceCounter) {
        self.resources.insert(kind, counter);
    }

    pub fn is_active(&self) -> bool {
        self.status == ActivityStatus::Active
    }

    pub fn is_sorting(&self) -> bool {
        self.status == ActivityStatus::SecondaryActive
    }
}
