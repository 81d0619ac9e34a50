//! Output structures for notifications and terminal display

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ActivityStatus, ResourceKind, SessionState};

/// "State changed" notification handed to renderers
///
/// Carries an immutable copy, never the live state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateNotification {
    /// When the pass that produced this state ran
    pub timestamp: DateTime<Utc>,
    pub state: SessionState,
    /// Names of fields that differ from the previous snapshot
    pub changed: Vec<String>,
}

impl StateNotification {
    pub fn new(timestamp: DateTime<Utc>, state: SessionState, changed: Vec<String>) -> Self {
        Self {
            timestamp,
            state,
            changed,
        }
    }
}

/// " (1m 5s)" / " (42s)" / "" for a non-idle subject
pub fn idle_text(idle_secs: u64) -> String {
    if idle_secs == 0 {
        return String::new();
    }
    let minutes = idle_secs / 60;
    let seconds = idle_secs % 60;
    if minutes > 0 {
        format!(" ({}m {}s)", minutes, seconds)
    } else {
        format!(" ({}s)", seconds)
    }
}

impl SessionState {
    /// "SALVAGING" / "IDLE (12s)" etc.
    pub fn status_text(&self) -> String {
        format!(
            "{}{}",
            self.status.label(self.activity),
            idle_text(self.idle_secs)
        )
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.status.color_code();
        let reset = ActivityStatus::color_reset();
        format!(
            "{}{} {} | {}{}",
            color,
            self.status.emoji(),
            self.activity,
            self.summary_fields().join(" | "),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!("activity={} | {}", self.activity.slug(), self.summary_fields().join(" | "))
    }

    fn summary_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        if !self.subject.is_empty() {
            fields.push(format!("subject={}", self.subject));
        }
        fields.push(format!("in_range={}", self.in_range));
        fields.push(format!("status={}", self.status_text()));
        for (kind, counter) in &self.resources {
            let text = match kind {
                ResourceKind::CoinPouches => format!("{}/{}", counter.current, counter.max),
                _ => counter.text(),
            };
            fields.push(format!("{}={}", kind.label().to_lowercase().replace(' ', "_"), text));
        }
        if let Some(crew) = &self.crew {
            fields.push(format!("crew={}", crew.text()));
        }
        if let Some(distraction) = &self.distraction {
            fields.push(format!(
                "citizen={}{}",
                distraction.status_text(),
                distraction.time_text()
            ));
        }
        if let Some(progression) = &self.progression {
            fields.push(format!(
                "level={} xp={} ({})",
                progression.level,
                progression.experience,
                progression.remaining_text()
            ));
        }
        fields.push(format!("hazard={}", self.hazard.text()));
        fields
    }
}
