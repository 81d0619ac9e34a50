//! Activity classifier: raw activity code → debounced status
//!
//! Transitions:
//! - any → mapped status: code recognised (immediate)
//! - Active/SecondaryActive → IDLE: no recognised code for ≥ idle threshold
//! - any → IDLE: authoritative completion signal (`force_idle`, immediate)
//!
//! Gaps shorter than the threshold hold the previous status.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::types::ActivityStatus;

/// Result of one classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: ActivityStatus,
    /// Whole seconds idle, 0 unless status is Idle
    pub idle_secs: u64,
}

/// Two-speed classifier: immediate promotion, debounced demotion
#[derive(Debug, Clone)]
pub struct ActivityClassifier {
    /// Accepted codes and the status each one means
    codes: HashMap<i32, ActivityStatus>,
    /// Debounce window in milliseconds
    idle_threshold_ms: u64,
    /// Last time a recognised code was seen (first pass when never seen)
    last_active_at: Option<DateTime<Utc>>,
    /// Current status
    status: ActivityStatus,
    idle_secs: u64,
}

impl ActivityClassifier {
    /// Create a classifier from `(code, status)` pairs
    pub fn new(
        codes: impl IntoIterator<Item = (i32, ActivityStatus)>,
        idle_threshold_ms: u64,
    ) -> Self {
        Self {
            codes: codes.into_iter().collect(),
            idle_threshold_ms,
            last_active_at: None,
            status: ActivityStatus::Idle,
            idle_secs: 0,
        }
    }

    /// Classify the code sampled at `now`
    pub fn classify(&mut self, code: Option<i32>, now: DateTime<Utc>) -> Classification {
        if let Some(mapped) = code.and_then(|c| self.codes.get(&c)).copied() {
            self.last_active_at = Some(now);
            self.status = mapped;
            self.idle_secs = 0;
            return self.current();
        }

        let since = *self.last_active_at.get_or_insert(now);
        let elapsed_ms = (now - since).num_milliseconds().max(0) as u64;

        if elapsed_ms < self.idle_threshold_ms {
            // Brief gap: keep whatever we had
            self.idle_secs = 0;
        } else {
            self.status = ActivityStatus::Idle;
            self.idle_secs = elapsed_ms / 1000;
        }

        self.current()
    }

    /// Authoritative "done" signal: drop to Idle now, bypassing the debounce
    ///
    /// The idle clock keeps running from the last recognised code.
    pub fn force_idle(&mut self) -> Classification {
        self.status = ActivityStatus::Idle;
        self.idle_secs = 0;
        self.current()
    }

    pub fn set_idle_threshold(&mut self, idle_threshold_ms: u64) {
        self.idle_threshold_ms = idle_threshold_ms;
    }

    pub fn idle_threshold_ms(&self) -> u64 {
        self.idle_threshold_ms
    }

    pub fn status(&self) -> ActivityStatus {
        self.status
    }

    pub fn last_active_at(&self) -> Option<DateTime<Utc>> {
        self.last_active_at
    }

    /// Get current classification without sampling
    pub fn current(&self) -> Classification {
        Classification {
            status: self.status,
            idle_secs: self.idle_secs,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
