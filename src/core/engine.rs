//! Monitor engine: one evaluation pass per tick for one activity
//!
//! Pass order (fixed):
//! 1. gate: anchors from this tick only
//! 2. identity and progression
//! 3. classification, then authoritative completion override
//! 4. activity-specific observation (resources, crew, hazard, distraction)
//! 5. alert latches
//! 6. snapshot diff → at most one notification
//!
//! While the gate is closed the engine is DORMANT: only the gate fields are
//! updated, everything else keeps its last value and latches are untouched.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::MonitorConfig;
use crate::core::classifier::ActivityClassifier;
use crate::core::diff::changed_fields;
use crate::core::gate::SpatialGate;
use crate::core::latch::AlertSet;
use crate::core::progression;
use crate::store::KeyValueStore;
use crate::types::{
    ActivityKind, ActivityStatus, AlertEvent, AlertKind, Anchor, Condition, EnginePhase,
    SessionState, Skill, StateNotification, TickSignals,
};

/// Activity-specific behaviour plugged into the generic engine
pub trait ActivityRules: Send + Sync {
    fn kind(&self) -> ActivityKind;

    /// Gate inclusion radius in tiles
    fn radius(&self) -> i32;

    /// Accepted activity codes and their meaning
    fn activity_codes(&self) -> Vec<(i32, ActivityStatus)>;

    fn idle_threshold_ms(&self) -> u64;

    fn skill(&self) -> Skill;

    /// Anchors present this tick
    fn anchors(&self, signals: &TickSignals) -> Vec<Anchor>;

    /// One-shot alert raised by an authoritative completion message
    ///
    /// Returns the alert kind when `message` is such a notice. The classifier
    /// is forced to Idle regardless of whether the alert is enabled.
    fn completion(&self, _message: &str) -> Option<AlertKind> {
        None
    }

    fn completion_alert_enabled(&self, _kind: AlertKind) -> bool {
        false
    }

    /// Load persisted counters into a fresh state
    fn restore(&mut self, _state: &mut SessionState, _store: &dyn KeyValueStore) {}

    /// Update activity-specific fields from this tick's signals
    fn observe(
        &mut self,
        signals: &TickSignals,
        state: &mut SessionState,
        now: DateTime<Utc>,
        store: &dyn KeyValueStore,
    );

    /// Alert predicates against the freshly observed state
    fn conditions(&self, state: &SessionState) -> Vec<Condition>;

    fn reconfigure(&mut self, config: &MonitorConfig);
}

/// Result of one pass
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub activity: ActivityKind,
    pub phase: EnginePhase,
    /// New phase when this pass changed it
    pub transition: Option<EnginePhase>,
    /// Present only when the state differs from the previous snapshot
    pub notification: Option<StateNotification>,
    /// Rising-edge and one-shot alerts, in condition order
    pub alerts: Vec<AlertEvent>,
}

impl TickOutcome {
    pub fn changed(&self) -> bool {
        self.notification.is_some()
    }
}

/// Generic tick orchestrator, instantiated once per activity
pub struct MonitorEngine<R: ActivityRules> {
    rules: R,
    gate: SpatialGate,
    classifier: ActivityClassifier,
    latches: AlertSet,
    state: SessionState,
    /// Snapshot from the previous pass
    previous: Option<SessionState>,
    phase: EnginePhase,
    store: Arc<dyn KeyValueStore>,
}

impl<R: ActivityRules> MonitorEngine<R> {
    pub fn new(mut rules: R, store: Arc<dyn KeyValueStore>) -> Self {
        let mut state = SessionState::new(rules.kind());
        rules.restore(&mut state, store.as_ref());

        Self {
            gate: SpatialGate::new(rules.radius()),
            classifier: ActivityClassifier::new(rules.activity_codes(), rules.idle_threshold_ms()),
            latches: AlertSet::new(),
            state,
            previous: None,
            phase: EnginePhase::Dormant,
            store,
            rules,
        }
    }

    /// Run one evaluation pass
    pub fn tick(&mut self, signals: &TickSignals, now: DateTime<Utc>) -> TickOutcome {
        let kind = self.rules.kind();

        // 1. Gate
        let anchors = self.rules.anchors(signals);
        let gate = self.gate.evaluate(signals.subject_position, &anchors);
        self.state.in_range = gate.in_range;
        self.state.anchor = gate.anchor;

        let phase = if gate.in_range {
            EnginePhase::Monitoring
        } else {
            EnginePhase::Dormant
        };
        let transition = (phase != self.phase).then_some(phase);
        if let Some(next) = transition {
            info!(activity = %kind, from = %self.phase, to = %next, "phase change");
            self.phase = next;
        }

        let mut alerts = Vec::new();

        if phase == EnginePhase::Monitoring {
            // 2. Identity and progression
            self.adopt_subject(signals);
            self.update_progression(signals);

            // 3. Classification
            let mut classification = self.classifier.classify(signals.animation, now);
            for message in &signals.messages {
                let Some(alert) = self.rules.completion(message) else {
                    continue;
                };
                debug!(activity = %kind, alert = alert.code(), "completion notice");
                classification = self.classifier.force_idle();
                if self.rules.completion_alert_enabled(alert) {
                    alerts.push(AlertEvent::new(alert, kind, now, message.clone()));
                }
            }
            self.state.status = classification.status;
            self.state.idle_secs = classification.idle_secs;

            // 4. Activity-specific fields
            self.rules
                .observe(signals, &mut self.state, now, self.store.as_ref());

            // 5. Latches
            let conditions = self.rules.conditions(&self.state);
            alerts.extend(self.latches.evaluate(&conditions, kind, now));
        }

        // 6. Diff
        let notification = self.take_notification(now);

        TickOutcome {
            activity: kind,
            phase: self.phase,
            transition,
            notification,
            alerts,
        }
    }

    /// Replace configuration; the next pass always notifies
    pub fn reconfigure(&mut self, config: &MonitorConfig) {
        self.rules.reconfigure(config);
        self.classifier
            .set_idle_threshold(self.rules.idle_threshold_ms());
        self.previous = None;
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn latches(&self) -> &AlertSet {
        &self.latches
    }

    fn adopt_subject(&mut self, signals: &TickSignals) {
        if let Some(name) = signals.subject_name.as_deref() {
            if !name.is_empty() && name != self.state.subject {
                self.state.subject = name.to_string();
            }
        }
    }

    fn update_progression(&mut self, signals: &TickSignals) {
        let Some(sample) = signals.skill(self.rules.skill()) else {
            return;
        };
        let level = sample
            .level
            .unwrap_or_else(|| progression::level_for_experience(sample.experience));
        self.state.progression = Some(progression::compute(sample.experience, level));
    }

    fn take_notification(&mut self, now: DateTime<Utc>) -> Option<StateNotification> {
        let changed = changed_fields(self.previous.as_ref(), &self.state);
        if changed.is_empty() {
            return None;
        }
        let snapshot = self.state.clone();
        self.previous = Some(snapshot.clone());
        Some(StateNotification::new(
            now,
            snapshot,
            changed.into_iter().map(String::from).collect(),
        ))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{ResourceCounter, ResourceKind, WorldPoint};
    use chrono::{Duration, TimeZone};

    const WORK: i32 = 100;

    /// Minimal rules: one anchor id, one code, one idle condition
    struct Bench {
        idle_ms: u64,
        idle_alert: bool,
    }

    impl ActivityRules for Bench {
        fn kind(&self) -> ActivityKind {
            ActivityKind::Thieving
        }
        fn radius(&self) -> i32 {
            3
        }
        fn activity_codes(&self) -> Vec<(i32, ActivityStatus)> {
            vec![(WORK, ActivityStatus::Active)]
        }
        fn idle_threshold_ms(&self) -> u64 {
            self.idle_ms
        }
        fn skill(&self) -> Skill {
            Skill::Thieving
        }
        fn anchors(&self, signals: &TickSignals) -> Vec<Anchor> {
            signals
                .objects
                .iter()
                .map(|o| Anchor::new(o.id, o.position, 1, true))
                .collect()
        }
        fn observe(
            &mut self,
            signals: &TickSignals,
            state: &mut SessionState,
            _now: DateTime<Utc>,
            _store: &dyn KeyValueStore,
        ) {
            if let Some(items) = &signals.inventory {
                state.set_resource(
                    ResourceKind::Inventory,
                    ResourceCounter::new(items.len() as u32, 28),
                );
            }
        }
        fn conditions(&self, state: &SessionState) -> Vec<Condition> {
            vec![Condition::new(
                AlertKind::PlayerIdle,
                state.status.is_idle() && state.idle_secs > 0,
                self.idle_alert,
                "",
            )]
        }
        fn reconfigure(&mut self, config: &MonitorConfig) {
            self.idle_alert = config.thieving.alert_player_idle;
        }
    }

    fn engine() -> MonitorEngine<Bench> {
        MonitorEngine::new(
            Bench {
                idle_ms: 1200,
                idle_alert: true,
            },
            Arc::new(MemoryStore::new()),
        )
    }

    fn t(ms: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap() + Duration::milliseconds(ms)
    }

    fn near(animation: Option<i32>) -> TickSignals {
        TickSignals {
            subject_name: Some("Ahab".to_string()),
            subject_position: Some(WorldPoint::new(10, 10, 0)),
            animation,
            objects: vec![crate::types::WorldObject {
                id: 1,
                position: WorldPoint::new(12, 12, 0),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_dormant() {
        let e = engine();
        assert_eq!(e.phase(), EnginePhase::Dormant);
        assert!(e.state().subject.is_empty());
    }

    #[test]
    fn test_gate_opening_is_a_transition() {
        let mut e = engine();
        let out = e.tick(&near(None), t(0));
        assert_eq!(out.transition, Some(EnginePhase::Monitoring));
        assert_eq!(out.phase, EnginePhase::Monitoring);
        assert!(out.changed());
        assert_eq!(e.state().subject, "Ahab");
    }

    #[test]
    fn test_static_world_notifies_once() {
        let mut e = engine();
        assert!(e.tick(&near(Some(WORK)), t(0)).changed());
        assert!(!e.tick(&near(Some(WORK)), t(600)).changed());
        assert!(!e.tick(&near(Some(WORK)), t(1200)).changed());
    }

    #[test]
    fn test_dormant_freezes_fields() {
        let mut e = engine();
        e.tick(&near(Some(WORK)), t(0));

        let mut away = near(None);
        away.subject_position = Some(WorldPoint::new(50, 50, 0));
        away.subject_name = Some("Someone Else".to_string());
        let out = e.tick(&away, t(10_000));

        assert_eq!(out.transition, Some(EnginePhase::Dormant));
        assert_eq!(out.notification.unwrap().changed, vec!["in_range", "anchor"]);
        assert_eq!(e.state().status, ActivityStatus::Active);
        assert_eq!(e.state().subject, "Ahab");
        assert!(out.alerts.is_empty());
    }

    #[test]
    fn test_idle_alert_fires_once_per_edge() {
        let mut e = engine();
        e.tick(&near(Some(WORK)), t(0));

        let out = e.tick(&near(None), t(1300));
        assert_eq!(out.alerts.len(), 1);
        assert_eq!(out.alerts[0].kind, AlertKind::PlayerIdle);

        assert!(e.tick(&near(None), t(2300)).alerts.is_empty());
        e.tick(&near(Some(WORK)), t(2900));
        assert!(!e.latches().is_fired(AlertKind::PlayerIdle));
        assert_eq!(e.tick(&near(None), t(4500)).alerts.len(), 1);
    }

    #[test]
    fn test_reconfigure_forces_notification() {
        let mut e = engine();
        e.tick(&near(Some(WORK)), t(0));
        assert!(!e.tick(&near(Some(WORK)), t(600)).changed());

        let mut config = MonitorConfig::default();
        config.thieving.alert_player_idle = false;
        e.reconfigure(&config);

        let out = e.tick(&near(Some(WORK)), t(1200));
        assert_eq!(out.notification.unwrap().changed, vec!["*"]);
        // Idle edge while disabled: nothing fires
        assert!(e.tick(&near(None), t(5000)).alerts.is_empty());
    }

    #[test]
    fn test_missing_feed_keeps_previous_value() {
        let mut e = engine();
        let mut s = near(Some(WORK));
        s.inventory = Some(vec![crate::types::ItemStack::new(995, "Coins", 1)]);
        e.tick(&s, t(0));
        assert_eq!(e.state().resource(ResourceKind::Inventory).unwrap().current, 1);

        e.tick(&near(Some(WORK)), t(600));
        assert_eq!(e.state().resource(ResourceKind::Inventory).unwrap().current, 1);
    }

    #[test]
    fn test_progression_derived_from_experience() {
        let mut e = engine();
        let mut s = near(None);
        s.skills = vec![crate::types::SkillSample {
            skill: Skill::Thieving,
            experience: 128,
            level: None,
        }];
        e.tick(&s, t(0));
        let p = e.state().progression.clone().unwrap();
        assert_eq!(p.level, 2);
        assert_eq!(p.xp_remaining, 46);
    }
}
