//! Integration tests for the tick pipeline
//!
//! Drives the full monitor with synthetic ticks and an injected clock

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;

use idlewatch::config::MonitorConfig;
use idlewatch::core::{SessionMonitor, TickOutcome};
use idlewatch::store::MemoryStore;
use idlewatch::types::{
    ActivityKind, ActivityStatus, AlertKind, EnginePhase, TickSignals, WorldObject, WorldPoint,
};

const SALVAGING: i32 = 13576;

fn t(ms: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 18, 0, 0).unwrap() + Duration::milliseconds(ms)
}

fn monitor() -> SessionMonitor {
    SessionMonitor::new(MonitorConfig::default(), Arc::new(MemoryStore::new()))
}

fn at_wreck(animation: Option<i32>) -> TickSignals {
    TickSignals {
        subject_name: Some("Ahab".to_string()),
        subject_position: Some(WorldPoint::new(3005, 3000, 0)),
        animation,
        objects: vec![WorldObject {
            id: 60470,
            position: WorldPoint::new(3000, 3000, 0),
        }],
        ..Default::default()
    }
}

fn far_away(animation: Option<i32>) -> TickSignals {
    TickSignals {
        subject_position: Some(WorldPoint::new(3200, 3200, 0)),
        ..at_wreck(animation)
    }
}

fn salvage(outcomes: Vec<TickOutcome>) -> TickOutcome {
    outcomes
        .into_iter()
        .find(|o| o.activity == ActivityKind::Salvaging)
        .unwrap()
}

fn alert_kinds(outcome: &TickOutcome) -> Vec<AlertKind> {
    outcome.alerts.iter().map(|a| a.kind).collect()
}

#[test]
fn test_end_to_end_idle_cycle() {
    let mut m = monitor();

    // Out of range: dormant, nothing populated
    let out = salvage(m.tick(&far_away(None), t(0)));
    assert_eq!(out.phase, EnginePhase::Dormant);
    assert!(m.state(ActivityKind::Salvaging).subject.is_empty());

    // Gate opens with the subject idle
    let out = salvage(m.tick(&at_wreck(None), t(600)));
    assert_eq!(out.transition, Some(EnginePhase::Monitoring));
    assert!(out.alerts.is_empty());
    assert_eq!(m.state(ActivityKind::Salvaging).subject, "Ahab");

    let out = salvage(m.tick(&at_wreck(None), t(1200)));
    assert!(out.alerts.is_empty());

    // Idle threshold reached: exactly one idle alert
    let out = salvage(m.tick(&at_wreck(None), t(1800)));
    assert_eq!(alert_kinds(&out), vec![AlertKind::PlayerIdle]);
    let out = salvage(m.tick(&at_wreck(None), t(2400)));
    assert!(out.alerts.is_empty());

    // Activity resumes: idle clears, status Active, latch re-armed
    let out = salvage(m.tick(&at_wreck(Some(SALVAGING)), t(3000)));
    assert!(out.alerts.is_empty());
    let state = m.state(ActivityKind::Salvaging);
    assert_eq!(state.status, ActivityStatus::Active);
    assert_eq!(state.idle_secs, 0);
    assert!(!m.salvage().latches().is_fired(AlertKind::PlayerIdle));

    // Short gap is noise
    let out = salvage(m.tick(&at_wreck(None), t(3600)));
    assert!(out.alerts.is_empty());
    assert_eq!(m.state(ActivityKind::Salvaging).status, ActivityStatus::Active);

    // Second idle period fires again
    let out = salvage(m.tick(&at_wreck(None), t(4200)));
    assert_eq!(alert_kinds(&out), vec![AlertKind::PlayerIdle]);
}

#[test]
fn test_identical_passes_notify_once() {
    let mut m = monitor();
    let mut signals = at_wreck(Some(SALVAGING));
    signals.screen.health = Some("80/100".to_string());

    let first = salvage(m.tick(&signals, t(0)));
    assert!(first.changed());

    let notifications = (1..5)
        .map(|i| salvage(m.tick(&signals, t(i * 600))))
        .filter(|o| o.changed())
        .count();
    assert_eq!(notifications, 0);

    // Exactly one field changes
    signals.screen.health = Some("90/100".to_string());
    let out = salvage(m.tick(&signals, t(3000)));
    let notification = out.notification.unwrap();
    assert_eq!(notification.changed, vec!["resources".to_string()]);
    assert_eq!(
        notification.state.resource_percent(idlewatch::types::ResourceKind::Health),
        90
    );

    assert!(!salvage(m.tick(&signals, t(3600))).changed());
}

#[test]
fn test_dormant_keeps_last_known_state() {
    let mut m = monitor();
    m.tick(&at_wreck(Some(SALVAGING)), t(0));

    let out = salvage(m.tick(&far_away(None), t(600)));
    assert_eq!(out.transition, Some(EnginePhase::Dormant));

    let state = m.state(ActivityKind::Salvaging);
    assert!(!state.in_range);
    assert!(state.anchor.is_none());
    assert_eq!(state.status, ActivityStatus::Active);
    assert_eq!(state.subject, "Ahab");

    // Nothing changes while dormant, however long
    let out = salvage(m.tick(&far_away(None), t(60_000)));
    assert!(!out.changed());
    assert!(out.alerts.is_empty());
}

#[test]
fn test_reentry_does_not_refire_uncleared_alert() {
    let mut m = monitor();
    m.tick(&at_wreck(Some(SALVAGING)), t(0));
    let out = salvage(m.tick(&at_wreck(None), t(1500)));
    assert_eq!(alert_kinds(&out), vec![AlertKind::PlayerIdle]);

    m.tick(&far_away(None), t(2000));

    // Still idle on return: condition never cleared
    let out = salvage(m.tick(&at_wreck(None), t(30_000)));
    assert_eq!(out.transition, Some(EnginePhase::Monitoring));
    assert!(out.alerts.is_empty());
    assert_eq!(m.state(ActivityKind::Salvaging).idle_secs, 30);
}

#[test]
fn test_missing_position_closes_gate() {
    let mut m = monitor();
    m.tick(&at_wreck(Some(SALVAGING)), t(0));

    let mut signals = at_wreck(Some(SALVAGING));
    signals.subject_position = None;
    let out = salvage(m.tick(&signals, t(600)));
    assert_eq!(out.phase, EnginePhase::Dormant);
}

#[test]
fn test_anchor_disappearing_closes_gate() {
    let mut m = monitor();
    m.tick(&at_wreck(Some(SALVAGING)), t(0));

    let mut signals = at_wreck(Some(SALVAGING));
    signals.objects.clear();
    let out = salvage(m.tick(&signals, t(600)));
    assert_eq!(out.phase, EnginePhase::Dormant);

    // Respawn: monitoring resumes with no special handling
    let out = salvage(m.tick(&at_wreck(Some(SALVAGING)), t(1200)));
    assert_eq!(out.transition, Some(EnginePhase::Monitoring));
}

#[test]
fn test_reconfigure_notifies_and_applies_threshold() {
    let mut m = monitor();
    m.tick(&at_wreck(Some(SALVAGING)), t(0));
    assert!(!salvage(m.tick(&at_wreck(Some(SALVAGING)), t(600))).changed());

    let mut config = MonitorConfig::default();
    config.salvage.idle_threshold_ms = 5000;
    m.reconfigure(config);

    let out = salvage(m.tick(&at_wreck(None), t(2000)));
    assert!(out.changed());
    assert!(out.alerts.is_empty());
    assert_eq!(m.state(ActivityKind::Salvaging).status, ActivityStatus::Active);

    let out = salvage(m.tick(&at_wreck(None), t(5600)));
    assert_eq!(alert_kinds(&out), vec![AlertKind::PlayerIdle]);
}
