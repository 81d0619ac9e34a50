//! Thieving rules: wealthy-citizen gate, distraction tracking and coin pouches

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::{MonitorConfig, ThievingConfig};
use crate::core::engine::ActivityRules;
use crate::store::KeyValueStore;
use crate::types::{
    ActivityKind, ActivityStatus, AlertKind, Anchor, Condition, DiaryProgress, Distraction,
    NpcSighting, ResourceCounter, ResourceKind, SessionState, Skill, TickSignals,
};
use crate::{
    BASE_POUCH_LIMIT, ELITE_POUCH_LIMIT, HARD_POUCH_LIMIT, MEDIUM_POUCH_LIMIT, THIEVING_RANGE,
};

pub const CITIZEN_IDS: RangeInclusive<u32> = 13302..=13305;
pub const PICKPOCKET_CODE: i32 = 881;
pub const WEALTHY_CITIZEN: &str = "Wealthy citizen";
pub const COIN_POUCH: &str = "Coin pouch";

/// Coin pouch carry limit for the completed diary tiers
pub fn pouch_limit(diary: &DiaryProgress) -> u32 {
    match (diary.medium, diary.hard, diary.elite) {
        (true, true, true) => ELITE_POUCH_LIMIT,
        (true, true, false) => HARD_POUCH_LIMIT,
        (true, false, _) => MEDIUM_POUCH_LIMIT,
        _ => BASE_POUCH_LIMIT,
    }
}

/// A citizen staring at something with no combat level is distracted
fn is_distracted(npc: &NpcSighting) -> bool {
    npc.named(WEALTHY_CITIZEN) && npc.interacting_combat_level == Some(0)
}

/// Thieving activity rules
#[derive(Debug, Clone)]
pub struct Thieving {
    config: ThievingConfig,
    pouch_max: u32,
    distracted: bool,
    has_been_distracted: bool,
    distraction_started_at: Option<DateTime<Utc>>,
    distraction_ended_at: Option<DateTime<Utc>>,
    /// Scene index of the distracted citizen
    distracted_index: Option<u32>,
}

impl Thieving {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            config: config.thieving.clone(),
            pouch_max: BASE_POUCH_LIMIT,
            distracted: false,
            has_been_distracted: false,
            distraction_started_at: None,
            distraction_ended_at: None,
            distracted_index: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn distracted_index(&self) -> Option<u32> {
        self.distracted_index
    }

    /// Whether the NPC at `index` should be hidden while a citizen is distracted
    pub fn should_hide_npc(&self, state: &SessionState, index: u32) -> bool {
        self.config.hide_npcs_during_distraction
            && state.in_range
            && self.distracted
            && self.distracted_index != Some(index)
    }

    fn observe_distraction(
        &mut self,
        npcs: &[NpcSighting],
        state: &mut SessionState,
        now: DateTime<Utc>,
    ) {
        let found = npcs.iter().find(|npc| is_distracted(npc));
        self.distracted_index = found.map(|npc| npc.index);

        let mut distraction = Distraction::default();
        match (found.is_some(), self.distracted) {
            (true, false) => {
                debug!("citizen distracted");
                self.distraction_started_at = Some(now);
                self.has_been_distracted = true;
            }
            (false, true) => {
                debug!("citizen no longer distracted");
                self.distraction_ended_at = Some(now);
            }
            _ => {}
        }
        self.distracted = found.is_some();

        if self.distracted {
            distraction.distracted = true;
            distraction.distracted_secs = secs_since(self.distraction_started_at, now);
        } else {
            distraction.secs_since_last = secs_since(self.distraction_ended_at, now);
        }
        state.distraction = Some(distraction);
    }
}

fn secs_since(start: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u64 {
    start
        .map(|s| (now - s).num_seconds().max(0) as u64)
        .unwrap_or(0)
}

impl ActivityRules for Thieving {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Thieving
    }

    fn radius(&self) -> i32 {
        THIEVING_RANGE
    }

    fn activity_codes(&self) -> Vec<(i32, ActivityStatus)> {
        vec![(PICKPOCKET_CODE, ActivityStatus::Active)]
    }

    fn idle_threshold_ms(&self) -> u64 {
        self.config.idle_threshold_ms()
    }

    fn skill(&self) -> Skill {
        Skill::Thieving
    }

    fn anchors(&self, signals: &TickSignals) -> Vec<Anchor> {
        let Some(npcs) = &signals.local_npcs else {
            return Vec::new();
        };
        npcs.iter()
            .filter(|npc| CITIZEN_IDS.contains(&npc.id))
            .filter_map(|npc| npc.position.map(|p| Anchor::new(npc.id, p, 1, true)))
            .collect()
    }

    fn restore(&mut self, state: &mut SessionState, _store: &dyn KeyValueStore) {
        state.set_resource(ResourceKind::CoinPouches, ResourceCounter::new(0, self.pouch_max));
    }

    fn observe(
        &mut self,
        signals: &TickSignals,
        state: &mut SessionState,
        now: DateTime<Utc>,
        _store: &dyn KeyValueStore,
    ) {
        if let Some(diary) = &signals.diary {
            self.pouch_max = pouch_limit(diary);
        }

        let current: u32 = match &signals.inventory {
            Some(items) => items
                .iter()
                .filter(|i| !i.is_empty() && i.name.as_deref() == Some(COIN_POUCH))
                .fold(0u32, |total, i| total.saturating_add(i.quantity)),
            None => state
                .resource(ResourceKind::CoinPouches)
                .map(|c| c.current)
                .unwrap_or(0),
        };
        state.set_resource(
            ResourceKind::CoinPouches,
            ResourceCounter::new(current, self.pouch_max),
        );

        if let Some(npcs) = &signals.local_npcs {
            self.observe_distraction(npcs, state, now);
        }
    }

    fn conditions(&self, state: &SessionState) -> Vec<Condition> {
        let c = &self.config;
        let pouches = state.resource(ResourceKind::CoinPouches);
        let pouch_full = pouches.map(|p| p.is_full()).unwrap_or(false);
        let idle = state.status.is_idle() && state.idle_secs > 0;
        let citizen = state
            .distraction
            .map(|d| format!("citizen={}{}", d.status_text(), d.time_text()))
            .unwrap_or_default();

        vec![
            Condition::new(AlertKind::PlayerIdle, idle, c.alert_player_idle, state.status_text()),
            Condition::new(
                AlertKind::DistractionStart,
                self.distracted,
                c.alert_distraction_start,
                citizen.clone(),
            ),
            Condition::new(
                AlertKind::DistractionEnd,
                !self.distracted && self.has_been_distracted,
                c.alert_distraction_end,
                citizen,
            ),
            Condition::new(
                AlertKind::PouchFull,
                pouch_full,
                c.alert_pouch_full,
                pouches
                    .map(|p| format!("{}/{}", p.current, p.max))
                    .unwrap_or_default(),
            ),
        ]
    }

    fn reconfigure(&mut self, config: &MonitorConfig) {
        self.config = config.thieving.clone();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{ItemStack, WorldPoint};
    use chrono::{Duration, TimeZone};

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 4, 4, 0, 0).unwrap() + Duration::seconds(secs)
    }

    fn citizen(index: u32, combat: Option<i32>) -> NpcSighting {
        NpcSighting {
            id: 13303,
            index,
            name: Some(WEALTHY_CITIZEN.to_string()),
            position: Some(WorldPoint::new(0, 0, 0)),
            animation: None,
            interacting_combat_level: combat,
        }
    }

    fn with_npcs(npcs: Vec<NpcSighting>) -> TickSignals {
        TickSignals {
            local_npcs: Some(npcs),
            ..Default::default()
        }
    }

    #[test]
    fn test_pouch_limits() {
        let tier = |medium, hard, elite| pouch_limit(&DiaryProgress { medium, hard, elite });
        assert_eq!(tier(false, false, false), 28);
        assert_eq!(tier(true, false, false), 56);
        assert_eq!(tier(true, true, false), 84);
        assert_eq!(tier(true, true, true), 140);
        // Elite without the lower tiers does not count
        assert_eq!(tier(false, false, true), 28);
        assert_eq!(tier(false, true, true), 28);
    }

    #[test]
    fn test_anchors_are_citizen_ids_only() {
        let mut other = citizen(2, None);
        other.id = 3106;
        let mut unplaced = citizen(3, None);
        unplaced.position = None;
        let anchors = Thieving::new(&MonitorConfig::default())
            .anchors(&with_npcs(vec![citizen(1, None), other, unplaced]));
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].footprint, 1);
    }

    #[test]
    fn test_coin_pouches_summed() {
        let store = MemoryStore::new();
        let mut r = Thieving::new(&MonitorConfig::default());
        let mut state = SessionState::new(ActivityKind::Thieving);
        let signals = TickSignals {
            inventory: Some(vec![
                ItemStack::new(22531, COIN_POUCH, 12),
                ItemStack::new(995, "Coins", 400),
                ItemStack::new(22531, COIN_POUCH, 3),
                ItemStack::empty(),
            ]),
            diary: Some(DiaryProgress {
                medium: true,
                hard: false,
                elite: false,
            }),
            ..Default::default()
        };
        r.observe(&signals, &mut state, t(0), &store);
        assert_eq!(
            state.resource(ResourceKind::CoinPouches),
            Some(ResourceCounter::new(15, 56))
        );
    }

    #[test]
    fn test_distraction_timing() {
        let store = MemoryStore::new();
        let mut r = Thieving::new(&MonitorConfig::default());
        let mut state = SessionState::new(ActivityKind::Thieving);

        r.observe(&with_npcs(vec![citizen(7, Some(3))]), &mut state, t(0), &store);
        assert!(!state.distraction.unwrap().distracted);
        assert_eq!(state.distraction.unwrap().secs_since_last, 0);

        r.observe(&with_npcs(vec![citizen(7, Some(0))]), &mut state, t(1), &store);
        r.observe(&with_npcs(vec![citizen(7, Some(0))]), &mut state, t(5), &store);
        let d = state.distraction.unwrap();
        assert!(d.distracted);
        assert_eq!(d.distracted_secs, 4);
        assert_eq!(r.distracted_index(), Some(7));

        r.observe(&with_npcs(vec![citizen(7, None)]), &mut state, t(6), &store);
        r.observe(&with_npcs(vec![citizen(7, None)]), &mut state, t(16), &store);
        let d = state.distraction.unwrap();
        assert!(!d.distracted);
        assert_eq!(d.distracted_secs, 0);
        assert_eq!(d.secs_since_last, 10);
        assert_eq!(r.distracted_index(), None);
    }

    #[test]
    fn test_distraction_end_needs_prior_distraction() {
        let r = Thieving::new(&MonitorConfig::default());
        let state = SessionState::new(ActivityKind::Thieving);
        let end = r
            .conditions(&state)
            .into_iter()
            .find(|c| c.kind == AlertKind::DistractionEnd)
            .unwrap();
        assert!(!end.holds);
    }

    #[test]
    fn test_should_hide_npc() {
        let store = MemoryStore::new();
        let mut config = MonitorConfig::default();
        config.thieving.hide_npcs_during_distraction = true;
        let mut r = Thieving::new(&config);
        let mut state = SessionState::new(ActivityKind::Thieving);
        state.in_range = true;

        assert!(!r.should_hide_npc(&state, 3));
        r.observe(&with_npcs(vec![citizen(7, Some(0))]), &mut state, t(0), &store);
        assert!(r.should_hide_npc(&state, 3));
        assert!(!r.should_hide_npc(&state, 7));

        state.in_range = false;
        assert!(!r.should_hide_npc(&state, 3));
    }
}
