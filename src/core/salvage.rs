//! Salvaging rules: shipwreck gate, boat health, cargo, crew and sea monsters

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use tracing::{debug, info, warn};

use crate::config::{MonitorConfig, SalvageConfig};
use crate::core::engine::ActivityRules;
use crate::core::gate::covers;
use crate::core::text::{normalize_message, parse_count, parse_fraction};
use crate::store::KeyValueStore;
use crate::types::{
    ActivityKind, ActivityStatus, AlertKind, Anchor, Condition, CrewStatus, Hazard, ItemStack,
    NpcSighting, ResourceCounter, ResourceKind, SessionState, Skill, TickSignals,
};
use crate::{DEFAULT_CARGO_CAPACITY, INVENTORY_SLOTS, SALVAGE_RANGE, SHIPWRECK_SIZE};

/// Store key for the cumulative cargo count
pub const CARGO_COUNT_KEY: &str = "salvage.cargo_count";

pub const SALVAGING_CODES: [i32; 3] = [13576, 13577, 13584];
pub const SORTING_CODE: i32 = 13599;

pub const SORTING_DONE_MESSAGE: &str = "You have no more salvage to sort.";
pub const CREW_STORED_SALVAGE: &str =
    "Managed to hook some salvage! I'll put it in the cargo hold.";

lazy_static! {
    static ref SALVAGEABLE_WRECKS: HashSet<u32> = (60464..=60478).step_by(2).collect();
    static ref DEPLETED_WRECKS: HashSet<u32> = (60465..=60479).step_by(2).collect();

    static ref SEA_MONSTERS: HashSet<u32> = [
        15210, 15196, 15207, 15206, 15208, 15209, 15212, 15200, 15201, 15198, 15199,
    ]
    .into_iter()
    .collect();

    static ref CREW_NAMES: HashSet<&'static str> = [
        "Jobless Jim",
        "Ex-Captain Siad",
        "Adventurer Ada",
        "Cabin Boy Jenkins",
        "Oarswoman Olga",
        "Jittery Jim",
        "Bosun Zarah",
        "Jolly Jim",
        "Spotter Virginia",
        "Sailor Jakob",
    ]
    .into_iter()
    .collect();
}

pub fn is_crew_member(name: &str) -> bool {
    CREW_NAMES.contains(name)
}

pub fn is_salvaging_code(code: i32) -> bool {
    SALVAGING_CODES.contains(&code)
}

/// Salvaging activity rules
#[derive(Debug, Clone)]
pub struct Salvaging {
    config: SalvageConfig,
    /// Boat health seen on the previous pass
    last_health: Option<u32>,
    /// Cumulative cargo units, persisted
    cargo_count: u32,
    /// Last parsed capacity, 0 until seen
    cargo_capacity: u32,
    /// Hold contents last applied to the count
    last_hold: Option<Vec<ItemStack>>,
}

impl Salvaging {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            config: config.salvage.clone(),
            last_health: None,
            cargo_count: 0,
            cargo_capacity: 0,
            last_hold: None,
        }
    }

    pub fn cargo_count(&self) -> u32 {
        self.cargo_count
    }

    /// Other players' vessels should be hidden while salvaging here
    pub fn should_hide_foreign_vessel(&self, state: &SessionState) -> bool {
        self.config.hide_other_vessels && state.in_range
    }

    fn cargo_max(&self) -> u32 {
        if self.cargo_capacity > 0 {
            self.cargo_capacity
        } else {
            DEFAULT_CARGO_CAPACITY
        }
    }

    fn observe_health(&mut self, signals: &TickSignals, state: &mut SessionState) {
        let Some(text) = signals.screen.health.as_deref() else {
            return;
        };
        match parse_fraction(text) {
            Some((current, max)) => {
                state.set_resource(ResourceKind::Health, ResourceCounter::new(current, max));
            }
            None => debug!(text, "unreadable boat health"),
        }
    }

    fn observe_cargo(
        &mut self,
        signals: &TickSignals,
        state: &mut SessionState,
        store: &dyn KeyValueStore,
    ) {
        let before = self.cargo_count;

        // Only a changed hold overrides; crew increments survive a steady one
        if let Some(hold) = &signals.cargo_hold {
            if self.last_hold.as_ref() != Some(hold) {
                self.cargo_count = occupied(hold);
                self.last_hold = Some(hold.clone());
            }
        }

        for overhead in &signals.overheads {
            if overhead.on_subject_vessel
                && is_crew_member(&overhead.speaker)
                && overhead.text == CREW_STORED_SALVAGE
            {
                self.cargo_count = self.cargo_count.saturating_add(1);
                debug!(crew = %overhead.speaker, cargo = self.cargo_count, "crew stored salvage");
            }
        }

        if let Some(text) = signals.screen.cargo_occupied.as_deref() {
            match parse_count(text) {
                Some(count) => self.cargo_count = count,
                None => debug!(text, "unreadable cargo count"),
            }
        }
        if let Some(text) = signals.screen.cargo_capacity.as_deref() {
            match parse_count(text) {
                Some(capacity) => self.cargo_capacity = capacity,
                None => debug!(text, "unreadable cargo capacity"),
            }
        }

        state.set_resource(
            ResourceKind::Cargo,
            ResourceCounter::new(self.cargo_count, self.cargo_max()),
        );

        if self.cargo_count != before {
            if let Err(e) = store.set(CARGO_COUNT_KEY, &self.cargo_count.to_string()) {
                warn!(error = %e, "failed to persist cargo count");
            }
        }
    }

    fn observe_crew(&self, signals: &TickSignals, state: &mut SessionState) {
        let Some(npcs) = &signals.local_npcs else {
            return;
        };
        let crew: Vec<&NpcSighting> = npcs
            .iter()
            .filter(|n| n.name.as_deref().map(is_crew_member).unwrap_or(false))
            .collect();
        let active = crew
            .iter()
            .filter(|n| n.animation.map(is_salvaging_code).unwrap_or(false))
            .count();
        state.crew = Some(CrewStatus::new(active as u32, crew.len() as u32));
    }

    fn observe_hazard(&mut self, signals: &TickSignals, state: &mut SessionState) {
        let health = state.resource(ResourceKind::Health).map(|c| c.current);
        let previous = self.last_health;
        self.last_health = health;

        if let (Some(before), Some(now)) = (previous, health) {
            if before > 0 && now < before {
                state.hazard = Hazard::under_attack();
                return;
            }
        }

        let (Some(subject), Some(npcs)) = (signals.subject_position, &signals.world_npcs) else {
            return;
        };
        let zone = Anchor::new(0, subject, 1, true);
        let monster = npcs.iter().find(|npc| {
            SEA_MONSTERS.contains(&npc.id)
                && npc
                    .position
                    .map(|p| covers(&zone, self.config.hazard_range, &p))
                    .unwrap_or(false)
        });

        state.hazard = match monster {
            Some(npc) => Hazard::threat(npc.name.clone().unwrap_or_else(|| "Monster".to_string())),
            None => Hazard::safe(),
        };
    }
}

fn occupied(items: &[ItemStack]) -> u32 {
    items.iter().filter(|i| !i.is_empty()).count() as u32
}

impl ActivityRules for Salvaging {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Salvaging
    }

    fn radius(&self) -> i32 {
        SALVAGE_RANGE
    }

    fn activity_codes(&self) -> Vec<(i32, ActivityStatus)> {
        SALVAGING_CODES
            .iter()
            .map(|&code| (code, ActivityStatus::Active))
            .chain(std::iter::once((SORTING_CODE, ActivityStatus::SecondaryActive)))
            .collect()
    }

    fn idle_threshold_ms(&self) -> u64 {
        self.config.idle_threshold_ms
    }

    fn skill(&self) -> Skill {
        Skill::Sailing
    }

    fn anchors(&self, signals: &TickSignals) -> Vec<Anchor> {
        signals
            .objects
            .iter()
            .filter_map(|o| {
                let active = if SALVAGEABLE_WRECKS.contains(&o.id) {
                    true
                } else if DEPLETED_WRECKS.contains(&o.id) {
                    false
                } else {
                    return None;
                };
                Some(Anchor::new(o.id, o.position, SHIPWRECK_SIZE, active))
            })
            .collect()
    }

    fn completion(&self, message: &str) -> Option<AlertKind> {
        (normalize_message(message) == SORTING_DONE_MESSAGE).then_some(AlertKind::SortingDone)
    }

    fn completion_alert_enabled(&self, kind: AlertKind) -> bool {
        kind == AlertKind::SortingDone && self.config.alert_sorting_done
    }

    fn restore(&mut self, state: &mut SessionState, store: &dyn KeyValueStore) {
        if let Some(saved) = store.get(CARGO_COUNT_KEY) {
            match saved.trim().parse::<u32>() {
                Ok(count) => {
                    self.cargo_count = count;
                    info!(cargo = count, "restored cargo count");
                }
                Err(_) => debug!(saved = %saved, "ignoring unreadable saved cargo count"),
            }
        }
        state.set_resource(
            ResourceKind::Cargo,
            ResourceCounter::new(self.cargo_count, self.cargo_max()),
        );
    }

    fn observe(
        &mut self,
        signals: &TickSignals,
        state: &mut SessionState,
        _now: DateTime<Utc>,
        store: &dyn KeyValueStore,
    ) {
        self.observe_health(signals, state);

        if let Some(items) = &signals.inventory {
            state.set_resource(
                ResourceKind::Inventory,
                ResourceCounter::new(occupied(items), INVENTORY_SLOTS),
            );
        }

        self.observe_cargo(signals, state, store);
        self.observe_crew(signals, state);
        self.observe_hazard(signals, state);
    }

    fn conditions(&self, state: &SessionState) -> Vec<Condition> {
        let c = &self.config;
        let health = state.resource(ResourceKind::Health);
        let inventory = state.resource(ResourceKind::Inventory);
        let cargo = state.resource(ResourceKind::Cargo);
        let text = |counter: Option<ResourceCounter>| counter.map(|c| c.text()).unwrap_or_default();

        let low_health = health
            .map(|h| h.max > 0 && h.percentage() <= c.low_health_percent)
            .unwrap_or(false);
        let inventory_full =
            inventory.map(|i| i.current >= INVENTORY_SLOTS).unwrap_or(false) && state.is_active();
        let cargo_full = cargo.map(|c| c.is_full()).unwrap_or(false);
        let idle = state.status.is_idle() && state.idle_secs > 0 && !state.is_sorting();
        let crew_idle = state.crew.map(|c| c.is_idle()).unwrap_or(false);

        vec![
            Condition::new(AlertKind::PlayerIdle, idle, c.alert_player_idle, state.status_text()),
            Condition::new(AlertKind::LowHealth, low_health, c.alert_low_health, text(health)),
            Condition::new(
                AlertKind::InventoryFull,
                inventory_full,
                c.alert_inventory_full,
                text(inventory),
            ),
            Condition::new(AlertKind::CargoFull, cargo_full, c.alert_cargo_full, text(cargo)),
            Condition::new(
                AlertKind::CrewIdle,
                crew_idle,
                c.alert_crew_idle,
                state.crew.map(|c| c.text()).unwrap_or_default(),
            ),
            Condition::new(
                AlertKind::Hazard,
                state.hazard.active,
                c.alert_hazard,
                state.hazard.text(),
            ),
        ]
    }

    fn reconfigure(&mut self, config: &MonitorConfig) {
        self.config = config.salvage.clone();
    }
}

// =============================================================================
// TESTS
// =============================================================================
