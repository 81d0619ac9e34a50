//! Session monitor: both activity engines driven from one tick

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::MonitorConfig;
use crate::core::engine::{MonitorEngine, TickOutcome};
use crate::core::salvage::Salvaging;
use crate::core::thieving::Thieving;
use crate::store::KeyValueStore;
use crate::types::{ActivityKind, SessionState, TickRecord, TickSignals};

pub struct SessionMonitor {
    salvage: MonitorEngine<Salvaging>,
    thieving: MonitorEngine<Thieving>,
    config: MonitorConfig,
}

impl SessionMonitor {
    pub fn new(config: MonitorConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            salvage: MonitorEngine::new(Salvaging::new(&config), store.clone()),
            thieving: MonitorEngine::new(Thieving::new(&config), store),
            config,
        }
    }

    /// Run one pass of every enabled engine
    pub fn tick(&mut self, signals: &TickSignals, now: DateTime<Utc>) -> Vec<TickOutcome> {
        let mut outcomes = vec![self.salvage.tick(signals, now)];
        if self.config.thieving.enabled {
            outcomes.push(self.thieving.tick(signals, now));
        }
        outcomes
    }

    /// Run a recorded tick; records without a timestamp use `fallback`
    pub fn tick_record(&mut self, record: &TickRecord, fallback: DateTime<Utc>) -> Vec<TickOutcome> {
        self.tick(&record.signals, record.at.unwrap_or(fallback))
    }

    /// Copy of one activity's state
    pub fn state(&self, kind: ActivityKind) -> SessionState {
        match kind {
            ActivityKind::Salvaging => self.salvage.snapshot(),
            ActivityKind::Thieving => self.thieving.snapshot(),
        }
    }

    /// Activities currently evaluated each tick
    pub fn activities(&self) -> Vec<ActivityKind> {
        let mut kinds = vec![ActivityKind::Salvaging];
        if self.config.thieving.enabled {
            kinds.push(ActivityKind::Thieving);
        }
        kinds
    }

    pub fn reconfigure(&mut self, config: MonitorConfig) {
        self.salvage.reconfigure(&config);
        self.thieving.reconfigure(&config);
        self.config = config;
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn salvage(&self) -> &MonitorEngine<Salvaging> {
        &self.salvage
    }

    pub fn thieving(&self) -> &MonitorEngine<Thieving> {
        &self.thieving
    }
}
