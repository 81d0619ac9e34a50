//! Core modules for Idlewatch

pub mod api;
pub mod classifier;
pub mod diff;
pub mod engine;
pub mod gate;
pub mod latch;
pub mod monitor;
pub mod progression;
pub mod salvage;
pub mod text;
pub mod thieving;

pub use api::{create_router, router, run_server, AppState, MonitorEvent};
pub use classifier::{ActivityClassifier, Classification};
pub use diff::{changed_fields, has_changed};
pub use engine::{ActivityRules, MonitorEngine, TickOutcome};
pub use gate::{GateResult, SpatialGate};
pub use latch::{AlertLatch, AlertSet};
pub use monitor::SessionMonitor;
pub use progression::{compute, experience_for_level, from_experience, level_for_experience};
pub use salvage::Salvaging;
pub use thieving::Thieving;
