//! Core types for Idlewatch

mod alert;
mod hazard;
mod output;
mod position;
mod progression;
mod resource;
mod session;
mod signals;
mod state;

pub use alert::{AlertEvent, AlertKind, Condition};
pub use hazard::{Distraction, Hazard, UNDER_ATTACK};
pub use output::{idle_text, StateNotification};
pub use position::{Anchor, WorldPoint};
pub use progression::{format_number, LevelProgress, Progression};
pub use resource::{percentage, CrewStatus, ResourceCounter, ResourceKind};
pub use session::SessionState;
pub use signals::{
    DiaryProgress, ItemStack, NpcSighting, OverheadText, ScreenText, Skill, SkillSample,
    TickRecord, TickSignals, WorldObject,
};
pub use state::{ActivityKind, ActivityStatus, EnginePhase};
