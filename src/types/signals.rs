//! Raw world signals sampled once per tick
//!
//! Every feed is best-effort: `None` means "unavailable this tick" and the
//! derived fields that depend on it keep their previous values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::WorldPoint;

/// An item stack in a container slot; id < 0 marks an empty slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl ItemStack {
    pub fn new(id: i32, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id,
            name: Some(name.into()),
            quantity,
        }
    }

    pub fn empty() -> Self {
        Self {
            id: -1,
            name: None,
            quantity: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id < 0
    }
}

/// A scenery object present in the scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: u32,
    pub position: WorldPoint,
}

/// An NPC visible this tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcSighting {
    pub id: u32,
    /// Scene index, stable while the NPC stays loaded
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<WorldPoint>,
    #[serde(default)]
    pub animation: Option<i32>,
    /// Combat level of whatever this NPC is interacting with
    #[serde(default)]
    pub interacting_combat_level: Option<i32>,
}

impl NpcSighting {
    pub fn named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

/// Text spoken above an actor's head
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverheadText {
    pub speaker: String,
    pub text: String,
    /// Speaker shares the subject's vessel
    #[serde(default)]
    pub on_subject_vessel: bool,
}

/// Skills whose progression is tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Sailing,
    Thieving,
}

/// Stored experience counter for one skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSample {
    pub skill: Skill,
    pub experience: u32,
    /// Level as reported by the host; derived from experience when absent
    #[serde(default)]
    pub level: Option<u8>,
}

/// Achievement diary tier completion flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiaryProgress {
    #[serde(default)]
    pub medium: bool,
    #[serde(default)]
    pub hard: bool,
    #[serde(default)]
    pub elite: bool,
}

/// On-screen numeric text fields, raw as displayed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenText {
    /// "current/max"
    pub health: Option<String>,
    pub cargo_occupied: Option<String>,
    pub cargo_capacity: Option<String>,
}

/// Everything sampled at the start of one pass
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickSignals {
    pub subject_name: Option<String>,
    /// Vessel position when aboard one, otherwise the subject's own tile
    pub subject_position: Option<WorldPoint>,
    /// Raw activity code (animation id)
    pub animation: Option<i32>,
    /// Scenery currently spawned
    pub objects: Vec<WorldObject>,
    /// NPCs sharing the subject's view (crew, citizens)
    pub local_npcs: Option<Vec<NpcSighting>>,
    /// NPCs in the top-level world (sea monsters)
    pub world_npcs: Option<Vec<NpcSighting>>,
    pub inventory: Option<Vec<ItemStack>>,
    /// Cargo hold contents sampled this tick. Sent every tick when visible;
    /// the count is only re-read from it when the contents differ from the
    /// last applied sample.
    pub cargo_hold: Option<Vec<ItemStack>>,
    pub screen: ScreenText,
    /// Game messages received since the previous tick
    pub messages: Vec<String>,
    pub overheads: Vec<OverheadText>,
    pub skills: Vec<SkillSample>,
    pub diary: Option<DiaryProgress>,
}

impl TickSignals {
    pub fn skill(&self, skill: Skill) -> Option<SkillSample> {
        self.skills.iter().copied().find(|s| s.skill == skill)
    }
}

/// One recorded tick: the evaluation time plus its signals
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickRecord {
    /// Evaluation time; callers substitute "now" when absent
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub signals: TickSignals,
}
