//! `SavedState` — what survives a save/load cycle.
//!
//! Only the flat agent-keyed tables are written: relationships, one cooldown
//! map per ability, progression severities, resurrection windows and
//! rituals in progress.  The snapshot cache, the deferred queue, dispatch
//! markers and last-observed tiers are derived state and are rebuilt.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vg_ability::CooldownTables;
use vg_core::{AgentId, Tick};
use vg_ritual::{ResurrectionWindow, RitualInProgress};
use vg_tick::RelationshipMap;

use crate::{SimError, SimResult};

/// Format version written by this build.
pub const SAVE_VERSION: u32 = 1;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedState {
    pub version:    u32,
    pub tick:       Tick,
    pub relations:  RelationshipMap,
    pub cooldowns:  CooldownTables,
    pub severities: BTreeMap<AgentId, f32>,
    pub windows:    BTreeMap<AgentId, ResurrectionWindow>,
    pub rituals:    BTreeMap<AgentId, RitualInProgress>,
}

impl SavedState {
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> SimResult<Self> {
        let state: SavedState = serde_json::from_str(text)?;
        if state.version != SAVE_VERSION {
            return Err(SimError::UnsupportedVersion { found: state.version, expected: SAVE_VERSION });
        }
        Ok(state)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> SimResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read(path: impl AsRef<Path>) -> SimResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}
