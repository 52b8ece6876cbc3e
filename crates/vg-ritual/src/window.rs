//! Resurrection window and ritual records.

use std::collections::BTreeSet;

use vg_core::{AgentId, CorpseId, Tick, TICKS_PER_DAY};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RitualConfig {
    /// How long after death the ritual stays possible.
    pub window_ticks:       u64,
    /// Essence needed before the ritual is offered.
    pub threshold:          u32,
    /// Length of the ritual itself.
    pub duration_ticks:     u64,
    /// Lowest progression tier allowed to perform it.
    pub min_performer_tier: u8,
}

impl Default for RitualConfig {
    fn default() -> Self {
        Self {
            window_ticks:       3 * TICKS_PER_DAY,
            threshold:          30,
            duration_ticks:     TICKS_PER_DAY,
            min_performer_tier: 3,
        }
    }
}

/// Per fallen agent: when it died and what has been offered since.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResurrectionWindow {
    pub died_at:  Tick,
    pub score:    u32,
    pub consumed: BTreeSet<CorpseId>,
    /// Set when a ritual completed and its revive is queued.  The window is
    /// closed once the agent is seen alive, or reopened if the host refused.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reviving: bool,
}

impl ResurrectionWindow {
    pub fn new(died_at: Tick) -> Self {
        Self { died_at, score: 0, consumed: BTreeSet::new(), reviving: false }
    }

    /// `true` while fewer than `length` ticks have passed since death.
    #[inline]
    pub fn is_open(&self, now: Tick, length: u64) -> bool {
        now.since(self.died_at) < length
    }
}

/// A ritual that has been started and not yet resolved.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RitualInProgress {
    pub performer: AgentId,
    pub started:   Tick,
    pub until:     Tick,
}
