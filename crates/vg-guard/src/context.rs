//! `GuardCtx<'a, H>` — the engine state one damage event may read or touch.

use vg_ability::{CooldownRegistry, ProgressionTracker};
use vg_core::{AgentId, SimRng, Tick};
use vg_host::Host;
use vg_tick::{DeferredQueue, SnapshotCache};

/// Split borrows of the engine's tables for the duration of one hook call.
///
/// The engine builds one of these per damage event; the chain never holds it
/// across calls.
pub struct GuardCtx<'a, H: Host> {
    pub host:        &'a mut H,
    pub cache:       &'a SnapshotCache,
    pub cooldowns:   &'a mut CooldownRegistry,
    pub progression: &'a ProgressionTracker,
    pub queue:       &'a mut DeferredQueue<H>,
    pub rng:         &'a mut SimRng,
    pub now:         Tick,
}

impl<H: Host> GuardCtx<'_, H> {
    #[inline]
    pub fn tier(&self, agent: AgentId) -> u8 {
        self.progression.tier(agent)
    }
}
