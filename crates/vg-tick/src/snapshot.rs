//! `SnapshotCache` — population facts frozen once per tick.
//!
//! # Why this exists
//!
//! Status callbacks run once per agent per tick.  If each of them scanned the
//! live population to count tiers or find its overseer, a tick would cost
//! O(N²).  Worse, the host may be appending to that population while it calls
//! us.  `rebuild` does the one O(N) pass at tick start; every accessor after
//! that is an O(1) map lookup that never touches the host.
//!
//! The cache is a value object: it is replaced wholesale by `rebuild` and
//! nothing else writes to it.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};
use vg_core::{AgentId, Tick};
use vg_host::Host;

use crate::RelationshipMap;

/// Number of progression tiers (0 through 4).
pub const TIER_COUNT: usize = 5;

/// Read-only aggregate facts about the live population.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    built_at:     Option<Tick>,
    stale:        bool,
    population:   usize,
    tier_counts:  [usize; TIER_COUNT],
    authorities:  FxHashSet<AgentId>,
    /// Materialized copy of the relationship map's overseer table.
    overseer_of:  FxHashMap<AgentId, AgentId>,
    /// overseer → live subordinates, in host order.
    subordinates: FxHashMap<AgentId, Vec<AgentId>>,
    /// ward → live guardians on duty for it, in host order.
    guardians:    FxHashMap<AgentId, Vec<AgentId>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from the host's live agents.
    ///
    /// `tier_of` maps an agent to its progression tier (clamped to
    /// `TIER_COUNT - 1`).  If the host has no active world the previous
    /// snapshot is kept, [`is_stale`](Self::is_stale) becomes `true`, and
    /// `false` is returned.
    pub fn rebuild<H, F>(&mut self, host: &H, relations: &RelationshipMap, tier_of: F, now: Tick) -> bool
    where
        H: Host,
        F: Fn(AgentId) -> u8,
    {
        let live = match host.live_agents() {
            Ok(live) => live,
            Err(err) => {
                if !self.stale {
                    warn!(tick = %now, %err, "snapshot rebuild skipped; serving last good snapshot");
                }
                self.stale = true;
                return false;
            }
        };

        let mut next = SnapshotCache {
            built_at: Some(now),
            overseer_of: relations.overseers().collect(),
            ..SnapshotCache::default()
        };

        for agent in live {
            let Some(view) = host.view(agent) else { continue };
            if !view.alive {
                continue;
            }
            next.population += 1;
            let tier = (tier_of(agent) as usize).min(TIER_COUNT - 1);
            next.tier_counts[tier] += 1;
            if view.authority {
                next.authorities.insert(agent);
            }
            if let Some(overseer) = relations.overseer_of(agent) {
                next.subordinates.entry(overseer).or_default().push(agent);
            }
            if let Some(ward) = relations.ward_of(agent) {
                next.guardians.entry(ward).or_default().push(agent);
            }
        }

        debug!(
            tick = %now,
            population = next.population,
            authorities = next.authorities.len(),
            "snapshot rebuilt"
        );
        *self = next;
        true
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Tick of the last successful rebuild, `None` before the first.
    pub fn built_at(&self) -> Option<Tick> {
        self.built_at
    }

    /// `true` if the last rebuild attempt found no active world.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Live agents counted at the last rebuild.
    pub fn population(&self) -> usize {
        self.population
    }

    /// Live agents at exactly `tier`.  Out-of-range tiers count zero.
    pub fn tier_count(&self, tier: u8) -> usize {
        self.tier_counts.get(tier as usize).copied().unwrap_or(0)
    }

    pub fn is_authority(&self, agent: AgentId) -> bool {
        self.authorities.contains(&agent)
    }

    /// Handle to a live authority holder, `None` if `agent` held no
    /// authority (or was dead) at the last rebuild.
    pub fn authority_agent(&self, agent: AgentId) -> Option<AgentId> {
        self.authorities.get(&agent).copied()
    }

    pub fn overseer_of(&self, agent: AgentId) -> Option<AgentId> {
        self.overseer_of.get(&agent).copied()
    }

    /// Live subordinates of `overseer`, in host order.
    pub fn subordinates_of(&self, overseer: AgentId) -> &[AgentId] {
        self.subordinates.get(&overseer).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Live guardians on duty for `ward`, in host order.
    pub fn guardians_of(&self, ward: AgentId) -> &[AgentId] {
        self.guardians.get(&ward).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ability power scaled by devotion: every tier-3 agent adds `bonus`,
    /// every tier-4 agent twice that.
    pub fn power(&self, base: f32, bonus: f32, multiplier: f32) -> f32 {
        let t3 = self.tier_count(3) as f32;
        let t4 = self.tier_count(4) as f32;
        (base + t3 * bonus + t4 * bonus * 2.0) * multiplier
    }
}
