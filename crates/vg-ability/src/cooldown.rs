//! `CooldownRegistry` — per-agent, per-ability ready ticks.
//!
//! An absent entry means "ready".  Entries are never removed on expiry; an
//! entry whose tick has passed reads as ready and is overwritten by the next
//! `set`.  [`CooldownRegistry::prune`] drops them when the caller wants the
//! persisted tables small.

use std::collections::BTreeMap;

use tracing::debug;
use vg_core::{AgentId, Tick};

use crate::Ability;

/// Persisted form: one agent → ready-tick map per ability.
pub type CooldownTables = BTreeMap<Ability, BTreeMap<AgentId, Tick>>;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CooldownConfig {
    /// Global scale applied to every base duration.  Negative values act as 0.
    pub multiplier: f32,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self { multiplier: 1.0 }
    }
}

impl CooldownConfig {
    /// `base` scaled by the multiplier, truncated toward zero.
    pub fn scaled(&self, base: u64) -> u64 {
        (base as f64 * self.multiplier.max(0.0) as f64) as u64
    }
}

#[derive(Clone, Debug, Default)]
pub struct CooldownRegistry {
    config: CooldownConfig,
    tables: CooldownTables,
}

impl CooldownRegistry {
    pub fn new(config: CooldownConfig) -> Self {
        Self { config, tables: CooldownTables::new() }
    }

    /// Rebuild from persisted tables.
    pub fn from_tables(config: CooldownConfig, tables: CooldownTables) -> Self {
        Self { config, tables }
    }

    pub fn config(&self) -> &CooldownConfig {
        &self.config
    }

    pub fn tables(&self) -> &CooldownTables {
        &self.tables
    }

    fn ready_at(&self, agent: AgentId, ability: Ability) -> Option<Tick> {
        self.tables.get(&ability)?.get(&agent).copied()
    }

    /// `true` if there is no entry or `now` has reached the stored tick.
    pub fn is_ready(&self, agent: AgentId, ability: Ability, now: Tick) -> bool {
        self.ready_at(agent, ability).is_none_or(|t| now >= t)
    }

    /// Ticks until ready, 0 if already ready.
    pub fn remaining(&self, agent: AgentId, ability: Ability, now: Tick) -> u64 {
        self.ready_at(agent, ability).map_or(0, |t| t.since(now))
    }

    /// Start a cooldown of `base` ticks (before the multiplier).  Returns the
    /// tick at which the ability is ready again.
    pub fn set(&mut self, agent: AgentId, ability: Ability, base: u64, now: Tick) -> Tick {
        let ready = now.offset(self.config.scaled(base));
        self.tables.entry(ability).or_default().insert(agent, ready);
        debug!(agent = %agent, ability = %ability, ready = %ready, "cooldown set");
        ready
    }

    /// [`set`](Self::set) with the ability's own base duration.
    pub fn trigger(&mut self, agent: AgentId, ability: Ability, now: Tick) -> Tick {
        self.set(agent, ability, ability.base_ticks(), now)
    }

    /// String entry point.  An unknown name changes nothing and returns
    /// `false`.
    pub fn set_named(&mut self, agent: AgentId, name: &str, base: u64, now: Tick) -> bool {
        match name.parse::<Ability>() {
            Ok(ability) => {
                self.set(agent, ability, base, now);
                true
            }
            Err(err) => {
                debug!(agent = %agent, %err, "cooldown request ignored");
                false
            }
        }
    }

    /// Clear an entry, making the ability ready immediately.
    pub fn reset(&mut self, agent: AgentId, ability: Ability) {
        if let Some(table) = self.tables.get_mut(&ability) {
            table.remove(&agent);
        }
    }

    /// Drop entries that are already ready at `now`.  Returns how many went.
    pub fn prune(&mut self, now: Tick) -> usize {
        let mut dropped = 0;
        for table in self.tables.values_mut() {
            let before = table.len();
            table.retain(|_, ready| *ready > now);
            dropped += before - table.len();
        }
        self.tables.retain(|_, table| !table.is_empty());
        dropped
    }
}
