//! `RelationshipMap` — who oversees whom, and who guards whom.
//!
//! Mutated only through the explicit assignment methods below.  The snapshot
//! cache copies it once per tick, so assignments made mid-tick become visible
//! to callbacks on the next tick.

use std::collections::BTreeMap;

use vg_core::AgentId;

/// Persisted relationship tables, both keyed by the subordinate agent.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelationshipMap {
    /// subordinate → overseer.  Absent means unassigned.
    overseers:  BTreeMap<AgentId, AgentId>,
    /// guardian → ward.
    guard_duty: BTreeMap<AgentId, AgentId>,
}

impl RelationshipMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign (or with `None`, clear) the overseer of `agent`.
    ///
    /// Self-assignment and the `NONE` sentinel both clear the entry.  Returns
    /// the previous overseer.
    pub fn assign_overseer(&mut self, agent: AgentId, overseer: Option<AgentId>) -> Option<AgentId> {
        match overseer {
            Some(o) if o.is_some() && o != agent => self.overseers.insert(agent, o),
            _ => self.overseers.remove(&agent),
        }
    }

    pub fn overseer_of(&self, agent: AgentId) -> Option<AgentId> {
        self.overseers.get(&agent).copied()
    }

    /// Put `guardian` on guard duty for `ward`.  Returns the previous ward.
    pub fn assign_guard(&mut self, guardian: AgentId, ward: AgentId) -> Option<AgentId> {
        if guardian == ward || !ward.is_some() {
            return self.guard_duty.remove(&guardian);
        }
        self.guard_duty.insert(guardian, ward)
    }

    pub fn release_guard(&mut self, guardian: AgentId) -> Option<AgentId> {
        self.guard_duty.remove(&guardian)
    }

    pub fn ward_of(&self, guardian: AgentId) -> Option<AgentId> {
        self.guard_duty.get(&guardian).copied()
    }

    /// All (subordinate, overseer) pairs in ascending subordinate order.
    pub fn overseers(&self) -> impl Iterator<Item = (AgentId, AgentId)> + '_ {
        self.overseers.iter().map(|(&s, &o)| (s, o))
    }

    /// All (guardian, ward) pairs in ascending guardian order.
    pub fn guard_duties(&self) -> impl Iterator<Item = (AgentId, AgentId)> + '_ {
        self.guard_duty.iter().map(|(&g, &w)| (g, w))
    }

    pub fn is_empty(&self) -> bool {
        self.overseers.is_empty() && self.guard_duty.is_empty()
    }
}
