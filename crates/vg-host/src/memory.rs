//! `MemoryHost` — an in-memory reference world.
//!
//! Agent state is stored Structure-of-Arrays: every `Vec` field has exactly
//! `count` elements and `AgentId(i)` indexes all of them.  Used by the test
//! suites and the demo binary; a real host implements [`Host`] over its own
//! data.

use std::collections::{BTreeMap, BTreeSet};

use vg_core::{AgentId, CorpseId, Position};

use crate::{
    standard_essence, AgentView, CorpseInfo, Feedback, Host, HostError, HostResult,
    Notification, Order, StatusKind,
};

/// Structure-of-Arrays world state.
///
/// All fields are `pub` so tests can stage a scene with plain indexed writes.
pub struct MemoryHost {
    /// Number of agent slots.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// `false` models "no active world": `live_agents` fails.
    pub active: bool,

    // ── Presence and vitals ───────────────────────────────────────────────
    /// `false` once the agent has left the world (destroyed, despawned).
    pub present:         Vec<bool>,
    pub alive:           Vec<bool>,
    pub conscious:       Vec<bool>,
    pub authority:       Vec<bool>,
    pub mental_override: Vec<bool>,
    pub morale:          Vec<Option<f32>>,
    pub positions:       Vec<Position>,
    /// Agents of different factions are hostile to each other.
    pub faction:         Vec<u8>,

    // ── Effects of core commands ──────────────────────────────────────────
    pub statuses:     Vec<BTreeSet<StatusKind>>,
    pub drafted:      Vec<bool>,
    pub orders:       Vec<Option<Order>>,
    pub damage_taken: Vec<f32>,

    // ── World extras ──────────────────────────────────────────────────────
    pub corpses: BTreeMap<CorpseId, CorpseInfo>,
    /// Standable region as (min, max) corners.  `None` = everywhere.
    pub bounds:  Option<(Position, Position)>,

    // ── Recorders ─────────────────────────────────────────────────────────
    pub feedback:      Vec<Feedback>,
    pub notifications: Vec<Notification>,
}

impl MemoryHost {
    /// Iterator over every slot id in ascending order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Index of `agent` if it is a present slot.
    #[inline]
    fn slot(&self, agent: AgentId) -> Option<usize> {
        let i = agent.0 as usize;
        (i < self.count && self.present[i]).then_some(i)
    }

    #[inline]
    fn slot_or_gone(&self, agent: AgentId) -> HostResult<usize> {
        self.slot(agent).ok_or(HostError::AgentGone(agent))
    }

    /// Mark an agent dead (its statuses are kept, like a corpse's).
    pub fn kill(&mut self, agent: AgentId) {
        if let Some(i) = self.slot(agent) {
            self.alive[i] = false;
            self.conscious[i] = false;
            self.orders[i] = None;
        }
    }

    /// Remove an agent from the world entirely.
    pub fn despawn(&mut self, agent: AgentId) {
        if let Some(i) = self.slot(agent) {
            self.present[i] = false;
        }
    }

    /// Place a corpse in the world.
    pub fn add_corpse(&mut self, corpse: CorpseId, info: CorpseInfo) {
        self.corpses.insert(corpse, info);
    }

    /// Statuses currently on `agent` (empty for gone agents).
    pub fn statuses_of(&self, agent: AgentId) -> Vec<StatusKind> {
        self.slot(agent)
            .map(|i| self.statuses[i].iter().copied().collect())
            .unwrap_or_default()
    }

    /// The order most recently issued to `agent`.
    pub fn order_of(&self, agent: AgentId) -> Option<&Order> {
        self.slot(agent).and_then(|i| self.orders[i].as_ref())
    }

    pub(crate) fn new(count: usize) -> Self {
        Self {
            count,
            active:          true,
            present:         vec![true; count],
            alive:           vec![true; count],
            conscious:       vec![true; count],
            authority:       vec![false; count],
            mental_override: vec![false; count],
            morale:          vec![Some(0.5); count],
            positions:       vec![Position::default(); count],
            faction:         vec![0; count],
            statuses:        vec![BTreeSet::new(); count],
            drafted:         vec![false; count],
            orders:          vec![None; count],
            damage_taken:    vec![0.0; count],
            corpses:         BTreeMap::new(),
            bounds:          None,
            feedback:        Vec::new(),
            notifications:   Vec::new(),
        }
    }
}

impl Host for MemoryHost {
    fn live_agents(&self) -> HostResult<Vec<AgentId>> {
        if !self.active {
            return Err(HostError::Unavailable);
        }
        Ok(self.agent_ids().filter(|&a| self.slot(a).is_some()).collect())
    }

    fn view(&self, agent: AgentId) -> Option<AgentView> {
        let i = self.slot(agent)?;
        Some(AgentView {
            id:              agent,
            alive:           self.alive[i],
            conscious:       self.conscious[i],
            authority:       self.authority[i],
            mental_override: self.mental_override[i],
            morale:          self.morale[i],
            position:        self.positions[i],
        })
    }

    fn has_status(&self, agent: AgentId, kind: StatusKind) -> bool {
        self.slot(agent).is_some_and(|i| self.statuses[i].contains(&kind))
    }

    fn is_hostile(&self, attacker: AgentId, victim: AgentId) -> bool {
        match (self.slot(attacker), self.slot(victim)) {
            (Some(a), Some(v)) => self.faction[a] != self.faction[v] || self.mental_override[a],
            _ => false,
        }
    }

    fn current_order(&self, agent: AgentId) -> Option<Order> {
        self.order_of(agent).cloned()
    }

    fn corpse_essence(&self, corpse: CorpseId) -> Option<u32> {
        self.corpses.get(&corpse).copied().map(standard_essence)
    }

    fn is_standable(&self, pos: Position) -> bool {
        match self.bounds {
            None => true,
            Some((lo, hi)) => pos.x >= lo.x && pos.x <= hi.x && pos.y >= lo.y && pos.y <= hi.y,
        }
    }

    fn attach_status(&mut self, agent: AgentId, kind: StatusKind) -> HostResult<()> {
        let i = self.slot_or_gone(agent)?;
        self.statuses[i].insert(kind);
        Ok(())
    }

    fn detach_status(&mut self, agent: AgentId, kind: StatusKind) -> HostResult<()> {
        let i = self.slot_or_gone(agent)?;
        self.statuses[i].remove(&kind);
        Ok(())
    }

    fn apply_damage(
        &mut self,
        victim:      AgentId,
        amount:      f32,
        _instigator: Option<AgentId>,
    ) -> HostResult<()> {
        let i = self.slot_or_gone(victim)?;
        self.damage_taken[i] += amount;
        Ok(())
    }

    fn set_drafted(&mut self, agent: AgentId) -> HostResult<()> {
        let i = self.slot_or_gone(agent)?;
        self.drafted[i] = true;
        Ok(())
    }

    fn issue_order(&mut self, agent: AgentId, order: Order) -> HostResult<()> {
        let i = self.slot_or_gone(agent)?;
        if !self.alive[i] {
            return Err(HostError::Rejected(format!("{agent} is dead")));
        }
        self.orders[i] = Some(order);
        Ok(())
    }

    fn revive(&mut self, agent: AgentId) -> HostResult<()> {
        let i = self.slot_or_gone(agent)?;
        self.alive[i] = true;
        self.conscious[i] = true;
        Ok(())
    }

    fn destroy_corpse(&mut self, corpse: CorpseId) -> HostResult<()> {
        self.corpses
            .remove(&corpse)
            .map(|_| ())
            .ok_or(HostError::CorpseGone(corpse))
    }

    fn emit(&mut self, feedback: Feedback) {
        self.feedback.push(feedback);
    }

    fn notify(&mut self, note: Notification) {
        self.notifications.push(note);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`MemoryHost`].
///
/// ```rust
/// use vg_core::{AgentId, Position};
/// use vg_host::MemoryHostBuilder;
///
/// let host = MemoryHostBuilder::new(3)
///     .authority(AgentId(0))
///     .at(AgentId(1), Position::new(4.0, 0.0))
///     .faction(AgentId(2), 1)
///     .build();
///
/// assert_eq!(host.count, 3);
/// assert!(host.authority[0]);
/// ```
pub struct MemoryHostBuilder {
    host: MemoryHost,
}

impl MemoryHostBuilder {
    /// Create a world with `count` live, conscious agents at the origin.
    pub fn new(count: usize) -> Self {
        Self { host: MemoryHost::new(count) }
    }

    pub fn authority(mut self, agent: AgentId) -> Self {
        if let Some(i) = self.host.slot(agent) {
            self.host.authority[i] = true;
        }
        self
    }

    pub fn at(mut self, agent: AgentId, pos: Position) -> Self {
        if let Some(i) = self.host.slot(agent) {
            self.host.positions[i] = pos;
        }
        self
    }

    pub fn faction(mut self, agent: AgentId, faction: u8) -> Self {
        if let Some(i) = self.host.slot(agent) {
            self.host.faction[i] = faction;
        }
        self
    }

    pub fn morale(mut self, agent: AgentId, morale: f32) -> Self {
        if let Some(i) = self.host.slot(agent) {
            self.host.morale[i] = Some(morale);
        }
        self
    }

    pub fn status(mut self, agent: AgentId, kind: StatusKind) -> Self {
        if let Some(i) = self.host.slot(agent) {
            self.host.statuses[i].insert(kind);
        }
        self
    }

    pub fn bounds(mut self, min: Position, max: Position) -> Self {
        self.host.bounds = Some((min, max));
        self
    }

    pub fn build(self) -> MemoryHost {
        self.host
    }
}
