//! Read-only per-agent facts and the closed set of governed status kinds.

use vg_core::{AgentId, Position};

/// The status-effect families whose mutation requests the core writes.
///
/// The host owns the actual instances; the core only asks for attach/detach
/// and checks presence.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    /// Carries the progression severity; attached on overseer assignment.
    Progression,
    /// Deep attachment to the overseer.  Doubles progression growth and makes
    /// the agent answer attacks on its overseer.
    Bonded,
    /// Marks an agent on guard duty for its ward.
    Guardian,
    /// Temporary combat buffer granted by a retaliation dispatch.
    CombatReadiness,
    /// Attached to an agent brought back by the resurrection ritual.
    PostRevivalWeakness,
    /// Attached to the ritual performer on completion.
    RitualExhaustion,
    /// One-shot morale lift for subordinates after a revival.
    Rallied,
}

impl StatusKind {
    pub const ALL: [StatusKind; 7] = [
        StatusKind::Progression,
        StatusKind::Bonded,
        StatusKind::Guardian,
        StatusKind::CombatReadiness,
        StatusKind::PostRevivalWeakness,
        StatusKind::RitualExhaustion,
        StatusKind::Rallied,
    ];
}

/// A point-in-time copy of the host facts the core needs about one agent.
///
/// `position` changes every tick and must never be cached across ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentView {
    pub id:              AgentId,
    pub alive:           bool,
    /// Awake and not incapacitated.
    pub conscious:       bool,
    /// Holds the distinguished, protected authority role.
    pub authority:       bool,
    /// Currently under a mental-state override (berserk, panic, ...).
    pub mental_override: bool,
    /// Mood level in [0, 1], if the agent has one.
    pub morale:          Option<f32>,
    pub position:        Position,
}

impl AgentView {
    /// Alive, conscious and in control of itself.
    #[inline]
    pub fn can_act(&self) -> bool {
        self.alive && self.conscious && !self.mental_override
    }
}
