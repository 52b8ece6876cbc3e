//! Events flowing between host and core: damage, orders, feedback and
//! user-facing notifications.

use vg_core::{AgentId, Position, Tick};

/// How the host classifies a damage application.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DamageClass {
    /// Combat violence caused by someone other than the victim.
    ExternalViolence,
    SelfInflicted,
    /// Surgery, scripted events and other non-combat sources.
    Administrative,
}

/// One damage application the host is about to commit.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageEvent {
    pub victim:     AgentId,
    pub instigator: Option<AgentId>,
    pub amount:     f32,
    pub class:      DamageClass,
    /// Delivered by a projectile rather than in melee.
    pub ranged:     bool,
}

impl DamageEvent {
    /// A melee hit from `attacker`.
    pub fn melee(victim: AgentId, attacker: AgentId, amount: f32) -> Self {
        Self {
            victim,
            instigator: Some(attacker),
            amount,
            class: DamageClass::ExternalViolence,
            ranged: false,
        }
    }

    /// A projectile hit from `shooter`.
    pub fn ranged(victim: AgentId, shooter: AgentId, amount: f32) -> Self {
        Self { ranged: true, ..Self::melee(victim, shooter, amount) }
    }
}

/// Answer of the pre-commit damage hook.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum DamageVerdict {
    /// Commit the damage with this amount.
    Proceed(f32),
    /// Drop the damage entirely.
    Suppressed,
}

impl DamageVerdict {
    /// Damage the host should actually apply.
    pub fn amount(self) -> f32 {
        match self {
            DamageVerdict::Proceed(x) => x,
            DamageVerdict::Suppressed => 0.0,
        }
    }
}

/// A job the core asks the host to start on an agent.
#[derive(Clone, Debug, PartialEq)]
pub enum Order {
    /// Attack `target` directly.
    Engage { target: AgentId },
    /// Sprint to a covering point and hold there.
    Reposition { to: Position },
    /// Stay close to `ward`.
    Escort { ward: AgentId },
    /// Perform the resurrection ritual over `fallen` until `until`.
    PerformRitual { fallen: AgentId, until: Tick },
}

/// Visual/audio side effects.  Rendering them is the host's business.
#[derive(Clone, Debug, PartialEq)]
pub enum Feedback {
    GuardianBlocked { victim: AgentId, guardian: AgentId },
    Deflected { victim: AgentId, shooter: Option<AgentId> },
}

/// Informational, user-facing messages.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    TierUp { agent: AgentId, tier: u8 },
    GuardianBlocked { guardian: AgentId, victim: AgentId },
    ProtectorsRallied { victim: AgentId },
    RitualReady { fallen: AgentId },
    RitualComplete { fallen: AgentId, performer: AgentId },
}
