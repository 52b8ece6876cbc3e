//! Guard-duty roster: who shields whom.
//!
//! Assignments live in the [`RelationshipMap`]; the host-side marker is the
//! [`StatusKind::Guardian`] status, attached and detached through the
//! deferred queue.  The roster is re-checked by the guardian status's
//! periodic callback, which releases a guardian whose ward is gone or whose
//! tier fell below the minimum.

use tracing::info;
use vg_core::AgentId;
use vg_host::{Host, StatusKind};
use vg_tick::{DeferredQueue, RelationshipMap};

use crate::{GuardConfig, GuardError, GuardResult};

/// Put `guardian` on duty for `ward`.  Returns the guardian's previous ward.
pub fn assign_guardian<H: Host>(
    relations: &mut RelationshipMap,
    queue:     &mut DeferredQueue<H>,
    host:      &H,
    config:    &GuardConfig,
    guardian:  AgentId,
    ward:      AgentId,
    tier:      u8,
) -> GuardResult<Option<AgentId>> {
    if guardian == ward {
        return Err(GuardError::SelfGuard(guardian));
    }
    for agent in [guardian, ward] {
        if !host.view(agent).is_some_and(|v| v.alive) {
            return Err(GuardError::NotAlive(agent));
        }
    }
    if tier < config.min_tier {
        return Err(GuardError::TierTooLow { guardian, tier, required: config.min_tier });
    }

    let previous = relations.assign_guard(guardian, ward);
    queue.attach(guardian, StatusKind::Guardian);
    info!(guardian = %guardian, ward = %ward, "guard duty assigned");
    Ok(previous)
}

/// Take `guardian` off duty.  Returns the ward it was guarding, if any.
pub fn release_guardian<H: Host>(
    relations: &mut RelationshipMap,
    queue:     &mut DeferredQueue<H>,
    guardian:  AgentId,
) -> Option<AgentId> {
    let ward = relations.release_guard(guardian)?;
    queue.detach(guardian, StatusKind::Guardian);
    info!(guardian = %guardian, ward = %ward, "guard duty released");
    Some(ward)
}

/// Periodic check for one guardian.  Returns `true` if it stays on duty.
pub fn revalidate_duty<H: Host>(
    relations: &mut RelationshipMap,
    queue:     &mut DeferredQueue<H>,
    host:      &H,
    config:    &GuardConfig,
    guardian:  AgentId,
    tier:      u8,
) -> bool {
    let Some(ward) = relations.ward_of(guardian) else {
        if host.has_status(guardian, StatusKind::Guardian) {
            queue.detach(guardian, StatusKind::Guardian);
        }
        return false;
    };
    let ward_alive = host.view(ward).is_some_and(|v| v.alive);
    if ward_alive && tier >= config.min_tier {
        return true;
    }
    release_guardian(relations, queue, guardian);
    false
}
