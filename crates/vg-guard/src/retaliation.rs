//! Retaliation dispatch.
//!
//! When the authority is attacked, every bonded subordinate able to act
//! answers: it gets the combat-readiness status and is drafted.  Those still
//! holding a ready block stay back at a covering point so they can absorb the
//! next hit; everyone else, including a guardian who just spent its block,
//! engages the attacker.
//!
//! Nothing here touches the host directly.  All responses are queued and take
//! effect at the start of the next tick.

use tracing::debug;
use vg_ability::Ability;
use vg_core::AgentId;
use vg_host::{Host, Notification, Order, StatusKind};

use crate::{find_cover_point, GuardConfig, GuardCtx};

/// How a dispatch was triggered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Damage went through (or the post-damage hook fired).
    Plain,
    /// A guardian absorbed the hit.  That guardian engages even though it is
    /// on guard duty, since its block is now spent.
    AfterBlock { guardian: AgentId },
}

impl Dispatch {
    fn resolved_guardian(self) -> Option<AgentId> {
        match self {
            Dispatch::Plain => None,
            Dispatch::AfterBlock { guardian } => Some(guardian),
        }
    }
}

/// Queue protective responses for an attack on `victim` by `attacker`.
///
/// Returns the number of subordinates that were given a response.  The
/// attacker must be someone other than the victim and hostile to it.  With
/// `only` set, every other subordinate is left alone.
pub(crate) fn dispatch<H: Host + 'static>(
    ctx:      &mut GuardCtx<'_, H>,
    config:   &GuardConfig,
    victim:   AgentId,
    attacker: AgentId,
    how:      Dispatch,
    only:     Option<AgentId>,
) -> usize {
    if attacker == victim || !attacker.is_some() || !ctx.host.is_hostile(attacker, victim) {
        return 0;
    }
    let (Some(victim_view), Some(attacker_view)) = (ctx.host.view(victim), ctx.host.view(attacker))
    else {
        return 0;
    };
    if !victim_view.alive {
        return 0;
    }

    let cache = ctx.cache;
    let guardians = cache.guardians_of(victim);
    let resolved = how.resolved_guardian();
    let mut responders = 0;
    let mut rallied = 0;

    for &sub in cache.subordinates_of(victim) {
        if only.is_some_and(|o| o != sub) {
            continue;
        }
        let Some(view) = ctx.host.view(sub) else { continue };
        if !view.can_act() || !ctx.host.has_status(sub, StatusKind::Bonded) {
            continue;
        }

        if !ctx.host.has_status(sub, StatusKind::CombatReadiness) {
            rallied += 1;
        }
        ctx.queue.attach(sub, StatusKind::CombatReadiness);

        let holds_block = resolved != Some(sub)
            && guardians.contains(&sub)
            && ctx.cooldowns.is_ready(sub, Ability::Guard, ctx.now);

        let order = if holds_block {
            let host: &H = &*ctx.host;
            let spot = find_cover_point(
                victim_view.position,
                attacker_view.position,
                config,
                ctx.rng,
                |p| host.is_standable(p),
            );
            match spot {
                Some(to) => Some(Order::Reposition { to }),
                None if !view.position.within(victim_view.position, config.escort_distance) => {
                    Some(Order::Escort { ward: victim })
                }
                None => None,
            }
        } else {
            Some(Order::Engage { target: attacker })
        };

        debug!(victim = %victim, subordinate = %sub, ?order, "retaliation response");
        ctx.queue.enqueue_action("retaliation response", move |h: &mut H, _| {
            h.set_drafted(sub)?;
            if let Some(order) = order {
                h.issue_order(sub, order)?;
            }
            Ok(())
        });
        responders += 1;
    }

    // A narrowed dispatch follows a full one that already announced the rally.
    if rallied > 0 && only.is_none() {
        ctx.queue.enqueue_action("protectors rallied", move |h: &mut H, _| {
            h.notify(Notification::ProtectorsRallied { victim });
            Ok(())
        });
    }
    debug!(victim = %victim, attacker = %attacker, ?how, responders, "retaliation dispatched");
    responders
}
