//! `Interceptor` — the pre-commit damage hook.

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};
use vg_ability::Ability;
use vg_core::{AgentId, Position, Tick};
use vg_host::{DamageClass, DamageEvent, DamageVerdict, Feedback, Host, Notification};

use crate::retaliation::{self, Dispatch};
use crate::{GuardConfig, GuardCtx, GuardError, GuardResult};

/// What the chain decided for one damage event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The victim is not a protected authority (or the hit is not combat
    /// violence).  Damage proceeds untouched, nothing is dispatched.
    NotProtected,
    /// A ranged hit bounced off; the shooter gets it back next tick.
    Deflected,
    /// `guardian` absorbed the hit and took `redirected` itself.
    Blocked { guardian: AgentId, redirected: f32 },
    /// No guardian was eligible.
    Unblocked,
    /// An internal error occurred; treated as unblocked without retaliation.
    Failed,
}

impl Outcome {
    /// The answer for the host given the original `amount`.
    pub fn verdict(self, amount: f32) -> DamageVerdict {
        match self {
            Outcome::Deflected | Outcome::Blocked { .. } => DamageVerdict::Suppressed,
            Outcome::NotProtected | Outcome::Unblocked | Outcome::Failed => {
                DamageVerdict::Proceed(amount)
            }
        }
    }
}

/// Interception state owned by the engine: tunables plus the
/// per-victim-per-tick dispatch markers.
#[derive(Debug, Default)]
pub struct Interceptor {
    config:     GuardConfig,
    dispatched: FxHashMap<AgentId, Tick>,
}

impl Interceptor {
    pub fn new(config: GuardConfig) -> Self {
        Self { config, dispatched: FxHashMap::default() }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Forget last tick's dispatch markers.  Called at every tick start.
    pub fn begin_tick(&mut self) {
        self.dispatched.clear();
    }

    /// `true` if a retaliation for `victim` was already dispatched at `now`.
    pub fn was_dispatched(&self, victim: AgentId, now: Tick) -> bool {
        self.dispatched.get(&victim) == Some(&now)
    }

    /// Pre-commit hook: decide how much of `event` the host should apply.
    pub fn intercept<H: Host + 'static>(
        &mut self,
        ctx:   &mut GuardCtx<'_, H>,
        event: &DamageEvent,
    ) -> DamageVerdict {
        self.resolve(ctx, event).verdict(event.amount)
    }

    /// Run the chain and report which branch was taken.  Never fails.
    pub fn resolve<H: Host + 'static>(
        &mut self,
        ctx:   &mut GuardCtx<'_, H>,
        event: &DamageEvent,
    ) -> Outcome {
        match self.try_resolve(ctx, event) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(victim = %event.victim, %err, "interception failed; damage proceeds");
                Outcome::Failed
            }
        }
    }

    /// Post-damage hook.  Dispatches retaliation unless one already went out
    /// for this victim during the current tick.
    pub fn after_damage<H: Host + 'static>(
        &mut self,
        ctx:   &mut GuardCtx<'_, H>,
        event: &DamageEvent,
    ) -> usize {
        if !self.is_protected(&*ctx, event) {
            return 0;
        }
        match event.instigator {
            Some(attacker) => self.retaliate(ctx, event.victim, attacker, Dispatch::Plain),
            None => 0,
        }
    }

    /// Dispatch with the per-victim-per-tick marker.
    ///
    /// The first dispatch for a victim in a tick answers with every able
    /// subordinate.  After that a plain dispatch is skipped, and a dispatch
    /// after a block only sends in the guardian whose block was spent, so
    /// the result does not depend on which damage hook the host calls first.
    pub fn retaliate<H: Host + 'static>(
        &mut self,
        ctx:      &mut GuardCtx<'_, H>,
        victim:   AgentId,
        attacker: AgentId,
        how:      Dispatch,
    ) -> usize {
        let only = if self.was_dispatched(victim, ctx.now) {
            match how {
                Dispatch::Plain => {
                    debug!(victim = %victim, "retaliation already dispatched this tick");
                    return 0;
                }
                Dispatch::AfterBlock { guardian } => Some(guardian),
            }
        } else {
            None
        };
        self.dispatched.insert(victim, ctx.now);
        retaliation::dispatch(ctx, &self.config, victim, attacker, how, only)
    }

    // ── Chain steps ───────────────────────────────────────────────────────

    fn is_protected<H: Host>(&self, ctx: &GuardCtx<'_, H>, event: &DamageEvent) -> bool {
        event.class == DamageClass::ExternalViolence
            && event.amount > 0.0
            && ctx.cache.is_authority(event.victim)
            && ctx.host.view(event.victim).is_some_and(|v| v.alive)
    }

    fn try_resolve<H: Host + 'static>(
        &mut self,
        ctx:   &mut GuardCtx<'_, H>,
        event: &DamageEvent,
    ) -> GuardResult<Outcome> {
        if !event.amount.is_finite() {
            return Err(GuardError::NonFiniteDamage(event.amount));
        }
        if !self.is_protected(&*ctx, event) {
            return Ok(Outcome::NotProtected);
        }
        let victim = event.victim;
        let Some(victim_pos) = ctx.host.view(victim).map(|v| v.position) else {
            return Ok(Outcome::NotProtected);
        };

        if event.ranged && self.roll_deflect(ctx, event) {
            return Ok(Outcome::Deflected);
        }

        let Some(guardian) = self.find_guardian(&*ctx, victim, victim_pos) else {
            if let Some(attacker) = event.instigator {
                self.retaliate(ctx, victim, attacker, Dispatch::Plain);
            }
            return Ok(Outcome::Unblocked);
        };

        let share = event.amount * self.config.redirect_fraction;
        let redirected = if share >= self.config.redirect_floor {
            ctx.host.apply_damage(guardian, share, event.instigator)?;
            share
        } else {
            0.0
        };
        let ready = ctx.cooldowns.trigger(guardian, Ability::Guard, ctx.now);
        ctx.host.emit(Feedback::GuardianBlocked { victim, guardian });
        ctx.queue.enqueue_action("guardian blocked notification", move |h: &mut H, _| {
            h.notify(Notification::GuardianBlocked { guardian, victim });
            Ok(())
        });
        info!(
            victim = %victim, guardian = %guardian, amount = event.amount,
            redirected, ready = %ready, "hit blocked"
        );

        if let Some(attacker) = event.instigator {
            self.retaliate(ctx, victim, attacker, Dispatch::AfterBlock { guardian });
        }
        Ok(Outcome::Blocked { guardian, redirected })
    }

    /// Ranged hits on a protected authority may bounce off.  A successful
    /// roll queues the same amount back onto a living shooter.
    fn roll_deflect<H: Host + 'static>(&self, ctx: &mut GuardCtx<'_, H>, event: &DamageEvent) -> bool {
        let followers = ctx.cache.subordinates_of(event.victim).len();
        let chance = self.config.deflect_chance(followers);
        if !ctx.rng.gen_bool(chance as f64) {
            return false;
        }

        let victim = event.victim;
        ctx.host.emit(Feedback::Deflected { victim, shooter: event.instigator });
        if let Some(shooter) = event.instigator.filter(|&s| s != victim) {
            let amount = event.amount;
            ctx.queue.enqueue_action("deflected counter-hit", move |h: &mut H, _| {
                if h.view(shooter).is_some_and(|v| v.alive) {
                    h.apply_damage(shooter, amount, Some(victim))?;
                }
                Ok(())
            });
        }
        debug!(victim = %victim, chance, "ranged hit deflected");
        true
    }

    /// Nearest eligible guardian on duty for `victim`.  Equal distances keep
    /// the first candidate in host order.
    fn find_guardian<H: Host>(
        &self,
        ctx:        &GuardCtx<'_, H>,
        victim:     AgentId,
        victim_pos: Position,
    ) -> Option<AgentId> {
        let mut best: Option<(f32, AgentId)> = None;
        for &g in ctx.cache.guardians_of(victim) {
            if g == victim {
                continue;
            }
            let Some(view) = ctx.host.view(g) else { continue };
            if !view.alive
                || !view.conscious
                || ctx.tier(g) < self.config.min_tier
                || !view.position.within(victim_pos, self.config.radius)
                || !ctx.cooldowns.is_ready(g, Ability::Guard, ctx.now)
            {
                continue;
            }
            let d = view.position.distance_sq(victim_pos);
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, g));
            }
        }
        if let Some((d, g)) = best {
            debug!(victim = %victim, guardian = %g, distance = d.sqrt(), "guardian resolved");
        }
        best.map(|(_, g)| g)
    }
}
