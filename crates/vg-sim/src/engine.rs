//! The `Engine` context object and its tick protocol.

use tracing::{debug, info};
use vg_ability::{Ability, CooldownRegistry, ProgressionTracker};
use vg_core::{AgentId, CorpseId, SimClock, SimRng, Tick};
use vg_guard::{GuardCtx, Interceptor, Outcome};
use vg_host::{DamageEvent, DamageVerdict, Host, StatusKind};
use vg_ritual::{RitualPoll, RitualTracker};
use vg_tick::{DeferredQueue, DrainReport, RelationshipMap, SnapshotCache};

use crate::{EngineConfig, EngineObserver, SavedState, SimResult, SAVE_VERSION};

/// What `begin_tick` (and, under `run_ticks`, the status callbacks) did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub tick:      Tick,
    pub drained:   DrainReport,
    /// `false` when the host had no active world and the previous snapshot
    /// is being served.
    pub fresh:     bool,
    pub rituals:   RitualPoll,
    /// Periodic status callbacks that did work (filled in by `run_ticks`).
    pub callbacks: usize,
}

/// One simulation's worth of core state.
///
/// There is exactly one engine per simulation and nothing in the core is
/// global: two engines never share a cache, queue or table.  The host is not
/// owned; it is lent to every call that needs it.
///
/// Create via [`EngineBuilder`](crate::EngineBuilder).
pub struct Engine<H: Host> {
    pub config:      EngineConfig,
    pub clock:       SimClock,
    pub relations:   RelationshipMap,
    pub cache:       SnapshotCache,
    pub queue:       DeferredQueue<H>,
    pub cooldowns:   CooldownRegistry,
    pub progression: ProgressionTracker,
    pub interceptor: Interceptor,
    pub rituals:     RitualTracker,
    pub rng:         SimRng,
}

impl<H: Host + 'static> Engine<H> {
    /// The tick the engine last synced to.
    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    // ── Tick protocol ─────────────────────────────────────────────────────

    /// Tick-start work, in order: apply everything queued last tick, rebuild
    /// the snapshot, then resolve rituals.  Must be called once per tick
    /// before any other callback.
    pub fn begin_tick(&mut self, host: &mut H, now: Tick) -> TickReport {
        self.clock.sync(now);
        self.interceptor.begin_tick();

        let drained = self.queue.drain_and_apply(host);
        let progression = &self.progression;
        let fresh = self.cache.rebuild(&*host, &self.relations, |a| progression.tier(a), now);
        let rituals = self.rituals.poll(&*host, &self.cache, &mut self.queue, now);

        TickReport { tick: now, drained, fresh, rituals, callbacks: 0 }
    }

    /// Periodic callback of a status instance of `kind` on `agent`.
    ///
    /// Coarse callbacks only do work on their interval tick (phase-shifted per
    /// agent).  Returns `true` if work was done.  Only reads the host.
    pub fn tick_status(&mut self, host: &H, agent: AgentId, kind: StatusKind) -> bool {
        let now = self.now();
        match kind {
            StatusKind::Progression => {
                if !now.is_interval_for(agent, self.config.progression.interval) {
                    return false;
                }
                self.progression.evaluate(agent, host, &self.cache, &mut self.queue);
                true
            }
            StatusKind::Guardian => {
                if !now.is_interval_for(agent, self.config.guard.recheck_interval) {
                    return false;
                }
                let tier = self.progression.tier(agent);
                vg_guard::revalidate_duty(
                    &mut self.relations,
                    &mut self.queue,
                    host,
                    &self.config.guard,
                    agent,
                    tier,
                );
                true
            }
            _ => false,
        }
    }

    /// Pre-commit damage hook.
    pub fn intercept(&mut self, host: &mut H, event: &DamageEvent) -> DamageVerdict {
        self.resolve_damage(host, event).verdict(event.amount)
    }

    /// Pre-commit damage hook reporting which branch was taken.
    pub fn resolve_damage(&mut self, host: &mut H, event: &DamageEvent) -> Outcome {
        let now = self.now();
        let mut ctx = GuardCtx {
            host,
            cache:       &self.cache,
            cooldowns:   &mut self.cooldowns,
            progression: &self.progression,
            queue:       &mut self.queue,
            rng:         &mut self.rng,
            now,
        };
        self.interceptor.resolve(&mut ctx, event)
    }

    /// Post-commit damage hook.  Returns the number of responders queued.
    ///
    /// Hosts normally call this after [`Engine::intercept`] for the same hit.
    /// Either order yields one response per subordinate: a block resolved
    /// after this hook has already run only adds the spent guardian.
    pub fn after_damage(&mut self, host: &mut H, event: &DamageEvent) -> usize {
        let now = self.now();
        let mut ctx = GuardCtx {
            host,
            cache:       &self.cache,
            cooldowns:   &mut self.cooldowns,
            progression: &self.progression,
            queue:       &mut self.queue,
            rng:         &mut self.rng,
            now,
        };
        self.interceptor.after_damage(&mut ctx, event)
    }

    /// Death notification.  Opens a resurrection window when the fallen
    /// agent held authority.
    pub fn on_agent_died(&mut self, host: &H, agent: AgentId) {
        let authority = self.cache.is_authority(agent)
            || host.view(agent).is_some_and(|v| v.authority);
        if authority {
            self.rituals.open_window(agent, self.now());
        } else {
            debug!(agent = %agent, "death ignored; not an authority");
        }
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Set (or with `None`, clear) the overseer of `agent`.  A newly overseen
    /// agent starts tracking progression and gets the progression status
    /// next tick.  Clearing queues the status detach and keeps severity.
    /// Returns the previous overseer.
    pub fn assign_overseer(
        &mut self,
        host:     &H,
        agent:    AgentId,
        overseer: Option<AgentId>,
    ) -> Option<AgentId> {
        let previous = self.relations.assign_overseer(agent, overseer);
        match self.relations.overseer_of(agent) {
            Some(o) => {
                self.progression.track(agent);
                if !host.has_status(agent, StatusKind::Progression) {
                    self.queue.attach(agent, StatusKind::Progression);
                }
                info!(agent = %agent, overseer = %o, "overseer assigned");
            }
            None if previous.is_some() => {
                self.queue.detach(agent, StatusKind::Progression);
                self.progression.reseed(agent);
                info!(agent = %agent, "overseer cleared");
            }
            None => {}
        }
        previous
    }

    /// Raise `agent`'s severity.  Returns the new severity.
    pub fn add_progress(&mut self, agent: AgentId, amount: f32) -> SimResult<f32> {
        Ok(self.progression.add_progress(agent, amount)?)
    }

    /// Start a cooldown of `base` ticks (before the global multiplier).
    pub fn set_cooldown(&mut self, agent: AgentId, ability: Ability, base: u64) -> Tick {
        let now = self.now();
        self.cooldowns.set(agent, ability, base, now)
    }

    /// String form of [`set_cooldown`](Self::set_cooldown).  Unknown names
    /// change nothing and return `false`.
    pub fn set_cooldown_named(&mut self, agent: AgentId, ability: &str, base: u64) -> bool {
        let now = self.now();
        self.cooldowns.set_named(agent, ability, base, now)
    }

    /// Put `guardian` on duty for `ward`.  Returns its previous ward.
    pub fn assign_guardian(
        &mut self,
        host:     &H,
        guardian: AgentId,
        ward:     AgentId,
    ) -> SimResult<Option<AgentId>> {
        let tier = self.progression.tier(guardian);
        Ok(vg_guard::assign_guardian(
            &mut self.relations,
            &mut self.queue,
            host,
            &self.config.guard,
            guardian,
            ward,
            tier,
        )?)
    }

    pub fn release_guardian(&mut self, guardian: AgentId) -> Option<AgentId> {
        vg_guard::release_guardian(&mut self.relations, &mut self.queue, guardian)
    }

    /// Offer a corpse toward `fallen`'s resurrection.  Returns the new score.
    pub fn deliver_corpse(&mut self, host: &H, fallen: AgentId, corpse: CorpseId) -> SimResult<u32> {
        let now = self.now();
        Ok(self.rituals.deliver_corpse(fallen, corpse, host, &mut self.queue, now)?)
    }

    /// Start the resurrection ritual.  Returns the completion tick.
    pub fn begin_ritual(&mut self, host: &H, fallen: AgentId, performer: AgentId) -> SimResult<Tick> {
        let now = self.now();
        let tier = self.progression.tier(performer);
        Ok(self.rituals.begin_ritual(fallen, performer, tier, host, &mut self.queue, now)?)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn tier(&self, agent: AgentId) -> u8 {
        self.progression.tier(agent)
    }

    pub fn severity(&self, agent: AgentId) -> f32 {
        self.progression.severity(agent)
    }

    pub fn is_ready(&self, agent: AgentId, ability: Ability) -> bool {
        self.cooldowns.is_ready(agent, ability, self.now())
    }

    pub fn remaining(&self, agent: AgentId, ability: Ability) -> u64 {
        self.cooldowns.remaining(agent, ability, self.now())
    }

    pub fn can_ritual(&self, fallen: AgentId) -> bool {
        self.rituals.can_ritual(fallen, self.now())
    }

    pub fn ritual_score(&self, fallen: AgentId) -> u32 {
        self.rituals.ritual_score(fallen)
    }

    /// Ability power scaled by the number of high-tier followers.
    pub fn power(&self, base: f32, bonus: f32) -> f32 {
        self.cache.power(base, bonus, self.config.power_multiplier)
    }

    // ── Driver ────────────────────────────────────────────────────────────

    /// Drive `n` ticks on the engine's own clock: `begin_tick`, then the
    /// periodic callback of every governed status on every live agent.
    ///
    /// Hosts with their own master loop call the hooks directly instead.
    pub fn run_ticks<O: EngineObserver>(
        &mut self,
        host:     &mut H,
        n:        u64,
        observer: &mut O,
    ) -> SimResult<()> {
        for _ in 0..n {
            let now = self.now();
            observer.on_tick_start(now);
            let mut report = self.begin_tick(host, now);

            // An unavailable world just means no callbacks this tick.
            let live = host.live_agents().unwrap_or_default();
            for agent in live {
                for kind in StatusKind::ALL {
                    if host.has_status(agent, kind) && self.tick_status(&*host, agent, kind) {
                        report.callbacks += 1;
                    }
                }
            }

            observer.on_tick_end(now, &report);
            self.clock.advance();
        }
        observer.on_run_end(self.now());
        Ok(())
    }

    // ── Persistence ───────────────────────────────────────────────────────

    /// Copy the persisted tables out.
    pub fn save(&self) -> SavedState {
        SavedState {
            version:    SAVE_VERSION,
            tick:       self.now(),
            relations:  self.relations.clone(),
            cooldowns:  self.cooldowns.tables().clone(),
            severities: self.progression.severities().clone(),
            windows:    self.rituals.windows().clone(),
            rituals:    self.rituals.rituals().clone(),
        }
    }
}
