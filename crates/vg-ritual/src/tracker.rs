//! `RitualTracker` — open windows, essence scores and running rituals.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};
use vg_core::{AgentId, CorpseId, Tick};
use vg_host::{Host, Notification, Order, StatusKind};
use vg_tick::{DeferredQueue, SnapshotCache};

use crate::{ResurrectionWindow, RitualConfig, RitualError, RitualInProgress, RitualResult};

/// What one [`RitualTracker::poll`] resolved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RitualPoll {
    /// `(fallen, performer)` pairs whose ritual finished this tick.
    pub completed: Vec<(AgentId, AgentId)>,
    /// Rituals abandoned because the performer, its order or the window
    /// went away.
    pub dropped:   Vec<AgentId>,
    /// Windows discarded after expiring unused.
    pub purged:    Vec<AgentId>,
    /// Windows closed because the queued revive took effect.
    pub revived:   Vec<AgentId>,
}

impl RitualPoll {
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
            && self.dropped.is_empty()
            && self.purged.is_empty()
            && self.revived.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct RitualTracker {
    config:   RitualConfig,
    windows:  BTreeMap<AgentId, ResurrectionWindow>,
    rituals:  BTreeMap<AgentId, RitualInProgress>,
    /// Corpses credited since the last poll.  Their destruction is still
    /// queued, so the host keeps reporting their essence until the drain.
    pending:  BTreeSet<CorpseId>,
}

impl RitualTracker {
    pub fn new(config: RitualConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Rebuild from persisted tables.  Rituals without a window are dropped.
    pub fn from_parts(
        config:  RitualConfig,
        windows: BTreeMap<AgentId, ResurrectionWindow>,
        mut rituals: BTreeMap<AgentId, RitualInProgress>,
    ) -> Self {
        rituals.retain(|fallen, _| windows.contains_key(fallen));
        Self { config, windows, rituals, pending: BTreeSet::new() }
    }

    pub fn config(&self) -> &RitualConfig {
        &self.config
    }

    pub fn windows(&self) -> &BTreeMap<AgentId, ResurrectionWindow> {
        &self.windows
    }

    pub fn rituals(&self) -> &BTreeMap<AgentId, RitualInProgress> {
        &self.rituals
    }

    pub fn window(&self, fallen: AgentId) -> Option<&ResurrectionWindow> {
        self.windows.get(&fallen)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Essence delivered so far, 0 without a window.
    pub fn ritual_score(&self, fallen: AgentId) -> u32 {
        self.windows.get(&fallen).map_or(0, |w| w.score)
    }

    /// `true` if a window exists and has not elapsed at `now`.
    pub fn is_open(&self, fallen: AgentId, now: Tick) -> bool {
        self.windows
            .get(&fallen)
            .is_some_and(|w| w.is_open(now, self.config.window_ticks))
    }

    /// `true` when the ritual may be offered: the window is open, the
    /// score has reached the threshold and no revive is pending.
    pub fn can_ritual(&self, fallen: AgentId, now: Tick) -> bool {
        self.is_open(fallen, now)
            && self.ritual_score(fallen) >= self.config.threshold
            && !self.windows.get(&fallen).is_some_and(|w| w.reviving)
    }

    fn open_window_mut(&mut self, fallen: AgentId, now: Tick) -> RitualResult<&mut ResurrectionWindow> {
        let length = self.config.window_ticks;
        let window = self.windows.get_mut(&fallen).ok_or(RitualError::NoWindow(fallen))?;
        if !window.is_open(now, length) {
            return Err(RitualError::Expired(fallen));
        }
        Ok(window)
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Open (or restart) the window for an authority that just died.
    pub fn open_window(&mut self, fallen: AgentId, now: Tick) {
        self.rituals.remove(&fallen);
        self.windows.insert(fallen, ResurrectionWindow::new(now));
        info!(fallen = %fallen, tick = %now, "resurrection window opened");
    }

    /// Offer a corpse.  Its essence is added to the score and the corpse is
    /// destroyed at the next tick start.  A corpse credited to any window
    /// since the last poll is refused.  Returns the new score.
    pub fn deliver_corpse<H: Host + 'static>(
        &mut self,
        fallen: AgentId,
        corpse: CorpseId,
        host:   &H,
        queue:  &mut DeferredQueue<H>,
        now:    Tick,
    ) -> RitualResult<u32> {
        let threshold = self.config.threshold;
        if self.pending.contains(&corpse) {
            return Err(RitualError::AlreadyConsumed(corpse));
        }
        let window = self.open_window_mut(fallen, now)?;
        if window.consumed.contains(&corpse) {
            return Err(RitualError::AlreadyConsumed(corpse));
        }
        let essence = host.corpse_essence(corpse).ok_or(RitualError::CorpseGone(corpse))?;

        let before = window.score;
        window.score = before.saturating_add(essence);
        window.consumed.insert(corpse);
        let score = window.score;
        self.pending.insert(corpse);

        queue.enqueue_action("consume corpse", move |h: &mut H, _| h.destroy_corpse(corpse));
        if before < threshold && score >= threshold {
            queue.enqueue_action("ritual ready notification", move |h: &mut H, _| {
                h.notify(Notification::RitualReady { fallen });
                Ok(())
            });
            info!(fallen = %fallen, score, "resurrection ritual available");
        }
        debug!(fallen = %fallen, corpse = %corpse, essence, score, "corpse delivered");
        Ok(score)
    }

    /// Start the ritual.  Queues the performer's order and returns the tick
    /// at which it completes.
    pub fn begin_ritual<H: Host + 'static>(
        &mut self,
        fallen:    AgentId,
        performer: AgentId,
        tier:      u8,
        host:      &H,
        queue:     &mut DeferredQueue<H>,
        now:       Tick,
    ) -> RitualResult<Tick> {
        let threshold = self.config.threshold;
        let score = self.open_window_mut(fallen, now)?.score;
        if score < threshold {
            return Err(RitualError::NotReady { fallen, score, threshold });
        }
        let reviving = self.windows.get(&fallen).is_some_and(|w| w.reviving);
        if reviving || self.rituals.contains_key(&fallen) {
            return Err(RitualError::InProgress(fallen));
        }
        let fit = performer != fallen && host.view(performer).is_some_and(|v| v.can_act());
        if !fit {
            return Err(RitualError::PerformerUnfit(performer));
        }
        let required = self.config.min_performer_tier;
        if tier < required {
            return Err(RitualError::TierTooLow { performer, tier, required });
        }

        let until = now.offset(self.config.duration_ticks);
        self.rituals.insert(fallen, RitualInProgress { performer, started: now, until });
        queue.enqueue_action("begin ritual", move |h: &mut H, _| {
            h.issue_order(performer, Order::PerformRitual { fallen, until })
        });
        info!(fallen = %fallen, performer = %performer, until = %until, "ritual begun");
        Ok(until)
    }

    /// Tick-start housekeeping: settle last tick's revives, finish rituals
    /// whose time is up, drop the ones whose performer wandered off or died,
    /// and purge unused windows that have expired.
    ///
    /// Must run after the deferred queue has been drained, so an order
    /// queued by [`begin_ritual`](Self::begin_ritual) is already visible on
    /// the host.
    pub fn poll<H: Host + 'static>(
        &mut self,
        host:  &H,
        cache: &SnapshotCache,
        queue: &mut DeferredQueue<H>,
        now:   Tick,
    ) -> RitualPoll {
        let mut poll = RitualPoll::default();
        let length = self.config.window_ticks;
        // The drain that ran before this poll destroyed every pending corpse.
        self.pending.clear();

        self.windows.retain(|&fallen, w| {
            if !w.reviving {
                return true;
            }
            if host.view(fallen).is_some_and(|v| v.alive) {
                info!(fallen = %fallen, "revival confirmed; window closed");
                poll.revived.push(fallen);
                return false;
            }
            warn!(fallen = %fallen, score = w.score, "revive did not take; window kept");
            w.reviving = false;
            true
        });

        let fallen_ids: Vec<AgentId> = self.rituals.keys().copied().collect();
        for fallen in fallen_ids {
            let Some(ritual) = self.rituals.get(&fallen).cloned() else { continue };
            let on_task = host.view(ritual.performer).is_some_and(|v| v.alive)
                && matches!(
                    host.current_order(ritual.performer),
                    Some(Order::PerformRitual { fallen: f, .. }) if f == fallen
                );
            let open = self.windows.get(&fallen).is_some_and(|w| w.is_open(now, length));

            if !on_task || !open {
                self.rituals.remove(&fallen);
                info!(fallen = %fallen, performer = %ritual.performer, on_task, open, "ritual abandoned");
                poll.dropped.push(fallen);
                continue;
            }
            if now < ritual.until {
                continue;
            }

            self.rituals.remove(&fallen);
            if let Some(window) = self.windows.get_mut(&fallen) {
                window.reviving = true;
            }
            queue_completion(queue, cache, fallen, ritual.performer);
            info!(fallen = %fallen, performer = %ritual.performer, "ritual complete");
            poll.completed.push((fallen, ritual.performer));
        }

        let rituals = &self.rituals;
        self.windows.retain(|&fallen, w| {
            let keep = w.is_open(now, length) || w.reviving || rituals.contains_key(&fallen);
            if !keep {
                debug!(fallen = %fallen, score = w.score, "resurrection window expired");
                poll.purged.push(fallen);
            }
            keep
        });
        poll
    }
}

/// Revive `fallen`, then mark the revived agent, the performer and every
/// bonded subordinate.  The statuses are chained into the following batch so
/// they attach to a living agent.
fn queue_completion<H: Host + 'static>(
    queue:     &mut DeferredQueue<H>,
    cache:     &SnapshotCache,
    fallen:    AgentId,
    performer: AgentId,
) {
    let followers = cache.subordinates_of(fallen).to_vec();
    queue.enqueue_action("complete ritual", move |h: &mut H, q: &mut DeferredQueue<H>| {
        h.revive(fallen)?;
        q.attach(fallen, StatusKind::PostRevivalWeakness);
        q.attach(performer, StatusKind::RitualExhaustion);
        for sub in followers {
            if h.has_status(sub, StatusKind::Bonded) {
                q.attach(sub, StatusKind::Rallied);
            }
        }
        h.notify(Notification::RitualComplete { fallen, performer });
        Ok(())
    });
}
