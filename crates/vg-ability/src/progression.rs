//! `ProgressionTracker` — per-agent severity and tier-up detection.
//!
//! Severity only ever grows.  It grows in two ways: explicitly through
//! [`ProgressionTracker::add_progress`], or through the coarse periodic
//! [`ProgressionTracker::evaluate`] while the agent stays near its overseer.
//!
//! The last observed tier is kept only to spot upward crossings.  It is not
//! persisted, so the first evaluation after a load re-seeds it silently
//! instead of announcing every tier again.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use tracing::{debug, info};
use vg_core::AgentId;
use vg_host::{Host, Notification, StatusKind};
use vg_tick::{DeferredQueue, SnapshotCache};

use crate::{tier_for, tier_name, AbilityError, AbilityResult, TIER_THRESHOLDS};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionConfig {
    /// Lower bounds of tiers 1–4.  Must be ascending.
    pub thresholds:       [f32; 4],
    /// Ticks between periodic evaluations of one agent.
    pub interval:         u64,
    /// Maximum distance to the overseer for growth.
    pub radius:           f32,
    /// Severity gained per evaluation before modifiers.
    pub base_rate:        f32,
    /// Global scale on `base_rate`.
    pub growth_multiplier: f32,
    /// Growth factor while the agent is bonded.
    pub bonded_factor:    f32,
    /// Morale above this earns `morale_factor`.
    pub morale_threshold: f32,
    pub morale_factor:    f32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            thresholds:        TIER_THRESHOLDS,
            interval:          251,
            radius:            15.0,
            base_rate:         0.000_08,
            growth_multiplier: 1.0,
            bonded_factor:     2.0,
            morale_threshold:  0.6,
            morale_factor:     1.2,
        }
    }
}

#[derive(Debug, Default)]
pub struct ProgressionTracker {
    config:     ProgressionConfig,
    severities: BTreeMap<AgentId, f32>,
    last_tier:  FxHashMap<AgentId, u8>,
}

impl ProgressionTracker {
    pub fn new(config: ProgressionConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Rebuild from persisted severities.  Values are clamped into `[0, 1]`.
    pub fn from_severities(config: ProgressionConfig, severities: BTreeMap<AgentId, f32>) -> Self {
        let severities = severities
            .into_iter()
            .map(|(agent, s)| (agent, if s.is_nan() { 0.0 } else { s.clamp(0.0, 1.0) }))
            .collect();
        Self { config, severities, last_tier: FxHashMap::default() }
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn severities(&self) -> &BTreeMap<AgentId, f32> {
        &self.severities
    }

    /// Current severity, 0 for untracked agents.
    pub fn severity(&self, agent: AgentId) -> f32 {
        self.severities.get(&agent).copied().unwrap_or(0.0)
    }

    /// Current tier, 0 for untracked agents.
    pub fn tier(&self, agent: AgentId) -> u8 {
        tier_for(self.severity(agent), &self.config.thresholds)
    }

    /// `true` once the agent has a severity entry.
    pub fn is_tracked(&self, agent: AgentId) -> bool {
        self.severities.contains_key(&agent)
    }

    /// Start tracking `agent` at severity 0.  No-op if already tracked.
    pub fn track(&mut self, agent: AgentId) {
        self.severities.entry(agent).or_insert(0.0);
    }

    /// Drop the last seen tier but keep severity.  The next evaluation seeds
    /// again without announcing a tier-up.
    pub fn reseed(&mut self, agent: AgentId) {
        self.last_tier.remove(&agent);
    }

    /// Stop tracking `agent` entirely.
    pub fn forget(&mut self, agent: AgentId) {
        self.severities.remove(&agent);
        self.last_tier.remove(&agent);
    }

    /// Raise severity by `amount`, capped at 1.0.  Returns the new severity.
    pub fn add_progress(&mut self, agent: AgentId, amount: f32) -> AbilityResult<f32> {
        if !(amount > 0.0) {
            return Err(AbilityError::NonPositiveProgress { agent, amount });
        }
        let s = self.severities.entry(agent).or_insert(0.0);
        *s = (*s + amount).min(1.0);
        Ok(*s)
    }

    /// Growth this evaluation would apply, or 0 when the agent itself is dead
    /// or the overseer is absent, dead or out of range.
    fn growth<H: Host>(&self, agent: AgentId, host: &H, cache: &SnapshotCache) -> f32 {
        let Some(overseer) = cache.overseer_of(agent) else { return 0.0 };
        let (Some(me), Some(boss)) = (host.view(agent), host.view(overseer)) else {
            return 0.0;
        };
        if !me.alive || !boss.alive || !me.position.within(boss.position, self.config.radius) {
            return 0.0;
        }

        let mut rate = self.config.base_rate * self.config.growth_multiplier;
        if host.has_status(agent, StatusKind::Bonded) {
            rate *= self.config.bonded_factor;
        }
        if me.morale.is_some_and(|m| m > self.config.morale_threshold) {
            rate *= self.config.morale_factor;
        }
        rate
    }

    /// The periodic callback: grow severity if eligible, then detect an
    /// upward tier crossing.
    ///
    /// A crossing after the first evaluation queues exactly one
    /// [`Notification::TierUp`].  Returns the tier after evaluation.
    pub fn evaluate<H: Host + 'static>(
        &mut self,
        agent: AgentId,
        host:  &H,
        cache: &SnapshotCache,
        queue: &mut DeferredQueue<H>,
    ) -> u8 {
        let rate = self.growth(agent, host, cache);
        let s = self.severities.entry(agent).or_insert(0.0);
        if rate > 0.0 {
            *s = (*s + rate).min(1.0);
        }
        let severity = *s;
        let tier = tier_for(severity, &self.config.thresholds);

        if let Some(last) = self.last_tier.insert(agent, tier) {
            if tier > last {
                info!(agent = %agent, tier, name = tier_name(tier), "tier up");
                queue.enqueue_action("tier-up notification", move |h: &mut H, _| {
                    h.notify(Notification::TierUp { agent, tier });
                    Ok(())
                });
            }
        } else {
            debug!(agent = %agent, tier, severity, "tier tracking seeded");
        }
        tier
    }
}
