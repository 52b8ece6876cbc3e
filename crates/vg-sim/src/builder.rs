//! Fluent builder for constructing an [`Engine`].

use vg_ability::{CooldownRegistry, ProgressionTracker};
use vg_core::{SimClock, SimRng, Tick};
use vg_guard::Interceptor;
use vg_host::Host;
use vg_ritual::RitualTracker;
use vg_tick::{DeferredQueue, SnapshotCache};

use crate::{Engine, EngineConfig, SavedState, SimResult};

/// Fluent builder for [`Engine<H>`].
///
/// | Method             | Default                                 |
/// |--------------------|-----------------------------------------|
/// | `.start_tick(t)`   | `Tick::ZERO`, or the saved tick         |
/// | `.restore(state)`  | empty tables                            |
///
/// # Example
///
/// ```rust,ignore
/// let state = SavedState::read("save.json")?;
/// let mut engine = EngineBuilder::new(EngineConfig::load("vigil.toml")?)
///     .restore(state)
///     .build::<MyWorld>()?;
/// ```
pub struct EngineBuilder {
    config: EngineConfig,
    start:  Option<Tick>,
    saved:  Option<SavedState>,
}

impl EngineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self { config, start: None, saved: None }
    }

    /// Tick the clock starts at.  Overrides the tick stored in a save.
    pub fn start_tick(mut self, tick: Tick) -> Self {
        self.start = Some(tick);
        self
    }

    /// Seed the tables from a save.  The snapshot cache starts empty and the
    /// first `begin_tick` rebuilds it; last-observed tiers are re-seeded by
    /// the first progression evaluation.
    pub fn restore(mut self, state: SavedState) -> Self {
        self.saved = Some(state);
        self
    }

    /// Validate the configuration and assemble the engine.
    pub fn build<H: Host + 'static>(self) -> SimResult<Engine<H>> {
        self.config.validate()?;
        let config = self.config;
        let saved = self.saved.unwrap_or_default();
        let start = self.start.unwrap_or(saved.tick);

        Ok(Engine {
            clock:       SimClock::new(start),
            relations:   saved.relations,
            cache:       SnapshotCache::new(),
            queue:       DeferredQueue::new(),
            cooldowns:   CooldownRegistry::from_tables(config.cooldown.clone(), saved.cooldowns),
            progression: ProgressionTracker::from_severities(config.progression.clone(), saved.severities),
            interceptor: Interceptor::new(config.guard.clone()),
            rituals:     RitualTracker::from_parts(config.ritual.clone(), saved.windows, saved.rituals),
            rng:         SimRng::new(config.seed),
            config,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

