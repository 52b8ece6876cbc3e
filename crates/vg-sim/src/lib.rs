//! `vg-sim` — the `Engine` context object that ties the core together.
//!
//! # Tick protocol
//!
//! ```text
//! host tick N:
//!   Engine::begin_tick(host, N)
//!     ① DeferredQueue::drain_and_apply   — everything queued during N-1
//!     ② SnapshotCache::rebuild           — one pass over live agents
//!     ③ RitualTracker::poll              — complete / drop / purge
//!   host iterates its agents:
//!     Engine::tick_status(host, agent, kind)   — periodic status callbacks
//!     Engine::intercept(host, event)           — pre-commit damage hook
//!     Engine::after_damage(host, event)        — post-commit damage hook
//!     Engine::on_agent_died(host, agent)
//! ```
//!
//! Callbacks take the host by shared reference wherever they only read it
//! and queue their mutations.  The damage hooks take `&mut H` because a
//! blocked hit is partly redirected onto the guardian immediately.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`engine`]   | `Engine<H>`, `TickReport`                                |
//! | [`builder`]  | `EngineBuilder` — fresh or restored engines              |
//! | [`config`]   | `EngineConfig` — every tunable, loadable from TOML       |
//! | [`persist`]  | `SavedState` — flat agent-keyed tables as JSON           |
//! | [`observer`] | `EngineObserver` hooks for `run_ticks`                   |
//! | [`error`]    | `SimError`, `SimResult<T>`                               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vg_sim::{EngineBuilder, EngineConfig, NoopObserver};
//!
//! let config = EngineConfig::load("vigil.toml")?;
//! let mut engine = EngineBuilder::new(config).build::<MyWorld>()?;
//! engine.run_ticks(&mut world, 10_000, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod observer;
pub mod persist;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use config::EngineConfig;
pub use engine::{Engine, TickReport};
pub use error::{SimError, SimResult};
pub use observer::{EngineObserver, NoopObserver};
pub use persist::{SavedState, SAVE_VERSION};
