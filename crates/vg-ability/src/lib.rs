//! `vg-ability` — per-agent ability state: cooldowns and progression tiers.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ability`]     | `Ability` — closed set of cooldown channels                |
//! | [`cooldown`]    | `CooldownRegistry`, `CooldownConfig`                       |
//! | [`tier`]        | tier thresholds, `tier_for`, `tier_name`                   |
//! | [`progression`] | `ProgressionTracker`, `ProgressionConfig`                  |
//! | [`error`]       | `AbilityError`, `AbilityResult<T>`                         |
//!
//! # Design notes
//!
//! Both registries are plain tables keyed by `AgentId`.  They never call the
//! host on their own: the progression tracker reads the overseer from the
//! tick's [`SnapshotCache`](vg_tick::SnapshotCache) and positions from an
//! [`AgentView`](vg_host::AgentView), and anything user-visible it produces
//! goes through the [`DeferredQueue`](vg_tick::DeferredQueue).

pub mod ability;
pub mod cooldown;
pub mod error;
pub mod progression;
pub mod tier;

#[cfg(test)]
mod tests;

pub use ability::Ability;
pub use cooldown::{CooldownConfig, CooldownRegistry, CooldownTables};
pub use error::{AbilityError, AbilityResult};
pub use progression::{ProgressionConfig, ProgressionTracker};
pub use tier::{tier_for, tier_name, TIER_THRESHOLDS};
