//! `vg-core` — foundational types for the `vigil` simulation core.
//!
//! This crate is a dependency of every other `vg-*` crate.  It intentionally
//! has no `vg-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).  Failure modes belong to the crates that have them.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `CorpseId`                                 |
//! | [`geo`]         | `Position`, planar distance and radius checks         |
//! | [`time`]        | `Tick`, `SimClock`, tick-per-day constants            |
//! | [`rng`]         | `SimRng` (engine-level, seeded)                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `vg-sim` persistence.                          |

pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::Position;
pub use ids::{AgentId, CorpseId};
pub use rng::SimRng;
pub use time::{SimClock, Tick, TICKS_PER_DAY, TICKS_PER_HOUR};
