//! `vg-host` — the seam between the simulation core and the host world.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`host`]    | `Host` trait — queries and commands the core consumes             |
//! | [`view`]    | `AgentView`, `StatusKind`                                         |
//! | [`event`]   | `DamageEvent`, `DamageVerdict`, `Order`, `Feedback`, `Notification` |
//! | [`essence`] | `CorpseInfo` and the reference corpse essence table               |
//! | [`memory`]  | `MemoryHost` — Structure-of-Arrays in-memory world                |
//! | [`error`]   | `HostError`, `HostResult<T>`                                      |
//!
//! # Design notes
//!
//! The host owns agents, positions and status collections and drives the
//! master tick loop.  The core never holds references into host state between
//! calls: every query is by `AgentId`, and an id whose agent is gone reads as
//! `None`/`false` rather than as an error.
//!
//! Host *commands* (attach, detach, orders, revive) are only invoked by the
//! deferred queue at the start of a tick, never from inside a callback the
//! host is iterating.  The one exception is [`Host::apply_damage`], the
//! secondary damage call made by the interception chain, which the host must
//! route around that chain.

pub mod error;
pub mod essence;
pub mod event;
pub mod host;
pub mod memory;
pub mod view;

#[cfg(test)]
mod tests;

pub use error::{HostError, HostResult};
pub use essence::{standard_essence, CorpseInfo};
pub use event::{DamageClass, DamageEvent, DamageVerdict, Feedback, Notification, Order};
pub use host::Host;
pub use memory::{MemoryHost, MemoryHostBuilder};
pub use view::{AgentView, StatusKind};
