//! `vg-tick` — the producer/consumer split that makes per-tick callbacks safe.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`relations`] | `RelationshipMap` — overseer and guard-duty assignments       |
//! | [`snapshot`]  | `SnapshotCache` — read-only population facts, rebuilt per tick |
//! | [`deferred`]  | `DeferredQueue<H>` — mutation requests applied next tick      |
//!
//! # Tick phases
//!
//! ```text
//! tick N start:
//!   ① DeferredQueue::drain_and_apply   — requests queued during tick N-1
//!   ② SnapshotCache::rebuild           — one O(agents) pass over the host
//! tick N body:
//!   status callbacks, damage events    — read the cache, enqueue mutations
//! ```
//!
//! Nothing in the tick body touches the host's collections directly, so the
//! host can keep iterating them while it calls into the core.

pub mod deferred;
pub mod relations;
pub mod snapshot;


pub use deferred::{Action, DeferredQueue, DrainReport, StatusRequest};
pub use relations::RelationshipMap;
pub use snapshot::{SnapshotCache, TIER_COUNT};
