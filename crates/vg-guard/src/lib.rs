//! `vg-guard` — the interception & retaliation chain.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`config`]      | `GuardConfig` — radii, tier gate, redirect and deflect knobs  |
//! | [`context`]     | `GuardCtx<'a, H>` — borrowed engine state for one damage event |
//! | [`intercept`]   | `Interceptor` — the pre-commit damage hook state machine      |
//! | [`retaliation`] | dispatch of protective responses to bonded subordinates       |
//! | [`cover`]       | covering-point search for guardians who stay back             |
//! | [`roster`]      | guard-duty assignment and periodic revalidation               |
//! | [`error`]       | `GuardError`, `GuardResult<T>`                                |
//!
//! # State machine
//!
//! ```text
//! Incoming ──(not an authority / dead / amount ≤ 0 / not violence)──▶ Proceed
//!    │
//!    ├─(ranged, deflect roll succeeds)──▶ Suppressed + counter-hit queued
//!    ▼
//! GuardianSearch ──(none eligible)──▶ Unblocked ─┐
//!    │                                           │
//!    ▼                                           ▼
//! Blocked ──(cooldown, redirect, feedback)──▶ RetaliationDispatch ──▶ Done
//! ```
//!
//! Every step runs against the tick's `SnapshotCache`; host mutations other
//! than the redirected damage and feedback effects go through the
//! `DeferredQueue`.  An internal error anywhere degrades to "proceed with the
//! original amount, no retaliation" and is only logged.

pub mod config;
pub mod context;
pub mod cover;
pub mod error;
pub mod intercept;
pub mod retaliation;
pub mod roster;


pub use config::GuardConfig;
pub use context::GuardCtx;
pub use cover::find_cover_point;
pub use error::{GuardError, GuardResult};
pub use intercept::{Interceptor, Outcome};
pub use retaliation::Dispatch;
pub use roster::{assign_guardian, release_guardian, revalidate_duty};
