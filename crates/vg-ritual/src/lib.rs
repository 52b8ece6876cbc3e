//! `vg-ritual` — bringing a fallen authority back.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`window`]  | `ResurrectionWindow`, `RitualInProgress`, `RitualConfig`       |
//! | [`tracker`] | `RitualTracker` — delivery, offer, begin and completion        |
//! | [`error`]   | `RitualError`, `RitualResult<T>`                               |
//!
//! # Lifecycle
//!
//! ```text
//! authority dies ──▶ window open (score 0)
//!        │  deliver_corpse × n     (score += essence, corpse consumed)
//!        ▼
//! score ≥ threshold ──▶ can_ritual ──▶ begin_ritual (performer ordered)
//!        │                                   │
//!   window elapses                     duration elapses
//!        ▼                                   ▼
//!   purged silently              poll re-validates, then completes:
//!                                revive + weakness + exhaustion + rally
//! ```
//!
//! The tracker stores ids only.  Every check that matters (performer still
//! alive, still on the ritual, window still open) is repeated at completion
//! time against the host.

pub mod error;
pub mod tracker;
pub mod window;


pub use error::{RitualError, RitualResult};
pub use tracker::{RitualPoll, RitualTracker};
pub use window::{ResurrectionWindow, RitualConfig, RitualInProgress};
