//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter owned by the host's
//! master loop.  The core mirrors it in a [`SimClock`] so cooldowns, windows
//! and dispatch markers all compare against the same value within a tick.

use std::fmt;

use crate::AgentId;

/// Ticks in one in-simulation hour.
pub const TICKS_PER_HOUR: u64 = 2_500;

/// Ticks in one in-simulation day.
pub const TICKS_PER_DAY: u64 = 60_000;

/// Mixing constant for per-agent interval offsets (golden-ratio fraction).
const INTERVAL_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0.saturating_add(n))
    }

    /// Ticks elapsed from `earlier` to `self`, or 0 if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// `true` on the ticks where `agent`'s periodic callback of period
    /// `interval` should run.
    ///
    /// Each agent gets a stable phase offset so coarse callbacks for a large
    /// population are spread across the interval instead of landing on the
    /// same tick.
    #[inline]
    pub fn is_interval_for(self, agent: AgentId, interval: u64) -> bool {
        if interval <= 1 {
            return true;
        }
        let phase = (agent.0 as u64).wrapping_mul(INTERVAL_MIX) % interval;
        (self.0 + phase) % interval == 0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The core's view of the host clock.
///
/// The host drives time; [`SimClock::sync`] records the tick the host is
/// about to process and [`SimClock::advance`] steps it when the core drives
/// itself (tests, demos).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current tick.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start: Tick) -> Self {
        Self { current_tick: start }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.offset(1);
    }

    /// Jump to the host's tick.  Going backwards is ignored.
    #[inline]
    pub fn sync(&mut self, now: Tick) {
        if now > self.current_tick {
            self.current_tick = now;
        }
    }

    /// Break elapsed time into (day, hour) components.
    pub fn day_hour(&self) -> (u64, u64) {
        let t = self.current_tick.0;
        (t / TICKS_PER_DAY, (t % TICKS_PER_DAY) / TICKS_PER_HOUR)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h) = self.day_hour();
        write!(f, "{} (day {} {:02}h)", self.current_tick, d, h)
    }
}
