//! Observer hooks for [`Engine::run_ticks`](crate::Engine::run_ticks).

use vg_core::Tick;

use crate::TickReport;

/// Callbacks invoked by the engine's self-driven tick loop.
///
/// Every method has a no-op default.
///
/// # Example — ritual watcher
///
/// ```rust,ignore
/// struct RitualLog;
///
/// impl EngineObserver for RitualLog {
///     fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
///         for (fallen, performer) in &report.rituals.completed {
///             println!("{tick}: {performer} raised {fallen}");
///         }
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Before `begin_tick`.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// After every status callback of the tick has run.
    /// `report.callbacks` counts the periodic callbacks that did work.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Once, after the last tick.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// An [`EngineObserver`] that ignores everything.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
