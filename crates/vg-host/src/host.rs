//! The `Host` trait — everything the core consumes from the world simulator.

use vg_core::{AgentId, CorpseId, Position};

use crate::{AgentView, Feedback, HostResult, Notification, Order, StatusKind};

/// The host world simulator, as seen by the core.
///
/// # Queries
///
/// Queries take `&self` and are safe to call from any callback.  Ids whose
/// agent no longer exists answer `None`/`false`.
///
/// # Commands
///
/// Commands take `&mut self`.  The core only issues them while draining the
/// deferred queue at the start of a tick, with one exception:
/// [`apply_damage`](Self::apply_damage), which the interception chain calls
/// synchronously to redirect part of a blocked hit onto the guardian.
///
/// # Example
///
/// ```rust,ignore
/// impl Host for MyWorld {
///     fn live_agents(&self) -> HostResult<Vec<AgentId>> {
///         let map = self.current_map.as_ref().ok_or(HostError::Unavailable)?;
///         Ok(map.pawns.iter().map(|p| p.id).collect())
///     }
///     // ...
/// }
/// ```
pub trait Host {
    // ── Queries ───────────────────────────────────────────────────────────

    /// Every agent currently present in the active world, in a stable order.
    ///
    /// Returns [`HostError::Unavailable`](crate::HostError::Unavailable) when
    /// there is no active world.
    fn live_agents(&self) -> HostResult<Vec<AgentId>>;

    /// Facts about one agent, or `None` if it is gone.
    fn view(&self, agent: AgentId) -> Option<AgentView>;

    /// `true` if `agent` currently carries a status of `kind`.
    fn has_status(&self, agent: AgentId, kind: StatusKind) -> bool;

    /// `true` if `attacker` is an enemy of `victim` or in an aggressive
    /// mental state.
    fn is_hostile(&self, attacker: AgentId, victim: AgentId) -> bool;

    /// The order `agent` is currently executing, if any.
    fn current_order(&self, agent: AgentId) -> Option<Order>;

    /// Essence value of a corpse, or `None` if it is gone.
    fn corpse_essence(&self, corpse: CorpseId) -> Option<u32>;

    /// `true` if an agent could stand at `pos`.
    fn is_standable(&self, _pos: Position) -> bool {
        true
    }

    // ── Commands ──────────────────────────────────────────────────────────

    fn attach_status(&mut self, agent: AgentId, kind: StatusKind) -> HostResult<()>;

    fn detach_status(&mut self, agent: AgentId, kind: StatusKind) -> HostResult<()>;

    /// Apply damage outside the interception chain.
    fn apply_damage(
        &mut self,
        victim:     AgentId,
        amount:     f32,
        instigator: Option<AgentId>,
    ) -> HostResult<()>;

    /// Force the agent out of passive mode (draft it).
    fn set_drafted(&mut self, agent: AgentId) -> HostResult<()>;

    /// Interrupt the agent's current job and start `order`.
    fn issue_order(&mut self, agent: AgentId, order: Order) -> HostResult<()>;

    /// Bring a dead agent back to life.
    fn revive(&mut self, agent: AgentId) -> HostResult<()>;

    /// Destroy a corpse that has been consumed.
    fn destroy_corpse(&mut self, corpse: CorpseId) -> HostResult<()>;

    /// Play a visual/audio effect.  Default: ignored.
    fn emit(&mut self, _feedback: Feedback) {}

    /// Surface an informational message.  Default: ignored.
    fn notify(&mut self, _note: Notification) {}
}
