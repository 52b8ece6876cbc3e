//! `DeferredQueue` — mutation requests recorded during a tick and applied at
//! the start of the next one.
//!
//! # Why this exists
//!
//! The host calls status callbacks and damage hooks while iterating its own
//! agent and status collections.  Attaching a status or starting a job from
//! inside that iteration would invalidate it.  Instead every such mutation is
//! recorded here and applied by [`DeferredQueue::drain_and_apply`] at the
//! start of the next tick, trading one tick of latency for safety.
//!
//! # Re-entrancy
//!
//! `drain_and_apply` moves the pending lists out before applying them.  An
//! action that enqueues more work while running (it receives `&mut
//! DeferredQueue`) therefore appends to the fresh lists, which are applied at
//! the *following* tick start.  A batch can never observe its own additions.

use std::fmt;

use tracing::{debug, warn};
use vg_core::AgentId;
use vg_host::{Host, HostResult, StatusKind};

/// One attach or detach request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StatusRequest {
    pub agent:  AgentId,
    pub kind:   StatusKind,
    pub attach: bool,
}

/// A queued zero-argument action.  It receives the host and the queue so it
/// can chain follow-up work into the next batch.
pub type Action<H> = Box<dyn FnOnce(&mut H, &mut DeferredQueue<H>) -> HostResult<()>>;

/// Counters from one drain, for logging and tests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub attached:       usize,
    pub detached:       usize,
    /// Requests dropped because the agent was gone/dead or already in the
    /// requested state.
    pub skipped:        usize,
    pub actions_run:    usize,
    pub actions_failed: usize,
}

/// Append-only during a tick; drained exactly once at the next tick start.
pub struct DeferredQueue<H> {
    statuses: Vec<StatusRequest>,
    actions:  Vec<(&'static str, Action<H>)>,
}

impl<H> Default for DeferredQueue<H> {
    fn default() -> Self {
        Self { statuses: Vec::new(), actions: Vec::new() }
    }
}

impl<H> fmt::Debug for DeferredQueue<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredQueue")
            .field("statuses", &self.statuses)
            .field("actions", &self.actions.iter().map(|(l, _)| *l).collect::<Vec<_>>())
            .finish()
    }
}

impl<H: Host> DeferredQueue<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attach (`attach = true`) or detach request.
    pub fn enqueue_status(&mut self, agent: AgentId, kind: StatusKind, attach: bool) {
        self.statuses.push(StatusRequest { agent, kind, attach });
    }

    #[inline]
    pub fn attach(&mut self, agent: AgentId, kind: StatusKind) {
        self.enqueue_status(agent, kind, true);
    }

    #[inline]
    pub fn detach(&mut self, agent: AgentId, kind: StatusKind) {
        self.enqueue_status(agent, kind, false);
    }

    /// Record an action.  `label` only appears in diagnostics.
    pub fn enqueue_action<F>(&mut self, label: &'static str, action: F)
    where
        F: FnOnce(&mut H, &mut DeferredQueue<H>) -> HostResult<()> + 'static,
    {
        self.actions.push((label, Box::new(action)));
    }

    /// Pending status requests, in enqueue order.
    pub fn pending_statuses(&self) -> &[StatusRequest] {
        &self.statuses
    }

    /// Labels of pending actions, in enqueue order.
    pub fn pending_actions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.actions.iter().map(|(label, _)| *label)
    }

    pub fn len(&self) -> usize {
        self.statuses.len() + self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty() && self.actions.is_empty()
    }

    /// Apply everything queued so far: status requests first, then actions,
    /// each in FIFO order.
    ///
    /// Every item is applied independently.  A gone or dead agent, a
    /// duplicate attach or a detach of an absent status is skipped; a failing
    /// action is logged and discarded.  Nothing aborts the batch.
    pub fn drain_and_apply(&mut self, host: &mut H) -> DrainReport {
        let statuses = std::mem::take(&mut self.statuses);
        let actions = std::mem::take(&mut self.actions);
        let mut report = DrainReport::default();

        for req in statuses {
            let live = host.view(req.agent).is_some_and(|v| v.alive);
            let present = host.has_status(req.agent, req.kind);
            if !live || present == req.attach {
                report.skipped += 1;
                continue;
            }
            let result = if req.attach {
                host.attach_status(req.agent, req.kind)
            } else {
                host.detach_status(req.agent, req.kind)
            };
            match result {
                Ok(()) if req.attach => report.attached += 1,
                Ok(()) => report.detached += 1,
                Err(err) => {
                    debug!(agent = %req.agent, kind = ?req.kind, %err, "status request skipped");
                    report.skipped += 1;
                }
            }
        }

        for (label, action) in actions {
            report.actions_run += 1;
            if let Err(err) = action(host, self) {
                warn!(action = label, %err, "deferred action failed");
                report.actions_failed += 1;
            }
        }

        if report != DrainReport::default() {
            debug!(?report, "deferred queue drained");
        }
        report
    }
}
