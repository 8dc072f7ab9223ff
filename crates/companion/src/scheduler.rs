//! Cancellable delayed tasks.
//!
//! Every simulated latency in the companion (scan result, voice recognition,
//! payment processing, success screen) is a task scheduled here. Each task
//! listens on a child of the scheduler's root [`CancellationToken`], so
//! disposing the owner cancels everything it scheduled in one call.
//!
//! Cancellation stops a task that has not fired yet. Owners that must never
//! observe a mutation after disposal also guard their state (see
//! `CheckoutSession::dispose`), because a task may already be past its sleep
//! when the token is cancelled.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// How a scheduled task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The delay elapsed and the task ran.
    Fired,
    /// The task was cancelled before it ran.
    Cancelled,
}

/// Owner of a group of cancellable delayed tasks.
///
/// Cloning yields another handle to the same group; disposing any handle
/// cancels tasks scheduled through all of them. Dropping a handle does not
/// cancel anything; owners call [`Scheduler::dispose`] from their `Drop`.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    root: CancellationToken,
}

impl Scheduler {
    /// Create a scheduler with no pending tasks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay` unless cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, delay: Duration, task: F) -> ScheduledTask
    where
        F: FnOnce() + Send + 'static,
    {
        let token = self.root.child_token();
        let listener = token.clone();

        debug!(delay_ms = delay.as_millis(), "Scheduling delayed task");
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                () = listener.cancelled() => {
                    trace!("Delayed task cancelled before firing");
                    TaskOutcome::Cancelled
                }
                () = tokio::time::sleep(delay) => {
                    if listener.is_cancelled() {
                        return TaskOutcome::Cancelled;
                    }
                    task();
                    TaskOutcome::Fired
                }
            }
        });

        ScheduledTask { token, handle }
    }

    /// Cancel every task scheduled so far and any scheduled later.
    pub fn dispose(&self) {
        if !self.root.is_cancelled() {
            debug!("Disposing scheduler");
        }
        self.root.cancel();
    }

    /// Whether [`Scheduler::dispose`] has been called.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.root.is_cancelled()
    }
}

/// Handle to one scheduled task.
///
/// Dropping the handle does not cancel the task.
#[derive(Debug)]
pub struct ScheduledTask {
    token: CancellationToken,
    handle: JoinHandle<TaskOutcome>,
}

impl ScheduledTask {
    /// Cancel this task only.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the task has either fired or observed cancellation.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task to end.
    ///
    /// A task that panicked or was aborted by runtime shutdown counts as
    /// cancelled.
    pub async fn join(self) -> TaskOutcome {
        self.handle.await.unwrap_or(TaskOutcome::Cancelled)
    }
}
