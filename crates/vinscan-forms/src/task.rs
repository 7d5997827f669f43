//! Cancellable simulated delays
//!
//! Every pause a controller takes goes through here so that cancelling the
//! controller's token stops the pause and nothing after it runs.

use crate::error::{FormError, FormResult};
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Sleep for `delay` unless `token` is cancelled first
///
/// # Errors
///
/// Returns [`FormError::Cancelled`] if the token fires before the delay ends.
pub async fn cancellable_delay(
    token: &CancellationToken,
    delay: Duration,
    operation: &str,
) -> FormResult<()> {
    tokio::select! {
        biased;
        () = token.cancelled() => {
            debug!(operation, "delay cancelled");
            Err(FormError::cancelled(operation))
        }
        () = tokio::time::sleep(delay) => Ok(()),
    }
}

/// Run `future` with an upper time bound, aborting early on cancellation
///
/// # Errors
///
/// Returns [`FormError::Timeout`] when `limit` elapses,
/// [`FormError::Cancelled`] when `token` fires, or whatever `future` returns.
pub async fn bounded<T, F>(
    token: &CancellationToken,
    limit: Duration,
    operation: &str,
    future: F,
) -> FormResult<T>
where
    F: Future<Output = FormResult<T>>,
{
    let millis = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
    tokio::select! {
        biased;
        () = token.cancelled() => Err(FormError::cancelled(operation)),
        result = tokio::time::timeout(limit, future) => {
            result.unwrap_or_else(|_| Err(FormError::timeout(operation, millis)))
        }
    }
}

/// A spawned job that waits, then runs, and can be called off at any point
#[derive(Debug)]
pub struct DelayedTask<T> {
    token: CancellationToken,
    handle: JoinHandle<FormResult<T>>,
}

impl<T: Send + 'static> DelayedTask<T> {
    /// Spawn `work` to run after `delay`. Cancelling `token` (or the returned
    /// task) before then means `work` never runs.
    pub fn spawn<F, Fut>(
        token: CancellationToken,
        delay: Duration,
        operation: &'static str,
        work: F,
    ) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = FormResult<T>> + Send + 'static,
    {
        let task_token = token.clone();
        let handle = tokio::spawn(async move {
            cancellable_delay(&task_token, delay, operation).await?;
            work().await
        });

        Self { token, handle }
    }

    /// Stop the task if it has not run yet
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the task has completed, successfully or not
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task's outcome
    ///
    /// # Errors
    ///
    /// Returns the task's own error, [`FormError::Cancelled`] if it was
    /// called off, or [`FormError::Task`] if it panicked.
    pub async fn join(self) -> FormResult<T> {
        self.handle.await?
    }
}

/// Runs a rollback when an in-flight operation is dropped before it finishes
///
/// Callers arm the guard after moving state into an in-flight phase and
/// [`disarm`](Self::disarm) it once they have settled the outcome. Dropping
/// an armed guard runs the rollback, unless `token` was cancelled: an
/// unmounted view never changes state again.
pub struct AbandonGuard<'a, F: FnOnce()> {
    token: &'a CancellationToken,
    rollback: Option<F>,
}

impl<'a, F: FnOnce()> AbandonGuard<'a, F> {
    /// Arm a guard that runs `rollback` if dropped
    pub const fn new(token: &'a CancellationToken, rollback: F) -> Self {
        Self {
            token,
            rollback: Some(rollback),
        }
    }

    /// The operation settled its own state; do nothing on drop
    pub fn disarm(&mut self) {
        self.rollback = None;
    }
}

impl<F: FnOnce()> Drop for AbandonGuard<'_, F> {
    fn drop(&mut self) {
        if let Some(rollback) = self.rollback.take()
            && !self.token.is_cancelled()
        {
            rollback();
        }
    }
}
