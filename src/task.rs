//! Background task helpers
//!
//! The UI owns at most one `JoinHandle` per concern and checks it once per
//! frame. These helpers take the handle out of its slot only when it has
//! actually produced a value.

use futures::FutureExt;
use tokio::task::{JoinError, JoinHandle};

/// Outcome of checking a task slot
pub enum PollResult<T> {
    /// The slot is empty
    NoTask,
    /// Task is still running; the handle stays in its slot
    Pending,
    /// Task finished; the slot is now empty
    Complete(Result<T, JoinError>),
}

/// Check a task slot without blocking.
///
/// ```ignore
/// match poll_task(&mut self.task) {
///     PollResult::Complete(Ok(value)) => { /* task returned */ }
///     PollResult::Complete(Err(e)) => { /* task panicked or was aborted */ }
///     PollResult::Pending => ctx.request_repaint(),
///     PollResult::NoTask => {}
/// }
/// ```
pub fn poll_task<T>(task: &mut Option<JoinHandle<T>>) -> PollResult<T> {
    match task.as_ref() {
        None => return PollResult::NoTask,
        Some(handle) if !handle.is_finished() => return PollResult::Pending,
        Some(_) => {}
    }

    let Some(mut handle) = task.take() else {
        return PollResult::NoTask;
    };

    match (&mut handle).now_or_never() {
        Some(result) => PollResult::Complete(result),
        None => {
            tracing::warn!("Task not ready despite is_finished()");
            *task = Some(handle);
            PollResult::Pending
        }
    }
}

/// Wait for the task in `task` to finish, emptying the slot.
#[cfg(test)]
pub async fn join_task<T>(task: &mut Option<JoinHandle<T>>) -> PollResult<T> {
    match task.take() {
        Some(handle) => PollResult::Complete(handle.await),
        None => PollResult::NoTask,
    }
}
