//! Per-session FIFO run queue: serializes tasks within a session while
//! letting different sessions run concurrently, with a bounded pending
//! depth and a per-task timeout.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use agentcore_config::RunnerConfig;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::warn;

use crate::error::Result;
use crate::error::run_queue_error::SessionBusySnafu;

/// A unit of queued work: given the cancellation token for its slot, runs
/// to completion. The queue only cares about scheduling and cancellation;
/// whatever the task does with its outcome (emit events, report errors) is
/// the caller's business.
pub type Task = Box<dyn FnOnce(CancellationToken) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send>;

/// Returned by [`RunQueue::enqueue`]. Dropping it without calling
/// [`TaskHandle::join`] is fine; the task still runs to completion (or is
/// dropped uncompleted if the session is cancelled) in the background.
pub struct TaskHandle {
    session_id: String,
    done_rx: oneshot::Receiver<()>,
}

impl TaskHandle {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Waits for the task to finish, whether by completing, timing out, or
    /// being cancelled while still pending.
    pub async fn join(self) {
        let _ = self.done_rx.await;
    }
}

struct QueuedTask {
    task: Task,
    cancel: CancellationToken,
    done_tx: oneshot::Sender<()>,
}

#[derive(Default)]
struct SessionQueue {
    pending: VecDeque<QueuedTask>,
    running: bool,
    current_cancel: Option<CancellationToken>,
}

struct QueueState {
    max_depth: u32,
    task_timeout: Duration,
    sessions: Mutex<HashMap<String, SessionQueue>>,
}

/// Serializes tasks per `session_id` FIFO while letting distinct sessions
/// run concurrently. One background worker runs at a time per session,
/// spawned on demand when its queue goes from empty to non-empty and
/// exiting once it has drained everything.
#[derive(Clone)]
pub struct RunQueue {
    state: Arc<QueueState>,
}

impl RunQueue {
    pub fn new(config: &RunnerConfig) -> Self {
        Self {
            state: Arc::new(QueueState {
                max_depth: config.run_queue_depth,
                task_timeout: config.run_queue_task_timeout,
                sessions: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Enqueues `task` for `session_id`, deriving a child of `parent_cancel`
    /// for it to observe. Fails immediately, without touching the queue, if
    /// the session's pending depth is already at capacity.
    pub fn enqueue(&self, session_id: &str, parent_cancel: &CancellationToken, task: Task) -> Result<TaskHandle> {
        let cancel = parent_cancel.child_token();
        let (done_tx, done_rx) = oneshot::channel();

        let needs_worker = {
            let mut sessions = self.state.sessions.lock().expect("run queue mutex poisoned");
            let queue = sessions.entry(session_id.to_string()).or_default();
            if queue.pending.len() as u32 >= self.state.max_depth {
                return SessionBusySnafu { session_id, depth: self.state.max_depth }.fail();
            }
            queue.pending.push_back(QueuedTask { task, cancel, done_tx });
            let needs_worker = !queue.running;
            queue.running = true;
            needs_worker
        };

        if needs_worker {
            let state = self.state.clone();
            let worker_session = session_id.to_string();
            tokio::spawn(async move { Self::drain(state, worker_session).await });
        }

        Ok(TaskHandle { session_id: session_id.to_string(), done_rx })
    }

    /// Cancels the currently running task (if any) and drops every pending
    /// task for `session_id` without running it.
    pub fn cancel(&self, session_id: &str) {
        let mut sessions = self.state.sessions.lock().expect("run queue mutex poisoned");
        let Some(queue) = sessions.get_mut(session_id) else { return };
        if let Some(cancel) = &queue.current_cancel {
            cancel.cancel();
        }
        let dropped = queue.pending.len();
        queue.pending.clear();
        if dropped > 0 {
            debug!(session_id, dropped, "dropped pending tasks on cancel");
        }
    }

    /// True if `session_id` has a task currently running or waiting.
    pub fn has_pending_work(&self, session_id: &str) -> bool {
        let sessions = self.state.sessions.lock().expect("run queue mutex poisoned");
        sessions.get(session_id).is_some_and(|queue| queue.running || !queue.pending.is_empty())
    }

    async fn drain(state: Arc<QueueState>, session_id: String) {
        loop {
            let next = {
                let mut sessions = state.sessions.lock().expect("run queue mutex poisoned");
                let Some(queue) = sessions.get_mut(&session_id) else { break };
                match queue.pending.pop_front() {
                    Some(queued) => {
                        queue.current_cancel = Some(queued.cancel.clone());
                        Some(queued)
                    }
                    None => {
                        queue.running = false;
                        queue.current_cancel = None;
                        None
                    }
                }
            };
            let Some(queued) = next else { break };
            let QueuedTask { task, cancel, done_tx } = queued;

            if cancel.is_cancelled() {
                drop(done_tx);
                continue;
            }

            if timeout(state.task_timeout, task(cancel.clone())).await.is_err() {
                warn!(session_id, "task exceeded the run queue timeout; cancelling it");
                cancel.cancel();
            }
            let _ = done_tx.send(());
        }
    }
}

#[cfg(test)]
#[path = "queue.test.rs"]
mod tests;
