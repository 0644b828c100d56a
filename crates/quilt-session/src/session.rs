//! The compiler session: a synchronous facade over a worker runtime.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use quilt_compile::CompileResult;
use quilt_ir::Circuit;
use rustc_hash::FxHashMap;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{SessionError, SessionResult};
use crate::workflow::Workflow;

/// Opaque handle for a submitted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A compiler session owning a pool of worker threads.
///
/// Submission never blocks; tasks start running immediately on the
/// worker pool. Results are retrieved by [`TaskId`] and consumed on
/// retrieval: asking for the same id twice yields
/// [`SessionError::UnknownTask`].
///
/// The session requires exclusive ownership of its workers; dropping or
/// [`CompilerSession::close`]-ing it tears the pool down.
pub struct CompilerSession {
    runtime: Runtime,
    tasks: Mutex<FxHashMap<TaskId, JoinHandle<CompileResult<Circuit>>>>,
}

impl CompilerSession {
    /// Start a session with one worker per available core.
    pub fn new() -> SessionResult<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .thread_name("quilt-worker")
            .enable_all()
            .build()?;
        info!("compiler session started");
        Ok(Self {
            runtime,
            tasks: Mutex::new(FxHashMap::default()),
        })
    }

    /// Start a session with a fixed number of worker threads.
    pub fn with_workers(workers: usize) -> SessionResult<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(workers.max(1))
            .thread_name("quilt-worker")
            .enable_all()
            .build()?;
        info!(workers, "compiler session started");
        Ok(Self {
            runtime,
            tasks: Mutex::new(FxHashMap::default()),
        })
    }

    /// Submit a workflow. Returns immediately with the task's id.
    pub fn submit(&self, workflow: Workflow) -> TaskId {
        self.submit_fn(move || workflow.run())
    }

    /// Submit an arbitrary compilation closure.
    pub fn submit_fn<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() -> CompileResult<Circuit> + Send + 'static,
    {
        let id = TaskId::new();
        let handle = self.runtime.spawn_blocking(task);
        self.lock_tasks().insert(id, handle);
        debug!(task = %id, "task submitted");
        id
    }

    /// Number of tasks whose results have not been retrieved yet.
    pub fn pending(&self) -> usize {
        self.lock_tasks().len()
    }

    /// Block until the task finishes and return its circuit.
    ///
    /// The task is consumed: a second call with the same id returns
    /// [`SessionError::UnknownTask`].
    pub fn result(&self, id: TaskId) -> SessionResult<Circuit> {
        let handle = self
            .lock_tasks()
            .remove(&id)
            .ok_or(SessionError::UnknownTask(id))?;
        self.join(id, handle)
    }

    /// Retrieve the task's result if it has already finished.
    ///
    /// Returns `Ok(None)` while the task is still running, leaving it
    /// in the session. A finished task is consumed like in
    /// [`CompilerSession::result`].
    pub fn try_result(&self, id: TaskId) -> SessionResult<Option<Circuit>> {
        let handle = {
            let mut tasks = self.lock_tasks();
            match tasks.get(&id) {
                None => return Err(SessionError::UnknownTask(id)),
                Some(h) if !h.is_finished() => return Ok(None),
                Some(_) => tasks.remove(&id).ok_or(SessionError::UnknownTask(id))?,
            }
        };
        self.join(id, handle).map(Some)
    }

    /// Shut the session down, dropping any unretrieved tasks.
    pub fn close(self) {
        let outstanding = self.lock_tasks().len();
        if outstanding > 0 {
            debug!(outstanding, "closing session with unretrieved tasks");
        }
        self.runtime.shutdown_background();
        info!("compiler session closed");
    }

    fn join(
        &self,
        id: TaskId,
        handle: JoinHandle<CompileResult<Circuit>>,
    ) -> SessionResult<Circuit> {
        match self.runtime.block_on(handle) {
            Ok(Ok(circuit)) => {
                debug!(task = %id, "task completed");
                Ok(circuit)
            }
            Ok(Err(e)) => Err(SessionError::TaskFailed(e)),
            Err(join_err) => Err(SessionError::TaskPanicked(join_err.to_string())),
        }
    }

    fn lock_tasks(
        &self,
    ) -> std::sync::MutexGuard<'_, FxHashMap<TaskId, JoinHandle<CompileResult<Circuit>>>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
