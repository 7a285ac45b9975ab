//! Execution contexts: where a completion continuation runs.
//!
//! The transport client never assumes an ambient "main thread". Callers pass
//! an explicit context and the client hands the continuation to it exactly
//! once. [`InlineContext`] runs it on the completing task; [`QueueContext`]
//! marshals it onto a channel that a single owner drains, which is how a UI
//! loop receives completions without sharing its state across threads.

use log::warn;
use tokio::sync::mpsc;

/// A boxed completion continuation.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Identifies "where" a completion must run.
pub trait ExecutionContext: Send + Sync {
    fn run(&self, job: Job);
}

/// Runs the continuation immediately on the task that produced the result.
pub struct InlineContext;

impl ExecutionContext for InlineContext {
    fn run(&self, job: Job) {
        job();
    }
}

/// Marshals continuations onto an owner-drained queue.
///
/// The drain side is a plain receiver: the owner (a UI loop, a test) pulls
/// jobs and runs them on its own thread, so everything the continuations
/// touch stays single-owner.
pub struct QueueContext {
    tx: mpsc::UnboundedSender<Job>,
}

impl QueueContext {
    /// Creates a context and the receiver its owner drains.
    pub fn channel() -> (QueueContext, mpsc::UnboundedReceiver<Job>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (QueueContext { tx }, rx)
    }
}

impl ExecutionContext for QueueContext {
    fn run(&self, job: Job) {
        if self.tx.send(job).is_err() {
            // Owner went away; the completion has nowhere to run.
            warn!("execution context dropped its drain; completion discarded");
        }
    }
}
