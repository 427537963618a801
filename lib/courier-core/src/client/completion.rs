//! Single-consumer delivery of call completions.
//!
//! Requests run on the tokio runtime, possibly in parallel. Their callbacks are
//! not invoked there: each one is sent to a [`CompletionContext`] whose single
//! consumer runs them one at a time, in arrival order.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::LazyLock;
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Name of the threads started by [`CompletionContext::spawn`].
const THREAD_NAME: &str = "courier-completion";

type Completion = Box<dyn FnOnce() + Send>;

static MAIN: LazyLock<CompletionContext> = LazyLock::new(CompletionContext::spawn);

/// Handle onto the context where call completions are delivered.
///
/// Cloning the handle shares the same context. Callbacks delivered to one context
/// never run concurrently with each other.
#[derive(Debug, Clone)]
pub struct CompletionContext {
    sender: mpsc::UnboundedSender<Completion>,
}

impl CompletionContext {
    /// The process-wide context, backed by a dedicated thread started on first use.
    ///
    /// This is the default context of every [`Courier`](crate::Courier).
    #[must_use]
    pub fn main() -> Self {
        MAIN.clone()
    }

    /// Starts a new context on its own dedicated thread.
    ///
    /// The thread stops once every handle onto the context has been dropped.
    ///
    /// # Panics
    ///
    /// Panics if the operating system refuses to create the thread.
    #[must_use]
    #[allow(
        clippy::expect_used,
        reason = "a context cannot deliver anything without its thread"
    )]
    pub fn spawn() -> Self {
        let (context, completion_loop) = Self::manual();
        thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || completion_loop.run())
            .expect("completion thread should start");
        context
    }

    /// Creates a context driven by the caller.
    ///
    /// Completions queue up until the returned [`CompletionLoop`] runs them, typically
    /// from an application main loop.
    ///
    /// # Example
    ///
    /// ```rust
    /// use courier_core::CompletionContext;
    ///
    /// let (context, mut completion_loop) = CompletionContext::manual();
    /// let courier = courier_core::Courier::builder()
    ///     .with_base_url("http://localhost:8080/")
    ///     .with_completion_context(context)
    ///     .build();
    ///
    /// // somewhere in the main loop
    /// let ran = completion_loop.run_pending();
    /// assert_eq!(ran, 0);
    /// # drop(courier);
    /// ```
    #[must_use]
    pub fn manual() -> (Self, CompletionLoop) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, CompletionLoop { receiver })
    }

    /// Queues `completion` to run on this context.
    pub(in crate::client) fn deliver(&self, completion: impl FnOnce() + Send + 'static) {
        if self.sender.send(Box::new(completion)).is_err() {
            warn!("completion context is closed, dropping completion");
        }
    }
}

/// The consuming side of a [`CompletionContext`] created with [`CompletionContext::manual`].
#[derive(Debug)]
pub struct CompletionLoop {
    receiver: mpsc::UnboundedReceiver<Completion>,
}

impl CompletionLoop {
    /// Runs completions as they arrive until every context handle is dropped.
    ///
    /// # Panics
    ///
    /// Blocks the current thread, so it panics when called from within an asynchronous
    /// execution context. Use [`run_async`](Self::run_async) there.
    pub fn run(mut self) {
        while let Some(completion) = self.receiver.blocking_recv() {
            run_completion(completion);
        }
        debug!("completion loop finished");
    }

    /// Runs completions as they arrive, as a task, until every context handle is dropped.
    pub async fn run_async(mut self) {
        while let Some(completion) = self.receiver.recv().await {
            run_completion(completion);
        }
        debug!("completion loop finished");
    }

    /// Runs the completions already queued without waiting, and returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(completion) = self.receiver.try_recv() {
            run_completion(completion);
            count += 1;
        }
        count
    }
}

fn run_completion(completion: Completion) {
    if catch_unwind(AssertUnwindSafe(completion)).is_err() {
        warn!("completion callback panicked");
    }
}
