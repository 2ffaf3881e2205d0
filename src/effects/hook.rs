//! Lifecycle hooks run around a transition.

use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Error raised by a failing hook.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Outcome of running a hook.
pub type HookResult = Result<(), HookError>;

type SyncHookFn = Arc<dyn Fn() -> HookResult + Send + Sync>;
type AsyncHookFn = Arc<dyn Fn() -> BoxFuture<'static, HookResult> + Send + Sync>;

/// Which hook of a transition was running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookPhase {
    /// The source state's exit hook
    Exit,
    /// The transition's own action
    Transition,
    /// The target state's enter hook
    Enter,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exit => "exit",
            Self::Transition => "transition",
            Self::Enter => "enter",
        };
        f.write_str(name)
    }
}

/// A lifecycle callback: a state's enter/exit hook or a transition action.
///
/// Hooks are either plain functions or factories producing a fresh future
/// on every invocation.
///
/// # Example
///
/// ```rust
/// use flowstate::effects::{Hook, HookError};
///
/// let log_exit = Hook::sync(|| {
///     println!("leaving");
///     Ok(())
/// });
///
/// let fetch = Hook::future(|| async {
///     // await network work here
///     Ok::<(), HookError>(())
/// });
/// # let _ = (log_exit, fetch);
/// ```
#[derive(Clone)]
pub struct Hook {
    inner: HookFn,
}

#[derive(Clone)]
enum HookFn {
    Sync(SyncHookFn),
    Async(AsyncHookFn),
}

impl Hook {
    /// Create a hook that runs to completion when called.
    pub fn sync<F>(hook: F) -> Self
    where
        F: Fn() -> HookResult + Send + Sync + 'static,
    {
        Self {
            inner: HookFn::Sync(Arc::new(hook)),
        }
    }

    /// Create a hook from a factory of futures.
    ///
    /// The factory is called once per invocation, so every run gets a
    /// fresh future.
    pub fn future<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult> + Send + 'static,
    {
        Self {
            inner: HookFn::Async(Arc::new(move || factory().boxed())),
        }
    }

    /// Whether the hook produces a future.
    pub fn is_async(&self) -> bool {
        matches!(self.inner, HookFn::Async(_))
    }

    pub(crate) async fn run(&self) -> HookResult {
        match &self.inner {
            HookFn::Sync(hook) => hook(),
            HookFn::Async(factory) => factory().await,
        }
    }

    /// Runs the hook to completion on the calling thread.
    ///
    /// Async hooks are driven by a local executor, so a hook reached this
    /// way must not depend on the caller's runtime reactor (timers, sockets)
    /// when that runtime is single-threaded.
    pub(crate) fn run_blocking(&self) -> HookResult {
        match &self.inner {
            HookFn::Sync(hook) => hook(),
            HookFn::Async(factory) => futures::executor::block_on(factory()),
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_async() { "async" } else { "sync" };
        f.debug_struct("Hook").field("kind", &kind).finish()
    }
}
