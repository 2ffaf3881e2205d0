//! Guard predicates for controlling state transitions.
//!
//! Guards are side-effect-free boolean functions that decide whether a
//! declared transition may fire right now. They take no arguments: a guard
//! closes over whatever context it inspects.

use std::fmt;
use std::sync::Arc;

/// Predicate that determines if a declared transition may execute.
///
/// Guards are evaluated lazily, by `can` and `transition`, never when the
/// graph is built or when available events are listed.
///
/// # Example
///
/// ```rust
/// use flowstate::core::Guard;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let online = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&online);
/// let guard = Guard::new(move || flag.load(Ordering::SeqCst));
///
/// assert!(!guard.check());
/// online.store(true, Ordering::SeqCst);
/// assert!(guard.check());
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a predicate function.
    ///
    /// The predicate should be free of side effects and thread-safe
    /// (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
