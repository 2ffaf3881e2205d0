//! Declared transitions between states.

use crate::core::{Guard, State};
use crate::effects::Hook;

/// A declared transition: target state, optional guard, optional action.
///
/// # Example
///
/// ```
/// use flowstate::effects::Hook;
/// use flowstate::graph::Transition;
/// use flowstate::state_enum;
///
/// state_enum! {
///     enum Fetch {
///         Idle,
///         Loading,
///     }
/// }
///
/// let start = Transition::to(Fetch::Loading)
///     .when(|| true)
///     .action(Hook::sync(|| Ok(())));
///
/// assert!(start.is_permitted());
/// ```
#[derive(Clone, Debug)]
pub struct Transition<S: State> {
    pub to: S,
    pub guard: Option<Guard>,
    pub action: Option<Hook>,
}

impl<S: State> Transition<S> {
    /// Declare an unguarded transition to `state` with no action.
    pub fn to(state: S) -> Self {
        Self {
            to: state,
            guard: None,
            action: None,
        }
    }

    /// Gate the transition on a guard.
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Gate the transition on a closure.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    /// Run `hook` between the source's exit and the target's enter.
    pub fn action(mut self, hook: Hook) -> Self {
        self.action = Some(hook);
        self
    }

    /// Whether the guard currently allows the transition.
    ///
    /// A transition without a guard is always permitted.
    pub fn is_permitted(&self) -> bool {
        self.guard.as_ref().is_none_or(Guard::check)
    }
}
