//! Per-state definition: lifecycle hooks and outgoing transitions.

use crate::core::State;
use crate::effects::Hook;
use crate::graph::transition::Transition;

/// Definition of one state in a graph.
///
/// Events are kept in declaration order. Declaring the same event twice is
/// reported when the graph is built.
#[derive(Clone, Debug)]
pub struct StateConfig<S: State> {
    pub state: S,
    pub on_enter: Option<Hook>,
    pub on_exit: Option<Hook>,
    pub(crate) transitions: Vec<(String, Transition<S>)>,
}

impl<S: State> StateConfig<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            on_enter: None,
            on_exit: None,
            transitions: Vec::new(),
        }
    }

    /// Run `hook` whenever the machine enters this state.
    pub fn on_enter(mut self, hook: Hook) -> Self {
        self.on_enter = Some(hook);
        self
    }

    /// Run `hook` whenever the machine leaves this state via a transition.
    pub fn on_exit(mut self, hook: Hook) -> Self {
        self.on_exit = Some(hook);
        self
    }

    /// Declare `transition` for `event`.
    pub fn on(mut self, event: impl Into<String>, transition: Transition<S>) -> Self {
        self.transitions.push((event.into(), transition));
        self
    }

    pub fn name(&self) -> &str {
        self.state.name()
    }

    /// The transition declared for `event`, if any.
    pub fn transition(&self, event: &str) -> Option<&Transition<S>> {
        self.transitions
            .iter()
            .find(|(name, _)| name == event)
            .map(|(_, transition)| transition)
    }

    /// Declared events in declaration order.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.transitions.iter().map(|(name, _)| name.as_str())
    }

    /// Declared `(event, transition)` pairs in declaration order.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &Transition<S>)> {
        self.transitions
            .iter()
            .map(|(name, transition)| (name.as_str(), transition))
    }
}
