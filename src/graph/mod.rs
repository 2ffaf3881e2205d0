//! Static state graph definitions.
//!
//! A graph is declared once, validated by [`StateGraphBuilder`], and never
//! changes afterwards. Machines share it read-only.

pub mod builder;
pub mod error;
pub mod macros;
pub mod state_config;
pub mod transition;

pub use builder::StateGraphBuilder;
pub use error::{BuildError, GraphViolation};
pub use state_config::StateConfig;
pub use transition::Transition;

use crate::core::State;
use crate::effects::Hook;
use std::collections::HashMap;

/// Immutable set of states and their outgoing transitions.
///
/// At most one transition is declared per `(state, event)` pair, and every
/// transition target is a declared state.
#[derive(Clone, Debug)]
pub struct StateGraph<S: State> {
    pub(crate) initial: S,
    pub(crate) states: Vec<StateConfig<S>>,
    pub(crate) index: HashMap<S, usize>,
}

impl<S: State> StateGraph<S> {
    /// Start declaring a graph.
    pub fn builder() -> StateGraphBuilder<S> {
        StateGraphBuilder::new()
    }

    pub fn initial(&self) -> &S {
        &self.initial
    }

    /// Declared states in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.states.iter().map(|config| &config.state)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }

    pub fn config(&self, state: &S) -> Option<&StateConfig<S>> {
        self.index.get(state).map(|&position| &self.states[position])
    }

    /// Declared configurations in declaration order.
    pub fn configs(&self) -> impl Iterator<Item = &StateConfig<S>> {
        self.states.iter()
    }

    /// The transition declared for `event` on `state`.
    pub fn transition(&self, state: &S, event: &str) -> Option<&Transition<S>> {
        self.config(state)?.transition(event)
    }

    /// Events declared on `state`, regardless of guards.
    pub fn events(&self, state: &S) -> Vec<String> {
        self.config(state)
            .map(|config| config.events().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub(crate) fn on_enter(&self, state: &S) -> Option<&Hook> {
        self.config(state)?.on_enter.as_ref()
    }

    pub(crate) fn on_exit(&self, state: &S) -> Option<&Hook> {
        self.config(state)?.on_exit.as_ref()
    }
}
