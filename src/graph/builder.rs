//! Builder for constructing validated state graphs.

use crate::core::State;
use crate::graph::error::{BuildError, GraphViolation};
use crate::graph::state_config::StateConfig;
use crate::graph::StateGraph;
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<GraphViolation>>;

/// Builder for constructing state graphs with a fluent API.
///
/// `build` reports every structural problem at once rather than stopping
/// at the first one.
pub struct StateGraphBuilder<S: State> {
    initial: Option<S>,
    states: Vec<StateConfig<S>>,
}

impl<S: State> StateGraphBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Declare a state.
    pub fn state(mut self, config: StateConfig<S>) -> Self {
        self.states.push(config);
        self
    }

    /// Declare several states at once.
    pub fn states(mut self, configs: impl IntoIterator<Item = StateConfig<S>>) -> Self {
        self.states.extend(configs);
        self
    }

    /// Build the graph.
    /// Returns an error if required fields are missing or the graph is inconsistent.
    pub fn build(self) -> Result<StateGraph<S>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        match validate(&initial, &self.states) {
            Validation::Success(_) => {}
            Validation::Failure(violations) => {
                return Err(BuildError::Invalid(violations.iter().cloned().collect()));
            }
        }

        let index = self
            .states
            .iter()
            .enumerate()
            .map(|(position, config)| (config.state.clone(), position))
            .collect::<HashMap<_, _>>();

        Ok(StateGraph {
            initial,
            states: self.states,
            index,
        })
    }
}

impl<S: State> Default for StateGraphBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn validate<S: State>(initial: &S, states: &[StateConfig<S>]) -> Check {
    let mut checks: Vec<Check> = Vec::new();
    let mut declared = HashSet::new();

    for config in states {
        if !declared.insert(&config.state) {
            checks.push(Validation::fail(GraphViolation::DuplicateState {
                state: config.name().to_string(),
            }));
        }
    }

    if !declared.contains(initial) {
        checks.push(Validation::fail(GraphViolation::UnknownInitial {
            state: initial.name().to_string(),
        }));
    }

    for config in states {
        let mut events = HashSet::new();
        for (event, transition) in config.transitions() {
            if !events.insert(event) {
                checks.push(Validation::fail(GraphViolation::DuplicateEvent {
                    state: config.name().to_string(),
                    event: event.to_string(),
                }));
            }
            if !declared.contains(&transition.to) {
                checks.push(Validation::fail(GraphViolation::UnknownTarget {
                    state: config.name().to_string(),
                    event: event.to_string(),
                    target: transition.to.name().to_string(),
                }));
            }
        }
    }

    if checks.is_empty() {
        return Validation::success(());
    }
    Validation::all_vec(checks).map(|_| ())
}
