//! Convenience constructors and diagnostic export.

use crate::config::MachineConfig;
use crate::core::State;
use crate::effects::{MachineError, StateMachine};
use crate::graph::{BuildError, StateConfig, StateGraph, Transition};
use std::fmt::Write;

/// Prefix of the events synthesized by [`StateMachineHelper::simple_graph`].
pub const SIMPLE_EVENT_PREFIX: &str = "to_";

/// Factory and export functions that sit on top of the engine.
pub struct StateMachineHelper;

impl StateMachineHelper {
    /// Event that moves a simple machine into `state`.
    pub fn simple_event<S: State>(state: &S) -> String {
        format!("{SIMPLE_EVENT_PREFIX}{}", state.name())
    }

    /// Fully connected graph over `states`.
    ///
    /// Every state declares `to_<name>` for every other state. There are no
    /// guards and no hooks.
    pub fn simple_graph<S: State>(
        states: impl IntoIterator<Item = S>,
        initial: S,
    ) -> Result<StateGraph<S>, BuildError> {
        let states: Vec<S> = states.into_iter().collect();

        let configs = states.iter().map(|from| {
            states
                .iter()
                .filter(|to| *to != from)
                .fold(StateConfig::new(from.clone()), |config, to| {
                    config.on(Self::simple_event(to), Transition::to(to.clone()))
                })
        });

        StateGraph::builder().initial(initial).states(configs).build()
    }

    /// Machine over the fully connected graph of `states`.
    ///
    /// # Example
    ///
    /// ```
    /// use flowstate::helper::StateMachineHelper;
    /// use flowstate::state_enum;
    ///
    /// state_enum! {
    ///     enum Panel {
    ///         Upload,
    ///         Chat,
    ///         Search,
    ///     }
    /// }
    ///
    /// # futures::executor::block_on(async {
    /// let machine = StateMachineHelper::create_simple([Panel::Upload, Panel::Chat, Panel::Search], Panel::Upload)
    ///     .unwrap();
    /// assert_eq!(machine.available_transitions(), vec!["to_Chat", "to_Search"]);
    /// assert!(machine.transition("to_Search").await.unwrap());
    /// # });
    /// ```
    pub fn create_simple<S: State>(
        states: impl IntoIterator<Item = S>,
        initial: S,
    ) -> Result<StateMachine<S>, MachineError> {
        Self::create_simple_with_config(states, initial, MachineConfig::default())
    }

    pub fn create_simple_with_config<S: State>(
        states: impl IntoIterator<Item = S>,
        initial: S,
        config: MachineConfig,
    ) -> Result<StateMachine<S>, MachineError> {
        let graph = Self::simple_graph(states, initial)?;
        StateMachine::with_config(graph, config)
    }

    /// Mermaid `stateDiagram-v2` text for the machine's static graph.
    ///
    /// Live state and history are not included.
    pub fn visualize<S: State>(machine: &StateMachine<S>) -> String {
        Self::visualize_graph(machine.graph())
    }

    pub fn visualize_graph<S: State>(graph: &StateGraph<S>) -> String {
        let mut diagram = String::from("stateDiagram-v2\n");
        let _ = writeln!(diagram, "    [*] --> {}", graph.initial().name());

        for config in graph.configs() {
            for (event, transition) in config.transitions() {
                let _ = writeln!(
                    diagram,
                    "    {} --> {} : {}",
                    config.name(),
                    transition.to.name(),
                    event
                );
            }
        }

        for state in graph.states().filter(|state| state.is_final()) {
            let _ = writeln!(diagram, "    {} --> [*]", state.name());
        }

        diagram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Loading,
        Success,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "idle",
                Self::Loading => "loading",
                Self::Success => "success",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Success)
        }
    }

    fn all_states() -> [TestState; 3] {
        [TestState::Idle, TestState::Loading, TestState::Success]
    }

    #[test]
    fn simple_graph_is_fully_connected() {
        let graph = StateMachineHelper::simple_graph(all_states(), TestState::Idle).unwrap();

        for from in all_states() {
            let events = graph.events(&from);
            assert_eq!(events.len(), 2);
            for to in all_states().into_iter().filter(|to| *to != from) {
                let event = StateMachineHelper::simple_event(&to);
                let transition = graph.transition(&from, &event).unwrap();
                assert_eq!(transition.to, to);
                assert!(transition.guard.is_none());
            }
            assert!(graph
                .transition(&from, &StateMachineHelper::simple_event(&from))
                .is_none());
        }
    }

    #[test]
    fn simple_graph_rejects_undeclared_initial() {
        let err = StateMachineHelper::simple_graph([TestState::Idle], TestState::Loading)
            .unwrap_err();
        assert_eq!(err.violations().len(), 1);
    }

    #[tokio::test]
    async fn simple_machine_moves_anywhere() {
        let machine = StateMachineHelper::create_simple(all_states(), TestState::Idle).unwrap();

        assert!(machine.transition("to_success").await.unwrap());
        assert!(machine.transition("to_idle").await.unwrap());
        assert!(!machine.transition("to_idle").await.unwrap());
        assert_eq!(machine.history().len(), 2);
    }

    #[test]
    fn visualize_emits_state_diagram() {
        let machine = StateMachineHelper::create_simple_with_config(
            [TestState::Idle, TestState::Success],
            TestState::Idle,
            MachineConfig::default(),
        )
        .unwrap();

        let diagram = StateMachineHelper::visualize(&machine);
        assert_eq!(
            diagram,
            "stateDiagram-v2\n\
             \x20   [*] --> idle\n\
             \x20   idle --> success : to_success\n\
             \x20   success --> idle : to_idle\n\
             \x20   success --> [*]\n"
        );
    }
}
