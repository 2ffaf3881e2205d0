//! State machine that executes guarded transitions with async lifecycle hooks.

use crate::config::MachineConfig;
use crate::core::{HistoryRecorder, State, TransitionRecord, RESET_EVENT};
use crate::effects::error::MachineError;
use crate::effects::hook::{HookError, HookPhase};
use crate::effects::subscription::{Subscription, SubscriptionHub};
use crate::graph::{StateGraph, Transition};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Event name reported when the initial state's enter hook fails.
const INIT_EVENT: &str = "init";

/// A live machine over a [`StateGraph`].
///
/// The machine holds exactly one current state. Transitions run their hooks
/// in the order exit, action, enter, and at most one transition is in
/// flight at a time: a call made while another is running returns
/// `Ok(false)` immediately instead of waiting.
///
/// All methods take `&self`, so a machine can be shared behind an `Arc`.
///
/// # Example
///
/// ```
/// use flowstate::effects::StateMachine;
/// use flowstate::graph::{StateConfig, StateGraph, Transition};
/// use flowstate::state_enum;
///
/// state_enum! {
///     enum Fetch {
///         Idle,
///         Loading,
///         Done,
///     }
///     final: [Done]
/// }
///
/// # futures::executor::block_on(async {
/// let graph = StateGraph::builder()
///     .initial(Fetch::Idle)
///     .state(StateConfig::new(Fetch::Idle).on("start", Transition::to(Fetch::Loading)))
///     .state(StateConfig::new(Fetch::Loading).on("success", Transition::to(Fetch::Done)))
///     .state(StateConfig::new(Fetch::Done))
///     .build()
///     .unwrap();
///
/// let machine = StateMachine::new(graph).unwrap();
/// assert!(machine.can("start"));
/// assert!(machine.transition("start").await.unwrap());
/// assert!(!machine.transition("start").await.unwrap());
/// assert_eq!(machine.current_state(), Fetch::Loading);
/// # });
/// ```
pub struct StateMachine<S: State> {
    id: Uuid,
    graph: Arc<StateGraph<S>>,
    current: Mutex<S>,
    in_flight: AtomicBool,
    history: Mutex<HistoryRecorder<S>>,
    subscribers: SubscriptionHub<S>,
}

impl<S: State> StateMachine<S> {
    /// Create a machine in the graph's initial state with default options.
    ///
    /// The initial state's enter hook runs to completion before this returns.
    pub fn new(graph: StateGraph<S>) -> Result<Self, MachineError> {
        Self::with_config(graph, MachineConfig::default())
    }

    /// Create a machine, running the initial enter hook on the calling thread.
    pub fn with_config(graph: StateGraph<S>, config: MachineConfig) -> Result<Self, MachineError> {
        let machine = Self::assemble(graph, config);
        let initial = machine.graph.initial();
        if let Some(hook) = machine.graph.on_enter(initial) {
            hook.run_blocking().map_err(|source| {
                machine.hook_failed(HookPhase::Enter, INIT_EVENT, initial, source)
            })?;
        }
        Ok(machine)
    }

    /// Create a machine, awaiting the initial enter hook.
    pub async fn start(graph: StateGraph<S>, config: MachineConfig) -> Result<Self, MachineError> {
        let machine = Self::assemble(graph, config);
        let initial = machine.graph.initial();
        if let Some(hook) = machine.graph.on_enter(initial) {
            if let Err(source) = hook.run().await {
                return Err(machine.hook_failed(HookPhase::Enter, INIT_EVENT, initial, source));
            }
        }
        Ok(machine)
    }

    fn assemble(graph: StateGraph<S>, config: MachineConfig) -> Self {
        let machine = Self {
            id: Uuid::new_v4(),
            current: Mutex::new(graph.initial().clone()),
            graph: Arc::new(graph),
            in_flight: AtomicBool::new(false),
            history: Mutex::new(HistoryRecorder::with_capacity(config.max_history_size)),
            subscribers: SubscriptionHub::new(),
        };
        tracing::debug!(
            "Machine {} created in '{}' ({} states)",
            machine.id,
            machine.graph.initial().name(),
            machine.graph.len()
        );
        machine
    }

    /// Identifier used to correlate this machine's log lines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn graph(&self) -> &StateGraph<S> {
        &self.graph
    }

    pub fn current_state(&self) -> S {
        self.current.lock().clone()
    }

    pub fn is_in(&self, state: &S) -> bool {
        *self.current.lock() == *state
    }

    /// Whether a transition's hooks are currently running.
    pub fn is_transitioning(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Check whether `event` would currently be accepted.
    ///
    /// True when the current state declares `event` and its guard, if any,
    /// passes. Does not consider whether another transition is in flight.
    pub fn can(&self, event: &str) -> bool {
        let current = self.current_state();
        self.graph
            .transition(&current, event)
            .is_some_and(Transition::is_permitted)
    }

    /// Fire `event`.
    ///
    /// Returns `Ok(true)` once the machine has entered the target state,
    /// recorded the change, and notified subscribers. Returns `Ok(false)`
    /// without side effects when another transition is in flight, the
    /// event is not declared for the current state, or its guard rejects.
    ///
    /// If any hook fails the machine is left in (or restored to) the state
    /// it started from and the failure is returned. Nothing is recorded and
    /// no subscriber is notified.
    pub async fn transition(&self, event: &str) -> Result<bool, MachineError> {
        let Some(mut in_flight) = InFlight::acquire(&self.in_flight, &self.current) else {
            tracing::trace!("Machine {} busy; rejected '{}'", self.id, event);
            return Ok(false);
        };

        let previous = self.current_state();
        let Some(transition) = self.graph.transition(&previous, event) else {
            tracing::trace!(
                "Machine {}: '{}' is not declared for '{}'",
                self.id,
                event,
                previous.name()
            );
            return Ok(false);
        };

        if !transition.is_permitted() {
            tracing::trace!(
                "Machine {}: guard rejected '{}' from '{}'",
                self.id,
                event,
                previous.name()
            );
            return Ok(false);
        }

        if let Some(hook) = self.graph.on_exit(&previous) {
            if let Err(source) = hook.run().await {
                return Err(self.hook_failed(HookPhase::Exit, event, &previous, source));
            }
        }

        if let Some(action) = &transition.action {
            if let Err(source) = action.run().await {
                return Err(self.hook_failed(HookPhase::Transition, event, &previous, source));
            }
        }

        // A reset may have moved the machine while the exit hook or action ran.
        let target = transition.to.clone();
        let displaced = std::mem::replace(&mut *self.current.lock(), target.clone());
        in_flight.arm(displaced.clone(), target.clone());

        if let Some(hook) = self.graph.on_enter(&target) {
            if let Err(source) = hook.run().await {
                return Err(self.hook_failed(HookPhase::Enter, event, &displaced, source));
            }
        }
        in_flight.commit();

        let record = TransitionRecord::new(displaced, target, event);
        self.history.lock().record(record.clone());
        tracing::debug!(
            "Machine {}: '{}' moved {} -> {}",
            self.id,
            event,
            record.from.name(),
            record.to.name()
        );

        self.subscribers.notify(&record);
        Ok(true)
    }

    /// Jump straight to `state`.
    ///
    /// Skips guards, the current state's exit hook and any transition
    /// action. Runs `state`'s enter hook on the calling thread and records a
    /// `"reset"` entry. Subscribers are not notified. A failing enter hook is
    /// logged and does not undo the reset.
    ///
    /// A reset may land while a transition is in flight. If it lands before
    /// the transition switches state, the transition still moves to its
    /// target and records the reset state as `from`. If it lands while the
    /// target's enter hook runs, the reset state is kept even when that hook
    /// fails or the transition is dropped.
    pub fn reset(&self, state: S) -> Result<(), MachineError> {
        let Some(config) = self.graph.config(&state) else {
            return Err(MachineError::UnknownState {
                state: state.name().to_string(),
            });
        };

        let previous = std::mem::replace(&mut *self.current.lock(), state.clone());

        if let Some(hook) = &config.on_enter {
            if let Err(error) = hook.run_blocking() {
                tracing::warn!(
                    "Machine {}: enter hook for '{}' failed during reset: {}",
                    self.id,
                    state.name(),
                    error
                );
            }
        }

        tracing::debug!(
            "Machine {} reset {} -> {}",
            self.id,
            previous.name(),
            state.name()
        );
        self.history
            .lock()
            .record(TransitionRecord::new(previous, state, RESET_EVENT));
        Ok(())
    }

    /// Register a listener for successful transitions.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<S>
    where
        F: Fn(&TransitionRecord<S>) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// All declared states in declaration order.
    pub fn states(&self) -> Vec<S> {
        self.graph.states().cloned().collect()
    }

    /// Events declared for the current state, regardless of guards.
    pub fn available_transitions(&self) -> Vec<String> {
        self.graph.events(&self.current_state())
    }

    /// Recorded transitions, newest first.
    pub fn history(&self) -> Vec<TransitionRecord<S>> {
        self.history.lock().to_vec()
    }

    pub fn last_transition(&self) -> Option<TransitionRecord<S>> {
        self.history.lock().latest().cloned()
    }

    pub fn clear_history(&self) {
        self.history.lock().clear();
    }

    /// Drop every subscriber and clear history.
    ///
    /// The machine should not be used afterwards.
    pub fn destroy(&self) {
        self.subscribers.clear();
        self.history.lock().clear();
        tracing::debug!("Machine {} destroyed", self.id);
    }

    fn hook_failed(&self, phase: HookPhase, event: &str, from: &S, source: HookError) -> MachineError {
        tracing::warn!(
            "Machine {}: {} hook failed during '{}'; staying in '{}': {}",
            self.id,
            phase,
            event,
            from.name(),
            source
        );
        MachineError::Hook {
            phase,
            event: event.to_string(),
            from: from.name().to_string(),
            source,
        }
    }
}

impl<S: State> fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("current", &self.current_state())
            .field("is_transitioning", &self.is_transitioning())
            .finish_non_exhaustive()
    }
}

/// Holds the in-flight flag for the lifetime of one transition.
///
/// Once armed, dropping the guard before `commit` puts the displaced state
/// back. This covers a failing enter hook, a panicking one, and a
/// transition future dropped mid-hook.
struct InFlight<'a, S: State> {
    flag: &'a AtomicBool,
    current: &'a Mutex<S>,
    rollback: Option<(S, S)>,
}

impl<'a, S: State> InFlight<'a, S> {
    fn acquire(flag: &'a AtomicBool, current: &'a Mutex<S>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag,
                current,
                rollback: None,
            })
    }

    /// Restore `displaced` on drop unless the machine has left `target`.
    fn arm(&mut self, displaced: S, target: S) {
        self.rollback = Some((displaced, target));
    }

    fn commit(&mut self) {
        self.rollback = None;
    }
}

impl<S: State> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        if let Some((displaced, target)) = self.rollback.take() {
            let mut current = self.current.lock();
            if *current == target {
                *current = displaced;
            }
        }
        self.flag.store(false, Ordering::Release);
    }
}
