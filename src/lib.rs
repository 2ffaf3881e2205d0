//! Flowstate: an asynchronous single-active-state machine engine.
//!
//! A machine is built from an immutable [`StateGraph`](graph::StateGraph):
//! the declared states, each with optional enter/exit hooks and a map from
//! event name to a guarded [`Transition`](graph::Transition). The live
//! [`StateMachine`](effects::StateMachine) then accepts events one at a time.
//!
//! # Core Concepts
//!
//! - **State**: Finite identifiers via the `State` trait (or `state_enum!`)
//! - **Guards**: Predicates that decide whether a declared transition may fire
//! - **Hooks**: Sync or async callbacks run in the order exit, action, enter
//! - **History**: Bounded, newest-first audit log of transitions and resets
//! - **Subscriptions**: Listeners notified after every successful transition
//!
//! # Example
//!
//! ```rust
//! use flowstate::core::State;
//! use flowstate::effects::{Hook, HookError, StateMachine};
//! use flowstate::graph::{StateConfig, StateGraph, Transition};
//! use flowstate::helper::StateMachineHelper;
//! use flowstate::state_enum;
//!
//! state_enum! {
//!     enum Ingest {
//!         Idle,
//!         Uploading,
//!         Indexed,
//!     }
//!     final: [Indexed]
//! }
//!
//! # futures::executor::block_on(async {
//! let graph = StateGraph::builder()
//!     .initial(Ingest::Idle)
//!     .state(StateConfig::new(Ingest::Idle).on(
//!         "upload",
//!         Transition::to(Ingest::Uploading).action(Hook::future(|| async { Ok::<(), HookError>(()) })),
//!     ))
//!     .state(StateConfig::new(Ingest::Uploading).on("indexed", Transition::to(Ingest::Indexed)))
//!     .state(StateConfig::new(Ingest::Indexed))
//!     .build()
//!     .unwrap();
//!
//! let machine = StateMachine::new(graph).unwrap();
//! let _subscription = machine.subscribe(|record| println!("{} -> {}", record.from.name(), record.to.name()));
//!
//! assert!(machine.transition("upload").await.unwrap());
//! assert!(machine.transition("indexed").await.unwrap());
//! assert_eq!(machine.history().len(), 2);
//!
//! let diagram = StateMachineHelper::visualize(&machine);
//! assert!(diagram.contains("Idle --> Uploading : upload"));
//! # });
//! ```

pub mod config;
pub mod core;
pub mod effects;
pub mod graph;
pub mod helper;

// Re-export commonly used types
pub use crate::config::MachineConfig;
pub use crate::core::{Guard, HistoryRecorder, State, TransitionRecord};
pub use crate::effects::{Hook, HookPhase, MachineError, StateMachine, Subscription};
pub use crate::graph::{BuildError, StateConfig, StateGraph, StateGraphBuilder, Transition};
pub use crate::helper::StateMachineHelper;
