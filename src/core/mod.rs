//! Core state machine types.
//!
//! This module contains the building blocks every machine shares:
//! - State definitions via the `State` trait
//! - Guard predicates for transition control
//! - Bounded transition history
//!
//! Nothing in this module performs I/O or awaits.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{HistoryRecorder, TransitionRecord, RESET_EVENT};
pub use state::State;
