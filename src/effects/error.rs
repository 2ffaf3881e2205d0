//! Errors surfaced by a running state machine.

use crate::effects::hook::{HookError, HookPhase};
use crate::graph::BuildError;
use thiserror::Error;

/// Errors that can occur while driving a state machine.
///
/// Rejected transitions (unknown event, failing guard, another transition
/// in flight) are not errors; `transition` reports them as `Ok(false)`.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("{phase} hook failed during '{event}' from state '{from}': {source}")]
    Hook {
        phase: HookPhase,
        event: String,
        from: String,
        #[source]
        source: HookError,
    },

    #[error("State '{state}' is not declared in the graph")]
    UnknownState { state: String },

    #[error(transparent)]
    Build(#[from] BuildError),
}

impl MachineError {
    /// The hook phase that failed, if this is a hook failure.
    pub fn phase(&self) -> Option<HookPhase> {
        match self {
            Self::Hook { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    /// Take back the error a failing hook returned.
    pub fn into_hook_error(self) -> Option<HookError> {
        match self {
            Self::Hook { source, .. } => Some(source),
            _ => None,
        }
    }
}
