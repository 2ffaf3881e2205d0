//! Build errors for state graphs.

use thiserror::Error;

/// A single structural problem found while validating a graph.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphViolation {
    #[error("State '{state}' is declared more than once")]
    DuplicateState { state: String },

    #[error("State '{state}' declares event '{event}' more than once")]
    DuplicateEvent { state: String, event: String },

    #[error("Event '{event}' on state '{state}' targets undeclared state '{target}'")]
    UnknownTarget {
        state: String,
        event: String,
        target: String,
    },

    #[error("Initial state '{state}' is not declared")]
    UnknownInitial { state: String },
}

/// Errors that can occur when building a state graph.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error("Invalid state graph ({} violations): {}", .0.len(), join(.0))]
    Invalid(Vec<GraphViolation>),
}

impl BuildError {
    /// Violations reported by graph validation.
    pub fn violations(&self) -> &[GraphViolation] {
        match self {
            Self::Invalid(violations) => violations,
            _ => &[],
        }
    }
}

fn join(violations: &[GraphViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
