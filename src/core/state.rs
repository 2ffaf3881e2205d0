//! Core State trait for state machine states.
//!
//! All state machine states must implement this trait, which provides
//! pure methods for inspecting state properties without side effects.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// States are small, finite identifiers. A machine holds exactly one of
/// them as its current state, and the graph indexes its per-state
/// configuration by them, hence the `Eq + Hash` bound.
///
/// # Example
///
/// ```rust
/// use flowstate::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum FetchState {
///     Idle,
///     Loading,
///     Success,
/// }
///
/// impl State for FetchState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "idle",
///             Self::Loading => "loading",
///             Self::Success => "success",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Success)
///     }
/// }
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    ///
    /// Names also appear in diagram exports and in the `to_<name>` events
    /// synthesized by the fully connected helper graph.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Only used for diagnostics; the engine never refuses to leave a
    /// final state on its own.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}
