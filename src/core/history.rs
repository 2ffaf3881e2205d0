//! State transition history tracking.
//!
//! Provides a bounded, newest-first audit log of executed transitions and
//! explicit resets. The log is never consulted by the engine's own
//! transition logic.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Event name recorded for explicit resets.
pub const RESET_EVENT: &str = "reset";

/// Record of a single state change.
///
/// # Example
///
/// ```rust
/// use flowstate::core::{State, TransitionRecord};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Phase { Idle, Loading }
///
/// impl State for Phase {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "idle",
///             Self::Loading => "loading",
///         }
///     }
/// }
///
/// let record = TransitionRecord::new(Phase::Idle, Phase::Loading, "start");
/// assert_eq!(record.event, "start");
/// assert!(!record.is_reset());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The event that caused the change, or `"reset"`
    pub event: String,
    /// When the change was recorded
    pub at: DateTime<Utc>,
}

impl<S: State> TransitionRecord<S> {
    /// Create a record stamped with the current time.
    pub fn new(from: S, to: S, event: impl Into<String>) -> Self {
        Self {
            from,
            to,
            event: event.into(),
            at: Utc::now(),
        }
    }

    /// Whether this record was produced by an explicit reset.
    pub fn is_reset(&self) -> bool {
        self.event == RESET_EVENT
    }
}

/// Bounded log of transition records, newest first.
///
/// Once `capacity` records are held, recording another evicts the oldest.
/// A capacity of `None` keeps every record.
///
/// # Example
///
/// ```rust
/// use flowstate::core::{HistoryRecorder, State, TransitionRecord};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Step { A, B }
///
/// impl State for Step {
///     fn name(&self) -> &str {
///         match self {
///             Self::A => "A",
///             Self::B => "B",
///         }
///     }
/// }
///
/// let mut history = HistoryRecorder::with_capacity(Some(1));
/// history.record(TransitionRecord::new(Step::A, Step::B, "forward"));
/// history.record(TransitionRecord::new(Step::B, Step::A, "back"));
///
/// assert_eq!(history.len(), 1);
/// assert_eq!(history.latest().unwrap().event, "back");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct HistoryRecorder<S: State> {
    records: VecDeque<TransitionRecord<S>>,
    capacity: Option<usize>,
}

impl<S: State> Default for HistoryRecorder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> HistoryRecorder<S> {
    /// Create an unbounded history.
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// Create a history holding at most `capacity` records.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            records: VecDeque::new(),
            capacity,
        }
    }

    /// Maximum number of records kept, if bounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Record a state change as the newest entry, evicting the oldest
    /// entries past capacity.
    pub fn record(&mut self, record: TransitionRecord<S>) {
        self.records.push_front(record);
        if let Some(capacity) = self.capacity {
            self.records.truncate(capacity);
        }
    }

    /// Most recent record, if any.
    pub fn latest(&self) -> Option<&TransitionRecord<S>> {
        self.records.front()
    }

    /// Iterate records from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &TransitionRecord<S>> {
        self.records.iter()
    }

    /// Copy the records out, newest first.
    pub fn to_vec(&self) -> Vec<TransitionRecord<S>> {
        self.records.iter().cloned().collect()
    }

    /// Path of states traversed, oldest first.
    ///
    /// Starts with the `from` state of the oldest retained record, followed
    /// by the `to` state of every record.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(oldest) = self.records.back() {
            path.push(&oldest.from);
        }
        path.extend(self.records.iter().rev().map(|record| &record.to));
        path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record; capacity is unchanged.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
