//! Machine configuration.

use serde::{Deserialize, Serialize};

/// Options applied when a machine is constructed.
///
/// Deserializes from any serde format; missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Maximum number of history records kept. `None` keeps every record.
    pub max_history_size: Option<usize>,
}

impl MachineConfig {
    pub fn with_max_history(mut self, size: usize) -> Self {
        self.max_history_size = Some(size);
        self
    }
}
