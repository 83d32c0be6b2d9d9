use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A project grouping tasks under a coordinator.
///
/// Read-only reference data as far as the engine is concerned; used for
/// grouping and labeling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub coordinator_id: Uuid,
    /// Display color for the project's bars (hex string, e.g. "#4682b4").
    pub color: String,
}

impl Project {
    pub fn new(name: impl Into<String>, coordinator_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            coordinator_id,
            color: "#4682b4".to_string(), // Steel blue
        }
    }
}
