//! Contract states: the nodes of a contract graph.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A node in a contract graph.
///
/// States are created once when the graph is built and never mutated.
/// `metadata` is only ever inspected for key presence by transition guards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractState {
    /// Unique identifier within the graph (e.g. "draft", "published").
    pub node_id: String,
    /// Opaque version token; guards compare it by exact equality.
    pub schema_version: String,
    /// Restrictiveness ranking. Higher tiers are more restrictive.
    pub policy_tier: u32,
    /// Free-form annotations consulted by precondition checks.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Informational only; the enumerator does not special-case it.
    #[serde(default)]
    pub is_terminal: bool,
}

impl ContractState {
    /// Build a non-terminal state with no metadata.
    pub fn new(
        node_id: impl Into<String>,
        schema_version: impl Into<String>,
        policy_tier: u32,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            schema_version: schema_version.into(),
            policy_tier,
            metadata: BTreeMap::new(),
            is_terminal: false,
        }
    }

    /// Builder-style helper to attach one metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Builder-style helper to mark the state terminal.
    pub fn terminal(mut self) -> Self {
        self.is_terminal = true;
        self
    }
}
