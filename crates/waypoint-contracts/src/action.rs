//! Typed actions: the presentation form of a legal transition.
//!
//! A `TypedAction` is built fresh for every enumeration and handed to the
//! caller. It is never stored in the graph. Two actions are the same action
//! if and only if they share a `transition_id`.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::transition::ContractTransition;

/// A legal next move, flattened for external consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypedAction {
    pub transition_id: String,
    pub label: String,
    pub source_state_id: String,
    pub target_state_id: String,
    /// Input types rendered as `(A, B)`; `()` when the transition takes none.
    pub input_type_signature: String,
    /// Output types rendered as `(A, B)`; `()` when the transition yields none.
    pub output_type_signature: String,
    pub diff_size_estimate: u64,
    pub latency_estimate_ms: u64,
}

impl TypedAction {
    /// Sort key used by the enumerator.
    pub fn total_cost(&self) -> u128 {
        u128::from(self.diff_size_estimate) + u128::from(self.latency_estimate_ms)
    }
}

impl From<&ContractTransition> for TypedAction {
    fn from(t: &ContractTransition) -> Self {
        Self {
            transition_id: t.transition_id.clone(),
            label: t.label.clone(),
            source_state_id: t.source_state_id.clone(),
            target_state_id: t.target_state_id.clone(),
            input_type_signature: type_signature(&t.input_types),
            output_type_signature: type_signature(&t.output_types),
            diff_size_estimate: t.cost.diff_size_estimate,
            latency_estimate_ms: t.cost.latency_estimate_ms,
        }
    }
}

impl PartialEq for TypedAction {
    fn eq(&self, other: &Self) -> bool {
        self.transition_id == other.transition_id
    }
}

impl Eq for TypedAction {}

impl Hash for TypedAction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.transition_id.hash(state);
    }
}

fn type_signature(types: &[String]) -> String {
    format!("({})", types.join(", "))
}
