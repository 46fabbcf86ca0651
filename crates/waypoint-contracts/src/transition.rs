//! Transitions, their cost estimates, and the guards that gate them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A predicate specification attached to every transition.
///
/// Every field is optional; a guard with all fields empty always passes.
/// Sets are ordered so that any reason string derived from them is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionGuard {
    /// Every listed capability must be held by the agent.
    #[serde(default)]
    pub required_capabilities: BTreeSet<String>,
    /// Exact-match constraint on the current state's `schema_version`.
    #[serde(default)]
    pub required_schema_version: Option<String>,
    /// Ceiling on the current state's `policy_tier` (inclusive).
    #[serde(default)]
    pub policy_tier_max: Option<u32>,
    /// Keys that must be present in the current state's metadata.
    #[serde(default)]
    pub precondition_keys: BTreeSet<String>,
}

impl TransitionGuard {
    /// A guard that passes for every state and capability set.
    pub fn open() -> Self {
        Self::default()
    }

    /// True when no constraint is set.
    pub fn is_unconstrained(&self) -> bool {
        self.required_capabilities.is_empty()
            && self.required_schema_version.is_none()
            && self.policy_tier_max.is_none()
            && self.precondition_keys.is_empty()
    }

    pub fn require_capability(mut self, capability: impl Into<String>) -> Self {
        self.required_capabilities.insert(capability.into());
        self
    }

    pub fn require_schema_version(mut self, version: impl Into<String>) -> Self {
        self.required_schema_version = Some(version.into());
        self
    }

    pub fn max_policy_tier(mut self, tier: u32) -> Self {
        self.policy_tier_max = Some(tier);
        self
    }

    pub fn require_precondition(mut self, key: impl Into<String>) -> Self {
        self.precondition_keys.insert(key.into());
        self
    }
}

/// Estimated cost of taking a transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionCost {
    pub diff_size_estimate: u64,
    pub latency_estimate_ms: u64,
}

impl TransitionCost {
    pub fn new(diff_size_estimate: u64, latency_estimate_ms: u64) -> Self {
        Self { diff_size_estimate, latency_estimate_ms }
    }

    /// `diff_size_estimate + latency_estimate_ms`, widened so it cannot overflow.
    pub fn total(&self) -> u128 {
        u128::from(self.diff_size_estimate) + u128::from(self.latency_estimate_ms)
    }
}

/// A directed, guarded edge between two states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTransition {
    /// Unique identifier within the graph.
    pub transition_id: String,
    /// Human-readable name of the move (e.g. "Publish draft").
    pub label: String,
    pub source_state_id: String,
    pub target_state_id: String,
    /// Ordered type names the transition consumes.
    #[serde(default)]
    pub input_types: Vec<String>,
    /// Ordered type names the transition produces.
    #[serde(default)]
    pub output_types: Vec<String>,
    #[serde(default)]
    pub cost: TransitionCost,
    #[serde(default)]
    pub guard: TransitionGuard,
}

impl ContractTransition {
    /// Build an unguarded, zero-cost transition.
    pub fn new(
        transition_id: impl Into<String>,
        label: impl Into<String>,
        source_state_id: impl Into<String>,
        target_state_id: impl Into<String>,
    ) -> Self {
        Self {
            transition_id: transition_id.into(),
            label: label.into(),
            source_state_id: source_state_id.into(),
            target_state_id: target_state_id.into(),
            input_types: Vec::new(),
            output_types: Vec::new(),
            cost: TransitionCost::default(),
            guard: TransitionGuard::default(),
        }
    }

    pub fn with_cost(mut self, cost: TransitionCost) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_guard(mut self, guard: TransitionGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn with_types(mut self, input_types: Vec<String>, output_types: Vec<String>) -> Self {
        self.input_types = input_types;
        self.output_types = output_types;
        self
    }
}
