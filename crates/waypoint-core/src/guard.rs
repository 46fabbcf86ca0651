//! Guard evaluation.
//!
//! `evaluate_guard` is a pure function: no I/O, no mutation, no clock. The
//! checks run in a fixed order and stop at the first violation, so the
//! reported reason always names the first failing constraint:
//!
//! 1. capability coverage
//! 2. exact schema version
//! 3. policy tier ceiling
//! 4. precondition metadata keys (presence only)
//!
//! Reason strings list identifiers in sorted order so that two evaluations
//! over the same inputs produce the same bytes.

use waypoint_contracts::{
    capability::CapabilitySet, state::ContractState, transition::TransitionGuard,
};

/// Reason reported when every check passes.
pub const GUARD_SATISFIED: &str = "guard satisfied";

/// The result of evaluating one guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardEvaluation {
    pub passes: bool,
    pub reason: String,
}

impl GuardEvaluation {
    fn pass() -> Self {
        Self {
            passes: true,
            reason: GUARD_SATISFIED.to_string(),
        }
    }

    fn fail(reason: String) -> Self {
        Self { passes: false, reason }
    }
}

/// Evaluate `guard` against `current_state` and `agent_capabilities`.
pub fn evaluate_guard(
    guard: &TransitionGuard,
    current_state: &ContractState,
    agent_capabilities: &CapabilitySet,
) -> GuardEvaluation {
    // BTreeSet iteration is sorted, so `missing` is too.
    let missing: Vec<&str> = guard
        .required_capabilities
        .iter()
        .filter(|cap| !agent_capabilities.has(cap))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        return GuardEvaluation::fail(format!(
            "missing required capabilities: [{}]",
            missing.join(", ")
        ));
    }

    if let Some(required) = &guard.required_schema_version {
        if *required != current_state.schema_version {
            return GuardEvaluation::fail(format!(
                "schema version mismatch: guard requires '{}', state '{}' has '{}'",
                required, current_state.node_id, current_state.schema_version
            ));
        }
    }

    if let Some(ceiling) = guard.policy_tier_max {
        if current_state.policy_tier > ceiling {
            return GuardEvaluation::fail(format!(
                "policy tier {} of state '{}' exceeds ceiling {}",
                current_state.policy_tier, current_state.node_id, ceiling
            ));
        }
    }

    let absent: Vec<&str> = guard
        .precondition_keys
        .iter()
        .filter(|key| !current_state.metadata.contains_key(key.as_str()))
        .map(String::as_str)
        .collect();
    if !absent.is_empty() {
        return GuardEvaluation::fail(format!(
            "missing precondition metadata keys: [{}]",
            absent.join(", ")
        ));
    }

    GuardEvaluation::pass()
}
