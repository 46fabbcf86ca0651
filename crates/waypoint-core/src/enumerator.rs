//! Action set enumeration.
//!
//! Given a graph and a current state, produce the legal next actions:
//!
//! 1. Fetch the outgoing transitions of the state (O(out-degree)).
//! 2. Run the guard evaluator on each.
//! 3. Keep passing transitions as `TypedAction`s; log every excluded one.
//! 4. Sort by `(total_cost, transition_id)` ascending.
//!
//! The sort key is total, so the result does not depend on declaration
//! order. An empty result means "no legal next action" and is not an error.

use tracing::debug;

use waypoint_contracts::{
    action::TypedAction, capability::CapabilitySet, graph::ContractGraph, state::ContractState,
};

use crate::guard::evaluate_guard;

/// A transition the guard evaluator rejected, with the first failing reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub transition_id: String,
    pub source_state_id: String,
    pub reason: String,
}

/// Full result of one enumeration: the ordered legal actions plus every
/// exclusion, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    pub actions: Vec<TypedAction>,
    pub excluded: Vec<Exclusion>,
}

impl Enumeration {
    /// The exclusion recorded for `transition_id`, if it was guarded out.
    pub fn exclusion_for(&self, transition_id: &str) -> Option<&Exclusion> {
        self.excluded.iter().find(|e| e.transition_id == transition_id)
    }

    /// The action for `transition_id`, if it survived the guards.
    pub fn action_for(&self, transition_id: &str) -> Option<&TypedAction> {
        self.actions.iter().find(|a| a.transition_id == transition_id)
    }
}

/// The ordered legal next actions from `current_state`.
pub fn enumerate(
    graph: &ContractGraph,
    current_state: &ContractState,
    agent_capabilities: &CapabilitySet,
) -> Vec<TypedAction> {
    enumerate_detailed(graph, current_state, agent_capabilities).actions
}

/// Enumerate with no capabilities, the most restrictive evaluation.
pub fn enumerate_unprivileged(graph: &ContractGraph, current_state: &ContractState) -> Vec<TypedAction> {
    enumerate(graph, current_state, &CapabilitySet::default())
}

/// Like [`enumerate`], but also returns the exclusions.
pub fn enumerate_detailed(
    graph: &ContractGraph,
    current_state: &ContractState,
    agent_capabilities: &CapabilitySet,
) -> Enumeration {
    let outgoing = graph.get_outgoing_transitions(&current_state.node_id);
    let mut result = Enumeration {
        actions: Vec::with_capacity(outgoing.len()),
        excluded: Vec::new(),
    };

    for transition in outgoing {
        let eval = evaluate_guard(&transition.guard, current_state, agent_capabilities);
        if eval.passes {
            result.actions.push(TypedAction::from(transition));
            continue;
        }

        debug!(
            transition_id = %transition.transition_id,
            source_state_id = %transition.source_state_id,
            reason = %eval.reason,
            "transition excluded by guard"
        );
        result.excluded.push(Exclusion {
            transition_id: transition.transition_id.clone(),
            source_state_id: transition.source_state_id.clone(),
            reason: eval.reason,
        });
    }

    result.actions.sort_by(|a, b| {
        a.total_cost()
            .cmp(&b.total_cost())
            .then_with(|| a.transition_id.cmp(&b.transition_id))
    });

    debug!(
        state_id = %current_state.node_id,
        legal = result.actions.len(),
        excluded = result.excluded.len(),
        "enumerated action set"
    );

    result
}
