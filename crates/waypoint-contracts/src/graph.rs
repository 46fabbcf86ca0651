//! The read-only contract graph.
//!
//! `ContractGraph` owns every state and transition of one contract. It is
//! validated once at construction and never mutated afterwards, so a single
//! instance can be shared across threads (typically behind an `Arc`) with no
//! synchronization.
//!
//! Outgoing transitions are indexed per source state at construction time,
//! which keeps `get_outgoing_transitions` proportional to the out-degree of
//! the queried state.

use std::collections::HashMap;

use crate::{
    error::{WaypointError, WaypointResult},
    state::ContractState,
    transition::ContractTransition,
};

#[derive(Debug, Clone)]
pub struct ContractGraph {
    states: HashMap<String, ContractState>,
    transitions: Vec<ContractTransition>,
    by_id: HashMap<String, usize>,
    /// node_id -> transitions leaving it, in declaration order.
    outgoing: HashMap<String, Vec<ContractTransition>>,
}

impl ContractGraph {
    /// Build and validate a graph.
    ///
    /// # Errors
    ///
    /// Returns `WaypointError::GraphIntegrity` on a duplicate `node_id`, a
    /// duplicate `transition_id`, or a transition whose source or target is
    /// not a declared state.
    pub fn new(
        states: Vec<ContractState>,
        transitions: Vec<ContractTransition>,
    ) -> WaypointResult<Self> {
        let mut state_map = HashMap::with_capacity(states.len());
        for state in states {
            if state_map.contains_key(&state.node_id) {
                return Err(WaypointError::GraphIntegrity {
                    reason: format!("duplicate state '{}'", state.node_id),
                });
            }
            state_map.insert(state.node_id.clone(), state);
        }

        let mut by_id = HashMap::with_capacity(transitions.len());
        let mut outgoing: HashMap<String, Vec<ContractTransition>> = HashMap::new();

        for (idx, transition) in transitions.iter().enumerate() {
            if by_id.insert(transition.transition_id.clone(), idx).is_some() {
                return Err(WaypointError::GraphIntegrity {
                    reason: format!("duplicate transition '{}'", transition.transition_id),
                });
            }
            for endpoint in [&transition.source_state_id, &transition.target_state_id] {
                if !state_map.contains_key(endpoint) {
                    return Err(WaypointError::GraphIntegrity {
                        reason: format!(
                            "transition '{}' references undeclared state '{}'",
                            transition.transition_id, endpoint
                        ),
                    });
                }
            }
            outgoing
                .entry(transition.source_state_id.clone())
                .or_default()
                .push(transition.clone());
        }

        Ok(Self {
            states: state_map,
            transitions,
            by_id,
            outgoing,
        })
    }

    /// Transitions leaving `state_id`, in declaration order.
    ///
    /// An unknown state, like a terminal one, has no outgoing transitions.
    pub fn get_outgoing_transitions(&self, state_id: &str) -> &[ContractTransition] {
        self.outgoing
            .get(state_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn state(&self, state_id: &str) -> Option<&ContractState> {
        self.states.get(state_id)
    }

    pub fn transition(&self, transition_id: &str) -> Option<&ContractTransition> {
        self.by_id.get(transition_id).map(|&idx| &self.transitions[idx])
    }

    /// All states, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &ContractState> {
        self.states.values()
    }

    /// All transitions, in declaration order.
    pub fn transitions(&self) -> &[ContractTransition] {
        &self.transitions
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}
