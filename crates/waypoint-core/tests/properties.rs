//! Property tests for guard evaluation and action enumeration.

use std::collections::BTreeSet;

use proptest::prelude::*;

use waypoint_contracts::{
    capability::CapabilitySet,
    graph::ContractGraph,
    state::ContractState,
    transition::{ContractTransition, TransitionCost, TransitionGuard},
};
use waypoint_core::{enumerate, evaluate_guard};

const UNIVERSE: [&str; 6] = ["admin", "cache.redis", "editor", "publisher", "reviewer", "viewer"];

fn capability_subset() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::sample::subsequence(UNIVERSE.to_vec(), 0..=UNIVERSE.len())
        .prop_map(|caps| caps.into_iter().map(str::to_string).collect())
}

fn to_set(caps: &BTreeSet<String>) -> CapabilitySet {
    caps.iter().map(String::as_str).collect()
}

/// A fan of transitions `t00..tNN` out of `s`, with the given costs.
fn fan(costs: &[(u64, u64)], reversed: bool) -> ContractGraph {
    let mut transitions: Vec<ContractTransition> = costs
        .iter()
        .enumerate()
        .map(|(i, &(diff, latency))| {
            ContractTransition::new(format!("t{i:02}"), "edge", "s", "t")
                .with_cost(TransitionCost::new(diff, latency))
        })
        .collect();
    if reversed {
        transitions.reverse();
    }
    ContractGraph::new(
        vec![ContractState::new("s", "v1", 1), ContractState::new("t", "v1", 1)],
        transitions,
    )
    .unwrap()
}

proptest! {
    /// If a capability guard passes under C1, it passes under any C2 ⊇ C1.
    #[test]
    fn capability_guard_is_monotone(
        required in capability_subset(),
        c1 in capability_subset(),
        extra in capability_subset(),
    ) {
        let guard = TransitionGuard {
            required_capabilities: required,
            ..TransitionGuard::default()
        };
        let state = ContractState::new("s", "v1", 1);
        let c2: BTreeSet<String> = c1.union(&extra).cloned().collect();

        if evaluate_guard(&guard, &state, &to_set(&c1)).passes {
            prop_assert!(evaluate_guard(&guard, &state, &to_set(&c2)).passes);
        }
    }

    /// An unconstrained guard passes for every capability set, including none.
    #[test]
    fn open_guard_always_passes(caps in capability_subset(), tier in 0u32..100) {
        let state = ContractState::new("s", "v7", tier);
        prop_assert!(evaluate_guard(&TransitionGuard::open(), &state, &to_set(&caps)).passes);
    }

    /// Output is sorted by (total_cost, transition_id) and does not depend on
    /// declaration order.
    #[test]
    fn enumeration_is_sorted_and_order_independent(
        costs in proptest::collection::vec((0u64..20, 0u64..20), 0..12),
    ) {
        let forward = fan(&costs, false);
        let backward = fan(&costs, true);
        let from_forward = enumerate(&forward, forward.state("s").unwrap(), &CapabilitySet::default());
        let from_backward = enumerate(&backward, backward.state("s").unwrap(), &CapabilitySet::default());

        prop_assert_eq!(from_forward.len(), costs.len());
        for pair in from_forward.windows(2) {
            let key_a = (pair[0].total_cost(), &pair[0].transition_id);
            let key_b = (pair[1].total_cost(), &pair[1].transition_id);
            prop_assert!(key_a <= key_b);
        }

        let ids_forward: Vec<&str> = from_forward.iter().map(|a| a.transition_id.as_str()).collect();
        let ids_backward: Vec<&str> = from_backward.iter().map(|a| a.transition_id.as_str()).collect();
        prop_assert_eq!(ids_forward, ids_backward);
    }

    /// A state with no outgoing transitions never yields actions.
    #[test]
    fn sink_state_yields_nothing(caps in capability_subset()) {
        let graph = fan(&[(1, 1), (2, 2)], false);
        prop_assert!(enumerate(&graph, graph.state("t").unwrap(), &to_set(&caps)).is_empty());
    }
}
