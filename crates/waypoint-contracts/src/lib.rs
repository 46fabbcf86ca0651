//! # waypoint-contracts
//!
//! Shared types for the Waypoint contract-navigation engine.
//!
//! Every other crate in the workspace imports from here. This crate holds
//! data definitions, the read-only [`graph::ContractGraph`], and the error
//! type. It performs no I/O and makes no security decisions.

pub mod action;
pub mod capability;
pub mod error;
pub mod graph;
pub mod navigation;
pub mod proof;
pub mod state;
pub mod token;
pub mod transition;

pub use action::TypedAction;
pub use capability::{Capability, CapabilitySet};
pub use error::{WaypointError, WaypointResult};
pub use graph::ContractGraph;
pub use navigation::{NavigationDecision, NavigationOutcome, NavigationRecord};
pub use proof::{ProofType, ResolutionProof};
pub use state::ContractState;
pub use token::CapabilityToken;
pub use transition::{ContractTransition, TransitionCost, TransitionGuard};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn token_with(
        subject: &str,
        domain: &str,
        capabilities: Vec<String>,
    ) -> WaypointResult<CapabilityToken> {
        let issued = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        CapabilityToken::new(
            Uuid::new_v4(),
            subject,
            domain,
            capabilities,
            issued,
            issued + Duration::hours(1),
            "a2V5",
            "c2ln",
        )
    }

    // ── CapabilitySet ────────────────────────────────────────────────────────

    #[test]
    fn capability_set_grant_and_has() {
        let mut caps = CapabilitySet::default();
        assert!(!caps.has("editor"));

        caps.grant(Capability::new("editor"));
        assert!(caps.has("editor"));
        assert!(!caps.has("viewer"));

        // Duplicate grants collapse.
        caps.grant(Capability::new("editor"));
        assert_eq!(caps.len(), 1);
    }

    #[test]
    fn capability_set_iterates_sorted() {
        let caps: CapabilitySet = ["viewer", "admin", "editor"].into_iter().collect();
        let names: Vec<&str> = caps.all().map(Capability::as_str).collect();
        assert_eq!(names, vec!["admin", "editor", "viewer"]);
    }

    #[test]
    fn capability_set_subset() {
        let small: CapabilitySet = ["editor"].into_iter().collect();
        let big: CapabilitySet = ["editor", "viewer"].into_iter().collect();
        assert!(small.is_subset(&big));
        assert!(!big.is_subset(&small));
        assert!(CapabilitySet::default().is_subset(&small));
    }

    // ── TypedAction ──────────────────────────────────────────────────────────

    #[test]
    fn typed_action_identity_is_transition_id() {
        let a = TypedAction::from(
            &ContractTransition::new("publish", "Publish", "draft", "live")
                .with_cost(TransitionCost::new(1, 2)),
        );
        let b = TypedAction::from(
            &ContractTransition::new("publish", "Publish (v2)", "review", "live")
                .with_cost(TransitionCost::new(9, 9)),
        );
        assert_eq!(a, b);

        let set: HashSet<TypedAction> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn typed_action_signatures_and_cost() {
        let action = TypedAction::from(
            &ContractTransition::new("t", "T", "a", "b")
                .with_types(vec!["Draft".into(), "Reviewer".into()], vec![])
                .with_cost(TransitionCost::new(u64::MAX, 1)),
        );
        assert_eq!(action.input_type_signature, "(Draft, Reviewer)");
        assert_eq!(action.output_type_signature, "()");
        assert_eq!(action.total_cost(), u128::from(u64::MAX) + 1);
    }

    // ── TransitionGuard ──────────────────────────────────────────────────────

    #[test]
    fn default_guard_is_unconstrained() {
        assert!(TransitionGuard::open().is_unconstrained());
        assert!(!TransitionGuard::open().max_policy_tier(2).is_unconstrained());
    }

    // ── ContractGraph ────────────────────────────────────────────────────────

    fn states() -> Vec<ContractState> {
        vec![
            ContractState::new("draft", "v1", 1),
            ContractState::new("review", "v1", 2),
            ContractState::new("published", "v1", 3).terminal(),
        ]
    }

    #[test]
    fn graph_indexes_outgoing_in_declaration_order() {
        let graph = ContractGraph::new(
            states(),
            vec![
                ContractTransition::new("submit", "Submit", "draft", "review"),
                ContractTransition::new("approve", "Approve", "review", "published"),
                ContractTransition::new("publish", "Publish", "draft", "published"),
            ],
        )
        .unwrap();

        let ids: Vec<&str> = graph
            .get_outgoing_transitions("draft")
            .iter()
            .map(|t| t.transition_id.as_str())
            .collect();
        assert_eq!(ids, vec!["submit", "publish"]);
        assert!(graph.get_outgoing_transitions("published").is_empty());
        assert!(graph.get_outgoing_transitions("nowhere").is_empty());
        assert_eq!(graph.transition("approve").unwrap().target_state_id, "published");
        assert_eq!(graph.state_count(), 3);
        assert_eq!(graph.transition_count(), 3);
    }

    #[test]
    fn graph_rejects_dangling_reference() {
        let err = ContractGraph::new(
            states(),
            vec![ContractTransition::new("archive", "Archive", "draft", "archived")],
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("archive"), "{msg}");
        assert!(msg.contains("archived"), "{msg}");
    }

    #[test]
    fn graph_rejects_duplicates() {
        let mut dup_states = states();
        dup_states.push(ContractState::new("draft", "v2", 1));
        assert!(matches!(
            ContractGraph::new(dup_states, vec![]),
            Err(WaypointError::GraphIntegrity { .. })
        ));

        let dup_transitions = vec![
            ContractTransition::new("submit", "Submit", "draft", "review"),
            ContractTransition::new("submit", "Submit again", "review", "published"),
        ];
        assert!(matches!(
            ContractGraph::new(states(), dup_transitions),
            Err(WaypointError::GraphIntegrity { .. })
        ));
    }

    // ── CapabilityToken ──────────────────────────────────────────────────────

    #[test]
    fn token_requires_capabilities() {
        let err = token_with("node-1", "example.org", vec![]).unwrap_err();
        assert!(err.to_string().contains("at least one"));

        let err = token_with("node-1", "example.org", vec![String::new()]).unwrap_err();
        assert!(matches!(err, WaypointError::InvalidToken { .. }));
    }

    #[test]
    fn token_length_bounds() {
        assert!(token_with("", "example.org", vec!["a".into()]).is_err());
        assert!(token_with(&"n".repeat(256), "example.org", vec!["a".into()]).is_ok());
        assert!(token_with(&"n".repeat(257), "example.org", vec!["a".into()]).is_err());
        assert!(token_with("node", &"d".repeat(128), vec!["a".into()]).is_ok());
        assert!(token_with("node", &"d".repeat(129), vec!["a".into()]).is_err());
    }

    #[test]
    fn token_born_expired_still_constructs() {
        let issued = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let token = CapabilityToken::new(
            Uuid::new_v4(),
            "node",
            "example.org",
            vec!["a".into()],
            issued,
            issued - Duration::seconds(1),
            "a2V5",
            "c2ln",
        );
        assert!(token.is_ok());
    }

    #[test]
    fn token_deserialization_is_validated() {
        let json = serde_json::json!({
            "token_id": Uuid::nil(),
            "subject_node_id": "node",
            "issuer_domain": "example.org",
            "capabilities": [],
            "issued_at": "2025-01-01T00:00:00Z",
            "expires_at": "2025-01-02T00:00:00Z",
            "issuer_public_key": "a2V5",
            "signature": "c2ln"
        });
        assert!(serde_json::from_value::<CapabilityToken>(json).is_err());
    }

    // ── ResolutionProof ──────────────────────────────────────────────────────

    #[test]
    fn proof_constructors_set_verified_flag() {
        let token = token_with("node", "example.org", vec!["a".into()]).unwrap();
        let now = Utc::now();
        let ok = ResolutionProof::accepted(token.clone(), "fine", now);
        let bad = ResolutionProof::rejected(token, "expired", now);
        assert!(ok.verified());
        assert!(!bad.verified());
        assert_eq!(bad.verification_notes(), "expired");
        assert_eq!(ok.proof_type(), ProofType::CapabilityAttestation);
    }

    // ── WaypointError display messages ───────────────────────────────────────

    #[test]
    fn error_display_messages() {
        let err = WaypointError::UnknownState { state_id: "limbo".into() };
        assert_eq!(err.to_string(), "unknown state 'limbo'");

        let err = WaypointError::KeyProvider {
            domain: "example.org".into(),
            reason: "timeout".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("example.org"));
        assert!(msg.contains("timeout"));
    }
}
