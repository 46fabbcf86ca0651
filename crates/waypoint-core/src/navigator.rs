//! The Waypoint navigator: composes enumeration and token verification.
//!
//! The two subsystems never call each other. The navigator is the caller
//! that wires them together for a single requested move:
//!
//!   State → Outgoing? → Verify tokens → Enumerate → Decide → Audit
//!
//! The capability set handed to the enumerator is built exclusively from
//! tokens that verified. A capability an agent merely claims is never
//! enough to pass a guard.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use waypoint_contracts::{
    action::TypedAction,
    capability::{Capability, CapabilitySet},
    error::{WaypointError, WaypointResult},
    graph::ContractGraph,
    navigation::{NavigationDecision, NavigationOutcome, NavigationRecord},
    proof::ResolutionProof,
    state::ContractState,
    token::CapabilityToken,
};

use crate::{
    enumerator::{enumerate, enumerate_detailed},
    traits::{AuditWriter, CapabilityVerifier},
};

/// Drives navigation over one contract graph.
///
/// The navigator owns the trusted components (verifier and audit writer)
/// and shares the graph read-only. Construct one navigator per audit trail.
pub struct Navigator {
    graph: Arc<ContractGraph>,
    verifier: Box<dyn CapabilityVerifier>,
    audit: Box<dyn AuditWriter>,
    trail_id: String,
}

impl Navigator {
    /// Create a navigator with a freshly generated trail id.
    pub fn new(
        graph: Arc<ContractGraph>,
        verifier: Box<dyn CapabilityVerifier>,
        audit: Box<dyn AuditWriter>,
    ) -> Self {
        Self::with_trail_id(graph, verifier, audit, uuid::Uuid::new_v4().to_string())
    }

    pub fn with_trail_id(
        graph: Arc<ContractGraph>,
        verifier: Box<dyn CapabilityVerifier>,
        audit: Box<dyn AuditWriter>,
        trail_id: impl Into<String>,
    ) -> Self {
        Self {
            graph,
            verifier,
            audit,
            trail_id: trail_id.into(),
        }
    }

    pub fn trail_id(&self) -> &str {
        &self.trail_id
    }

    pub fn graph(&self) -> &ContractGraph {
        &self.graph
    }

    /// The legal next actions from `state_id` for an already-trusted
    /// capability set.
    ///
    /// # Errors
    ///
    /// Returns `WaypointError::UnknownState` if the graph has no such state.
    pub fn available_actions(
        &self,
        state_id: &str,
        capabilities: &CapabilitySet,
    ) -> WaypointResult<Vec<TypedAction>> {
        let state = self.lookup_state(state_id)?;
        Ok(enumerate(&self.graph, state, capabilities))
    }

    /// Attempt to take `transition_id` from `state_id`, presenting `tokens`
    /// as evidence for the capabilities its guard requires.
    ///
    /// # Pipeline
    ///
    /// 1. Resolve the current state; unknown → `Err(UnknownState)`
    /// 2. The transition must leave this state; otherwise → `Denied`
    /// 3. For each capability the guard requires (sorted), verify presented
    ///    tokens that claim it until one verifies; every attempt yields a proof
    /// 4. Enumerate with the verified capabilities only
    /// 5. Transition survives → `Advanced`; else → `Denied` with the guard's
    ///    first-failure reason
    /// 6. Audit the decision; finalize the trail on a terminal target
    ///
    /// # Errors
    ///
    /// Unknown states, key-provider failures and audit write failures are
    /// errors. A denied move is an `Ok(NavigationOutcome::Denied)`.
    pub fn advance(
        &self,
        state_id: &str,
        transition_id: &str,
        tokens: &[CapabilityToken],
    ) -> WaypointResult<NavigationOutcome> {
        let state = self.lookup_state(state_id)?;

        debug!(
            trail_id = %self.trail_id,
            state_id = %state_id,
            transition_id = %transition_id,
            presented_tokens = tokens.len(),
            "navigation request"
        );

        // ── Step 1: The transition must be an outgoing edge of this state ────
        let Some(transition) = self
            .graph
            .get_outgoing_transitions(state_id)
            .iter()
            .find(|t| t.transition_id == transition_id)
        else {
            let reason = format!(
                "transition '{}' is not an outgoing transition of state '{}'",
                transition_id, state_id
            );
            warn!(trail_id = %self.trail_id, %reason, "navigation denied");
            return self.record_denial(state_id, transition_id, reason, Vec::new());
        };

        // ── Step 2: Resolve the guard's capabilities through the verifier ────
        let mut verified = CapabilitySet::default();
        let mut proofs = Vec::new();
        for capability in &transition.guard.required_capabilities {
            let mut claimed = false;
            for token in tokens.iter().filter(|t| t.claims(capability)) {
                claimed = true;
                let proof = self.verifier.verify_token(token, capability)?;
                let accepted = proof.verified();
                proofs.push(proof);
                if accepted {
                    verified.grant(Capability::new(capability.as_str()));
                    break;
                }
            }
            if !claimed {
                debug!(
                    trail_id = %self.trail_id,
                    capability = %capability,
                    "no presented token claims capability"
                );
            }
        }

        // ── Step 3: Enumerate with verified capabilities only ────────────────
        let enumeration = enumerate_detailed(&self.graph, state, &verified);

        if let Some(action) = enumeration.action_for(transition_id) {
            let action = action.clone();
            let target_state_id = action.target_state_id.clone();
            self.record(
                state_id,
                transition_id,
                NavigationDecision::Advanced,
                format!("advanced to '{}'", target_state_id),
                &proofs,
            )?;

            info!(
                trail_id = %self.trail_id,
                transition_id = %transition_id,
                target_state_id = %target_state_id,
                "transition taken"
            );

            if self
                .graph
                .state(&target_state_id)
                .is_some_and(|s| s.is_terminal)
            {
                info!(trail_id = %self.trail_id, "terminal state reached, finalizing audit");
                self.audit.finalize(&self.trail_id)?;
            }

            return Ok(NavigationOutcome::Advanced {
                action,
                target_state_id,
                proofs,
            });
        }

        let reason = enumeration
            .exclusion_for(transition_id)
            .map(|e| e.reason.clone())
            .unwrap_or_else(|| format!("transition '{}' was not enumerated", transition_id));
        warn!(
            trail_id = %self.trail_id,
            transition_id = %transition_id,
            %reason,
            "navigation denied"
        );
        self.record_denial(state_id, transition_id, reason, proofs)
    }

    fn lookup_state(&self, state_id: &str) -> WaypointResult<&ContractState> {
        self.graph
            .state(state_id)
            .ok_or_else(|| WaypointError::UnknownState {
                state_id: state_id.to_string(),
            })
    }

    fn record_denial(
        &self,
        state_id: &str,
        transition_id: &str,
        reason: String,
        proofs: Vec<ResolutionProof>,
    ) -> WaypointResult<NavigationOutcome> {
        self.record(
            state_id,
            transition_id,
            NavigationDecision::Denied,
            reason.clone(),
            &proofs,
        )?;
        Ok(NavigationOutcome::Denied { reason, proofs })
    }

    fn record(
        &self,
        state_id: &str,
        transition_id: &str,
        decision: NavigationDecision,
        reason: String,
        proofs: &[ResolutionProof],
    ) -> WaypointResult<()> {
        let record = NavigationRecord {
            state_id: state_id.to_string(),
            transition_id: transition_id.to_string(),
            decision,
            reason,
            proofs: proofs.to_vec(),
            timestamp: Utc::now(),
        };
        self.audit.write(&record)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
