//! Navigation outcomes and the records written to the audit trail.
//!
//! `NavigationOutcome` is what the navigator returns to its caller for each
//! requested move. `NavigationRecord` is what gets appended to the audit
//! trail, one per request, whether the move was taken or not.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{action::TypedAction, proof::ResolutionProof};

/// The result of asking the navigator to take one transition.
///
/// Neither variant is an error: a denied move is an ordinary decision that
/// the caller must surface, not a fault to be handled generically.
#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    /// The transition was legal for the verified capabilities.
    Advanced {
        /// The action that was taken.
        action: TypedAction,
        /// The state the contract is now in.
        target_state_id: String,
        /// One proof per capability the guard required.
        proofs: Vec<ResolutionProof>,
    },

    /// The transition was not legal.
    Denied {
        /// The first violated constraint, or why the move was not eligible.
        reason: String,
        /// Proofs produced while resolving the guard's capabilities, if any.
        proofs: Vec<ResolutionProof>,
    },
}

impl NavigationOutcome {
    pub fn is_advanced(&self) -> bool {
        matches!(self, NavigationOutcome::Advanced { .. })
    }

    pub fn proofs(&self) -> &[ResolutionProof] {
        match self {
            NavigationOutcome::Advanced { proofs, .. } | NavigationOutcome::Denied { proofs, .. } => {
                proofs
            }
        }
    }
}

/// Audit-trail form of the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationDecision {
    Advanced,
    Denied,
}

/// An immutable record of one navigation request, written to the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationRecord {
    /// The state the request was made from.
    pub state_id: String,
    /// The transition the agent asked to take.
    pub transition_id: String,
    pub decision: NavigationDecision,
    /// Denial reason, or a short description of the move taken.
    pub reason: String,
    /// Every resolution proof produced for this request.
    pub proofs: Vec<ResolutionProof>,
    /// Wall-clock time the record was created (UTC).
    pub timestamp: DateTime<Utc>,
}
