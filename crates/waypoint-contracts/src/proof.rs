//! Resolution proofs: the recorded outcome of one token verification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::token::CapabilityToken;

/// Discriminator for the kind of claim a proof resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofType {
    CapabilityAttestation,
}

/// The immutable result of a single `verify_token` call.
///
/// `verification_notes` is always populated. On failure it names the first
/// check that failed and the token it failed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionProof {
    proof_type: ProofType,
    verified: bool,
    verification_notes: String,
    token: CapabilityToken,
    verified_at: DateTime<Utc>,
}

impl ResolutionProof {
    /// A proof recording a successful verification.
    pub fn accepted(
        token: CapabilityToken,
        notes: impl Into<String>,
        verified_at: DateTime<Utc>,
    ) -> Self {
        Self::build(true, token, notes.into(), verified_at)
    }

    /// A proof recording a failed verification.
    pub fn rejected(
        token: CapabilityToken,
        notes: impl Into<String>,
        verified_at: DateTime<Utc>,
    ) -> Self {
        Self::build(false, token, notes.into(), verified_at)
    }

    fn build(
        verified: bool,
        token: CapabilityToken,
        verification_notes: String,
        verified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            proof_type: ProofType::CapabilityAttestation,
            verified,
            verification_notes,
            token,
            verified_at,
        }
    }

    pub fn proof_type(&self) -> ProofType {
        self.proof_type
    }

    pub fn verified(&self) -> bool {
        self.verified
    }

    pub fn verification_notes(&self) -> &str {
        &self.verification_notes
    }

    pub fn token(&self) -> &CapabilityToken {
        &self.token
    }

    pub fn verified_at(&self) -> DateTime<Utc> {
        self.verified_at
    }
}
