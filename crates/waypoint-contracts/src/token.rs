//! Capability tokens: signed attestations of what an agent may do.
//!
//! A token is a pure value object. Construction checks structure only
//! (lengths, non-empty fields); every security decision about a token
//! (expiry, trust root, signature, coverage) belongs to the verifier.
//!
//! `expires_at > issued_at` is deliberately not checked here. A token that
//! is born expired constructs fine and is rejected at verification time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{WaypointError, WaypointResult};

/// Upper bound on `subject_node_id`, in characters.
pub const MAX_SUBJECT_LEN: usize = 256;
/// Upper bound on `issuer_domain`, in characters.
pub const MAX_ISSUER_DOMAIN_LEN: usize = 128;

/// An immutable, signed capability attestation.
///
/// Fields are private so a `CapabilityToken` can only exist in a
/// structurally valid form; deserialization goes through the same checks
/// as [`CapabilityToken::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCapabilityToken")]
pub struct CapabilityToken {
    token_id: Uuid,
    subject_node_id: String,
    issuer_domain: String,
    capabilities: Vec<String>,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    /// base64url-encoded raw public key bytes.
    issuer_public_key: String,
    /// base64url-encoded raw signature bytes.
    signature: String,
}

/// Unvalidated wire shape of a token.
#[derive(Debug, Clone, Deserialize)]
struct RawCapabilityToken {
    token_id: Uuid,
    subject_node_id: String,
    issuer_domain: String,
    capabilities: Vec<String>,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    issuer_public_key: String,
    signature: String,
}

impl TryFrom<RawCapabilityToken> for CapabilityToken {
    type Error = WaypointError;

    fn try_from(raw: RawCapabilityToken) -> WaypointResult<Self> {
        Self::new(
            raw.token_id,
            raw.subject_node_id,
            raw.issuer_domain,
            raw.capabilities,
            raw.issued_at,
            raw.expires_at,
            raw.issuer_public_key,
            raw.signature,
        )
    }
}

impl CapabilityToken {
    /// Build a token, enforcing its structural invariants.
    ///
    /// # Errors
    ///
    /// Returns `WaypointError::InvalidToken` when `capabilities` is empty or
    /// contains an empty entry, when `subject_node_id` or `issuer_domain` is
    /// empty or over its length limit, or when the key or signature string
    /// is empty.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        token_id: Uuid,
        subject_node_id: impl Into<String>,
        issuer_domain: impl Into<String>,
        capabilities: Vec<String>,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        issuer_public_key: impl Into<String>,
        signature: impl Into<String>,
    ) -> WaypointResult<Self> {
        let subject_node_id = subject_node_id.into();
        let issuer_domain = issuer_domain.into();
        let issuer_public_key = issuer_public_key.into();
        let signature = signature.into();

        check_length("subject_node_id", &subject_node_id, MAX_SUBJECT_LEN)?;
        check_length("issuer_domain", &issuer_domain, MAX_ISSUER_DOMAIN_LEN)?;

        if capabilities.is_empty() {
            return Err(invalid("capabilities must contain at least one entry"));
        }
        if capabilities.iter().any(String::is_empty) {
            return Err(invalid("capabilities must not contain empty identifiers"));
        }
        if issuer_public_key.is_empty() {
            return Err(invalid("issuer_public_key must not be empty"));
        }
        if signature.is_empty() {
            return Err(invalid("signature must not be empty"));
        }

        Ok(Self {
            token_id,
            subject_node_id,
            issuer_domain,
            capabilities,
            issued_at,
            expires_at,
            issuer_public_key,
            signature,
        })
    }

    pub fn token_id(&self) -> Uuid {
        self.token_id
    }

    pub fn subject_node_id(&self) -> &str {
        &self.subject_node_id
    }

    pub fn issuer_domain(&self) -> &str {
        &self.issuer_domain
    }

    /// Attested capabilities, in issuance order.
    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn issuer_public_key(&self) -> &str {
        &self.issuer_public_key
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// True if the token claims `capability`. Says nothing about validity.
    pub fn claims(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

fn check_length(field: &str, value: &str, max: usize) -> WaypointResult<()> {
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(invalid(&format!(
            "{field} must be between 1 and {max} characters, got {len}"
        )));
    }
    Ok(())
}

fn invalid(reason: &str) -> WaypointError {
    WaypointError::InvalidToken {
        reason: reason.to_string(),
    }
}
