//! Capability token verifier.
//!
//! `TokenVerifier` implements the `CapabilityVerifier` trait from
//! `waypoint-core`. Verification is a single, fail-closed pass; the first
//! failing check ends it with a rejected proof:
//!
//! 1. **Expiration**: `now >= expires_at` fails.
//! 2. **Clock skew**: `issued_at > now` fails, whatever the signature says.
//! 3. **Trust root**: the key provider must return a non-empty key.
//! 4. **Key decoding**: `issuer_public_key` must be valid base64url.
//! 5. **Trust-root binding**: the embedded key must byte-equal the trust
//!    root. This runs before the signature check so that a token signed
//!    with an attacker's own key pair, and claiming a trusted domain, is
//!    rejected even though its signature is self-consistent.
//! 6. **Signature**: Ed25519 over the canonical payload, using the trust
//!    root bytes.
//! 7. **Coverage**: `required_capability` must be attested.
//!
//! Ordinary failures never become `Err`. Only a key provider that fails to
//! answer propagates as an error.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info, warn};

use waypoint_contracts::{
    error::WaypointResult, proof::ResolutionProof, token::CapabilityToken,
};
use waypoint_core::traits::{CapabilityVerifier, KeyProvider};

use crate::{
    canonical::canonical_payload,
    signature::{decode_base64url, verify_ed25519, SignatureCheck},
};

/// Verifies capability tokens against per-domain trust roots.
pub struct TokenVerifier {
    key_provider: Box<dyn KeyProvider>,
}

impl TokenVerifier {
    /// Create a verifier backed by `key_provider`.
    pub fn new(key_provider: Box<dyn KeyProvider>) -> Self {
        Self { key_provider }
    }

    /// Verify `token` for `required_capability` as of `now`.
    ///
    /// Identical `(token, required_capability, now, trust root)` inputs
    /// always produce the same `verified` value. The key provider is called
    /// at most once.
    ///
    /// # Errors
    ///
    /// Returns the key provider's error if it fails to answer. Every other
    /// outcome is an `Ok` proof.
    pub fn verify_token_at(
        &self,
        token: &CapabilityToken,
        required_capability: &str,
        now: DateTime<Utc>,
    ) -> WaypointResult<ResolutionProof> {
        let token_id = token.token_id();
        let domain = token.issuer_domain();

        debug!(
            token_id = %token_id,
            issuer_domain = %domain,
            required_capability = %required_capability,
            "verifying capability token"
        );

        // ── Step 1: Expiration ────────────────────────────────────────────────
        if now >= token.expires_at() {
            return Ok(reject(
                token,
                now,
                format!("token {} expired at {}", token_id, rfc3339(token.expires_at())),
            ));
        }

        // ── Step 2: Clock skew ────────────────────────────────────────────────
        if token.issued_at() > now {
            return Ok(reject(
                token,
                now,
                format!(
                    "token {} was issued in the future ({}, verifier time {})",
                    token_id,
                    rfc3339(token.issued_at()),
                    rfc3339(now)
                ),
            ));
        }

        // ── Step 3: Trust root lookup ─────────────────────────────────────────
        let trust_root = match self.key_provider.get_domain_trust_root(domain)? {
            Some(root) if !root.is_empty() => root,
            _ => {
                return Ok(reject(
                    token,
                    now,
                    format!("no trust root for domain '{}' (token {})", domain, token_id),
                ));
            }
        };

        // ── Step 4: Embedded key decoding ─────────────────────────────────────
        let embedded_key = match decode_base64url(token.issuer_public_key()) {
            Ok(bytes) => bytes,
            Err(e) => {
                return Ok(reject(
                    token,
                    now,
                    format!(
                        "token {} issuer_public_key is not valid base64url: {}",
                        token_id, e
                    ),
                ));
            }
        };

        // ── Step 5: Trust-root binding ────────────────────────────────────────
        if embedded_key != trust_root {
            return Ok(reject(
                token,
                now,
                format!(
                    "token {} issuer_public_key does not match the trust root for domain '{}'",
                    token_id, domain
                ),
            ));
        }

        // ── Step 6: Signature over the canonical payload ──────────────────────
        let payload = canonical_payload(token);
        match verify_ed25519(&trust_root, &payload, token.signature()) {
            SignatureCheck::Valid => {}
            SignatureCheck::Invalid => {
                return Ok(reject(
                    token,
                    now,
                    format!("signature verification failed for token {}", token_id),
                ));
            }
            SignatureCheck::MalformedSignature(detail) => {
                return Ok(reject(
                    token,
                    now,
                    format!("signature verification failed for token {}: malformed signature ({})", token_id, detail),
                ));
            }
            SignatureCheck::MalformedKey(detail) => {
                return Ok(reject(
                    token,
                    now,
                    format!(
                        "signature verification failed for token {}: trust root for domain '{}' is not an Ed25519 key ({})",
                        token_id, domain, detail
                    ),
                ));
            }
        }

        // ── Step 7: Capability coverage ───────────────────────────────────────
        if !token.claims(required_capability) {
            return Ok(reject(
                token,
                now,
                format!(
                    "token {} does not attest capability '{}' (attested: [{}])",
                    token_id,
                    required_capability,
                    token.capabilities().join(", ")
                ),
            ));
        }

        // ── Step 8: Success ───────────────────────────────────────────────────
        info!(
            token_id = %token_id,
            capability = %required_capability,
            issuer_domain = %domain,
            "capability token verified"
        );
        Ok(ResolutionProof::accepted(
            token.clone(),
            format!(
                "token {} attests capability '{}' for subject '{}', issued by domain '{}'",
                token_id,
                required_capability,
                token.subject_node_id(),
                domain
            ),
            now,
        ))
    }
}

impl CapabilityVerifier for TokenVerifier {
    fn verify_token(
        &self,
        token: &CapabilityToken,
        required_capability: &str,
    ) -> WaypointResult<ResolutionProof> {
        self.verify_token_at(token, required_capability, Utc::now())
    }
}

fn reject(token: &CapabilityToken, now: DateTime<Utc>, notes: String) -> ResolutionProof {
    warn!(
        token_id = %token.token_id(),
        issuer_domain = %token.issuer_domain(),
        notes = %notes,
        "capability token rejected"
    );
    ResolutionProof::rejected(token.clone(), notes, now)
}

fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
