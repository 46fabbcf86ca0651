//! Collaborator traits for the Waypoint engine.
//!
//! These three traits mark the trust boundary of the core:
//!
//! - `KeyProvider`: external source of per-domain trust roots
//! - `CapabilityVerifier`: trusted checker of capability tokens
//! - `AuditWriter`: trusted sink for navigation decisions
//!
//! Guard evaluation and action enumeration need no collaborators and are
//! plain functions in this crate.

use waypoint_contracts::{
    error::WaypointResult, navigation::NavigationRecord, proof::ResolutionProof,
    token::CapabilityToken,
};

/// Supplies the public key a domain's tokens must be signed with.
///
/// Implementations may do network or cache I/O; latency and cancellation
/// are their own concern. The verifier calls this at most once per token.
pub trait KeyProvider: Send + Sync {
    /// Return the raw trust-root key bytes for `issuer_domain`.
    ///
    /// `Ok(None)` means the domain has no trust root and every token it
    /// issued must be rejected. `Err` is reserved for a provider that could
    /// not answer at all; it propagates to the caller as an integration error.
    fn get_domain_trust_root(&self, issuer_domain: &str) -> WaypointResult<Option<Vec<u8>>>;
}

/// Checks that a token is authentic, current, and attests a capability.
pub trait CapabilityVerifier: Send + Sync {
    /// Resolve whether `token` proves `required_capability`.
    ///
    /// Every ordinary failure (expired, untrusted, forged, not covering the
    /// capability) is reported as `Ok` with `verified() == false`. `Err`
    /// only surfaces collaborator failures.
    fn verify_token(
        &self,
        token: &CapabilityToken,
        required_capability: &str,
    ) -> WaypointResult<ResolutionProof>;
}

/// The audit writer: the append-only record of navigation decisions.
///
/// A failed write is fatal for the request being recorded.
pub trait AuditWriter: Send + Sync {
    /// Append one navigation record.
    fn write(&self, record: &NavigationRecord) -> WaypointResult<()>;

    /// Mark a trail as complete, called when a terminal state is reached.
    fn finalize(&self, trail_id: &str) -> WaypointResult<()>;
}
