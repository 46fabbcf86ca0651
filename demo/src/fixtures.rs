//! Demo-only token minting.
//!
//! The engine never issues tokens. The demo needs signed tokens to exercise
//! the verifier, so it signs the canonical payload itself with a fixed seed.

use chrono::{DateTime, Utc};
use ed25519_dalek::{Signer, SigningKey};
use uuid::Uuid;

use waypoint_contracts::{error::WaypointResult, token::CapabilityToken};
use waypoint_verify::{canonical_payload, encode_base64url, TrustStore};

/// Issuer domain used throughout the demo.
pub const DEMO_DOMAIN: &str = "ops.example.org";

/// Seed of the demo issuer's key. Matches `contracts/trust.toml`.
const DEMO_SEED: [u8; 32] = [42u8; 32];

pub fn issuer_key() -> SigningKey {
    SigningKey::from_bytes(&DEMO_SEED)
}

/// A trust store that trusts only the demo issuer.
pub fn demo_trust_store() -> TrustStore {
    TrustStore::new().with_root(DEMO_DOMAIN, issuer_key().verifying_key().to_bytes())
}

/// Sign a token for `subject` with `key`, claiming `domain`.
pub fn mint(
    key: &SigningKey,
    domain: &str,
    subject: &str,
    capabilities: &[&str],
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> WaypointResult<CapabilityToken> {
    let token_id = Uuid::new_v4();
    let capabilities: Vec<String> = capabilities.iter().map(|c| c.to_string()).collect();
    let public_key = encode_base64url(key.verifying_key().as_bytes());

    let build = |signature: &str| {
        CapabilityToken::new(
            token_id,
            subject,
            domain,
            capabilities.clone(),
            issued_at,
            expires_at,
            public_key.clone(),
            signature,
        )
    };

    // The signature is not part of the payload, so any placeholder will do.
    let unsigned = build("AA")?;
    let signature = key.sign(&canonical_payload(&unsigned));
    build(&encode_base64url(&signature.to_bytes()))
}
