//! Property tests for token verification.

use chrono::{DateTime, Duration, TimeZone, Utc};
use ed25519_dalek::{Signer, SigningKey};
use proptest::prelude::*;
use uuid::Uuid;

use waypoint_contracts::token::CapabilityToken;
use waypoint_verify::{canonical_payload, encode_base64url, TokenVerifier, TrustStore};

const DOMAIN: &str = "example.org";

fn key() -> SigningKey {
    SigningKey::from_bytes(&[3u8; 32])
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

fn verifier() -> TokenVerifier {
    TokenVerifier::new(Box::new(
        TrustStore::new().with_root(DOMAIN, key().verifying_key().to_bytes()),
    ))
}

fn build(subject: &str, capabilities: &[String], signature: &str) -> CapabilityToken {
    CapabilityToken::new(
        Uuid::from_u128(0x5eed),
        subject,
        DOMAIN,
        capabilities.to_vec(),
        now() - Duration::minutes(1),
        now() + Duration::minutes(30),
        encode_base64url(key().verifying_key().as_bytes()),
        signature,
    )
    .unwrap()
}

fn signed(subject: &str, capabilities: &[String]) -> CapabilityToken {
    let payload = canonical_payload(&build(subject, capabilities, "AA"));
    let signature = encode_base64url(&key().sign(&payload).to_bytes());
    build(subject, capabilities, &signature)
}

fn capability() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(\\.[a-z]{1,8})?"
}

proptest! {
    /// Identical inputs always give the same verdict.
    #[test]
    fn verification_is_idempotent(
        subject in "[a-zA-Z0-9-]{1,32}",
        caps in proptest::collection::vec(capability(), 1..4),
        required in capability(),
    ) {
        let token = signed(&subject, &caps);
        let verifier = verifier();
        let first = verifier.verify_token_at(&token, &required, now()).unwrap();
        let second = verifier.verify_token_at(&token, &required, now()).unwrap();
        prop_assert_eq!(first.verified(), second.verified());
        prop_assert_eq!(first.verified(), caps.contains(&required));
    }

    /// Flipping one byte of the subject invalidates the signature.
    #[test]
    fn subject_tampering_is_detected(
        subject in "[a-z]{2,32}",
        index in any::<proptest::sample::Index>(),
    ) {
        let caps = vec!["cache.redis".to_string()];
        let token = signed(&subject, &caps);

        let mut bytes = subject.clone().into_bytes();
        let i = index.index(bytes.len());
        // Stay within ASCII lowercase so the result is still valid UTF-8.
        bytes[i] = if bytes[i] == b'z' { b'a' } else { bytes[i] + 1 };
        let tampered_subject = String::from_utf8(bytes).unwrap();

        let forged = build(&tampered_subject, &caps, token.signature());
        let proof = verifier().verify_token_at(&forged, "cache.redis", now()).unwrap();
        prop_assert!(!proof.verified());
        prop_assert!(proof.verification_notes().contains("signature verification failed"));
    }
}
