//! # waypoint-verify
//!
//! Capability token verification for the Waypoint engine.
//!
//! ## Overview
//!
//! [`TokenVerifier`] implements
//! [`CapabilityVerifier`](waypoint_core::traits::CapabilityVerifier). It
//! checks a token's validity window, binds its embedded key to the issuing
//! domain's trust root, verifies the Ed25519 signature over the
//! [canonical payload](canonical::canonical_payload), and finally checks
//! capability coverage. Trust roots come from any
//! [`KeyProvider`](waypoint_core::traits::KeyProvider); [`TrustStore`] is
//! the in-memory one.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use waypoint_verify::{TokenVerifier, TrustStore};
//!
//! let store = TrustStore::from_file(Path::new("trust.toml"))?;
//! let verifier = TokenVerifier::new(Box::new(store));
//! let proof = verifier.verify_token(&token, "cache.redis")?;
//! if !proof.verified() {
//!     eprintln!("{}", proof.verification_notes());
//! }
//! ```

pub mod canonical;
pub mod engine;
pub mod signature;
pub mod trust;

pub use canonical::{canonical_payload, canonical_timestamp};
pub use engine::TokenVerifier;
pub use signature::{decode_base64url, encode_base64url, verify_ed25519, SignatureCheck};
pub use trust::TrustStore;

// ── Tests ─────────────────────────────────────────────────────────────────────
