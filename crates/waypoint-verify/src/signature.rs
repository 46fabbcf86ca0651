//! base64url encoding and Ed25519 signature primitives.
//!
//! Keys and signatures travel as base64url text. Decoding accepts input with
//! or without `=` padding but rejects non-canonical trailing bits and any
//! character outside the URL-safe alphabet.

use base64::{
    alphabet,
    engine::{general_purpose::GeneralPurposeConfig, DecodePaddingMode, GeneralPurpose},
    DecodeError, Engine,
};
use ed25519_dalek::{Signature, VerifyingKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// URL-safe base64: pads on encode, padding optional on decode.
pub const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Why a signature did not verify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureCheck {
    Valid,
    MalformedSignature(String),
    MalformedKey(String),
    Invalid,
}

pub fn encode_base64url(bytes: &[u8]) -> String {
    BASE64URL.encode(bytes)
}

pub fn decode_base64url(s: &str) -> Result<Vec<u8>, DecodeError> {
    BASE64URL.decode(s)
}

/// Verify `signature_b64` over `message` with the raw Ed25519 key `public_key`.
///
/// Uses strict verification, which also rejects small-order keys and
/// non-canonical signature encodings.
pub fn verify_ed25519(public_key: &[u8], message: &[u8], signature_b64: &str) -> SignatureCheck {
    let key_bytes: [u8; PUBLIC_KEY_LENGTH] = match public_key.try_into() {
        Ok(bytes) => bytes,
        Err(_) => {
            return SignatureCheck::MalformedKey(format!(
                "expected {} key bytes, got {}",
                PUBLIC_KEY_LENGTH,
                public_key.len()
            ))
        }
    };
    let key = match VerifyingKey::from_bytes(&key_bytes) {
        Ok(key) => key,
        Err(e) => return SignatureCheck::MalformedKey(e.to_string()),
    };

    let sig_bytes = match decode_base64url(signature_b64) {
        Ok(bytes) => bytes,
        Err(e) => return SignatureCheck::MalformedSignature(format!("not valid base64url: {e}")),
    };
    if sig_bytes.len() != SIGNATURE_LENGTH {
        return SignatureCheck::MalformedSignature(format!(
            "expected {} signature bytes, got {}",
            SIGNATURE_LENGTH,
            sig_bytes.len()
        ));
    }
    let signature = match Signature::from_slice(&sig_bytes) {
        Ok(sig) => sig,
        Err(e) => return SignatureCheck::MalformedSignature(e.to_string()),
    };

    match key.verify_strict(message, &signature) {
        Ok(()) => SignatureCheck::Valid,
        Err(_) => SignatureCheck::Invalid,
    }
}
