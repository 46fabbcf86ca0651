//! The canonical signing payload.
//!
//! This is the byte sequence an issuer signs and the verifier rebuilds. It
//! must match other implementations byte for byte, so it is written out by
//! hand rather than through a JSON library:
//!
//! - a single JSON object with exactly the seven signed fields;
//! - keys in lexicographic order, `,` and `:` separators, no whitespace;
//! - `capabilities` sorted ascending (byte order, duplicates kept);
//! - timestamps as `YYYY-MM-DDTHH:MM:SS[.ffffff]+00:00`, the fraction only
//!   when non-zero and truncated to microseconds;
//! - strings escaped to pure ASCII: `\"`, `\\`, `\b`, `\f`, `\n`, `\r`,
//!   `\t`, and lowercase `\uXXXX` (surrogate pairs above U+FFFF) for every
//!   other control or non-ASCII character.
//!
//! The `signature` field is never part of the payload.

use chrono::{DateTime, Utc};

use waypoint_contracts::token::CapabilityToken;

/// Build the canonical signing payload for `token`.
pub fn canonical_payload(token: &CapabilityToken) -> Vec<u8> {
    let mut capabilities: Vec<&str> = token.capabilities().iter().map(String::as_str).collect();
    capabilities.sort_unstable();

    let mut out = String::with_capacity(256);
    out.push_str("{\"capabilities\":[");
    for (i, capability) in capabilities.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_json_string(&mut out, capability);
    }
    out.push_str("],\"expires_at\":");
    write_json_string(&mut out, &canonical_timestamp(token.expires_at()));
    out.push_str(",\"issued_at\":");
    write_json_string(&mut out, &canonical_timestamp(token.issued_at()));
    out.push_str(",\"issuer_domain\":");
    write_json_string(&mut out, token.issuer_domain());
    out.push_str(",\"issuer_public_key\":");
    write_json_string(&mut out, token.issuer_public_key());
    out.push_str(",\"subject_node_id\":");
    write_json_string(&mut out, token.subject_node_id());
    out.push_str(",\"token_id\":");
    write_json_string(&mut out, &token.token_id().hyphenated().to_string());
    out.push('}');

    out.into_bytes()
}

/// ISO-8601 rendering of a UTC timestamp as it appears in the payload.
pub fn canonical_timestamp(ts: DateTime<Utc>) -> String {
    let micros = ts.timestamp_subsec_micros();
    let mut out = ts.format("%Y-%m-%dT%H:%M:%S").to_string();
    if micros != 0 {
        // A leap second reports micros >= 1_000_000; clamp into the field.
        out.push_str(&format!(".{:06}", micros.min(999_999)));
    }
    out.push_str("+00:00");
    out
}

fn write_json_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            ' '..='~' => out.push(ch),
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04x}", unit));
                }
            }
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use waypoint_contracts::token::CapabilityToken;

    use super::{canonical_payload, canonical_timestamp};

    const GOLDEN: &str = include_str!("../tests/fixtures/canonical_payload.golden");

    fn golden_token() -> CapabilityToken {
        let issued = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        CapabilityToken::new(
            Uuid::parse_str("123e4567-e89b-12d3-a456-426614174000").unwrap(),
            "node-1",
            "example.org",
            vec!["database.relational".into(), "cache.redis".into()],
            issued,
            issued + Duration::hours(1) + Duration::milliseconds(250),
            "AAEC",
            "c2ln",
        )
        .unwrap()
    }

    #[test]
    fn payload_matches_golden_bytes() {
        let payload = canonical_payload(&golden_token());
        assert_eq!(std::str::from_utf8(&payload).unwrap(), GOLDEN.trim_end());
    }

    #[test]
    fn payload_excludes_signature() {
        let payload = String::from_utf8(canonical_payload(&golden_token())).unwrap();
        assert!(!payload.contains("signature"));
        assert!(!payload.contains("c2ln"));
    }

    #[test]
    fn payload_independent_of_capability_order() {
        let a = golden_token();
        let b = CapabilityToken::new(
            a.token_id(),
            a.subject_node_id(),
            a.issuer_domain(),
            vec!["cache.redis".into(), "database.relational".into()],
            a.issued_at(),
            a.expires_at(),
            a.issuer_public_key(),
            "b3RoZXI",
        )
        .unwrap();
        assert_eq!(canonical_payload(&a), canonical_payload(&b));
    }

    #[test]
    fn timestamp_fraction_only_when_present() {
        let whole = Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 1).unwrap();
        assert_eq!(canonical_timestamp(whole), "2025-06-30T23:59:01+00:00");

        let fractional = whole + Duration::microseconds(42);
        assert_eq!(canonical_timestamp(fractional), "2025-06-30T23:59:01.000042+00:00");

        // Sub-microsecond precision is truncated, not rounded.
        let nanos = whole + Duration::nanoseconds(999);
        assert_eq!(canonical_timestamp(nanos), "2025-06-30T23:59:01+00:00");
    }

    #[test]
    fn strings_escape_to_ascii() {
        let issued = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let token = CapabilityToken::new(
            Uuid::nil(),
            "n\u{f6}de\"\n\u{1F600}",
            "tab\there\\",
            vec!["\u{7f}cap".into()],
            issued,
            issued,
            "k",
            "s",
        )
        .unwrap();
        let payload = String::from_utf8(canonical_payload(&token)).unwrap();
        assert!(payload.is_ascii());
        assert!(payload.contains(r#""subject_node_id":"n\u00f6de\"\n\ud83d\ude00""#), "{payload}");
        assert!(payload.contains(r#""issuer_domain":"tab\there\\""#), "{payload}");
        assert!(payload.contains(r#""capabilities":["\u007fcap"]"#), "{payload}");
        assert!(payload.contains(r#""token_id":"00000000-0000-0000-0000-000000000000""#));
    }
}
