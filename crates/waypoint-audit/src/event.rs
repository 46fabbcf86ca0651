//! Audit event and log types.
//!
//! `AuditEvent` wraps one `NavigationRecord` with its chain position and the
//! hashes that make tampering detectable. `AuditLog` is the snapshot
//! produced by `InMemoryAuditWriter::export_log`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use waypoint_contracts::navigation::NavigationRecord;

/// A single entry in the hash chain of one navigation trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    /// The navigator trail this event belongs to.
    pub trail_id: String,

    pub record: NavigationRecord,

    /// `this_hash` of the previous event, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    /// SHA-256 (hex) over (trail_id, sequence, prev_hash, record JSON).
    pub this_hash: String,
}

impl AuditEvent {
    /// The `prev_hash` of the first event in every chain: 64 hex zeros.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A snapshot of one trail's audit events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub trail_id: String,

    /// All events in chain order (sequence 0 first).
    pub events: Vec<AuditEvent>,

    /// Wall-clock time (UTC) the snapshot was taken.
    pub exported_at: DateTime<Utc>,

    /// The `this_hash` of the last event. Empty if the log is empty.
    pub terminal_hash: String,

    /// True once the navigator reached a terminal state on this trail.
    pub finalized: bool,
}
