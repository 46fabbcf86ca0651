//! In-memory implementation of `AuditWriter`.
//!
//! `InMemoryAuditWriter` keeps every event in a `Vec` behind a `Mutex`.
//! Nothing is persisted; call `export_log()` to take a snapshot and
//! `verify_integrity()` to confirm the chain has not been altered.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{info, warn};

use waypoint_contracts::{
    error::{WaypointError, WaypointResult},
    navigation::NavigationRecord,
};
use waypoint_core::traits::AuditWriter;

use crate::{
    chain::{hash_event, verify_chain},
    event::{AuditEvent, AuditLog},
};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct InMemoryState {
    /// All events written so far, in append order.
    pub(crate) events: Vec<AuditEvent>,

    /// The next sequence number to assign.
    pub(crate) sequence: u64,

    /// `this_hash` of the last event, or `GENESIS_HASH`.
    pub(crate) last_hash: String,

    pub(crate) finalized: bool,
}

// ── Public writer ─────────────────────────────────────────────────────────────

/// An in-memory, append-only audit writer backed by a SHA-256 hash chain.
///
/// Cloning the writer shares the underlying chain, so a caller can hand one
/// clone to a `Navigator` and keep another to export or verify the trail.
#[derive(Clone)]
pub struct InMemoryAuditWriter {
    trail_id: String,
    pub(crate) state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryAuditWriter {
    /// Create a new writer for the given trail.
    pub fn new(trail_id: impl Into<String>) -> Self {
        let state = InMemoryState {
            events: Vec::new(),
            sequence: 0,
            last_hash: AuditEvent::GENESIS_HASH.to_string(),
            finalized: false,
        };
        Self {
            trail_id: trail_id.into(),
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn trail_id(&self) -> &str {
        &self.trail_id
    }

    /// Snapshot all events written so far.
    pub fn export_log(&self) -> WaypointResult<AuditLog> {
        let state = self.lock()?;
        let terminal_hash = state
            .events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        Ok(AuditLog {
            trail_id: self.trail_id.clone(),
            events: state.events.clone(),
            exported_at: Utc::now(),
            terminal_hash,
            finalized: state.finalized,
        })
    }

    /// Verify that the in-memory chain has not been tampered with.
    ///
    /// A poisoned lock counts as a failed verification.
    pub fn verify_integrity(&self) -> bool {
        match self.lock() {
            Ok(state) => verify_chain(&state.events),
            Err(_) => false,
        }
    }

    fn lock(&self) -> WaypointResult<MutexGuard<'_, InMemoryState>> {
        self.state.lock().map_err(|e| WaypointError::AuditWriteFailed {
            reason: format!("audit state lock poisoned: {}", e),
        })
    }
}

// ── AuditWriter impl ──────────────────────────────────────────────────────────

impl AuditWriter for InMemoryAuditWriter {
    /// Append one navigation record to the hash chain.
    fn write(&self, record: &NavigationRecord) -> WaypointResult<()> {
        let mut state = self.lock()?;

        if state.finalized {
            warn!(trail_id = %self.trail_id, "write after finalize rejected");
            return Err(WaypointError::AuditWriteFailed {
                reason: format!("trail '{}' is already finalized", self.trail_id),
            });
        }

        let prev_hash = state.last_hash.clone();
        let sequence = state.sequence;

        let this_hash = hash_event(&self.trail_id, sequence, record, &prev_hash).map_err(|e| {
            WaypointError::AuditWriteFailed {
                reason: e.to_string(),
            }
        })?;

        state.events.push(AuditEvent {
            sequence,
            trail_id: self.trail_id.clone(),
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.sequence += 1;
        state.last_hash = this_hash;

        Ok(())
    }

    /// Seal the trail. Later writes are rejected.
    fn finalize(&self, trail_id: &str) -> WaypointResult<()> {
        let mut state = self.lock()?;
        state.finalized = true;

        info!(
            trail_id = %trail_id,
            event_count = state.events.len(),
            terminal_hash = %state.last_hash,
            "audit trail finalized"
        );

        Ok(())
    }
}
