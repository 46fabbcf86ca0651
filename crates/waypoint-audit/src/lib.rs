//! # waypoint-audit
//!
//! Append-only, SHA-256 hash-chained trail of navigation decisions.
//!
//! ## Overview
//!
//! Every `NavigationRecord` the navigator writes is wrapped in an
//! `AuditEvent` linked to the previous event by hash. Altering any event,
//! even by a single byte, breaks the chain and is caught by `verify_chain`.
//! The trail lives in memory only.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use waypoint_audit::InMemoryAuditWriter;
//!
//! let writer = InMemoryAuditWriter::new("trail-001");
//! let navigator = Navigator::with_trail_id(graph, verifier, Box::new(writer.clone()), "trail-001");
//! navigator.advance("draft", "publish", &tokens)?;
//!
//! assert!(writer.verify_integrity());
//! let log = writer.export_log()?;
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_event, verify_chain};
pub use event::{AuditEvent, AuditLog};
pub use memory::InMemoryAuditWriter;

// ── Tests ─────────────────────────────────────────────────────────────────────
