//! # waypoint-core
//!
//! The deterministic half of the Waypoint engine plus the navigator that
//! composes it with token verification.
//!
//! This crate provides:
//! - The collaborator traits (`KeyProvider`, `CapabilityVerifier`, `AuditWriter`)
//! - `evaluate_guard`, the pure guard evaluator
//! - `enumerate`, the ordered, guard-filtered action set
//! - The `Navigator` that gates moves on verified capabilities
//!
//! Guard evaluation and enumeration take no locks and do no I/O; they can
//! run concurrently against one shared `ContractGraph`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use waypoint_core::{enumerate, Navigator};
//!
//! let actions = enumerate(&graph, graph.state("draft").unwrap(), &caps);
//! ```

pub mod enumerator;
pub mod guard;
pub mod navigator;
pub mod traits;

pub use enumerator::{enumerate, enumerate_detailed, enumerate_unprivileged, Enumeration, Exclusion};
pub use guard::{evaluate_guard, GuardEvaluation};
pub use navigator::Navigator;
pub use traits::{AuditWriter, CapabilityVerifier, KeyProvider};
