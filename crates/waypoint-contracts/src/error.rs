//! Error types for the Waypoint navigation engine.
//!
//! Only integration failures live here: a malformed graph, a broken key
//! provider, an unwritable audit sink. A guard that does not pass or a token
//! that does not verify is an ordinary outcome and is never reported through
//! `WaypointError`.

use thiserror::Error;

/// The unified error type for the Waypoint crates.
#[derive(Debug, Error)]
pub enum WaypointError {
    /// A graph or trust-store definition could not be read or parsed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The graph is structurally broken (duplicate ids, dangling references).
    #[error("graph integrity error: {reason}")]
    GraphIntegrity { reason: String },

    /// The caller referenced a state the graph does not contain.
    #[error("unknown state '{state_id}'")]
    UnknownState { state_id: String },

    /// A capability token failed structural validation at construction time.
    #[error("invalid capability token: {reason}")]
    InvalidToken { reason: String },

    /// The key provider failed instead of answering with a key or `None`.
    #[error("key provider failure for domain '{domain}': {reason}")]
    KeyProvider { domain: String, reason: String },

    /// The audit writer could not append a navigation record.
    ///
    /// Treated as fatal: a decision that cannot be audited is not returned.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },

    /// A value could not be serialized or deserialized.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

/// Convenience alias used throughout the Waypoint crates.
pub type WaypointResult<T> = Result<T, WaypointError>;
