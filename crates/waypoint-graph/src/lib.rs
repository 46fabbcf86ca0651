//! # waypoint-graph
//!
//! TOML contract graph definitions for the Waypoint engine.
//!
//! ## Overview
//!
//! A graph file declares `[[states]]` and `[[transitions]]`. Each transition
//! may carry a `[transitions.guard]` table. The loader validates the result
//! into a read-only [`ContractGraph`](waypoint_contracts::graph::ContractGraph).
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! let graph = waypoint_graph::load_graph_file(Path::new("contracts/publishing.toml"))?;
//! let draft = graph.state("draft").unwrap();
//! let actions = waypoint_core::enumerate(&graph, draft, &caps);
//! ```

pub mod config;
pub mod loader;

pub use config::{GraphConfig, GuardDef, StateDef, TransitionDef};
pub use loader::{build_graph, load_graph_file, load_graph_str, parse_graph_config};

// ── Tests ─────────────────────────────────────────────────────────────────────
