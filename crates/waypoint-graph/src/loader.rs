//! TOML graph loader.
//!
//! Parses a `GraphConfig` from a string or file and hands it to
//! `ContractGraph::new`, which performs the integrity checks. Parse and read
//! failures map to `WaypointError::ConfigError`; structural problems
//! (dangling references, duplicates) surface as `GraphIntegrity`.

use std::path::Path;

use tracing::{debug, warn};

use waypoint_contracts::{
    error::{WaypointError, WaypointResult},
    graph::ContractGraph,
};

use crate::config::GraphConfig;

/// Parse `s` as a TOML graph definition.
pub fn parse_graph_config(s: &str) -> WaypointResult<GraphConfig> {
    toml::from_str(s).map_err(|e| WaypointError::ConfigError {
        reason: format!("failed to parse graph TOML: {}", e),
    })
}

/// Parse `s` as TOML and build a validated `ContractGraph`.
///
/// ```rust,ignore
/// let graph = waypoint_graph::load_graph_str(include_str!("publishing.toml"))?;
/// ```
pub fn load_graph_str(s: &str) -> WaypointResult<ContractGraph> {
    build_graph(parse_graph_config(s)?)
}

/// Read the file at `path` and build a validated `ContractGraph` from it.
pub fn load_graph_file(path: &Path) -> WaypointResult<ContractGraph> {
    let contents = std::fs::read_to_string(path).map_err(|e| WaypointError::ConfigError {
        reason: format!("failed to read graph file '{}': {}", path.display(), e),
    })?;
    load_graph_str(&contents)
}

/// Convert a parsed configuration into a `ContractGraph`.
pub fn build_graph(config: GraphConfig) -> WaypointResult<ContractGraph> {
    let states = config.states.into_iter().map(Into::into).collect();
    let transitions = config.transitions.into_iter().map(Into::into).collect();

    let graph = ContractGraph::new(states, transitions).inspect_err(|e| {
        warn!(error = %e, "contract graph rejected");
    })?;

    debug!(
        states = graph.state_count(),
        transitions = graph.transition_count(),
        "contract graph loaded"
    );
    Ok(graph)
}
