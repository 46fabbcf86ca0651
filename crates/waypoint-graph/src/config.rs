//! Graph definition schema.
//!
//! A `GraphConfig` is deserialized from TOML and holds the states and
//! transitions of one contract. Transitions keep their declaration order,
//! which is the order `get_outgoing_transitions` reports them in.
//!
//! Unknown keys are rejected: a misspelled guard field would otherwise
//! silently drop a constraint.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use waypoint_contracts::{
    state::ContractState,
    transition::{ContractTransition, TransitionCost, TransitionGuard},
};

/// One `[[states]]` entry.
///
/// ```toml
/// [[states]]
/// node_id = "draft"
/// schema_version = "v1"
/// policy_tier = 1
///
/// [states.metadata]
/// owner = "docs-team"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateDef {
    pub node_id: String,
    pub schema_version: String,
    pub policy_tier: u32,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub is_terminal: bool,
}

/// The optional `[transitions.guard]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardDef {
    #[serde(default)]
    pub required_capabilities: BTreeSet<String>,
    pub required_schema_version: Option<String>,
    pub policy_tier_max: Option<u32>,
    #[serde(default)]
    pub precondition_keys: BTreeSet<String>,
}

/// One `[[transitions]]` entry.
///
/// ```toml
/// [[transitions]]
/// transition_id = "publish"
/// label = "Publish draft"
/// source = "draft"
/// target = "published"
/// diff_size_estimate = 12
/// latency_estimate_ms = 300
///
/// [transitions.guard]
/// required_capabilities = ["editor"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionDef {
    pub transition_id: String,
    pub label: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub input_types: Vec<String>,
    #[serde(default)]
    pub output_types: Vec<String>,
    #[serde(default)]
    pub diff_size_estimate: u64,
    #[serde(default)]
    pub latency_estimate_ms: u64,
    #[serde(default)]
    pub guard: GuardDef,
}

/// The top-level structure deserialized from a TOML graph file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig {
    #[serde(default)]
    pub states: Vec<StateDef>,
    #[serde(default)]
    pub transitions: Vec<TransitionDef>,
}

impl From<StateDef> for ContractState {
    fn from(def: StateDef) -> Self {
        ContractState {
            node_id: def.node_id,
            schema_version: def.schema_version,
            policy_tier: def.policy_tier,
            metadata: def.metadata,
            is_terminal: def.is_terminal,
        }
    }
}

impl From<GuardDef> for TransitionGuard {
    fn from(def: GuardDef) -> Self {
        TransitionGuard {
            required_capabilities: def.required_capabilities,
            required_schema_version: def.required_schema_version,
            policy_tier_max: def.policy_tier_max,
            precondition_keys: def.precondition_keys,
        }
    }
}

impl From<TransitionDef> for ContractTransition {
    fn from(def: TransitionDef) -> Self {
        ContractTransition {
            transition_id: def.transition_id,
            label: def.label,
            source_state_id: def.source,
            target_state_id: def.target,
            input_types: def.input_types,
            output_types: def.output_types,
            cost: TransitionCost::new(def.diff_size_estimate, def.latency_estimate_ms),
            guard: def.guard.into(),
        }
    }
}
