//! Waypoint demo CLI
//!
//! Runs the built-in scenarios, or enumerates and verifies against contract
//! files on disk.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- enumerate --graph demo/contracts/publishing.toml --state draft --capability editor
//!   cargo run -p demo -- verify --token demo/contracts/token.json --trust demo/contracts/trust.toml --capability cache.redis

mod fixtures;
mod scenarios;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use waypoint_contracts::{
    capability::CapabilitySet,
    error::{WaypointError, WaypointResult},
    token::CapabilityToken,
};
use waypoint_core::{enumerate_detailed, traits::CapabilityVerifier};
use waypoint_graph::load_graph_file;
use waypoint_verify::{TokenVerifier, TrustStore};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Waypoint: guard-checked navigation over typed contract graphs.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Waypoint contract-navigation demo",
    long_about = "Runs Waypoint demo scenarios showing guard evaluation, ordered action\n\
                  enumeration, capability token verification and the audit hash chain."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every built-in scenario in sequence.
    RunAll,
    /// List the legal next actions from a state of a graph file.
    Enumerate {
        /// Contract graph TOML file.
        #[arg(long)]
        graph: PathBuf,
        /// Current state id.
        #[arg(long)]
        state: String,
        /// Capability held by the agent. Repeatable.
        #[arg(long = "capability")]
        capabilities: Vec<String>,
    },
    /// Verify a capability token JSON file against a trust store.
    Verify {
        /// Capability token JSON file.
        #[arg(long)]
        token: PathBuf,
        /// Trust store TOML file.
        #[arg(long)]
        trust: PathBuf,
        /// Capability the token must attest.
        #[arg(long)]
        capability: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug to see per-transition exclusion reasons.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => scenarios::run_all(),
        Command::Enumerate {
            graph,
            state,
            capabilities,
        } => run_enumerate(&graph, &state, capabilities),
        Command::Verify {
            token,
            trust,
            capability,
        } => run_verify(&token, &trust, &capability),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── File-driven commands ──────────────────────────────────────────────────────

fn run_enumerate(
    graph_path: &std::path::Path,
    state_id: &str,
    capabilities: Vec<String>,
) -> WaypointResult<()> {
    let graph = load_graph_file(graph_path)?;
    let state = graph.state(state_id).ok_or_else(|| WaypointError::UnknownState {
        state_id: state_id.to_string(),
    })?;
    let caps: CapabilitySet = capabilities.into_iter().collect();

    let enumeration = enumerate_detailed(&graph, state, &caps);
    println!("Legal actions from '{}':", state_id);
    scenarios::print_actions(&enumeration.actions);
    for exclusion in &enumeration.excluded {
        println!("  excluded {:<12} {}", exclusion.transition_id, exclusion.reason);
    }
    Ok(())
}

fn run_verify(
    token_path: &std::path::Path,
    trust_path: &std::path::Path,
    capability: &str,
) -> WaypointResult<()> {
    let raw = std::fs::read_to_string(token_path).map_err(|e| WaypointError::ConfigError {
        reason: format!("failed to read token file {}: {}", token_path.display(), e),
    })?;
    let token: CapabilityToken =
        serde_json::from_str(&raw).map_err(|e| WaypointError::Serialization {
            reason: format!("failed to parse token JSON: {}", e),
        })?;

    let verifier = TokenVerifier::new(Box::new(TrustStore::from_file(trust_path)?));
    let proof = verifier.verify_token(&token, capability)?;
    scenarios::print_proof(&proof);
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Waypoint: Contract Graph Navigation");
    println!("===================================");
    println!();
    println!("Per navigation step:");
    println!("  [1] Each required capability is resolved through a signed token");
    println!("  [2] Tokens are checked for expiry, trust-root binding and signature");
    println!("  [3] Guards are evaluated against verified capabilities only");
    println!("  [4] The decision is appended to a SHA-256 audit chain");
    println!();
}
