//! Demo scenarios.
//!
//! - Scenario A: editor enumerates from `draft` → one action (`publish`)
//! - Scenario B: viewer enumerates from `draft` → no actions
//! - Scenario C: a `database.relational` token checked against
//!   `cache.redis` → not verified
//! - Walkthrough: the navigator moves an article through the editorial
//!   workflow with forged and valid tokens, ending in a sealed audit trail.

use std::sync::Arc;

use chrono::{Duration, Utc};
use ed25519_dalek::SigningKey;
use tracing::info;

use waypoint_audit::InMemoryAuditWriter;
use waypoint_contracts::{
    action::TypedAction,
    capability::CapabilitySet,
    error::{WaypointError, WaypointResult},
    graph::ContractGraph,
    navigation::NavigationOutcome,
    proof::ResolutionProof,
};
use waypoint_core::{enumerate, traits::CapabilityVerifier, Navigator};
use waypoint_graph::load_graph_str;
use waypoint_verify::TokenVerifier;

use crate::fixtures::{demo_trust_store, issuer_key, mint, DEMO_DOMAIN};

/// The one-transition graph of scenarios A and B.
const DRAFT_GRAPH: &str = r#"
[[states]]
node_id = "draft"
schema_version = "v1"
policy_tier = 1

[[states]]
node_id = "published"
schema_version = "v1"
policy_tier = 2
is_terminal = true

[[transitions]]
transition_id = "publish"
label = "Publish draft"
source = "draft"
target = "published"

[transitions.guard]
required_capabilities = ["editor"]
"#;

/// The editorial workflow used by the walkthrough.
pub const PUBLISHING_GRAPH: &str = include_str!("../contracts/publishing.toml");

// ── Scenarios A and B ─────────────────────────────────────────────────────────

pub fn scenario_a() -> WaypointResult<Vec<TypedAction>> {
    enumerate_draft(&["editor", "viewer"])
}

pub fn scenario_b() -> WaypointResult<Vec<TypedAction>> {
    enumerate_draft(&["viewer"])
}

fn enumerate_draft(capabilities: &[&str]) -> WaypointResult<Vec<TypedAction>> {
    let graph = load_graph_str(DRAFT_GRAPH)?;
    let draft = graph.state("draft").ok_or_else(|| WaypointError::UnknownState {
        state_id: "draft".to_string(),
    })?;
    let caps: CapabilitySet = capabilities.iter().copied().collect();
    Ok(enumerate(&graph, draft, &caps))
}

// ── Scenario C ────────────────────────────────────────────────────────────────

pub fn scenario_c() -> WaypointResult<ResolutionProof> {
    let now = Utc::now();
    let token = mint(
        &issuer_key(),
        DEMO_DOMAIN,
        "worker-17",
        &["database.relational"],
        now - Duration::minutes(1),
        now + Duration::hours(1),
    )?;
    let verifier = TokenVerifier::new(Box::new(demo_trust_store()));
    verifier.verify_token(&token, "cache.redis")
}

// ── Walkthrough ───────────────────────────────────────────────────────────────

/// Everything the walkthrough produced, for printing or assertions.
pub struct Walkthrough {
    pub steps: Vec<(String, NavigationOutcome)>,
    pub audit: InMemoryAuditWriter,
}

pub fn walkthrough() -> WaypointResult<Walkthrough> {
    let graph: Arc<ContractGraph> = Arc::new(load_graph_str(PUBLISHING_GRAPH)?);
    let audit = InMemoryAuditWriter::new("demo-trail");
    let navigator = Navigator::with_trail_id(
        graph,
        Box::new(TokenVerifier::new(Box::new(demo_trust_store()))),
        Box::new(audit.clone()),
        "demo-trail",
    );

    let now = Utc::now();
    let valid_for = |key: &SigningKey, caps: &[&str]| {
        mint(key, DEMO_DOMAIN, "author-3", caps, now - Duration::minutes(1), now + Duration::hours(1))
    };
    let attacker = SigningKey::from_bytes(&[13u8; 32]);

    let mut steps = Vec::new();

    // Self-signed token claiming the trusted domain: rejected at the trust root.
    let forged = valid_for(&attacker, &["editor"])?;
    steps.push((
        "publish with a self-signed editor token".to_string(),
        navigator.advance("draft", "publish", &[forged])?,
    ));

    // Open move guarded only by a metadata precondition.
    steps.push((
        "request review".to_string(),
        navigator.advance("draft", "request_review", &[])?,
    ));

    // Reviewer token from the trusted issuer unlocks the terminal move.
    let reviewer = valid_for(&issuer_key(), &["reviewer"])?;
    steps.push((
        "approve with a valid reviewer token".to_string(),
        navigator.advance("review", "approve", &[reviewer])?,
    ));

    info!(
        trail_id = navigator.trail_id(),
        steps = steps.len(),
        "walkthrough finished"
    );
    Ok(Walkthrough { steps, audit })
}

// ── Printing ──────────────────────────────────────────────────────────────────

pub fn run_all() -> WaypointResult<()> {
    println!("=== Scenario A: editor at 'draft' ===");
    print_actions(&scenario_a()?);
    println!();

    println!("=== Scenario B: viewer at 'draft' ===");
    print_actions(&scenario_b()?);
    println!();

    println!("=== Scenario C: database token, cache capability ===");
    print_proof(&scenario_c()?);
    println!();

    println!("=== Walkthrough: editorial workflow ===");
    let run = walkthrough()?;
    for (description, outcome) in &run.steps {
        println!("  {}", description);
        match outcome {
            NavigationOutcome::Advanced { target_state_id, .. } => {
                println!("    ADVANCED -> {}", target_state_id);
            }
            NavigationOutcome::Denied { reason, .. } => {
                println!("    DENIED: {}", reason);
            }
        }
        for proof in outcome.proofs() {
            println!("    proof: verified={} {}", proof.verified(), proof.verification_notes());
        }
    }
    let log = run.audit.export_log()?;
    println!(
        "  audit: {} event(s), finalized={}, chain valid={}",
        log.events.len(),
        log.finalized,
        run.audit.verify_integrity()
    );
    println!("  terminal hash: {}", log.terminal_hash);
    println!();
    Ok(())
}

pub fn print_actions(actions: &[TypedAction]) {
    if actions.is_empty() {
        println!("  (no legal next action)");
    }
    for action in actions {
        println!(
            "  {:<16} {} -> {}  in={} out={} cost={}",
            action.transition_id,
            action.source_state_id,
            action.target_state_id,
            action.input_type_signature,
            action.output_type_signature,
            action.total_cost()
        );
    }
}

pub fn print_proof(proof: &ResolutionProof) {
    println!("  verified: {}", proof.verified());
    println!("  notes:    {}", proof.verification_notes());
    println!("  token:    {}", proof.token().token_id());
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use waypoint_contracts::navigation::NavigationOutcome;

    use super::{scenario_a, scenario_b, scenario_c, walkthrough};

    #[test]
    fn scenario_a_returns_publish() {
        let actions = scenario_a().unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].transition_id, "publish");
    }

    #[test]
    fn scenario_b_returns_nothing() {
        assert!(scenario_b().unwrap().is_empty());
    }

    #[test]
    fn scenario_c_is_not_verified() {
        let proof = scenario_c().unwrap();
        assert!(!proof.verified());
        assert!(proof.verification_notes().contains("does not attest capability"));
    }

    #[test]
    fn walkthrough_rejects_forgery_and_reaches_terminal_state() {
        let run = walkthrough().unwrap();
        assert_eq!(run.steps.len(), 3);

        match &run.steps[0].1 {
            NavigationOutcome::Denied { reason, proofs } => {
                assert!(reason.contains("missing required capabilities"), "{reason}");
                assert!(proofs[0]
                    .verification_notes()
                    .contains("does not match the trust root"));
            }
            other => panic!("expected Denied, got {:?}", other),
        }
        assert!(run.steps[1].1.is_advanced());
        assert!(run.steps[2].1.is_advanced());

        let log = run.audit.export_log().unwrap();
        assert_eq!(log.events.len(), 3);
        assert!(log.finalized);
        assert!(run.audit.verify_integrity());
    }
}
