//! E2E Test: Vote Proxy Lifecycle
//!
//! Verifies conditional routing:
//! - a matching conditional forwards to the configured controller
//! - first match wins; fallback catches the rest
//! - `NoMatchingConditional` only when nothing can route
//! - the proxy signs as vote controller while eligibility stays downstream

use {
    mgv1_e2e_tests::helpers::*,
    mgv1_org_guard_program::{GuardType, MultiplierConfig},
    mgv1_proposal_program::ProposalState,
    mgv1_vote_proxy_program::{
        ComparisonOperator, Condition, ConditionalController, Operand, ProxyError,
    },
    solana_pubkey::Pubkey,
};

/// Conditional: proposal state ordinal equals `ordinal` → `controller`.
fn when_state(ordinal: u8, controller: Pubkey) -> ConditionalController {
    ConditionalController {
        condition: Condition {
            operator: ComparisonOperator::Equals,
            operand: Operand::ProposalState(ordinal),
        },
        controller,
    }
}

/// A collection-guarded NFT registry plus a proposal whose vote controller
/// is the given proxy address.
struct ProxyFixture {
    collection: Pubkey,
    guard: Pubkey,
    nft_voter: Pubkey,
    proposal: Pubkey,
    config: Pubkey,
    state_controller: Pubkey,
}

fn proxy_fixture(sim: &mut GovSim, proxy_key: Pubkey) -> ProxyFixture {
    let collection = Pubkey::new_unique();
    let guard = sim
        .initialize_guard(
            "proxy-collection",
            GuardType::CollectionMint {
                guard_data: vec![MultiplierConfig {
                    address: collection,
                    multiplier: 1,
                }],
            },
        )
        .unwrap();
    let nft_voter = sim
        .initialize_nft_voter("proxy-holders", Pubkey::new_unique(), guard)
        .unwrap();
    let state_controller = Pubkey::new_unique();
    let config = sim
        .initialize_proposal_config("proxied", proxy_key, state_controller, Pubkey::default())
        .unwrap();
    let namespace = Pubkey::new_unique();
    let proposal = sim
        .initialize_proposal(
            namespace,
            namespace,
            config,
            vec![0],
            "routed",
            &["Yes", "No"],
            1,
        )
        .unwrap();
    ProxyFixture {
        collection,
        guard,
        nft_voter,
        proposal,
        config,
        state_controller,
    }
}

#[test]
fn test_conditional_routes_to_nft_voter() {
    init_logging();

    let mut sim = GovSim::new();
    let proxy_key = mgv1_vote_proxy_program::state::proxy_address("router");
    let f = proxy_fixture(&mut sim, proxy_key);

    // Route Voting-state votes (ordinal 2) to the NFT voter.
    sim.initialize_proxy(
        "router",
        Pubkey::new_unique(),
        vec![when_state(2, f.nft_voter)],
        Pubkey::default(),
    )
    .unwrap();
    sim.update_state(
        f.state_controller,
        f.proposal,
        f.config,
        ProposalState::Voting { start_ts: sim.now() },
    )
    .unwrap();

    let voter = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    sim.seed_nft_metadata(mint, f.collection, true);
    let token_account = sim.seed_token_account(mint, voter, 1);

    let marker_key = sim
        .proxy_nft_vote(
            proxy_key,
            voter,
            f.nft_voter,
            mint,
            token_account,
            f.proposal,
            f.config,
            f.guard,
            0,
        )
        .unwrap();

    assert_eq!(sim.choice_weight(&f.proposal, 0), 1);
    let marker = sim.marker(&marker_key);
    assert_eq!(marker.voter, voter);
    assert_eq!(marker.choices, vec![0]);
    println!("✓ Proxy routed the vote into the NFT voter");
}

#[test]
fn test_proxy_routes_relinquish_too() {
    init_logging();

    let mut sim = GovSim::new();
    let proxy_key = mgv1_vote_proxy_program::state::proxy_address("round");
    let f = proxy_fixture(&mut sim, proxy_key);
    sim.initialize_proxy(
        "round",
        Pubkey::new_unique(),
        vec![when_state(2, f.nft_voter)],
        Pubkey::default(),
    )
    .unwrap();
    sim.update_state(
        f.state_controller,
        f.proposal,
        f.config,
        ProposalState::Voting { start_ts: sim.now() },
    )
    .unwrap();

    let voter = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    sim.seed_nft_metadata(mint, f.collection, true);
    let token_account = sim.seed_token_account(mint, voter, 1);

    let marker_key = sim
        .proxy_nft_vote(
            proxy_key,
            voter,
            f.nft_voter,
            mint,
            token_account,
            f.proposal,
            f.config,
            f.guard,
            0,
        )
        .unwrap();
    assert_eq!(sim.choice_weight(&f.proposal, 0), 1);

    let refund = Pubkey::new_unique();
    sim.proxy_nft_relinquish(
        proxy_key,
        voter,
        refund,
        f.nft_voter,
        mint,
        f.proposal,
        f.config,
        0,
    )
    .unwrap();
    assert_eq!(sim.choice_weight(&f.proposal, 0), 0);
    assert!(sim.ledger.account(&marker_key).is_none());
    println!("✓ Relinquish routed back through the proxy, marker closed");
}

#[test]
fn test_no_match_without_fallback_fails() {
    init_logging();

    let mut sim = GovSim::new();
    let proxy_key = mgv1_vote_proxy_program::state::proxy_address("strict");
    let f = proxy_fixture(&mut sim, proxy_key);

    // Conditional only matches Draft (ordinal 0); no fallback.
    sim.initialize_proxy(
        "strict",
        Pubkey::new_unique(),
        vec![when_state(0, f.nft_voter)],
        Pubkey::default(),
    )
    .unwrap();
    sim.update_state(
        f.state_controller,
        f.proposal,
        f.config,
        ProposalState::Voting { start_ts: sim.now() },
    )
    .unwrap();

    let voter = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    sim.seed_nft_metadata(mint, f.collection, true);
    let token_account = sim.seed_token_account(mint, voter, 1);

    let result = sim.proxy_nft_vote(
        proxy_key,
        voter,
        f.nft_voter,
        mint,
        token_account,
        f.proposal,
        f.config,
        f.guard,
        0,
    );
    assert_eq!(result, Err(ProxyError::NoMatchingConditional.into()));
    assert_eq!(sim.choice_weight(&f.proposal, 0), 0);
    println!("✓ No match and no fallback fails NoMatchingConditional");
}

#[test]
fn test_fallback_catches_unmatched_states() {
    init_logging();

    let mut sim = GovSim::new();
    let proxy_key = mgv1_vote_proxy_program::state::proxy_address("fallback");
    let f = proxy_fixture(&mut sim, proxy_key);

    // Conditional never matches Voting; the NFT voter is the fallback.
    sim.initialize_proxy(
        "fallback",
        Pubkey::new_unique(),
        vec![when_state(0, Pubkey::new_unique())],
        f.nft_voter,
    )
    .unwrap();
    sim.update_state(
        f.state_controller,
        f.proposal,
        f.config,
        ProposalState::Voting { start_ts: sim.now() },
    )
    .unwrap();

    let voter = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    sim.seed_nft_metadata(mint, f.collection, true);
    let token_account = sim.seed_token_account(mint, voter, 1);

    sim.proxy_nft_vote(
        proxy_key,
        voter,
        f.nft_voter,
        mint,
        token_account,
        f.proposal,
        f.config,
        f.guard,
        0,
    )
    .unwrap();
    assert_eq!(sim.choice_weight(&f.proposal, 0), 1);
    println!("✓ Fallback controller caught the vote");
}

#[test]
fn test_selected_controller_needs_an_implementation() {
    init_logging();

    let mut sim = GovSim::new();
    let proxy_key = mgv1_vote_proxy_program::state::proxy_address("dangling");
    let f = proxy_fixture(&mut sim, proxy_key);

    // Routes to a controller address nobody supplies an implementation for.
    let ghost = Pubkey::new_unique();
    sim.initialize_proxy(
        "dangling",
        Pubkey::new_unique(),
        vec![when_state(2, ghost)],
        Pubkey::default(),
    )
    .unwrap();
    sim.update_state(
        f.state_controller,
        f.proposal,
        f.config,
        ProposalState::Voting { start_ts: sim.now() },
    )
    .unwrap();

    let voter = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    sim.seed_nft_metadata(mint, f.collection, true);
    let token_account = sim.seed_token_account(mint, voter, 1);

    let result = sim.proxy_nft_vote(
        proxy_key,
        voter,
        f.nft_voter,
        mint,
        token_account,
        f.proposal,
        f.config,
        f.guard,
        0,
    );
    assert_eq!(result, Err(ProxyError::InvalidController.into()));
    println!("✓ Dangling controller address fails InvalidController");
}

#[test]
fn test_useless_proxy_rejected_at_creation() {
    init_logging();

    let mut sim = GovSim::new();
    let result = sim.initialize_proxy(
        "useless",
        Pubkey::new_unique(),
        vec![],
        Pubkey::default(),
    );
    assert_eq!(result, Err(ProxyError::InvalidProxyConfig.into()));
    println!("✓ Proxy with neither conditionals nor fallback rejected");
}

#[test]
fn test_direct_vote_bypassing_proxy_is_unauthorized() {
    init_logging();

    let mut sim = GovSim::new();
    let proxy_key = mgv1_vote_proxy_program::state::proxy_address("bypass");
    let f = proxy_fixture(&mut sim, proxy_key);
    sim.initialize_proxy(
        "bypass",
        Pubkey::new_unique(),
        vec![when_state(2, f.nft_voter)],
        Pubkey::default(),
    )
    .unwrap();
    sim.update_state(
        f.state_controller,
        f.proposal,
        f.config,
        ProposalState::Voting { start_ts: sim.now() },
    )
    .unwrap();

    let voter = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    sim.seed_nft_metadata(mint, f.collection, true);
    let token_account = sim.seed_token_account(mint, voter, 1);

    // Going straight to the NFT voter: it would sign as itself, but the
    // config's vote controller is the proxy, so the ledger refuses.
    let result = sim.nft_vote(
        f.nft_voter,
        voter,
        mint,
        token_account,
        f.proposal,
        f.config,
        f.guard,
        0,
        None,
    );
    assert!(result.is_err());
    assert_eq!(sim.choice_weight(&f.proposal, 0), 0);
    println!("✓ Bypassing the proxy cannot reach the tally");
}
