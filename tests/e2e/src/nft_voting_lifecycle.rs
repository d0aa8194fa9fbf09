//! E2E Test: NFT Voting Lifecycle
//!
//! Verifies the collection-gated vote controller:
//! - guard-derived weights land on the tally
//! - one marker per (voter, proposal, mint); exact-choice repeats rejected
//! - `max_choices_per_voter` enforcement
//! - relinquish restores the tally and closes emptied markers
//! - unverified collections never vote

use {
    mgv1_e2e_tests::helpers::*,
    mgv1_ledger::LedgerError,
    mgv1_nft_voter_program::NftVoterError,
    mgv1_org_guard_program::{GuardError, GuardType, MultiplierConfig},
    mgv1_proposal_program::ProposalState,
    solana_pubkey::Pubkey,
};

/// A registry over a 2x-weight collection guard and a 3-choice proposal in
/// `Voting` with `max_choices_per_voter = 2`.
struct NftFixture {
    collection: Pubkey,
    guard: Pubkey,
    nft_voter: Pubkey,
    proposal: Pubkey,
    config: Pubkey,
}

fn nft_fixture(sim: &mut GovSim) -> NftFixture {
    let collection = Pubkey::new_unique();
    let guard = sim
        .initialize_guard(
            "collection",
            GuardType::CollectionMint {
                guard_data: vec![MultiplierConfig {
                    address: collection,
                    multiplier: 2,
                }],
            },
        )
        .unwrap();
    let nft_voter = sim
        .initialize_nft_voter("holders", Pubkey::new_unique(), guard)
        .unwrap();
    let state_controller = Pubkey::new_unique();
    let config = sim
        .initialize_proposal_config("nft-votes", nft_voter, state_controller, Pubkey::default())
        .unwrap();
    let namespace = Pubkey::new_unique();
    let proposal = sim
        .initialize_proposal(
            namespace,
            namespace,
            config,
            vec![0],
            "art direction",
            &["Red", "Green", "Blue"],
            2,
        )
        .unwrap();
    sim.update_state(
        state_controller,
        proposal,
        config,
        ProposalState::Voting { start_ts: sim.now() },
    )
    .unwrap();
    NftFixture {
        collection,
        guard,
        nft_voter,
        proposal,
        config,
    }
}

#[test]
fn test_nft_vote_carries_guard_weight() {
    init_logging();

    let mut sim = GovSim::new();
    let f = nft_fixture(&mut sim);

    let voter = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    sim.seed_nft_metadata(mint, f.collection, true);
    let token_account = sim.seed_token_account(mint, voter, 1);

    let marker_key = sim
        .nft_vote(
            f.nft_voter,
            voter,
            mint,
            token_account,
            f.proposal,
            f.config,
            f.guard,
            0,
            None,
        )
        .unwrap();

    // Weight 2 from the collection multiplier.
    assert_eq!(sim.choice_weight(&f.proposal, 0), 2);
    let marker = sim.marker(&marker_key);
    assert_eq!(marker.voter, voter);
    assert_eq!(marker.mint, mint);
    assert_eq!(marker.choices, vec![0]);
    assert_eq!(marker.weight, 2);
    assert_ne!(marker.voted_at, 0);
    println!("✓ NFT vote landed with guard weight 2");
}

#[test]
fn test_same_mint_cannot_double_vote() {
    init_logging();

    let mut sim = GovSim::new();
    let f = nft_fixture(&mut sim);

    let voter = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    sim.seed_nft_metadata(mint, f.collection, true);
    let token_account = sim.seed_token_account(mint, voter, 1);

    sim.nft_vote(f.nft_voter, voter, mint, token_account, f.proposal, f.config, f.guard, 0, None)
        .unwrap();
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
    assert_eq!(result, Err(NftVoterError::AlreadyVoted.into()));
    assert_eq!(sim.choice_weight(&f.proposal, 0), 2);
    println!("✓ Exact-choice repeat rejected, tally unchanged");

    // A second choice is allowed (max_choices_per_voter = 2)...
    sim.nft_vote(f.nft_voter, voter, mint, token_account, f.proposal, f.config, f.guard, 1, None)
        .unwrap();
    // ...but a third is not.
    let result = sim.nft_vote(
        f.nft_voter,
        voter,
        mint,
        token_account,
        f.proposal,
        f.config,
        f.guard,
        2,
        None,
    );
    assert_eq!(result, Err(NftVoterError::MaxChoicesExceeded.into()));
    println!("✓ Per-voter choice limit enforced");
}

#[test]
fn test_two_nfts_two_markers() {
    init_logging();

    let mut sim = GovSim::new();
    let f = nft_fixture(&mut sim);

    let voter = Pubkey::new_unique();
    let first = Pubkey::new_unique();
    let second = Pubkey::new_unique();
    sim.seed_nft_metadata(first, f.collection, true);
    sim.seed_nft_metadata(second, f.collection, true);
    let first_tokens = sim.seed_token_account(first, voter, 1);
    let second_tokens = sim.seed_token_account(second, voter, 1);

    sim.nft_vote(f.nft_voter, voter, first, first_tokens, f.proposal, f.config, f.guard, 0, None)
        .unwrap();
    sim.nft_vote(f.nft_voter, voter, second, second_tokens, f.proposal, f.config, f.guard, 0, None)
        .unwrap();

    // Each NFT carries its own weight.
    assert_eq!(sim.choice_weight(&f.proposal, 0), 4);
    println!("✓ Two NFTs stacked to weight 4");
}

#[test]
fn test_relinquish_restores_and_closes() {
    init_logging();

    let mut sim = GovSim::new();
    let f = nft_fixture(&mut sim);

    let voter = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    sim.seed_nft_metadata(mint, f.collection, true);
    let token_account = sim.seed_token_account(mint, voter, 1);

    let marker_key = sim
        .nft_vote(f.nft_voter, voter, mint, token_account, f.proposal, f.config, f.guard, 0, None)
        .unwrap();
    sim.nft_vote(f.nft_voter, voter, mint, token_account, f.proposal, f.config, f.guard, 2, None)
        .unwrap();
    assert_eq!(sim.choice_weight(&f.proposal, 0), 2);
    assert_eq!(sim.choice_weight(&f.proposal, 2), 2);

    let refund = Pubkey::new_unique();

    // Relinquishing a choice never committed is refused.
    let result =
        sim.nft_relinquish(f.nft_voter, voter, refund, mint, f.proposal, f.config, 1, None);
    assert_eq!(result, Err(NftVoterError::NoVoteForThisChoice.into()));

    // Only the marker's voter may relinquish.
    let thief = Pubkey::new_unique();
    let result =
        sim.nft_relinquish(f.nft_voter, thief, refund, mint, f.proposal, f.config, 0, None);
    assert_eq!(result, Err(NftVoterError::Unauthorized.into()));

    // First choice back: marker survives with the second.
    sim.nft_relinquish(f.nft_voter, voter, refund, mint, f.proposal, f.config, 0, None)
        .unwrap();
    assert_eq!(sim.choice_weight(&f.proposal, 0), 0);
    assert_eq!(sim.marker(&marker_key).choices, vec![2]);

    // Second choice back: tally restored, marker closed.
    sim.nft_relinquish(f.nft_voter, voter, refund, mint, f.proposal, f.config, 2, None)
        .unwrap();
    assert_eq!(sim.choice_weight(&f.proposal, 2), 0);
    assert!(sim.ledger.account(&marker_key).is_none());
    println!("✓ Round trip restored both tallies and closed the marker");
}

#[test]
fn test_unverified_collection_cannot_vote() {
    init_logging();

    let mut sim = GovSim::new();
    let f = nft_fixture(&mut sim);

    let voter = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    sim.seed_nft_metadata(mint, f.collection, false);
    let token_account = sim.seed_token_account(mint, voter, 1);

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
    assert_eq!(result, Err(GuardError::CollectionVerificationFailed.into()));
    assert_eq!(sim.choice_weight(&f.proposal, 0), 0);
    println!("✓ Unverified collection rejected regardless of configuration");
}

#[test]
fn test_foreign_metadata_address_rejected() {
    init_logging();

    let mut sim = GovSim::new();
    let f = nft_fixture(&mut sim);

    let voter = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    // Metadata seeded for a DIFFERENT mint; the supplied metadata account
    // for `mint` is then not at its canonical derived address.
    let other_mint = Pubkey::new_unique();
    sim.seed_nft_metadata(other_mint, f.collection, true);
    let token_account = sim.seed_token_account(mint, voter, 1);

    let marker_key = mgv1_nft_voter_program::state::marker_address(&mint, &f.proposal);
    let data =
        bincode::serialize(&mgv1_nft_voter_program::NftVoterInstruction::VoteV0 { choice: 0 })
            .unwrap();
    let accounts = vec![
        mgv1_ledger::AccountMeta::new(sim.payer, true),
        mgv1_ledger::AccountMeta::new_readonly(f.nft_voter, false),
        mgv1_ledger::AccountMeta::new_readonly(voter, true),
        mgv1_ledger::AccountMeta::new_readonly(mint, false),
        // Canonical address for the wrong mint.
        mgv1_ledger::AccountMeta::new_readonly(
            mgv1_org_guard_program::token::metadata_address(&other_mint),
            false,
        ),
        mgv1_ledger::AccountMeta::new_readonly(token_account, false),
        mgv1_ledger::AccountMeta::new(marker_key, false),
        mgv1_ledger::AccountMeta::new(f.proposal, false),
        mgv1_ledger::AccountMeta::new_readonly(f.config, false),
        mgv1_ledger::AccountMeta::new_readonly(f.guard, false),
        mgv1_ledger::AccountMeta::new_readonly(f.nft_voter, false),
    ];
    let result: Result<(), LedgerError> = sim.ledger.execute(accounts, |ctx| {
        mgv1_nft_voter_program::process_instruction(ctx, &data, None)
    });
    assert_eq!(result, Err(GuardError::InvalidDerivedAddress.into()));
    println!("✓ Metadata at a non-canonical address rejected");
}
