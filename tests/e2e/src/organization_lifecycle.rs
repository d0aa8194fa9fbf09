//! E2E Test: Organization Lifecycle
//!
//! Verifies the proposal factory:
//! - counter-seeded proposal addresses, in order, collision-free
//! - the counter never advances on guard failure
//! - guard kind enforcement per factory entrypoint
//! - authority-gated organization updates

use {
    mgv1_e2e_tests::helpers::*,
    mgv1_org_guard_program::{DivisorConfig, GuardError, GuardType, MultiplierConfig},
    mgv1_organization_program::OrganizationError,
    solana_pubkey::Pubkey,
};

#[test]
fn test_sequential_proposals_use_counter_seeds() {
    init_logging();

    let mut sim = GovSim::new();
    let authority = Pubkey::new_unique();
    let guard = sim.initialize_guard("open", GuardType::Permissive).unwrap();
    let config = sim
        .initialize_proposal_config(
            "org-default",
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::default(),
        )
        .unwrap();
    let org = sim
        .initialize_organization("builders", authority, guard, config)
        .unwrap();
    assert_eq!(sim.organization(&org).num_proposals, 0);
    println!("✓ Organization created with counter 0");

    let owner = Pubkey::new_unique();
    let first = sim
        .create_proposal_permissively(guard, owner, org, config, "first", &["Yes", "No"])
        .unwrap();
    let second = sim
        .create_proposal_permissively(guard, owner, org, config, "second", &["Yes", "No"])
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(sim.organization(&org).num_proposals, 2);
    assert_eq!(sim.proposal(&first).seed, 0u32.to_le_bytes().to_vec());
    assert_eq!(sim.proposal(&second).seed, 1u32.to_le_bytes().to_vec());
    assert_eq!(sim.proposal(&first).namespace, org);
    println!("✓ Two proposals at distinct counter-seeded addresses, counter = 2");
}

#[test]
fn test_guard_failure_leaves_counter_untouched() {
    init_logging();

    let mut sim = GovSim::new();
    let member = Pubkey::new_unique();
    let guard = sim
        .initialize_guard(
            "wallets",
            GuardType::WalletList {
                guard_data: vec![MultiplierConfig {
                    address: member,
                    multiplier: 1,
                }],
            },
        )
        .unwrap();
    let config = sim
        .initialize_proposal_config(
            "gated",
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::default(),
        )
        .unwrap();
    let org = sim
        .initialize_organization("gated-org", Pubkey::new_unique(), guard, config)
        .unwrap();

    // An unlisted wallet is refused and the counter stays put.
    let outsider = Pubkey::new_unique();
    let result =
        sim.create_proposal_by_wallet(guard, outsider, org, config, outsider, "nope", &["A"]);
    assert_eq!(result, Err(GuardError::NotInList.into()));
    assert_eq!(sim.organization(&org).num_proposals, 0);
    println!("✓ Unlisted proposer rejected, counter untouched");

    // The listed wallet goes through.
    sim.create_proposal_by_wallet(guard, member, org, config, member, "yep", &["A"])
        .unwrap();
    assert_eq!(sim.organization(&org).num_proposals, 1);
    println!("✓ Listed proposer created proposal, counter = 1");
}

#[test]
fn test_factory_enforces_guard_kind() {
    init_logging();

    let mut sim = GovSim::new();
    let guard = sim.initialize_guard("open2", GuardType::Permissive).unwrap();
    let config = sim
        .initialize_proposal_config(
            "kind",
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::default(),
        )
        .unwrap();
    let org = sim
        .initialize_organization("kind-org", Pubkey::new_unique(), guard, config)
        .unwrap();

    // A Permissive guard cannot serve the wallet-list entrypoint.
    let wallet = Pubkey::new_unique();
    let result = sim.create_proposal_by_wallet(guard, wallet, org, config, wallet, "x", &["A"]);
    assert_eq!(result, Err(GuardError::GuardTypeMismatch.into()));
    println!("✓ Guard kind / entrypoint mismatch rejected");
}

#[test]
fn test_token_guard_gates_on_balance() {
    init_logging();

    let mut sim = GovSim::new();
    let mint = Pubkey::new_unique();
    let guard = sim
        .initialize_guard(
            "holders",
            GuardType::MintList {
                guard_data: vec![DivisorConfig {
                    address: mint,
                    divisor: 100,
                }],
            },
        )
        .unwrap();
    let config = sim
        .initialize_proposal_config(
            "token-gated",
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::default(),
        )
        .unwrap();
    let org = sim
        .initialize_organization("token-org", Pubkey::new_unique(), guard, config)
        .unwrap();

    // Not enough tokens for one unit of weight.
    let poor = Pubkey::new_unique();
    let poor_tokens = sim.seed_token_account(mint, poor, 99);
    let result =
        sim.create_proposal_by_token(guard, poor, org, config, poor, poor_tokens, "x", &["A"]);
    assert_eq!(result, Err(GuardError::InsufficientWeight.into()));

    // Enough tokens.
    let rich = Pubkey::new_unique();
    let rich_tokens = sim.seed_token_account(mint, rich, 450);
    sim.create_proposal_by_token(guard, rich, org, config, rich, rich_tokens, "y", &["A"])
        .unwrap();
    assert_eq!(sim.organization(&org).num_proposals, 1);
    println!("✓ Token guard gates on divided balance");

    // Someone else's token account is not a valid proof.
    let thief = Pubkey::new_unique();
    let result =
        sim.create_proposal_by_token(guard, thief, org, config, thief, rich_tokens, "z", &["A"]);
    assert_eq!(result, Err(GuardError::InvalidTokenOwner.into()));
    println!("✓ Foreign token account rejected");
}

#[test]
fn test_update_organization_is_authority_gated() {
    init_logging();

    let mut sim = GovSim::new();
    let authority = Pubkey::new_unique();
    let guard = sim.initialize_guard("open3", GuardType::Permissive).unwrap();
    let config = sim
        .initialize_proposal_config(
            "upd",
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::default(),
        )
        .unwrap();
    let org = sim
        .initialize_organization("upd-org", authority, guard, config)
        .unwrap();

    let outsider = Pubkey::new_unique();
    let result = sim.update_organization(outsider, org, Some("https://evil.example".into()), None);
    assert_eq!(result, Err(OrganizationError::Unauthorized.into()));
    println!("✓ Outsider cannot update organization");

    let new_authority = Pubkey::new_unique();
    sim.update_organization(
        authority,
        org,
        Some("https://updated.example".into()),
        Some(new_authority),
    )
    .unwrap();
    let record = sim.organization(&org);
    assert_eq!(record.uri, "https://updated.example");
    assert_eq!(record.authority, new_authority);
    println!("✓ Authority updated uri and handed over control");

    // The old authority is out.
    let result = sim.update_organization(authority, org, None, Some(authority));
    assert_eq!(result, Err(OrganizationError::Unauthorized.into()));
    println!("✓ Old authority locked out after handover");
}
