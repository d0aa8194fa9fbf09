//! E2E Test: Resolution Lifecycle
//!
//! Verifies the state controller end to end:
//! - owner-gated manual transitions forwarded through the settings record
//! - the permissionless resolve crank against a deadline strategy
//! - eager resolution through the on-vote hook
//! - malformed strategies rejected at creation

use {
    mgv1_e2e_tests::helpers::*,
    mgv1_proposal_program::{ProposalError, ProposalState},
    mgv1_state_controller_program::{
        EagerResolutionHook, ResolutionNode, ResolutionStrategy, StateControllerError,
    },
    solana_pubkey::Pubkey,
};

/// Multisig-controlled proposal whose state controller is a settings record
/// carrying `strategy`.  Returns (members, multisig, settings, proposal,
/// config, owner).
fn resolution_fixture(
    sim: &mut GovSim,
    strategy: ResolutionStrategy,
    on_vote_hook: Pubkey,
) -> (Vec<Pubkey>, Pubkey, Pubkey, Pubkey, Pubkey, Pubkey) {
    let members = vec![
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        Pubkey::new_unique(),
    ];
    let multisig_config = sim
        .initialize_multisig("resolvers", members.clone())
        .unwrap();
    let settings = sim
        .initialize_resolution_settings("weekly", strategy)
        .unwrap();
    let config = sim
        .initialize_proposal_config("resolved-votes", multisig_config, settings, on_vote_hook)
        .unwrap();
    let owner = Pubkey::new_unique();
    let namespace = Pubkey::new_unique();
    let proposal = sim
        .initialize_proposal(
            namespace,
            owner,
            config,
            vec![0],
            "pick a venue",
            &["Hall", "Garden"],
            1,
        )
        .unwrap();
    (members, multisig_config, settings, proposal, config, owner)
}

#[test]
fn test_owner_opens_voting_through_controller() {
    init_logging();

    let mut sim = GovSim::new();
    let strategy = ResolutionStrategy {
        nodes: vec![
            ResolutionNode::OffsetFromStartTs { offset: 3_600 },
            ResolutionNode::Top { n: 1 },
            ResolutionNode::And,
        ],
    };
    let (_members, _multisig, settings, proposal, config, owner) =
        resolution_fixture(&mut sim, strategy, Pubkey::default());

    // Only the proposal owner can drive manual transitions.
    let outsider = Pubkey::new_unique();
    let result = sim.controller_update_state(
        outsider,
        settings,
        proposal,
        config,
        ProposalState::Voting { start_ts: 0 },
    );
    assert_eq!(result, Err(StateControllerError::Unauthorized.into()));

    sim.controller_update_state(
        owner,
        settings,
        proposal,
        config,
        ProposalState::Voting { start_ts: 0 },
    )
    .unwrap();

    // The controller stamps the actual wall-clock start.
    assert_eq!(
        sim.proposal(&proposal).state,
        ProposalState::Voting { start_ts: START_TS }
    );
    println!("✓ Owner opened voting; start_ts stamped to now");
}

#[test]
fn test_deadline_resolution_crank() {
    init_logging();

    let mut sim = GovSim::new();
    let strategy = ResolutionStrategy {
        nodes: vec![
            ResolutionNode::OffsetFromStartTs { offset: 3_600 },
            ResolutionNode::Top { n: 1 },
            ResolutionNode::And,
        ],
    };
    let (members, multisig_config, settings, proposal, config, owner) =
        resolution_fixture(&mut sim, strategy, Pubkey::default());

    sim.controller_update_state(
        owner,
        settings,
        proposal,
        config,
        ProposalState::Voting { start_ts: 0 },
    )
    .unwrap();

    sim.multisig_vote(members[0], multisig_config, proposal, config, 1, None)
        .unwrap();
    sim.multisig_vote(members[1], multisig_config, proposal, config, 1, None)
        .unwrap();
    sim.multisig_vote(members[2], multisig_config, proposal, config, 0, None)
        .unwrap();

    // Deadline not reached: the crank refuses.
    let result = sim.resolve(settings, proposal, config);
    assert_eq!(result, Err(StateControllerError::NotResolvable.into()));
    println!("✓ Crank before the deadline fails NotResolvable");

    sim.warp(3_601);
    sim.resolve(settings, proposal, config).unwrap();

    let record = sim.proposal(&proposal);
    assert_eq!(
        record.state,
        ProposalState::Resolved {
            choices: vec![1],
            end_ts: sim.now(),
        }
    );
    println!("✓ Crank resolved the proposal to the top choice");

    // Terminal: further votes bounce.
    let result = sim.multisig_relinquish(members[0], multisig_config, proposal, config, None);
    assert_eq!(result, Err(ProposalError::ProposalFinalized.into()));
    println!("✓ Resolved proposal rejects further vote mutations");
}

#[test]
fn test_eager_resolution_on_vote() {
    init_logging();

    let mut sim = GovSim::new();
    // Resolve the instant any choice accumulates weight 2.
    let strategy = ResolutionStrategy {
        nodes: vec![
            ResolutionNode::ChoiceVoteWeight {
                weight_threshold: 2,
            },
            ResolutionNode::NumResolved { n: 1 },
        ],
    };
    let (members, multisig_config, settings, proposal, config, owner) = resolution_fixture(
        &mut sim,
        strategy,
        mgv1_state_controller_program::id(),
    );

    sim.controller_update_state(
        owner,
        settings,
        proposal,
        config,
        ProposalState::Voting { start_ts: 0 },
    )
    .unwrap();

    let hook = EagerResolutionHook;

    // First vote: threshold not met, proposal stays open.
    sim.multisig_vote(members[0], multisig_config, proposal, config, 0, Some(&hook))
        .unwrap();
    assert_eq!(
        sim.proposal(&proposal).state,
        ProposalState::Voting { start_ts: START_TS }
    );
    println!("✓ First vote leaves the proposal open");

    // Second vote crosses the threshold: the hook resolves eagerly.
    sim.multisig_vote(members[1], multisig_config, proposal, config, 0, Some(&hook))
        .unwrap();
    let record = sim.proposal(&proposal);
    assert_eq!(
        record.state,
        ProposalState::Resolved {
            choices: vec![0],
            end_ts: sim.now(),
        }
    );
    assert_eq!(record.choices[0].weight, 2);
    println!("✓ Deciding vote resolved the proposal in the same call");

    // Third member is too late.
    let result =
        sim.multisig_vote(members[2], multisig_config, proposal, config, 0, Some(&hook));
    assert_eq!(result, Err(ProposalError::ProposalFinalized.into()));
    assert_eq!(sim.choice_weight(&proposal, 0), 2);
    println!("✓ Post-resolution vote rejected atomically");
}

#[test]
fn test_vote_without_required_hook_fails() {
    init_logging();

    let mut sim = GovSim::new();
    let strategy = ResolutionStrategy {
        nodes: vec![
            ResolutionNode::ChoiceVoteWeight {
                weight_threshold: 2,
            },
            ResolutionNode::NumResolved { n: 1 },
        ],
    };
    let (members, multisig_config, settings, proposal, config, owner) = resolution_fixture(
        &mut sim,
        strategy,
        mgv1_state_controller_program::id(),
    );
    sim.controller_update_state(
        owner,
        settings,
        proposal,
        config,
        ProposalState::Voting { start_ts: 0 },
    )
    .unwrap();

    // The config names a hook; voting without supplying it must fail.
    let result = sim.multisig_vote(members[0], multisig_config, proposal, config, 0, None);
    assert_eq!(result, Err(ProposalError::InvalidOnVoteHook.into()));
    assert_eq!(sim.choice_weight(&proposal, 0), 0);
    println!("✓ Configured hook is mandatory");
}

#[test]
fn test_malformed_strategy_rejected_at_creation() {
    init_logging();

    let mut sim = GovSim::new();
    let result = sim.initialize_resolution_settings(
        "lopsided",
        ResolutionStrategy {
            nodes: vec![ResolutionNode::And],
        },
    );
    assert_eq!(result, Err(StateControllerError::MalformedStrategy.into()));
    println!("✓ Stack-underflowing strategy rejected");
}
