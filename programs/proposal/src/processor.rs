//! Instruction processing logic for the MGv1 Proposal program.

use {
    crate::{
        constants::{
            MAX_CHOICE_NAME_LEN, MAX_NAME_LEN, MAX_SEED_LEN, MAX_TAG_LEN, MAX_URI_LEN,
        },
        error::ProposalError,
        instruction::{ChoiceArg, ProposalInstruction},
        state::{
            proposal_address, proposal_config_address, Choice, ProposalConfigV0, ProposalState,
            ProposalV0,
        },
    },
    log::*,
    mgv1_ledger::{limited_deserialize, CallContext, LedgerError, MAX_INSTRUCTION_DATA_SIZE},
    solana_pubkey::Pubkey,
};

// ---------------------------------------------------------------------------
// Program ID
// ---------------------------------------------------------------------------

solana_pubkey::declare_id!("Proposa111111111111111111111111111111111111");

// ---------------------------------------------------------------------------
// On-vote hook capability
// ---------------------------------------------------------------------------

/// The callable a vote controller supplies when the bound config names an
/// on-vote hook.
///
/// The hook runs synchronously after the vote mutation has been staged.  Its
/// failure fails the whole vote — fire-and-forget semantics are deliberately
/// not offered, so a hook can act as a consistency check over the tallies it
/// observes.
pub trait OnVoteHook {
    /// The address this implementation answers for.  It must equal the
    /// config's `on_vote_hook` field or the vote is rejected.
    fn id(&self) -> Pubkey;

    /// Observe a vote on `proposal` bound to `proposal_config`.
    fn on_vote(
        &self,
        ctx: &mut CallContext,
        proposal: &Pubkey,
        proposal_config: &Pubkey,
    ) -> Result<(), LedgerError>;
}

// ---------------------------------------------------------------------------
// Entrypoint
// ---------------------------------------------------------------------------

/// Process one proposal-program instruction.
///
/// `on_vote_hook` is the hook capability for `VoteV0` calls whose config
/// names a hook; other instructions ignore it.
pub fn process_instruction(
    ctx: &mut CallContext,
    instruction_data: &[u8],
    on_vote_hook: Option<&dyn OnVoteHook>,
) -> Result<(), LedgerError> {
    let instruction: ProposalInstruction =
        limited_deserialize(instruction_data, MAX_INSTRUCTION_DATA_SIZE)?;

    trace!("proposal process_instruction: {instruction:?}");

    match instruction {
        ProposalInstruction::InitializeProposalConfigV0 {
            name,
            vote_controller,
            state_controller,
            on_vote_hook,
        } => process_initialize_proposal_config_v0(
            ctx,
            name,
            vote_controller,
            state_controller,
            on_vote_hook,
        ),
        ProposalInstruction::InitializeProposalV0 {
            seed,
            name,
            uri,
            max_choices_per_voter,
            choices,
            tags,
        } => process_initialize_proposal_v0(
            ctx,
            seed,
            name,
            uri,
            max_choices_per_voter,
            choices,
            tags,
        ),
        ProposalInstruction::UpdateStateV0 { new_state } => {
            process_update_state_v0(ctx, new_state)
        }
        ProposalInstruction::VoteV0 {
            choice,
            weight,
            remove_vote,
        } => process_vote_v0(ctx, choice, weight, remove_vote, on_vote_hook),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load and deserialise the `ProposalConfigV0` at `address`.
pub fn load_proposal_config(
    ctx: &CallContext,
    address: &Pubkey,
) -> Result<ProposalConfigV0, LedgerError> {
    let account = ctx.account(address).ok_or(ProposalError::NotInitialized)?;
    if account.owner != id() {
        return Err(ProposalError::InvalidAccountOwner.into());
    }
    ProposalConfigV0::deserialize(&account.data)
        .map_err(|_| ProposalError::NotInitialized.into())
}

/// Load and deserialise the `ProposalV0` at `address`.
pub fn load_proposal(ctx: &CallContext, address: &Pubkey) -> Result<ProposalV0, LedgerError> {
    let account = ctx.account(address).ok_or(ProposalError::NotInitialized)?;
    if account.owner != id() {
        return Err(ProposalError::InvalidAccountOwner.into());
    }
    ProposalV0::deserialize(&account.data).map_err(|_| ProposalError::InvalidAccountData.into())
}

fn save_proposal(
    ctx: &mut CallContext,
    address: &Pubkey,
    proposal: &ProposalV0,
) -> Result<(), LedgerError> {
    let data = proposal
        .to_account_data()
        .map_err(|_| ProposalError::InvalidAccountData)?;
    ctx.set_account(*address, id(), data)
}

fn check_uninitialized(ctx: &CallContext, address: &Pubkey) -> Result<(), LedgerError> {
    if ctx.account(address).is_some_and(|a| !a.data.is_empty()) {
        return Err(ProposalError::AddressCollision.into());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Instruction handlers
// ---------------------------------------------------------------------------

/// `InitializeProposalConfigV0`
///
/// Accounts:
///   0. `[signer]`           — Payer.
///   1. `[writable]`         — Proposal config account.
pub fn process_initialize_proposal_config_v0(
    ctx: &mut CallContext,
    name: String,
    vote_controller: Pubkey,
    state_controller: Pubkey,
    on_vote_hook: Pubkey,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(2)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(ProposalError::MissingRequiredSignature.into());
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ProposalError::NameTooLong.into());
    }

    let config_key = *ctx.instruction_account_key(1)?;
    if config_key != proposal_config_address(&name) {
        return Err(ProposalError::InvalidDerivedAddress.into());
    }
    check_uninitialized(ctx, &config_key)?;

    let config = ProposalConfigV0 {
        name,
        vote_controller,
        state_controller,
        on_vote_hook,
    };
    let data = config
        .to_account_data()
        .map_err(|_| ProposalError::InvalidAccountData)?;
    ctx.set_account(config_key, id(), data)?;

    debug!(
        "InitializeProposalConfigV0: config={config_key}, vote_controller={vote_controller}, \
         state_controller={state_controller}"
    );
    Ok(())
}

/// `InitializeProposalV0`
///
/// Accounts:
///   0. `[signer]`           — Payer.
///   1. `[signer]`           — Namespace.
///   2. `[]`                 — Owner.
///   3. `[writable]`         — Proposal account.
///   4. `[]`                 — Proposal config account.
pub fn process_initialize_proposal_v0(
    ctx: &mut CallContext,
    seed: Vec<u8>,
    name: String,
    uri: String,
    max_choices_per_voter: u16,
    choices: Vec<ChoiceArg>,
    tags: Vec<String>,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(5)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(ProposalError::MissingRequiredSignature.into());
    }
    if !ctx.is_instruction_account_signer(1)? {
        return Err(ProposalError::MissingRequiredSignature.into());
    }
    let namespace = *ctx.instruction_account_key(1)?;
    let owner = *ctx.instruction_account_key(2)?;
    let proposal_key = *ctx.instruction_account_key(3)?;
    let config_key = *ctx.instruction_account_key(4)?;

    if seed.len() > MAX_SEED_LEN {
        return Err(ProposalError::SeedTooLong.into());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ProposalError::NameTooLong.into());
    }
    if uri.len() > MAX_URI_LEN {
        return Err(ProposalError::UriTooLong.into());
    }
    for tag in &tags {
        if tag.len() > MAX_TAG_LEN {
            return Err(ProposalError::TagTooLong.into());
        }
    }
    for choice in &choices {
        if choice.name.len() > MAX_CHOICE_NAME_LEN {
            return Err(ProposalError::NameTooLong.into());
        }
        if choice.uri.as_ref().is_some_and(|uri| uri.len() > MAX_URI_LEN) {
            return Err(ProposalError::UriTooLong.into());
        }
    }

    // Choice and tag counts must stay indexable by u16.
    u16::try_from(choices.len()).map_err(|_| ProposalError::ArithmeticError)?;
    u16::try_from(tags.len()).map_err(|_| ProposalError::ArithmeticError)?;

    if proposal_key != proposal_address(&namespace, &seed) {
        return Err(ProposalError::InvalidDerivedAddress.into());
    }
    check_uninitialized(ctx, &proposal_key)?;

    // The config must exist; its contents are not consulted until voting.
    load_proposal_config(ctx, &config_key)?;

    let proposal = ProposalV0 {
        namespace,
        owner,
        state: ProposalState::Draft,
        created_at: ctx.clock().unix_timestamp,
        proposal_config: config_key,
        max_choices_per_voter,
        seed,
        name,
        uri,
        tags,
        choices: choices
            .into_iter()
            .map(|choice| Choice {
                weight: 0,
                name: choice.name,
                uri: choice.uri,
            })
            .collect(),
    };
    save_proposal(ctx, &proposal_key, &proposal)?;

    debug!("InitializeProposalV0: proposal={proposal_key}, namespace={namespace}");
    Ok(())
}

/// `UpdateStateV0`
///
/// Accounts:
///   0. `[signer]`           — State controller.
///   1. `[writable]`         — Proposal account.
///   2. `[]`                 — Proposal config account.
pub fn process_update_state_v0(
    ctx: &mut CallContext,
    new_state: ProposalState,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(3)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(ProposalError::MissingRequiredSignature.into());
    }
    let signer = *ctx.instruction_account_key(0)?;
    let proposal_key = *ctx.instruction_account_key(1)?;
    let config_key = *ctx.instruction_account_key(2)?;

    let mut proposal = load_proposal(ctx, &proposal_key)?;
    let config = load_proposal_config(ctx, &config_key)?;

    if proposal.proposal_config != config_key {
        return Err(ProposalError::InvalidProposalConfig.into());
    }
    if config.state_controller != signer {
        debug!("UpdateStateV0: signer {signer} is not the state controller");
        return Err(ProposalError::Unauthorized.into());
    }
    if proposal.state.is_terminal() {
        return Err(ProposalError::ProposalFinalized.into());
    }

    debug!(
        "UpdateStateV0: proposal={proposal_key}, {:?} -> {new_state:?}",
        proposal.state
    );
    proposal.state = new_state;
    save_proposal(ctx, &proposal_key, &proposal)
}

/// `VoteV0`
///
/// Accounts:
///   0. `[signer]`           — Vote controller.
///   1. `[writable]`         — Proposal account.
///   2. `[]`                 — Proposal config account.
///   3. `[]`                 — On-vote hook (required when the config names
///                             one).
pub fn process_vote_v0(
    ctx: &mut CallContext,
    choice: u16,
    weight: u128,
    remove_vote: bool,
    on_vote_hook: Option<&dyn OnVoteHook>,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(3)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(ProposalError::MissingRequiredSignature.into());
    }
    let signer = *ctx.instruction_account_key(0)?;
    let proposal_key = *ctx.instruction_account_key(1)?;
    let config_key = *ctx.instruction_account_key(2)?;

    let mut proposal = load_proposal(ctx, &proposal_key)?;
    let config = load_proposal_config(ctx, &config_key)?;

    if proposal.proposal_config != config_key {
        return Err(ProposalError::InvalidProposalConfig.into());
    }
    if config.vote_controller != signer {
        debug!("VoteV0: signer {signer} is not the vote controller");
        return Err(ProposalError::Unauthorized.into());
    }

    match proposal.state {
        ProposalState::Voting { .. } => {}
        ProposalState::Resolved { .. } | ProposalState::Cancelled => {
            return Err(ProposalError::ProposalFinalized.into());
        }
        _ => return Err(ProposalError::NotVoting.into()),
    }

    let choice_entry = proposal
        .choices
        .get_mut(usize::from(choice))
        .ok_or(ProposalError::IndexOutOfRange)?;

    choice_entry.weight = if remove_vote {
        choice_entry
            .weight
            .checked_sub(weight)
            .ok_or(ProposalError::ArithmeticError)?
    } else {
        choice_entry
            .weight
            .checked_add(weight)
            .ok_or(ProposalError::ArithmeticError)?
    };

    save_proposal(ctx, &proposal_key, &proposal)?;

    debug!(
        "VoteV0: proposal={proposal_key}, choice={choice}, weight={weight}, \
         remove_vote={remove_vote}"
    );

    // The hook observes the staged mutation; its failure unwinds the vote.
    if config.on_vote_hook != Pubkey::default() {
        ctx.check_number_of_instruction_accounts(4)?;
        if *ctx.instruction_account_key(3)? != config.on_vote_hook {
            return Err(ProposalError::InvalidOnVoteHook.into());
        }
        let hook = on_vote_hook.ok_or(ProposalError::InvalidOnVoteHook)?;
        if hook.id() != config.on_vote_hook {
            return Err(ProposalError::InvalidOnVoteHook.into());
        }
        hook.on_vote(ctx, &proposal_key, &config_key)?;
    }

    Ok(())
}
