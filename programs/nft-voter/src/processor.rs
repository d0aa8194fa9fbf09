//! Instruction processing logic for the MGv1 NFT Voter program.

use {
    crate::{
        error::NftVoterError,
        instruction::NftVoterInstruction,
        state::{
            marker_address, nft_voter_address, NftVoterV0, VoteMarkerV0,
            VOTE_MARKER_DISCRIMINATOR,
        },
    },
    log::*,
    mgv1_ledger::{
        limited_deserialize, AccountMeta, CallContext, LedgerError, MAX_INSTRUCTION_DATA_SIZE,
    },
    mgv1_org_guard_program as org_guard,
    mgv1_org_guard_program::{state::GuardType, weight::GuardProof},
    mgv1_proposal_program as proposal,
    mgv1_proposal_program::OnVoteHook,
    solana_pubkey::Pubkey,
};

/// Maximum length of a registry name, in bytes.
const MAX_NAME_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Program ID
// ---------------------------------------------------------------------------

solana_pubkey::declare_id!("NftVoter11111111111111111111111111111111111");

// ---------------------------------------------------------------------------
// Entrypoint
// ---------------------------------------------------------------------------

/// Process one nft-voter-program instruction.
///
/// `on_vote_hook` is forwarded into the proposal ledger for configs that
/// name a hook.
pub fn process_instruction(
    ctx: &mut CallContext,
    instruction_data: &[u8],
    on_vote_hook: Option<&dyn OnVoteHook>,
) -> Result<(), LedgerError> {
    let instruction: NftVoterInstruction =
        limited_deserialize(instruction_data, MAX_INSTRUCTION_DATA_SIZE)?;

    trace!("nft_voter process_instruction: {instruction:?}");

    match instruction {
        NftVoterInstruction::InitializeNftVoterV0 { name, authority } => {
            process_initialize_nft_voter_v0(ctx, name, authority)
        }
        NftVoterInstruction::VoteV0 { choice } => process_vote_v0(ctx, choice, on_vote_hook),
        NftVoterInstruction::RelinquishVoteV0 { choice } => {
            process_relinquish_vote_v0(ctx, choice, on_vote_hook)
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load and deserialise the `NftVoterV0` at `address`.
pub fn load_nft_voter(ctx: &CallContext, address: &Pubkey) -> Result<NftVoterV0, LedgerError> {
    let account = ctx.account(address).ok_or(NftVoterError::NotInitialized)?;
    if account.owner != id() {
        return Err(NftVoterError::InvalidAccountOwner.into());
    }
    NftVoterV0::deserialize(&account.data).map_err(|_| NftVoterError::NotInitialized.into())
}

/// Load and deserialise the `VoteMarkerV0` at `address`.
pub fn load_marker(ctx: &CallContext, address: &Pubkey) -> Result<VoteMarkerV0, LedgerError> {
    let account = ctx.account(address).ok_or(NftVoterError::NotInitialized)?;
    if account.owner != id() {
        return Err(NftVoterError::InvalidAccountOwner.into());
    }
    VoteMarkerV0::deserialize(&account.data)
        .map_err(|_| NftVoterError::InvalidAccountData.into())
}

fn save_marker(
    ctx: &mut CallContext,
    address: &Pubkey,
    marker: &VoteMarkerV0,
) -> Result<(), LedgerError> {
    let data = marker
        .to_account_data()
        .map_err(|_| NftVoterError::InvalidAccountData)?;
    ctx.set_account(*address, id(), data)
}

/// Forward a vote mutation to the proposal ledger.  The registry signs for
/// itself; an external controller (a proxy) must already hold its signature
/// in the current frame.
#[allow(clippy::too_many_arguments)]
fn invoke_proposal_vote(
    ctx: &mut CallContext,
    nft_voter_key: &Pubkey,
    vote_controller_key: &Pubkey,
    proposal_key: &Pubkey,
    config_key: &Pubkey,
    choice: u16,
    weight: u128,
    remove_vote: bool,
    on_vote_hook: Option<&dyn OnVoteHook>,
) -> Result<(), LedgerError> {
    let proposal_config = proposal::processor::load_proposal_config(ctx, config_key)?;
    let mut accounts = vec![
        AccountMeta::new_readonly(*vote_controller_key, true),
        AccountMeta::new(*proposal_key, false),
        AccountMeta::new_readonly(*config_key, false),
    ];
    if proposal_config.on_vote_hook != Pubkey::default() {
        accounts.push(AccountMeta::new_readonly(proposal_config.on_vote_hook, false));
    }
    ctx.invoke_signed(accounts, &[*nft_voter_key], |ctx| {
        proposal::processor::process_vote_v0(ctx, choice, weight, remove_vote, on_vote_hook)
    })
}

// ---------------------------------------------------------------------------
// Instruction handlers
// ---------------------------------------------------------------------------

/// `InitializeNftVoterV0`
///
/// Accounts:
///   0. `[signer]`           — Payer.
///   1. `[writable]`         — Registry account.
///   2. `[]`                 — Guard.
pub fn process_initialize_nft_voter_v0(
    ctx: &mut CallContext,
    name: String,
    authority: Pubkey,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(3)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(NftVoterError::MissingRequiredSignature.into());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(NftVoterError::NameTooLong.into());
    }

    let nft_voter_key = *ctx.instruction_account_key(1)?;
    let guard_key = *ctx.instruction_account_key(2)?;

    if nft_voter_key != nft_voter_address(&name) {
        return Err(NftVoterError::InvalidDerivedAddress.into());
    }
    if ctx
        .account(&nft_voter_key)
        .is_some_and(|a| !a.data.is_empty())
    {
        return Err(NftVoterError::AddressCollision.into());
    }

    // The guard must exist and be an NFT policy.
    let guard = org_guard::processor::load_guard(ctx, &guard_key)?;
    match guard.guard_type {
        GuardType::CollectionMint { .. } | GuardType::FirstCreatorAddress { .. } => {}
        _ => return Err(NftVoterError::GuardTypeMismatch.into()),
    }

    let nft_voter = NftVoterV0 {
        name,
        authority,
        guard: guard_key,
    };
    let data = nft_voter
        .to_account_data()
        .map_err(|_| NftVoterError::InvalidAccountData)?;
    ctx.set_account(nft_voter_key, id(), data)?;

    debug!("InitializeNftVoterV0: nft_voter={nft_voter_key}, guard={guard_key}");
    Ok(())
}

/// `VoteV0`
///
/// Accounts:
///   0. `[signer]`           — Payer.
///   1. `[]`                 — Registry account.
///   2. `[signer]`           — Voter.
///   3. `[]`                 — NFT mint.
///   4. `[]`                 — Metadata account.
///   5. `[]`                 — Voter's token account.
///   6. `[writable]`         — Vote marker account.
///   7. `[writable]`         — Proposal account.
///   8. `[]`                 — Proposal config account.
///   9. `[]`                 — The registry's guard.
///   10. `[signer]`          — Vote controller of the proposal config.
pub fn process_vote_v0(
    ctx: &mut CallContext,
    choice: u16,
    on_vote_hook: Option<&dyn OnVoteHook>,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(11)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(NftVoterError::MissingRequiredSignature.into());
    }
    if !ctx.is_instruction_account_signer(2)? {
        return Err(NftVoterError::MissingRequiredSignature.into());
    }
    let nft_voter_key = *ctx.instruction_account_key(1)?;
    let voter = *ctx.instruction_account_key(2)?;
    let mint = *ctx.instruction_account_key(3)?;
    let metadata_key = *ctx.instruction_account_key(4)?;
    let token_account_key = *ctx.instruction_account_key(5)?;
    let marker_key = *ctx.instruction_account_key(6)?;
    let proposal_key = *ctx.instruction_account_key(7)?;
    let config_key = *ctx.instruction_account_key(8)?;
    let guard_key = *ctx.instruction_account_key(9)?;
    let vote_controller_key = *ctx.instruction_account_key(10)?;

    let nft_voter = load_nft_voter(ctx, &nft_voter_key)?;
    if nft_voter.guard != guard_key {
        return Err(NftVoterError::GuardMismatch.into());
    }
    let guard = org_guard::processor::load_guard(ctx, &guard_key)?;
    match guard.guard_type {
        GuardType::CollectionMint { .. } | GuardType::FirstCreatorAddress { .. } => {}
        _ => return Err(NftVoterError::GuardTypeMismatch.into()),
    }

    // The guard decides whether this NFT may vote and with what weight.
    let metadata = org_guard::processor::load_metadata(ctx, &mint, &metadata_key)?;
    let token = org_guard::processor::load_token_account(ctx, &token_account_key)?;
    let evaluated_weight = org_guard::weight::evaluate(
        &guard.guard_type,
        &voter,
        &GuardProof::Nft {
            mint: &mint,
            metadata: &metadata,
            token: &token,
        },
    )?;

    let proposal_record = proposal::processor::load_proposal(ctx, &proposal_key)?;

    if marker_key != marker_address(&mint, &proposal_key) {
        return Err(NftVoterError::InvalidDerivedAddress.into());
    }
    let mut marker = match ctx.account(&marker_key) {
        Some(account) if !account.data.is_empty() => {
            if account.data[0] != VOTE_MARKER_DISCRIMINATOR {
                return Err(NftVoterError::InvalidAccountData.into());
            }
            load_marker(ctx, &marker_key)?
        }
        _ => VoteMarkerV0 {
            voter,
            nft_voter: nft_voter_key,
            proposal: proposal_key,
            mint,
            choices: vec![],
            weight: evaluated_weight,
            voted_at: 0,
        },
    };
    if marker.voter != voter {
        return Err(NftVoterError::Unauthorized.into());
    }
    if marker.nft_voter != nft_voter_key {
        return Err(NftVoterError::InvalidAccountData.into());
    }
    if marker.choices.contains(&choice) {
        return Err(NftVoterError::AlreadyVoted.into());
    }
    if marker.choices.len() >= usize::from(proposal_record.max_choices_per_voter) {
        return Err(NftVoterError::MaxChoicesExceeded.into());
    }

    marker.choices.push(choice);
    marker.voted_at = ctx.clock().unix_timestamp;
    save_marker(ctx, &marker_key, &marker)?;

    invoke_proposal_vote(
        ctx,
        &nft_voter_key,
        &vote_controller_key,
        &proposal_key,
        &config_key,
        choice,
        marker.weight,
        false,
        on_vote_hook,
    )?;

    debug!(
        "VoteV0: voter={voter}, mint={mint}, proposal={proposal_key}, choice={choice}, \
         weight={}",
        marker.weight
    );
    Ok(())
}

/// `RelinquishVoteV0`
///
/// Accounts:
///   0. `[writable]`         — Refund destination for a closed marker.
///   1. `[]`                 — Registry account.
///   2. `[signer]`           — Voter recorded on the marker.
///   3. `[]`                 — NFT mint.
///   4. `[writable]`         — Vote marker account.
///   5. `[writable]`         — Proposal account.
///   6. `[]`                 — Proposal config account.
///   7. `[signer]`           — Vote controller of the proposal config.
pub fn process_relinquish_vote_v0(
    ctx: &mut CallContext,
    choice: u16,
    on_vote_hook: Option<&dyn OnVoteHook>,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(8)?;

    if !ctx.is_instruction_account_signer(2)? {
        return Err(NftVoterError::MissingRequiredSignature.into());
    }
    let refund_key = *ctx.instruction_account_key(0)?;
    let nft_voter_key = *ctx.instruction_account_key(1)?;
    let voter = *ctx.instruction_account_key(2)?;
    let mint = *ctx.instruction_account_key(3)?;
    let marker_key = *ctx.instruction_account_key(4)?;
    let proposal_key = *ctx.instruction_account_key(5)?;
    let config_key = *ctx.instruction_account_key(6)?;
    let vote_controller_key = *ctx.instruction_account_key(7)?;

    if marker_key != marker_address(&mint, &proposal_key) {
        return Err(NftVoterError::InvalidDerivedAddress.into());
    }
    let mut marker = load_marker(ctx, &marker_key)?;
    if marker.voter != voter {
        return Err(NftVoterError::Unauthorized.into());
    }
    if marker.proposal != proposal_key || marker.nft_voter != nft_voter_key {
        return Err(NftVoterError::InvalidAccountData.into());
    }
    let position = marker
        .choices
        .iter()
        .position(|committed| *committed == choice)
        .ok_or(NftVoterError::NoVoteForThisChoice)?;

    invoke_proposal_vote(
        ctx,
        &nft_voter_key,
        &vote_controller_key,
        &proposal_key,
        &config_key,
        choice,
        marker.weight,
        true,
        on_vote_hook,
    )?;

    marker.choices.remove(position);
    if marker.choices.is_empty() {
        ctx.close_account(&marker_key, &refund_key)?;
    } else {
        save_marker(ctx, &marker_key, &marker)?;
    }

    debug!("RelinquishVoteV0: voter={voter}, mint={mint}, choice={choice}");
    Ok(())
}
