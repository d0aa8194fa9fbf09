//! Instruction processing logic for the MGv1 Multisig program.

use {
    crate::{
        error::MultisigError,
        instruction::MultisigInstruction,
        state::{
            multisig_config_address, vote_record_address, MultisigConfigV0, VoteRecordV0,
            VOTE_RECORD_DISCRIMINATOR,
        },
    },
    log::*,
    mgv1_ledger::{
        limited_deserialize, AccountMeta, CallContext, LedgerError, MAX_INSTRUCTION_DATA_SIZE,
    },
    mgv1_proposal_program as proposal,
    mgv1_proposal_program::OnVoteHook,
    solana_pubkey::Pubkey,
};

/// Maximum length of a multisig config name, in bytes.
const MAX_NAME_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Program ID
// ---------------------------------------------------------------------------

solana_pubkey::declare_id!("Mu1tisig11111111111111111111111111111111111");

// ---------------------------------------------------------------------------
// Entrypoint
// ---------------------------------------------------------------------------

/// Process one multisig-program instruction.
///
/// `on_vote_hook` is forwarded into the proposal ledger for configs that
/// name a hook.
pub fn process_instruction(
    ctx: &mut CallContext,
    instruction_data: &[u8],
    on_vote_hook: Option<&dyn OnVoteHook>,
) -> Result<(), LedgerError> {
    let instruction: MultisigInstruction =
        limited_deserialize(instruction_data, MAX_INSTRUCTION_DATA_SIZE)?;

    trace!("multisig process_instruction: {instruction:?}");

    match instruction {
        MultisigInstruction::InitializeMultisigConfigV0 {
            name,
            use_reputation,
            members,
        } => process_initialize_multisig_config_v0(ctx, name, use_reputation, members),
        MultisigInstruction::VoteV0 { choice } => process_vote_v0(ctx, choice, on_vote_hook),
        MultisigInstruction::RelinquishVoteV0 => process_relinquish_vote_v0(ctx, on_vote_hook),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load and deserialise the `MultisigConfigV0` at `address`.
pub fn load_multisig_config(
    ctx: &CallContext,
    address: &Pubkey,
) -> Result<MultisigConfigV0, LedgerError> {
    let account = ctx.account(address).ok_or(MultisigError::NotInitialized)?;
    if account.owner != id() {
        return Err(MultisigError::InvalidAccountOwner.into());
    }
    MultisigConfigV0::deserialize(&account.data)
        .map_err(|_| MultisigError::NotInitialized.into())
}

/// Load and deserialise the `VoteRecordV0` at `address`.
pub fn load_vote_record(
    ctx: &CallContext,
    address: &Pubkey,
) -> Result<VoteRecordV0, LedgerError> {
    let account = ctx.account(address).ok_or(MultisigError::NotInitialized)?;
    if account.owner != id() {
        return Err(MultisigError::InvalidAccountOwner.into());
    }
    VoteRecordV0::deserialize(&account.data)
        .map_err(|_| MultisigError::InvalidAccountData.into())
}

fn save_vote_record(
    ctx: &mut CallContext,
    address: &Pubkey,
    record: &VoteRecordV0,
) -> Result<(), LedgerError> {
    let data = record
        .to_account_data()
        .map_err(|_| MultisigError::InvalidAccountData)?;
    ctx.set_account(*address, id(), data)
}

/// Forward a vote mutation to the proposal ledger, signing as the multisig
/// config.
#[allow(clippy::too_many_arguments)]
fn invoke_proposal_vote(
    ctx: &mut CallContext,
    multisig_config_key: &Pubkey,
    proposal_key: &Pubkey,
    config_key: &Pubkey,
    choice: u16,
    weight: u128,
    remove_vote: bool,
    on_vote_hook: Option<&dyn OnVoteHook>,
) -> Result<(), LedgerError> {
    let proposal_config = proposal::processor::load_proposal_config(ctx, config_key)?;
    let mut accounts = vec![
        AccountMeta::new_readonly(*multisig_config_key, true),
        AccountMeta::new(*proposal_key, false),
        AccountMeta::new_readonly(*config_key, false),
    ];
    if proposal_config.on_vote_hook != Pubkey::default() {
        accounts.push(AccountMeta::new_readonly(proposal_config.on_vote_hook, false));
    }
    ctx.invoke_signed(accounts, &[*multisig_config_key], |ctx| {
        proposal::processor::process_vote_v0(ctx, choice, weight, remove_vote, on_vote_hook)
    })
}

// ---------------------------------------------------------------------------
// Instruction handlers
// ---------------------------------------------------------------------------

/// `InitializeMultisigConfigV0`
///
/// Accounts:
///   0. `[signer]`           — Payer.
///   1. `[writable]`         — Multisig config account.
pub fn process_initialize_multisig_config_v0(
    ctx: &mut CallContext,
    name: String,
    use_reputation: bool,
    members: Vec<Pubkey>,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(2)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(MultisigError::MissingRequiredSignature.into());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(MultisigError::NameTooLong.into());
    }
    if members.is_empty() {
        return Err(MultisigError::NoMembers.into());
    }

    let config_key = *ctx.instruction_account_key(1)?;
    if config_key != multisig_config_address(&name) {
        return Err(MultisigError::InvalidDerivedAddress.into());
    }
    if ctx.account(&config_key).is_some_and(|a| !a.data.is_empty()) {
        return Err(MultisigError::AddressCollision.into());
    }

    let config = MultisigConfigV0 {
        name,
        use_reputation,
        members,
    };
    let data = config
        .to_account_data()
        .map_err(|_| MultisigError::InvalidAccountData)?;
    ctx.set_account(config_key, id(), data)?;

    debug!(
        "InitializeMultisigConfigV0: config={config_key}, members={}",
        config.members.len()
    );
    Ok(())
}

/// `VoteV0`
///
/// Accounts:
///   0. `[signer]`           — Payer.
///   1. `[signer]`           — Voter; must be a member.
///   2. `[]`                 — Multisig config account.
///   3. `[writable]`         — Vote record account.
///   4. `[writable]`         — Proposal account.
///   5. `[]`                 — Proposal config account.
///   6. `[]`                 — On-vote hook (when configured).
pub fn process_vote_v0(
    ctx: &mut CallContext,
    choice: u16,
    on_vote_hook: Option<&dyn OnVoteHook>,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(6)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(MultisigError::MissingRequiredSignature.into());
    }
    if !ctx.is_instruction_account_signer(1)? {
        return Err(MultisigError::MissingRequiredSignature.into());
    }
    let voter = *ctx.instruction_account_key(1)?;
    let multisig_config_key = *ctx.instruction_account_key(2)?;
    let record_key = *ctx.instruction_account_key(3)?;
    let proposal_key = *ctx.instruction_account_key(4)?;
    let config_key = *ctx.instruction_account_key(5)?;

    let multisig_config = load_multisig_config(ctx, &multisig_config_key)?;
    if !multisig_config.members.iter().any(|member| *member == voter) {
        debug!("VoteV0: {voter} is not a member");
        return Err(MultisigError::NotAMember.into());
    }
    if multisig_config.use_reputation {
        return Err(MultisigError::ReputationNotSupported.into());
    }

    if record_key != vote_record_address(&proposal_key, &voter) {
        return Err(MultisigError::InvalidDerivedAddress.into());
    }

    // Create the record on first vote, otherwise require it to be empty.
    let mut record = match ctx.account(&record_key) {
        Some(account) if !account.data.is_empty() => {
            if account.data[0] != VOTE_RECORD_DISCRIMINATOR {
                return Err(MultisigError::InvalidAccountData.into());
            }
            load_vote_record(ctx, &record_key)?
        }
        _ => VoteRecordV0 {
            voter,
            proposal: proposal_key,
            choice: None,
            weight: 0,
            voted_at: 0,
        },
    };
    if record.choice.is_some() {
        return Err(MultisigError::AlreadyVoted.into());
    }

    record.choice = Some(choice);
    record.weight = 1;
    record.voted_at = ctx.clock().unix_timestamp;
    save_vote_record(ctx, &record_key, &record)?;

    invoke_proposal_vote(
        ctx,
        &multisig_config_key,
        &proposal_key,
        &config_key,
        choice,
        record.weight,
        false,
        on_vote_hook,
    )?;

    debug!("VoteV0: voter={voter}, proposal={proposal_key}, choice={choice}");
    Ok(())
}

/// `RelinquishVoteV0`
///
/// Accounts:
///   0. `[signer]`           — Voter recorded on the vote record.
///   1. `[]`                 — Multisig config account.
///   2. `[writable]`         — Vote record account.
///   3. `[writable]`         — Proposal account.
///   4. `[]`                 — Proposal config account.
///   5. `[]`                 — On-vote hook (when configured).
pub fn process_relinquish_vote_v0(
    ctx: &mut CallContext,
    on_vote_hook: Option<&dyn OnVoteHook>,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(5)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(MultisigError::MissingRequiredSignature.into());
    }
    let voter = *ctx.instruction_account_key(0)?;
    let multisig_config_key = *ctx.instruction_account_key(1)?;
    let record_key = *ctx.instruction_account_key(2)?;
    let proposal_key = *ctx.instruction_account_key(3)?;
    let config_key = *ctx.instruction_account_key(4)?;

    let multisig_config = load_multisig_config(ctx, &multisig_config_key)?;
    if multisig_config.use_reputation {
        return Err(MultisigError::ReputationNotSupported.into());
    }

    let mut record = load_vote_record(ctx, &record_key)?;
    if record.voter != voter {
        return Err(MultisigError::Unauthorized.into());
    }
    if record.proposal != proposal_key {
        return Err(MultisigError::InvalidAccountData.into());
    }
    let choice = record.choice.ok_or(MultisigError::NoVoteForThisChoice)?;

    invoke_proposal_vote(
        ctx,
        &multisig_config_key,
        &proposal_key,
        &config_key,
        choice,
        record.weight,
        true,
        on_vote_hook,
    )?;

    record.choice = None;
    record.weight = 0;
    record.voted_at = 0;
    save_vote_record(ctx, &record_key, &record)?;

    debug!("RelinquishVoteV0: voter={voter}, proposal={proposal_key}, choice={choice}");
    Ok(())
}
