//! Instruction processing logic for the MGv1 State Controller program.

use {
    crate::{
        error::StateControllerError,
        instruction::StateControllerInstruction,
        state::{resolution_settings_address, ResolutionSettingsV0},
    },
    log::*,
    mgv1_ledger::{
        limited_deserialize, AccountMeta, CallContext, LedgerError, MAX_INSTRUCTION_DATA_SIZE,
    },
    mgv1_proposal_program as proposal,
    mgv1_proposal_program::{OnVoteHook, ProposalState},
    solana_pubkey::Pubkey,
};

/// Maximum length of a settings name, in bytes.
const MAX_NAME_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Program ID
// ---------------------------------------------------------------------------

solana_pubkey::declare_id!("StateContro11er1111111111111111111111111111");

// ---------------------------------------------------------------------------
// Entrypoint
// ---------------------------------------------------------------------------

/// Process one state-controller-program instruction.
pub fn process_instruction(
    ctx: &mut CallContext,
    instruction_data: &[u8],
) -> Result<(), LedgerError> {
    let instruction: StateControllerInstruction =
        limited_deserialize(instruction_data, MAX_INSTRUCTION_DATA_SIZE)?;

    trace!("state_controller process_instruction: {instruction:?}");

    match instruction {
        StateControllerInstruction::InitializeResolutionSettingsV0 { name, settings } => {
            process_initialize_resolution_settings_v0(ctx, name, settings)
        }
        StateControllerInstruction::UpdateStateV0 { new_state } => {
            process_update_state_v0(ctx, new_state)
        }
        StateControllerInstruction::ResolveV0 => process_resolve_v0(ctx),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load and deserialise the `ResolutionSettingsV0` at `address`.
pub fn load_resolution_settings(
    ctx: &CallContext,
    address: &Pubkey,
) -> Result<ResolutionSettingsV0, LedgerError> {
    let account = ctx
        .account(address)
        .ok_or(StateControllerError::NotInitialized)?;
    if account.owner != id() {
        return Err(StateControllerError::InvalidAccountOwner.into());
    }
    ResolutionSettingsV0::deserialize(&account.data)
        .map_err(|_| StateControllerError::NotInitialized.into())
}

/// Forward a state transition to the proposal ledger, signing as the
/// settings record.
fn invoke_update_state(
    ctx: &mut CallContext,
    settings_key: &Pubkey,
    proposal_key: &Pubkey,
    config_key: &Pubkey,
    new_state: ProposalState,
) -> Result<(), LedgerError> {
    ctx.invoke_signed(
        vec![
            AccountMeta::new_readonly(*settings_key, true),
            AccountMeta::new(*proposal_key, false),
            AccountMeta::new_readonly(*config_key, false),
        ],
        &[*settings_key],
        |ctx| proposal::processor::process_update_state_v0(ctx, new_state),
    )
}

// ---------------------------------------------------------------------------
// Instruction handlers
// ---------------------------------------------------------------------------

/// `InitializeResolutionSettingsV0`
///
/// Accounts:
///   0. `[signer]`           — Payer.
///   1. `[writable]`         — Settings account.
pub fn process_initialize_resolution_settings_v0(
    ctx: &mut CallContext,
    name: String,
    settings: crate::resolution::ResolutionStrategy,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(2)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(StateControllerError::MissingRequiredSignature.into());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(StateControllerError::NameTooLong.into());
    }
    settings.validate()?;

    let settings_key = *ctx.instruction_account_key(1)?;
    if settings_key != resolution_settings_address(&name) {
        return Err(StateControllerError::InvalidDerivedAddress.into());
    }
    if ctx
        .account(&settings_key)
        .is_some_and(|a| !a.data.is_empty())
    {
        return Err(StateControllerError::AddressCollision.into());
    }

    let record = ResolutionSettingsV0 { name, settings };
    let data = record
        .to_account_data()
        .map_err(|_| StateControllerError::InvalidAccountData)?;
    ctx.set_account(settings_key, id(), data)?;

    debug!("InitializeResolutionSettingsV0: settings={settings_key}");
    Ok(())
}

/// `UpdateStateV0`
///
/// Accounts:
///   0. `[signer]`           — Proposal owner.
///   1. `[]`                 — Settings account.
///   2. `[writable]`         — Proposal account.
///   3. `[]`                 — Proposal config account.
pub fn process_update_state_v0(
    ctx: &mut CallContext,
    new_state: ProposalState,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(4)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(StateControllerError::MissingRequiredSignature.into());
    }
    let signer = *ctx.instruction_account_key(0)?;
    let settings_key = *ctx.instruction_account_key(1)?;
    let proposal_key = *ctx.instruction_account_key(2)?;
    let config_key = *ctx.instruction_account_key(3)?;

    // The settings record must exist; the proposal ledger checks it is the
    // config's state controller.
    load_resolution_settings(ctx, &settings_key)?;

    let proposal_record = proposal::processor::load_proposal(ctx, &proposal_key)?;
    if proposal_record.owner != signer {
        debug!("UpdateStateV0: signer {signer} is not the proposal owner");
        return Err(StateControllerError::Unauthorized.into());
    }

    // Opening a vote stamps the actual start time.
    let new_state = match new_state {
        ProposalState::Voting { .. } => ProposalState::Voting {
            start_ts: ctx.clock().unix_timestamp,
        },
        other => other,
    };

    invoke_update_state(ctx, &settings_key, &proposal_key, &config_key, new_state)
}

/// `ResolveV0`
///
/// Accounts:
///   0. `[signer]`           — Anyone.
///   1. `[]`                 — Settings account.
///   2. `[writable]`         — Proposal account.
///   3. `[]`                 — Proposal config account.
pub fn process_resolve_v0(ctx: &mut CallContext) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(4)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(StateControllerError::MissingRequiredSignature.into());
    }
    let settings_key = *ctx.instruction_account_key(1)?;
    let proposal_key = *ctx.instruction_account_key(2)?;
    let config_key = *ctx.instruction_account_key(3)?;

    let settings = load_resolution_settings(ctx, &settings_key)?;
    let proposal_record = proposal::processor::load_proposal(ctx, &proposal_key)?;

    let now = ctx.clock().unix_timestamp;
    let choices = settings
        .settings
        .resolution(&proposal_record, now)?
        .ok_or(StateControllerError::NotResolvable)?;

    debug!("ResolveV0: proposal={proposal_key}, winning choices {choices:?}");
    invoke_update_state(
        ctx,
        &settings_key,
        &proposal_key,
        &config_key,
        ProposalState::Resolved {
            choices,
            end_ts: now,
        },
    )
}

// ---------------------------------------------------------------------------
// On-vote hook
// ---------------------------------------------------------------------------

/// Eager resolution: when a proposal config names this program as its
/// on-vote hook, every vote re-evaluates the strategy and finalises the
/// proposal the moment it is satisfied.
///
/// A vote that does not satisfy the strategy is a plain success — the hook
/// only fails on real errors, which then abort the vote itself.
pub struct EagerResolutionHook;

impl OnVoteHook for EagerResolutionHook {
    fn id(&self) -> Pubkey {
        id()
    }

    fn on_vote(
        &self,
        ctx: &mut CallContext,
        proposal_key: &Pubkey,
        config_key: &Pubkey,
    ) -> Result<(), LedgerError> {
        let config = proposal::processor::load_proposal_config(ctx, config_key)?;
        let settings_key = config.state_controller;
        let settings = load_resolution_settings(ctx, &settings_key)?;
        let proposal_record = proposal::processor::load_proposal(ctx, proposal_key)?;

        let now = ctx.clock().unix_timestamp;
        if let Some(choices) = settings.settings.resolution(&proposal_record, now)? {
            debug!(
                "EagerResolutionHook: resolving proposal={proposal_key} with choices \
                 {choices:?}"
            );
            invoke_update_state(
                ctx,
                &settings_key,
                proposal_key,
                config_key,
                ProposalState::Resolved {
                    choices,
                    end_ts: now,
                },
            )?;
        }
        Ok(())
    }
}
