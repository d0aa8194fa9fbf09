//! Instruction processing logic for the MGv1 Organization program.

use {
    crate::{
        error::OrganizationError,
        instruction::{InitializeProposalArgsV0, OrganizationInstruction},
        state::{organization_address, OrganizationV0},
    },
    log::*,
    mgv1_ledger::{
        limited_deserialize, AccountMeta, CallContext, LedgerError, MAX_INSTRUCTION_DATA_SIZE,
    },
    mgv1_proposal_program as proposal,
    solana_pubkey::Pubkey,
};

/// Maximum length of an organization name, in bytes.
const MAX_NAME_LEN: usize = 32;

/// Maximum length of an organization uri, in bytes.
const MAX_URI_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Program ID
// ---------------------------------------------------------------------------

solana_pubkey::declare_id!("organization1111111111111111111111111111111");

// ---------------------------------------------------------------------------
// Entrypoint
// ---------------------------------------------------------------------------

/// Process one organization-program instruction.
pub fn process_instruction(
    ctx: &mut CallContext,
    instruction_data: &[u8],
) -> Result<(), LedgerError> {
    let instruction: OrganizationInstruction =
        limited_deserialize(instruction_data, MAX_INSTRUCTION_DATA_SIZE)?;

    trace!("organization process_instruction: {instruction:?}");

    match instruction {
        OrganizationInstruction::InitializeOrganizationV0 {
            name,
            uri,
            authority,
            guard,
            parent,
            default_proposal_config,
            proposal_program,
        } => process_initialize_organization_v0(
            ctx,
            name,
            uri,
            authority,
            guard,
            parent,
            default_proposal_config,
            proposal_program,
        ),
        OrganizationInstruction::UpdateOrganizationV0 {
            uri,
            default_proposal_config,
            proposal_program,
            authority,
        } => process_update_organization_v0(
            ctx,
            uri,
            default_proposal_config,
            proposal_program,
            authority,
        ),
        OrganizationInstruction::InitializeProposalV0 { args } => {
            process_initialize_proposal_v0(ctx, args)
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load and deserialise the `OrganizationV0` at `address`.
pub fn load_organization(
    ctx: &CallContext,
    address: &Pubkey,
) -> Result<OrganizationV0, LedgerError> {
    let account = ctx
        .account(address)
        .ok_or(OrganizationError::NotInitialized)?;
    if account.owner != id() {
        return Err(OrganizationError::InvalidAccountOwner.into());
    }
    OrganizationV0::deserialize(&account.data)
        .map_err(|_| OrganizationError::NotInitialized.into())
}

fn save_organization(
    ctx: &mut CallContext,
    address: &Pubkey,
    organization: &OrganizationV0,
) -> Result<(), LedgerError> {
    let data = organization
        .to_account_data()
        .map_err(|_| OrganizationError::InvalidAccountData)?;
    ctx.set_account(*address, id(), data)
}

// ---------------------------------------------------------------------------
// Instruction handlers
// ---------------------------------------------------------------------------

/// `InitializeOrganizationV0`
///
/// Accounts:
///   0. `[signer]`           — Payer.
///   1. `[writable]`         — Organization account.
#[allow(clippy::too_many_arguments)]
pub fn process_initialize_organization_v0(
    ctx: &mut CallContext,
    name: String,
    uri: String,
    authority: Pubkey,
    guard: Pubkey,
    parent: Pubkey,
    default_proposal_config: Pubkey,
    proposal_program: Pubkey,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(2)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(OrganizationError::MissingRequiredSignature.into());
    }

    if name.len() > MAX_NAME_LEN {
        return Err(OrganizationError::NameTooLong.into());
    }
    if uri.len() > MAX_URI_LEN {
        return Err(OrganizationError::UriTooLong.into());
    }
    if proposal_program != proposal::id() {
        return Err(OrganizationError::ProposalProgramMismatch.into());
    }

    let organization_key = *ctx.instruction_account_key(1)?;
    if organization_key != organization_address(&name) {
        return Err(OrganizationError::InvalidDerivedAddress.into());
    }
    if ctx
        .account(&organization_key)
        .is_some_and(|a| !a.data.is_empty())
    {
        return Err(OrganizationError::AddressCollision.into());
    }

    let organization = OrganizationV0 {
        num_proposals: 0,
        authority,
        guard,
        parent,
        default_proposal_config,
        proposal_program,
        name,
        uri,
    };
    save_organization(ctx, &organization_key, &organization)?;

    debug!("InitializeOrganizationV0: organization={organization_key}, guard={guard}");
    Ok(())
}

/// `UpdateOrganizationV0`
///
/// Accounts:
///   0. `[signer]`           — Current organization authority.
///   1. `[writable]`         — Organization account.
pub fn process_update_organization_v0(
    ctx: &mut CallContext,
    uri: Option<String>,
    default_proposal_config: Option<Pubkey>,
    proposal_program: Option<Pubkey>,
    authority: Option<Pubkey>,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(2)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(OrganizationError::MissingRequiredSignature.into());
    }
    let signer = *ctx.instruction_account_key(0)?;
    let organization_key = *ctx.instruction_account_key(1)?;

    let mut organization = load_organization(ctx, &organization_key)?;
    if organization.authority != signer {
        debug!("UpdateOrganizationV0: signer {signer} is not the authority");
        return Err(OrganizationError::Unauthorized.into());
    }

    if let Some(uri) = uri {
        if uri.len() > MAX_URI_LEN {
            return Err(OrganizationError::UriTooLong.into());
        }
        organization.uri = uri;
    }
    if let Some(default_proposal_config) = default_proposal_config {
        organization.default_proposal_config = default_proposal_config;
    }
    if let Some(proposal_program) = proposal_program {
        if proposal_program != proposal::id() {
            return Err(OrganizationError::ProposalProgramMismatch.into());
        }
        organization.proposal_program = proposal_program;
    }
    if let Some(authority) = authority {
        organization.authority = authority;
    }

    save_organization(ctx, &organization_key, &organization)?;

    debug!("UpdateOrganizationV0: organization={organization_key} updated by {signer}");
    Ok(())
}

/// `InitializeProposalV0`
///
/// Accounts:
///   0. `[signer]`           — Payer.
///   1. `[signer]`           — The organization's guard.
///   2. `[]`                 — Owner recorded on the proposal.
///   3. `[writable]`         — Organization account.
///   4. `[writable]`         — Proposal account.
///   5. `[]`                 — Proposal config account.
pub fn process_initialize_proposal_v0(
    ctx: &mut CallContext,
    args: InitializeProposalArgsV0,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(6)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(OrganizationError::MissingRequiredSignature.into());
    }
    if !ctx.is_instruction_account_signer(1)? {
        return Err(OrganizationError::MissingRequiredSignature.into());
    }
    let payer = *ctx.instruction_account_key(0)?;
    let guard = *ctx.instruction_account_key(1)?;
    let owner = *ctx.instruction_account_key(2)?;
    let organization_key = *ctx.instruction_account_key(3)?;
    let proposal_key = *ctx.instruction_account_key(4)?;
    let config_key = *ctx.instruction_account_key(5)?;

    let mut organization = load_organization(ctx, &organization_key)?;
    if organization.guard != guard {
        debug!("InitializeProposalV0: guard {guard} is not the organization's guard");
        return Err(OrganizationError::GuardMismatch.into());
    }
    if organization.proposal_program != proposal::id() {
        return Err(OrganizationError::ProposalProgramMismatch.into());
    }

    // The next proposal's seed is the current counter; the organization
    // itself signs as the namespace.
    let seed = organization.num_proposals.to_le_bytes().to_vec();
    ctx.invoke_signed(
        vec![
            AccountMeta::new(payer, true),
            AccountMeta::new_readonly(organization_key, true),
            AccountMeta::new_readonly(owner, false),
            AccountMeta::new(proposal_key, false),
            AccountMeta::new_readonly(config_key, false),
        ],
        &[organization_key],
        |ctx| {
            proposal::processor::process_initialize_proposal_v0(
                ctx,
                seed,
                args.name,
                args.uri,
                args.max_choices_per_voter,
                args.choices,
                args.tags,
            )
        },
    )?;

    organization.num_proposals = organization
        .num_proposals
        .checked_add(1)
        .ok_or(OrganizationError::ArithmeticError)?;
    save_organization(ctx, &organization_key, &organization)?;

    debug!(
        "InitializeProposalV0: organization={organization_key}, proposal={proposal_key}, \
         num_proposals={}",
        organization.num_proposals
    );
    Ok(())
}
