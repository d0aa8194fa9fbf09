//! Instruction processing logic for the MGv1 Org Guard program.

use {
    crate::{
        error::GuardError,
        instruction::GuardInstruction,
        state::{guard_address, GuardType, GuardV0},
        token::{
            metadata_address, metadata_program, token_program, MetadataAccount, TokenAccount,
        },
        weight::{evaluate, GuardProof},
    },
    log::*,
    mgv1_ledger::{
        limited_deserialize, AccountMeta, CallContext, LedgerError, MAX_INSTRUCTION_DATA_SIZE,
    },
    mgv1_organization_program as organization,
    mgv1_organization_program::instruction::InitializeProposalArgsV0,
    solana_pubkey::Pubkey,
};

/// Maximum length of a guard name, in bytes.
const MAX_NAME_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Program ID
// ---------------------------------------------------------------------------

solana_pubkey::declare_id!("Guard11111111111111111111111111111111111111");

// ---------------------------------------------------------------------------
// Entrypoint
// ---------------------------------------------------------------------------

/// Process one org-guard-program instruction.
pub fn process_instruction(
    ctx: &mut CallContext,
    instruction_data: &[u8],
) -> Result<(), LedgerError> {
    let instruction: GuardInstruction =
        limited_deserialize(instruction_data, MAX_INSTRUCTION_DATA_SIZE)?;

    trace!("org_guard process_instruction: {instruction:?}");

    match instruction {
        GuardInstruction::InitializeGuardV0 { name, guard_type } => {
            process_initialize_guard_v0(ctx, name, guard_type)
        }
        GuardInstruction::InitializeProposalPermissivelyV0 { args } => {
            process_initialize_proposal_permissively_v0(ctx, args)
        }
        GuardInstruction::InitializeProposalByWalletV0 { args } => {
            process_initialize_proposal_by_wallet_v0(ctx, args)
        }
        GuardInstruction::InitializeProposalByTokenV0 { args } => {
            process_initialize_proposal_by_token_v0(ctx, args)
        }
        GuardInstruction::InitializeProposalByNftV0 { args } => {
            process_initialize_proposal_by_nft_v0(ctx, args)
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load and deserialise the `GuardV0` at `address`.
pub fn load_guard(ctx: &CallContext, address: &Pubkey) -> Result<GuardV0, LedgerError> {
    let account = ctx.account(address).ok_or(GuardError::NotInitialized)?;
    if account.owner != id() {
        return Err(GuardError::InvalidAccountOwner.into());
    }
    GuardV0::deserialize(&account.data).map_err(|_| GuardError::NotInitialized.into())
}

/// Load a token account, checking it is owned by the token program.
pub fn load_token_account(
    ctx: &CallContext,
    address: &Pubkey,
) -> Result<TokenAccount, LedgerError> {
    let account = ctx.account(address).ok_or(GuardError::NotInitialized)?;
    if account.owner != token_program::id() {
        return Err(GuardError::InvalidAccountOwner.into());
    }
    TokenAccount::deserialize(&account.data).map_err(|_| GuardError::InvalidAccountData.into())
}

/// Load the metadata account for `mint`, checking both the owning program
/// and that it sits at the canonical derived address.
pub fn load_metadata(
    ctx: &CallContext,
    mint: &Pubkey,
    address: &Pubkey,
) -> Result<MetadataAccount, LedgerError> {
    if *address != metadata_address(mint) {
        return Err(GuardError::InvalidDerivedAddress.into());
    }
    let account = ctx.account(address).ok_or(GuardError::NotInitialized)?;
    if account.owner != metadata_program::id() {
        return Err(GuardError::InvalidAccountOwner.into());
    }
    MetadataAccount::deserialize(&account.data)
        .map_err(|_| GuardError::InvalidAccountData.into())
}

/// The base account list every proposal factory variant starts with.
struct FactoryAccounts {
    payer: Pubkey,
    guard_key: Pubkey,
    owner: Pubkey,
    organization_key: Pubkey,
    proposal_key: Pubkey,
    config_key: Pubkey,
}

/// Read the base factory accounts and verify the guard is the organization's.
fn load_factory_accounts(ctx: &CallContext) -> Result<(FactoryAccounts, GuardV0), LedgerError> {
    ctx.check_number_of_instruction_accounts(6)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(GuardError::MissingRequiredSignature.into());
    }
    let accounts = FactoryAccounts {
        payer: *ctx.instruction_account_key(0)?,
        guard_key: *ctx.instruction_account_key(1)?,
        owner: *ctx.instruction_account_key(2)?,
        organization_key: *ctx.instruction_account_key(3)?,
        proposal_key: *ctx.instruction_account_key(4)?,
        config_key: *ctx.instruction_account_key(5)?,
    };

    let guard = load_guard(ctx, &accounts.guard_key)?;
    let org = organization::processor::load_organization(ctx, &accounts.organization_key)?;
    if org.guard != accounts.guard_key {
        debug!(
            "factory: guard {} is not organization {}'s guard",
            accounts.guard_key, accounts.organization_key
        );
        return Err(GuardError::OrganizationGuardMismatch.into());
    }

    Ok((accounts, guard))
}

/// Sign as the guard into the organization program's proposal creation.
fn invoke_initialize_proposal(
    ctx: &mut CallContext,
    accounts: &FactoryAccounts,
    args: InitializeProposalArgsV0,
) -> Result<(), LedgerError> {
    ctx.invoke_signed(
        vec![
            AccountMeta::new(accounts.payer, true),
            AccountMeta::new_readonly(accounts.guard_key, true),
            AccountMeta::new_readonly(accounts.owner, false),
            AccountMeta::new(accounts.organization_key, false),
            AccountMeta::new(accounts.proposal_key, false),
            AccountMeta::new_readonly(accounts.config_key, false),
        ],
        &[accounts.guard_key],
        |ctx| {
            organization::processor::process_initialize_proposal_v0(ctx, args)
        },
    )
}

// ---------------------------------------------------------------------------
// Instruction handlers
// ---------------------------------------------------------------------------

/// `InitializeGuardV0`
///
/// Accounts:
///   0. `[signer]`           — Payer.
///   1. `[writable]`         — Guard account.
pub fn process_initialize_guard_v0(
    ctx: &mut CallContext,
    name: String,
    guard_type: GuardType,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(2)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(GuardError::MissingRequiredSignature.into());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(GuardError::NameTooLong.into());
    }

    // A zero divisor can never be evaluated.
    if let GuardType::MintList { guard_data } = &guard_type {
        if guard_data.iter().any(|config| config.divisor == 0) {
            return Err(GuardError::InvalidGuardConfig.into());
        }
    }

    let guard_key = *ctx.instruction_account_key(1)?;
    if guard_key != guard_address(&name) {
        return Err(GuardError::InvalidDerivedAddress.into());
    }
    if ctx.account(&guard_key).is_some_and(|a| !a.data.is_empty()) {
        return Err(GuardError::AddressCollision.into());
    }

    let guard = GuardV0 { name, guard_type };
    let data = guard
        .to_account_data()
        .map_err(|_| GuardError::InvalidAccountData)?;
    ctx.set_account(guard_key, id(), data)?;

    debug!("InitializeGuardV0: guard={guard_key}");
    Ok(())
}

/// `InitializeProposalPermissivelyV0`
///
/// Accounts: the factory base (0-5).
pub fn process_initialize_proposal_permissively_v0(
    ctx: &mut CallContext,
    args: InitializeProposalArgsV0,
) -> Result<(), LedgerError> {
    let (accounts, guard) = load_factory_accounts(ctx)?;

    match guard.guard_type {
        GuardType::Permissive => {}
        _ => return Err(GuardError::GuardTypeMismatch.into()),
    }

    invoke_initialize_proposal(ctx, &accounts, args)
}

/// `InitializeProposalByWalletV0`
///
/// Accounts: the factory base (0-5), then:
///   6. `[signer]`           — Proposer.
pub fn process_initialize_proposal_by_wallet_v0(
    ctx: &mut CallContext,
    args: InitializeProposalArgsV0,
) -> Result<(), LedgerError> {
    let (accounts, guard) = load_factory_accounts(ctx)?;

    ctx.check_number_of_instruction_accounts(7)?;
    if !ctx.is_instruction_account_signer(6)? {
        return Err(GuardError::MissingRequiredSignature.into());
    }
    let proposer = *ctx.instruction_account_key(6)?;

    match guard.guard_type {
        GuardType::WalletList { .. } => {}
        _ => return Err(GuardError::GuardTypeMismatch.into()),
    }
    let weight = evaluate(&guard.guard_type, &proposer, &GuardProof::None)?;
    debug!("InitializeProposalByWalletV0: proposer={proposer}, weight={weight}");

    invoke_initialize_proposal(ctx, &accounts, args)
}

/// `InitializeProposalByTokenV0`
///
/// Accounts: the factory base (0-5), then:
///   6. `[signer]`           — Proposer.
///   7. `[]`                 — Proposer's token account.
pub fn process_initialize_proposal_by_token_v0(
    ctx: &mut CallContext,
    args: InitializeProposalArgsV0,
) -> Result<(), LedgerError> {
    let (accounts, guard) = load_factory_accounts(ctx)?;

    ctx.check_number_of_instruction_accounts(8)?;
    if !ctx.is_instruction_account_signer(6)? {
        return Err(GuardError::MissingRequiredSignature.into());
    }
    let proposer = *ctx.instruction_account_key(6)?;
    let token_account_key = *ctx.instruction_account_key(7)?;

    match guard.guard_type {
        GuardType::MintList { .. } => {}
        _ => return Err(GuardError::GuardTypeMismatch.into()),
    }
    let token = load_token_account(ctx, &token_account_key)?;
    let weight = evaluate(&guard.guard_type, &proposer, &GuardProof::Token { token: &token })?;
    debug!("InitializeProposalByTokenV0: proposer={proposer}, weight={weight}");

    invoke_initialize_proposal(ctx, &accounts, args)
}

/// `InitializeProposalByNftV0`
///
/// Accounts: the factory base (0-5), then:
///   6. `[signer]`           — Proposer.
///   7. `[]`                 — NFT mint.
///   8. `[]`                 — Metadata account for the mint.
///   9. `[]`                 — Proposer's token account holding the NFT.
pub fn process_initialize_proposal_by_nft_v0(
    ctx: &mut CallContext,
    args: InitializeProposalArgsV0,
) -> Result<(), LedgerError> {
    let (accounts, guard) = load_factory_accounts(ctx)?;

    ctx.check_number_of_instruction_accounts(10)?;
    if !ctx.is_instruction_account_signer(6)? {
        return Err(GuardError::MissingRequiredSignature.into());
    }
    let proposer = *ctx.instruction_account_key(6)?;
    let mint = *ctx.instruction_account_key(7)?;
    let metadata_key = *ctx.instruction_account_key(8)?;
    let token_account_key = *ctx.instruction_account_key(9)?;

    match guard.guard_type {
        GuardType::CollectionMint { .. } | GuardType::FirstCreatorAddress { .. } => {}
        _ => return Err(GuardError::GuardTypeMismatch.into()),
    }
    let metadata = load_metadata(ctx, &mint, &metadata_key)?;
    let token = load_token_account(ctx, &token_account_key)?;
    let weight = evaluate(
        &guard.guard_type,
        &proposer,
        &GuardProof::Nft {
            mint: &mint,
            metadata: &metadata,
            token: &token,
        },
    )?;
    debug!("InitializeProposalByNftV0: proposer={proposer}, weight={weight}");

    invoke_initialize_proposal(ctx, &accounts, args)
}
