//! Instruction processing logic for the MGv1 Vote Proxy program.

use {
    crate::{
        error::ProxyError,
        instruction::ProxyInstruction,
        state::{proxy_address, ConditionalController, ProxyV0},
    },
    log::*,
    mgv1_ledger::{
        limited_deserialize, AccountMeta, CallContext, LedgerError, MAX_INSTRUCTION_DATA_SIZE,
    },
    mgv1_nft_voter_program as nft_voter,
    mgv1_proposal_program as proposal,
    mgv1_proposal_program::{OnVoteHook, ProposalV0},
    solana_pubkey::Pubkey,
};

/// Maximum length of a proxy name, in bytes.
const MAX_NAME_LEN: usize = 32;

/// Index where the downstream controller's accounts begin in `VoteV0`.
const VOTE_REMAINING_ACCOUNTS_OFFSET: usize = 5;

/// Index where the downstream controller's accounts begin in
/// `RelinquishVoteV0`.
const RELINQUISH_REMAINING_ACCOUNTS_OFFSET: usize = 4;

// ---------------------------------------------------------------------------
// Program ID
// ---------------------------------------------------------------------------

solana_pubkey::declare_id!("VoteProxy1111111111111111111111111111111111");

// ---------------------------------------------------------------------------
// Downstream controller capability
// ---------------------------------------------------------------------------

/// A downstream vote controller the proxy can forward to.
///
/// Implementations receive the proxy's remaining accounts as their own
/// account list and the proxy's derived-address signature for wherever they
/// expect their vote controller to sign.
pub trait ProxyTarget {
    /// The controller address conditionals select by.
    fn id(&self) -> Pubkey;

    /// Forward a vote.
    fn vote(
        &self,
        ctx: &mut CallContext,
        proxy_key: &Pubkey,
        remaining_accounts_offset: usize,
        choice: u16,
        on_vote_hook: Option<&dyn OnVoteHook>,
    ) -> Result<(), LedgerError>;

    /// Forward a relinquish.
    fn relinquish(
        &self,
        ctx: &mut CallContext,
        proxy_key: &Pubkey,
        remaining_accounts_offset: usize,
        choice: u16,
        on_vote_hook: Option<&dyn OnVoteHook>,
    ) -> Result<(), LedgerError>;
}

/// Copy the current frame's remaining accounts, granting the proxy's
/// address the signer flag the downstream controller expects.
fn forwarded_accounts(
    ctx: &CallContext,
    proxy_key: &Pubkey,
    remaining_accounts_offset: usize,
) -> Vec<AccountMeta> {
    ctx.instruction_accounts()
        .iter()
        .skip(remaining_accounts_offset)
        .cloned()
        .map(|mut meta| {
            if meta.pubkey == *proxy_key {
                meta.is_signer = true;
            }
            meta
        })
        .collect()
}

/// The NFT voter as a proxy target.
pub struct NftVoterTarget;

impl ProxyTarget for NftVoterTarget {
    fn id(&self) -> Pubkey {
        nft_voter::id()
    }

    fn vote(
        &self,
        ctx: &mut CallContext,
        proxy_key: &Pubkey,
        remaining_accounts_offset: usize,
        choice: u16,
        on_vote_hook: Option<&dyn OnVoteHook>,
    ) -> Result<(), LedgerError> {
        let accounts = forwarded_accounts(ctx, proxy_key, remaining_accounts_offset);
        ctx.invoke_signed(accounts, &[*proxy_key], |ctx| {
            nft_voter::processor::process_vote_v0(ctx, choice, on_vote_hook)
        })
    }

    fn relinquish(
        &self,
        ctx: &mut CallContext,
        proxy_key: &Pubkey,
        remaining_accounts_offset: usize,
        choice: u16,
        on_vote_hook: Option<&dyn OnVoteHook>,
    ) -> Result<(), LedgerError> {
        let accounts = forwarded_accounts(ctx, proxy_key, remaining_accounts_offset);
        ctx.invoke_signed(accounts, &[*proxy_key], |ctx| {
            nft_voter::processor::process_relinquish_vote_v0(ctx, choice, on_vote_hook)
        })
    }
}

// ---------------------------------------------------------------------------
// Entrypoint
// ---------------------------------------------------------------------------

/// Process one vote-proxy-program instruction.
///
/// `targets` supplies the downstream controller implementations routing may
/// select from; `on_vote_hook` is passed through to the proposal ledger.
pub fn process_instruction(
    ctx: &mut CallContext,
    instruction_data: &[u8],
    targets: &[&dyn ProxyTarget],
    on_vote_hook: Option<&dyn OnVoteHook>,
) -> Result<(), LedgerError> {
    let instruction: ProxyInstruction =
        limited_deserialize(instruction_data, MAX_INSTRUCTION_DATA_SIZE)?;

    trace!("vote_proxy process_instruction: {instruction:?}");

    match instruction {
        ProxyInstruction::InitializeProxyV0 {
            name,
            authority,
            conditionals,
            fallback_controller,
        } => process_initialize_proxy_v0(ctx, name, authority, conditionals, fallback_controller),
        ProxyInstruction::VoteV0 { choice } => {
            process_vote_v0(ctx, choice, targets, on_vote_hook)
        }
        ProxyInstruction::RelinquishVoteV0 { choice } => {
            process_relinquish_vote_v0(ctx, choice, targets, on_vote_hook)
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load and deserialise the `ProxyV0` at `address`.
pub fn load_proxy(ctx: &CallContext, address: &Pubkey) -> Result<ProxyV0, LedgerError> {
    let account = ctx.account(address).ok_or(ProxyError::NotInitialized)?;
    if account.owner != id() {
        return Err(ProxyError::InvalidAccountOwner.into());
    }
    ProxyV0::deserialize(&account.data).map_err(|_| ProxyError::NotInitialized.into())
}

/// First-match-wins conditional evaluation, falling back to the configured
/// fallback controller.
fn select_controller(proxy: &ProxyV0, proposal: &ProposalV0) -> Result<Pubkey, LedgerError> {
    for ConditionalController {
        condition,
        controller,
    } in &proxy.conditionals
    {
        if condition.evaluate(proposal)? {
            return Ok(*controller);
        }
    }
    if proxy.fallback_controller != Pubkey::default() {
        return Ok(proxy.fallback_controller);
    }
    Err(ProxyError::NoMatchingConditional.into())
}

fn find_target<'a>(
    targets: &'a [&'a dyn ProxyTarget],
    controller: &Pubkey,
) -> Result<&'a dyn ProxyTarget, LedgerError> {
    targets
        .iter()
        .find(|target| target.id() == *controller)
        .copied()
        .ok_or_else(|| ProxyError::InvalidController.into())
}

// ---------------------------------------------------------------------------
// Instruction handlers
// ---------------------------------------------------------------------------

/// `InitializeProxyV0`
///
/// Accounts:
///   0. `[signer]`           — Payer.
///   1. `[writable]`         — Proxy account.
pub fn process_initialize_proxy_v0(
    ctx: &mut CallContext,
    name: String,
    authority: Pubkey,
    conditionals: Vec<ConditionalController>,
    fallback_controller: Pubkey,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(2)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(ProxyError::MissingRequiredSignature.into());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ProxyError::NameTooLong.into());
    }
    if conditionals.is_empty() && fallback_controller == Pubkey::default() {
        return Err(ProxyError::InvalidProxyConfig.into());
    }

    let proxy_key = *ctx.instruction_account_key(1)?;
    if proxy_key != proxy_address(&name) {
        return Err(ProxyError::InvalidDerivedAddress.into());
    }
    if ctx.account(&proxy_key).is_some_and(|a| !a.data.is_empty()) {
        return Err(ProxyError::AddressCollision.into());
    }

    let proxy = ProxyV0 {
        authority,
        fallback_controller,
        name,
        conditionals,
    };
    let data = proxy
        .to_account_data()
        .map_err(|_| ProxyError::InvalidAccountData)?;
    ctx.set_account(proxy_key, id(), data)?;

    debug!("InitializeProxyV0: proxy={proxy_key}");
    Ok(())
}

/// `VoteV0`
///
/// Accounts:
///   0. `[signer]`           — Payer.
///   1. `[signer]`           — Voter.
///   2. `[]`                 — Proxy account.
///   3. `[writable]`         — Proposal account.
///   4. `[]`                 — Proposal config account.
///   5... `[varies]`         — The selected controller's account list.
pub fn process_vote_v0(
    ctx: &mut CallContext,
    choice: u16,
    targets: &[&dyn ProxyTarget],
    on_vote_hook: Option<&dyn OnVoteHook>,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(5)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(ProxyError::MissingRequiredSignature.into());
    }
    if !ctx.is_instruction_account_signer(1)? {
        return Err(ProxyError::MissingRequiredSignature.into());
    }
    let proxy_key = *ctx.instruction_account_key(2)?;
    let proposal_key = *ctx.instruction_account_key(3)?;

    let proxy = load_proxy(ctx, &proxy_key)?;
    let proposal_record = proposal::processor::load_proposal(ctx, &proposal_key)?;

    let controller = select_controller(&proxy, &proposal_record)?;
    let target = find_target(targets, &controller)?;
    debug!("VoteV0: proxy={proxy_key} routing choice={choice} to {controller}");

    target.vote(
        ctx,
        &proxy_key,
        VOTE_REMAINING_ACCOUNTS_OFFSET,
        choice,
        on_vote_hook,
    )
}

/// `RelinquishVoteV0`
///
/// Accounts:
///   0. `[signer]`           — Voter.
///   1. `[]`                 — Proxy account.
///   2. `[writable]`         — Proposal account.
///   3. `[]`                 — Proposal config account.
///   4... `[varies]`         — The selected controller's account list.
pub fn process_relinquish_vote_v0(
    ctx: &mut CallContext,
    choice: u16,
    targets: &[&dyn ProxyTarget],
    on_vote_hook: Option<&dyn OnVoteHook>,
) -> Result<(), LedgerError> {
    ctx.check_number_of_instruction_accounts(4)?;

    if !ctx.is_instruction_account_signer(0)? {
        return Err(ProxyError::MissingRequiredSignature.into());
    }
    let proxy_key = *ctx.instruction_account_key(1)?;
    let proposal_key = *ctx.instruction_account_key(2)?;

    let proxy = load_proxy(ctx, &proxy_key)?;
    let proposal_record = proposal::processor::load_proposal(ctx, &proposal_key)?;

    let controller = select_controller(&proxy, &proposal_record)?;
    let target = find_target(targets, &controller)?;
    debug!("RelinquishVoteV0: proxy={proxy_key} routing choice={choice} to {controller}");

    target.relinquish(
        ctx,
        &proxy_key,
        RELINQUISH_REMAINING_ACCOUNTS_OFFSET,
        choice,
        on_vote_hook,
    )
}
