//! Guard evaluation: proof accounts in, authorized weight out.
//!
//! Evaluation is pure — a function of the guard's entries and the supplied
//! proofs only.  It never mutates guard state and never retries; the first
//! failed check aborts the surrounding operation.

use {
    crate::{
        error::GuardError,
        state::{GuardType, MultiplierConfig},
        token::{MetadataAccount, TokenAccount},
    },
    solana_pubkey::Pubkey,
};

/// The proof accounts supplied alongside a guard evaluation.  Which shape is
/// required depends on the guard kind; a mismatch fails `GuardTypeMismatch`.
#[derive(Debug, Clone, Copy)]
pub enum GuardProof<'a> {
    /// No proof beyond the caller's own address.
    None,
    /// A token account proving a balance.
    Token { token: &'a TokenAccount },
    /// An NFT: its mint, canonical metadata, and the holding token account.
    Nft {
        mint: &'a Pubkey,
        metadata: &'a MetadataAccount,
        token: &'a TokenAccount,
    },
}

/// Evaluate `guard_type` for `wallet` against `proof`, returning the weight
/// the caller is authorized to wield.
///
/// The returned weight is always non-zero: configurations or balances that
/// work out to zero weight fail `InsufficientWeight` instead of authorizing
/// a no-op.
pub fn evaluate(
    guard_type: &GuardType,
    wallet: &Pubkey,
    proof: &GuardProof,
) -> Result<u128, GuardError> {
    match (guard_type, proof) {
        (GuardType::Permissive, _) => Ok(1),
        (GuardType::WalletList { guard_data }, _) => evaluate_wallet_list(guard_data, wallet),
        (GuardType::MintList { guard_data }, GuardProof::Token { token }) => {
            evaluate_mint_list(guard_data, wallet, token)
        }
        (
            GuardType::CollectionMint { guard_data },
            GuardProof::Nft {
                mint,
                metadata,
                token,
            },
        ) => evaluate_collection_mint(guard_data, wallet, mint, metadata, token),
        (
            GuardType::FirstCreatorAddress { guard_data },
            GuardProof::Nft {
                mint,
                metadata,
                token,
            },
        ) => evaluate_first_creator(guard_data, wallet, mint, metadata, token),
        _ => Err(GuardError::GuardTypeMismatch),
    }
}

fn nonzero_multiplier(config: &MultiplierConfig) -> Result<u128, GuardError> {
    if config.multiplier == 0 {
        return Err(GuardError::InsufficientWeight);
    }
    Ok(u128::from(config.multiplier))
}

fn evaluate_wallet_list(
    entries: &[MultiplierConfig],
    wallet: &Pubkey,
) -> Result<u128, GuardError> {
    let config = entries
        .iter()
        .find(|config| config.address == *wallet)
        .ok_or(GuardError::NotInList)?;
    nonzero_multiplier(config)
}

fn evaluate_mint_list(
    entries: &[crate::state::DivisorConfig],
    wallet: &Pubkey,
    token: &TokenAccount,
) -> Result<u128, GuardError> {
    if token.owner != *wallet {
        return Err(GuardError::InvalidTokenOwner);
    }
    let config = entries
        .iter()
        .find(|config| config.address == token.mint)
        .ok_or(GuardError::MintNotValid)?;
    let weight = token
        .amount
        .checked_div(config.divisor)
        .ok_or(GuardError::InvalidGuardConfig)?;
    if weight == 0 {
        return Err(GuardError::InsufficientWeight);
    }
    Ok(u128::from(weight))
}

/// Common checks for NFT-backed proofs: the token account must hold the
/// named mint for the caller, the metadata must describe the same mint, and
/// at least one unit must actually be held.
fn check_nft_holding(
    wallet: &Pubkey,
    mint: &Pubkey,
    metadata: &MetadataAccount,
    token: &TokenAccount,
) -> Result<(), GuardError> {
    if token.owner != *wallet {
        return Err(GuardError::InvalidTokenOwner);
    }
    if token.mint != *mint || metadata.mint != *mint {
        return Err(GuardError::MintNotValid);
    }
    if token.amount < 1 {
        return Err(GuardError::InsufficientWeight);
    }
    Ok(())
}

fn evaluate_collection_mint(
    entries: &[MultiplierConfig],
    wallet: &Pubkey,
    mint: &Pubkey,
    metadata: &MetadataAccount,
    token: &TokenAccount,
) -> Result<u128, GuardError> {
    check_nft_holding(wallet, mint, metadata, token)?;
    let config = metadata
        .collection
        .as_ref()
        .filter(|collection| collection.verified)
        .and_then(|collection| {
            entries
                .iter()
                .find(|config| config.address == collection.key)
        })
        .ok_or(GuardError::CollectionVerificationFailed)?;
    nonzero_multiplier(config)
}

fn evaluate_first_creator(
    entries: &[MultiplierConfig],
    wallet: &Pubkey,
    mint: &Pubkey,
    metadata: &MetadataAccount,
    token: &TokenAccount,
) -> Result<u128, GuardError> {
    check_nft_holding(wallet, mint, metadata, token)?;
    let config = metadata
        .creators
        .as_ref()
        .and_then(|creators| creators.iter().find(|creator| creator.verified))
        .and_then(|first_creator| {
            entries
                .iter()
                .find(|config| config.address == first_creator.address)
        })
        .ok_or(GuardError::FirstCreatorVerificationFailed)?;
    nonzero_multiplier(config)
}
