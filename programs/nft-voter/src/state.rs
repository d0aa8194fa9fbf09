//! Account state types for the MGv1 NFT Voter program.

use {
    borsh::{BorshDeserialize, BorshSerialize},
    mgv1_ledger::derive_address,
    solana_pubkey::Pubkey,
};

/// Seed tag for `NftVoterV0` addresses.
pub const NFT_VOTER_SEED: &[u8] = b"nft_voter";

/// Seed tag for `VoteMarkerV0` addresses.
pub const MARKER_SEED: &[u8] = b"marker";

/// Discriminator for `NftVoterV0` accounts.
pub const NFT_VOTER_DISCRIMINATOR: u8 = 1;

/// Discriminator for `VoteMarkerV0` accounts.
pub const VOTE_MARKER_DISCRIMINATOR: u8 = 2;

/// A named NFT-voting registry bound to an org-guard policy.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct NftVoterV0 {
    pub name: String,
    pub authority: Pubkey,
    /// The org-guard `CollectionMint`/`FirstCreatorAddress` guard that
    /// weights every vote.
    pub guard: Pubkey,
}

impl NftVoterV0 {
    /// Deserialise from raw account data (expects leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        if data.is_empty() || data[0] != NFT_VOTER_DISCRIMINATOR {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "missing or invalid nft voter discriminator",
            ));
        }
        let mut cursor = &data[1..];
        BorshDeserialize::deserialize_reader(&mut cursor)
    }

    /// Serialise to raw account data (prepends discriminator).
    pub fn to_account_data(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut data = vec![NFT_VOTER_DISCRIMINATOR];
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }
}

/// The committed choices of one NFT on one proposal.
///
/// At most one marker exists per (proposal, mint); its address is derived
/// from both.  The recorded `weight` is what every one of its choices added
/// to the tally and what relinquishing subtracts.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct VoteMarkerV0 {
    pub voter: Pubkey,
    pub nft_voter: Pubkey,
    pub proposal: Pubkey,
    pub mint: Pubkey,
    pub choices: Vec<u16>,
    pub weight: u128,
    pub voted_at: i64,
}

impl VoteMarkerV0 {
    /// Deserialise from raw account data (expects leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        if data.is_empty() || data[0] != VOTE_MARKER_DISCRIMINATOR {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "missing or invalid vote marker discriminator",
            ));
        }
        let mut cursor = &data[1..];
        BorshDeserialize::deserialize_reader(&mut cursor)
    }

    /// Serialise to raw account data (prepends discriminator).
    pub fn to_account_data(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut data = vec![VOTE_MARKER_DISCRIMINATOR];
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }
}

/// Derived address of the `NftVoterV0` named `name`.
pub fn nft_voter_address(name: &str) -> Pubkey {
    derive_address(&crate::id(), &[NFT_VOTER_SEED, name.as_bytes()])
}

/// Derived address of the marker for `(mint, proposal)`.
pub fn marker_address(mint: &Pubkey, proposal: &Pubkey) -> Pubkey {
    derive_address(
        &crate::id(),
        &[MARKER_SEED, mint.as_ref(), proposal.as_ref()],
    )
}
