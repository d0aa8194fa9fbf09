//! Account models for the external token and metadata programs.
//!
//! Guards validate proof accounts materialised by two external programs:
//! the token program (balances) and the metadata program (NFT metadata with
//! collection and creator attestations).  Minting and metadata creation are
//! out of scope; only the account layouts the guards read are modelled here.

use {
    borsh::{BorshDeserialize, BorshSerialize},
    mgv1_ledger::derive_address,
    solana_pubkey::Pubkey,
};

/// The external token program's id.
pub mod token_program {
    solana_pubkey::declare_id!("Tokenkeg11111111111111111111111111111111111");
}

/// The external metadata program's id.
pub mod metadata_program {
    solana_pubkey::declare_id!("Meta111111111111111111111111111111111111111");
}

/// Seed tag for metadata addresses.
pub const METADATA_SEED: &[u8] = b"metadata";

/// Discriminator for token accounts.
pub const TOKEN_ACCOUNT_DISCRIMINATOR: u8 = 1;

/// Discriminator for metadata accounts.
pub const METADATA_DISCRIMINATOR: u8 = 1;

/// A wallet's balance of one mint.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TokenAccount {
    pub mint: Pubkey,
    /// The wallet this balance belongs to.
    pub owner: Pubkey,
    pub amount: u64,
}

impl TokenAccount {
    /// Deserialise from raw account data (expects leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        if data.is_empty() || data[0] != TOKEN_ACCOUNT_DISCRIMINATOR {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "missing or invalid token account discriminator",
            ));
        }
        let mut cursor = &data[1..];
        BorshDeserialize::deserialize_reader(&mut cursor)
    }

    /// Serialise to raw account data (prepends discriminator).
    pub fn to_account_data(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut data = vec![TOKEN_ACCOUNT_DISCRIMINATOR];
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }
}

/// A collection attestation inside NFT metadata.  `verified` is set only by
/// the collection authority, which is what makes it trustworthy.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Collection {
    pub verified: bool,
    pub key: Pubkey,
}

/// A creator attestation inside NFT metadata.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Creator {
    pub address: Pubkey,
    pub verified: bool,
    pub share: u8,
}

/// NFT metadata, reduced to the fields guards read.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MetadataAccount {
    pub mint: Pubkey,
    pub collection: Option<Collection>,
    pub creators: Option<Vec<Creator>>,
}

impl MetadataAccount {
    /// Deserialise from raw account data (expects leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        if data.is_empty() || data[0] != METADATA_DISCRIMINATOR {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "missing or invalid metadata discriminator",
            ));
        }
        let mut cursor = &data[1..];
        BorshDeserialize::deserialize_reader(&mut cursor)
    }

    /// Serialise to raw account data (prepends discriminator).
    pub fn to_account_data(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut data = vec![METADATA_DISCRIMINATOR];
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }
}

/// Canonical derived address of the metadata record for `mint`.
///
/// Supplied metadata accounts must sit exactly here; anything else is a
/// forged proof.
pub fn metadata_address(mint: &Pubkey) -> Pubkey {
    derive_address(
        &metadata_program::id(),
        &[
            METADATA_SEED,
            metadata_program::id().as_ref(),
            mint.as_ref(),
        ],
    )
}
