//! Account state types for the MGv1 Org Guard program.

use {
    borsh::{BorshDeserialize, BorshSerialize},
    mgv1_ledger::derive_address,
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
};

/// Seed tag for `GuardV0` addresses.
pub const GUARD_SEED: &[u8] = b"guard";

/// Discriminator for `GuardV0` accounts.
pub const GUARD_DISCRIMINATOR: u8 = 1;

/// An allow-list entry whose weight is divided out of a token balance.
#[derive(
    Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct DivisorConfig {
    pub address: Pubkey,
    /// Token amount per unit of weight.  Must be non-zero.
    pub divisor: u64,
}

/// An allow-list entry with a fixed weight multiplier.
#[derive(
    Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct MultiplierConfig {
    pub address: Pubkey,
    pub multiplier: u16,
}

/// The policy a guard enforces.  Closed set: adding a policy kind is an
/// explicit variant addition.
#[derive(
    Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub enum GuardType {
    /// Weight from holding an NFT whose *verified* collection is listed.
    CollectionMint { guard_data: Vec<MultiplierConfig> },
    /// Weight from holding an NFT whose first *verified* creator is listed.
    FirstCreatorAddress { guard_data: Vec<MultiplierConfig> },
    /// Weight from a listed mint's token balance, divided down.
    MintList { guard_data: Vec<DivisorConfig> },
    /// Weight from the caller's wallet address being listed.
    WalletList { guard_data: Vec<MultiplierConfig> },
    /// Anyone, weight 1.
    Permissive,
}

/// An immutable, named policy snapshot.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct GuardV0 {
    pub name: String,
    pub guard_type: GuardType,
}

impl GuardV0 {
    /// Deserialise from raw account data (expects leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        if data.is_empty() || data[0] != GUARD_DISCRIMINATOR {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "missing or invalid guard discriminator",
            ));
        }
        let mut cursor = &data[1..];
        BorshDeserialize::deserialize_reader(&mut cursor)
    }

    /// Serialise to raw account data (prepends discriminator).
    pub fn to_account_data(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut data = vec![GUARD_DISCRIMINATOR];
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }
}

/// Derived address of the `GuardV0` named `name`.
pub fn guard_address(name: &str) -> Pubkey {
    derive_address(&crate::id(), &[GUARD_SEED, name.as_bytes()])
}
