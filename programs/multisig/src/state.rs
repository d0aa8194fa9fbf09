//! Account state types for the MGv1 Multisig program.

use {
    borsh::{BorshDeserialize, BorshSerialize},
    mgv1_ledger::derive_address,
    solana_pubkey::Pubkey,
};

/// Seed tag for `MultisigConfigV0` addresses.
pub const MULTISIG_CONFIG_SEED: &[u8] = b"multisig_config";

/// Seed tag for `VoteRecordV0` addresses.
pub const VOTE_RECORD_SEED: &[u8] = b"vote_record";

/// Discriminator for `MultisigConfigV0` accounts.
pub const MULTISIG_CONFIG_DISCRIMINATOR: u8 = 1;

/// Discriminator for `VoteRecordV0` accounts.
pub const VOTE_RECORD_DISCRIMINATOR: u8 = 2;

/// A named, immutable member set.
///
/// Immutable to stop any chance of a member-list rewrite exploit: there is
/// no authority field on purpose.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MultisigConfigV0 {
    pub name: String,
    /// Weight votes by an external reputation source instead of 1.
    pub use_reputation: bool,
    pub members: Vec<Pubkey>,
}

impl MultisigConfigV0 {
    /// Deserialise from raw account data (expects leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        if data.is_empty() || data[0] != MULTISIG_CONFIG_DISCRIMINATOR {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "missing or invalid multisig config discriminator",
            ));
        }
        let mut cursor = &data[1..];
        BorshDeserialize::deserialize_reader(&mut cursor)
    }

    /// Serialise to raw account data (prepends discriminator).
    pub fn to_account_data(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut data = vec![MULTISIG_CONFIG_DISCRIMINATOR];
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }
}

/// One member's committed vote on one proposal.
///
/// `choice` is the double-vote latch: `Some` means the member's weight is
/// committed and voting again is rejected until relinquished.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct VoteRecordV0 {
    pub voter: Pubkey,
    pub proposal: Pubkey,
    pub choice: Option<u16>,
    /// Weight committed to the proposal ledger; subtracted verbatim on
    /// relinquish.
    pub weight: u128,
    pub voted_at: i64,
}

impl VoteRecordV0 {
    /// Deserialise from raw account data (expects leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        if data.is_empty() || data[0] != VOTE_RECORD_DISCRIMINATOR {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "missing or invalid vote record discriminator",
            ));
        }
        let mut cursor = &data[1..];
        BorshDeserialize::deserialize_reader(&mut cursor)
    }

    /// Serialise to raw account data (prepends discriminator).
    pub fn to_account_data(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut data = vec![VOTE_RECORD_DISCRIMINATOR];
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }
}

/// Derived address of the `MultisigConfigV0` named `name`.
pub fn multisig_config_address(name: &str) -> Pubkey {
    derive_address(&crate::id(), &[MULTISIG_CONFIG_SEED, name.as_bytes()])
}

/// Derived address of the vote record for `(proposal, voter)`.
pub fn vote_record_address(proposal: &Pubkey, voter: &Pubkey) -> Pubkey {
    derive_address(
        &crate::id(),
        &[VOTE_RECORD_SEED, proposal.as_ref(), voter.as_ref()],
    )
}
