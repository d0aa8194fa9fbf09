//! Account state types for the MGv1 Organization program.

use {
    borsh::{BorshDeserialize, BorshSerialize},
    mgv1_ledger::derive_address,
    solana_pubkey::Pubkey,
};

/// Seed tag for `OrganizationV0` addresses.
pub const ORGANIZATION_SEED: &[u8] = b"organization";

/// Discriminator for `OrganizationV0` accounts.
pub const ORGANIZATION_DISCRIMINATOR: u8 = 1;

/// A named proposal namespace.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct OrganizationV0 {
    /// Count of proposals created through this organization; seeds the next
    /// proposal's address.
    pub num_proposals: u32,

    /// Authority allowed to change settings (should be self-governed through
    /// an org wallet).
    pub authority: Pubkey,

    /// Guard whose signature gates proposal creation.
    pub guard: Pubkey,

    /// Parent organization for sub-orgs; the default address if none.
    pub parent: Pubkey,

    /// Config clients should bind new proposals to unless told otherwise.
    pub default_proposal_config: Pubkey,

    /// The proposal program this organization creates proposals under.
    pub proposal_program: Pubkey,

    pub name: String,
    pub uri: String,
}

impl OrganizationV0 {
    /// Deserialise from raw account data (expects leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        if data.is_empty() || data[0] != ORGANIZATION_DISCRIMINATOR {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "missing or invalid organization discriminator",
            ));
        }
        let mut cursor = &data[1..];
        BorshDeserialize::deserialize_reader(&mut cursor)
    }

    /// Serialise to raw account data (prepends discriminator).
    pub fn to_account_data(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut data = vec![ORGANIZATION_DISCRIMINATOR];
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }
}

/// Derived address of the `OrganizationV0` named `name`.
pub fn organization_address(name: &str) -> Pubkey {
    derive_address(&crate::id(), &[ORGANIZATION_SEED, name.as_bytes()])
}
