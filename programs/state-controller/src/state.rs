//! Account state types for the MGv1 State Controller program.

use {
    crate::resolution::ResolutionStrategy,
    borsh::{BorshDeserialize, BorshSerialize},
    mgv1_ledger::derive_address,
    solana_pubkey::Pubkey,
};

/// Seed tag for `ResolutionSettingsV0` addresses.
pub const RESOLUTION_SETTINGS_SEED: &[u8] = b"resolution_settings";

/// Discriminator for `ResolutionSettingsV0` accounts.
pub const RESOLUTION_SETTINGS_DISCRIMINATOR: u8 = 1;

/// A named resolution strategy.
///
/// The record's address is what proposal configs bind as their
/// `state_controller`: the settings record signs state transitions, so the
/// strategy it carries is the only path to resolution.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ResolutionSettingsV0 {
    pub name: String,
    pub settings: ResolutionStrategy,
}

impl ResolutionSettingsV0 {
    /// Deserialise from raw account data (expects leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        if data.is_empty() || data[0] != RESOLUTION_SETTINGS_DISCRIMINATOR {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "missing or invalid resolution settings discriminator",
            ));
        }
        let mut cursor = &data[1..];
        BorshDeserialize::deserialize_reader(&mut cursor)
    }

    /// Serialise to raw account data (prepends discriminator).
    pub fn to_account_data(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut data = vec![RESOLUTION_SETTINGS_DISCRIMINATOR];
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }
}

/// Derived address of the `ResolutionSettingsV0` named `name`.
pub fn resolution_settings_address(name: &str) -> Pubkey {
    derive_address(&crate::id(), &[RESOLUTION_SETTINGS_SEED, name.as_bytes()])
}
