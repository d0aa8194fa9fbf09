//! Account state types for the MGv1 Proposal program.

use {
    crate::constants::{PROPOSAL_CONFIG_SEED, PROPOSAL_SEED},
    borsh::{BorshDeserialize, BorshSerialize},
    mgv1_ledger::derive_address,
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
};

// ---------------------------------------------------------------------------
// Discriminator bytes
// ---------------------------------------------------------------------------

/// Discriminator for `ProposalConfigV0` accounts.
pub const PROPOSAL_CONFIG_DISCRIMINATOR: u8 = 1;

/// Discriminator for `ProposalV0` accounts.
pub const PROPOSAL_DISCRIMINATOR: u8 = 2;

// ---------------------------------------------------------------------------
// ProposalConfigV0
// ---------------------------------------------------------------------------

/// Principals bound to a family of proposals.
///
/// Immutable after creation.  `vote_controller` is the only signer whose
/// `VoteV0` calls are honoured for proposals bound to this config;
/// `state_controller` is the only signer that may transition proposal state;
/// `on_vote_hook`, when not the default address, is invoked synchronously
/// after every successful vote mutation.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ProposalConfigV0 {
    pub name: String,
    pub vote_controller: Pubkey,
    pub state_controller: Pubkey,
    pub on_vote_hook: Pubkey,
}

impl ProposalConfigV0 {
    /// Deserialise from raw account data (expects leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        if data.is_empty() || data[0] != PROPOSAL_CONFIG_DISCRIMINATOR {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "missing or invalid proposal config discriminator",
            ));
        }
        let mut cursor = &data[1..];
        BorshDeserialize::deserialize_reader(&mut cursor)
    }

    /// Serialise to raw account data (prepends discriminator).
    pub fn to_account_data(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut data = vec![PROPOSAL_CONFIG_DISCRIMINATOR];
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }
}

/// Derived address of the `ProposalConfigV0` named `name`.
pub fn proposal_config_address(name: &str) -> Pubkey {
    derive_address(&crate::id(), &[PROPOSAL_CONFIG_SEED, name.as_bytes()])
}

// ---------------------------------------------------------------------------
// ProposalState
// ---------------------------------------------------------------------------

/// Lifecycle state of a proposal.
///
/// `Resolved` and `Cancelled` are terminal; a proposal in either state can
/// never be mutated again.  Only `Voting` accepts vote mutations.
#[derive(
    Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub enum ProposalState {
    /// Being drafted; not yet open for voting.
    Draft,
    /// Abandoned before or during voting.  Terminal.
    Cancelled,
    /// Voting is open.  `start_ts` is when it opened.
    Voting { start_ts: i64 },
    /// Voting concluded with the listed winning choice indices.  Terminal.
    Resolved { choices: Vec<u16>, end_ts: i64 },
    /// A controller-defined state for lifecycles this program does not need
    /// to understand (vetoed, signing off, ranking, ...).  The name is kept
    /// human-readable so displays need not understand the controller.
    Custom { name: String, bin: Vec<u8> },
}

impl Default for ProposalState {
    fn default() -> Self {
        ProposalState::Draft
    }
}

impl ProposalState {
    /// Terminal states are sinks: no transition, vote, or other mutation may
    /// leave them.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProposalState::Cancelled | ProposalState::Resolved { .. }
        )
    }
}

// ---------------------------------------------------------------------------
// ProposalV0
// ---------------------------------------------------------------------------

/// One votable choice and its accumulated weight.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Choice {
    /// Total weight committed to this choice.  Mutated exclusively through
    /// `VoteV0`.
    pub weight: u128,
    pub name: String,
    /// Any other data the creator wants attached to the choice.
    pub uri: Option<String>,
}

/// On-chain state for a single proposal.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ProposalV0 {
    /// The signer whose address seeds this proposal's derivation.
    pub namespace: Pubkey,
    /// The entity that created the proposal (an organization, a wallet).
    pub owner: Pubkey,
    pub state: ProposalState,
    pub created_at: i64,
    /// The `ProposalConfigV0` this proposal is bound to.
    pub proposal_config: Pubkey,
    /// Upper bound on distinct choices a single voter may commit to.
    pub max_choices_per_voter: u16,
    /// Disambiguates proposals under one namespace.
    pub seed: Vec<u8>,
    pub name: String,
    pub uri: String,
    /// Free-form tags for filtering.
    pub tags: Vec<String>,
    pub choices: Vec<Choice>,
}

impl ProposalV0 {
    /// Deserialise from raw account data (expects leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        if data.is_empty() || data[0] != PROPOSAL_DISCRIMINATOR {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "missing or invalid proposal discriminator",
            ));
        }
        let mut cursor = &data[1..];
        BorshDeserialize::deserialize_reader(&mut cursor)
    }

    /// Serialise to raw account data (prepends discriminator).
    pub fn to_account_data(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut data = vec![PROPOSAL_DISCRIMINATOR];
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }
}

/// Derived address of the proposal seeded by `(namespace, seed)`.
pub fn proposal_address(namespace: &Pubkey, seed: &[u8]) -> Pubkey {
    derive_address(&crate::id(), &[PROPOSAL_SEED, namespace.as_ref(), seed])
}
