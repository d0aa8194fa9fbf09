//! Account state types for the MGv1 Vote Proxy program.

use {
    crate::error::ProxyError,
    borsh::{BorshDeserialize, BorshSerialize},
    mgv1_ledger::derive_address,
    mgv1_proposal_program::{ProposalState, ProposalV0},
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
};

/// Seed tag for `ProxyV0` addresses.
pub const PROXY_SEED: &[u8] = b"proxy";

/// Discriminator for `ProxyV0` accounts.
pub const PROXY_DISCRIMINATOR: u8 = 1;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub enum ComparisonOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
}

/// What a condition compares the proposal against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub enum Operand {
    /// Reserved for value-based routing; not implemented.
    TransactionValue(u64),
    /// The proposal state's ordinal (see [`proposal_state_ordinal`]).
    ProposalState(u8),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Condition {
    pub operator: ComparisonOperator,
    pub operand: Operand,
}

/// A condition and the controller that handles the vote when it matches.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct ConditionalController {
    pub condition: Condition,
    pub controller: Pubkey,
}

/// Stable ordinal of each proposal state, the quantity conditions compare
/// against.
pub fn proposal_state_ordinal(state: &ProposalState) -> u8 {
    match state {
        ProposalState::Draft => 0,
        ProposalState::Cancelled => 1,
        ProposalState::Voting { .. } => 2,
        ProposalState::Resolved { .. } => 3,
        ProposalState::Custom { .. } => 4,
    }
}

impl Condition {
    /// Whether this condition holds for `proposal`.
    pub fn evaluate(&self, proposal: &ProposalV0) -> Result<bool, ProxyError> {
        let operand = match self.operand {
            Operand::TransactionValue(_) => return Err(ProxyError::FeatureNotImplemented),
            Operand::ProposalState(value) => value,
        };
        let ordinal = proposal_state_ordinal(&proposal.state);
        Ok(match self.operator {
            ComparisonOperator::Equals => operand == ordinal,
            ComparisonOperator::NotEquals => operand != ordinal,
            ComparisonOperator::GreaterThan => operand > ordinal,
            ComparisonOperator::LessThan => operand < ordinal,
        })
    }
}

/// A named routing table between vote controllers.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ProxyV0 {
    pub authority: Pubkey,
    /// Controller used when no conditional matches; the default address
    /// means none is configured.
    pub fallback_controller: Pubkey,
    pub name: String,
    pub conditionals: Vec<ConditionalController>,
}

impl ProxyV0 {
    /// Deserialise from raw account data (expects leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        if data.is_empty() || data[0] != PROXY_DISCRIMINATOR {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "missing or invalid proxy discriminator",
            ));
        }
        let mut cursor = &data[1..];
        BorshDeserialize::deserialize_reader(&mut cursor)
    }

    /// Serialise to raw account data (prepends discriminator).
    pub fn to_account_data(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut data = vec![PROXY_DISCRIMINATOR];
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }
}

/// Derived address of the `ProxyV0` named `name`.
pub fn proxy_address(name: &str) -> Pubkey {
    derive_address(&crate::id(), &[PROXY_SEED, name.as_bytes()])
}
