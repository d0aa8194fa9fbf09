//! Instruction definitions for the MGv1 Organization program.

use {
    mgv1_proposal_program::ChoiceArg,
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
};

/// Arguments for creating a proposal through an organization.  The seed is
/// not part of the arguments: it is always the organization's current
/// proposal counter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InitializeProposalArgsV0 {
    pub name: String,
    pub uri: String,
    pub max_choices_per_voter: u16,
    pub choices: Vec<ChoiceArg>,
    /// Tags which can be used to filter proposals.
    pub tags: Vec<String>,
}

/// Instructions supported by the MGv1 Organization program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganizationInstruction {
    /// Create a named organization.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Payer funding the record.
    /// 1. `[writable]`         — Organization account, at the derived
    ///                           address for `name`.
    InitializeOrganizationV0 {
        name: String,
        uri: String,
        authority: Pubkey,
        guard: Pubkey,
        parent: Pubkey,
        default_proposal_config: Pubkey,
        proposal_program: Pubkey,
    },

    /// Update organization settings.  `None` leaves a field unchanged.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Current organization authority.
    /// 1. `[writable]`         — Organization account.
    UpdateOrganizationV0 {
        uri: Option<String>,
        default_proposal_config: Option<Pubkey>,
        proposal_program: Option<Pubkey>,
        authority: Option<Pubkey>,
    },

    /// Create the organization's next proposal.
    ///
    /// The guard must sign: callers reach this through the guard program,
    /// which evaluates its policy before signing.  The proposal's seed is
    /// the organization's current counter, which increments atomically with
    /// creation.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Payer funding the records.
    /// 1. `[signer]`           — The organization's guard.
    /// 2. `[]`                 — Owner recorded on the proposal.
    /// 3. `[writable]`         — Organization account.
    /// 4. `[writable]`         — Proposal account, at the derived address
    ///                           for `(organization, counter)`.
    /// 5. `[]`                 — Proposal config account.
    InitializeProposalV0 { args: InitializeProposalArgsV0 },
}
