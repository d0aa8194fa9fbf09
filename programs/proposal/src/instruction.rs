//! Instruction definitions for the MGv1 Proposal program.
//!
//! Instructions are serialised with `bincode` and decoded through the
//! ledger's size-limited deserialiser, like every MGv1 program.

use {
    crate::state::ProposalState,
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
};

/// A choice as supplied at proposal creation.  Weights always start at zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChoiceArg {
    pub name: String,
    /// Any other data the creator wants attached to the choice.
    pub uri: Option<String>,
}

/// Instructions supported by the MGv1 Proposal program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalInstruction {
    /// One-time creation of a `ProposalConfigV0`.
    ///
    /// The config's address is derived from its name; creating a second
    /// config with the same name fails `AddressCollision`.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Payer funding the record.
    /// 1. `[writable]`         — Proposal config account, at the derived
    ///                           address for `name`.
    InitializeProposalConfigV0 {
        name: String,
        vote_controller: Pubkey,
        state_controller: Pubkey,
        on_vote_hook: Pubkey,
    },

    /// Create a proposal in `Draft` bound to an existing config.
    ///
    /// The proposal's address is derived from `(namespace, seed)`; the
    /// namespace must sign so unrelated parties cannot squat another
    /// namespace's proposal addresses.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Payer funding the record.
    /// 1. `[signer]`           — Namespace seeding the proposal address.
    /// 2. `[]`                 — Owner recorded on the proposal.
    /// 3. `[writable]`         — Proposal account, at the derived address
    ///                           for `(namespace, seed)`.
    /// 4. `[]`                 — Proposal config account.
    InitializeProposalV0 {
        seed: Vec<u8>,
        name: String,
        uri: String,
        max_choices_per_voter: u16,
        choices: Vec<ChoiceArg>,
        tags: Vec<String>,
    },

    /// Transition the proposal's lifecycle state.
    ///
    /// Only the config's state controller may call this, and terminal states
    /// (`Resolved`, `Cancelled`) are sinks.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — State controller recorded in the config.
    /// 1. `[writable]`         — Proposal account.
    /// 2. `[]`                 — Proposal config account.
    UpdateStateV0 { new_state: ProposalState },

    /// Add (or with `remove_vote` subtract) `weight` on one choice.
    ///
    /// Only the config's vote controller may call this, and only while the
    /// proposal is `Voting`.  Arithmetic is checked: overflow and underflow
    /// abort the call.  If the config names an on-vote hook it is invoked
    /// after the mutation and its failure aborts the whole vote.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Vote controller recorded in the config.
    /// 1. `[writable]`         — Proposal account.
    /// 2. `[]`                 — Proposal config account.
    /// 3. `[]`                 — On-vote hook address (required when the
    ///                           config names one).
    VoteV0 {
        choice: u16,
        weight: u128,
        remove_vote: bool,
    },
}
