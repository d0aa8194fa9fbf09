//! Instruction definitions for the MGv1 Multisig program.

use {
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
};

/// Instructions supported by the MGv1 Multisig program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultisigInstruction {
    /// Create a named, immutable multisig config.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Payer funding the record.
    /// 1. `[writable]`         — Multisig config account, at the derived
    ///                           address for `name`.
    InitializeMultisigConfigV0 {
        name: String,
        use_reputation: bool,
        members: Vec<Pubkey>,
    },

    /// Cast a member's vote (weight 1) on a proposal whose config names this
    /// multisig as vote controller.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Payer funding the vote record.
    /// 1. `[signer]`           — Voter; must be a member.
    /// 2. `[]`                 — Multisig config account.
    /// 3. `[writable]`         — Vote record account, at the derived address
    ///                           for `(proposal, voter)`.
    /// 4. `[writable]`         — Proposal account.
    /// 5. `[]`                 — Proposal config account.
    /// 6. `[]`                 — On-vote hook (required when the proposal
    ///                           config names one).
    VoteV0 { choice: u16 },

    /// Withdraw the voter's committed vote, restoring the proposal tally.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Voter recorded on the vote record.
    /// 1. `[]`                 — Multisig config account.
    /// 2. `[writable]`         — Vote record account.
    /// 3. `[writable]`         — Proposal account.
    /// 4. `[]`                 — Proposal config account.
    /// 5. `[]`                 — On-vote hook (required when the proposal
    ///                           config names one).
    RelinquishVoteV0,
}
