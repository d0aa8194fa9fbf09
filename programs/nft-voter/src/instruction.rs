//! Instruction definitions for the MGv1 NFT Voter program.

use {
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
};

/// Instructions supported by the MGv1 NFT Voter program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NftVoterInstruction {
    /// Create a named voting registry bound to an existing org-guard guard.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Payer funding the record.
    /// 1. `[writable]`         — Registry account, at the derived address
    ///                           for `name`.
    /// 2. `[]`                 — Guard the registry weights votes with.
    InitializeNftVoterV0 { name: String, authority: Pubkey },

    /// Cast one NFT's vote for a choice.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Payer funding the marker.
    /// 1. `[]`                 — Registry account.
    /// 2. `[signer]`           — Voter holding the NFT.
    /// 3. `[]`                 — NFT mint.
    /// 4. `[]`                 — Metadata account at the canonical derived
    ///                           address for the mint.
    /// 5. `[]`                 — Voter's token account holding the NFT.
    /// 6. `[writable]`         — Vote marker account, at the derived address
    ///                           for `(mint, proposal)`.
    /// 7. `[writable]`         — Proposal account.
    /// 8. `[]`                 — Proposal config account.
    /// 9. `[]`                 — The registry's guard.
    /// 10. `[signer]`          — Vote controller of the proposal config;
    ///                           this registry itself signs when it is the
    ///                           controller, a forwarding proxy otherwise.
    /// 11. `[]`                — On-vote hook (required when the proposal
    ///                           config names one).
    VoteV0 { choice: u16 },

    /// Withdraw one NFT's vote for a choice.  A marker left with no choices
    /// is closed and its deposit refunded.
    ///
    /// # Accounts expected
    ///
    /// 0. `[writable]`         — Refund destination for a closed marker.
    /// 1. `[]`                 — Registry account.
    /// 2. `[signer]`           — Voter recorded on the marker.
    /// 3. `[]`                 — NFT mint.
    /// 4. `[writable]`         — Vote marker account.
    /// 5. `[writable]`         — Proposal account.
    /// 6. `[]`                 — Proposal config account.
    /// 7. `[signer]`           — Vote controller of the proposal config
    ///                           (see `VoteV0`).
    /// 8. `[]`                 — On-vote hook (required when the proposal
    ///                           config names one).
    RelinquishVoteV0 { choice: u16 },
}
