//! Instruction definitions for the MGv1 Vote Proxy program.

use {
    crate::state::ConditionalController,
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
};

/// Instructions supported by the MGv1 Vote Proxy program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxyInstruction {
    /// Create a named proxy.  It needs at least one conditional or a
    /// fallback controller to ever route anything.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Payer funding the record.
    /// 1. `[writable]`         — Proxy account, at the derived address for
    ///                           `name`.
    InitializeProxyV0 {
        name: String,
        authority: Pubkey,
        conditionals: Vec<ConditionalController>,
        fallback_controller: Pubkey,
    },

    /// Route a vote to the first matching conditional's controller (or the
    /// fallback), with the proxy signing as the proposal's vote controller.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Payer.
    /// 1. `[signer]`           — Voter.
    /// 2. `[]`                 — Proxy account.
    /// 3. `[writable]`         — Proposal account.
    /// 4. `[]`                 — Proposal config account.
    /// 5... `[varies]`         — The selected controller's own account list,
    ///                           with the proxy's address standing in
    ///                           wherever that controller expects its vote
    ///                           controller.
    VoteV0 { choice: u16 },

    /// Route a relinquish the same way votes are routed.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Voter.
    /// 1. `[]`                 — Proxy account.
    /// 2. `[writable]`         — Proposal account.
    /// 3. `[]`                 — Proposal config account.
    /// 4... `[varies]`         — The selected controller's own account list.
    RelinquishVoteV0 { choice: u16 },
}
