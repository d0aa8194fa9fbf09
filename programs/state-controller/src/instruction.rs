//! Instruction definitions for the MGv1 State Controller program.

use {
    crate::resolution::ResolutionStrategy,
    mgv1_proposal_program::ProposalState,
    serde::{Deserialize, Serialize},
};

/// Instructions supported by the MGv1 State Controller program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateControllerInstruction {
    /// Create named resolution settings.  The strategy is validated here so
    /// evaluation can never hit a malformed program later.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Payer funding the record.
    /// 1. `[writable]`         — Settings account, at the derived address
    ///                           for `name`.
    InitializeResolutionSettingsV0 {
        name: String,
        settings: ResolutionStrategy,
    },

    /// Manually transition a proposal, signed by its owner and forwarded
    /// through the settings record.  Opening `Voting` stamps the current
    /// wall-clock time as `start_ts`.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Proposal owner.
    /// 1. `[]`                 — Settings account (the config's state
    ///                           controller).
    /// 2. `[writable]`         — Proposal account.
    /// 3. `[]`                 — Proposal config account.
    UpdateStateV0 { new_state: ProposalState },

    /// Permissionless crank: resolve the proposal if its strategy is
    /// satisfied, failing `NotResolvable` otherwise.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Anyone.
    /// 1. `[]`                 — Settings account.
    /// 2. `[writable]`         — Proposal account.
    /// 3. `[]`                 — Proposal config account.
    ResolveV0,
}
