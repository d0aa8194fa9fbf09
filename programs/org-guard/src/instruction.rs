//! Instruction definitions for the MGv1 Org Guard program.

use {
    crate::state::GuardType,
    mgv1_organization_program::instruction::InitializeProposalArgsV0,
    serde::{Deserialize, Serialize},
};

/// Instructions supported by the MGv1 Org Guard program.
///
/// The four `InitializeProposal*` variants share the same base account list
/// and differ only in the proof accounts appended for their guard kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardInstruction {
    /// Create a named, immutable guard.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Payer funding the record.
    /// 1. `[writable]`         — Guard account, at the derived address for
    ///                           `name`.
    InitializeGuardV0 {
        name: String,
        guard_type: GuardType,
    },

    /// Create a proposal through a `Permissive` guard.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`           — Payer funding the records.
    /// 1. `[]`                 — Guard account.
    /// 2. `[]`                 — Owner recorded on the proposal.
    /// 3. `[writable]`         — Organization account.
    /// 4. `[writable]`         — Proposal account.
    /// 5. `[]`                 — Proposal config account.
    InitializeProposalPermissivelyV0 { args: InitializeProposalArgsV0 },

    /// Create a proposal through a `WalletList` guard.
    ///
    /// # Accounts expected
    ///
    /// 0-5. As for `InitializeProposalPermissivelyV0`.
    /// 6. `[signer]`           — Proposer, looked up in the wallet list.
    InitializeProposalByWalletV0 { args: InitializeProposalArgsV0 },

    /// Create a proposal through a `MintList` guard.
    ///
    /// # Accounts expected
    ///
    /// 0-5. As for `InitializeProposalPermissivelyV0`.
    /// 6. `[signer]`           — Proposer.
    /// 7. `[]`                 — Proposer's token account for a listed mint.
    InitializeProposalByTokenV0 { args: InitializeProposalArgsV0 },

    /// Create a proposal through a `CollectionMint` or `FirstCreatorAddress`
    /// guard.
    ///
    /// # Accounts expected
    ///
    /// 0-5. As for `InitializeProposalPermissivelyV0`.
    /// 6. `[signer]`           — Proposer.
    /// 7. `[]`                 — NFT mint.
    /// 8. `[]`                 — Metadata account at the canonical derived
    ///                           address for the mint.
    /// 9. `[]`                 — Proposer's token account holding the NFT.
    InitializeProposalByNftV0 { args: InitializeProposalArgsV0 },
}
