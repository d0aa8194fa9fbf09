//! MGv1 Org Guard Program
//!
//! Pluggable policies that decide **who** may act and with **how much
//! weight**, from proof accounts the caller supplies.
//!
//! A guard is an immutable policy snapshot (`GuardV0`).  Evaluating one is a
//! pure function of the guard's entries and the supplied proof accounts —
//! never of call history — so the same proof always yields the same weight:
//!
//! | Kind                  | Proof                      | Weight                     |
//! |-----------------------|----------------------------|----------------------------|
//! | `Permissive`          | none                       | 1                          |
//! | `WalletList`          | caller address             | configured multiplier      |
//! | `MintList`            | token account              | `amount / divisor`         |
//! | `CollectionMint`      | mint + metadata + token    | configured multiplier      |
//! | `FirstCreatorAddress` | mint + metadata + token    | configured multiplier      |
//!
//! Every proof account is validated independently: token accounts must be
//! owned by the caller, metadata must sit at its canonical derived address,
//! and NFT collections must be *verified* in the metadata.  Any failure
//! aborts the surrounding operation atomically.
//!
//! Besides evaluation, this program hosts the guard-gated proposal
//! factories: `InitializeProposalBy{Nft,Token,Wallet}V0` and
//! `InitializeProposalPermissivelyV0` evaluate the organization's guard and,
//! on success, sign as that guard into the organization program's proposal
//! creation.

pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;
pub mod token;
pub mod weight;

pub use {
    error::GuardError,
    instruction::GuardInstruction,
    processor::{id, process_instruction},
    state::{DivisorConfig, GuardType, GuardV0, MultiplierConfig},
    weight::{evaluate, GuardProof},
};
