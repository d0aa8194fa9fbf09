//! MGv1 Organization Program
//!
//! Binds a guard, a default proposal config, and a monotonic proposal
//! counter under one named organization, so many proposals can be created
//! consistently.
//!
//! The organization account is the **namespace** for every proposal created
//! through it: each child proposal's seed is the little-endian encoding of
//! `num_proposals` at creation time, which guarantees collision-free
//! addresses and a stable enumeration order.  The counter only ever advances
//! together with a successful proposal creation — a failed guard evaluation
//! leaves it untouched.
//!
//! Who may create proposals is not decided here: creation requires the
//! organization's guard to sign, and the guard program only signs after its
//! policy (wallet list, token holding, NFT collection, permissive) has been
//! satisfied.

pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;

pub use {
    error::OrganizationError,
    instruction::OrganizationInstruction,
    processor::{id, process_instruction},
    state::OrganizationV0,
};
