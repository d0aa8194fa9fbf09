//! MGv1 Multisig Program
//!
//! A vote controller that aggregates a fixed member set into the proposal
//! ledger, one member one vote.
//!
//! The member list is immutable after creation — there is deliberately no
//! authority that could rewrite it, so a compromised key cannot vote itself
//! into a council.  Each member gets one `VoteRecordV0` per proposal; the
//! record's presence (a committed choice) is what blocks double voting, and
//! relinquishing clears the record and subtracts exactly the weight it
//! recorded.
//!
//! `use_reputation` reserves reputation-weighted voting in the immutable
//! config; the reputation source is external and voting with it enabled is
//! rejected until one is wired in.

pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;

pub use {
    error::MultisigError,
    instruction::MultisigInstruction,
    processor::{id, process_instruction},
    state::{MultisigConfigV0, VoteRecordV0},
};
