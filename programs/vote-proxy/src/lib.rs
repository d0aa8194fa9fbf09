//! MGv1 Vote Proxy Program
//!
//! One account that acts as a vote controller but routes each call to one of
//! several downstream controllers based on the proposal's state.
//!
//! A proxy carries an ordered list of conditionals — "state equals Voting →
//! the NFT voter", "state greater than Voting → the council multisig" — and
//! a fallback controller.  Evaluation is first-match-wins; the fallback
//! catches everything else.  The proxy itself is the signing vote controller
//! towards the proposal ledger, while eligibility and weight stay with
//! whichever downstream controller was selected.
//!
//! Downstream controllers are injected as [`ProxyTarget`] capabilities at
//! call time; [`NftVoterTarget`] ships here.

pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;

pub use {
    error::ProxyError,
    instruction::ProxyInstruction,
    processor::{id, process_instruction, NftVoterTarget, ProxyTarget},
    state::{ComparisonOperator, Condition, ConditionalController, Operand, ProxyV0},
};
