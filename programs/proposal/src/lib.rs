//! MGv1 Proposal Program
//!
//! The canonical proposal state machine and weighted-vote ledger.  Everything
//! else in MGv1 — guards, the organization factory, the NFT/multisig/proxy
//! vote controllers, the resolution engine — composes around this program.
//!
//! ## Records
//!
//! - `ProposalConfigV0` binds a proposal family to three principals: the
//!   **vote controller** (the only signer whose `VoteV0` calls are accepted),
//!   the **state controller** (the only signer that may transition proposal
//!   state), and an optional **on-vote hook** invoked synchronously after
//!   every successful vote mutation.
//! - `ProposalV0` holds the choices and their accumulated weights.  Its
//!   address is derived from `(namespace, seed)`, so one namespace can mint
//!   any number of non-colliding proposals.
//!
//! ## Lifecycle
//!
//! ```text
//! Draft ──► Voting{start_ts} ──► Resolved{winning_choices, end_ts}
//!   │            │
//!   └────────────┴──► Cancelled          (Resolved and Cancelled are sinks)
//! ```
//!
//! `Custom{name, bin}` is reachable from any non-terminal state and lets a
//! state controller express richer lifecycles (vetoed, signing-off, ranking)
//! without this program having to understand them.  Votes are accepted only
//! in `Voting`.
//!
//! ## Vote accounting
//!
//! `VoteV0 { choice, weight, remove_vote }` adds or subtracts `weight` on one
//! choice under checked arithmetic.  `Choice.weight` is mutated through this
//! single entrypoint and nowhere else; callers (vote controllers) are
//! responsible for tracking per-voter markers so that every unit of weight
//! added is eventually subtracted exactly once.

pub mod constants;
pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;

pub use {
    error::ProposalError,
    instruction::{ChoiceArg, ProposalInstruction},
    processor::{id, process_instruction, OnVoteHook},
    state::{Choice, ProposalConfigV0, ProposalState, ProposalV0},
};
