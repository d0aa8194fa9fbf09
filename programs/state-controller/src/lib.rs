//! MGv1 State Controller Program
//!
//! A concrete state controller for the proposal ledger: proposal owners open
//! voting through it, and a declarative **resolution strategy** decides when
//! and how voting concludes.
//!
//! A strategy is a small reverse-polish program over [`ResolutionNode`]s —
//! time gates (`EndTimestamp`, `OffsetFromStartTs`), tally selectors
//! (`ChoiceVoteWeight`, `ChoicePercentage`, `Top`), and combinators
//! (`And`, `Or`, `NumResolved`).  "Resolve after 7 days with the top choice"
//! is `[OffsetFromStartTs(7d), Top(1), And]`.
//!
//! Resolution can be reached two ways:
//!
//! - `ResolveV0`, a permissionless crank anyone may call once the strategy
//!   is satisfied;
//! - eagerly on vote, when the proposal config names this program as its
//!   on-vote hook ([`EagerResolutionHook`]) — a threshold strategy then
//!   finalises the proposal the moment the deciding vote lands.

pub mod error;
pub mod instruction;
pub mod processor;
pub mod resolution;
pub mod state;

pub use {
    error::StateControllerError,
    instruction::StateControllerInstruction,
    processor::{id, process_instruction, EagerResolutionHook},
    resolution::{ResolutionNode, ResolutionStrategy},
    state::ResolutionSettingsV0,
};
