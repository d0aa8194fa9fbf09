//! MGv1 NFT Voter Program
//!
//! A vote controller where voting power comes from holding NFTs of a guarded
//! collection.  One `VoteMarkerV0` exists per (voter, proposal, mint): the
//! same NFT can never be counted twice on one proposal, and a voter with
//! several NFTs gets one marker's worth of weight per NFT.
//!
//! The weighting policy is not baked in — the registry (`NftVoterV0`) points
//! at an org-guard `CollectionMint` (or `FirstCreatorAddress`) guard, and
//! every cast evaluates that guard against the supplied mint, metadata, and
//! token account.  The weight the guard granted at first cast is recorded on
//! the marker and is the single source of truth for every later cast and
//! relinquish on that marker, so the proposal tally always unwinds by
//! exactly what it grew by.
//!
//! A marker whose last choice is relinquished is closed and its storage
//! deposit refunded.

pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;

pub use {
    error::NftVoterError,
    instruction::NftVoterInstruction,
    processor::{id, process_instruction},
    state::{NftVoterV0, VoteMarkerV0},
};
