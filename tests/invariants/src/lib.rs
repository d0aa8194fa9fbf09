//! MGv1 Property-Based Invariant Tests
//!
//! Uses proptest to verify the cross-component consistency properties:
//! - conservation between vote markers and proposal tallies
//! - double-vote rejection leaving tallies untouched
//! - cast/relinquish round trips
//! - resolution-strategy evaluation safety

pub mod vote_invariants;
