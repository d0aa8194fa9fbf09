//! MGv1 End-to-End Test Suite
//!
//! Exercises full governance flows — proposal lifecycle, the organization
//! factory, multisig and NFT voting, proxy routing, and strategy-driven
//! resolution — against the real programs over a simulated ledger.
//!
//! Each test file can be run independently:
//!
//! ```bash
//! cargo test -p mgv1-e2e-tests --test proposal_lifecycle -- --nocapture
//! cargo test -p mgv1-e2e-tests --test organization_lifecycle -- --nocapture
//! cargo test -p mgv1-e2e-tests --test multisig_lifecycle -- --nocapture
//! cargo test -p mgv1-e2e-tests --test nft_voting_lifecycle -- --nocapture
//! cargo test -p mgv1-e2e-tests --test proxy_lifecycle -- --nocapture
//! cargo test -p mgv1-e2e-tests --test resolution_lifecycle -- --nocapture
//! ```
