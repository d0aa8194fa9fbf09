//! Deterministic record addressing.
//!
//! Every MGv1 record lives at an address computed from the owning program's
//! id plus a list of seed byte slices (a fixed string tag followed by the
//! record's identifying fields).  The derivation is a pure sha256 over the
//! concatenated inputs, so any party holding the same identifying fields
//! computes the same address — the store needs no secondary indexes.

use {solana_pubkey::Pubkey, solana_sha256_hasher::hashv};

/// Derive the storage address for a record of `program_id` identified by
/// `seeds`.
///
/// The program id participates in the hash, so two programs using the same
/// tag and fields still land on distinct addresses.
pub fn derive_address(program_id: &Pubkey, seeds: &[&[u8]]) -> Pubkey {
    let mut inputs: Vec<&[u8]> = Vec::with_capacity(seeds.len().saturating_add(1));
    inputs.push(program_id.as_ref());
    inputs.extend_from_slice(seeds);
    Pubkey::new_from_array(hashv(&inputs).to_bytes())
}
