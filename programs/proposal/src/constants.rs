//! Constants for the MGv1 Proposal program.

/// Seed tag for `ProposalConfigV0` addresses.
pub const PROPOSAL_CONFIG_SEED: &[u8] = b"proposal_config";

/// Seed tag for `ProposalV0` addresses.
pub const PROPOSAL_SEED: &[u8] = b"proposal";

/// Maximum length of a config or proposal name, in bytes.
pub const MAX_NAME_LEN: usize = 32;

/// Maximum length of a proposal, choice, or tag URI, in bytes.
pub const MAX_URI_LEN: usize = 200;

/// Maximum length of a choice name, in bytes.
pub const MAX_CHOICE_NAME_LEN: usize = 200;

/// Maximum length of a single proposal tag, in bytes.
pub const MAX_TAG_LEN: usize = 32;

/// Maximum length of a proposal seed, in bytes.
pub const MAX_SEED_LEN: usize = 32;
