//! Custom errors for the MGv1 Multisig program.

use {
    num_derive::{FromPrimitive, ToPrimitive},
    thiserror::Error,
};

#[derive(Error, Debug, Clone, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum MultisigError {
    #[error("Account is not owned by the multisig program")]
    InvalidAccountOwner = 0,

    #[error("A required signature is missing")]
    MissingRequiredSignature,

    #[error("Voter is not a member of this multisig")]
    NotAMember,

    #[error("Already voted for this proposal")]
    AlreadyVoted,

    #[error("No vote to relinquish for this choice")]
    NoVoteForThisChoice,

    #[error("A record already exists at the derived address")]
    AddressCollision,

    #[error("Account has not been initialised")]
    NotInitialized,

    #[error("Account data is invalid or corrupted")]
    InvalidAccountData,

    #[error("Supplied account does not match its expected derived address")]
    InvalidDerivedAddress,

    #[error("Vote record does not belong to this voter")]
    Unauthorized,

    #[error("Reputation-weighted voting has no reputation source wired in")]
    ReputationNotSupported,

    #[error("A multisig requires at least one member")]
    NoMembers,

    #[error("Name exceeds the maximum length")]
    NameTooLong,
}

// `LedgerError` has a blanket `From<T: ToPrimitive>` impl, so
// `MultisigError` converts automatically via the `ToPrimitive` derive.
