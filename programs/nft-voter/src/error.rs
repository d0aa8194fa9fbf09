//! Custom errors for the MGv1 NFT Voter program.

use {
    num_derive::{FromPrimitive, ToPrimitive},
    thiserror::Error,
};

#[derive(Error, Debug, Clone, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum NftVoterError {
    #[error("Account is not owned by the nft-voter program")]
    InvalidAccountOwner = 0,

    #[error("A required signature is missing")]
    MissingRequiredSignature,

    #[error("Marker does not belong to this voter")]
    Unauthorized,

    #[error("A record already exists at the derived address")]
    AddressCollision,

    #[error("Account has not been initialised")]
    NotInitialized,

    #[error("Account data is invalid or corrupted")]
    InvalidAccountData,

    #[error("Supplied account does not match its expected derived address")]
    InvalidDerivedAddress,

    #[error("This mint already voted for this choice on this proposal")]
    AlreadyVoted,

    #[error("Voter has committed to the maximum number of choices")]
    MaxChoicesExceeded,

    #[error("No vote to relinquish for this choice")]
    NoVoteForThisChoice,

    #[error("Supplied guard is not the registry's guard")]
    GuardMismatch,

    #[error("The registry's guard is not an NFT guard")]
    GuardTypeMismatch,

    #[error("Name exceeds the maximum length")]
    NameTooLong,
}

// `LedgerError` has a blanket `From<T: ToPrimitive>` impl, so
// `NftVoterError` converts automatically via the `ToPrimitive` derive.
