//! Custom errors for the MGv1 Proposal program.

use {
    num_derive::{FromPrimitive, ToPrimitive},
    thiserror::Error,
};

#[derive(Error, Debug, Clone, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum ProposalError {
    #[error("Account is not owned by the proposal program")]
    InvalidAccountOwner = 0,

    #[error("A required signature is missing")]
    MissingRequiredSignature,

    #[error("Signer does not match the controller recorded in the proposal config")]
    Unauthorized,

    #[error("A record already exists at the derived address")]
    AddressCollision,

    #[error("Account has not been initialised")]
    NotInitialized,

    #[error("Account data is invalid or corrupted")]
    InvalidAccountData,

    #[error("Supplied account does not match its expected derived address")]
    InvalidDerivedAddress,

    #[error("Arithmetic overflow or underflow in vote weight accounting")]
    ArithmeticError,

    #[error("Proposal is in a terminal state and can no longer change")]
    ProposalFinalized,

    #[error("Proposal is not open for voting")]
    NotVoting,

    #[error("Choice index is out of range for this proposal")]
    IndexOutOfRange,

    #[error("Proposal is not bound to the supplied proposal config")]
    InvalidProposalConfig,

    #[error("On-vote hook is missing or does not match the configured hook address")]
    InvalidOnVoteHook,

    #[error("Name exceeds the maximum length")]
    NameTooLong,

    #[error("Uri exceeds the maximum length")]
    UriTooLong,

    #[error("Tag exceeds the maximum length")]
    TagTooLong,

    #[error("Seed exceeds the maximum length")]
    SeedTooLong,
}

// `LedgerError` has a blanket `From<T: ToPrimitive>` impl, so `ProposalError`
// converts automatically via the `ToPrimitive` derive.
