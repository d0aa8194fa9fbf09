//! Custom errors for the MGv1 Organization program.

use {
    num_derive::{FromPrimitive, ToPrimitive},
    thiserror::Error,
};

#[derive(Error, Debug, Clone, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum OrganizationError {
    #[error("Account is not owned by the organization program")]
    InvalidAccountOwner = 0,

    #[error("A required signature is missing")]
    MissingRequiredSignature,

    #[error("Signer does not match the organization authority")]
    Unauthorized,

    #[error("A record already exists at the derived address")]
    AddressCollision,

    #[error("Account has not been initialised")]
    NotInitialized,

    #[error("Account data is invalid or corrupted")]
    InvalidAccountData,

    #[error("Supplied account does not match its expected derived address")]
    InvalidDerivedAddress,

    #[error("Supplied guard is not the organization's guard")]
    GuardMismatch,

    #[error("Organization's configured proposal program is not available")]
    ProposalProgramMismatch,

    #[error("Proposal counter overflow")]
    ArithmeticError,

    #[error("Name exceeds the maximum length")]
    NameTooLong,

    #[error("Uri exceeds the maximum length")]
    UriTooLong,
}

// `LedgerError` has a blanket `From<T: ToPrimitive>` impl, so
// `OrganizationError` converts automatically via the `ToPrimitive` derive.
