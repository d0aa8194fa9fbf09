//! Custom errors for the MGv1 Org Guard program.

use {
    num_derive::{FromPrimitive, ToPrimitive},
    thiserror::Error,
};

#[derive(Error, Debug, Clone, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum GuardError {
    #[error("Account is not owned by the expected program")]
    InvalidAccountOwner = 0,

    #[error("A required signature is missing")]
    MissingRequiredSignature,

    #[error("A record already exists at the derived address")]
    AddressCollision,

    #[error("Account has not been initialised")]
    NotInitialized,

    #[error("Account data is invalid or corrupted")]
    InvalidAccountData,

    #[error("Supplied account does not match its expected derived address")]
    InvalidDerivedAddress,

    #[error("The guard is not of the kind this operation requires")]
    GuardTypeMismatch,

    #[error("Wallet is not in the guard's allow list")]
    NotInList,

    #[error("Mint does not meet guard requirements")]
    MintNotValid,

    #[error("The asset does not carry enough weight to meet guard requirements")]
    InsufficientWeight,

    #[error("The collection is either not verified or the mint does not match")]
    CollectionVerificationFailed,

    #[error("The first verified creator address does not meet guard requirements")]
    FirstCreatorVerificationFailed,

    #[error("Token account is not owned by the expected wallet")]
    InvalidTokenOwner,

    #[error("Supplied guard is not the organization's guard")]
    OrganizationGuardMismatch,

    #[error("Guard configuration is invalid")]
    InvalidGuardConfig,

    #[error("Name exceeds the maximum length")]
    NameTooLong,
}

// `LedgerError` has a blanket `From<T: ToPrimitive>` impl, so `GuardError`
// converts automatically via the `ToPrimitive` derive.
