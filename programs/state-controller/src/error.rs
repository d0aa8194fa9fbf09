//! Custom errors for the MGv1 State Controller program.

use {
    num_derive::{FromPrimitive, ToPrimitive},
    thiserror::Error,
};

#[derive(Error, Debug, Clone, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum StateControllerError {
    #[error("Account is not owned by the state controller program")]
    InvalidAccountOwner = 0,

    #[error("A required signature is missing")]
    MissingRequiredSignature,

    #[error("Signer does not match the proposal owner")]
    Unauthorized,

    #[error("A record already exists at the derived address")]
    AddressCollision,

    #[error("Account has not been initialised")]
    NotInitialized,

    #[error("Account data is invalid or corrupted")]
    InvalidAccountData,

    #[error("Supplied account does not match its expected derived address")]
    InvalidDerivedAddress,

    #[error("Resolution strategy is malformed")]
    MalformedStrategy,

    #[error("Percentage must be between 1 and the percentage divisor")]
    InvalidPercentage,

    #[error("Arithmetic overflow while evaluating the resolution strategy")]
    ArithmeticError,

    #[error("Resolution strategy is not satisfied yet")]
    NotResolvable,

    #[error("Name exceeds the maximum length")]
    NameTooLong,
}

// `LedgerError` has a blanket `From<T: ToPrimitive>` impl, so
// `StateControllerError` converts automatically via the `ToPrimitive`
// derive.
