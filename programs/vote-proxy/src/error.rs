//! Custom errors for the MGv1 Vote Proxy program.

use {
    num_derive::{FromPrimitive, ToPrimitive},
    thiserror::Error,
};

#[derive(Error, Debug, Clone, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum ProxyError {
    #[error("Account is not owned by the vote proxy program")]
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

    #[error("No conditional matched and no fallback controller is configured")]
    NoMatchingConditional,

    #[error("The selected controller has no implementation supplied")]
    InvalidController,

    #[error("This conditional operand has not been implemented")]
    FeatureNotImplemented,

    #[error("A proxy needs at least one conditional or a fallback controller")]
    InvalidProxyConfig,

    #[error("Name exceeds the maximum length")]
    NameTooLong,
}

// `LedgerError` has a blanket `From<T: ToPrimitive>` impl, so `ProxyError`
// converts automatically via the `ToPrimitive` derive.
