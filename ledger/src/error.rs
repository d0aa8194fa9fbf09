//! Runtime-level errors shared by every MGv1 program.

use {num_traits::ToPrimitive, thiserror::Error};

/// Errors raised by the ledger runtime itself, plus the `Custom` bridge for
/// program-defined error codes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The instruction referenced an account index past the end of the
    /// supplied account list.
    #[error("Insufficient account keys for instruction")]
    NotEnoughAccountKeys,

    /// An account required to sign did not.
    #[error("Missing required signature for instruction")]
    MissingRequiredSignature,

    /// A nested invocation flagged an account as signer without the parent
    /// call holding that signature or a matching derived-address capability.
    #[error("Cross-program invocation with unauthorized signer")]
    PrivilegeEscalation,

    /// A write was attempted against an account the call did not list as
    /// writable.
    #[error("Instruction attempted to modify an account it does not hold writable")]
    AccountNotWritable,

    /// Instruction data failed to decode (malformed or over the size limit).
    #[error("Invalid instruction data")]
    InvalidInstructionData,

    /// Lamport arithmetic overflowed while moving a storage deposit.
    #[error("Arithmetic overflow in lamport bookkeeping")]
    ArithmeticOverflow,

    /// A program-defined error code.
    #[error("Custom program error: {0:#x}")]
    Custom(u32),
}

/// Program error enums derive `num_derive::ToPrimitive` and convert into
/// `LedgerError::Custom` automatically, so handlers can `?` their own error
/// types the way built-in programs convert into `InstructionError`.
impl<T> From<T> for LedgerError
where
    T: ToPrimitive,
{
    fn from(error: T) -> Self {
        LedgerError::Custom(error.to_u32().unwrap_or(u32::MAX))
    }
}
