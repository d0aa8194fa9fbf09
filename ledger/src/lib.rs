//! MGv1 Ledger Runtime
//!
//! The execution substrate the MGv1 governance programs run against: a keyed
//! account store with atomic, all-or-nothing call execution.
//!
//! The host ledger this models guarantees:
//!
//! - **Atomicity** — every entrypoint call either commits all of its account
//!   writes or none of them.  [`Ledger::execute`] stages writes in an overlay
//!   and applies them only when the call returns `Ok`.
//! - **Explicit accounts** — a call operates only on the account list its
//!   caller supplied, each entry carrying signer/writable flags
//!   ([`AccountMeta`]).  There is no ambient account access.
//! - **Deterministic addressing** — every record lives at an address derived
//!   from a fixed string tag plus its identifying fields
//!   ([`derive_address`]), so lookups never depend on call history.
//! - **Capability-based signing** — "did X sign" is a property of the
//!   supplied account list, established by the host before the call.  Nested
//!   program invocations may additionally sign for addresses derived from
//!   their own records ([`CallContext::invoke_signed`]), the analog of
//!   invoking with signer seeds.
//!
//! Wallets, transaction construction, and account funding are host concerns
//! and live outside this crate.

pub mod address;
pub mod codec;
pub mod context;
pub mod error;
pub mod store;

pub use {
    address::derive_address,
    codec::{limited_deserialize, MAX_INSTRUCTION_DATA_SIZE},
    context::{AccountMeta, CallContext},
    error::LedgerError,
    store::{Account, Ledger},
};
