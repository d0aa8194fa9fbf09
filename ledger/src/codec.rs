//! Size-limited instruction decoding.
//!
//! Instruction payloads are bincode-encoded with fixed-width integers.  The
//! decoder caps the bytes it will consume so a hostile payload cannot ask the
//! runtime to allocate unbounded memory while deserialising.

use {crate::error::LedgerError, bincode::Options, serde::de::DeserializeOwned};

/// Hard cap on instruction data, sized to a single transport packet.
pub const MAX_INSTRUCTION_DATA_SIZE: u64 = 1232;

/// Deserialize `instruction_data`, consuming at most `limit` bytes.
///
/// Trailing bytes are tolerated; malformed or oversized data fails
/// [`LedgerError::InvalidInstructionData`].
pub fn limited_deserialize<T>(instruction_data: &[u8], limit: u64) -> Result<T, LedgerError>
where
    T: DeserializeOwned,
{
    bincode::options()
        .with_limit(limit)
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .deserialize(instruction_data)
        .map_err(|_| LedgerError::InvalidInstructionData)
}
