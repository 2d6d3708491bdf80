//! Bounded decoding of LEB128-style variable-length integers.
//!
//! Each encoded byte carries seven data bits in its low half and a
//! continuation flag in its high bit, least-significant group first. The
//! decoder is a bounded loop over (accumulator, shift, byte index) whose only
//! exits are a clear continuation bit and the byte-count guard, so hostile
//! input cannot drive it unbounded.

/// Maximum encoded bytes for a 32-bit variable-length integer.
pub(crate) const MAX_VAR_INT_BYTES: usize = 5;

/// Maximum encoded bytes for a 64-bit variable-length integer.
pub(crate) const MAX_VAR_LONG_BYTES: usize = 10;

/// Why a variable-length integer could not be decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum VarIntError {
    /// `limit` bytes were consumed and every one carried the continuation
    /// flag.
    TooLong,
    /// The input ran out before a terminating byte appeared; `consumed`
    /// flagged bytes were read first.
    Truncated {
        /// Continuation bytes consumed before the input ended.
        consumed: usize,
    },
}

/// Decode one variable-length integer from the front of `input`.
///
/// Returns the accumulated group value (up to 64 bits; callers reinterpret
/// at their declared width) and the count of encoded bytes consumed. The
/// guard fires after `limit` continuation-flagged bytes, before any further
/// input is touched.
pub(crate) fn decode(input: &[u8], limit: usize) -> Result<(u64, usize), VarIntError> {
    let mut result = 0u64;
    for (index, &byte) in input.iter().enumerate() {
        if index >= limit {
            return Err(VarIntError::TooLong);
        }
        result |= u64::from(byte & 0x7F) << (7 * index);
        if byte & 0x80 == 0 {
            return Ok((result, index + 1));
        }
    }
    if input.len() >= limit {
        Err(VarIntError::TooLong)
    } else {
        Err(VarIntError::Truncated {
            consumed: input.len(),
        })
    }
}
