//! One decoded frame and the cursor over its payload.
//!
//! A [`Packet`] owns the payload bytes of a single frame together with a
//! current read offset. Every read interprets bytes at the offset and
//! advances past them; [`seek`](Packet::seek) repositions explicitly. The
//! cursor has no state beyond the offset and no stored error — each
//! operation returns its own [`Result`].
//!
//! All fixed-width fields are big-endian on the wire. Floating-point reads
//! reinterpret the raw bits as IEEE-754 without rounding.

use std::io::SeekFrom;

use bytes::Bytes;

use crate::{
    byte_order::{
        read_network_i16,
        read_network_i32,
        read_network_i64,
        read_network_u16,
        read_network_u32,
        read_network_u64,
    },
    error::DecodeError,
    varint,
};

/// A single frame decoded from a replay stream.
///
/// Carries the frame's timestamp and a cursor over its payload, positioned
/// at offset 0 when produced. A packet is scoped to processing one frame and
/// then discarded; it holds no reference to the reader that produced it.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use replayframe::Packet;
///
/// let mut packet = Packet::new(5, Bytes::from_static(&[0x03, 0x61, 0x62, 0x63]));
/// let (text, consumed) = packet.read_string()?;
/// assert_eq!(text, "abc");
/// assert_eq!(consumed, 4);
/// # Ok::<(), replayframe::DecodeError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Packet {
    timestamp: u32,
    payload: Bytes,
    pos: usize,
}

impl Packet {
    /// Wrap a payload buffer as a packet with its cursor at offset 0.
    #[must_use]
    pub fn new(timestamp: u32, payload: Bytes) -> Self {
        Self {
            timestamp,
            payload,
            pos: 0,
        }
    }

    /// Milliseconds elapsed since the beginning of the replay.
    ///
    /// The decoder trusts the file: no monotonicity is enforced.
    #[must_use]
    pub fn timestamp(&self) -> u32 { self.timestamp }

    /// Total payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.payload.len() }

    /// Returns true if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.payload.is_empty() }

    /// Current cursor offset.
    ///
    /// May exceed [`len`](Self::len) after an explicit seek past the end.
    #[must_use]
    pub fn position(&self) -> usize { self.pos }

    /// Bytes left between the cursor and the end of the payload.
    #[must_use]
    pub fn remaining(&self) -> usize { self.payload.len().saturating_sub(self.pos) }

    /// Reposition the cursor with standard seek semantics.
    ///
    /// `Start` is absolute, `Current` and `End` are relative. Seeking past
    /// the end is permitted; subsequent reads fail with
    /// [`DecodeError::UnexpectedEnd`]. Returns the new absolute offset.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidSeek`] when the target resolves to a
    /// negative or overflowing position.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64, DecodeError> {
        let target = match pos {
            SeekFrom::Start(offset) => offset,
            SeekFrom::Current(delta) => Self::offset_by(self.pos, delta)?,
            SeekFrom::End(delta) => Self::offset_by(self.payload.len(), delta)?,
        };
        self.pos = usize::try_from(target).map_err(|_| DecodeError::InvalidSeek)?;
        Ok(target)
    }

    fn offset_by(base: usize, delta: i64) -> Result<u64, DecodeError> {
        u64::try_from(base)
            .ok()
            .and_then(|base| base.checked_add_signed(delta))
            .ok_or(DecodeError::InvalidSeek)
    }

    /// Read one unsigned byte.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEnd`] if no bytes remain.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let [byte] = self.take_array::<1>()?;
        Ok(byte)
    }

    /// Read one signed byte, reinterpreting the unsigned bit pattern as
    /// two's-complement.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEnd`] if no bytes remain.
    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        let [byte] = self.take_array::<1>()?;
        Ok(i8::from_be_bytes([byte]))
    }

    /// Read a big-endian signed 16-bit integer.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEnd`] if fewer than 2 bytes remain.
    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        self.take_array().map(read_network_i16)
    }

    /// Read a big-endian unsigned 16-bit integer.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEnd`] if fewer than 2 bytes remain.
    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        self.take_array().map(read_network_u16)
    }

    /// Read a big-endian signed 32-bit integer.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEnd`] if fewer than 4 bytes remain.
    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        self.take_array().map(read_network_i32)
    }

    /// Read a big-endian signed 64-bit integer.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEnd`] if fewer than 8 bytes remain.
    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        self.take_array().map(read_network_i64)
    }

    /// Read 4 bytes and reinterpret them as an IEEE-754 single-precision
    /// float.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEnd`] if fewer than 4 bytes remain.
    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        self.take_array()
            .map(|bytes| f32::from_bits(read_network_u32(bytes)))
    }

    /// Read 8 bytes and reinterpret them as an IEEE-754 double-precision
    /// float.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEnd`] if fewer than 8 bytes remain.
    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        self.take_array()
            .map(|bytes| f64::from_bits(read_network_u64(bytes)))
    }

    /// Read one byte as a boolean: any non-zero value is `true`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEnd`] if no bytes remain.
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        self.read_u8().map(|byte| byte != 0)
    }

    /// Read a variable-length 32-bit integer.
    ///
    /// Returns the decoded value and the count of encoded bytes consumed so
    /// callers can track structural offsets. Groups beyond the declared
    /// 32-bit width are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::VarIntTooLong`] after 5 continuation-flagged
    /// bytes, or [`DecodeError::UnexpectedEnd`] if the payload ends
    /// mid-chain. Either way the bytes already examined stay consumed, so
    /// partial progress remains observable via [`position`](Self::position).
    pub fn read_var_i32(&mut self) -> Result<(i32, usize), DecodeError> {
        let (raw, consumed) = self.read_var(varint::MAX_VAR_INT_BYTES)?;
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_possible_wrap,
            reason = "The wire value is reinterpreted at its declared 32-bit width."
        )]
        let value = raw as u32 as i32;
        Ok((value, consumed))
    }

    /// Read a variable-length 64-bit integer.
    ///
    /// Returns the decoded value and the count of encoded bytes consumed.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::VarIntTooLong`] after 10 continuation-flagged
    /// bytes, or [`DecodeError::UnexpectedEnd`] if the payload ends
    /// mid-chain.
    pub fn read_var_i64(&mut self) -> Result<(i64, usize), DecodeError> {
        let (raw, consumed) = self.read_var(varint::MAX_VAR_LONG_BYTES)?;
        #[expect(
            clippy::cast_possible_wrap,
            reason = "The wire value is reinterpreted as two's-complement."
        )]
        let value = raw as i64;
        Ok((value, consumed))
    }

    /// Read exactly `n` bytes.
    ///
    /// The returned buffer is a cheap view into the packet's payload, not a
    /// copy.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnexpectedEnd`] if fewer than `n` bytes
    /// remain; a short read never yields a partial buffer.
    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes, DecodeError> {
        if n == 0 {
            return Ok(Bytes::new());
        }
        let remaining = self.remaining();
        if remaining < n {
            return Err(DecodeError::UnexpectedEnd {
                offset: self.pos,
                requested: n,
                remaining,
            });
        }
        let start = self.pos;
        self.pos += n;
        Ok(self.payload.slice(start..self.pos))
    }

    /// Read a length-prefixed string: a varint byte count followed by that
    /// many bytes of text.
    ///
    /// The bytes are reinterpreted as UTF-8 with invalid sequences replaced;
    /// no validation failure exists for text content. Returns the decoded
    /// text together with the total bytes consumed (prefix plus payload) so
    /// callers need not re-derive the prefix width.
    ///
    /// # Errors
    ///
    /// Surfaces the first failure from the prefix or body read:
    /// [`DecodeError::VarIntTooLong`] for a malformed prefix, or
    /// [`DecodeError::UnexpectedEnd`] when the declared byte count exceeds
    /// the remaining payload.
    pub fn read_string(&mut self) -> Result<(String, usize), DecodeError> {
        let (raw, prefix_len) = self.read_var(varint::MAX_VAR_INT_BYTES)?;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "The prefix is a 32-bit length and always fits usize on supported targets."
        )]
        let len = raw as u32 as usize;
        let bytes = self.read_bytes(len)?;
        Ok((String::from_utf8_lossy(&bytes).into_owned(), prefix_len + len))
    }

    /// Shared variable-length decode: delegates to the bounded loop and
    /// advances the cursor by whatever it consumed, success or not.
    fn read_var(&mut self, limit: usize) -> Result<(u64, usize), DecodeError> {
        let input = self.payload.get(self.pos..).unwrap_or(&[]);
        match varint::decode(input, limit) {
            Ok((value, consumed)) => {
                self.pos += consumed;
                Ok((value, consumed))
            }
            Err(varint::VarIntError::TooLong) => {
                self.pos += limit;
                Err(DecodeError::VarIntTooLong { limit })
            }
            Err(varint::VarIntError::Truncated { consumed }) => {
                self.pos += consumed;
                Err(DecodeError::UnexpectedEnd {
                    offset: self.pos,
                    requested: 1,
                    remaining: 0,
                })
            }
        }
    }

    /// Consume exactly `N` bytes as a fixed-width array. Fails without
    /// advancing when fewer remain.
    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let remaining = self.remaining();
        if remaining < N {
            return Err(DecodeError::UnexpectedEnd {
                offset: self.pos,
                requested: N,
                remaining,
            });
        }
        let mut array = [0u8; N];
        let start = self.pos;
        self.pos += N;
        array.copy_from_slice(&self.payload[start..self.pos]);
        Ok(array)
    }
}
