//! Error types for replay decoding.
//!
//! This module provides a structured error taxonomy that distinguishes
//! framing errors (frame boundary issues while walking the container) from
//! packet-body errors (typed reads out of one frame's payload).
//!
//! # Error Categories
//!
//! - [`FrameError`]: failures while carving frames out of the byte stream — truncation mid-header
//!   or mid-payload, and any other stream I/O failure.
//! - [`DecodeError`]: failures while interpreting one payload — reads past the end of the buffer,
//!   over-long variable-length integers, and invalid seeks.
//!
//! Clean termination of the stream is not an error in either taxonomy; it is
//! the `Ok(None)` arm of
//! [`ReplayReader::next_frame`](crate::reader::ReplayReader::next_frame).

use std::io;

use thiserror::Error;

/// Framing-level errors occurring while a frame is carved from the stream.
///
/// Any of these is terminal for the stream: the reader makes no attempt to
/// resynchronise on framing corruption. The variants are `Clone` so the most
/// recent outcome can be both returned to the caller and retained by the
/// reader for [`last_error`](crate::reader::ReplayReader::last_error).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// End of stream in the middle of the 8-byte frame header.
    ///
    /// The stream ended after at least one header byte but before both the
    /// timestamp and length fields were complete. Zero bytes at a frame
    /// boundary is a clean end, not this error.
    #[error("premature EOF during frame header: {bytes_received} of {header_size} header bytes")]
    TruncatedHeader {
        /// Header bytes received before the stream ended.
        bytes_received: usize,
        /// Size of a complete frame header.
        header_size: usize,
    },

    /// Declared payload length exceeds the bytes the stream can provide.
    ///
    /// No partial frame is ever produced; the bytes read so far are
    /// discarded.
    #[error("premature EOF: {bytes_received} bytes of {expected} byte payload received")]
    TruncatedPayload {
        /// Payload bytes received before the stream ended.
        bytes_received: usize,
        /// Payload size declared by the frame's length field.
        expected: usize,
    },

    /// Any other failure reported by the underlying stream.
    ///
    /// The original error is flattened to its [`io::ErrorKind`] and rendered
    /// message so the taxonomy stays `Clone`.
    #[error("I/O error: {message}")]
    Io {
        /// Kind reported by the underlying stream error.
        kind: io::ErrorKind,
        /// Rendered message of the underlying stream error.
        message: String,
    },
}

impl FrameError {
    /// Flatten a stream error into the `Io` variant.
    pub(crate) fn from_io(error: &io::Error) -> Self {
        Self::Io {
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    /// Returns true if the stream ended before a complete frame was read.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            Self::TruncatedHeader { .. } | Self::TruncatedPayload { .. }
        )
    }
}

/// Packet-body errors occurring while typed values are read from one
/// payload.
///
/// The packet cursor keeps no stored error; every read returns its own
/// `Result` and composite reads surface the first failure encountered.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A read requested more bytes than the payload has left.
    #[error(
        "read past end of payload: {requested} bytes requested at offset {offset}, {remaining} \
         remaining"
    )]
    UnexpectedEnd {
        /// Cursor offset at which the read was attempted.
        offset: usize,
        /// Bytes the read required.
        requested: usize,
        /// Bytes left in the payload at that offset.
        remaining: usize,
    },

    /// A variable-length integer's continuation chain exceeded its byte
    /// limit.
    ///
    /// Reserved for that condition alone; truncated variable-length integers
    /// surface as [`UnexpectedEnd`](Self::UnexpectedEnd) instead.
    #[error("variable-length integer exceeds {limit} bytes")]
    VarIntTooLong {
        /// Maximum encoded bytes permitted (5 for varint, 10 for varlong).
        limit: usize,
    },

    /// A seek resolved to a negative or overflowing position.
    ///
    /// Seeking past the end of the payload is allowed; later reads fail
    /// with [`UnexpectedEnd`](Self::UnexpectedEnd) instead.
    #[error("invalid seek to a negative or overflowing position")]
    InvalidSeek,
}
