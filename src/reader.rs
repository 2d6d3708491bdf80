//! Frame extraction from a replay byte stream.
//!
//! A replay is a sequence of frames, each laid out as
//! `[timestamp: u32 BE][length: u32 BE][payload: length bytes]`, repeated
//! until end of stream with no file header, footer, or frame count. The
//! reader walks that container over any blocking [`Read`] source and
//! produces one [`Packet`] per call.
//!
//! The single most important contract here is the three-way outcome of
//! [`ReplayReader::next_frame`]: a stream that ends exactly at a frame
//! boundary is a clean end (`Ok(None)`), while a stream that breaks
//! mid-frame is an error (`Err`). Callers can always tell a well-formed end
//! of recording from truncation or corruption.

use std::io::{self, Read};

use bytes::Bytes;

use crate::{byte_order::read_network_u32, error::FrameError, packet::Packet};

/// Size of one frame header: a 4-byte timestamp plus a 4-byte length.
pub const HEADER_SIZE: usize = 8;

const FIELD_SIZE: usize = 4;

/// Sequential decoder over a replay byte stream.
///
/// Owns the stream handle and the most recent framing error. Frames are
/// produced strictly one at a time; the reader retains no payload bytes
/// between calls. Reads block the calling thread, and a reader must not be
/// shared across threads without external synchronisation.
///
/// Any error is terminal for the stream: there is no retry and no
/// resynchronisation after framing corruption.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
///
/// use replayframe::ReplayReader;
///
/// // One frame: timestamp 5, length 3, payload "abc".
/// let bytes: [u8; 11] = [0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x03, 0x61, 0x62, 0x63];
/// let mut reader = ReplayReader::new(Cursor::new(bytes));
///
/// let packet = reader.next_frame()?.expect("one frame");
/// assert_eq!(packet.timestamp(), 5);
/// assert_eq!(packet.len(), 3);
/// assert!(reader.next_frame()?.is_none());
/// # Ok::<(), replayframe::FrameError>(())
/// ```
#[derive(Debug)]
pub struct ReplayReader<R> {
    stream: R,
    last_error: Option<FrameError>,
}

impl<R> ReplayReader<R> {
    /// Wrap a byte stream positioned at the start of a frame.
    #[must_use]
    pub fn new(stream: R) -> Self {
        Self {
            stream,
            last_error: None,
        }
    }

    /// The framing error from the most recent [`next_frame`] call, if that
    /// call failed.
    ///
    /// Reflects exactly the latest outcome: cleared again once a later call
    /// succeeds or reaches the clean end. The same error is also returned
    /// by `next_frame` itself, so polling this accessor is never required.
    ///
    /// [`next_frame`]: Self::next_frame
    #[must_use]
    pub fn last_error(&self) -> Option<&FrameError> { self.last_error.as_ref() }

    /// Consume the reader, returning the underlying stream.
    #[must_use]
    pub fn into_inner(self) -> R { self.stream }
}

impl<R: Read> ReplayReader<R> {
    /// Decode the next frame from the stream.
    ///
    /// Returns `Ok(Some(packet))` for a complete frame with its cursor at
    /// offset 0, or `Ok(None)` when the stream ends with zero bytes at a
    /// frame boundary.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::TruncatedHeader`] when the stream ends inside
    /// the 8-byte header, [`FrameError::TruncatedPayload`] when fewer than
    /// the declared `length` bytes are available, and [`FrameError::Io`]
    /// for any other stream failure. No partial frame is ever produced.
    pub fn next_frame(&mut self) -> Result<Option<Packet>, FrameError> {
        match self.read_frame() {
            Ok(frame) => {
                self.last_error = None;
                Ok(frame)
            }
            Err(error) => {
                log::warn!("replay stream ended mid-frame: {error}");
                #[cfg(feature = "metrics")]
                crate::metrics::inc_frame_errors();
                self.last_error = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Iterate over the remaining frames.
    ///
    /// Yields `Ok(packet)` per frame, then one `Err` if the stream breaks
    /// mid-frame, and nothing further after either terminal outcome. The
    /// clean end yields no item at all.
    pub fn frames(&mut self) -> Frames<'_, R> {
        Frames {
            reader: self,
            done: false,
        }
    }

    fn read_frame(&mut self) -> Result<Option<Packet>, FrameError> {
        let mut field = [0u8; FIELD_SIZE];

        // Timestamp field: zero bytes here is the clean end of the
        // recording, a partial field is truncation.
        let got = self.fill(&mut field)?;
        if got == 0 {
            tracing::trace!("clean end of replay stream");
            return Ok(None);
        }
        if got < FIELD_SIZE {
            return Err(FrameError::TruncatedHeader {
                bytes_received: got,
                header_size: HEADER_SIZE,
            });
        }
        let timestamp = read_network_u32(field);

        // Length field: any shortfall from here on is an error, including
        // a stream that ends exactly between the two header fields.
        let got = self.fill(&mut field)?;
        if got < FIELD_SIZE {
            return Err(FrameError::TruncatedHeader {
                bytes_received: FIELD_SIZE + got,
                header_size: HEADER_SIZE,
            });
        }
        let length = read_network_u32(field) as usize;

        let mut payload = vec![0u8; length];
        let got = self.fill(&mut payload)?;
        if got < length {
            return Err(FrameError::TruncatedPayload {
                bytes_received: got,
                expected: length,
            });
        }

        tracing::trace!(timestamp, length, "decoded frame");
        #[cfg(feature = "metrics")]
        crate::metrics::inc_frames();
        Ok(Some(Packet::new(timestamp, Bytes::from(payload))))
    }

    /// Read at least `buf.len()` bytes, stopping early only at end of
    /// stream. Returns how many bytes were placed in `buf`.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, FrameError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.stream.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(FrameError::from_io(&error)),
            }
        }
        Ok(filled)
    }
}

/// Iterator adapter over [`ReplayReader::next_frame`].
///
/// Fused after the first terminal outcome: once the clean end or an error
/// has been observed, every further call returns `None`.
#[derive(Debug)]
pub struct Frames<'a, R> {
    reader: &'a mut ReplayReader<R>,
    done: bool,
}

impl<R: Read> Iterator for Frames<'_, R> {
    type Item = Result<Packet, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_frame() {
            Ok(Some(packet)) => Some(Ok(packet)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}
