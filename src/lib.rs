#![doc(html_root_url = "https://docs.rs/replayframe/latest")]
//! Public API for the `replayframe` library.
//!
//! This crate decodes recorded network-session files ("replays") into a
//! sequence of time-stamped, length-delimited binary frames, and provides a
//! cursor-based decoder for reading typed fields out of each frame's
//! payload. It interprets encodings, not meanings: what a given packet type
//! signifies is the caller's concern, and replays are read-only here.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//!
//! use replayframe::ReplayReader;
//!
//! let bytes: [u8; 12] = [
//!     0x00, 0x00, 0x00, 0x05, // timestamp 5 ms
//!     0x00, 0x00, 0x00, 0x04, // payload length 4
//!     0x03, 0x61, 0x62, 0x63, // varint-prefixed string "abc"
//! ];
//! let mut reader = ReplayReader::new(Cursor::new(bytes));
//!
//! let mut packet = reader.next_frame()?.expect("one frame");
//! let (text, consumed) = packet.read_string().expect("string payload");
//! assert_eq!((packet.timestamp(), text.as_str(), consumed), (5, "abc", 4));
//! assert!(reader.next_frame()?.is_none());
//! # Ok::<(), replayframe::FrameError>(())
//! ```

pub mod byte_order;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod packet;
pub mod reader;
mod varint;

pub use error::{DecodeError, FrameError};
pub use packet::Packet;
pub use reader::{Frames, HEADER_SIZE, ReplayReader};
