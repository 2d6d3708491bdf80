//! Helpers for explicit network byte-order conversions.
//!
//! These helpers keep Clippy expectations scoped to the conversion points so
//! decoding code can remain explicit about wire endianness without repeating
//! lint annotations. The replay container and every fixed-width payload field
//! are big-endian, and this decoder never writes, so only the read half
//! exists.

/// Parse a network-order `u16` from its on-wire representation.
///
/// # Examples
///
/// ```
/// use replayframe::byte_order::read_network_u16;
///
/// assert_eq!(read_network_u16([0x12, 0x34]), 0x1234);
/// ```
#[must_use]
pub fn read_network_u16(bytes: [u8; 2]) -> u16 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    u16::from_be_bytes(bytes)
}

/// Parse a network-order `u32` from its on-wire representation.
///
/// # Examples
///
/// ```
/// use replayframe::byte_order::read_network_u32;
///
/// assert_eq!(read_network_u32([0x12, 0x34, 0x56, 0x78]), 0x1234_5678);
/// ```
#[must_use]
pub fn read_network_u32(bytes: [u8; 4]) -> u32 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    u32::from_be_bytes(bytes)
}

/// Parse a network-order `u64` from its on-wire representation.
///
/// # Examples
///
/// ```
/// use replayframe::byte_order::read_network_u64;
///
/// assert_eq!(
///     read_network_u64([0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]),
///     0x1122_3344_5566_7788
/// );
/// ```
#[must_use]
pub fn read_network_u64(bytes: [u8; 8]) -> u64 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    u64::from_be_bytes(bytes)
}

/// Parse a network-order `i16`, reinterpreting the wire bits as
/// two's-complement.
#[must_use]
pub fn read_network_i16(bytes: [u8; 2]) -> i16 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    i16::from_be_bytes(bytes)
}

/// Parse a network-order `i32`, reinterpreting the wire bits as
/// two's-complement.
#[must_use]
pub fn read_network_i32(bytes: [u8; 4]) -> i32 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    i32::from_be_bytes(bytes)
}

/// Parse a network-order `i64`, reinterpreting the wire bits as
/// two's-complement.
#[must_use]
pub fn read_network_i64(bytes: [u8; 8]) -> i64 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    i64::from_be_bytes(bytes)
}
