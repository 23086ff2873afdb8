// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Implementation of the several [MTProto transports]. This layer is
//! responsible for taking serialized messages from the MTP and packing them
//! in a format that can be sent over a protocol, such as TCP, HTTP or UDP.
//!
//! [MTProto transports]: https://core.telegram.org/mtproto#mtproto-transport
mod abridged;
mod full;
mod intermediate;
mod obfuscated;
mod padded_intermediate;

pub use abridged::Abridged;
pub use full::Full;
pub use intermediate::Intermediate;
pub use obfuscated::Obfuscated;
pub use padded_intermediate::PaddedIntermediate;
use std::fmt;

use grammers_crypto::RingBuffer;

/// The error type reported by the different transports when something is wrong.
///
/// Certain transports will only produce certain variants of this error.
///
/// Unless the variant is `MissingBytes`, the connection should not continue.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Not enough bytes are provided.
    MissingBytes,

    /// The length is either too short or too long to represent a valid packet.
    BadLen { got: i32 },

    /// The sequence number received does not match the expected value.
    BadSeq { expected: i32, got: i32 },

    /// The checksum of the packet does not match its expected value.
    BadCrc { expected: u32, got: u32 },

    /// The server reported a transport-level error status instead of a
    /// packet (a negative length field holding `-status`).
    BadStatus { status: u32 },
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport error: ")?;
        match self {
            Error::MissingBytes => write!(f, "need more bytes"),
            Error::BadLen { got } => write!(f, "bad len (got {})", got),
            Error::BadSeq { expected, got } => {
                write!(f, "bad seq (expected {}, got {})", expected, got)
            }
            Error::BadCrc { expected, got } => {
                write!(f, "bad crc (expected {}, got {})", expected, got)
            }
            Error::BadStatus { status } => write!(f, "bad status ({})", status),
        }
    }
}

/// The bounds of a single packet that was just unpacked from the front of a
/// buffer, relative to that buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnpackedOffset {
    /// Where the packet's payload starts.
    pub data_start: usize,
    /// Where the packet's payload ends.
    pub data_end: usize,
    /// How many bytes of the input were consumed by this packet, including
    /// any framing. The next call to `unpack` should be given the buffer
    /// starting at this offset.
    pub next_offset: usize,
}

/// The trait used by the transports to pack and unpack MTProto messages
/// into and out of their wire framing.
pub trait Transport {
    /// Packs the payload already present in `buffer`, prepending (and, for
    /// some transports, appending) whatever framing the transport needs.
    ///
    /// Panics if the payload's length is not divisible by 4.
    fn pack(&mut self, buffer: &mut RingBuffer<u8>);

    /// Looks for a complete packet at the front of `buffer` and, if found,
    /// returns the offsets of its payload.
    ///
    /// Returns [`Error::MissingBytes`] if `buffer` does not yet hold a
    /// complete packet; the caller should read more data and retry.
    fn unpack(&mut self, buffer: &[u8]) -> Result<UnpackedOffset, Error>;

    /// Resets any per-connection state (sequence numbers, the
    /// not-yet-sent preamble, obfuscation keys). Called after a
    /// reconnection, since a fresh connection starts the transport's
    /// framing over from scratch.
    fn reset(&mut self) {}
}

/// Transports that can report the 4-byte tag a fresh connection sends as
/// the very first bytes of the stream (abridged's `0xef`, intermediate's
/// `0xeeeeeeee`, and so on). [`Obfuscated`] needs this to mix the real
/// tag into its encrypted preamble so a passive observer cannot
/// distinguish it from random noise.
pub trait Tagged {
    /// Returns the transport's identifying tag, and marks its preamble as
    /// already sent so `pack` does not also emit it in the clear.
    fn init_tag(&mut self) -> [u8; 4];
}
