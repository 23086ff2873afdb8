// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use super::{Error, Tagged, Transport, UnpackedOffset};
use getrandom::getrandom;
use grammers_crypto::RingBuffer;

/// Like [`super::Intermediate`], but pads the payload with up to 15
/// random bytes. This is the [padded intermediate transport], meant to
/// be used together with [`super::Obfuscated`] so that packet lengths
/// don't leak a multiple-of-4 signature to a passive observer.
///
/// It serializes the input payload as follows:
///
/// ```text
/// +----+----...----+----...----+
/// | len|  payload  |  padding  |
/// +----+----...----+----...----+
///  ^^^^ 4 bytes      0-15 bytes
/// ```
///
/// [padded intermediate transport]: https://core.telegram.org/mtproto/mtproto-transports#padded-intermediate
pub struct PaddedIntermediate {
    init: bool,
}

impl PaddedIntermediate {
    const TAG: [u8; 4] = [0xdd, 0xdd, 0xdd, 0xdd];

    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self { init: false }
    }
}

impl Transport for PaddedIntermediate {
    fn pack(&mut self, buffer: &mut RingBuffer<u8>) {
        let mut padding = [0u8; 15];
        getrandom(&mut padding).expect("failed to generate random padding");
        let pad_len = (padding[0] % 16) as usize;
        buffer.extend(&padding[..pad_len]);

        let len = buffer.len();
        buffer.shift(&(len as i32).to_le_bytes());

        if !self.init {
            buffer.shift(&Self::TAG);
            self.init = true;
        }
    }

    fn unpack(&mut self, buffer: &[u8]) -> Result<UnpackedOffset, Error> {
        if buffer.len() < 4 {
            return Err(Error::MissingBytes);
        }

        let len = i32::from_le_bytes(buffer[0..4].try_into().unwrap());
        if len < 4 {
            return Err(Error::BadLen { got: len });
        }

        if (buffer.len() as i32) < 4 + len {
            return Err(Error::MissingBytes);
        }

        // The trailing padding bytes (at most 15) are included in `len`
        // but are not part of the payload; the caller always knows the
        // payload's own length from its own framing (`message_data_length`
        // in the MTProto envelope), so handing back the padded slice is
        // correct: it is up to the MTP layer to stop reading at its own
        // declared length.
        let len = len as usize;

        Ok(UnpackedOffset {
            data_start: 4,
            data_end: 4 + len,
            next_offset: 4 + len,
        })
    }

    fn reset(&mut self) {
        self.init = false;
    }
}

impl Tagged for PaddedIntermediate {
    fn init_tag(&mut self) -> [u8; 4] {
        self.init = true;
        Self::TAG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_pack(n: usize) -> (PaddedIntermediate, RingBuffer<u8>) {
        let mut buffer = RingBuffer::with_capacity(n, 0);
        buffer.extend((0..n).map(|x| (x & 0xff) as u8));
        (PaddedIntermediate::new(), buffer)
    }

    #[test]
    fn pack_includes_tag_and_len_header() {
        let (mut transport, mut buffer) = setup_pack(16);
        let orig = buffer.clone();
        transport.pack(&mut buffer);

        assert_eq!(&buffer[..4], &[0xdd, 0xdd, 0xdd, 0xdd]);
        let len = i32::from_le_bytes(buffer[4..8].try_into().unwrap());
        assert!(len as usize >= orig.len());
        assert_eq!(&buffer[8..8 + orig.len()], &orig[..]);
    }

    #[test]
    fn unpack_small() {
        let mut transport = PaddedIntermediate::new();
        let buffer = [1u8];
        assert_eq!(transport.unpack(&buffer), Err(Error::MissingBytes));
    }

    #[test]
    fn unpack_roundtrip() {
        let (mut transport, mut buffer) = setup_pack(16);
        let orig = buffer.clone();
        transport.pack(&mut buffer);
        buffer.skip(4); // tag
        let offset = transport.unpack(&buffer[..]).unwrap();
        assert!(&buffer[offset.data_start..offset.data_end].starts_with(&orig[..]));
    }
}
