// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Decoders (and their mirrored encoders) for the handful of text
//! encodings that ASN.1 `DirectoryString`-style fields may use. These
//! back the pinned RSA key material's metadata; they are not wired into
//! a certificate parser.
//!
//! Every codepoint is checked against the forbidden set shared by all
//! four encodings: UTF-16 surrogates, the non-characters U+FFFE/U+FFFF
//! in any plane, U+FDD0..=U+FDEF, and anything past U+10FFFF.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnicodeError {
    /// The input ended in the middle of a multi-unit sequence.
    Truncated,
    /// A byte or unit sequence did not decode to a valid codepoint.
    InvalidSequence,
    /// The codepoint decoded fine but is in the forbidden set.
    ForbiddenCodepoint(u32),
}

impl std::error::Error for UnicodeError {}

impl fmt::Display for UnicodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "truncated unicode sequence"),
            Self::InvalidSequence => write!(f, "invalid unicode sequence"),
            Self::ForbiddenCodepoint(cp) => write!(f, "forbidden codepoint U+{cp:04X}"),
        }
    }
}

fn check_codepoint(cp: u32) -> Result<char, UnicodeError> {
    let is_surrogate = (0xD800..=0xDFFF).contains(&cp);
    let is_noncharacter = (cp & 0xFFFE) == 0xFFFE || (0xFDD0..=0xFDEF).contains(&cp);
    if cp > 0x10FFFF || is_surrogate || is_noncharacter {
        return Err(UnicodeError::ForbiddenCodepoint(cp));
    }
    char::from_u32(cp).ok_or(UnicodeError::InvalidSequence)
}

/// Decodes a Latin-1 (ISO-8859-1) byte string: every byte is its own
/// codepoint, so only the forbidden-codepoint check can fail (bytes
/// 0xD8-0xDF and 0xFE-0xFF never land in the forbidden ranges, so in
/// practice this never rejects Latin-1 input, but the check is kept for
/// symmetry with the other decoders).
pub fn decode_latin1(bytes: &[u8]) -> Result<Vec<char>, UnicodeError> {
    bytes.iter().map(|&b| check_codepoint(b as u32)).collect()
}

pub fn encode_latin1(chars: &[char]) -> Result<Vec<u8>, UnicodeError> {
    chars
        .iter()
        .map(|&c| {
            check_codepoint(c as u32)?;
            u8::try_from(c as u32).map_err(|_| UnicodeError::InvalidSequence)
        })
        .collect()
}

/// Decodes a big-endian UCS-2 byte string (fixed 2 bytes per unit, no
/// surrogate pairs — any surrogate codepoint is rejected).
pub fn decode_ucs2_be(bytes: &[u8]) -> Result<Vec<char>, UnicodeError> {
    if bytes.len() % 2 != 0 {
        return Err(UnicodeError::Truncated);
    }
    bytes
        .chunks_exact(2)
        .map(|pair| check_codepoint(u16::from_be_bytes([pair[0], pair[1]]) as u32))
        .collect()
}

pub fn encode_ucs2_be(chars: &[char]) -> Result<Vec<u8>, UnicodeError> {
    let mut out = Vec::with_capacity(chars.len() * 2);
    for &c in chars {
        let cp = c as u32;
        check_codepoint(cp)?;
        let unit = u16::try_from(cp).map_err(|_| UnicodeError::InvalidSequence)?;
        out.extend_from_slice(&unit.to_be_bytes());
    }
    Ok(out)
}

/// Decodes a UTF-8 byte string, rejecting overlong encodings and
/// anything `str::from_utf8` itself would reject, then applies the
/// shared forbidden-codepoint check on top.
pub fn decode_utf8_strict(bytes: &[u8]) -> Result<Vec<char>, UnicodeError> {
    let s = std::str::from_utf8(bytes).map_err(|_| UnicodeError::InvalidSequence)?;
    s.chars().map(|c| check_codepoint(c as u32)).collect()
}

pub fn encode_utf8_strict(chars: &[char]) -> Result<Vec<u8>, UnicodeError> {
    let mut out = String::new();
    for &c in chars {
        check_codepoint(c as u32)?;
        out.push(c);
    }
    Ok(out.into_bytes())
}

/// Decodes a big-endian UTF-32 byte string (fixed 4 bytes per
/// codepoint).
pub fn decode_utf32_be(bytes: &[u8]) -> Result<Vec<char>, UnicodeError> {
    if bytes.len() % 4 != 0 {
        return Err(UnicodeError::Truncated);
    }
    bytes
        .chunks_exact(4)
        .map(|quad| check_codepoint(u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]])))
        .collect()
}

pub fn encode_utf32_be(chars: &[char]) -> Result<Vec<u8>, UnicodeError> {
    let mut out = Vec::with_capacity(chars.len() * 4);
    for &c in chars {
        let cp = c as u32;
        check_codepoint(cp)?;
        out.extend_from_slice(&cp.to_be_bytes());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_roundtrips() {
        let bytes = b"Hello, Telegram!";
        let chars = decode_latin1(bytes).unwrap();
        assert_eq!(encode_latin1(&chars).unwrap(), bytes);
    }

    #[test]
    fn ucs2_roundtrips_and_rejects_odd_length() {
        let chars = vec!['H', 'i', '!'];
        let encoded = encode_ucs2_be(&chars).unwrap();
        assert_eq!(decode_ucs2_be(&encoded).unwrap(), chars);
        assert_eq!(decode_ucs2_be(&[0]), Err(UnicodeError::Truncated));
    }

    #[test]
    fn utf8_strict_rejects_invalid_bytes() {
        assert_eq!(
            decode_utf8_strict(&[0xff, 0xfe]),
            Err(UnicodeError::InvalidSequence)
        );
        assert_eq!(decode_utf8_strict(b"ok").unwrap(), vec!['o', 'k']);
    }

    #[test]
    fn utf32_rejects_forbidden_codepoints() {
        // U+FFFE is a non-character in every plane.
        let bytes = 0xFFFEu32.to_be_bytes();
        assert_eq!(
            decode_utf32_be(&bytes),
            Err(UnicodeError::ForbiddenCodepoint(0xFFFE))
        );

        // A lone UTF-16 surrogate value is forbidden as a scalar value too.
        let bytes = 0xD800u32.to_be_bytes();
        assert_eq!(
            decode_utf32_be(&bytes),
            Err(UnicodeError::ForbiddenCodepoint(0xD800))
        );
    }

    #[test]
    fn rejects_out_of_range_codepoint() {
        let bytes = 0x0011_0000u32.to_be_bytes();
        assert_eq!(
            decode_utf32_be(&bytes),
            Err(UnicodeError::ForbiddenCodepoint(0x0011_0000))
        );
    }
}
