// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Diffie-Hellman parameter validation, as required by the
//! [MTProto security guidelines].
//!
//! [MTProto security guidelines]: https://core.telegram.org/mtproto/security_guidelines#checking-g-g_a-and-g_b

use num_bigint::BigUint;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DhParamsError {
    /// `g`, `g_a` or `g_b` fell outside of `(1, dh_prime - 1)`, or outside
    /// of the recommended `2^{2048-64}..dh_prime-2^{2048-64}` safety range.
    OutOfRange { low: BigUint, high: BigUint, value: BigUint },

    /// `g_a` or `g_b` was equal to one of the small-order elements that
    /// would put the shared secret in a tiny, attacker-controlled
    /// subgroup (`1`, `dh_prime - 1`, or `(dh_prime - 1) / 2`).
    SmallSubgroup { value: BigUint },
}

impl std::error::Error for DhParamsError {}

impl fmt::Display for DhParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { low, high, value } => {
                write!(f, "value {value} was not in the range {low}..{high}")
            }
            Self::SmallSubgroup { value } => {
                write!(f, "value {value} lies in a small-order subgroup")
            }
        }
    }
}

fn check_in_range(value: &BigUint, low: &BigUint, high: &BigUint) -> Result<(), DhParamsError> {
    if low < value && value < high {
        Ok(())
    } else {
        Err(DhParamsError::OutOfRange {
            low: low.clone(),
            high: high.clone(),
            value: value.clone(),
        })
    }
}

fn check_not_small_subgroup(
    value: &BigUint,
    one: &BigUint,
    dh_prime: &BigUint,
) -> Result<(), DhParamsError> {
    let p_minus_one = dh_prime - one;
    let half = &p_minus_one / 2u32;
    if *value == *one || *value == p_minus_one || *value == half {
        return Err(DhParamsError::SmallSubgroup {
            value: value.clone(),
        });
    }
    Ok(())
}

/// Validates `g`, `g_a` and `g_b` against `dh_prime` per the MTProto
/// security guidelines:
///
/// * all three must lie strictly between `1` and `dh_prime - 1`;
/// * `g_a` and `g_b` should additionally lie between `2^{2048-64}` and
///   `dh_prime - 2^{2048-64}`, to guard against small values that would
///   make brute-forcing the shared secret feasible;
/// * `g_a` and `g_b` must not equal `1`, `dh_prime - 1`, or
///   `(dh_prime - 1) / 2`, each of which would force the shared secret
///   into a subgroup of order at most 2.
pub fn check_params(
    g: &BigUint,
    g_a: &BigUint,
    g_b: &BigUint,
    dh_prime: &BigUint,
) -> Result<(), DhParamsError> {
    let one = BigUint::from(1u32);
    let p_minus_one = dh_prime - &one;

    check_in_range(g, &one, &p_minus_one)?;
    check_in_range(g_a, &one, &p_minus_one)?;
    check_in_range(g_b, &one, &p_minus_one)?;

    let safety_range = one.clone() << (2048 - 64);
    let high = dh_prime - &safety_range;
    check_in_range(g_a, &safety_range, &high)?;
    check_in_range(g_b, &safety_range, &high)?;

    check_not_small_subgroup(g_a, &one, dh_prime)?;
    check_not_small_subgroup(g_b, &one, dh_prime)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prime_2048() -> BigUint {
        // The fixed DH prime used by Telegram's MTProto v2 handshake.
        BigUint::parse_bytes(
            b"C71CAEB9C6B1C9048E6C522F70F13F73980D40238E3E21C14934D037563D930\
              F48198A0AA7C14058229493D22530F4DBFA336F6E0AC925139543AED44CCE7C\
              3720FD51F69458705AC68CD4FE6B6B13ABDC9746512969328454F18FAF8C595\
              F642477FE96BB2A941D5BCD1D4AC8CC49880708FA9B378E3C4F3A9060BEE67C\
              F9A4A4A695811051907E162753B56B0F6B410DBA74D8A84B2A14B3144E0EF1284754FD17ED950D5965B4B9DD46582DB1178D169C6BC465B0D6FF9CA3928FEF5B9AE4E418FC15E83EBEA0F87FA9FF5EED70050DED2849F47BF959D956850CE929851F0D8115F635B105EE2E4E15D04B2454BF6F4FADF034B10403119CD8E3B92FCC5B",
            16,
        )
        .unwrap()
    }

    #[test]
    fn accepts_small_valid_exponentials_when_in_safety_range() {
        let dh_prime = prime_2048();
        let g = BigUint::from(3u32);
        let safety_range = BigUint::from(1u32) << (2048 - 64);
        let g_a = &safety_range + 1u32;
        let g_b = &safety_range + 2u32;
        assert!(check_params(&g, &g_a, &g_b, &dh_prime).is_ok());
    }

    #[test]
    fn rejects_identity_element() {
        let dh_prime = prime_2048();
        let g = BigUint::from(3u32);
        let safety_range = BigUint::from(1u32) << (2048 - 64);
        let g_b = &safety_range + 2u32;
        let err = check_params(&g, &BigUint::from(1u32), &g_b, &dh_prime).unwrap_err();
        assert!(matches!(
            err,
            DhParamsError::OutOfRange { .. } | DhParamsError::SmallSubgroup { .. }
        ));
    }

    #[test]
    fn rejects_value_below_safety_range() {
        let dh_prime = prime_2048();
        let g = BigUint::from(3u32);
        let safety_range = BigUint::from(1u32) << (2048 - 64);
        let g_b = &safety_range + 2u32;
        let err = check_params(&g, &BigUint::from(5u32), &g_b, &dh_prime).unwrap_err();
        assert!(matches!(err, DhParamsError::OutOfRange { .. }));
    }

    #[test]
    fn rejects_p_minus_one_half() {
        let dh_prime = prime_2048();
        let g = BigUint::from(3u32);
        let safety_range = BigUint::from(1u32) << (2048 - 64);
        let g_b = &safety_range + 2u32;
        let half = (&dh_prime - 1u32) / 2u32;
        let err = check_params(&g, &half, &g_b, &dh_prime).unwrap_err();
        assert!(matches!(
            err,
            DhParamsError::OutOfRange { .. } | DhParamsError::SmallSubgroup { .. }
        ));
    }
}
