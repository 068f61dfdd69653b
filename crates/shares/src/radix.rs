// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Base-N integer decoding and encoding for share values.

use crate::errors::{RecoveryError, RecoveryResult};
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

/// Checks that `base` lies in `2..=36`.
pub fn validate_base(base: u32) -> RecoveryResult<u32> {
    if (MIN_BASE..=MAX_BASE).contains(&base) {
        Ok(base)
    } else {
        Err(RecoveryError::InvalidBase { base })
    }
}

/// Decodes a non-negative integer written in `base`.
///
/// Surrounding whitespace is ignored and letters are case-insensitive. Digits
/// run `0-9` then `a-z`, limited to `base - 1`. There is no sign handling.
///
/// # Errors
///
/// * `RecoveryError::InvalidBase` if `base` is outside `2..=36`.
/// * `RecoveryError::EmptyValue` if nothing remains after trimming.
/// * `RecoveryError::InvalidDigit` for the first character whose digit value
///   is not below `base`.
pub fn parse_radix(value: &str, base: u32) -> RecoveryResult<BigInt> {
    let base = validate_base(base)?;
    let digits = value.trim();
    if digits.is_empty() {
        return Err(RecoveryError::EmptyValue);
    }

    let mut acc = BigUint::zero();
    for character in digits.chars() {
        let digit = character
            .to_digit(base)
            .ok_or(RecoveryError::InvalidDigit { character, base })?;
        acc = acc * base + digit;
    }

    Ok(BigInt::from(acc))
}

/// Encodes a non-negative integer in `base` using lowercase digits.
pub fn encode_radix(value: &BigUint, base: u32) -> RecoveryResult<String> {
    let base = validate_base(base)?;
    Ok(value.to_str_radix(base))
}
