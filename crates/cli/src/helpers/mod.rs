// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{bail, Context, Result};
use num_bigint::BigInt;
use num_traits::Signed;
use ssa_shares::radix::validate_base;

pub mod telemetry;

/// Parse a non-negative decimal integer of any size
pub fn parse_secret(s: &str) -> Result<BigInt> {
    let value: BigInt = s
        .trim()
        .parse()
        .with_context(|| format!("'{s}' is not a decimal integer"))?;
    if value.is_negative() {
        bail!("secret must not be negative");
    }
    Ok(value)
}

/// Ensure a base between 2 and 36
pub fn parse_base(s: &str) -> Result<u32> {
    let base: u32 = s
        .trim()
        .parse()
        .with_context(|| format!("'{s}' is not a number"))?;
    Ok(validate_base(base)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_secret() {
        assert_eq!(parse_secret(" 42 ").unwrap(), BigInt::from(42));
        assert!(parse_secret("-1").is_err());
        assert!(parse_secret("0x10").is_err());
    }

    #[test]
    fn test_parse_base() {
        assert_eq!(parse_base("36").unwrap(), 36);
        assert!(parse_base("1").is_err());
        assert!(parse_base("37").is_err());
        assert!(parse_base("hex").is_err());
    }
}
