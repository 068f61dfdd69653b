// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::{RecoveryError, RecoveryResult};
use crate::radix::{encode_radix, parse_radix, validate_base};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Threshold parameters of a sharing scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    /// Total number of shares
    pub n: usize,
    /// Shares required to reconstruct
    pub k: usize,
}

impl Threshold {
    /// Creates threshold parameters, requiring `1 <= k <= n`.
    pub fn new(n: usize, k: usize) -> RecoveryResult<Self> {
        if k == 0 || k > n {
            return Err(RecoveryError::InvalidThreshold { n, k });
        }
        Ok(Self { n, k })
    }

    /// Degree of the sharing polynomial, `k - 1`.
    pub fn degree(&self) -> usize {
        self.k - 1
    }
}

/// A share as supplied by a holder: declared index, base and encoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRecord {
    pub idx: u64,
    pub base: u32,
    pub value: String,
}

impl ShareRecord {
    pub fn new(idx: u64, base: u32, value: impl Into<String>) -> Self {
        Self {
            idx,
            base,
            value: value.into(),
        }
    }

    /// Decodes the record into a point on the sharing polynomial.
    pub fn decode(&self) -> RecoveryResult<Share> {
        parse_radix(&self.value, self.base)
            .map(|y| Share::new(self.idx, y))
            .map_err(|e| e.for_share(self.idx))
    }
}

/// One decoded point `(x, y)` of the sharing polynomial, where `x` is the
/// declared index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    idx: u64,
    x: BigInt,
    y: BigInt,
}

impl Share {
    pub fn new(idx: u64, y: BigInt) -> Self {
        Self {
            idx,
            x: BigInt::from(idx),
            y,
        }
    }

    pub fn idx(&self) -> u64 {
        self.idx
    }

    pub fn x(&self) -> &BigInt {
        &self.x
    }

    pub fn y(&self) -> &BigInt {
        &self.y
    }

    /// Renders the share back into a record in `base`.
    ///
    /// Negative values have no representation in the input scheme.
    pub fn encode(&self, base: u32) -> RecoveryResult<ShareRecord> {
        let base = validate_base(base)?;
        let magnitude = self
            .y
            .to_biguint()
            .ok_or_else(|| RecoveryError::NegativeValue.for_share(self.idx))?;
        Ok(ShareRecord::new(
            self.idx,
            base,
            encode_radix(&magnitude, base)?,
        ))
    }
}

/// A validated collection of shares for one reconstruction attempt.
///
/// Shares are held in ascending order of declared index, and that order is
/// the positional order the subset search enumerates over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareSet {
    threshold: Threshold,
    shares: Vec<Share>,
}

impl ShareSet {
    /// Decodes and validates `records` against `threshold`.
    ///
    /// # Errors
    ///
    /// * `RecoveryError::ShareCountMismatch` unless exactly `n` records are given.
    /// * `RecoveryError::DuplicateIndex` if two records declare the same index.
    /// * `RecoveryError::Share` wrapping the decoding failure of a record.
    pub fn from_records(threshold: Threshold, records: Vec<ShareRecord>) -> RecoveryResult<Self> {
        let shares = records
            .iter()
            .map(ShareRecord::decode)
            .collect::<RecoveryResult<Vec<_>>>()?;
        Self::new(threshold, shares)
    }

    /// Validates already decoded shares against `threshold`.
    pub fn new(threshold: Threshold, mut shares: Vec<Share>) -> RecoveryResult<Self> {
        let threshold = Threshold::new(threshold.n, threshold.k)?;
        if shares.len() != threshold.n {
            return Err(RecoveryError::ShareCountMismatch {
                expected: threshold.n,
                actual: shares.len(),
            });
        }

        let mut seen = HashSet::with_capacity(shares.len());
        if let Some(dup) = shares.iter().find(|s| !seen.insert(s.idx())) {
            return Err(RecoveryError::DuplicateIndex { idx: dup.idx() });
        }

        shares.sort_by_key(Share::idx);
        Ok(Self { threshold, shares })
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Encodes every share in `base`.
    pub fn to_records(&self, base: u32) -> RecoveryResult<Vec<ShareRecord>> {
        self.shares.iter().map(|s| s.encode(base)).collect()
    }

    /// Replaces the value of the share with declared index `idx`.
    ///
    /// Returns `false` if no such share exists.
    pub fn replace_value(&mut self, idx: u64, y: BigInt) -> bool {
        match self.shares.iter_mut().find(|s| s.idx == idx) {
            Some(share) => {
                share.y = y;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(raw: &[(u64, u32, &str)]) -> Vec<ShareRecord> {
        raw.iter()
            .map(|(idx, base, value)| ShareRecord::new(*idx, *base, *value))
            .collect()
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(Threshold::new(3, 3).is_ok());
        assert_eq!(Threshold::new(4, 3).unwrap().degree(), 2);
        assert!(matches!(
            Threshold::new(3, 0),
            Err(RecoveryError::InvalidThreshold { n: 3, k: 0 })
        ));
        assert!(matches!(
            Threshold::new(2, 3),
            Err(RecoveryError::InvalidThreshold { n: 2, k: 3 })
        ));
    }

    #[test]
    fn test_share_set_sorted_by_index() {
        let set = ShareSet::from_records(
            Threshold::new(3, 2).unwrap(),
            records(&[(3, 10, "28"), (1, 2, "110"), (2, 16, "f")]),
        )
        .unwrap();

        let indices: Vec<u64> = set.shares().iter().map(Share::idx).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(set.shares()[0].y(), &BigInt::from(6));
        assert_eq!(set.shares()[1].y(), &BigInt::from(15));
        assert_eq!(set.shares()[2].x(), &BigInt::from(3));
    }

    #[test]
    fn test_share_count_mismatch() {
        let err = ShareSet::from_records(
            Threshold::new(3, 2).unwrap(),
            records(&[(1, 10, "1"), (2, 10, "2")]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RecoveryError::ShareCountMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_duplicate_index() {
        let err = ShareSet::from_records(
            Threshold::new(2, 2).unwrap(),
            records(&[(4, 10, "1"), (4, 10, "2")]),
        )
        .unwrap_err();
        assert!(matches!(err, RecoveryError::DuplicateIndex { idx: 4 }));
    }

    #[test]
    fn test_decode_error_names_share() {
        let err = ShareSet::from_records(
            Threshold::new(2, 1).unwrap(),
            records(&[(1, 10, "5"), (2, 8, "19")]),
        )
        .unwrap_err();
        match err {
            RecoveryError::Share { idx, source } => {
                assert_eq!(idx, 2);
                assert!(matches!(
                    *source,
                    RecoveryError::InvalidDigit {
                        character: '9',
                        base: 8
                    }
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_encode_round_trip() {
        let share = Share::new(7, BigInt::from(255));
        let record = share.encode(16).unwrap();
        assert_eq!(record, ShareRecord::new(7, 16, "ff"));
        assert_eq!(record.decode().unwrap(), share);

        assert!(Share::new(1, BigInt::from(-5)).encode(10).is_err());
    }
}
