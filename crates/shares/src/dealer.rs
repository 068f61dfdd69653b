// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Share generation for demos and tests.

use crate::errors::{RecoveryError, RecoveryResult};
use crate::share::{Share, ShareSet, Threshold};
use num_bigint::{BigInt, RandBigInt};
use num_traits::{One, Signed};
use rand::Rng;
use ssa_polynomial::Polynomial;
use tracing::debug;

/// Splits `secret` into `threshold.n` honest shares at `x = 1..=n`.
///
/// The sharing polynomial has degree `k - 1`, constant term `secret` and
/// every other coefficient drawn uniformly from `[0, bound)`.
pub fn deal<R: Rng + ?Sized>(
    secret: &BigInt,
    threshold: Threshold,
    bound: &BigInt,
    rng: &mut R,
) -> RecoveryResult<ShareSet> {
    let threshold = Threshold::new(threshold.n, threshold.k)?;
    let polynomial = Polynomial::random(secret.clone(), threshold.degree(), bound, rng)?;
    debug!(%polynomial, "dealing shares");

    let shares = (1..=threshold.n as u64)
        .map(|idx| Share::new(idx, polynomial.evaluate(&BigInt::from(idx))))
        .collect();
    ShareSet::new(threshold, shares)
}

/// Replaces the value of share `idx` with a different value.
///
/// The new value is the old one plus an offset drawn from `[1, bound]`, so it
/// stays non-negative and never equals the original.
pub fn corrupt<R: Rng + ?Sized>(
    set: &mut ShareSet,
    idx: u64,
    bound: &BigInt,
    rng: &mut R,
) -> RecoveryResult<()> {
    let upper = if bound.is_positive() {
        bound + BigInt::one()
    } else {
        BigInt::from(2)
    };
    let offset = rng.gen_bigint_range(&BigInt::one(), &upper);

    let current = set
        .shares()
        .iter()
        .find(|s| s.idx() == idx)
        .map(|s| s.y().clone())
        .ok_or_else(|| RecoveryError::InvalidIndex {
            key: idx.to_string(),
        })?;

    set.replace_value(idx, current + offset);
    Ok(())
}
