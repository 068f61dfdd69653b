// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Maximum-agreement search over k-subsets of shares.
//!
//! Every k-subset of the shares is treated in turn as a trusted basis. The
//! basis is interpolated at `x = 0`; a non-integer result means the basis
//! cannot be the honest one and it is discarded. Otherwise every share is
//! checked against the basis polynomial at its own x-coordinate and the
//! agreeing shares are counted. The first basis with the highest count wins,
//! and a basis that every share agrees with ends the search immediately.

use crate::combinations::{binomial, Combinations};
use crate::errors::{RecoveryError, RecoveryResult};
use crate::parallel::search_parallel;
use crate::share::{Share, ShareSet};
use num_bigint::BigInt;
use num_traits::Zero;
use serde::{Serialize, Serializer};
use ssa_polynomial::Interpolator;
use tracing::{debug, info, instrument, warn};

/// Default batch size for [`SearchStrategy::Parallel`]
pub const DEFAULT_BATCH_SIZE: usize = 256;

/// Default candidate count above which a search logs a warning
pub const DEFAULT_WARN_CANDIDATES: u128 = 1_000_000;

/// How the subset space is traversed.
///
/// Both strategies produce identical results: parallel batches are merged in
/// enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    #[default]
    Sequential,
    Parallel {
        /// Worker threads, or rayon's default when `None`
        threads: Option<usize>,
        /// Subsets evaluated per batch
        batch_size: usize,
    },
}

/// The outcome of evaluating one basis that interpolates to an integer secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Positions of the basis shares
    pub subset: Vec<usize>,
    /// Value of the basis polynomial at zero
    pub secret: BigInt,
    /// For each share, whether it lies on the basis polynomial
    pub agreement: Vec<bool>,
    /// Number of `true` entries in `agreement`
    pub count: usize,
}

/// Interpolates `subset` and scores it against all `shares`.
///
/// Returns `Ok(None)` when the secret is not an integer.
pub fn evaluate_subset(shares: &[Share], subset: &[usize]) -> RecoveryResult<Option<Candidate>> {
    let interpolator = Interpolator::new(subset.iter().map(|&i| (shares[i].x(), shares[i].y())))?;

    let Some(secret) = interpolator.evaluate(&BigInt::zero()).to_integer() else {
        debug!(?subset, "discarded: secret is not an integer");
        return Ok(None);
    };

    let agreement: Vec<bool> = shares
        .iter()
        .map(|share| {
            let value = interpolator.evaluate(share.x());
            value.is_integer() && value.numerator() == share.y()
        })
        .collect();
    let count = agreement.iter().filter(|&&agrees| agrees).count();

    debug!(?subset, %secret, count, "scored candidate");
    Ok(Some(Candidate {
        subset: subset.to_vec(),
        secret,
        agreement,
        count,
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Continue,
    Complete,
}

/// Running state of a search: the best candidate so far and how many
/// subsets have been looked at.
#[derive(Debug)]
pub(crate) struct Search {
    n: usize,
    pub(crate) best: Option<Candidate>,
    pub(crate) examined: u64,
}

impl Search {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            n,
            best: None,
            examined: 0,
        }
    }

    /// Records the evaluation of the next subset in enumeration order.
    pub(crate) fn record(&mut self, evaluation: Option<Candidate>) -> Step {
        self.examined += 1;
        let Some(candidate) = evaluation else {
            return Step::Continue;
        };

        // Later candidates only replace on a strictly greater count
        if self.best.as_ref().map_or(true, |best| candidate.count > best.count) {
            let full = candidate.count == self.n;
            self.best = Some(candidate);
            if full {
                info!(examined = self.examined, "every share agrees, stopping early");
                return Step::Complete;
            }
        }
        Step::Continue
    }
}

/// The reconstructed secret and the partition of shares it implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconstruction {
    pub k: usize,
    pub degree: usize,
    #[serde(serialize_with = "serialize_decimal")]
    pub secret: BigInt,
    /// Declared indices that agree with the secret's polynomial, ascending
    pub consistent: Vec<u64>,
    /// Declared indices that do not, ascending
    pub inconsistent: Vec<u64>,
    /// Declared indices of the basis that produced the secret, ascending
    pub basis: Vec<u64>,
    pub subsets_examined: u64,
}

fn serialize_decimal<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

/// Finds the secret that the largest number of shares agree with.
#[derive(Debug, Clone)]
pub struct ConsistencySolver<'a> {
    shares: &'a [Share],
    k: usize,
    strategy: SearchStrategy,
    warn_candidates: u128,
}

impl<'a> ConsistencySolver<'a> {
    /// Creates a solver over `shares` with threshold `k`.
    ///
    /// Subsets index `shares` by position, so the slice order fixes the
    /// enumeration order and with it the tie-break.
    pub fn new(shares: &'a [Share], k: usize) -> Self {
        Self {
            shares,
            k,
            strategy: SearchStrategy::default(),
            warn_candidates: DEFAULT_WARN_CANDIDATES,
        }
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_warn_candidates(mut self, warn_candidates: u128) -> Self {
        self.warn_candidates = warn_candidates;
        self
    }

    /// Runs the search.
    ///
    /// # Errors
    ///
    /// * `RecoveryError::InvalidThreshold` unless `1 <= k <= n`.
    /// * `RecoveryError::Polynomial` if two shares share an x-coordinate.
    /// * `RecoveryError::NoConsistentReconstruction` if no subset yields an
    ///   integer secret.
    #[instrument(skip_all, fields(n = self.shares.len(), k = self.k))]
    pub fn solve(&self) -> RecoveryResult<Reconstruction> {
        let n = self.shares.len();
        let k = self.k;
        if k == 0 || k > n {
            return Err(RecoveryError::InvalidThreshold { n, k });
        }

        let candidates = binomial(n, k);
        if candidates > self.warn_candidates {
            warn!(candidates, "large search space, reconstruction may take a long time");
        }

        let search = match self.strategy {
            SearchStrategy::Sequential => self.search_sequential()?,
            SearchStrategy::Parallel {
                threads,
                batch_size,
            } => search_parallel(self.shares, k, threads, batch_size)?,
        };

        let examined = search.examined;
        let best = search
            .best
            .ok_or(RecoveryError::NoConsistentReconstruction { n, k })?;
        let reconstruction = self.finalize(best, examined);

        info!(
            secret = %reconstruction.secret,
            consistent = reconstruction.consistent.len(),
            inconsistent = reconstruction.inconsistent.len(),
            examined,
            "reconstruction complete"
        );
        Ok(reconstruction)
    }

    fn search_sequential(&self) -> RecoveryResult<Search> {
        let mut search = Search::new(self.shares.len());
        for subset in Combinations::new(self.shares.len(), self.k) {
            let evaluation = evaluate_subset(self.shares, &subset)?;
            if search.record(evaluation) == Step::Complete {
                return Ok(search);
            }
        }
        Ok(search)
    }

    fn finalize(&self, best: Candidate, examined: u64) -> Reconstruction {
        let (mut consistent, mut inconsistent): (Vec<u64>, Vec<u64>) = (Vec::new(), Vec::new());
        for (share, agrees) in self.shares.iter().zip(&best.agreement) {
            if *agrees {
                consistent.push(share.idx());
            } else {
                inconsistent.push(share.idx());
            }
        }
        consistent.sort_unstable();
        inconsistent.sort_unstable();

        let mut basis: Vec<u64> = best.subset.iter().map(|&i| self.shares[i].idx()).collect();
        basis.sort_unstable();

        Reconstruction {
            k: self.k,
            degree: self.k - 1,
            secret: best.secret,
            consistent,
            inconsistent,
            basis,
            subsets_examined: examined,
        }
    }
}

impl ShareSet {
    /// Reconstructs the secret from this set using `strategy`.
    pub fn reconstruct(&self, strategy: SearchStrategy) -> RecoveryResult<Reconstruction> {
        ConsistencySolver::new(self.shares(), self.threshold().k)
            .with_strategy(strategy)
            .solve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shares(raw: &[(u64, i64)]) -> Vec<Share> {
        raw.iter()
            .map(|(idx, y)| Share::new(*idx, BigInt::from(*y)))
            .collect()
    }

    #[test]
    fn test_concrete_scenario() {
        // y = 5x + 1 with the fourth share corrupted
        let shares = shares(&[(1, 6), (2, 11), (3, 16), (4, 999)]);
        let result = ConsistencySolver::new(&shares, 2).solve().unwrap();

        assert_eq!(result.secret, BigInt::from(1));
        assert_eq!(result.k, 2);
        assert_eq!(result.degree, 1);
        assert_eq!(result.consistent, vec![1, 2, 3]);
        assert_eq!(result.inconsistent, vec![4]);
        assert_eq!(result.basis, vec![1, 2]);
    }

    #[test]
    fn test_evaluate_subset_discards_fraction() {
        // Line through (1, 1) and (3, 2) has f(0) = 1/2
        let shares = shares(&[(1, 1), (3, 2)]);
        assert_eq!(evaluate_subset(&shares, &[0, 1]).unwrap(), None);
    }

    #[test]
    fn test_evaluate_subset_scores_all_shares() {
        let shares = shares(&[(1, 3), (2, 5), (3, 8), (4, 9)]);
        let candidate = evaluate_subset(&shares, &[0, 1]).unwrap().unwrap();
        assert_eq!(candidate.secret, BigInt::from(1));
        assert_eq!(candidate.agreement, vec![true, true, false, true]);
        assert_eq!(candidate.count, 3);
    }

    #[test]
    fn test_invalid_threshold() {
        let shares = shares(&[(1, 3)]);
        assert!(matches!(
            ConsistencySolver::new(&shares, 0).solve(),
            Err(RecoveryError::InvalidThreshold { n: 1, k: 0 })
        ));
        assert!(matches!(
            ConsistencySolver::new(&shares, 2).solve(),
            Err(RecoveryError::InvalidThreshold { n: 1, k: 2 })
        ));
    }

    #[test]
    fn test_duplicate_x_surfaces_division_by_zero() {
        let shares = shares(&[(2, 3), (2, 4)]);
        assert!(matches!(
            ConsistencySolver::new(&shares, 2).solve(),
            Err(RecoveryError::Polynomial(
                ssa_polynomial::PolynomialError::DivisionByZero
            ))
        ));
    }

    #[test]
    fn test_tie_keeps_first_found() {
        // Two disjoint lines, each matched by exactly two shares:
        // {1, 2} lie on y = x + 10, {3, 4} lie on y = 2x + 20.
        let shares = shares(&[(1, 11), (2, 12), (3, 26), (4, 28)]);
        let result = ConsistencySolver::new(&shares, 2).solve().unwrap();

        assert_eq!(result.secret, BigInt::from(10));
        assert_eq!(result.consistent, vec![1, 2]);
        assert_eq!(result.inconsistent, vec![3, 4]);
        assert_eq!(result.subsets_examined, 6);
    }

    #[test]
    fn test_record_replaces_only_on_strictly_greater() {
        let candidate = |count: usize, secret: i64| Candidate {
            subset: vec![],
            secret: BigInt::from(secret),
            agreement: vec![],
            count,
        };

        let mut search = Search::new(5);
        assert_eq!(search.record(None), Step::Continue);
        assert!(search.best.is_none());
        assert_eq!(search.record(Some(candidate(2, 7))), Step::Continue);
        assert_eq!(search.record(Some(candidate(2, 8))), Step::Continue);
        assert_eq!(search.best.as_ref().unwrap().secret, BigInt::from(7));
        assert_eq!(search.record(Some(candidate(5, 9))), Step::Complete);
        assert_eq!(search.best.as_ref().unwrap().secret, BigInt::from(9));
        assert_eq!(search.examined, 4);
    }

    #[test]
    fn test_serializes_secret_as_decimal_string() {
        let secret: BigInt = "123456789012345678901234567890".parse().unwrap();
        let result = Reconstruction {
            k: 1,
            degree: 0,
            secret,
            consistent: vec![1],
            inconsistent: vec![],
            basis: vec![1],
            subsets_examined: 1,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["secret"], "123456789012345678901234567890");
        assert_eq!(json["consistent"], serde_json::json!([1]));
    }
}
