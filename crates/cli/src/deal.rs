// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::io::{self, Write};

use anyhow::Result;
use num_bigint::BigInt;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use ssa_shares::{corrupt, deal, TestCase, Threshold};
use tracing::info;

/// Coefficients and corruption offsets are drawn below 2^64
const COEFFICIENT_BITS: usize = 64;

#[derive(Debug, Clone)]
pub struct DealArgs {
    pub secret: BigInt,
    pub threshold: usize,
    pub shares: usize,
    pub base: u32,
    pub seed: Option<u64>,
    pub corrupt: Vec<u64>,
}

pub fn execute(args: DealArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };
    let case = build_case(&args, &mut rng)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", serde_json::to_string_pretty(&case)?)?;
    Ok(())
}

fn build_case<R: Rng + ?Sized>(args: &DealArgs, rng: &mut R) -> Result<TestCase> {
    let bound = BigInt::from(1u8) << COEFFICIENT_BITS;
    let threshold = Threshold::new(args.shares, args.threshold)?;

    let mut set = deal(&args.secret, threshold, &bound, rng)?;
    for idx in &args.corrupt {
        corrupt(&mut set, *idx, &bound, rng)?;
    }
    info!(
        n = threshold.n,
        k = threshold.k,
        corrupted = args.corrupt.len(),
        "dealt shares"
    );

    Ok(TestCase::from_share_set(&set, args.base)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssa_shares::input::Numeric;
    use ssa_shares::SearchStrategy;

    fn args(corrupt: Vec<u64>) -> DealArgs {
        DealArgs {
            secret: BigInt::from(424242),
            threshold: 3,
            shares: 6,
            base: 16,
            seed: Some(7),
            corrupt,
        }
    }

    #[test]
    fn test_dealt_case_recovers() -> Result<()> {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let case = build_case(&args(vec![5]), &mut rng)?;
        assert_eq!(case.shares.len(), 6);
        assert!(case.shares.values().all(|share| share.base == Numeric::Text("16".to_string())));

        let result = case.to_share_set()?.reconstruct(SearchStrategy::Sequential)?;
        assert_eq!(result.secret, BigInt::from(424242));
        assert_eq!(result.inconsistent, vec![5]);
        Ok(())
    }

    #[test]
    fn test_same_seed_same_case() -> Result<()> {
        let first = build_case(&args(vec![]), &mut ChaCha20Rng::seed_from_u64(1))?;
        let second = build_case(&args(vec![]), &mut ChaCha20Rng::seed_from_u64(1))?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_unknown_corrupt_index() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        assert!(build_case(&args(vec![9]), &mut rng).is_err());
    }
}
