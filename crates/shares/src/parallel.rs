// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::combinations::Combinations;
use crate::errors::RecoveryResult;
use crate::share::Share;
use crate::solver::{evaluate_subset, Search, Step};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Evaluates subsets on a rayon pool in batches pulled from the lazy
/// enumeration.
///
/// Results of each batch are folded into the search in enumeration order, so
/// the winning candidate, the early stop and the first error reported are the
/// same as a sequential pass would produce.
pub(crate) fn search_parallel(
    shares: &[Share],
    k: usize,
    threads: Option<usize>,
    batch_size: usize,
) -> RecoveryResult<Search> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;
    debug!(threads = pool.current_num_threads(), batch_size, "parallel search");

    let batch_size = batch_size.max(1);
    let mut combinations = Combinations::new(shares.len(), k);
    let mut search = Search::new(shares.len());

    loop {
        let batch: Vec<Vec<usize>> = combinations.by_ref().take(batch_size).collect();
        if batch.is_empty() {
            return Ok(search);
        }
        trace!(len = batch.len(), "evaluating batch");

        let evaluations: Vec<_> = pool.install(|| {
            batch
                .par_iter()
                .map(|subset| evaluate_subset(shares, subset))
                .collect()
        });

        for evaluation in evaluations {
            if search.record(evaluation?) == Step::Complete {
                return Ok(search);
            }
        }
    }
}
