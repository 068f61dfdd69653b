// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Robust reconstruction of Shamir-shared integer secrets.
//!
//! Given `n` shares of a degree `k - 1` polynomial, some of which may be
//! corrupted or forged, this crate finds the secret `f(0)` that the largest
//! number of shares agree with and reports which shares are consistent with it.
//!
//! The search trusts no share in advance: every `k`-subset is tried as a basis,
//! which costs `C(n, k)` interpolations in the worst case. It is intended for
//! tens of shares, not thousands.
//!
//! ## Example
//!
//! ```
//! use ssa_shares::{SearchStrategy, ShareRecord, ShareSet, Threshold};
//!
//! let records = vec![
//!     ShareRecord::new(1, 10, "6"),
//!     ShareRecord::new(2, 10, "15"),
//!     ShareRecord::new(3, 10, "28"),
//!     ShareRecord::new(4, 10, "999"),
//! ];
//! let set = ShareSet::from_records(Threshold::new(4, 3)?, records)?;
//! let result = set.reconstruct(SearchStrategy::Sequential)?;
//!
//! assert_eq!(result.secret.to_string(), "1");
//! assert_eq!(result.consistent, vec![1, 2, 3]);
//! assert_eq!(result.inconsistent, vec![4]);
//! # Ok::<(), ssa_shares::RecoveryError>(())
//! ```

pub mod combinations;
pub mod dealer;
pub mod errors;
pub mod input;
mod parallel;
pub mod radix;
pub mod share;
pub mod solver;

pub use combinations::{binomial, Combinations};
pub use dealer::{corrupt, deal};
pub use errors::{RecoveryError, RecoveryResult};
pub use input::{parse_cases, TestCase};
pub use radix::{encode_radix, parse_radix};
pub use share::{Share, ShareRecord, ShareSet, Threshold};
pub use solver::{
    evaluate_subset, Candidate, ConsistencySolver, Reconstruction, SearchStrategy,
    DEFAULT_BATCH_SIZE, DEFAULT_WARN_CANDIDATES,
};
