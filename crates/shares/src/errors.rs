// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for share decoding and secret reconstruction.

use ssa_polynomial::PolynomialError;
use thiserror::Error;

/// Main error type for a single reconstruction attempt.
///
/// Every variant is a deterministic function of the input, so none of them
/// are worth retrying.
#[derive(Error, Debug)]
pub enum RecoveryError {
    /// A value string contains a character outside its declared base
    #[error("Invalid digit '{character}' for base {base}")]
    InvalidDigit { character: char, base: u32 },

    /// Declared base is outside 2..=36
    #[error("Invalid base {base}: must be between 2 and 36")]
    InvalidBase { base: u32 },

    /// A value string is empty after trimming
    #[error("Share value is empty")]
    EmptyValue,

    /// A negative value cannot be written in the share encoding
    #[error("Share value is negative")]
    NegativeValue,

    /// Threshold parameters are inconsistent
    #[error("Invalid threshold: k ({k}) must satisfy 1 <= k <= n ({n})")]
    InvalidThreshold { n: usize, k: usize },

    /// The number of supplied shares differs from the declared `n`
    #[error("Expected {expected} shares, found {actual}")]
    ShareCountMismatch { expected: usize, actual: usize },

    /// Two shares declare the same index
    #[error("Duplicate share index {idx}")]
    DuplicateIndex { idx: u64 },

    /// A share key is not a non-negative integer
    #[error("Invalid share index '{key}'")]
    InvalidIndex { key: String },

    /// A numeric field holds something other than a non-negative integer
    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidNumber { field: &'static str, value: String },

    /// The reserved threshold entry is absent
    #[error("Missing threshold entry 'keys'")]
    MissingThreshold,

    /// An error attributable to one specific share
    #[error("Share {idx}: {source}")]
    Share {
        idx: u64,
        #[source]
        source: Box<RecoveryError>,
    },

    /// No k-subset interpolates to an integer secret
    #[error("No consistent reconstruction: no {k}-subset of the {n} shares yields an integer secret")]
    NoConsistentReconstruction { n: usize, k: usize },

    /// Rational arithmetic failure (zero denominator, division by zero)
    #[error(transparent)]
    Polynomial(#[from] PolynomialError),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The worker pool for the parallel search could not be built
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type alias for reconstruction operations
pub type RecoveryResult<T> = Result<T, RecoveryError>;

impl RecoveryError {
    /// Attaches the declared index of the share that caused `self`.
    pub fn for_share(self, idx: u64) -> Self {
        RecoveryError::Share {
            idx,
            source: Box::new(self),
        }
    }
}
