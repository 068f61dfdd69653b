// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for rational and polynomial operations.

use thiserror::Error;

/// Errors that can occur during rational arithmetic and interpolation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolynomialError {
    /// A fraction was constructed with a zero denominator
    #[error("Fraction denominator cannot be zero")]
    ZeroDenominator,

    /// Division by a fraction whose value is zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Invalid polynomial parameters
    #[error("Invalid polynomial: {message}")]
    InvalidPolynomial { message: String },
}

/// Result type alias for polynomial operations
pub type PolynomialResult<T> = Result<T, PolynomialError>;
