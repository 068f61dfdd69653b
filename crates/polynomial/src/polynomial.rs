// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Dense integer polynomials.

use crate::errors::{PolynomialError, PolynomialResult};
use num_bigint::{BigInt, RandBigInt};
use num_traits::{One, Signed, Zero};
use rand::Rng;
use std::fmt;

/// A polynomial represented by its coefficients in descending order of degree.
///
/// The polynomial is represented as:
/// `a_n * x^n + a_{n-1} * x^{n-1} + ... + a_1 * x + a_0`
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    /// Coefficients in descending order (highest degree first).
    pub(crate) coefficients: Vec<BigInt>,
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, coeff) in self.coefficients.iter().enumerate() {
            let degree = self.coefficients.len() - 1 - i;

            if coeff.is_zero() {
                continue;
            }

            if !first {
                if coeff.is_positive() {
                    write!(f, " + ")?;
                } else {
                    write!(f, " - ")?;
                }
            } else if coeff.is_negative() {
                write!(f, "-")?;
            }
            first = false;

            let abs_coeff = coeff.abs();
            if degree == 0 || !abs_coeff.is_one() {
                write!(f, "{abs_coeff}")?;
            }

            if degree > 0 {
                write!(f, "x")?;
                if degree > 1 {
                    write!(f, "^{degree}")?;
                }
            }
        }

        if first {
            write!(f, "0")?;
        }

        Ok(())
    }
}

impl Polynomial {
    /// Creates a new polynomial from a vector of coefficients.
    ///
    /// # Arguments
    ///
    /// * `coefficients` - Vector of coefficients in descending order of degree.
    pub fn new(coefficients: Vec<BigInt>) -> Self {
        Self { coefficients }
    }

    /// Creates a polynomial from coefficients in ascending order format.
    ///
    /// # Arguments
    ///
    /// * `ascending_coefficients` - Vector of coefficients in ascending order.
    pub fn from_ascending_coefficients(ascending_coefficients: Vec<BigInt>) -> Self {
        let mut coefficients = ascending_coefficients;
        coefficients.reverse();
        Self { coefficients }
    }

    /// Converts the polynomial to ascending order coefficient format.
    pub fn to_ascending_coefficients(&self) -> Vec<BigInt> {
        let mut coefficients = self.coefficients.clone();
        coefficients.reverse();
        coefficients
    }

    /// Creates a random polynomial of the given degree whose constant term is
    /// `constant`.
    ///
    /// The remaining coefficients are drawn uniformly from `[0, bound)`.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::InvalidPolynomial` if `bound` is not positive.
    pub fn random<R: Rng + ?Sized>(
        constant: BigInt,
        degree: usize,
        bound: &BigInt,
        rng: &mut R,
    ) -> PolynomialResult<Self> {
        if !bound.is_positive() {
            return Err(PolynomialError::InvalidPolynomial {
                message: format!("coefficient bound must be positive, got {bound}"),
            });
        }

        let zero = BigInt::zero();
        let mut ascending = Vec::with_capacity(degree + 1);
        ascending.push(constant);
        for _ in 0..degree {
            ascending.push(rng.gen_bigint_range(&zero, bound));
        }

        Ok(Self::from_ascending_coefficients(ascending))
    }

    /// Returns the coefficients of the polynomial.
    pub fn coefficients(&self) -> &[BigInt] {
        &self.coefficients
    }

    /// Returns the constant term, `f(0)`.
    pub fn constant_term(&self) -> BigInt {
        self.coefficients.last().cloned().unwrap_or_default()
    }

    /// Returns the degree of the polynomial.
    ///
    /// The degree of a zero polynomial is 0.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at a given point using Horner's method.
    pub fn evaluate(&self, x: &BigInt) -> BigInt {
        self.coefficients
            .iter()
            .fold(BigInt::zero(), |acc, coeff| acc * x + coeff)
    }
}
