// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Lagrange interpolation in exact rational arithmetic.

use crate::errors::PolynomialResult;
use crate::rational::Rational;
use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Evaluates the unique polynomial of degree `< k` through `k` points.
///
/// Construction computes the part of each basis polynomial that does not
/// depend on the evaluation point, `yᵢ / Πⱼ≠ᵢ (xᵢ − xⱼ)`, so that the same
/// basis can be evaluated at many points:
///
/// `f(x₀) = Σᵢ yᵢ · Πⱼ≠ᵢ (x₀ − xⱼ) / (xᵢ − xⱼ)`
#[derive(Debug, Clone)]
pub struct Interpolator<'a> {
    xs: Vec<&'a BigInt>,
    weights: Vec<Rational>,
}

impl<'a> Interpolator<'a> {
    /// Builds the interpolation basis for `points`.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::DivisionByZero` if two points share an
    /// x-coordinate.
    pub fn new<I>(points: I) -> PolynomialResult<Self>
    where
        I: IntoIterator<Item = (&'a BigInt, &'a BigInt)>,
    {
        let (xs, ys): (Vec<&BigInt>, Vec<&BigInt>) = points.into_iter().unzip();

        let weights = xs
            .iter()
            .zip(&ys)
            .enumerate()
            .map(|(i, (xi, yi))| {
                let denominator = xs
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .fold(BigInt::one(), |acc, (_, xj)| acc * (*xi - *xj));
                Rational::from(*yi).checked_div(&Rational::from(denominator))
            })
            .collect::<PolynomialResult<Vec<_>>>()?;

        Ok(Self { xs, weights })
    }

    /// Number of points in the basis.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Evaluates the interpolating polynomial at `x0`.
    pub fn evaluate(&self, x0: &BigInt) -> Rational {
        self.weights
            .iter()
            .enumerate()
            .fold(Rational::zero(), |sum, (i, weight)| {
                let numerator = self
                    .xs
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .fold(BigInt::one(), |acc, (_, xj)| acc * (x0 - *xj));
                &sum + &(weight * &Rational::from_integer(numerator))
            })
    }
}

/// Evaluates the polynomial through `points` at `x0`.
///
/// # Errors
///
/// Returns `PolynomialError::DivisionByZero` if two points share an
/// x-coordinate.
pub fn interpolate_at(points: &[(BigInt, BigInt)], x0: &BigInt) -> PolynomialResult<Rational> {
    let interpolator = Interpolator::new(points.iter().map(|(x, y)| (x, y)))?;
    Ok(interpolator.evaluate(x0))
}
