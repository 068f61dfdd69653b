// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! # Polynomial Library
//!
//! Exact arithmetic over the rationals for reconstructing secrets from
//! integer Shamir shares.
//!
//! ## Features
//!
//! - Uses `num-bigint` for every integer, so no value ever overflows.
//! - [`Rational`]: a fraction that is kept in lowest terms with a positive
//!   denominator after every operation, making integrality an exact check.
//! - [`Interpolator`]: Lagrange evaluation of the unique polynomial through a
//!   set of points, carried out entirely in [`Rational`] arithmetic.
//! - [`Polynomial`]: a dense integer polynomial used to deal shares.
//!
//! ## Mathematical Background
//!
//! Given `k` points with distinct x-coordinates there is exactly one polynomial
//! of degree `< k` through them. Its value at `x₀` is
//!
//! `f(x₀) = Σᵢ yᵢ · Πⱼ≠ᵢ (x₀ − xⱼ) / (xᵢ − xⱼ)`
//!
//! No floating point is involved, so `f(0)` is an integer exactly when its
//! reduced denominator is one.

pub mod errors;
pub mod lagrange;
pub mod polynomial;
pub mod rational;

pub use errors::{PolynomialError, PolynomialResult};
pub use lagrange::{interpolate_at, Interpolator};
pub use polynomial::Polynomial;
pub use rational::Rational;
