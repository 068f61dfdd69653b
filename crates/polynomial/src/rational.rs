// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Normalized fractions over arbitrary precision integers.

use crate::errors::{PolynomialError, PolynomialResult};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A fraction `numerator / denominator` in canonical form.
///
/// Every value satisfies `denominator > 0` and
/// `gcd(|numerator|, denominator) = 1`. Because the representation is unique,
/// structural equality is numeric equality and `denominator == 1` is an exact
/// integrality test.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    numerator: BigInt,
    denominator: BigInt,
}

impl Rational {
    /// Creates a fraction reduced to lowest terms.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::ZeroDenominator` if `denominator` is zero.
    pub fn new(numerator: BigInt, denominator: BigInt) -> PolynomialResult<Self> {
        if denominator.is_zero() {
            return Err(PolynomialError::ZeroDenominator);
        }
        Ok(Self::reduce(numerator, denominator))
    }

    /// Lifts an integer to a fraction with denominator one.
    pub fn from_integer(value: BigInt) -> Self {
        Self {
            numerator: value,
            denominator: BigInt::one(),
        }
    }

    // Callers guarantee a nonzero denominator.
    fn reduce(mut numerator: BigInt, mut denominator: BigInt) -> Self {
        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }

        // gcd(0, d) = d, so zero normalizes to 0/1
        let divisor = numerator.gcd(&denominator);
        if !divisor.is_one() {
            numerator /= &divisor;
            denominator /= &divisor;
        }

        Self {
            numerator,
            denominator,
        }
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// True when the value is an exact integer.
    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    /// Returns the integer value, or `None` if the fraction is not integral.
    pub fn to_integer(&self) -> Option<BigInt> {
        self.is_integer().then(|| self.numerator.clone())
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Returns `1 / self`.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::DivisionByZero` if `self` is zero.
    pub fn recip(&self) -> PolynomialResult<Self> {
        if self.is_zero() {
            return Err(PolynomialError::DivisionByZero);
        }
        Ok(Self::reduce(
            self.denominator.clone(),
            self.numerator.clone(),
        ))
    }

    /// Divides `self` by `divisor`.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::DivisionByZero` if `divisor` is zero.
    pub fn checked_div(&self, divisor: &Self) -> PolynomialResult<Self> {
        Ok(self * &divisor.recip()?)
    }
}

impl From<BigInt> for Rational {
    fn from(value: BigInt) -> Self {
        Self::from_integer(value)
    }
}

impl From<&BigInt> for Rational {
    fn from(value: &BigInt) -> Self {
        Self::from_integer(value.clone())
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::from_integer(BigInt::from(value))
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self::from_integer(BigInt::zero())
    }

    fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self::from_integer(BigInt::one())
    }
}

impl<'a> Add<&'a Rational> for &'a Rational {
    type Output = Rational;

    fn add(self, other: &'a Rational) -> Rational {
        Rational::reduce(
            &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            &self.denominator * &other.denominator,
        )
    }
}

impl<'a> Sub<&'a Rational> for &'a Rational {
    type Output = Rational;

    fn sub(self, other: &'a Rational) -> Rational {
        Rational::reduce(
            &self.numerator * &other.denominator - &other.numerator * &self.denominator,
            &self.denominator * &other.denominator,
        )
    }
}

impl<'a> Mul<&'a Rational> for &'a Rational {
    type Output = Rational;

    fn mul(self, other: &'a Rational) -> Rational {
        Rational::reduce(
            &self.numerator * &other.numerator,
            &self.denominator * &other.denominator,
        )
    }
}

impl Add for Rational {
    type Output = Rational;

    fn add(self, other: Rational) -> Rational {
        &self + &other
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, other: Rational) -> Rational {
        &self - &other
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, other: Rational) -> Rational {
        &self * &other
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn frac(n: i64, d: i64) -> Rational {
        Rational::new(BigInt::from(n), BigInt::from(d)).unwrap()
    }

    fn is_canonical(r: &Rational) -> bool {
        r.denominator().is_positive() && r.numerator().gcd(r.denominator()).is_one()
    }

    #[test]
    fn test_zero_denominator_rejected() {
        assert_eq!(
            Rational::new(BigInt::from(3), BigInt::zero()),
            Err(PolynomialError::ZeroDenominator)
        );
    }

    #[test]
    fn test_normalization() {
        let r = frac(6, -4);
        assert_eq!(r.numerator(), &BigInt::from(-3));
        assert_eq!(r.denominator(), &BigInt::from(2));

        let zero = frac(0, -17);
        assert_eq!(zero, Rational::zero());
        assert!(zero.is_integer());

        assert_eq!(frac(-8, -2), Rational::from(4));
    }

    #[test]
    fn test_arithmetic() {
        let half = frac(1, 2);
        let third = frac(1, 3);

        assert_eq!(&half + &third, frac(5, 6));
        assert_eq!(&half - &third, frac(1, 6));
        assert_eq!(&half * &third, frac(1, 6));
        assert_eq!(half.checked_div(&third).unwrap(), frac(3, 2));
        assert_eq!(&half + &half, Rational::one());
        assert_eq!(-half.clone(), frac(-1, 2));
    }

    #[test]
    fn test_division_by_zero() {
        let half = frac(1, 2);
        assert_eq!(
            half.checked_div(&Rational::zero()),
            Err(PolynomialError::DivisionByZero)
        );
        assert_eq!(Rational::zero().recip(), Err(PolynomialError::DivisionByZero));
    }

    #[test]
    fn test_integrality() {
        assert_eq!(frac(10, 5).to_integer(), Some(BigInt::from(2)));
        assert_eq!(frac(10, 4).to_integer(), None);
        assert!(!frac(7, 3).is_integer());
    }

    #[test]
    fn test_display() {
        assert_eq!(frac(-9, 6).to_string(), "-3/2");
        assert_eq!(frac(12, 4).to_string(), "3");
    }

    proptest! {
        #[test]
        fn scaling_does_not_change_value(
            a in -10_000i64..10_000,
            b in (1i64..10_000).prop_flat_map(|b| prop_oneof![Just(b), Just(-b)]),
            m in (1i64..1_000).prop_flat_map(|m| prop_oneof![Just(m), Just(-m)]),
        ) {
            let direct = frac(a, b);
            let scaled = frac(a * m, b * m);
            prop_assert_eq!(direct, scaled);
        }

        #[test]
        fn every_result_is_canonical(
            a in -1_000i64..1_000, b in 1i64..1_000,
            c in -1_000i64..1_000, d in 1i64..1_000,
        ) {
            let x = frac(a, b);
            let y = frac(c, -d);
            prop_assert!(is_canonical(&x));
            prop_assert!(is_canonical(&y));
            prop_assert!(is_canonical(&(&x + &y)));
            prop_assert!(is_canonical(&(&x - &y)));
            prop_assert!(is_canonical(&(&x * &y)));
            if let Ok(q) = x.checked_div(&y) {
                prop_assert!(is_canonical(&q));
            }
        }
    }
}
