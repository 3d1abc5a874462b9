//! Fixed-point money type
//!
//! Every amount the ledger touches is a [`Money`]: a decimal held at exactly
//! two fractional digits. Values are normalized on construction and after
//! every arithmetic operation using round-half-away-from-zero, so two amounts
//! that compare equal are equal to the cent and never differ by binary
//! floating-point residue.

use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::types::{LedgerError, LedgerResult};

/// Number of fractional digits carried by every amount
pub const MONEY_SCALE: i64 = 2;

/// Most integer digits accepted from parsed or deserialized input
pub const MAX_INTEGER_DIGITS: i64 = 30;

/// Most fractional digits accepted from parsed or deserialized input
pub const MAX_INPUT_SCALE: i64 = 30;

/// Monetary amount with exactly two decimal places
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "BigDecimal", into = "BigDecimal")]
pub struct Money(BigDecimal);

impl Money {
    fn rounded(value: BigDecimal) -> Self {
        Self(value.with_scale_round(MONEY_SCALE, RoundingMode::HalfUp))
    }

    /// Create an amount from an arbitrary decimal, rounding to cents.
    ///
    /// Rejects values with more than [`MAX_INTEGER_DIGITS`] integer digits or
    /// more than [`MAX_INPUT_SCALE`] fractional digits. The check runs before
    /// rounding, so an input like `1e2000000` is refused without expanding it.
    pub fn new(value: BigDecimal) -> LedgerResult<Self> {
        let (_, scale) = value.as_bigint_and_exponent();
        let integer_digits = value.digits() as i64 - scale;
        if integer_digits > MAX_INTEGER_DIGITS || scale > MAX_INPUT_SCALE {
            return Err(LedgerError::InvalidDecimal(format!(
                "amount out of range: {integer_digits} integer digits, scale {scale}"
            )));
        }
        Ok(Self::rounded(value))
    }

    /// The zero amount
    pub fn zero() -> Self {
        Self::rounded(BigDecimal::from(0))
    }

    /// Create an amount from a whole number of cents
    pub fn from_cents(cents: i64) -> Self {
        Self::rounded(BigDecimal::from(cents) / BigDecimal::from(100))
    }

    /// Create an amount from a float.
    ///
    /// The float goes through its shortest round-trip decimal text, so `0.1`
    /// becomes exactly `0.10` rather than the nearest binary fraction.
    pub fn from_f64(value: f64) -> LedgerResult<Self> {
        if !value.is_finite() {
            return Err(LedgerError::InvalidDecimal(value.to_string()));
        }
        value.to_string().parse()
    }

    /// Borrow the underlying decimal
    pub fn as_bigdecimal(&self) -> &BigDecimal {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == BigDecimal::from(0)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > BigDecimal::from(0)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < BigDecimal::from(0)
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Divide, rounding the quotient half away from zero to cents
    pub fn checked_div(&self, divisor: &Money) -> LedgerResult<Money> {
        if divisor.is_zero() {
            return Err(LedgerError::DivisionByZero);
        }
        Ok(Self::rounded(&self.0 / &divisor.0))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<BigDecimal> for Money {
    type Error = LedgerError;

    fn try_from(value: BigDecimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for BigDecimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self::rounded(BigDecimal::from(value))
    }
}

impl TryFrom<f64> for Money {
    type Error = LedgerError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl FromStr for Money {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = BigDecimal::from_str(s.trim())
            .map_err(|e| LedgerError::InvalidDecimal(format!("{s}: {e}")))?;
        Self::new(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.to_string())
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        &self + &rhs
    }
}

impl<'a> Add<&'a Money> for &'a Money {
    type Output = Money;

    fn add(self, rhs: &'a Money) -> Money {
        Money::rounded(&self.0 + &rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        &self - &rhs
    }
}

impl<'a> Sub<&'a Money> for &'a Money {
    type Output = Money;

    fn sub(self, rhs: &'a Money) -> Money {
        Money::rounded(&self.0 - &rhs.0)
    }
}

impl Mul for Money {
    type Output = Money;

    fn mul(self, rhs: Money) -> Money {
        &self * &rhs
    }
}

impl<'a> Mul<&'a Money> for &'a Money {
    type Output = Money;

    fn mul(self, rhs: &'a Money) -> Money {
        Money::rounded(&self.0 * &rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Neg for &Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0.clone())
    }
}

impl AddAssign<&Money> for Money {
    fn add_assign(&mut self, rhs: &Money) {
        *self = &*self + rhs;
    }
}

impl SubAssign<&Money> for Money {
    fn sub_assign(&mut self, rhs: &Money) {
        *self = &*self - rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| &acc + &m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| &acc + m)
    }
}
