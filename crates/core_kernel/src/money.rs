//! Amounts in reais and percentage rates
//!
//! Every value a court calculation produces is denominated in BRL, so
//! [`Money`] is a plain decimal amount with no currency tag to reconcile.
//!
//! `Money` keeps the full precision of every intermediate result.
//! Restatements compound over hundreds of months, and when (and whether) to
//! round is a calculation policy, so rounding only happens through the
//! explicit `round_*` methods.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Decimal places of a centavo-precise amount
pub const CENTAVO_PLACES: u32 = 2;

/// An amount in Brazilian reais
///
/// Serialized as the bare decimal string (`"10536.53"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates an amount in reais without rounding it
    pub fn brl(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates an amount from whole centavos
    pub fn from_centavos(centavos: i64) -> Self {
        Self(Decimal::new(centavos, CENTAVO_PLACES))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds half away from zero ("arredondamento para cima" in the
    /// calculation manuals)
    pub fn round_half_up(&self, dp: u32) -> Self {
        Self(self.0.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Rounds to centavos, half away from zero
    pub fn round_to_centavos(&self) -> Self {
        self.round_half_up(CENTAVO_PLACES)
    }

    /// Multiplies by a correction or interest factor
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self(self.0 * factor)
    }

    /// Ratio of this amount to `base`, `None` when the base is zero
    ///
    /// Used to express accrued interest as a factor of the principal.
    pub fn ratio_to(&self, base: &Money) -> Option<Decimal> {
        if base.0.is_zero() {
            None
        } else {
            Some(self.0 / base.0)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        self.multiply(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// A rate held as a decimal fraction (0.005 for 0.5 %)
///
/// Economic series are published as percentages ("0.5" meaning 0.5 %), tariff
/// tables as fractions ("0.01" meaning 1 %). `Rate` normalises both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    /// Creates a rate from a fraction (0.05 for 5 %)
    pub fn new(fraction: Decimal) -> Self {
        Self(fraction)
    }

    /// Creates a rate from a published percentage (5.0 for 5 %)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self(percentage / dec!(100))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * dec!(100)
    }

    /// `1 + rate`, the multiplier one period at this rate applies
    pub fn growth_factor(&self) -> Decimal {
        Decimal::ONE + self.0
    }

    /// The share of `base` this rate represents (one period of interest)
    pub fn apply(&self, base: &Money) -> Money {
        base.multiply(self.0)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}%", self.as_percentage().round_dp(4))
    }
}
