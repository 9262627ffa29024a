//! Value Objects for cart pricing

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// Money value object. Single-currency store, so only the amount is carried.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self { Self(amount) }
    pub fn from_major(amount: i64) -> Self { Self(Decimal::from(amount)) }
    pub fn amount(&self) -> Decimal { self.0 }
    pub fn is_negative(&self) -> bool { self.0.is_sign_negative() && !self.0.is_zero() }

    pub fn multiply(&self, qty: u32) -> Money { Money(self.0 * Decimal::from(qty)) }

    /// `rate` percent of this amount, unrounded.
    pub fn percentage(&self, rate: Decimal) -> Money { Money(self.0 * rate / Decimal::ONE_HUNDRED) }

    pub fn min(self, other: Money) -> Money { if other < self { other } else { self } }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0.normalize()) }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money { Money(self.0 + rhs.0) }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money { Money(self.0 - rhs.0) }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) { self.0 += rhs.0; }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money { iter.fold(Money::ZERO, Add::add) }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self { Self(amount) }
}

/// Quantity value object. A cart line always asks for at least one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value < 1 { return Err(QuantityError::NotPositive(value)); }
        u32::try_from(value).map(Self).map_err(|_| QuantityError::TooLarge(value))
    }
    pub fn value(&self) -> u32 { self.0 }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;
    fn try_from(value: i64) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> u32 { q.0 }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum QuantityError { NotPositive(i64), TooLarge(i64) }
impl std::error::Error for QuantityError {}
impl fmt::Display for QuantityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive(v) => write!(f, "quantity must be at least 1, got {v}"),
            Self::TooLarge(v) => write!(f, "quantity {v} is too large"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_major(100);
        let b = Money::from_major(50);
        assert_eq!(a + b, Money::from_major(150));
        assert_eq!(a - b, Money::from_major(50));
        assert_eq!(b.multiply(3), Money::from_major(150));
        assert_eq!(vec![a, b, b].into_iter().sum::<Money>(), Money::from_major(200));
    }

    #[test]
    fn test_percentage_keeps_full_precision() {
        assert_eq!(Money::from_major(2000).percentage(Decimal::from(20)), Money::from_major(400));
        let d = Money::from_major(333).percentage(Decimal::new(125, 1));
        assert_eq!(d.amount(), Decimal::new(41625, 3));
    }

    #[test]
    fn test_money_min() {
        assert_eq!(Money::from_major(10).min(Money::from_major(3)), Money::from_major(3));
        assert_eq!(Money::from_major(3).min(Money::from_major(10)), Money::from_major(3));
    }

    #[test]
    fn test_quantity_must_be_positive() {
        assert_eq!(Quantity::new(2).unwrap().value(), 2);
        assert_eq!(Quantity::new(0), Err(QuantityError::NotPositive(0)));
        assert_eq!(Quantity::new(-4), Err(QuantityError::NotPositive(-4)));
        assert!(Quantity::new(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_money_serializes_as_number() {
        let json = serde_json::to_value(Money::from_major(550)).unwrap();
        assert_eq!(json.as_f64(), Some(550.0));
        let back: Money = serde_json::from_value(serde_json::json!(12.5)).unwrap();
        assert_eq!(back.amount(), Decimal::new(125, 1));
    }
}
