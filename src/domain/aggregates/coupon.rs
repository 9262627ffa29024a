//! Coupon Aggregate
//!
//! Eligibility and discount rules shared by cart pricing and the standalone
//! coupon check.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use crate::domain::value_objects::Money;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType { Percentage, Fixed }

impl DiscountType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "percentage" => Some(Self::Percentage),
            "fixed" => Some(Self::Fixed),
            _ => None,
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::Percentage => write!(f, "percentage"), Self::Fixed => write!(f, "fixed") }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub code: String,
    pub discount_type: DiscountType,
    /// Percent for `Percentage`, currency amount for `Fixed`.
    pub discount_value: Decimal,
    pub max_discount_amount: Option<Money>,
    pub min_order_value: Option<Money>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub usage_limit: Option<u32>,
    pub usage_count: u32,
    pub is_active: bool,
}

/// Why a stored coupon cannot be used for a given order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CouponRejection {
    Inactive,
    NotYetActive,
    Expired,
    UsageLimitReached,
    BelowMinimumOrder { minimum: Money },
}

impl std::error::Error for CouponRejection {}
impl fmt::Display for CouponRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => write!(f, "Invalid or expired coupon"),
            Self::NotYetActive => write!(f, "Coupon not yet active"),
            Self::Expired => write!(f, "Coupon expired"),
            Self::UsageLimitReached => write!(f, "Coupon usage limit reached"),
            Self::BelowMinimumOrder { minimum } => write!(f, "Minimum order value of ₹{minimum} required"),
        }
    }
}

impl Coupon {
    pub fn check_eligibility(&self, order_value: Money, now: DateTime<Utc>) -> Result<(), CouponRejection> {
        if !self.is_active { return Err(CouponRejection::Inactive); }
        if self.start_date.is_some_and(|start| now < start) { return Err(CouponRejection::NotYetActive); }
        if self.end_date.is_some_and(|end| now > end) { return Err(CouponRejection::Expired); }
        if self.usage_limit.is_some_and(|limit| self.usage_count >= limit) { return Err(CouponRejection::UsageLimitReached); }
        if let Some(minimum) = self.min_order_value {
            if order_value < minimum { return Err(CouponRejection::BelowMinimumOrder { minimum }); }
        }
        Ok(())
    }

    /// Discount this coupon grants on `order_value`. Never exceeds the order
    /// value and never goes below zero.
    pub fn discount_for(&self, order_value: Money) -> Money {
        let raw = match self.discount_type {
            DiscountType::Percentage => {
                let pct = order_value.percentage(self.discount_value);
                self.max_discount_amount.map_or(pct, |cap| pct.min(cap))
            }
            DiscountType::Fixed => Money::new(self.discount_value),
        };
        if raw.is_negative() { return Money::ZERO; }
        raw.min(order_value.max(Money::ZERO))
    }
}

/// Outcome of the standalone coupon check.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    pub message: String,
}

impl CouponValidation {
    pub fn applied(coupon: &Coupon, discount: Money) -> Self {
        Self {
            valid: true, code: Some(coupon.code.clone()), discount: Some(discount),
            discount_type: Some(coupon.discount_type), message: "Coupon applied successfully".to_string(),
        }
    }

    pub fn rejected(reason: &CouponRejection) -> Self {
        Self { valid: false, code: None, discount: None, discount_type: None, message: reason.to_string() }
    }
}
