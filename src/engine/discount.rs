//! Coupon stage

use chrono::{DateTime, Utc};
use crate::domain::advisories::Advisory;
use crate::domain::aggregates::{Coupon, CouponDetails};
use crate::domain::value_objects::Money;

/// Applies `coupon` (the lookup result for `code`) to `subtotal`. Every
/// rejection reason collapses into a single "not applicable" advisory.
pub(crate) fn apply_coupon(
    code: &str, coupon: Option<Coupon>, subtotal: Money, now: DateTime<Utc>, advisories: &mut Vec<Advisory>,
) -> Option<CouponDetails> {
    let Some(coupon) = coupon else {
        advisories.push(Advisory::CouponInvalid { code: code.to_string() });
        return None;
    };
    if let Err(reason) = coupon.check_eligibility(subtotal, now) {
        tracing::debug!(code, %reason, "coupon rejected");
        advisories.push(Advisory::CouponNotApplicable { code: code.to_string() });
        return None;
    }
    let discount = coupon.discount_for(subtotal);
    Some(CouponDetails { code: coupon.code, discount, discount_type: coupon.discount_type })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::DiscountType;
    use rust_decimal::Decimal;

    fn percent_coupon() -> Coupon {
        Coupon {
            code: "FEST20".into(), discount_type: DiscountType::Percentage, discount_value: Decimal::from(20),
            max_discount_amount: Some(Money::from_major(300)), min_order_value: Some(Money::from_major(500)),
            start_date: None, end_date: None, usage_limit: None, usage_count: 0, is_active: true,
        }
    }

    #[test]
    fn test_missing_coupon() {
        let mut advisories = vec![];
        assert!(apply_coupon("NOPE", None, Money::from_major(100), Utc::now(), &mut advisories).is_none());
        assert_eq!(advisories, vec![Advisory::CouponInvalid { code: "NOPE".into() }]);
    }

    #[test]
    fn test_below_minimum_is_not_applicable() {
        let mut advisories = vec![];
        assert!(apply_coupon("FEST20", Some(percent_coupon()), Money::from_major(499), Utc::now(), &mut advisories).is_none());
        assert_eq!(advisories, vec![Advisory::CouponNotApplicable { code: "FEST20".into() }]);
    }

    #[test]
    fn test_capped_percentage() {
        let mut advisories = vec![];
        let details = apply_coupon("FEST20", Some(percent_coupon()), Money::from_major(2000), Utc::now(), &mut advisories).unwrap();
        assert_eq!(details.discount, Money::from_major(300));
        assert_eq!(details.discount_type, DiscountType::Percentage);
        assert!(advisories.is_empty());
    }
}
