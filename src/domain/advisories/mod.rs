//! Advisory conditions raised while pricing a cart.
//!
//! None of these abort pricing; they travel back to the caller in the
//! `messages` list, serialized as plain strings.

use serde::{Serialize, Serializer};
use std::fmt;
use crate::domain::aggregates::catalog::{ProductId, VariantId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advisory {
    ProductUnavailable { product_id: ProductId },
    VariantNotFound { variant_id: VariantId },
    InsufficientStock { product_name: String, variant_name: String, available: u32 },
    CouponInvalid { code: String },
    CouponNotApplicable { code: String },
    PincodeUnrecognized { pincode: String },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProductUnavailable { product_id } => write!(f, "Product ID {product_id} not found/unavailable."),
            Self::VariantNotFound { variant_id } => write!(f, "Variant ID {variant_id} not found."),
            Self::InsufficientStock { product_name, variant_name, available } => {
                write!(f, "Insufficient stock for {product_name} ({variant_name}). Available: {available}")
            }
            Self::CouponInvalid { code } => write!(f, "Coupon '{code}' invalid or expired."),
            Self::CouponNotApplicable { code } => write!(f, "Coupon '{code}' is not applicable."),
            Self::PincodeUnrecognized { pincode } => {
                write!(f, "Pincode {pincode} not found in specific rules. using standard rates.")
            }
        }
    }
}

impl Serialize for Advisory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Advisory::ProductUnavailable { product_id: 7 }.to_string(), "Product ID 7 not found/unavailable.");
        assert_eq!(Advisory::VariantNotFound { variant_id: 702 }.to_string(), "Variant ID 702 not found.");
        assert_eq!(
            Advisory::InsufficientStock { product_name: "Garam Masala".into(), variant_name: "100g".into(), available: 2 }.to_string(),
            "Insufficient stock for Garam Masala (100g). Available: 2"
        );
        assert_eq!(Advisory::CouponInvalid { code: "X".into() }.to_string(), "Coupon 'X' invalid or expired.");
        assert_eq!(Advisory::CouponNotApplicable { code: "X".into() }.to_string(), "Coupon 'X' is not applicable.");
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_value(Advisory::PincodeUnrecognized { pincode: "000000".into() }).unwrap();
        assert_eq!(json, serde_json::json!("Pincode 000000 not found in specific rules. using standard rates."));
    }
}
