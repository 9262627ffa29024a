//! Cart Aggregate
//!
//! Request and priced-summary shapes for a single pricing pass. Nothing here is
//! persisted; a summary is rebuilt on every call.

use serde::{Deserialize, Serialize};
use crate::domain::advisories::Advisory;
use crate::domain::aggregates::catalog::{CatalogProduct, CatalogVariant, ProductId, VariantId};
use crate::domain::aggregates::coupon::DiscountType;
use crate::domain::value_objects::{Money, Quantity};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub product_id: ProductId,
    pub variant_id: VariantId,
    pub quantity: Quantity,
}

/// Validated input for one pricing pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CartRequest {
    pub items: Vec<LineItemRequest>,
    pub coupon_code: Option<String>,
    pub pincode: Option<String>,
}

impl CartRequest {
    pub fn new(items: Vec<LineItemRequest>) -> Self { Self { items, ..Self::default() } }
    pub fn with_coupon(mut self, code: impl Into<String>) -> Self { self.coupon_code = Some(code.into()); self }
    pub fn with_pincode(mut self, pincode: impl Into<String>) -> Self { self.pincode = Some(pincode.into()); self }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLineItem {
    pub product_id: ProductId,
    pub variant_id: VariantId,
    pub name: String,
    pub variant_name: String,
    pub unit_price: Money,
    pub quantity: Quantity,
    pub total: Money,
}

impl PricedLineItem {
    pub fn price(product: &CatalogProduct, variant: &CatalogVariant, quantity: Quantity) -> Self {
        let unit_price = variant.unit_price();
        Self {
            product_id: product.id, variant_id: variant.id,
            name: product.name.clone(), variant_name: variant.name.clone(),
            unit_price, quantity, total: unit_price.multiply(quantity.value()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CouponDetails {
    pub code: String,
    pub discount: Money,
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub shipping: Money,
    pub final_total: Money,
    pub line_items: Vec<PricedLineItem>,
    pub coupon: Option<CouponDetails>,
    pub messages: Vec<Advisory>,
}

impl CartSummary {
    /// Tax is not computed and is always zero.
    pub fn assemble(
        line_items: Vec<PricedLineItem>, subtotal: Money, coupon: Option<CouponDetails>,
        shipping: Money, messages: Vec<Advisory>,
    ) -> Self {
        let discount = coupon.as_ref().map_or(Money::ZERO, |c| c.discount);
        let tax = Money::ZERO;
        Self { subtotal, discount, tax, shipping, final_total: subtotal + tax + shipping - discount, line_items, coupon, messages }
    }
}
