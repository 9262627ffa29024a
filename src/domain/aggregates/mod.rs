//! Aggregates module
pub mod catalog;
pub mod coupon;
pub mod shipping;
pub mod cart;
pub mod stock;

pub use catalog::{CatalogIndex, CatalogProduct, CatalogVariant, ProductId, VariantId};
pub use coupon::{Coupon, CouponRejection, CouponValidation, DiscountType};
pub use shipping::{DeliveryDetails, PincodeCheck, ServiceablePincode, ShippingRate};
pub use cart::{CartRequest, CartSummary, CouponDetails, LineItemRequest, PricedLineItem};
pub use stock::{StockIssue, StockProblem, StockValidation};
