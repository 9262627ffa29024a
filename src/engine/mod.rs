//! Cart pricing engine
//!
//! Prices a cart against a point-in-time snapshot of the catalog, coupon and
//! shipping tables. Read-only: it never reserves stock or counts coupon usage.

mod discount;
mod pricing;
mod shipping;

use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::Arc;
use crate::config::PricingConfig;
use crate::domain::aggregates::{
    CartRequest, CartSummary, CatalogIndex, CouponRejection, CouponValidation, LineItemRequest,
    PincodeCheck, ProductId, StockIssue, StockProblem, StockValidation,
};
use crate::domain::value_objects::Money;
use crate::store::PricingStore;
use crate::Result;

#[derive(Clone)]
pub struct PricingEngine {
    store: Arc<dyn PricingStore>,
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(store: Arc<dyn PricingStore>, config: PricingConfig) -> Self { Self { store, config } }

    /// Prices `request`. Product, variant, stock, coupon and pincode problems
    /// end up in `messages`; only lookup faults fail the call.
    #[tracing::instrument(skip_all, fields(items = request.items.len(), coupon = ?request.coupon_code, pincode = ?request.pincode))]
    pub async fn price_cart(&self, request: &CartRequest) -> Result<CartSummary> {
        let mut advisories = Vec::new();
        let catalog = self.load_catalog(&request.items).await?;
        let (line_items, subtotal) = pricing::price_lines(&request.items, &catalog, &mut advisories);

        // Both lookups only need the subtotal, which is known by now.
        let coupon_lookup = async {
            match request.coupon_code.as_deref() {
                Some(code) => self.store.fetch_active_coupon_by_code(code).await,
                None => Ok(None),
            }
        };
        let pincode_lookup = async {
            match request.pincode.as_deref() {
                Some(pincode) => self.store.fetch_pincode(pincode).await,
                None => Ok(None),
            }
        };
        let (coupon, pincode_record) = tokio::try_join!(coupon_lookup, pincode_lookup)?;

        let coupon = request.coupon_code.as_deref()
            .and_then(|code| discount::apply_coupon(code, coupon, subtotal, Utc::now(), &mut advisories));
        let shipping = shipping::shipping_charge(
            request.pincode.as_deref(), pincode_record.as_ref(), self.config.standard_rate(), subtotal, &mut advisories,
        );

        let summary = CartSummary::assemble(line_items, subtotal, coupon, shipping, advisories);
        tracing::info!(
            subtotal = %summary.subtotal, discount = %summary.discount, shipping = %summary.shipping,
            final_total = %summary.final_total, advisories = summary.messages.len(), "cart priced"
        );
        Ok(summary)
    }

    /// Standalone coupon check against a caller-supplied cart total. The
    /// caller is responsible for that total agreeing with `price_cart`.
    #[tracing::instrument(skip(self))]
    pub async fn validate_coupon(&self, code: &str, cart_total: Money) -> Result<CouponValidation> {
        let Some(coupon) = self.store.fetch_active_coupon_by_code(code).await? else {
            return Ok(CouponValidation::rejected(&CouponRejection::Inactive));
        };
        let validation = match coupon.check_eligibility(cart_total, Utc::now()) {
            Ok(()) => CouponValidation::applied(&coupon, coupon.discount_for(cart_total)),
            Err(reason) => CouponValidation::rejected(&reason),
        };
        tracing::debug!(valid = validation.valid, message = %validation.message, "coupon checked");
        Ok(validation)
    }

    /// Hard stock check; every shortfall is an issue.
    #[tracing::instrument(skip_all, fields(items = items.len()))]
    pub async fn validate_stock(&self, items: &[LineItemRequest]) -> Result<StockValidation> {
        let catalog = self.load_catalog(items).await?;
        let issues: Vec<StockIssue> = items.iter().filter_map(|item| {
            let Some(product) = catalog.get(item.product_id) else {
                return Some(StockIssue::missing(item, StockProblem::ProductNotFound));
            };
            let Some(variant) = product.variant(item.variant_id) else {
                return Some(StockIssue::missing(item, StockProblem::VariantNotFound));
            };
            (!variant.has_stock_for(item.quantity)).then(|| StockIssue::shortfall(item, product, variant))
        }).collect();
        if !issues.is_empty() {
            tracing::info!(issues = issues.len(), "stock validation failed");
        }
        Ok(StockValidation::from(issues))
    }

    #[tracing::instrument(skip(self))]
    pub async fn check_pincode(&self, pincode: &str) -> Result<PincodeCheck> {
        let record = self.store.fetch_pincode(pincode).await?.filter(|r| r.is_active);
        Ok(record.as_ref().map_or_else(PincodeCheck::unserviceable, PincodeCheck::serviceable))
    }

    /// One batch lookup for every distinct product id in `items`.
    async fn load_catalog(&self, items: &[LineItemRequest]) -> Result<CatalogIndex> {
        let ids: Vec<ProductId> = items.iter().map(|i| i.product_id).collect::<BTreeSet<_>>().into_iter().collect();
        if ids.is_empty() { return Ok(CatalogIndex::default()); }
        let products = self.store.fetch_products_by_ids(&ids).await.inspect_err(|e| {
            tracing::error!(error = %e, "catalog lookup failed");
        })?;
        Ok(products.into_iter().collect())
    }
}
