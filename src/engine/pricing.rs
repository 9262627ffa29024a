//! Line-item pricing stage

use crate::domain::advisories::Advisory;
use crate::domain::aggregates::{CatalogIndex, LineItemRequest, PricedLineItem};
use crate::domain::value_objects::Money;

/// Prices each line in input order. Lines whose product or variant cannot be
/// resolved are skipped with an advisory; stock shortfalls are reported but
/// the line is still priced at the requested quantity.
pub(crate) fn price_lines(
    items: &[LineItemRequest], catalog: &CatalogIndex, advisories: &mut Vec<Advisory>,
) -> (Vec<PricedLineItem>, Money) {
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let Some(product) = catalog.get(item.product_id) else {
            tracing::debug!(product_id = item.product_id, "product not in catalog");
            advisories.push(Advisory::ProductUnavailable { product_id: item.product_id });
            continue;
        };
        let Some(variant) = product.variant(item.variant_id) else {
            tracing::debug!(product_id = item.product_id, variant_id = item.variant_id, "variant not in catalog");
            advisories.push(Advisory::VariantNotFound { variant_id: item.variant_id });
            continue;
        };
        if !variant.has_stock_for(item.quantity) {
            advisories.push(Advisory::InsufficientStock {
                product_name: product.name.clone(), variant_name: variant.name.clone(), available: variant.stock,
            });
        }
        lines.push(PricedLineItem::price(product, variant, item.quantity));
    }
    let subtotal = lines.iter().map(|l| l.total).sum();
    (lines, subtotal)
}
