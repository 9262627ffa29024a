//! Postgres-backed store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use crate::domain::aggregates::{
    CatalogProduct, CatalogVariant, Coupon, DiscountType, ProductId, ServiceablePincode,
};
use crate::domain::value_objects::Money;
use super::{PricingStore, StoreError};

#[derive(Clone)]
pub struct PgStore { pool: PgPool }

impl PgStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductVariantRow {
    product_id: i64,
    product_name: String,
    variant_id: Option<i64>,
    variant_name: Option<String>,
    price: Option<Decimal>,
    sale_price: Option<Decimal>,
    stock: Option<i32>,
}

#[derive(Debug, sqlx::FromRow)]
struct CouponRow {
    code: String,
    discount_type: String,
    discount_value: Decimal,
    max_discount_amount: Option<Decimal>,
    min_order_value: Option<Decimal>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    usage_limit: Option<i32>,
    usage_count: i32,
    is_active: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct PincodeRow {
    pincode: String,
    shipping_cost: Option<Decimal>,
    free_shipping_threshold: Option<Decimal>,
    city: Option<String>,
    state: Option<String>,
    cod_available: bool,
    estimated_delivery_days: Option<i32>,
    is_active: bool,
}

fn non_negative(table: &'static str, field: &str, value: i32) -> Result<u32, StoreError> {
    u32::try_from(value).map_err(|_| StoreError::MalformedRow { table, reason: format!("{field} is negative ({value})") })
}

/// Folds joined rows (ordered by product id) into products with nested variants.
fn group_products(rows: Vec<ProductVariantRow>) -> Result<Vec<CatalogProduct>, StoreError> {
    let mut products: Vec<CatalogProduct> = Vec::new();
    for row in rows {
        if products.last().map_or(true, |p| p.id != row.product_id) {
            products.push(CatalogProduct { id: row.product_id, name: row.product_name, variants: vec![] });
        }
        let Some(variant_id) = row.variant_id else { continue };
        let price = row.price.ok_or_else(|| StoreError::MalformedRow {
            table: "product_variants", reason: format!("variant {variant_id} has no price"),
        })?;
        let variant = CatalogVariant {
            id: variant_id,
            name: row.variant_name.unwrap_or_default(),
            price: Money::new(price),
            sale_price: row.sale_price.map(Money::new),
            stock: non_negative("product_variants", "stock", row.stock.unwrap_or(0))?,
        };
        if let Some(product) = products.last_mut() { product.variants.push(variant); }
    }
    Ok(products)
}

impl TryFrom<CouponRow> for Coupon {
    type Error = StoreError;
    fn try_from(row: CouponRow) -> Result<Self, Self::Error> {
        let discount_type = DiscountType::parse(&row.discount_type).ok_or_else(|| StoreError::MalformedRow {
            table: "coupons", reason: format!("unknown discount_type '{}'", row.discount_type),
        })?;
        Ok(Coupon {
            code: row.code,
            discount_type,
            discount_value: row.discount_value,
            max_discount_amount: row.max_discount_amount.map(Money::new),
            min_order_value: row.min_order_value.map(Money::new),
            start_date: row.start_date,
            end_date: row.end_date,
            usage_limit: row.usage_limit.map(|v| non_negative("coupons", "usage_limit", v)).transpose()?,
            usage_count: non_negative("coupons", "usage_count", row.usage_count)?,
            is_active: row.is_active,
        })
    }
}

impl From<PincodeRow> for ServiceablePincode {
    fn from(row: PincodeRow) -> Self {
        Self {
            pincode: row.pincode,
            shipping_cost: row.shipping_cost.map(Money::new),
            free_shipping_threshold: row.free_shipping_threshold.map(Money::new),
            city: row.city,
            state: row.state,
            cod_available: row.cod_available,
            estimated_delivery_days: row.estimated_delivery_days,
            is_active: row.is_active,
        }
    }
}

#[async_trait]
impl PricingStore for PgStore {
    async fn fetch_products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<CatalogProduct>, StoreError> {
        if ids.is_empty() { return Ok(vec![]); }
        let rows = sqlx::query_as::<_, ProductVariantRow>(
            "SELECT p.id AS product_id, p.name AS product_name, v.id AS variant_id, v.name AS variant_name, \
             v.price, v.sale_price, v.stock \
             FROM products p LEFT JOIN product_variants v ON v.product_id = p.id \
             WHERE p.id = ANY($1) ORDER BY p.id, v.id")
            .bind(ids).fetch_all(&self.pool).await?;
        group_products(rows)
    }

    async fn fetch_active_coupon_by_code(&self, code: &str) -> Result<Option<Coupon>, StoreError> {
        sqlx::query_as::<_, CouponRow>(
            "SELECT code, discount_type, discount_value, max_discount_amount, min_order_value, start_date, end_date, \
             usage_limit, usage_count, is_active FROM coupons WHERE code = $1 AND is_active = true")
            .bind(code).fetch_optional(&self.pool).await?
            .map(Coupon::try_from).transpose()
    }

    async fn fetch_pincode(&self, pincode: &str) -> Result<Option<ServiceablePincode>, StoreError> {
        let row = sqlx::query_as::<_, PincodeRow>(
            "SELECT pincode, shipping_cost, free_shipping_threshold, city, state, cod_available, \
             estimated_delivery_days, is_active FROM serviceable_pincodes WHERE pincode = $1")
            .bind(pincode).fetch_optional(&self.pool).await?;
        Ok(row.map(ServiceablePincode::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(product_id: i64, variant_id: Option<i64>, stock: i32) -> ProductVariantRow {
        ProductVariantRow {
            product_id, product_name: format!("P{product_id}"), variant_id,
            variant_name: variant_id.map(|v| format!("V{v}")), price: variant_id.map(|_| Decimal::from(100)),
            sale_price: None, stock: variant_id.map(|_| stock),
        }
    }

    #[test]
    fn test_group_products_nests_variants() {
        let products = group_products(vec![row(1, Some(10), 3), row(1, Some(11), 0), row(2, None, 0)]).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].variants.len(), 2);
        assert!(products[1].variants.is_empty());
    }

    #[test]
    fn test_negative_stock_is_malformed() {
        let err = group_products(vec![row(1, Some(10), -1)]).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRow { table: "product_variants", .. }));
    }

    #[test]
    fn test_unknown_discount_type_is_malformed() {
        let row = CouponRow {
            code: "X".into(), discount_type: "bogo".into(), discount_value: Decimal::from(1),
            max_discount_amount: None, min_order_value: None, start_date: None, end_date: None,
            usage_limit: None, usage_count: 0, is_active: true,
        };
        assert!(Coupon::try_from(row).is_err());
    }
}
