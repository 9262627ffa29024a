//! Read-only data access for the pricing engine.

mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use thiserror::Error;
use crate::domain::aggregates::{CatalogProduct, Coupon, ProductId, ServiceablePincode};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error("malformed {table} row: {reason}")]
    MalformedRow { table: &'static str, reason: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Lookups the engine depends on. "Not found" is `Ok(None)` / a missing
/// product in the batch, never an error.
#[async_trait]
pub trait PricingStore: Send + Sync {
    /// Products with their variants, for every id that exists. One round trip
    /// per call regardless of how many ids are passed.
    async fn fetch_products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<CatalogProduct>, StoreError>;

    /// Exact, case-sensitive code match restricted to active coupons.
    async fn fetch_active_coupon_by_code(&self, code: &str) -> Result<Option<Coupon>, StoreError>;

    async fn fetch_pincode(&self, pincode: &str) -> Result<Option<ServiceablePincode>, StoreError>;
}
