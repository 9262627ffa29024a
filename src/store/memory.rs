//! In-memory store for tests and local runs without Postgres.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use crate::domain::aggregates::{CatalogProduct, Coupon, ProductId, ServiceablePincode};
use super::{PricingStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    products: RwLock<HashMap<ProductId, CatalogProduct>>,
    coupons: RwLock<HashMap<String, Coupon>>,
    pincodes: RwLock<HashMap<String, ServiceablePincode>>,
}

impl InMemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_product(self, product: CatalogProduct) -> Self {
        write(&self.products).insert(product.id, product);
        self
    }

    pub fn with_coupon(self, coupon: Coupon) -> Self {
        write(&self.coupons).insert(coupon.code.clone(), coupon);
        self
    }

    pub fn with_pincode(self, pincode: ServiceablePincode) -> Self {
        write(&self.pincodes).insert(pincode.pincode.clone(), pincode);
        self
    }
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl PricingStore for InMemoryStore {
    async fn fetch_products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<CatalogProduct>, StoreError> {
        let products = read(&self.products);
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }

    async fn fetch_active_coupon_by_code(&self, code: &str) -> Result<Option<Coupon>, StoreError> {
        Ok(read(&self.coupons).get(code).filter(|c| c.is_active).cloned())
    }

    async fn fetch_pincode(&self, pincode: &str) -> Result<Option<ServiceablePincode>, StoreError> {
        Ok(read(&self.pincodes).get(pincode).cloned())
    }
}
