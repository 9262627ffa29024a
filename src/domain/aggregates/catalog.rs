//! Catalog snapshot read by the pricing engine

use std::collections::HashMap;
use serde::Serialize;
use crate::domain::value_objects::{Money, Quantity};

pub type ProductId = i64;
pub type VariantId = i64;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogVariant {
    pub id: VariantId,
    pub name: String,
    pub price: Money,
    pub sale_price: Option<Money>,
    pub stock: u32,
}

impl CatalogVariant {
    /// Sale price wins whenever one is set.
    pub fn unit_price(&self) -> Money { self.sale_price.unwrap_or(self.price) }
    pub fn has_stock_for(&self, qty: Quantity) -> bool { self.stock >= qty.value() }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    pub variants: Vec<CatalogVariant>,
}

impl CatalogProduct {
    pub fn variant(&self, id: VariantId) -> Option<&CatalogVariant> {
        self.variants.iter().find(|v| v.id == id)
    }
}

/// Products from one batch lookup, indexed by id.
#[derive(Clone, Debug, Default)]
pub struct CatalogIndex {
    products: HashMap<ProductId, CatalogProduct>,
}

impl CatalogIndex {
    pub fn get(&self, id: ProductId) -> Option<&CatalogProduct> { self.products.get(&id) }
    pub fn len(&self) -> usize { self.products.len() }
    pub fn is_empty(&self) -> bool { self.products.is_empty() }
}

impl FromIterator<CatalogProduct> for CatalogIndex {
    fn from_iter<I: IntoIterator<Item = CatalogProduct>>(iter: I) -> Self {
        Self { products: iter.into_iter().map(|p| (p.id, p)).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(id: VariantId, price: i64, sale: Option<i64>, stock: u32) -> CatalogVariant {
        CatalogVariant { id, name: format!("{id}g"), price: Money::from_major(price), sale_price: sale.map(Money::from_major), stock }
    }

    #[test]
    fn test_unit_price_prefers_sale_price() {
        assert_eq!(variant(1, 500, None, 1).unit_price(), Money::from_major(500));
        assert_eq!(variant(1, 500, Some(420), 1).unit_price(), Money::from_major(420));
        assert_eq!(variant(1, 500, Some(0), 1).unit_price(), Money::ZERO);
    }

    #[test]
    fn test_stock_check() {
        let v = variant(1, 500, None, 3);
        assert!(v.has_stock_for(Quantity::new(3).unwrap()));
        assert!(!v.has_stock_for(Quantity::new(4).unwrap()));
    }

    #[test]
    fn test_index_lookup() {
        let index: CatalogIndex = vec![
            CatalogProduct { id: 1, name: "Turmeric".into(), variants: vec![variant(101, 120, None, 5)] },
            CatalogProduct { id: 2, name: "Cumin".into(), variants: vec![] },
        ].into_iter().collect();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(1).and_then(|p| p.variant(101)).map(|v| v.stock), Some(5));
        assert!(index.get(1).and_then(|p| p.variant(102)).is_none());
        assert!(index.get(3).is_none());
    }
}
