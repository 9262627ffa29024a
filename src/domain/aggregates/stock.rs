//! Hard stock check run right before an order is committed

use serde::Serialize;
use crate::domain::aggregates::catalog::{CatalogProduct, CatalogVariant, ProductId, VariantId};
use crate::domain::aggregates::cart::LineItemRequest;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StockProblem {
    #[serde(rename = "Product not found")]
    ProductNotFound,
    #[serde(rename = "Variant not found")]
    VariantNotFound,
    #[serde(rename = "Insufficient stock")]
    InsufficientStock,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockIssue {
    pub product_id: ProductId,
    pub variant_id: VariantId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<u32>,
    pub error: StockProblem,
}

impl StockIssue {
    pub fn missing(item: &LineItemRequest, error: StockProblem) -> Self {
        Self {
            product_id: item.product_id, variant_id: item.variant_id,
            product_name: None, variant_name: None, requested: None, available: None, error,
        }
    }

    pub fn shortfall(item: &LineItemRequest, product: &CatalogProduct, variant: &CatalogVariant) -> Self {
        Self {
            product_id: item.product_id, variant_id: item.variant_id,
            product_name: Some(product.name.clone()), variant_name: Some(variant.name.clone()),
            requested: Some(item.quantity.value()), available: Some(variant.stock),
            error: StockProblem::InsufficientStock,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StockValidation {
    pub valid: bool,
    pub issues: Vec<StockIssue>,
}

impl From<Vec<StockIssue>> for StockValidation {
    fn from(issues: Vec<StockIssue>) -> Self { Self { valid: issues.is_empty(), issues } }
}
