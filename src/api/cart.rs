use axum::{extract::{rejection::JsonRejection, State}, Json};
use serde::Deserialize;
use validator::Validate;
use crate::domain::aggregates::{CartRequest, CartSummary, LineItemRequest, StockValidation};
use crate::domain::value_objects::Quantity;
use crate::PricingError;
use super::{decode_body, ApiError, AppState};

const INVALID_ITEMS: &str = "Invalid items array";

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPayload {
    pub product_id: i64,
    pub variant_id: i64,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct UserLocation { pub pincode: Option<String> }

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotalsPayload {
    pub items: Option<Vec<LineItemPayload>>,
    pub coupon_code: Option<String>,
    pub user_location: Option<UserLocation>,
}

#[derive(Debug, Deserialize)]
pub struct StockPayload { pub items: Option<Vec<LineItemPayload>> }

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Checks shape once at the boundary and produces typed line items.
fn line_items(items: Option<Vec<LineItemPayload>>) -> Result<Vec<LineItemRequest>, PricingError> {
    let items = items.ok_or_else(|| PricingError::InvalidInput(INVALID_ITEMS.to_string()))?;
    items.into_iter().enumerate().map(|(index, item)| {
        item.validate().map_err(|e| PricingError::InvalidInput(format!("{INVALID_ITEMS}: item {index}: {e}")))?;
        let quantity = Quantity::new(item.quantity)
            .map_err(|e| PricingError::InvalidInput(format!("{INVALID_ITEMS}: item {index}: {e}")))?;
        Ok(LineItemRequest { product_id: item.product_id, variant_id: item.variant_id, quantity })
    }).collect()
}

/// `items` must be present and an array before anything else is decoded, so
/// a wrong shape gets the same message as a missing field.
fn require_items_array(payload: Result<Json<serde_json::Value>, JsonRejection>) -> Result<Json<serde_json::Value>, PricingError> {
    match payload {
        Ok(Json(value)) if value.get("items").is_some_and(serde_json::Value::is_array) => Ok(Json(value)),
        Ok(_) => Err(PricingError::InvalidInput(INVALID_ITEMS.to_string())),
        Err(e) => Err(PricingError::InvalidInput(e.body_text())),
    }
}

pub(super) async fn calculate_totals(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<CartSummary>, ApiError> {
    let payload: CartTotalsPayload = decode_body(Ok(require_items_array(payload)?))?;
    let request = CartRequest {
        items: line_items(payload.items)?,
        coupon_code: non_blank(payload.coupon_code),
        pincode: non_blank(payload.user_location.and_then(|l| l.pincode)).map(|p| p.trim().to_string()),
    };
    Ok(Json(state.engine.price_cart(&request).await?))
}

pub(super) async fn validate_stock(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<StockValidation>, ApiError> {
    let payload: StockPayload = decode_body(Ok(require_items_array(payload)?))?;
    let items = line_items(payload.items)?;
    Ok(Json(state.engine.validate_stock(&items).await?))
}
