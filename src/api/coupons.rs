use axum::{extract::{rejection::JsonRejection, State}, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;
use crate::domain::aggregates::CouponValidation;
use crate::domain::value_objects::Money;
use crate::PricingError;
use super::{decode_body, ApiError, AppState};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCouponPayload {
    #[validate(length(min = 1, message = "Coupon code required"))]
    pub code: Option<String>,
    pub cart_total: Option<Decimal>,
}

pub(super) async fn apply_coupon(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<CouponValidation>, ApiError> {
    let payload: ApplyCouponPayload = decode_body(payload)?;
    let code = payload.validate().ok()
        .and(payload.code.as_deref())
        .filter(|code| !code.trim().is_empty())
        .ok_or_else(|| PricingError::InvalidInput("Coupon code required".to_string()))?;
    let cart_total = payload.cart_total
        .filter(|t| !t.is_sign_negative() || t.is_zero())
        .ok_or_else(|| PricingError::InvalidInput("cartTotal must be a non-negative number".to_string()))?;
    Ok(Json(state.engine.validate_coupon(code, Money::new(cart_total)).await?))
}
