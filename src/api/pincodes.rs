use axum::{extract::{rejection::JsonRejection, State}, Json};
use serde::Deserialize;
use crate::domain::aggregates::PincodeCheck;
use crate::PricingError;
use super::{decode_body, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct PincodePayload { pub pincode: Option<String> }

pub(super) async fn check_pincode(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<PincodeCheck>, ApiError> {
    let payload: PincodePayload = decode_body(payload)?;
    let pincode = payload.pincode.as_deref().map(str::trim).filter(|p| !p.is_empty())
        .ok_or_else(|| PricingError::InvalidInput("Pincode is required".to_string()))?;
    Ok(Json(state.engine.check_pincode(pincode).await?))
}
