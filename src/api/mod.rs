//! HTTP surface consumed by the storefront cart and checkout pages.

mod cart;
mod coupons;
mod middleware;
mod pincodes;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use crate::{PricingEngine, PricingError};

#[derive(Clone)]
pub struct AppState { pub engine: PricingEngine }

/// Error body is always `{ "error": "..." }`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal,
}

#[derive(Serialize)]
struct ErrorBody { error: String }

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Pricing data is temporarily unavailable".to_string()),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<PricingError> for ApiError {
    fn from(e: PricingError) -> Self {
        match e {
            PricingError::InvalidInput(message) => Self::BadRequest(message),
            PricingError::Dependency(cause) => {
                tracing::error!(error = %cause, "pricing dependency failed");
                Self::Internal
            }
        }
    }
}

/// Unwraps a JSON body and decodes it into `T`, mapping every failure to
/// `InvalidInput` so callers get the uniform error body.
pub(crate) fn decode_body<T: DeserializeOwned>(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<T, PricingError> {
    let Json(value) = payload.map_err(|e| PricingError::InvalidInput(e.body_text()))?;
    serde_json::from_value(value).map_err(|e| PricingError::InvalidInput(format!("Invalid request: {e}")))
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "spice-cart-pricing"})) }))
        .route("/api/v1/cart/totals", post(cart::calculate_totals))
        .route("/api/v1/stock/validate", post(cart::validate_stock))
        .route("/api/v1/coupons/apply", post(coupons::apply_coupon))
        .route("/api/v1/pincodes/check", post(pincodes::check_pincode))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(middleware::request_id))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;

    #[test]
    fn test_error_statuses() {
        let response = ApiError::from(PricingError::InvalidInput("Invalid items array".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let response = ApiError::from(PricingError::Dependency(StoreError::Unavailable("down".into()))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
