//! Spice storefront cart pricing
//!
//! Prices a cart against current catalog data, applies an optional coupon and
//! resolves shipping for the delivery pincode.
//!
//! ## Features
//! - Cart totals with soft stock / coupon / pincode advisories
//! - Standalone coupon validation
//! - Hard stock validation before order placement
//! - Pincode serviceability check

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod store;

use thiserror::Error;

pub use config::{AppConfig, PricingConfig};
pub use engine::PricingEngine;
pub use store::{InMemoryStore, PgStore, PricingStore, StoreError};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("lookup failed: {0}")]
    Dependency(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, PricingError>;
