//! Environment-driven configuration

use rust_decimal::Decimal;
use std::env::VarError;
use std::str::FromStr;
use thiserror::Error;
use crate::domain::aggregates::ShippingRate;
use crate::domain::value_objects::Money;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Knobs the pricing engine is constructed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PricingConfig {
    pub default_shipping_cost: Money,
    pub default_free_shipping_threshold: Money,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self { default_shipping_cost: Money::from_major(50), default_free_shipping_threshold: Money::from_major(1000) }
    }
}

impl PricingConfig {
    pub fn standard_rate(&self) -> ShippingRate {
        ShippingRate::new(self.default_shipping_cost, self.default_free_shipping_threshold)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub log_level: String,
    pub db_max_connections: u32,
    pub pricing: PricingConfig,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let database_url = lookup("DATABASE_URL").map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let port = parse_or(&lookup, "PORT", 8083u16)?;
        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10u32)?;

        let defaults = PricingConfig::default();
        let pricing = PricingConfig {
            default_shipping_cost: money_or(&lookup, "DEFAULT_SHIPPING_COST", defaults.default_shipping_cost)?,
            default_free_shipping_threshold: money_or(&lookup, "DEFAULT_FREE_SHIPPING_THRESHOLD", defaults.default_free_shipping_threshold)?,
        };

        Ok(Self { database_url, port, log_level, db_max_connections, pricing })
    }
}

fn parse_or<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidEnvVar { var: var.to_string(), reason: e.to_string() }),
        Err(_) => Ok(default),
    }
}

fn money_or<F>(lookup: &F, var: &str, default: Money) -> Result<Money, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let amount: Decimal = parse_or(lookup, var, default.amount())?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ConfigError::InvalidEnvVar { var: var.to_string(), reason: "must not be negative".to_string() });
    }
    Ok(Money::new(amount))
}
