//! Spice storefront cart pricing service

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use spice_cart_pricing::api::{build_app, AppState};
use spice_cart_pricing::{AppConfig, PgStore, PricingEngine};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).init();

    let db = PgPoolOptions::new().max_connections(config.db_max_connections).connect(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&db).await?;

    let engine = PricingEngine::new(Arc::new(PgStore::new(db)), config.pricing);
    let app = build_app(AppState { engine });

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(
        %addr, shipping_cost = %config.pricing.default_shipping_cost,
        free_shipping_threshold = %config.pricing.default_free_shipping_threshold,
        "spice-cart-pricing listening"
    );
    axum::serve(tokio::net::TcpListener::bind(&addr).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
