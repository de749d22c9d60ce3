//! Invoice service binary
//!
//! Serves the JSON API on `INVOICE_HTTP_ADDR` and the gRPC API on
//! `INVOICE_GRPC_ADDR`, both backed by the store selected in the config.

use anyhow::{Context, Result, anyhow};
use invoices::config::{ServiceConfig, StoreBackend};
use invoices::core::InvoiceStore;
use invoices::server::ServerBuilder;
use invoices::storage::{InMemoryInvoiceStore, PostgresInvoiceStore, ensure_schema};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = init()?;
    let store = open_store(&config).await?;

    ServerBuilder::new()
        .with_config(config)
        .with_store_arc(store)
        .serve()
        .await
}

/// Install the log subscriber, then load the configuration
fn init() -> Result<ServiceConfig> {
    // RUST_LOG may come from .env, so load it before the filter is read
    dotenvy::dotenv().ok();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install the log subscriber: {}", e))?;

    ServiceConfig::from_env().context("invalid configuration")
}

async fn open_store(config: &ServiceConfig) -> Result<Arc<dyn InvoiceStore>> {
    let db = &config.database;
    match db.backend {
        StoreBackend::Postgres => {
            tracing::info!("Connecting to {}", db.redacted_url());
            let pool = PgPoolOptions::new()
                .max_connections(db.max_connections)
                .connect_with(db.connect_options())
                .await
                .with_context(|| format!("failed to connect to {}", db.redacted_url()))?;

            ensure_schema(&pool)
                .await
                .context("failed to create the invoices schema")?;

            Ok(Arc::new(PostgresInvoiceStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory invoice store; data is lost on exit");
            Ok(Arc::new(InMemoryInvoiceStore::new()))
        }
    }
}
