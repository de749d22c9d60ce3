//! REST API exposure for the invoice service
//!
//! This module provides REST-specific routing and handlers.
//! It consumes a `ServerHost` and produces an Axum `Router`.

pub mod handlers;

use super::super::host::ServerHost;
use crate::core::{Entity, Invoice};
use anyhow::Result;
use axum::http::{Method, StatusCode, header};
use axum::{Json, Router, routing::get};
use handlers::{
    InvoiceAppState, create_invoice, delete_invoice, get_invoice, list_invoices, update_invoice,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Liveness check path
pub const LIVENESS_PATH: &str = "/livez";

/// REST API exposure implementation
///
/// This struct encapsulates all REST-specific logic for exposing the API.
/// It is completely separate from the core and can coexist with the gRPC
/// exposure.
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// # Arguments
    ///
    /// * `host` - The server host containing all service state
    /// * `custom_routes` - Additional custom routes to merge
    ///
    /// # Returns
    ///
    /// Returns a fully configured Axum router with:
    /// - Health check and liveness routes
    /// - Invoice CRUD routes
    /// - Custom routes
    /// - CORS (any origin) and request tracing
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let mut app = Self::health_routes().merge(Self::invoice_routes(&host));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(Self::cors_layer()).layer(TraceLayer::new_for_http()))
    }

    /// Build the invoice CRUD routes
    fn invoice_routes(host: &ServerHost) -> Router {
        let state = InvoiceAppState {
            service: host.invoice_service(),
        };

        Router::new()
            .route(
                &Invoice::collection_path(),
                get(list_invoices).post(create_invoice),
            )
            .route(
                &Invoice::item_path(),
                get(get_invoice).put(update_invoice).delete(delete_invoice),
            )
            .with_state(state)
    }

    /// Any origin; headers Origin, Content-Type, Accept
    fn cors_layer() -> CorsLayer {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::HEAD,
                Method::PUT,
                Method::DELETE,
                Method::PATCH,
            ])
            .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route(LIVENESS_PATH, get(Self::liveness))
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    async fn liveness() -> StatusCode {
        StatusCode::OK
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "invoice-service"
        }))
    }
}
