//! Server host for transport-agnostic API exposure
//!
//! This module provides a `ServerHost` structure that contains the state
//! needed to expose the invoice API via any protocol (REST, gRPC).
//!
//! The host is completely agnostic to the transport protocol and serves as the
//! single source of truth for the application state.

use crate::config::ServiceConfig;
use crate::core::{InvoiceService, InvoiceStore};
use std::sync::Arc;

/// Host context shared by every exposure
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerHost::new(config, Arc::new(InMemoryInvoiceStore::new())));
///
/// let rest_app = RestExposure::build_router(host.clone(), vec![])?;
/// let grpc_app = GrpcExposure::build_router(host)?;
/// ```
pub struct ServerHost {
    /// Validated service configuration
    pub config: Arc<ServiceConfig>,

    /// Invoice operations shared by REST and gRPC
    pub invoices: Arc<InvoiceService>,
}

impl ServerHost {
    /// Build the host around a store
    pub fn new(config: ServiceConfig, store: Arc<dyn InvoiceStore>) -> Self {
        Self {
            config: Arc::new(config),
            invoices: Arc::new(InvoiceService::from_store(store)),
        }
    }

    /// Get a handle to the invoice service
    pub fn invoice_service(&self) -> Arc<InvoiceService> {
        self.invoices.clone()
    }
}
