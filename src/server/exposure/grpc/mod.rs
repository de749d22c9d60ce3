//! gRPC API exposure for the invoice service
//!
//! This module uses tonic as the gRPC framework. The typed messages are
//! generated from `proto/invoice.proto` by the build script.
//!
//! ## Architecture
//!
//! - **InvoiceServiceImpl**: the five invoice RPCs, delegating to `InvoiceService`
//! - **convert**: translation between proto messages and core types
//!
//! The gRPC service consumes the same `ServerHost` as REST and is served on
//! its own port through axum interop.

pub mod invoice_service;

mod convert;

// Include the generated protobuf code
pub mod proto {
    tonic::include_proto!("invoice");
}

use crate::server::host::ServerHost;
use anyhow::Result;
use axum::Router;
use proto::invoice_service_server::InvoiceServiceServer;
use std::sync::Arc;
use tonic::service::Routes;

pub use invoice_service::InvoiceServiceImpl;

/// gRPC API exposure implementation
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(builder.build_host()?);
/// let grpc_router = GrpcExposure::build_router(host.clone())?;
///
/// let listener = TcpListener::bind("0.0.0.0:50051").await?;
/// axum::serve(listener, grpc_router).await?;
/// ```
pub struct GrpcExposure;

impl GrpcExposure {
    /// Build the tonic routes carrying the `invoice.InvoiceService` service
    pub fn build_routes(host: Arc<ServerHost>) -> Routes {
        let invoice_svc = InvoiceServiceImpl::new(host.invoice_service());

        let mut builder = Routes::builder();
        builder.add_service(InvoiceServiceServer::new(invoice_svc));
        builder.routes()
    }

    /// Build the gRPC router from a host
    ///
    /// Converts the tonic routes into an axum `Router` so it can be served
    /// with `axum::serve` like the REST side.
    pub fn build_router(host: Arc<ServerHost>) -> Result<Router> {
        Ok(Self::build_routes(host).into_axum_router())
    }
}
