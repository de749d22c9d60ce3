//! # Invoice Service
//!
//! A small invoice CRUD service exposed over a JSON HTTP API and a gRPC API,
//! backed by PostgreSQL with soft delete.
//!
//! ## Features
//!
//! - **One service, two transports**: REST (axum) and gRPC (tonic) share a single `InvoiceService`
//! - **Partial updates**: only the fields a client sends are changed
//! - **Soft Delete Support**: deleted invoices keep their row with `deleted_at` set
//! - **Automatic Timestamps**: created_at and updated_at managed by the store
//! - **Pluggable storage**: PostgreSQL in production, in-memory for tests and development
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoices::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_store(InMemoryInvoiceStore::new())
//!     .build()?;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Entity, EntityId, Invoice, InvoiceError, InvoiceId, InvoicePatch, InvoiceService,
        InvoiceStore, NewInvoice, StoreOperation, parse_invoice_id,
    };

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::{PostgresInvoiceStore, ensure_schema};

    // === Config ===
    pub use crate::config::{
        ConfigError, DatabaseConfig, ListenConfig, ServiceConfig, StoreBackend,
    };

    // === Server ===
    pub use crate::server::exposure::RestExposure;
    #[cfg(feature = "grpc")]
    pub use crate::server::exposure::GrpcExposure;
    pub use crate::server::{ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};

    // === Axum ===
    pub use axum::Router;
}
