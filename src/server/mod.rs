//! Server module for building the HTTP and gRPC servers
//!
//! This module provides a `ServerBuilder` that assembles:
//! - the shared `ServerHost` around an invoice store
//! - the REST router with invoice CRUD and health routes
//! - the gRPC invoice service on its own listener

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use host::ServerHost;
