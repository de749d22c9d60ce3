//! API Exposure modules for different protocols
//!
//! Each exposure type consumes a `ServerHost` and produces a Router for that protocol.

pub mod rest;

// Re-export for convenience
pub use rest::RestExposure;

#[cfg(feature = "grpc")]
pub mod grpc;

#[cfg(feature = "grpc")]
pub use grpc::GrpcExposure;
