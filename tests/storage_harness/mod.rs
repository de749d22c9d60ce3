//! Shared test harness for invoice store testing
//!
//! Provides sample payloads plus two macros every backend runs:
//!
//! - `invoice_store_tests!` exercises the `InvoiceStore` contract directly
//! - `rest_integration_tests!` drives the same store through the HTTP API
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! invoice_store_tests!(InMemoryInvoiceStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod store_tests;


use invoices::core::{InvoicePatch, NewInvoice};

/// A valid invoice payload with the given name
pub fn sample_invoice(name: &str) -> NewInvoice {
    NewInvoice::new(name, "pending", "card", 42.5)
}

/// `count` distinct invoice payloads named `Invoice 0..count`
pub fn sample_batch(count: usize) -> Vec<NewInvoice> {
    (0..count)
        .map(|i| NewInvoice::new(format!("Invoice {}", i), "pending", "transfer", i as f64 * 10.0))
        .collect()
}

/// Patch that only changes the status
pub fn status_patch(status: &str) -> InvoicePatch {
    InvoicePatch {
        status: Some(status.to_string()),
        ..Default::default()
    }
}
