//! Core module containing the invoice model, errors and service traits

pub mod entity;
pub mod error;
pub mod invoice;
pub mod service;

pub use entity::{Entity, EntityId};
pub use error::{InvoiceError, StoreOperation};
pub use invoice::{Invoice, InvoiceId, InvoicePatch, NewInvoice, parse_invoice_id};
pub use service::{InvoiceService, InvoiceStore};
