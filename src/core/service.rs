//! Store trait and the invoice service shared by every exposure

use crate::core::error::{InvoiceError, StoreOperation};
use crate::core::invoice::{Invoice, InvoiceId, InvoicePatch, NewInvoice};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Persistence trait for invoices
///
/// Implementations only ever return active (not soft-deleted) rows and own
/// the bookkeeping timestamps.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// List all active invoices, ordered by id
    async fn list(&self) -> Result<Vec<Invoice>>;

    /// Get an active invoice by ID
    async fn get(&self, id: InvoiceId) -> Result<Option<Invoice>>;

    /// Insert a new invoice, assigning its id and timestamps
    async fn create(&self, invoice: NewInvoice) -> Result<Invoice>;

    /// Apply the present fields of `patch` to an active invoice
    ///
    /// Returns `None` when no active invoice matches.
    async fn update(&self, id: InvoiceId, patch: InvoicePatch) -> Result<Option<Invoice>>;

    /// Soft-delete an active invoice
    ///
    /// Returns `false` when no active invoice matches.
    async fn delete(&self, id: InvoiceId) -> Result<bool>;
}

/// Invoice operations consumed by the REST and gRPC exposures.
///
/// Validation, existence checks and error classification happen here so the
/// transports only translate wire formats.
#[derive(Clone)]
pub struct InvoiceService {
    store: Arc<dyn InvoiceStore>,
}

impl InvoiceService {
    pub fn new(store: impl InvoiceStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_store(store: Arc<dyn InvoiceStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Invoice>, InvoiceError> {
        self.store
            .list()
            .await
            .map_err(|e| InvoiceError::storage(StoreOperation::List, e))
    }

    pub async fn get(&self, id: InvoiceId) -> Result<Invoice, InvoiceError> {
        self.fetch(id, StoreOperation::Get).await
    }

    /// Load an active invoice, tagging store failures with `operation`.
    async fn fetch(&self, id: InvoiceId, operation: StoreOperation) -> Result<Invoice, InvoiceError> {
        self.store
            .get(id)
            .await
            .map_err(|e| InvoiceError::storage(operation, e))?
            .ok_or(InvoiceError::NotFound { id })
    }

    pub async fn create(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError> {
        invoice.ensure_valid()?;

        let created = self
            .store
            .create(invoice)
            .await
            .map_err(|e| InvoiceError::storage(StoreOperation::Create, e))?;

        tracing::info!(invoice_id = created.id, "invoice created");
        Ok(created)
    }

    /// Apply a partial update.
    ///
    /// The invoice must exist before anything is written; an empty patch
    /// returns the current record unchanged.
    pub async fn update(&self, id: InvoiceId, patch: InvoicePatch) -> Result<Invoice, InvoiceError> {
        patch.ensure_valid()?;

        let current = self.fetch(id, StoreOperation::Update).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        let updated = self
            .store
            .update(id, patch)
            .await
            .map_err(|e| InvoiceError::storage(StoreOperation::Update, e))?
            .ok_or(InvoiceError::NotFound { id })?;

        tracing::info!(invoice_id = id, "invoice updated");
        Ok(updated)
    }

    /// Soft-delete an invoice and return the record as it was before deletion.
    pub async fn delete(&self, id: InvoiceId) -> Result<Invoice, InvoiceError> {
        let snapshot = self.fetch(id, StoreOperation::Delete).await?;

        let deleted = self
            .store
            .delete(id)
            .await
            .map_err(|e| InvoiceError::storage(StoreOperation::Delete, e))?;
        if !deleted {
            // Lost a race with a concurrent delete.
            return Err(InvoiceError::NotFound { id });
        }

        tracing::info!(invoice_id = id, "invoice deleted");
        Ok(snapshot)
    }
}
