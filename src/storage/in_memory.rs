//! In-memory implementation of InvoiceStore for testing and development

use crate::core::{Entity, Invoice, InvoiceId, InvoicePatch, InvoiceStore, NewInvoice};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

#[derive(Default)]
struct State {
    next_id: InvoiceId,
    invoices: BTreeMap<InvoiceId, Invoice>,
}

/// In-memory invoice store
///
/// Mirrors the PostgreSQL store: sequential ids starting at 1, soft delete
/// keeps the row. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryInvoiceStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows held, including soft-deleted ones
    pub fn row_count(&self) -> Result<usize> {
        let state = self
            .state
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(state.invoices.len())
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn list(&self) -> Result<Vec<Invoice>> {
        let state = self
            .state
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(state
            .invoices
            .values()
            .filter(|invoice| !invoice.is_deleted())
            .cloned()
            .collect())
    }

    async fn get(&self, id: InvoiceId) -> Result<Option<Invoice>> {
        let state = self
            .state
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(state
            .invoices
            .get(&id)
            .filter(|invoice| !invoice.is_deleted())
            .cloned())
    }

    async fn create(&self, invoice: NewInvoice) -> Result<Invoice> {
        let mut state = self
            .state
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        state.next_id += 1;
        let now = Utc::now();
        let created = Invoice {
            id: state.next_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            name: invoice.name,
            status: invoice.status,
            method: invoice.method,
            amount: invoice.amount,
        };
        state.invoices.insert(created.id, created.clone());

        Ok(created)
    }

    async fn update(&self, id: InvoiceId, patch: InvoicePatch) -> Result<Option<Invoice>> {
        let mut state = self
            .state
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(invoice) = state
            .invoices
            .get_mut(&id)
            .filter(|invoice| !invoice.is_deleted())
        else {
            return Ok(None);
        };

        patch.apply_to(invoice);
        invoice.updated_at = Utc::now();

        Ok(Some(invoice.clone()))
    }

    async fn delete(&self, id: InvoiceId) -> Result<bool> {
        let mut state = self
            .state
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match state.invoices.get_mut(&id) {
            Some(invoice) if !invoice.is_deleted() => {
                invoice.deleted_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
