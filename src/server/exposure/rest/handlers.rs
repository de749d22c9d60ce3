//! Invoice HTTP handlers
//!
//! Each handler parses the path/body, calls [`InvoiceService`] and lets
//! [`InvoiceError`] render failures as `{"error": ...}` bodies.

use crate::core::{Invoice, InvoiceError, InvoicePatch, InvoiceService, NewInvoice, parse_invoice_id};
use axum::extract::rejection::JsonRejection;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

/// Invoice-specific AppState
#[derive(Clone)]
pub struct InvoiceAppState {
    pub service: Arc<InvoiceService>,
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, InvoiceError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| InvoiceError::InvalidBody(rejection.body_text()))
}

/// GET /invoices
pub async fn list_invoices(
    State(state): State<InvoiceAppState>,
) -> Result<Json<Vec<Invoice>>, InvoiceError> {
    state.service.list().await.map(Json)
}

/// GET /invoices/{id}
pub async fn get_invoice(
    State(state): State<InvoiceAppState>,
    Path(id): Path<String>,
) -> Result<Json<Invoice>, InvoiceError> {
    let id = parse_invoice_id(&id)?;
    state.service.get(id).await.map(Json)
}

/// POST /invoices
pub async fn create_invoice(
    State(state): State<InvoiceAppState>,
    payload: Result<Json<NewInvoice>, JsonRejection>,
) -> Result<(StatusCode, Json<Invoice>), InvoiceError> {
    let invoice = parse_body(payload)?;
    let created = state.service.create(invoice).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /invoices/{id}
///
/// Only the keys present in the body are changed.
pub async fn update_invoice(
    State(state): State<InvoiceAppState>,
    Path(id): Path<String>,
    payload: Result<Json<InvoicePatch>, JsonRejection>,
) -> Result<Json<Invoice>, InvoiceError> {
    let id = parse_invoice_id(&id)?;
    let patch = parse_body(payload)?;
    state.service.update(id, patch).await.map(Json)
}

/// DELETE /invoices/{id}
pub async fn delete_invoice(
    State(state): State<InvoiceAppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, InvoiceError> {
    let id = parse_invoice_id(&id)?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
