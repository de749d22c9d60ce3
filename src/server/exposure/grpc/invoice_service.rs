//! gRPC Invoice Service implementation
//!
//! Every RPC delegates to the shared [`InvoiceService`]. Failures of any kind
//! are reported as `INTERNAL` with a `"Fail to <action> invoice: <cause>"`
//! message, so clients treat any error as failure of the whole call.

use super::convert::{id_from_proto, invoice_to_proto, update_from_proto};
use super::proto::{
    CreateInvoiceRequest, CreateInvoiceResponse, DeleteInvoiceRequest, DeleteInvoiceResponse,
    GetAllInvoicesRequest, GetAllInvoicesResponse, GetInvoiceRequest, GetInvoiceResponse,
    UpdateInvoiceRequest, UpdateInvoiceResponse,
    invoice_service_server::InvoiceService as InvoiceGrpc,
};
use crate::core::{InvoiceError, InvoiceService, NewInvoice};
use std::sync::Arc;
use tonic::{Request, Response, Status};

/// gRPC Invoice Service implementation
pub struct InvoiceServiceImpl {
    service: Arc<InvoiceService>,
}

impl InvoiceServiceImpl {
    pub fn new(service: Arc<InvoiceService>) -> Self {
        Self { service }
    }
}

fn fail(action: &str, err: InvoiceError) -> Status {
    match &err {
        InvoiceError::Storage { .. } => tracing::error!(error = %err, "gRPC {} failed", action),
        _ => tracing::debug!(error = %err, "gRPC {} rejected", action),
    }
    Status::internal(format!("Fail to {}: {}", action, err))
}

/// Mutations report a missing target as "find invoice".
fn fail_mutation(action: &str, err: InvoiceError) -> Status {
    if err.is_not_found() {
        fail("find invoice", err)
    } else {
        fail(action, err)
    }
}

#[tonic::async_trait]
impl InvoiceGrpc for InvoiceServiceImpl {
    async fn get_all_invoices(
        &self,
        _request: Request<GetAllInvoicesRequest>,
    ) -> Result<Response<GetAllInvoicesResponse>, Status> {
        let invoices = self
            .service
            .list()
            .await
            .map_err(|e| fail("return invoices", e))?;

        Ok(Response::new(GetAllInvoicesResponse {
            invoices: invoices.into_iter().map(invoice_to_proto).collect(),
        }))
    }

    async fn get_invoice_by_id(
        &self,
        request: Request<GetInvoiceRequest>,
    ) -> Result<Response<GetInvoiceResponse>, Status> {
        let req = request.into_inner();
        let id = id_from_proto(req.id).map_err(|e| fail("return invoice", e))?;

        let invoice = self
            .service
            .get(id)
            .await
            .map_err(|e| fail("return invoice", e))?;

        Ok(Response::new(GetInvoiceResponse {
            invoice: Some(invoice_to_proto(invoice)),
        }))
    }

    async fn create_invoice(
        &self,
        request: Request<CreateInvoiceRequest>,
    ) -> Result<Response<CreateInvoiceResponse>, Status> {
        let invoice = NewInvoice::from(request.into_inner());

        let created = self
            .service
            .create(invoice)
            .await
            .map_err(|e| fail("create invoice", e))?;

        Ok(Response::new(CreateInvoiceResponse {
            invoice: Some(invoice_to_proto(created)),
        }))
    }

    async fn update_invoice(
        &self,
        request: Request<UpdateInvoiceRequest>,
    ) -> Result<Response<UpdateInvoiceResponse>, Status> {
        let (id, patch) =
            update_from_proto(request.into_inner()).map_err(|e| fail("find invoice", e))?;

        let updated = self
            .service
            .update(id, patch)
            .await
            .map_err(|e| fail_mutation("update invoice", e))?;

        Ok(Response::new(UpdateInvoiceResponse {
            invoice: Some(invoice_to_proto(updated)),
        }))
    }

    async fn delete_invoice(
        &self,
        request: Request<DeleteInvoiceRequest>,
    ) -> Result<Response<DeleteInvoiceResponse>, Status> {
        let req = request.into_inner();
        let id = id_from_proto(req.id).map_err(|e| fail("find invoice", e))?;

        let deleted = self
            .service
            .delete(id)
            .await
            .map_err(|e| fail_mutation("delete invoice", e))?;

        Ok(Response::new(DeleteInvoiceResponse {
            invoice: Some(invoice_to_proto(deleted)),
        }))
    }
}
