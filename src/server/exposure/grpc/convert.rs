//! Conversion between proto messages and core invoice types
//!
//! Responses carry the id as decimal text; requests carry it as `uint64`.

use super::proto;
use crate::core::{Invoice, InvoiceError, InvoiceId, InvoicePatch, NewInvoice};

/// Render a stored invoice as its proto message
pub fn invoice_to_proto(invoice: Invoice) -> proto::Invoice {
    proto::Invoice {
        id: invoice.id.to_string(),
        name: invoice.name,
        status: invoice.status,
        method: invoice.method,
        amount: invoice.amount,
    }
}

/// Convert a wire id into a store id
pub fn id_from_proto(id: u64) -> Result<InvoiceId, InvoiceError> {
    InvoiceId::try_from(id).map_err(|_| InvoiceError::InvalidId(id.to_string()))
}

impl From<proto::CreateInvoiceRequest> for NewInvoice {
    fn from(req: proto::CreateInvoiceRequest) -> Self {
        NewInvoice {
            name: req.name,
            status: req.status,
            method: req.method,
            amount: req.amount,
        }
    }
}

/// Split an update request into the target id and the sparse patch
pub fn update_from_proto(
    req: proto::UpdateInvoiceRequest,
) -> Result<(InvoiceId, InvoicePatch), InvoiceError> {
    let id = id_from_proto(req.id)?;
    let patch = InvoicePatch {
        name: req.name,
        status: req.status,
        method: req.method,
        amount: req.amount,
    };
    Ok((id, patch))
}
