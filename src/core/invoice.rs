//! Invoice record and the payloads used to create and modify it

use super::entity::{Entity, EntityId};
use super::error::InvoiceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Identifier of an invoice.
pub type InvoiceId = EntityId;

/// A persisted invoice.
///
/// The bookkeeping fields keep the capitalised JSON names existing web
/// clients read (`ID`, `CreatedAt`, ...), while the business fields are
/// lower case.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Invoice {
    #[serde(rename = "ID")]
    pub id: InvoiceId,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "DeletedAt")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub name: String,
    pub status: String,
    pub method: String,
    pub amount: f64,
}

impl Entity for Invoice {
    fn resource_name() -> &'static str {
        "invoices"
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

/// Fields required to create an invoice.
///
/// Unknown keys (such as `ID` or timestamps sent back by a client) are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewInvoice {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub method: String,
    pub amount: f64,
}

impl NewInvoice {
    pub fn new(
        name: impl Into<String>,
        status: impl Into<String>,
        method: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            method: method.into(),
            amount,
        }
    }

    /// Check the field constraints enforced before anything reaches the store.
    pub fn ensure_valid(&self) -> Result<(), InvoiceError> {
        let mut problems = self.validate().err().map(describe).unwrap_or_default();
        if !self.amount.is_finite() {
            problems.push("amount must be a finite number".to_string());
        }
        into_result(problems)
    }
}

/// Sparse set of fields for a partial update.
///
/// `None` means "leave the stored value untouched". Explicit JSON `null`
/// is treated the same as an absent key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct InvoicePatch {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub method: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
}

impl InvoicePatch {
    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.status.is_none() && self.method.is_none() && self.amount.is_none()
    }

    pub fn ensure_valid(&self) -> Result<(), InvoiceError> {
        let mut problems = self.validate().err().map(describe).unwrap_or_default();
        if self.amount.is_some_and(|amount| !amount.is_finite()) {
            problems.push("amount must be a finite number".to_string());
        }
        into_result(problems)
    }

    /// Copy the present fields onto `invoice`.
    ///
    /// Bookkeeping timestamps are left to the caller (the store).
    pub fn apply_to(&self, invoice: &mut Invoice) {
        if let Some(name) = &self.name {
            invoice.name = name.clone();
        }
        if let Some(status) = &self.status {
            invoice.status = status.clone();
        }
        if let Some(method) = &self.method {
            invoice.method = method.clone();
        }
        if let Some(amount) = self.amount {
            invoice.amount = amount;
        }
    }
}

/// Parse an identifier taken from a URL path segment.
///
/// Only positive decimal integers are accepted.
pub fn parse_invoice_id(raw: &str) -> Result<InvoiceId, InvoiceError> {
    match raw.trim().parse::<InvoiceId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(InvoiceError::InvalidId(raw.to_string())),
    }
}

fn describe(errors: ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => format!("{} {}", field, message),
                None => format!("{} is invalid ({})", field, err.code),
            })
        })
        .collect();
    messages.sort();
    messages
}

fn into_result(problems: Vec<String>) -> Result<(), InvoiceError> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(InvoiceError::Validation(problems.join(", ")))
    }
}
