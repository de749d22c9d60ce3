//! Entity trait defining the bookkeeping shared by persisted records

use chrono::{DateTime, Utc};

/// Numeric identifier assigned by the store on creation.
pub type EntityId = i64;

/// Base trait for persisted records.
///
/// Records are soft-deleted: `deleted_at` is set instead of removing the row.
/// Timestamps are owned by the persistence layer; handlers never set them.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "invoices")
    fn resource_name() -> &'static str;

    /// Get the deletion timestamp (soft delete)
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Check if the entity has been soft-deleted
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// Collection path for this entity (e.g., "/invoices")
    fn collection_path() -> String {
        format!("/{}", Self::resource_name())
    }

    /// Item path for this entity using axum's capture syntax (e.g., "/invoices/{id}")
    fn item_path() -> String {
        format!("/{}/{{id}}", Self::resource_name())
    }
}
