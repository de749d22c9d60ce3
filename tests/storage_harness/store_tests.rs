//! Conformance test suite for `InvoiceStore` implementations.
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_and_get`: create assigns id and timestamps, get returns it
//! - `test_get_nonexistent`: unknown id yields `None`
//! - `test_list_empty` / `test_list_ordered_by_id`
//! - `test_update_is_sparse`: absent fields keep their stored value
//! - `test_update_nonexistent`: `None`, nothing written
//!
//! ## Soft delete
//! - `test_delete_hides_invoice`: delete returns true, then get/list skip it
//! - `test_delete_twice`: second delete returns false
//! - `test_update_deleted`: deleted invoices cannot be updated
//!
//! ## Edge Cases
//! - `test_concurrent_creates`: parallel creates get distinct ids

/// Generate a full `InvoiceStore` conformance test suite.
///
/// `$factory` must be an expression that evaluates to a fresh, empty store.
/// It is re-evaluated for each test to ensure isolation. For the concurrent
/// test the store must also be `Clone + 'static`.
#[macro_export]
macro_rules! invoice_store_tests {
    ($factory:expr) => {
        mod invoice_store_contract_tests {
            use super::*;
            use invoices::core::{InvoicePatch, InvoiceStore};

            // ==================================================================
            // CRUD - Create & Get
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let store = $factory;

                let created = store.create(sample_invoice("Acme")).await.unwrap();
                assert!(created.id > 0);
                assert_eq!(created.name, "Acme");
                assert_eq!(created.status, "pending");
                assert_eq!(created.method, "card");
                assert!((created.amount - 42.5).abs() < f64::EPSILON);
                assert!(created.deleted_at.is_none());
                assert_eq!(created.created_at, created.updated_at);

                let retrieved = store.get(created.id).await.unwrap();
                assert!(retrieved.is_some(), "Invoice should exist after create");
                let retrieved = retrieved.unwrap();
                assert_eq!(retrieved.id, created.id);
                assert_eq!(retrieved.name, "Acme");
                assert!((retrieved.amount - 42.5).abs() < f64::EPSILON);
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;
                let result = store.get(987_654).await.unwrap();
                assert!(result.is_none(), "Unknown id should return None");
            }

            // ==================================================================
            // CRUD - List
            // ==================================================================

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                let all = store.list().await.unwrap();
                assert!(all.is_empty(), "List on empty store should be empty");
            }

            #[tokio::test]
            async fn test_list_ordered_by_id() {
                let store = $factory;
                for invoice in sample_batch(4) {
                    store.create(invoice).await.unwrap();
                }

                let all = store.list().await.unwrap();
                assert_eq!(all.len(), 4);
                let ids: Vec<_> = all.iter().map(|i| i.id).collect();
                let mut sorted = ids.clone();
                sorted.sort();
                assert_eq!(ids, sorted);
                assert_eq!(all[0].name, "Invoice 0");
                assert_eq!(all[3].name, "Invoice 3");
            }

            // ==================================================================
            // CRUD - Update
            // ==================================================================

            #[tokio::test]
            async fn test_update_is_sparse() {
                let store = $factory;
                let created = store.create(sample_invoice("Acme")).await.unwrap();

                let updated = store
                    .update(created.id, status_patch("paid"))
                    .await
                    .unwrap()
                    .expect("active invoice should be updated");

                assert_eq!(updated.id, created.id);
                assert_eq!(updated.status, "paid");
                assert_eq!(updated.name, "Acme");
                assert_eq!(updated.method, "card");
                assert!((updated.amount - 42.5).abs() < f64::EPSILON);
                assert_eq!(updated.created_at, created.created_at);
                assert!(updated.updated_at >= created.updated_at);

                let reread = store.get(created.id).await.unwrap().unwrap();
                assert_eq!(reread.status, "paid");
            }

            #[tokio::test]
            async fn test_update_every_field() {
                let store = $factory;
                let created = store.create(sample_invoice("Acme")).await.unwrap();

                let patch = InvoicePatch {
                    name: Some("Globex".to_string()),
                    status: Some("void".to_string()),
                    method: Some("cash".to_string()),
                    amount: Some(7.25),
                };
                let updated = store.update(created.id, patch).await.unwrap().unwrap();
                assert_eq!(updated.name, "Globex");
                assert_eq!(updated.status, "void");
                assert_eq!(updated.method, "cash");
                assert!((updated.amount - 7.25).abs() < f64::EPSILON);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory;
                let result = store.update(424_242, status_patch("paid")).await.unwrap();
                assert!(result.is_none());
                assert!(store.list().await.unwrap().is_empty());
            }

            // ==================================================================
            // Soft delete
            // ==================================================================

            #[tokio::test]
            async fn test_delete_hides_invoice() {
                let store = $factory;
                let kept = store.create(sample_invoice("Kept")).await.unwrap();
                let gone = store.create(sample_invoice("Gone")).await.unwrap();

                assert!(store.delete(gone.id).await.unwrap());

                assert!(store.get(gone.id).await.unwrap().is_none());
                let all = store.list().await.unwrap();
                assert_eq!(all.len(), 1);
                assert_eq!(all[0].id, kept.id);
            }

            #[tokio::test]
            async fn test_delete_twice() {
                let store = $factory;
                let created = store.create(sample_invoice("Acme")).await.unwrap();

                assert!(store.delete(created.id).await.unwrap());
                assert!(!store.delete(created.id).await.unwrap());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let store = $factory;
                assert!(!store.delete(31_337).await.unwrap());
            }

            #[tokio::test]
            async fn test_update_deleted() {
                let store = $factory;
                let created = store.create(sample_invoice("Acme")).await.unwrap();
                store.delete(created.id).await.unwrap();

                let result = store.update(created.id, status_patch("paid")).await.unwrap();
                assert!(result.is_none(), "Deleted invoices must not be updated");
            }

            #[tokio::test]
            async fn test_ids_not_reused_after_delete() {
                let store = $factory;
                let first = store.create(sample_invoice("First")).await.unwrap();
                store.delete(first.id).await.unwrap();

                let second = store.create(sample_invoice("Second")).await.unwrap();
                assert!(second.id > first.id);
            }

            // ==================================================================
            // Edge Cases
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates() {
                let store = $factory;

                let mut handles = Vec::new();
                for invoice in sample_batch(8) {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move { store.create(invoice).await }));
                }

                let mut ids = Vec::new();
                for handle in handles {
                    ids.push(handle.await.unwrap().unwrap().id);
                }
                ids.sort();
                ids.dedup();
                assert_eq!(ids.len(), 8, "Every create should get its own id");
                assert_eq!(store.list().await.unwrap().len(), 8);
            }
        }
    };
}
