//! REST integration test macro for storage backends.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that validate
//! an `InvoiceStore` through full REST round-trips.
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_rest_create`: POST 201 + stored record
//! - `test_rest_get`: GET 200 + same record
//! - `test_rest_list`: GET 200 + array ordered by id
//! - `test_rest_list_empty`: GET 200 + `[]`
//! - `test_rest_partial_update`: PUT with one key keeps the others
//! - `test_rest_delete`: DELETE 204, then GET 404 and absent from list
//!
//! ## Error handling
//! - `test_rest_delete_twice`: second DELETE → 404
//! - `test_rest_error_not_found`: GET unknown id → 404
//! - `test_rest_error_invalid_id`: GET `/invoices/abc` → 400
//! - `test_rest_update_missing`: PUT unknown id → 404
#[macro_export]
macro_rules! rest_integration_tests {
    ($store_factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use serde_json::{Value, json};

            async fn make_server() -> TestServer {
                let store = $store_factory;
                let router = storage_harness::integration::build_test_router(store);
                TestServer::try_new(router).unwrap()
            }

            async fn create(server: &TestServer, name: &str, amount: f64) -> Value {
                let response = server
                    .post("/invoices")
                    .json(&json!({
                        "name": name,
                        "status": "pending",
                        "method": "card",
                        "amount": amount
                    }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                response.json()
            }

            // ==============================================================
            // CRUD
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server().await;
                let body = create(&server, "Acme", 42.5).await;

                assert!(body["ID"].as_i64().unwrap() > 0);
                assert_eq!(body["name"], "Acme");
                assert_eq!(body["status"], "pending");
                assert_eq!(body["method"], "card");
                assert_eq!(body["amount"], 42.5);
                assert!(body["CreatedAt"].is_string());
                assert!(body["UpdatedAt"].is_string());
                assert!(body["DeletedAt"].is_null());
            }

            #[tokio::test]
            async fn test_rest_get() {
                let server = make_server().await;
                let created = create(&server, "Acme", 10.0).await;
                let id = created["ID"].as_i64().unwrap();

                let response = server.get(&format!("/invoices/{}", id)).await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["ID"], id);
                assert_eq!(body["name"], "Acme");
                assert_eq!(body["amount"], 10.0);
            }

            #[tokio::test]
            async fn test_rest_list() {
                let server = make_server().await;
                create(&server, "First", 1.0).await;
                create(&server, "Second", 2.0).await;

                let response = server.get("/invoices").await;
                response.assert_status_ok();

                let body: Vec<Value> = response.json();
                assert_eq!(body.len(), 2);
                assert_eq!(body[0]["name"], "First");
                assert_eq!(body[1]["name"], "Second");
            }

            #[tokio::test]
            async fn test_rest_list_empty() {
                let server = make_server().await;

                let response = server.get("/invoices").await;
                response.assert_status_ok();
                response.assert_json(&json!([]));
            }

            #[tokio::test]
            async fn test_rest_partial_update() {
                let server = make_server().await;
                let created = create(&server, "Acme", 42.5).await;
                let id = created["ID"].as_i64().unwrap();

                let response = server
                    .put(&format!("/invoices/{}", id))
                    .json(&json!({ "status": "paid" }))
                    .await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["status"], "paid");
                assert_eq!(body["amount"], 42.5);
                assert_eq!(body["name"], "Acme");
                assert_eq!(body["method"], "card");

                let reread: Value = server.get(&format!("/invoices/{}", id)).await.json();
                assert_eq!(reread["status"], "paid");
                assert_eq!(reread["amount"], 42.5);
            }

            #[tokio::test]
            async fn test_rest_delete() {
                let server = make_server().await;
                let kept = create(&server, "Kept", 1.0).await;
                let gone = create(&server, "Gone", 2.0).await;
                let gone_id = gone["ID"].as_i64().unwrap();

                let response = server.delete(&format!("/invoices/{}", gone_id)).await;
                response.assert_status(StatusCode::NO_CONTENT);

                let response = server.get(&format!("/invoices/{}", gone_id)).await;
                response.assert_status(StatusCode::NOT_FOUND);

                let listed: Vec<Value> = server.get("/invoices").await.json();
                assert_eq!(listed.len(), 1);
                assert_eq!(listed[0]["ID"], kept["ID"]);
            }

            // ==============================================================
            // Error handling
            // ==============================================================

            #[tokio::test]
            async fn test_rest_delete_twice() {
                let server = make_server().await;
                let created = create(&server, "Acme", 1.0).await;
                let path = format!("/invoices/{}", created["ID"]);

                server
                    .delete(&path)
                    .await
                    .assert_status(StatusCode::NO_CONTENT);

                let response = server.delete(&path).await;
                response.assert_status(StatusCode::NOT_FOUND);
                response.assert_json(&json!({ "error": "Invoice not found" }));
            }

            #[tokio::test]
            async fn test_rest_error_not_found() {
                let server = make_server().await;

                let response = server.get("/invoices/999999").await;
                response.assert_status(StatusCode::NOT_FOUND);
                response.assert_json(&json!({ "error": "Invoice not found" }));
            }

            #[tokio::test]
            async fn test_rest_error_invalid_id() {
                let server = make_server().await;

                let response = server.get("/invoices/abc").await;
                response.assert_status(StatusCode::BAD_REQUEST);
                response.assert_json(&json!({ "error": "Invalid ID parameter" }));
            }

            #[tokio::test]
            async fn test_rest_update_missing() {
                let server = make_server().await;

                let response = server
                    .put("/invoices/999999")
                    .json(&json!({ "status": "paid" }))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
            }
        }
    };
}
