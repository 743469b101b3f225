//! In-process API tests against the memory storage backend

use axum::http::StatusCode;
use axum_test::TestServer;
use library_server::{api::create_router, repository::Repository, AppState};
use serde_json::{json, Value};

fn create_test_server() -> TestServer {
    let state = AppState::new(Repository::in_memory());
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

async fn create_book(server: &TestServer, serial: &str, title: &str, author: &str) -> Value {
    let response = server
        .post("/books/")
        .json(&json!({
            "serial_number": serial,
            "title": title,
            "author": author
        }))
        .await;
    response.assert_status_ok();
    response.json()
}

async fn list_serials(server: &TestServer) -> Vec<String> {
    let response = server.get("/books/").await;
    response.assert_status_ok();
    let body: Value = response.json();
    let mut serials: Vec<String> = body
        .as_array()
        .expect("list response is an array")
        .iter()
        .map(|book| book["serial_number"].as_str().unwrap().to_string())
        .collect();
    serials.sort();
    serials
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_readiness_check() {
    let server = create_test_server();

    let response = server.get("/ready").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_create_book_defaults() {
    let server = create_test_server();

    let body = create_book(&server, "AAA111", "Dune", "Herbert").await;

    assert!(body["id"].is_number());
    assert_eq!(body["serial_number"], "AAA111");
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["author"], "Herbert");
    assert_eq!(body["is_borrowed"], false);
    assert!(body["borrowed_by"].is_null());
    assert!(body["borrowed_date"].is_null());
}

#[tokio::test]
async fn test_create_duplicate_serial_conflicts() {
    let server = create_test_server();
    let original = create_book(&server, "AAA111", "Dune", "Herbert").await;

    let response = server
        .post("/books/")
        .json(&json!({
            "serial_number": "AAA111",
            "title": "Dune Messiah",
            "author": "Herbert"
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let body: Value = server.get("/books/").await.json();
    let books = body.as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0], original);
}

#[tokio::test]
async fn test_create_rejects_bad_serial() {
    let server = create_test_server();

    let response = server
        .post("/books/")
        .json(&json!({
            "serial_number": "AAA1",
            "title": "Dune",
            "author": "Herbert"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["fields"]["serial_number"].is_array());
    assert!(list_serials(&server).await.is_empty());
}

#[tokio::test]
async fn test_create_rejects_missing_field() {
    let server = create_test_server();

    let response = server
        .post("/books/")
        .json(&json!({ "serial_number": "AAA111", "title": "Dune" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "BadValue");
    assert!(body["message"].as_str().unwrap().contains("author"));
}

#[tokio::test]
async fn test_list_returns_all_books() {
    let server = create_test_server();
    assert!(list_serials(&server).await.is_empty());

    create_book(&server, "CCC333", "Neuromancer", "Gibson").await;
    create_book(&server, "AAA111", "Dune", "Herbert").await;
    create_book(&server, "BBB222", "Solaris", "Lem").await;

    assert_eq!(list_serials(&server).await, vec!["AAA111", "BBB222", "CCC333"]);
}

#[tokio::test]
async fn test_list_without_trailing_slash() {
    let server = create_test_server();
    create_book(&server, "AAA111", "Dune", "Herbert").await;

    let response = server.get("/books").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_book() {
    let server = create_test_server();
    create_book(&server, "AAA111", "Dune", "Herbert").await;
    create_book(&server, "BBB222", "Solaris", "Lem").await;

    let response = server.delete("/books/AAA111").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "message": "Book deleted" }));

    assert_eq!(list_serials(&server).await, vec!["BBB222"]);

    let response = server.delete("/books/AAA111").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn test_update_sets_borrow_state() {
    let server = create_test_server();
    let created = create_book(&server, "AAA111", "Dune", "Herbert").await;

    let response = server
        .put("/books/AAA111")
        .json(&json!({
            "is_borrowed": true,
            "borrowed_by": "U00001",
            "borrowed_date": "2024-01-15"
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["is_borrowed"], true);
    assert_eq!(body["borrowed_by"], "U00001");
    assert_eq!(body["borrowed_date"], "2024-01-15");
}

#[tokio::test]
async fn test_update_return_clears_borrow_state() {
    let server = create_test_server();
    create_book(&server, "AAA111", "Dune", "Herbert").await;

    server
        .put("/books/AAA111")
        .json(&json!({
            "is_borrowed": true,
            "borrowed_by": "U00001",
            "borrowed_date": "2024-01-15"
        }))
        .await
        .assert_status_ok();

    let response = server
        .put("/books/AAA111")
        .json(&json!({ "is_borrowed": false }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["is_borrowed"], false);
    assert!(body["borrowed_by"].is_null());
    assert!(body["borrowed_date"].is_null());
}

#[tokio::test]
async fn test_update_requires_is_borrowed() {
    let server = create_test_server();
    create_book(&server, "AAA111", "Dune", "Herbert").await;

    let response = server
        .put("/books/AAA111")
        .json(&json!({ "borrowed_by": "U00001" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_rejects_bad_borrower() {
    let server = create_test_server();
    create_book(&server, "AAA111", "Dune", "Herbert").await;

    let response = server
        .put("/books/AAA111")
        .json(&json!({ "is_borrowed": true, "borrowed_by": "U1" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["fields"]["borrowed_by"].is_array());
}

#[tokio::test]
async fn test_update_unknown_serial() {
    let server = create_test_server();

    let response = server
        .put("/books/ZZZ999")
        .json(&json!({ "is_borrowed": true }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_lifecycle() {
    let server = create_test_server();

    let created = create_book(&server, "AAA111", "Dune", "Herbert").await;
    assert!(created["id"].is_number());
    assert_eq!(created["is_borrowed"], false);

    let updated: Value = server
        .put("/books/AAA111")
        .json(&json!({
            "is_borrowed": true,
            "borrowed_by": "U00001",
            "borrowed_date": "2024-01-15"
        }))
        .await
        .json();
    assert_eq!(updated["is_borrowed"], true);
    assert_eq!(updated["borrowed_by"], "U00001");
    assert_eq!(updated["borrowed_date"], "2024-01-15");

    server
        .delete("/books/AAA111")
        .await
        .assert_json(&json!({ "message": "Book deleted" }));

    server.get("/books/").await.assert_json(&json!([]));
}

#[tokio::test]
async fn test_openapi_document() {
    let server = create_test_server();

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["info"]["title"], "Library API");
    assert!(body["paths"]["/books/"].is_object());
}
