//! Book API endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{Book, CreateBook, DeleteResponse, UpdateBook},
};

use super::ValidatedJson;

/// Create a book
#[utoipa::path(
    post,
    path = "/books/",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 200, description = "Book created", body = Book),
        (status = 400, description = "Invalid request body", body = crate::error::ErrorResponse),
        (status = 409, description = "Serial number already in use", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    ValidatedJson(data): ValidatedJson<CreateBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.create(&data).await?;
    Ok(Json(book))
}

/// List all books
#[utoipa::path(
    get,
    path = "/books/",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{serial_number}",
    tag = "books",
    params(("serial_number" = String, Path, description = "Book serial number")),
    responses(
        (status = 200, description = "Book deleted", body = DeleteResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(serial_number): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    state.services.books.delete(&serial_number).await?;
    Ok(Json(DeleteResponse::deleted()))
}

/// Replace the borrow state of a book
#[utoipa::path(
    put,
    path = "/books/{serial_number}",
    tag = "books",
    params(("serial_number" = String, Path, description = "Book serial number")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid request body", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(serial_number): Path<String>,
    ValidatedJson(data): ValidatedJson<UpdateBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.update(&serial_number, data).await?;
    Ok(Json(book))
}
