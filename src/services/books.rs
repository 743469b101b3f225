//! Book management service

use crate::{
    error::{AppError, AppResult},
    models::{Book, BorrowState, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a book; it starts out not borrowed
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let mut session = self.repository.session().await?;
        let book = session.insert(data).await?;
        tracing::info!("Created book {} (id={})", book.serial_number, book.id);
        Ok(book)
    }

    /// List every book
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let mut session = self.repository.session().await?;
        let books = session.list_all().await?;
        tracing::debug!("Listed {} books", books.len());
        Ok(books)
    }

    /// Delete a book by serial number
    pub async fn delete(&self, serial_number: &str) -> AppResult<()> {
        let mut session = self.repository.session().await?;
        let book = session
            .find_by_serial(serial_number)
            .await?
            .ok_or_else(not_found)?;
        session.delete(&book).await?;
        tracing::info!("Deleted book {} (id={})", book.serial_number, book.id);
        Ok(())
    }

    /// Replace the borrow state of a book
    pub async fn update(&self, serial_number: &str, data: UpdateBook) -> AppResult<Book> {
        let mut session = self.repository.session().await?;
        let book = session
            .find_by_serial(serial_number)
            .await?
            .ok_or_else(not_found)?;

        let borrow = BorrowState::from(data);
        let updated = session.update_fields(&book, &borrow).await?;
        tracing::info!(
            "Updated book {}: is_borrowed={} borrowed_by={:?} borrowed_date={:?}",
            updated.serial_number,
            updated.is_borrowed,
            updated.borrowed_by,
            updated.borrowed_date
        );
        Ok(updated)
    }

    /// Check that storage answers
    pub async fn ready(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Book not found".to_string())
}
