//! In-process book storage with the same constraints as the SQL table

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{BookSession, BookStore};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BorrowState, CreateBook},
};

#[derive(Debug, Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, Book>,
}

#[derive(Clone, Default)]
pub struct MemoryBookStore {
    table: Arc<Mutex<Table>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn session(&self) -> AppResult<Box<dyn BookSession>> {
        Ok(Box::new(MemoryBookSession {
            table: Arc::clone(&self.table),
        }))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn close(&self) {
        let table = self.table.lock().await;
        tracing::info!("Closing in-memory store holding {} books", table.rows.len());
    }
}

pub struct MemoryBookSession {
    table: Arc<Mutex<Table>>,
}

#[async_trait]
impl BookSession for MemoryBookSession {
    async fn insert(&mut self, book: &CreateBook) -> AppResult<Book> {
        let mut table = self.table.lock().await;

        if table
            .rows
            .values()
            .any(|row| row.serial_number == book.serial_number)
        {
            return Err(AppError::Conflict(format!(
                "Book with serial number {} already exists",
                book.serial_number
            )));
        }

        table.next_id += 1;
        let row = Book {
            id: table.next_id,
            serial_number: book.serial_number.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            is_borrowed: false,
            borrowed_by: None,
            borrowed_date: None,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_all(&mut self) -> AppResult<Vec<Book>> {
        let table = self.table.lock().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_serial(&mut self, serial_number: &str) -> AppResult<Option<Book>> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .values()
            .find(|row| row.serial_number == serial_number)
            .cloned())
    }

    async fn delete(&mut self, book: &Book) -> AppResult<()> {
        let mut table = self.table.lock().await;
        table
            .rows
            .remove(&book.id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    async fn update_fields(&mut self, book: &Book, borrow: &BorrowState) -> AppResult<Book> {
        let mut table = self.table.lock().await;
        let row = table
            .rows
            .get_mut(&book.id)
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        row.is_borrowed = borrow.is_borrowed;
        row.borrowed_by = borrow.borrowed_by.clone();
        row.borrowed_date = borrow.borrowed_date.clone();
        Ok(row.clone())
    }
}
