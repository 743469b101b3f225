//! Repository layer for book storage
//!
//! A [`BookStore`] is the long-lived storage handle, created once at startup and
//! closed at shutdown. Each request borrows a [`BookSession`] from it; the session
//! is released when dropped, whatever path the request took.

pub mod memory;
pub mod postgres;
pub mod schema;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::{AppConfig, StorageBackend},
    error::AppResult,
    models::{Book, BorrowState, CreateBook},
};

pub use memory::MemoryBookStore;
pub use postgres::PgBookStore;

/// Long-lived storage handle
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Acquire a session scoped to one request
    async fn session(&self) -> AppResult<Box<dyn BookSession>>;

    /// Round-trip to the storage engine
    async fn ping(&self) -> AppResult<()>;

    /// Release every resource held by the handle
    async fn close(&self);
}

/// Operations available on a single storage session.
///
/// Every write commits immediately.
#[async_trait]
pub trait BookSession: Send {
    /// Insert a new row; fails with `Conflict` when the serial number is taken
    async fn insert(&mut self, book: &CreateBook) -> AppResult<Book>;

    /// All rows, in no particular order
    async fn list_all(&mut self) -> AppResult<Vec<Book>>;

    async fn find_by_serial(&mut self, serial_number: &str) -> AppResult<Option<Book>>;

    async fn delete(&mut self, book: &Book) -> AppResult<()>;

    /// Overwrite the borrow fields of `book`, leaving the others untouched
    async fn update_fields(&mut self, book: &Book, borrow: &BorrowState) -> AppResult<Book>;
}

/// Storage handle shared by all services
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn BookStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Build the configured backend and make sure the books table exists
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        let store: Arc<dyn BookStore> = match config.storage.backend {
            StorageBackend::Postgres => {
                let store = PgBookStore::connect(&config.database).await?;
                store.ensure_schema().await?;
                Arc::new(store)
            }
            StorageBackend::Memory => Arc::new(MemoryBookStore::new()),
        };
        Ok(Self::new(store))
    }

    /// In-process repository, used for local runs and tests
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBookStore::new()))
    }

    pub async fn session(&self) -> AppResult<Box<dyn BookSession>> {
        self.store.session().await
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }

    pub async fn close(&self) {
        self.store.close().await
    }
}
