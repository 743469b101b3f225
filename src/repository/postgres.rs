//! PostgreSQL book storage

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{pool::PoolConnection, postgres::PgPoolOptions, Pool, Postgres};

use super::{schema, BookSession, BookStore};
use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
    models::{Book, BorrowState, CreateBook},
};

/// Connection pool over the books table
#[derive(Clone)]
pub struct PgBookStore {
    pool: Pool<Postgres>,
}

impl PgBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;

        tracing::info!("Connected to database");
        Ok(Self::new(pool))
    }

    /// Create the books table when it does not exist yet
    pub async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::query(schema::CREATE_TABLE).execute(&self.pool).await?;
        tracing::info!("Table {} ready", schema::TABLE);
        Ok(())
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn session(&self) -> AppResult<Box<dyn BookSession>> {
        let conn = self.pool.acquire().await?;
        Ok(Box::new(PgBookSession { conn }))
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}

/// One pooled connection, returned to the pool on drop
pub struct PgBookSession {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl BookSession for PgBookSession {
    async fn insert(&mut self, book: &CreateBook) -> AppResult<Book> {
        let query = format!(
            "INSERT INTO {} (serial_number, title, author) VALUES ($1, $2, $3) RETURNING {}",
            schema::TABLE,
            schema::COLUMNS
        );

        sqlx::query_as::<_, Book>(&query)
            .bind(&book.serial_number)
            .bind(&book.title)
            .bind(&book.author)
            .fetch_one(&mut *self.conn)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(
                    format!("Book with serial number {} already exists", book.serial_number),
                ),
                other => AppError::Database(other),
            })
    }

    async fn list_all(&mut self) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {} FROM {}", schema::COLUMNS, schema::TABLE);
        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    async fn find_by_serial(&mut self, serial_number: &str) -> AppResult<Option<Book>> {
        let query = format!(
            "SELECT {} FROM {} WHERE serial_number = $1",
            schema::COLUMNS,
            schema::TABLE
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(serial_number)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row)
    }

    async fn delete(&mut self, book: &Book) -> AppResult<()> {
        let query = format!("DELETE FROM {} WHERE id = $1", schema::TABLE);
        let result = sqlx::query(&query)
            .bind(book.id)
            .execute(&mut *self.conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        Ok(())
    }

    async fn update_fields(&mut self, book: &Book, borrow: &BorrowState) -> AppResult<Book> {
        let query = format!(
            r#"
            UPDATE {}
            SET is_borrowed = $1, borrowed_by = $2, borrowed_date = $3
            WHERE id = $4
            RETURNING {}
            "#,
            schema::TABLE,
            schema::COLUMNS
        );

        sqlx::query_as::<_, Book>(&query)
            .bind(borrow.is_borrowed)
            .bind(&borrow.borrowed_by)
            .bind(&borrow.borrowed_date)
            .bind(book.id)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }
}
