//! Books table definition and row mapping

use sqlx::{postgres::PgRow, FromRow, Row};

use crate::models::Book;

pub const TABLE: &str = "books";

pub const ID: &str = "id";
pub const SERIAL_NUMBER: &str = "serial_number";
pub const TITLE: &str = "title";
pub const AUTHOR: &str = "author";
pub const IS_BORROWED: &str = "is_borrowed";
pub const BORROWED_BY: &str = "borrowed_by";
pub const BORROWED_DATE: &str = "borrowed_date";

/// Column list used by every SELECT / RETURNING clause
pub const COLUMNS: &str =
    "id, serial_number, title, author, is_borrowed, borrowed_by, borrowed_date";

pub const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id            SERIAL PRIMARY KEY,
    serial_number VARCHAR(6) NOT NULL UNIQUE,
    title         VARCHAR NOT NULL,
    author        VARCHAR NOT NULL,
    is_borrowed   BOOLEAN NOT NULL DEFAULT FALSE,
    borrowed_by   VARCHAR(6),
    borrowed_date VARCHAR
)
"#;

impl<'r> FromRow<'r, PgRow> for Book {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(ID)?,
            serial_number: row.try_get(SERIAL_NUMBER)?,
            title: row.try_get(TITLE)?,
            author: row.try_get(AUTHOR)?,
            is_borrowed: row.try_get(IS_BORROWED)?,
            borrowed_by: row.try_get(BORROWED_BY)?,
            borrowed_date: row.try_get(BORROWED_DATE)?,
        })
    }
}
