//! Book model and request payloads

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Book record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Surrogate identifier assigned by storage
    pub id: i32,
    /// Six-character external identifier, unique and immutable
    #[schema(example = "AAA111")]
    pub serial_number: String,
    pub title: String,
    pub author: String,
    pub is_borrowed: bool,
    /// Six-character borrower identifier
    pub borrowed_by: Option<String>,
    /// ISO-8601 calendar date (`YYYY-MM-DD`)
    pub borrowed_date: Option<String>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(equal = 6, message = "Serial number must be exactly 6 characters"))]
    #[schema(example = "AAA111")]
    pub serial_number: String,
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
}

/// Update book request.
///
/// Replaces the whole borrow state: omitted optional fields are stored as null.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateBook {
    pub is_borrowed: bool,
    #[validate(length(equal = 6, message = "Borrower identifier must be exactly 6 characters"))]
    #[schema(example = "U00001")]
    pub borrowed_by: Option<String>,
    #[schema(example = "2024-01-15")]
    pub borrowed_date: Option<NaiveDate>,
}

/// Borrow state as persisted: the three fields an update overwrites
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BorrowState {
    pub is_borrowed: bool,
    pub borrowed_by: Option<String>,
    pub borrowed_date: Option<String>,
}

impl From<UpdateBook> for BorrowState {
    fn from(update: UpdateBook) -> Self {
        Self {
            is_borrowed: update.is_borrowed,
            borrowed_by: update.borrowed_by,
            borrowed_date: update
                .borrowed_date
                .map(|date| date.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Deletion confirmation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Book deleted")]
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Book deleted".to_string(),
        }
    }
}
