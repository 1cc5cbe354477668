use serde_json::json;
use shelf_http::AppError;
use thiserror::Error;

use super::lending::AlreadyLent;
use super::models::BookId;
use super::rating::InvalidCategoryScore;

/// Message returned for a simple rating that is neither `DNF` nor on the star grid.
pub const INVALID_RATING_MESSAGE: &str =
    "Invalid rating. Use DNF, or 1–5 in .25 steps (e.g. 4.5, 3.25)";

/// Errors produced by book operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    #[error("book {0} not found")]
    NotFound(BookId),

    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("{message}")]
    Conflict { message: String },
}

impl BookError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<InvalidCategoryScore> for BookError {
    fn from(err: InvalidCategoryScore) -> Self {
        Self::validation(err.category.name(), err.to_string())
    }
}

impl From<AlreadyLent> for BookError {
    fn from(err: AlreadyLent) -> Self {
        Self::Conflict {
            message: err.to_string(),
        }
    }
}

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NotFound(_) => AppError::not_found(err.to_string()),
            BookError::Validation { field, message } => AppError::validation(
                vec![json!({ "field": field, "error": message })],
                message,
            ),
            BookError::Conflict { message } => AppError::conflict(vec![], message),
        }
    }
}
