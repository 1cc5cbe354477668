use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{BookError, INVALID_RATING_MESSAGE};
use super::lending::{Lending, LendingStatus};
use super::rating::{self, DetailedRating};

/// Identifier assigned by the repository when a book is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u64);

impl BookId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a book is in the reading journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadingStatus {
    /// Finished; typically rated
    Read,
    WantToRead,
    /// Owned and waiting on the pile
    WantToReadOwn,
    CurrentlyReading,
}

/// A book in the library.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    /// `DNF` or a star value on the quarter grid
    pub rating: Option<String>,
    pub detailed_rating: Option<DetailedRating>,
    pub reading_status: ReadingStatus,
    pub isbn: Option<String>,
    pub year: Option<i32>,
    pub lending: Lending,
}

impl Book {
    /// A freshly created book, on the shelf.
    pub fn new(id: BookId, fields: BookFields) -> Self {
        Self {
            id,
            title: fields.title,
            author: fields.author,
            description: fields.description,
            rating: fields.rating,
            detailed_rating: fields.detailed_rating,
            reading_status: fields.reading_status,
            isbn: fields.isbn,
            year: fields.year,
            lending: Lending::OnShelf,
        }
    }

    /// Replace every editable field, keeping identity and lending state.
    pub fn apply(&self, fields: BookFields) -> Self {
        Self {
            id: self.id,
            lending: self.lending.clone(),
            ..Book::new(self.id, fields)
        }
    }

    /// Stars derived from the detailed rating, if any category is populated.
    pub fn calculated_stars(&self) -> Option<f64> {
        self.detailed_rating.as_ref().and_then(rating::compute_stars)
    }
}

/// Every editable field of a book. Used for both create and full update;
/// optional fields left out of the payload are cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub reading_status: ReadingStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub detailed_rating: Option<DetailedRating>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl BookFields {
    /// Minimal payload; optional fields start out empty.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        reading_status: ReadingStatus,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            reading_status,
            description: None,
            rating: None,
            detailed_rating: None,
            isbn: None,
            year: None,
        }
    }

    /// Gate run before a book is created or replaced.
    pub fn validate(&self) -> Result<(), BookError> {
        if !rating::is_valid_simple_rating(self.rating.as_deref()) {
            return Err(BookError::validation("rating", INVALID_RATING_MESSAGE));
        }
        if let Some(detailed) = &self.detailed_rating {
            rating::validate_detailed_rating(detailed)?;
        }
        if self.title.trim().is_empty() {
            return Err(BookError::validation("title", "title must not be blank"));
        }
        if self.author.trim().is_empty() {
            return Err(BookError::validation("author", "author must not be blank"));
        }
        Ok(())
    }
}

/// JSON view of a [`Book`], with lending state split into two fields and
/// the derived star value attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub rating: Option<String>,
    pub detailed_rating: Option<DetailedRating>,
    pub calculated_stars: Option<f64>,
    pub reading_status: ReadingStatus,
    pub isbn: Option<String>,
    pub year: Option<i32>,
    pub lending_status: LendingStatus,
    pub lent_to: Option<String>,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            rating: book.rating.clone(),
            detailed_rating: book.detailed_rating.clone(),
            calculated_stars: book.calculated_stars(),
            reading_status: book.reading_status,
            isbn: book.isbn.clone(),
            year: book.year,
            lending_status: book.lending.status(),
            lent_to: book.lending.borrower().map(str::to_owned),
        }
    }
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self::from(&book)
    }
}

/// Body of a lend request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LendRequest {
    pub lent_to: String,
}
