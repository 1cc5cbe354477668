//! Storage for books.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use super::lending::LendingStatus;
use super::models::{Book, BookFields, BookId, ReadingStatus};

/// Filters for listing books; unset filters match everything and set ones
/// must all match.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookFilter {
    /// Case-insensitive substring of the author
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, alias = "lendingStatus")]
    pub status: Option<LendingStatus>,
    #[serde(default)]
    pub reading_status: Option<ReadingStatus>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        let author_matches = self.author.as_ref().map_or(true, |needle| {
            book.author.to_lowercase().contains(&needle.to_lowercase())
        });
        author_matches
            && self.status.map_or(true, |status| book.lending.status() == status)
            && self
                .reading_status
                .map_or(true, |status| book.reading_status == status)
    }
}

/// Owns the book collection and hands out identifiers.
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn get(&self, id: BookId) -> Option<Book>;

    /// Books matching `filter`, in id order.
    async fn list(&self, filter: &BookFilter) -> Vec<Book>;

    /// Store a new book under a freshly assigned id.
    async fn insert(&self, fields: BookFields) -> Book;

    /// Replace the stored book with the same id. Returns `None` if there is none.
    async fn update(&self, book: Book) -> Option<Book>;

    /// Remove a book, returning it if it existed.
    async fn delete(&self, id: BookId) -> Option<Book>;

    async fn count(&self) -> usize;
}

#[derive(Debug, Default)]
struct Shelf {
    books: BTreeMap<BookId, Book>,
    /// Highest id ever handed out; ids are never reused after a delete.
    last_issued: u64,
}

impl Shelf {
    fn next_id(&mut self) -> BookId {
        let highest_stored = self.books.keys().next_back().map_or(0, |id| id.value());
        self.last_issued = self.last_issued.max(highest_stored) + 1;
        BookId::new(self.last_issued)
    }
}

/// Process-lifetime, in-memory repository.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    shelf: RwLock<Shelf>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of books, keeping their ids.
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let books: BTreeMap<BookId, Book> = books.into_iter().map(|book| (book.id, book)).collect();
        let last_issued = books.keys().next_back().map_or(0, |id| id.value());
        Self {
            shelf: RwLock::new(Shelf { books, last_issued }),
        }
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn get(&self, id: BookId) -> Option<Book> {
        self.shelf.read().await.books.get(&id).cloned()
    }

    async fn list(&self, filter: &BookFilter) -> Vec<Book> {
        self.shelf
            .read()
            .await
            .books
            .values()
            .filter(|book| filter.matches(book))
            .cloned()
            .collect()
    }

    async fn insert(&self, fields: BookFields) -> Book {
        let mut shelf = self.shelf.write().await;
        let id = shelf.next_id();
        let book = Book::new(id, fields);
        shelf.books.insert(id, book.clone());
        book
    }

    async fn update(&self, book: Book) -> Option<Book> {
        let mut shelf = self.shelf.write().await;
        let slot = shelf.books.get_mut(&book.id)?;
        *slot = book.clone();
        Some(book)
    }

    async fn delete(&self, id: BookId) -> Option<Book> {
        self.shelf.write().await.books.remove(&id)
    }

    async fn count(&self) -> usize {
        self.shelf.read().await.books.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::fixtures;
    use crate::modules::books::lending::Lending;

    fn fields(title: &str) -> BookFields {
        BookFields::new(title, "Anonymous", ReadingStatus::WantToRead)
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increase() {
        let repo = InMemoryBookRepository::new();
        let first = repo.insert(fields("A")).await;
        let second = repo.insert(fields("B")).await;
        assert_eq!(first.id, BookId::new(1));
        assert_eq!(second.id, BookId::new(2));
        assert_eq!(repo.count().await, 2);
    }

    #[tokio::test]
    async fn ids_follow_seeded_books() {
        let repo = InMemoryBookRepository::with_books(fixtures::sample_books());
        let book = repo.insert(fields("Neuromancer")).await;
        assert_eq!(book.id, BookId::new(5));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_deleting_the_newest() {
        let repo = InMemoryBookRepository::new();
        repo.insert(fields("A")).await;
        let second = repo.insert(fields("B")).await;
        repo.delete(second.id).await.unwrap();

        let third = repo.insert(fields("C")).await;
        assert_eq!(third.id, BookId::new(3));
    }

    #[tokio::test]
    async fn list_keeps_id_order() {
        let repo = InMemoryBookRepository::new();
        for title in ["C", "A", "B"] {
            repo.insert(fields(title)).await;
        }
        let titles: Vec<_> = repo
            .list(&BookFilter::default())
            .await
            .into_iter()
            .map(|book| book.title)
            .collect();
        assert_eq!(titles, ["C", "A", "B"]);
    }

    #[tokio::test]
    async fn update_requires_existing_book() {
        let repo = InMemoryBookRepository::new();
        let book = repo.insert(fields("A")).await;

        let mut changed = book.clone();
        changed.title = "A, revised".into();
        assert_eq!(repo.update(changed).await.unwrap().title, "A, revised");
        assert_eq!(repo.get(book.id).await.unwrap().title, "A, revised");

        let mut ghost = book;
        ghost.id = BookId::new(42);
        assert!(repo.update(ghost).await.is_none());
        assert_eq!(repo.count().await, 1);
    }

    #[test]
    fn filter_matches_author_substring_case_insensitively() {
        let books = fixtures::sample_books();
        let filter = BookFilter {
            author: Some("tolkien".into()),
            ..BookFilter::default()
        };
        let matched: Vec<_> = books.iter().filter(|b| filter.matches(b)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].author, "J.R.R. Tolkien");
    }

    #[test]
    fn filters_combine_with_and() {
        let books = fixtures::sample_books();
        let filter = BookFilter {
            status: Some(LendingStatus::LentOut),
            reading_status: Some(ReadingStatus::Read),
            ..BookFilter::default()
        };
        let matched: Vec<_> = books.iter().filter(|b| filter.matches(b)).collect();
        assert_eq!(matched.len(), 1);
        assert!(matches!(matched[0].lending, Lending::LentOut { .. }));

        let filter = BookFilter {
            author: Some("herbert".into()),
            reading_status: Some(ReadingStatus::Read),
            ..BookFilter::default()
        };
        assert!(!books.iter().any(|b| filter.matches(b)));
    }

    #[test]
    fn filter_accepts_both_status_spellings() {
        let a: BookFilter = serde_json::from_str(r#"{"status": "LENT_OUT"}"#).unwrap();
        let b: BookFilter = serde_json::from_str(r#"{"lendingStatus": "LENT_OUT"}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.status, Some(LendingStatus::LentOut));
    }
}
