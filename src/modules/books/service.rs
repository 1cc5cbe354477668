use std::sync::Arc;

use tokio::sync::Mutex;

use super::error::BookError;
use super::models::{Book, BookFields, BookId};
use super::repository::{BookFilter, BookRepository};

/// Book operations on top of a [`BookRepository`].
///
/// Every operation that reads a book and writes it back holds the write
/// gate, so at most one mutation is in flight at a time.
pub struct BookService {
    repository: Arc<dyn BookRepository>,
    write_gate: Mutex<()>,
}

impl BookService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self {
            repository,
            write_gate: Mutex::new(()),
        }
    }

    pub async fn list(&self, filter: &BookFilter) -> Vec<Book> {
        let books = self.repository.list(filter).await;
        tracing::debug!(?filter, matched = books.len(), "listed books");
        books
    }

    pub async fn get(&self, id: BookId) -> Result<Book, BookError> {
        self.repository
            .get(id)
            .await
            .ok_or(BookError::NotFound(id))
    }

    pub async fn count(&self) -> usize {
        self.repository.count().await
    }

    pub async fn create(&self, fields: BookFields) -> Result<Book, BookError> {
        if let Err(err) = fields.validate() {
            tracing::warn!(error = %err, "rejected new book");
            return Err(err);
        }

        let _guard = self.write_gate.lock().await;
        let book = self.repository.insert(fields).await;
        tracing::info!(book_id = %book.id, title = %book.title, "book created");
        Ok(book)
    }

    /// Replace every editable field of a book. Lending state is left alone.
    pub async fn update(&self, id: BookId, fields: BookFields) -> Result<Book, BookError> {
        if let Err(err) = fields.validate() {
            tracing::warn!(book_id = %id, error = %err, "rejected book update");
            return Err(err);
        }

        let _guard = self.write_gate.lock().await;
        let current = self.get(id).await?;
        let updated = self
            .repository
            .update(current.apply(fields))
            .await
            .ok_or(BookError::NotFound(id))?;
        tracing::info!(book_id = %id, "book updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: BookId) -> Result<(), BookError> {
        let _guard = self.write_gate.lock().await;
        self.repository
            .delete(id)
            .await
            .ok_or(BookError::NotFound(id))?;
        tracing::info!(book_id = %id, "book deleted");
        Ok(())
    }

    /// Lend a book that is on the shelf. Fails with a conflict if it is already out.
    pub async fn lend(&self, id: BookId, borrower: impl Into<String>) -> Result<Book, BookError> {
        let borrower = borrower.into();
        let _guard = self.write_gate.lock().await;
        let mut book = self.get(id).await?;

        book.lending = book.lending.lend(borrower.as_str()).map_err(|err| {
            tracing::warn!(book_id = %id, %borrower, lent_to = %err.borrower, "book already lent");
            BookError::from(err)
        })?;

        let book = self
            .repository
            .update(book)
            .await
            .ok_or(BookError::NotFound(id))?;
        tracing::info!(book_id = %id, %borrower, "book lent");
        Ok(book)
    }

    /// Put a book back on the shelf, whatever its current state.
    pub async fn return_book(&self, id: BookId) -> Result<Book, BookError> {
        let _guard = self.write_gate.lock().await;
        let mut book = self.get(id).await?;
        let previous = book.lending.borrower().map(str::to_owned);
        book.lending = book.lending.return_to_shelf();

        let book = self
            .repository
            .update(book)
            .await
            .ok_or(BookError::NotFound(id))?;
        tracing::info!(book_id = %id, returned_by = ?previous, "book returned");
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::fixtures;
    use crate::modules::books::lending::{Lending, LendingStatus};
    use crate::modules::books::models::ReadingStatus;
    use crate::modules::books::rating::DetailedRating;
    use crate::modules::books::repository::InMemoryBookRepository;

    fn empty_service() -> BookService {
        BookService::new(Arc::new(InMemoryBookRepository::new()))
    }

    fn sample_service() -> BookService {
        BookService::new(Arc::new(InMemoryBookRepository::with_books(
            fixtures::sample_books(),
        )))
    }

    fn fields(title: &str) -> BookFields {
        BookFields::new(title, "Ursula K. Le Guin", ReadingStatus::WantToRead)
    }

    #[tokio::test]
    async fn create_then_read_round_trips() {
        let service = empty_service();
        let created = service
            .create(BookFields {
                rating: Some("4.5".into()),
                isbn: Some("978-0441478125".into()),
                year: Some(1969),
                ..fields("The Left Hand of Darkness")
            })
            .await
            .unwrap();

        let read = service.get(created.id).await.unwrap();
        assert_eq!(read, created);
        assert_eq!(read.rating.as_deref(), Some("4.5"));
        assert_eq!(read.lending, Lending::OnShelf);
        assert_eq!(read.calculated_stars(), None);
    }

    #[tokio::test]
    async fn invalid_rating_adds_nothing() {
        let service = sample_service();
        let before = service.count().await;

        let err = service
            .create(BookFields {
                rating: Some("3.1".into()),
                ..fields("The Dispossessed")
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BookError::Validation { field: "rating", .. }));
        assert_eq!(service.count().await, before);
    }

    #[tokio::test]
    async fn invalid_detailed_rating_names_category() {
        let service = empty_service();
        let err = service
            .create(BookFields {
                detailed_rating: Some(DetailedRating {
                    plot: Some(10.1),
                    ..DetailedRating::default()
                }),
                ..fields("Earthsea")
            })
            .await
            .unwrap_err();

        assert!(err.to_string().contains("plot"));
        assert_eq!(service.count().await, 0);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_preserves_lending() {
        let service = sample_service();
        let id = BookId::new(2);

        let updated = service
            .update(
                id,
                BookFields::new("Clean Code, 2nd ed.", "Robert C. Martin", ReadingStatus::Read),
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Clean Code, 2nd ed.");
        assert_eq!(updated.rating, None);
        assert_eq!(updated.description, None);
        assert_eq!(updated.lending.borrower(), Some("Alice"));
        assert_eq!(service.get(id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_validates_before_lookup() {
        let service = empty_service();
        let err = service
            .update(
                BookId::new(99),
                BookFields {
                    rating: Some("6".into()),
                    ..fields("Missing")
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BookError::Validation { .. }));

        let err = service.update(BookId::new(99), fields("Missing")).await.unwrap_err();
        assert_eq!(err, BookError::NotFound(BookId::new(99)));
    }

    #[tokio::test]
    async fn update_rejects_invalid_detailed_rating_and_keeps_record() {
        let service = sample_service();
        let id = BookId::new(1);
        let before = service.get(id).await.unwrap();

        let err = service
            .update(
                id,
                BookFields {
                    detailed_rating: Some(DetailedRating {
                        plot: Some(8.0),
                        world_building: Some(0.5),
                        ..DetailedRating::default()
                    }),
                    ..fields("The Hobbit, revised")
                },
            )
            .await
            .unwrap_err();

        match err {
            BookError::Validation { field, message } => {
                assert_eq!(field, "worldBuilding");
                assert!(message.contains("worldBuilding"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(service.get(id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_missing_book_leaves_collection_alone() {
        let service = sample_service();
        let err = service.delete(BookId::new(404)).await.unwrap_err();
        assert_eq!(err, BookError::NotFound(BookId::new(404)));
        assert_eq!(service.count().await, 4);

        service.delete(BookId::new(3)).await.unwrap();
        assert_eq!(service.count().await, 3);
        assert!(service.get(BookId::new(3)).await.is_err());
    }

    #[tokio::test]
    async fn lend_and_return_cycle() {
        let service = empty_service();
        let id = service.create(fields("The Lathe of Heaven")).await.unwrap().id;

        let lent = service.lend(id, "Alice").await.unwrap();
        assert_eq!(lent.lending.status(), LendingStatus::LentOut);
        assert_eq!(lent.lending.borrower(), Some("Alice"));

        let err = service.lend(id, "Bob").await.unwrap_err();
        assert!(matches!(err, BookError::Conflict { .. }));
        assert_eq!(
            service.get(id).await.unwrap().lending.borrower(),
            Some("Alice")
        );

        let returned = service.return_book(id).await.unwrap();
        assert_eq!(returned.lending, Lending::OnShelf);

        let again = service.return_book(id).await.unwrap();
        assert_eq!(again.lending, Lending::OnShelf);
    }

    #[tokio::test]
    async fn lending_operations_report_missing_books() {
        let service = empty_service();
        let id = BookId::new(7);
        assert_eq!(service.lend(id, "Alice").await, Err(BookError::NotFound(id)));
        assert_eq!(service.return_book(id).await, Err(BookError::NotFound(id)));
        assert_eq!(service.get(id).await, Err(BookError::NotFound(id)));
    }

    #[tokio::test]
    async fn list_filters_by_author() {
        let service = sample_service();
        let books = service
            .list(&BookFilter {
                author: Some("tolkien".into()),
                ..BookFilter::default()
            })
            .await;
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "The Hobbit");

        assert_eq!(service.list(&BookFilter::default()).await.len(), 4);
    }

    #[tokio::test]
    async fn concurrent_lends_admit_one_borrower() {
        let service = Arc::new(empty_service());
        let id = service.create(fields("Tehanu")).await.unwrap().id;

        let handles: Vec<_> = ["Alice", "Bob", "Carol", "Dan"]
            .into_iter()
            .map(|borrower| {
                let service = service.clone();
                tokio::spawn(async move { service.lend(id, borrower).await })
            })
            .collect();

        let mut lent = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                lent += 1;
            }
        }
        assert_eq!(lent, 1);
    }
}
