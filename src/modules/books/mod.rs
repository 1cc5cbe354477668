pub mod error;
pub mod fixtures;
pub mod lending;
pub mod models;
mod openapi;
pub mod rating;
pub mod repository;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use shelf_kernel::{settings::LibrarySettings, InitCtx, Module};

pub use error::BookError;
pub use models::{Book, BookFields, BookId, BookResponse, ReadingStatus};
pub use repository::{BookFilter, BookRepository, InMemoryBookRepository};
pub use service::BookService;

/// Books module: the personal library and its lending ledger
pub struct BooksModule {
    service: Arc<BookService>,
}

impl BooksModule {
    pub fn new(service: Arc<BookService>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<BookService> {
        &self.service
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.service.count().await;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books = books,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi::fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let books = self.service.count().await;
        tracing::info!(
            module = self.name(),
            books = books,
            "books module stopped"
        );
        Ok(())
    }
}

/// Create the books module backed by an in-memory repository
pub fn create_module(settings: &LibrarySettings) -> Arc<dyn Module> {
    let repository = if settings.seed_sample_data {
        InMemoryBookRepository::with_books(fixtures::sample_books())
    } else {
        InMemoryBookRepository::new()
    };
    let service = Arc::new(BookService::new(Arc::new(repository)));
    Arc::new(BooksModule::new(service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_kernel::settings::Settings;

    #[tokio::test]
    async fn seeding_is_opt_in() {
        let module = BooksModule::new(Arc::new(BookService::new(Arc::new(
            InMemoryBookRepository::new(),
        ))));
        assert_eq!(module.service().count().await, 0);

        let settings = Settings::default();
        let ctx = InitCtx {
            settings: &settings,
        };
        let seeded = create_module(&LibrarySettings {
            seed_sample_data: true,
        });
        assert_eq!(seeded.name(), "books");
        seeded.init(&ctx).await.unwrap();
        assert!(seeded.openapi().is_some());
    }
}
