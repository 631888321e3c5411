//! Catalog management service: books, authors, categories, libraries,
//! and the per-library availability facts.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
        availability::{
            Availability, AvailabilityDetail, AvailabilityQuery, CreateAvailability,
            UpdateAvailability,
        },
        book::{Book, BookDetail, BookQuery, BookSummary, CreateBook, UpdateBook},
        category::{Category, CategoryQuery, CreateCategory, UpdateCategory},
        library::{CreateLibrary, Library, LibraryQuery, UpdateLibrary},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // --- Books ---

    /// List books available in at least one library
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<(Vec<BookSummary>, i64)> {
        self.repository.books.search(query).await
    }

    /// Full book view with related records
    pub async fn get_book(&self, id: i32) -> AppResult<BookDetail> {
        self.repository.books.get_detail(id).await
    }

    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // Resolve references up front for friendly 404s
        self.repository.authors.get_by_id(book.author_id).await?;
        for category_id in &book.category_ids {
            self.repository.categories.get_by_id(*category_id).await?;
        }

        let created = self.repository.books.create(&book).await?;
        tracing::info!("Book '{}' created (id {})", created.title, created.id);
        Ok(created)
    }

    pub async fn update_book(&self, id: i32, update: UpdateBook) -> AppResult<Book> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(author_id) = update.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }
        if let Some(ref category_ids) = update.category_ids {
            for category_id in category_ids {
                self.repository.categories.get_by_id(*category_id).await?;
            }
        }

        self.repository.books.update(id, &update).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// Books the caller has bookmarked
    pub async fn bookmarked_books(
        &self,
        user_id: i32,
        search: Option<&str>,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> AppResult<(Vec<BookSummary>, i64)> {
        self.repository
            .books
            .list_bookmarked(user_id, search, page, per_page)
            .await
    }

    // --- Authors ---

    pub async fn list_authors(&self, query: &AuthorQuery) -> AppResult<(Vec<Author>, i64)> {
        self.repository.authors.search(query).await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        author
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.authors.create(&author).await
    }

    pub async fn update_author(&self, id: i32, update: UpdateAuthor) -> AppResult<Author> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.authors.update(id, &update).await
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }

    pub async fn books_by_author(
        &self,
        author_id: i32,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> AppResult<(Vec<BookSummary>, i64)> {
        self.repository.authors.get_by_id(author_id).await?;
        self.repository.books.list_by_author(author_id, page, per_page).await
    }

    // --- Categories ---

    pub async fn list_categories(&self, query: &CategoryQuery) -> AppResult<(Vec<Category>, i64)> {
        self.repository.categories.search(query).await
    }

    pub async fn get_category(&self, id: i32) -> AppResult<Category> {
        self.repository.categories.get_by_id(id).await
    }

    pub async fn create_category(&self, category: CreateCategory) -> AppResult<Category> {
        category
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.categories.create(&category).await
    }

    pub async fn update_category(&self, id: i32, update: UpdateCategory) -> AppResult<Category> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.categories.update(id, &update).await
    }

    pub async fn delete_category(&self, id: i32) -> AppResult<()> {
        self.repository.categories.delete(id).await
    }

    pub async fn books_by_category(
        &self,
        category_id: i32,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> AppResult<(Vec<BookSummary>, i64)> {
        self.repository.categories.get_by_id(category_id).await?;
        self.repository
            .books
            .list_by_category(category_id, page, per_page)
            .await
    }

    // --- Libraries ---

    pub async fn list_libraries(&self, query: &LibraryQuery) -> AppResult<(Vec<Library>, i64)> {
        self.repository.libraries.search(query).await
    }

    pub async fn get_library(&self, id: i32) -> AppResult<Library> {
        self.repository.libraries.get_by_id(id).await
    }

    pub async fn create_library(&self, library: CreateLibrary) -> AppResult<Library> {
        library
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.libraries.create(&library).await
    }

    pub async fn update_library(&self, id: i32, update: UpdateLibrary) -> AppResult<Library> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.libraries.update(id, &update).await
    }

    pub async fn delete_library(&self, id: i32) -> AppResult<()> {
        self.repository.libraries.delete(id).await
    }

    /// Books stocked at a library, regardless of the availability flag
    pub async fn books_by_library(
        &self,
        library_id: i32,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> AppResult<(Vec<BookSummary>, i64)> {
        self.repository.libraries.get_by_id(library_id).await?;
        self.repository
            .books
            .list_by_library(library_id, page, per_page)
            .await
    }

    // --- Availability ---

    pub async fn list_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> AppResult<(Vec<AvailabilityDetail>, i64)> {
        self.repository.availability.search(query).await
    }

    pub async fn get_availability(&self, id: i32) -> AppResult<AvailabilityDetail> {
        self.repository.availability.get_by_id(id).await
    }

    pub async fn create_availability(
        &self,
        record: CreateAvailability,
    ) -> AppResult<Availability> {
        self.repository.books.get_by_id(record.book_id).await?;
        self.repository.libraries.get_by_id(record.library_id).await?;
        self.repository.availability.create(&record).await
    }

    pub async fn update_availability(
        &self,
        id: i32,
        update: UpdateAvailability,
    ) -> AppResult<Availability> {
        self.repository.availability.update(id, update.available).await
    }

    pub async fn delete_availability(&self, id: i32) -> AppResult<()> {
        self.repository.availability.delete(id).await
    }
}
