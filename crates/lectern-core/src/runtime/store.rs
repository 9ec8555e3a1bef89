// lectern-core/src/runtime/store.rs
// ============================================================================
// Module: Lectern In-Memory Store
// Description: Simple in-memory catalog store for tests and demos.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of
//! [`CatalogStore`] for tests and local demos. Ids are assigned
//! monotonically from 1, natural order is insertion order, and every
//! ordering contract of the gateway is honored with stable sorts. It is not
//! intended for production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::core::entities::Book;
use crate::core::entities::BookChanges;
use crate::core::entities::Bookshelf;
use crate::core::entities::BookshelfChanges;
use crate::core::entities::Chapter;
use crate::core::entities::ChapterChanges;
use crate::core::entities::NewBook;
use crate::core::entities::NewBookshelf;
use crate::core::entities::NewChapter;
use crate::core::entities::NewPage;
use crate::core::entities::Page;
use crate::core::entities::PageChanges;
use crate::core::identifiers::BookId;
use crate::core::identifiers::ChapterId;
use crate::core::identifiers::PageId;
use crate::core::identifiers::ShelfId;
use crate::interfaces::CatalogStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Tables
// ============================================================================

/// Backing tables keyed by raw id, plus monotonically increasing id
/// counters.
#[derive(Debug, Default)]
struct Tables {
    /// Bookshelf rows by raw id.
    shelves: BTreeMap<i64, Bookshelf>,
    /// Book rows by raw id.
    books: BTreeMap<i64, Book>,
    /// Chapter rows by raw id.
    chapters: BTreeMap<i64, Chapter>,
    /// Page rows by raw id.
    pages: BTreeMap<i64, Page>,
    /// Next bookshelf id to assign.
    next_shelf_id: i64,
    /// Next book id to assign.
    next_book_id: i64,
    /// Next chapter id to assign.
    next_chapter_id: i64,
    /// Next page id to assign.
    next_page_id: i64,
}

impl Tables {
    /// Returns a fresh table set with id counters starting at 1.
    fn new() -> Self {
        Self {
            next_shelf_id: 1,
            next_book_id: 1,
            next_chapter_id: 1,
            next_page_id: 1,
            ..Self::default()
        }
    }
}

/// Converts a raw counter value into a typed id, failing closed if the
/// counter ever left the positive range.
fn typed_id<T>(raw: i64, build: impl FnOnce(i64) -> Option<T>) -> Result<T, StoreError> {
    build(raw).ok_or_else(|| StoreError::Invalid(format!("id counter out of range: {raw}")))
}

/// Converts a usize count into the gateway's u64 count type.
fn as_count(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory catalog store for tests and demos.
#[derive(Debug, Clone)]
pub struct InMemoryCatalogStore {
    /// Table set protected by a mutex.
    tables: Arc<Mutex<Tables>>,
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCatalogStore {
    /// Creates a new, empty in-memory catalog store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::new())),
        }
    }

    /// Locks the table set, mapping mutex poisoning to a store error.
    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("catalog store mutex poisoned".to_string()))
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn list_shelves(&self) -> Result<Vec<Bookshelf>, StoreError> {
        let guard = self.lock()?;
        let mut shelves: Vec<Bookshelf> = guard.shelves.values().cloned().collect();
        shelves.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(shelves)
    }

    fn find_shelf(&self, id: ShelfId) -> Result<Option<Bookshelf>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.shelves.get(&id.get()).cloned())
    }

    fn insert_shelf(&self, row: NewBookshelf) -> Result<Bookshelf, StoreError> {
        let mut guard = self.lock()?;
        let raw = guard.next_shelf_id;
        guard.next_shelf_id += 1;
        let shelf = Bookshelf {
            id: typed_id(raw, ShelfId::from_raw)?,
            name: row.name,
            location: row.location,
            created_at: row.created_at,
        };
        guard.shelves.insert(raw, shelf.clone());
        Ok(shelf)
    }

    fn update_shelf(
        &self,
        id: ShelfId,
        changes: BookshelfChanges,
    ) -> Result<Option<Bookshelf>, StoreError> {
        let mut guard = self.lock()?;
        let Some(shelf) = guard.shelves.get_mut(&id.get()) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            shelf.name = name;
        }
        if let Some(location) = changes.location {
            shelf.location = location;
        }
        Ok(Some(shelf.clone()))
    }

    fn delete_shelf(&self, id: ShelfId) -> Result<bool, StoreError> {
        let mut guard = self.lock()?;
        Ok(guard.shelves.remove(&id.get()).is_some())
    }

    fn list_books(&self, shelf_id: ShelfId) -> Result<Vec<Book>, StoreError> {
        let guard = self.lock()?;
        let mut books: Vec<Book> = guard
            .books
            .values()
            .filter(|book| book.bookshelf_id == shelf_id)
            .cloned()
            .collect();
        books.sort_by(|a, b| b.published_year.cmp(&a.published_year));
        Ok(books)
    }

    fn count_books(&self, shelf_id: ShelfId) -> Result<u64, StoreError> {
        let guard = self.lock()?;
        Ok(as_count(guard.books.values().filter(|book| book.bookshelf_id == shelf_id).count()))
    }

    fn find_book(&self, shelf_id: ShelfId, id: BookId) -> Result<Option<Book>, StoreError> {
        let guard = self.lock()?;
        Ok(guard
            .books
            .get(&id.get())
            .filter(|book| book.bookshelf_id == shelf_id)
            .cloned())
    }

    fn find_book_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.books.get(&id.get()).cloned())
    }

    fn insert_book(&self, row: NewBook) -> Result<Book, StoreError> {
        let mut guard = self.lock()?;
        let raw = guard.next_book_id;
        guard.next_book_id += 1;
        let book = Book {
            id: typed_id(raw, BookId::from_raw)?,
            bookshelf_id: row.bookshelf_id,
            title: row.title,
            author: row.author,
            published_year: row.published_year,
            created_at: row.created_at,
        };
        guard.books.insert(raw, book.clone());
        Ok(book)
    }

    fn update_book(
        &self,
        shelf_id: ShelfId,
        id: BookId,
        changes: BookChanges,
    ) -> Result<Option<Book>, StoreError> {
        let mut guard = self.lock()?;
        let Some(book) = guard
            .books
            .get_mut(&id.get())
            .filter(|book| book.bookshelf_id == shelf_id)
        else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            book.title = title;
        }
        if let Some(author) = changes.author {
            book.author = author;
        }
        if let Some(published_year) = changes.published_year {
            book.published_year = published_year;
        }
        Ok(Some(book.clone()))
    }

    fn delete_book(&self, shelf_id: ShelfId, id: BookId) -> Result<bool, StoreError> {
        let mut guard = self.lock()?;
        let matches = guard
            .books
            .get(&id.get())
            .is_some_and(|book| book.bookshelf_id == shelf_id);
        if !matches {
            return Ok(false);
        }
        Ok(guard.books.remove(&id.get()).is_some())
    }

    fn search_books(&self, query: &str) -> Result<Vec<Book>, StoreError> {
        let guard = self.lock()?;
        let needle = query.to_lowercase();
        Ok(guard
            .books
            .values()
            .filter(|book| {
                book.title.to_lowercase().contains(&needle)
                    || book.author.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    fn list_chapters(&self, book_id: BookId) -> Result<Vec<Chapter>, StoreError> {
        let guard = self.lock()?;
        let mut chapters: Vec<Chapter> = guard
            .chapters
            .values()
            .filter(|chapter| chapter.book_id == book_id)
            .cloned()
            .collect();
        chapters.sort_by(|a, b| a.chapter_number.cmp(&b.chapter_number));
        Ok(chapters)
    }

    fn count_chapters(&self, book_id: BookId) -> Result<u64, StoreError> {
        let guard = self.lock()?;
        Ok(as_count(
            guard.chapters.values().filter(|chapter| chapter.book_id == book_id).count(),
        ))
    }

    fn find_chapter(
        &self,
        book_id: BookId,
        id: ChapterId,
    ) -> Result<Option<Chapter>, StoreError> {
        let guard = self.lock()?;
        Ok(guard
            .chapters
            .get(&id.get())
            .filter(|chapter| chapter.book_id == book_id)
            .cloned())
    }

    fn find_chapter_by_id(&self, id: ChapterId) -> Result<Option<Chapter>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.chapters.get(&id.get()).cloned())
    }

    fn insert_chapter(&self, row: NewChapter) -> Result<Chapter, StoreError> {
        let mut guard = self.lock()?;
        let raw = guard.next_chapter_id;
        guard.next_chapter_id += 1;
        let chapter = Chapter {
            id: typed_id(raw, ChapterId::from_raw)?,
            book_id: row.book_id,
            title: row.title,
            chapter_number: row.chapter_number,
            created_at: row.created_at,
        };
        guard.chapters.insert(raw, chapter.clone());
        Ok(chapter)
    }

    fn update_chapter(
        &self,
        book_id: BookId,
        id: ChapterId,
        changes: ChapterChanges,
    ) -> Result<Option<Chapter>, StoreError> {
        let mut guard = self.lock()?;
        let Some(chapter) = guard
            .chapters
            .get_mut(&id.get())
            .filter(|chapter| chapter.book_id == book_id)
        else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            chapter.title = title;
        }
        if let Some(chapter_number) = changes.chapter_number {
            chapter.chapter_number = chapter_number;
        }
        Ok(Some(chapter.clone()))
    }

    fn delete_chapter(&self, book_id: BookId, id: ChapterId) -> Result<bool, StoreError> {
        let mut guard = self.lock()?;
        let matches = guard
            .chapters
            .get(&id.get())
            .is_some_and(|chapter| chapter.book_id == book_id);
        if !matches {
            return Ok(false);
        }
        Ok(guard.chapters.remove(&id.get()).is_some())
    }

    fn list_pages(&self, chapter_id: ChapterId) -> Result<Vec<Page>, StoreError> {
        let guard = self.lock()?;
        let mut pages: Vec<Page> = guard
            .pages
            .values()
            .filter(|page| page.chapter_id == chapter_id)
            .cloned()
            .collect();
        pages.sort_by(|a, b| a.page_number.cmp(&b.page_number));
        Ok(pages)
    }

    fn count_pages(&self, chapter_id: ChapterId) -> Result<u64, StoreError> {
        let guard = self.lock()?;
        Ok(as_count(guard.pages.values().filter(|page| page.chapter_id == chapter_id).count()))
    }

    fn find_page(&self, chapter_id: ChapterId, id: PageId) -> Result<Option<Page>, StoreError> {
        let guard = self.lock()?;
        Ok(guard
            .pages
            .get(&id.get())
            .filter(|page| page.chapter_id == chapter_id)
            .cloned())
    }

    fn insert_page(&self, row: NewPage) -> Result<Page, StoreError> {
        let mut guard = self.lock()?;
        let raw = guard.next_page_id;
        guard.next_page_id += 1;
        let page = Page {
            id: typed_id(raw, PageId::from_raw)?,
            chapter_id: row.chapter_id,
            page_number: row.page_number,
            content: row.content,
            created_at: row.created_at,
        };
        guard.pages.insert(raw, page.clone());
        Ok(page)
    }

    fn update_page(
        &self,
        chapter_id: ChapterId,
        id: PageId,
        changes: PageChanges,
    ) -> Result<Option<Page>, StoreError> {
        let mut guard = self.lock()?;
        let Some(page) = guard
            .pages
            .get_mut(&id.get())
            .filter(|page| page.chapter_id == chapter_id)
        else {
            return Ok(None);
        };
        if let Some(page_number) = changes.page_number {
            page.page_number = page_number;
        }
        if let Some(content) = changes.content {
            page.content = content;
        }
        Ok(Some(page.clone()))
    }

    fn delete_page(&self, chapter_id: ChapterId, id: PageId) -> Result<bool, StoreError> {
        let mut guard = self.lock()?;
        let matches = guard
            .pages
            .get(&id.get())
            .is_some_and(|page| page.chapter_id == chapter_id);
        if !matches {
            return Ok(false);
        }
        Ok(guard.pages.remove(&id.get()).is_some())
    }
}

// ============================================================================
// SECTION: Shared Store Wrapper
// ============================================================================

/// Shared catalog store backed by an `Arc` trait object, for hosts that hand
/// one store to several components.
#[derive(Clone)]
pub struct SharedCatalogStore {
    /// Inner store implementation.
    inner: Arc<dyn CatalogStore + Send + Sync>,
}

impl SharedCatalogStore {
    /// Wraps a catalog store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl CatalogStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn CatalogStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl CatalogStore for SharedCatalogStore {
    fn list_shelves(&self) -> Result<Vec<Bookshelf>, StoreError> {
        self.inner.list_shelves()
    }

    fn find_shelf(&self, id: ShelfId) -> Result<Option<Bookshelf>, StoreError> {
        self.inner.find_shelf(id)
    }

    fn insert_shelf(&self, row: NewBookshelf) -> Result<Bookshelf, StoreError> {
        self.inner.insert_shelf(row)
    }

    fn update_shelf(
        &self,
        id: ShelfId,
        changes: BookshelfChanges,
    ) -> Result<Option<Bookshelf>, StoreError> {
        self.inner.update_shelf(id, changes)
    }

    fn delete_shelf(&self, id: ShelfId) -> Result<bool, StoreError> {
        self.inner.delete_shelf(id)
    }

    fn list_books(&self, shelf_id: ShelfId) -> Result<Vec<Book>, StoreError> {
        self.inner.list_books(shelf_id)
    }

    fn count_books(&self, shelf_id: ShelfId) -> Result<u64, StoreError> {
        self.inner.count_books(shelf_id)
    }

    fn find_book(&self, shelf_id: ShelfId, id: BookId) -> Result<Option<Book>, StoreError> {
        self.inner.find_book(shelf_id, id)
    }

    fn find_book_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        self.inner.find_book_by_id(id)
    }

    fn insert_book(&self, row: NewBook) -> Result<Book, StoreError> {
        self.inner.insert_book(row)
    }

    fn update_book(
        &self,
        shelf_id: ShelfId,
        id: BookId,
        changes: BookChanges,
    ) -> Result<Option<Book>, StoreError> {
        self.inner.update_book(shelf_id, id, changes)
    }

    fn delete_book(&self, shelf_id: ShelfId, id: BookId) -> Result<bool, StoreError> {
        self.inner.delete_book(shelf_id, id)
    }

    fn search_books(&self, query: &str) -> Result<Vec<Book>, StoreError> {
        self.inner.search_books(query)
    }

    fn list_chapters(&self, book_id: BookId) -> Result<Vec<Chapter>, StoreError> {
        self.inner.list_chapters(book_id)
    }

    fn count_chapters(&self, book_id: BookId) -> Result<u64, StoreError> {
        self.inner.count_chapters(book_id)
    }

    fn find_chapter(
        &self,
        book_id: BookId,
        id: ChapterId,
    ) -> Result<Option<Chapter>, StoreError> {
        self.inner.find_chapter(book_id, id)
    }

    fn find_chapter_by_id(&self, id: ChapterId) -> Result<Option<Chapter>, StoreError> {
        self.inner.find_chapter_by_id(id)
    }

    fn insert_chapter(&self, row: NewChapter) -> Result<Chapter, StoreError> {
        self.inner.insert_chapter(row)
    }

    fn update_chapter(
        &self,
        book_id: BookId,
        id: ChapterId,
        changes: ChapterChanges,
    ) -> Result<Option<Chapter>, StoreError> {
        self.inner.update_chapter(book_id, id, changes)
    }

    fn delete_chapter(&self, book_id: BookId, id: ChapterId) -> Result<bool, StoreError> {
        self.inner.delete_chapter(book_id, id)
    }

    fn list_pages(&self, chapter_id: ChapterId) -> Result<Vec<Page>, StoreError> {
        self.inner.list_pages(chapter_id)
    }

    fn count_pages(&self, chapter_id: ChapterId) -> Result<u64, StoreError> {
        self.inner.count_pages(chapter_id)
    }

    fn find_page(&self, chapter_id: ChapterId, id: PageId) -> Result<Option<Page>, StoreError> {
        self.inner.find_page(chapter_id, id)
    }

    fn insert_page(&self, row: NewPage) -> Result<Page, StoreError> {
        self.inner.insert_page(row)
    }

    fn update_page(
        &self,
        chapter_id: ChapterId,
        id: PageId,
        changes: PageChanges,
    ) -> Result<Option<Page>, StoreError> {
        self.inner.update_page(chapter_id, id, changes)
    }

    fn delete_page(&self, chapter_id: ChapterId, id: PageId) -> Result<bool, StoreError> {
        self.inner.delete_page(chapter_id, id)
    }
}
