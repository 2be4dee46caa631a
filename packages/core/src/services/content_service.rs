//! Content Service
//!
//! Request-level entry point for the course site. Every call takes a fresh
//! snapshot from the [`PageStore`] and runs the pure builders over it, so one
//! call never mixes data from two store revisions.
//!
//! Category summaries are the only cached result; the cache is keyed by the
//! snapshot revision and refreshes on its own after any store write.
//!
//! Per-user progress (completed pages) lives in the store next to the pages
//! and is layered onto navigation and course trees by the `*_for_user` calls.

use crate::config::CourseConfig;
use crate::db::{PageSnapshot, PageStore};
use crate::models::{
    CanonicalOrder, Category, ChapterPosition, ModulePosition, Navigation, Page, TocNode,
};
use crate::operations::{OrderEditor, OrderPersistQueue};
use crate::services::{
    resolve_navigation, search, CacheStats, CategoryAggregator, CategoryCache,
    ContentServiceError, SearchResult, TocBuilder,
};
use std::sync::Arc;

fn checked_user(user_id: &str) -> Result<&str, ContentServiceError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(ContentServiceError::invalid_user(user_id));
    }
    Ok(trimmed)
}

/// Course navigation, ordering, and listing queries over a page store
pub struct ContentService {
    store: Arc<dyn PageStore>,
    config: CourseConfig,
    toc_builder: TocBuilder,
    aggregator: CategoryAggregator,
    category_cache: CategoryCache,
    order_queue: OrderPersistQueue,
}

impl ContentService {
    pub fn new(store: Arc<dyn PageStore>, config: CourseConfig) -> Self {
        let aggregator = CategoryAggregator::new(Arc::new(config.category_catalog.clone()))
            .with_link_prefix(config.category_link_prefix.clone());

        Self {
            order_queue: OrderPersistQueue::new(Arc::clone(&store)),
            store,
            config,
            toc_builder: TocBuilder::new(),
            aggregator,
            category_cache: CategoryCache::new(),
        }
    }

    /// Pin the display order of courses in [`site_toc`](Self::site_toc)
    pub fn with_course_order(mut self, course_order: Vec<String>) -> Self {
        self.toc_builder = self.toc_builder.with_course_order(course_order);
        self
    }

    pub fn config(&self) -> &CourseConfig {
        &self.config
    }

    /// Table of contents for every course
    pub async fn site_toc(&self) -> Result<Vec<TocNode>, ContentServiceError> {
        let snapshot = self.store.get_pages(None).await?;
        Ok(self.toc_builder.build(&snapshot.pages))
    }

    /// Table of contents for one course
    pub async fn course_toc(&self, course_id: &str) -> Result<TocNode, ContentServiceError> {
        let snapshot = self.store.get_pages(Some(course_id)).await?;
        self.toc_builder
            .build_course(&snapshot.pages, course_id)
            .ok_or_else(|| ContentServiceError::course_not_found(course_id))
    }

    /// Previous/next links for a page
    pub async fn navigate(&self, page_id: &str) -> Result<Navigation, ContentServiceError> {
        let snapshot = self.store.get_pages(None).await?;
        resolve_navigation(&snapshot.pages, page_id)
    }

    /// Course tree with the pages `user_id` has finished flagged as completed
    pub async fn course_toc_for_user(
        &self,
        user_id: &str,
        course_id: &str,
    ) -> Result<TocNode, ContentServiceError> {
        let user_id = checked_user(user_id)?;
        let mut toc = self.course_toc(course_id).await?;
        let completed = self.store.completed_pages(user_id, course_id).await?;
        toc.mark_completed(&completed);
        Ok(toc)
    }

    /// Previous/next links for a page, with `user_id`'s completion of it
    pub async fn navigate_for_user(
        &self,
        user_id: &str,
        page_id: &str,
    ) -> Result<Navigation, ContentServiceError> {
        let user_id = checked_user(user_id)?;
        let snapshot = self.store.get_pages(None).await?;
        let nav = resolve_navigation(&snapshot.pages, page_id)?;
        self.with_completion(user_id, &snapshot, nav).await
    }

    /// Mark `page_id` finished for `user_id` and move on.
    ///
    /// Returns navigation for the next page of the course, or for `page_id`
    /// itself when it is the last one. Marking an already finished page again
    /// is not an error.
    pub async fn complete_and_advance(
        &self,
        user_id: &str,
        page_id: &str,
    ) -> Result<Navigation, ContentServiceError> {
        let user_id = checked_user(user_id)?;
        let snapshot = self.store.get_pages(None).await?;
        let current = resolve_navigation(&snapshot.pages, page_id)?;

        if self.store.mark_page_complete(user_id, page_id).await? {
            tracing::info!("User '{}' completed page '{}'", user_id, page_id);
        }

        let next_id = current.next.as_ref().map(|next| next.id.clone());
        let destination = match next_id {
            Some(next_id) => resolve_navigation(&snapshot.pages, &next_id)?,
            None => current,
        };
        self.with_completion(user_id, &snapshot, destination).await
    }

    async fn with_completion(
        &self,
        user_id: &str,
        snapshot: &PageSnapshot,
        mut nav: Navigation,
    ) -> Result<Navigation, ContentServiceError> {
        let course_id = snapshot
            .pages
            .iter()
            .find(|p| p.id == nav.current.id)
            .map(|p| p.course_id.as_str())
            .ok_or_else(|| ContentServiceError::page_not_found(&nav.current.id))?;

        let completed = self.store.completed_pages(user_id, course_id).await?;
        nav.completed = completed.contains(&nav.current.id);
        Ok(nav)
    }

    /// Validate, normalize, and persist a course ordering edit.
    ///
    /// Returns the canonical order that was written. Version conflicts are
    /// retried up to `order_persist_retries` times.
    pub async fn save_course_order(
        &self,
        course_id: &str,
        modules: &[ModulePosition],
        chapters: &[ChapterPosition],
    ) -> Result<CanonicalOrder, ContentServiceError> {
        let snapshot = self.store.get_pages(Some(course_id)).await?;
        let order = OrderEditor::new(&snapshot.pages).apply_order(course_id, modules, chapters)?;

        let version = self
            .order_queue
            .persist_with_retry(&order, self.config.order_persist_retries)
            .await?;

        tracing::info!(
            "Saved order for course '{}' at version {}",
            course_id,
            version
        );
        Ok(order)
    }

    /// Category summaries, cached per store revision
    pub async fn categories(&self) -> Result<Arc<Vec<Category>>, ContentServiceError> {
        let snapshot = self.store.get_pages(None).await?;
        let categories = self
            .category_cache
            .get_or_compute(snapshot.revision, || {
                self.aggregator.aggregate(&snapshot.pages)
            })
            .await;
        Ok(categories)
    }

    /// Force the next [`categories`](Self::categories) call to recompute
    pub fn invalidate_categories(&self) {
        self.category_cache.invalidate();
    }

    pub async fn category_cache_stats(&self) -> CacheStats {
        self.category_cache.stats().await
    }

    /// Pages filed under `category` (case-insensitive), in store order
    pub async fn category_pages(&self, category: &str) -> Result<Vec<Page>, ContentServiceError> {
        let snapshot = self.store.get_pages(None).await?;
        Ok(search::category_pages(&snapshot.pages, category))
    }

    pub async fn quick_access_pages(&self) -> Result<Vec<Page>, ContentServiceError> {
        let snapshot = self.store.get_pages(None).await?;
        Ok(search::quick_access_pages(
            &snapshot.pages,
            self.config.quick_access_limit,
        ))
    }

    pub async fn recent_updates(&self) -> Result<Vec<Page>, ContentServiceError> {
        let snapshot = self.store.get_pages(None).await?;
        Ok(search::recent_updates(
            &snapshot.pages,
            self.config.recent_updates_limit,
        ))
    }

    pub async fn search(
        &self,
        term: &str,
        max_results: Option<usize>,
    ) -> Result<Vec<SearchResult>, ContentServiceError> {
        let snapshot = self.store.get_pages(None).await?;
        let results = search::search_pages(&snapshot.pages, term, max_results);
        tracing::debug!("Search for {:?} matched {} pages", term, results.len());
        Ok(results)
    }
}
