//! In-memory page store
//!
//! Reference implementation of [`PageStore`] over a materialized page vector.
//! Used by the developer tooling (loaded from a JSON snapshot) and by tests.
//!
//! # Concurrency
//!
//! - Reads clone an `Arc` under a read lock, so snapshots are immutable
//! - Order writes take the write lock and check a per-course version, which
//!   serializes concurrent saves of the same course (optimistic concurrency)
//! - `replace_pages` models a content refresh: it bumps the store revision and
//!   every course version
//! - An order must rank exactly the course's current pages. One computed before
//!   a refresh fails with `PageNotFound` if it names a removed page, or with
//!   `StaleOrder` if it misses an added one
//! - Completions are kept per user and survive refreshes; they never bump the
//!   revision or course versions

use crate::db::{PageSnapshot, PageStore, StoreError};
use crate::models::{CanonicalOrder, Page};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug)]
struct StoreState {
    pages: Arc<Vec<Page>>,
    revision: u64,
    course_versions: HashMap<String, u64>,

    /// user id → completed page ids
    completions: HashMap<String, HashSet<String>>,
}

impl StoreState {
    fn new(pages: Vec<Page>) -> Self {
        let course_versions = pages.iter().map(|p| (p.course_id.clone(), 1)).collect();
        Self {
            pages: Arc::new(pages),
            revision: 1,
            course_versions,
            completions: HashMap::new(),
        }
    }
}

/// Page store backed by an in-memory vector
#[derive(Debug)]
pub struct InMemoryPageStore {
    state: RwLock<StoreState>,
}

impl InMemoryPageStore {
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            state: RwLock::new(StoreState::new(pages)),
        }
    }

    /// Parse a JSON array of pages
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let pages: Vec<Page> =
            serde_json::from_str(json).map_err(|e| StoreError::snapshot_load(e.to_string()))?;
        Ok(Self::new(pages))
    }

    /// Load a JSON array of pages from disk
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await?;
        let store = Self::from_json_str(&contents).map_err(|e| match e {
            StoreError::SnapshotLoad(msg) => {
                StoreError::snapshot_load(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        tracing::info!(
            "Loaded {} pages from {}",
            store.state.read().await.pages.len(),
            path.display()
        );
        Ok(store)
    }

    /// Swap in a freshly loaded page collection
    pub async fn replace_pages(&self, pages: Vec<Page>) {
        let mut state = self.state.write().await;

        let mut course_versions = HashMap::new();
        for page in &pages {
            let next = state
                .course_versions
                .get(&page.course_id)
                .map_or(1, |v| v + 1);
            course_versions.insert(page.course_id.clone(), next);
        }

        state.pages = Arc::new(pages);
        state.revision += 1;
        state.course_versions = course_versions;

        tracing::debug!("Page store refreshed to revision {}", state.revision);
    }

    pub async fn revision(&self) -> u64 {
        self.state.read().await.revision
    }
}

#[async_trait]
impl PageStore for InMemoryPageStore {
    async fn get_pages(&self, course_id: Option<&str>) -> Result<PageSnapshot, StoreError> {
        let state = self.state.read().await;

        match course_id {
            None => Ok(PageSnapshot {
                pages: Arc::clone(&state.pages),
                revision: state.revision,
            }),
            Some(course_id) => {
                let pages = state
                    .pages
                    .iter()
                    .filter(|p| p.course_id == course_id)
                    .cloned()
                    .collect();
                Ok(PageSnapshot::new(pages, state.revision))
            }
        }
    }

    async fn course_version(&self, course_id: &str) -> Result<u64, StoreError> {
        let state = self.state.read().await;
        state
            .course_versions
            .get(course_id)
            .copied()
            .ok_or_else(|| StoreError::course_not_found(course_id))
    }

    async fn persist_order(
        &self,
        order: &CanonicalOrder,
        expected_version: u64,
    ) -> Result<u64, StoreError> {
        let mut state = self.state.write().await;
        let course_id = order.course_id.as_str();

        let actual_version = state
            .course_versions
            .get(course_id)
            .copied()
            .ok_or_else(|| StoreError::course_not_found(course_id))?;
        if actual_version != expected_version {
            return Err(StoreError::version_conflict(
                course_id,
                expected_version,
                actual_version,
            ));
        }

        let course_pages: HashSet<&str> = state
            .pages
            .iter()
            .filter(|p| p.course_id == course_id)
            .map(|p| p.id.as_str())
            .collect();
        if let Some(missing) = order
            .chapters
            .iter()
            .find(|c| !course_pages.contains(c.chapter_id.as_str()))
        {
            return Err(StoreError::page_not_found(&missing.chapter_id));
        }
        let ranked: HashSet<&str> = order
            .chapters
            .iter()
            .map(|c| c.chapter_id.as_str())
            .collect();
        if ranked.len() != order.chapters.len() || ranked != course_pages {
            tracing::warn!(
                "Rejecting stale order for course '{}': {} chapters ranked, {} present",
                course_id,
                order.chapters.len(),
                course_pages.len()
            );
            return Err(StoreError::stale_order(
                course_id,
                order.chapters.len(),
                course_pages.len(),
            ));
        }

        let module_titles: HashMap<&str, &str> = state
            .pages
            .iter()
            .filter(|p| p.course_id == course_id)
            .map(|p| (p.module_id.as_str(), p.module_title.as_str()))
            .collect();
        let module_ranks: HashMap<&str, i64> = order
            .modules
            .iter()
            .map(|m| (m.module_id.as_str(), m.rank))
            .collect();
        let chapter_ranks: HashMap<&str, _> = order
            .chapters
            .iter()
            .map(|c| (c.chapter_id.as_str(), c))
            .collect();

        let mut moved = 0usize;
        let pages: Vec<Page> = state
            .pages
            .iter()
            .map(|page| {
                let mut page = page.clone();
                if page.course_id != course_id {
                    return page;
                }

                if let Some(chapter) = chapter_ranks.get(page.id.as_str()) {
                    if page.module_id != chapter.module_id {
                        if let Some(title) = module_titles.get(chapter.module_id.as_str()) {
                            page.module_title = (*title).to_string();
                        }
                        page.module_id = chapter.module_id.clone();
                        moved += 1;
                    }
                    page.page_order = chapter.rank;
                }
                if let Some(rank) = module_ranks.get(page.module_id.as_str()) {
                    page.module_order = *rank;
                }
                page
            })
            .collect();

        state.pages = Arc::new(pages);
        state.revision += 1;
        let new_version = actual_version + 1;
        state
            .course_versions
            .insert(course_id.to_string(), new_version);

        tracing::info!(
            "Persisted order for course '{}' (version {} -> {}, {} modules, {} chapters, {} moved)",
            course_id,
            actual_version,
            new_version,
            order.modules.len(),
            order.chapters.len(),
            moved
        );

        Ok(new_version)
    }

    async fn mark_page_complete(&self, user_id: &str, page_id: &str) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        if !state.pages.iter().any(|p| p.id == page_id) {
            return Err(StoreError::page_not_found(page_id));
        }

        let newly_completed = state
            .completions
            .entry(user_id.to_string())
            .or_default()
            .insert(page_id.to_string());
        if newly_completed {
            tracing::debug!("User '{}' completed page '{}'", user_id, page_id);
        }
        Ok(newly_completed)
    }

    async fn completed_pages(
        &self,
        user_id: &str,
        course_id: &str,
    ) -> Result<HashSet<String>, StoreError> {
        let state = self.state.read().await;
        let Some(completed) = state.completions.get(user_id) else {
            return Ok(HashSet::new());
        };

        Ok(state
            .pages
            .iter()
            .filter(|p| p.course_id == course_id && completed.contains(&p.id))
            .map(|p| p.id.clone())
            .collect())
    }
}
