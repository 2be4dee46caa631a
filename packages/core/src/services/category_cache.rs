//! Category Cache
//!
//! Holds the last aggregated category list together with the store revision it
//! was computed from.
//!
//! # Cache Invalidation
//!
//! - **Revision-keyed**: A lookup with a different store revision recomputes, so
//!   callers holding different snapshots never see each other's results
//! - **Event-driven**: `invalidate()` bumps a generation counter; an entry
//!   only hits while both its revision and its generation are current
//!
//! The generation is read before computing, so an `invalidate()` that lands
//! while a recompute is in flight leaves the stored entry already stale.

use crate::models::Category;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug)]
struct CachedCategories {
    revision: u64,
    generation: u64,
    categories: Arc<Vec<Category>>,
}

/// Revision-keyed cache for aggregated categories
#[derive(Debug, Default)]
pub struct CategoryCache {
    entry: RwLock<Option<CachedCategories>>,

    /// Bumped by `invalidate()`
    generation: AtomicU64,
}

impl CategoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached list for `revision`, computing and storing it if the
    /// cache is empty, invalidated, or holds another revision.
    pub async fn get_or_compute<F>(&self, revision: u64, compute: F) -> Arc<Vec<Category>>
    where
        F: FnOnce() -> Vec<Category>,
    {
        let generation = self.generation.load(Ordering::Acquire);
        {
            let entry = self.entry.read().await;
            if let Some(cached) = entry
                .as_ref()
                .filter(|c| c.revision == revision && c.generation == generation)
            {
                return Arc::clone(&cached.categories);
            }
        }

        let categories = Arc::new(compute());

        let mut entry = self.entry.write().await;
        // Never replace a newer revision or generation with an older one
        let is_newer = entry
            .as_ref()
            .map_or(true, |c| (revision, generation) >= (c.revision, c.generation));
        if is_newer {
            *entry = Some(CachedCategories {
                revision,
                generation,
                categories: Arc::clone(&categories),
            });
            tracing::debug!(
                "Category cache refreshed at revision {} ({} categories)",
                revision,
                categories.len()
            );
        }

        categories
    }

    /// Signal that the underlying pages changed; next access recomputes
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Get cache statistics (for debugging/monitoring)
    pub async fn stats(&self) -> CacheStats {
        let entry = self.entry.read().await;
        let generation = self.generation.load(Ordering::Acquire);
        CacheStats {
            revision: entry.as_ref().map(|c| c.revision),
            category_count: entry.as_ref().map_or(0, |c| c.categories.len()),
            is_invalidated: entry.as_ref().is_some_and(|c| c.generation != generation),
        }
    }
}

/// Statistics about the category cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Revision of the cached list (None if never computed)
    pub revision: Option<u64>,
    pub category_count: usize,
    pub is_invalidated: bool,
}
