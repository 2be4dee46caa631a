//! Page store abstraction
//!
//! The store owns all persisted page state. Readers receive immutable,
//! `Arc`-shared snapshots so a TOC build or navigation lookup never observes a
//! half-applied write. Order writes are guarded per course by a version number.

use crate::db::StoreError;
use crate::models::{CanonicalOrder, Page};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// Consistent, read-only view of the page collection
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub pages: Arc<Vec<Page>>,

    /// Store-wide revision the snapshot was taken at; bumps on every write
    pub revision: u64,
}

impl PageSnapshot {
    pub fn new(pages: Vec<Page>, revision: u64) -> Self {
        Self {
            pages: Arc::new(pages),
            revision,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Read and order-write access to the page collection
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Snapshot of all pages, or of one course when `course_id` is given.
    ///
    /// An unknown course yields an empty snapshot, not an error.
    async fn get_pages(&self, course_id: Option<&str>) -> Result<PageSnapshot, StoreError>;

    /// Current order version of a course
    async fn course_version(&self, course_id: &str) -> Result<u64, StoreError>;

    /// Write a canonical order if the course is still at `expected_version`.
    ///
    /// Returns the new course version, or `StoreError::VersionConflict` when
    /// another writer got there first. The order must rank every current page
    /// of the course, otherwise the write fails with `StoreError::StaleOrder`.
    async fn persist_order(
        &self,
        order: &CanonicalOrder,
        expected_version: u64,
    ) -> Result<u64, StoreError>;

    /// Record that `user_id` finished `page_id`.
    ///
    /// Returns `false` when the page was already marked. Fails with
    /// `StoreError::PageNotFound` for a page the store does not hold.
    async fn mark_page_complete(&self, user_id: &str, page_id: &str) -> Result<bool, StoreError>;

    /// Ids of the pages of `course_id` that `user_id` has completed
    async fn completed_pages(
        &self,
        user_id: &str,
        course_id: &str,
    ) -> Result<HashSet<String>, StoreError>;
}
