//! Order persistence with retry logic for optimistic concurrency control
//!
//! Two editors saving the same course race on the course version. Instead of
//! failing the second save outright, the queue re-reads the version and tries
//! again with exponential backoff.
//!
//! The canonical order itself is never recomputed between attempts: a retry
//! writes exactly what the editor produced, against the fresher version. If a
//! content refresh changed the course's pages in the meantime, the store
//! rejects the order as stale and the queue fails without retrying.
//!
//! # Example
//!
//! ```rust
//! use courseway_core::db::{InMemoryPageStore, PageStore};
//! use courseway_core::models::Page;
//! use courseway_core::operations::{OrderEditor, OrderPersistQueue};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pages = vec![Page::new_with_id("intro", "rust", "basics", "Intro", 1)];
//! let order = OrderEditor::new(&pages).apply_order("rust", &[], &[])?;
//!
//! let store: Arc<dyn PageStore> = Arc::new(InMemoryPageStore::new(pages));
//! let queue = OrderPersistQueue::new(store);
//!
//! // Retry up to 3 times with exponential backoff (10ms, 20ms, 40ms)
//! let version = queue.persist_with_retry(&order, 3).await?;
//! assert_eq!(version, 2);
//! # Ok(())
//! # }
//! ```

use crate::db::{PageStore, StoreError};
use crate::models::CanonicalOrder;
use crate::operations::OrderError;
use std::sync::Arc;
use tokio::time::Duration;

/// Writes canonical orders, retrying on version conflicts
#[derive(Clone)]
pub struct OrderPersistQueue {
    store: Arc<dyn PageStore>,
}

impl OrderPersistQueue {
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self { store }
    }

    /// Persist `order`, retrying version conflicts up to `max_retries` times.
    ///
    /// # Retry Behavior
    ///
    /// - **Retry on**: `StoreError::VersionConflict` only
    /// - **Backoff**: Exponential (10ms, 20ms, 40ms, 80ms, ...)
    /// - **Fresh data**: Each attempt reads the current course version
    /// - **Other errors**: Fail immediately without retry, including
    ///   `StoreError::StaleOrder`
    ///
    /// Returns the course version after the write.
    pub async fn persist_with_retry(
        &self,
        order: &CanonicalOrder,
        max_retries: usize,
    ) -> Result<u64, OrderError> {
        let course_id = order.course_id.as_str();
        let mut attempt = 0;

        loop {
            let version = self.store.course_version(course_id).await?;

            match self.store.persist_order(order, version).await {
                Ok(new_version) => {
                    if attempt > 0 {
                        tracing::debug!(
                            "Order save succeeded after {} retry(ies) for course '{}'",
                            attempt,
                            course_id
                        );
                    }
                    return Ok(new_version);
                }

                Err(StoreError::VersionConflict {
                    expected_version,
                    actual_version,
                    ..
                }) if attempt < max_retries => {
                    tracing::debug!(
                        "Version conflict on attempt {}/{} for course '{}': expected v{}, got v{}. Retrying...",
                        attempt + 1,
                        max_retries + 1,
                        course_id,
                        expected_version,
                        actual_version
                    );

                    let backoff_ms = 10u64 * (1 << attempt.min(16));
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;

                    attempt += 1;
                }

                Err(e) => {
                    if e.is_version_conflict() {
                        tracing::warn!(
                            "Max retries ({}) exceeded saving order for course '{}'",
                            max_retries,
                            course_id
                        );
                    }
                    return Err(e.into());
                }
            }
        }
    }
}
