//! Store Error Types
//!
//! This module defines error types for page store operations: snapshot
//! loading, lookups, and optimistic-concurrency failures on order writes.

use thiserror::Error;

/// Page store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// No page of the course exists in the store
    #[error("Course not found: {course_id}")]
    CourseNotFound { course_id: String },

    /// A referenced page does not exist in the course
    #[error("Page not found: {page_id}")]
    PageNotFound { page_id: String },

    /// Version conflict (optimistic concurrency control)
    #[error("Version conflict for course {course_id}: expected version {expected_version}, found {actual_version}")]
    VersionConflict {
        course_id: String,
        expected_version: u64,
        actual_version: u64,
    },

    /// Order was computed from pages the course no longer has exactly
    #[error("Stale order for course {course_id}: {expected_chapters} chapters in order, {actual_chapters} in course")]
    StaleOrder {
        course_id: String,
        expected_chapters: usize,
        actual_chapters: usize,
    },

    /// Snapshot file could not be parsed
    #[error("Failed to load page snapshot: {0}")]
    SnapshotLoad(String),

    /// Snapshot file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create a course not found error
    pub fn course_not_found(course_id: impl Into<String>) -> Self {
        Self::CourseNotFound {
            course_id: course_id.into(),
        }
    }

    /// Create a page not found error
    pub fn page_not_found(page_id: impl Into<String>) -> Self {
        Self::PageNotFound {
            page_id: page_id.into(),
        }
    }

    /// Create a version conflict error
    pub fn version_conflict(
        course_id: impl Into<String>,
        expected_version: u64,
        actual_version: u64,
    ) -> Self {
        Self::VersionConflict {
            course_id: course_id.into(),
            expected_version,
            actual_version,
        }
    }

    /// Create a stale order error
    pub fn stale_order(
        course_id: impl Into<String>,
        expected_chapters: usize,
        actual_chapters: usize,
    ) -> Self {
        Self::StaleOrder {
            course_id: course_id.into(),
            expected_chapters,
            actual_chapters,
        }
    }

    /// Create a snapshot load error
    pub fn snapshot_load(msg: impl Into<String>) -> Self {
        Self::SnapshotLoad(msg.into())
    }

    /// Whether retrying with a fresh version may succeed
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}
