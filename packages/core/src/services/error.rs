//! Service Layer Error Types
//!
//! This module defines error types for content service operations, chaining
//! ordering and store failures underneath the request-level failure states.

use crate::db::StoreError;
use crate::operations::OrderError;
use thiserror::Error;

/// Content service errors
///
/// `PageNotFound` and `CourseNotFound` are explicit failure states for
/// identifiers that do not appear in the supplied collection; callers must not
/// fall back to a default page.
#[derive(Error, Debug)]
pub enum ContentServiceError {
    /// Page not found by ID
    #[error("Page not found: {id}")]
    PageNotFound { id: String },

    /// Course not found by ID
    #[error("Course not found: {id}")]
    CourseNotFound { id: String },

    /// Progress call without a usable user identity
    #[error("Invalid user id: {user_id:?}")]
    InvalidUser { user_id: String },

    /// Ordering edit rejected or not persisted
    #[error("Order update failed: {0}")]
    Order(#[from] OrderError),

    /// Store operation failed
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),
}

impl ContentServiceError {
    /// Create a page not found error
    pub fn page_not_found(id: impl Into<String>) -> Self {
        Self::PageNotFound { id: id.into() }
    }

    /// Create a course not found error
    pub fn course_not_found(id: impl Into<String>) -> Self {
        Self::CourseNotFound { id: id.into() }
    }

    /// Create an invalid user error
    pub fn invalid_user(user_id: impl Into<String>) -> Self {
        Self::InvalidUser {
            user_id: user_id.into(),
        }
    }

    /// Whether the error names an identifier missing from the collection
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PageNotFound { .. }
                | Self::CourseNotFound { .. }
                | Self::Order(OrderError::CourseNotFound { .. })
        )
    }
}
