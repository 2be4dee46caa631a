//! Error types for course ordering operations
//!
//! Ordering edits arrive from the course editor and are untrusted: every
//! referenced identifier is checked against the course before any rank is
//! assigned.

use crate::db::StoreError;
use std::fmt;
use thiserror::Error;

/// Which kind of identifier an ordering edit referenced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Module,
    Chapter,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Module => write!(f, "Module"),
            ReferenceKind::Chapter => write!(f, "Chapter"),
        }
    }
}

/// Errors that can occur while normalizing or persisting an ordering edit
#[derive(Error, Debug)]
pub enum OrderError {
    /// No page of the course exists in the collection
    #[error("Course '{course_id}' does not exist")]
    CourseNotFound { course_id: String },

    /// The edit references an identifier outside the course
    ///
    /// Also raised when a chapter is assigned to a module of another course.
    #[error("{kind} '{reference_id}' does not belong to course '{course_id}'")]
    ForeignReference {
        course_id: String,
        kind: ReferenceKind,
        reference_id: String,
    },

    /// The same identifier was submitted twice in one list
    #[error("{kind} '{reference_id}' was submitted more than once")]
    DuplicateReference {
        kind: ReferenceKind,
        reference_id: String,
    },

    /// Persisting the canonical order failed
    ///
    /// Version conflicts land here once retries are exhausted.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl OrderError {
    /// Create a CourseNotFound error
    pub fn course_not_found(course_id: impl Into<String>) -> Self {
        Self::CourseNotFound {
            course_id: course_id.into(),
        }
    }

    /// Create a ForeignReference error
    pub fn foreign_reference(
        course_id: impl Into<String>,
        kind: ReferenceKind,
        reference_id: impl Into<String>,
    ) -> Self {
        Self::ForeignReference {
            course_id: course_id.into(),
            kind,
            reference_id: reference_id.into(),
        }
    }

    /// Create a DuplicateReference error
    pub fn duplicate_reference(kind: ReferenceKind, reference_id: impl Into<String>) -> Self {
        Self::DuplicateReference {
            kind,
            reference_id: reference_id.into(),
        }
    }
}
