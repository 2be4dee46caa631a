//! Page Data Structures
//!
//! This module defines the `Page` record supplied by the content store and the
//! typed metadata accessors used by the aggregation and query code.
//!
//! # Architecture
//!
//! - **Flat records**: A page carries its own course/module linkage and ordering
//!   fields; the course tree is always derived, never stored
//! - **Denormalized titles**: Course and module titles travel with each page so
//!   the tree can be built from pages alone
//! - **String metadata**: Free-form `key → value` pairs; a missing key is "unset",
//!   which is distinct from an empty value
//!
//! # Examples
//!
//! ```rust
//! use courseway_core::models::Page;
//!
//! let page = Page::new("rust-101", "ownership", "Ownership", 1)
//!     .with_module_order(2)
//!     .with_metadata("category", "Getting Started")
//!     .with_metadata("readTimeMinutes", "7");
//!
//! assert_eq!(page.category(), Some("Getting Started"));
//! assert_eq!(page.read_time_minutes().unwrap(), Some(7));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// Metadata key holding the category title of a page
pub const CATEGORY_KEY: &str = "category";

/// Metadata key holding the estimated read time in whole minutes
pub const READ_TIME_KEY: &str = "readTimeMinutes";

/// Metadata key holding the quick-access slot of a page (positive integer)
pub const QUICK_ACCESS_KEY: &str = "quickAccess";

/// Errors raised while interpreting page metadata
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// A value expected to be numeric failed to parse
    #[error("Malformed metadata value for '{key}' on page '{page_id}': {value:?}")]
    Malformed {
        page_id: String,
        key: String,
        value: String,
    },
}

impl MetadataError {
    /// Create a malformed metadata error
    pub fn malformed(
        page_id: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Malformed {
            page_id: page_id.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A single content page ("chapter") as supplied by the content store.
///
/// # Fields
///
/// - `id`: Stable, opaque identifier
/// - `course_id` / `module_id`: Linkage; every page belongs to exactly one module
///   and every module to exactly one course
/// - `page_order`: Ordering value of the page within its module
/// - `module_order`: Ordering value of the page's module within its course
/// - `metadata`: Free-form string pairs (`category`, `readTimeMinutes`, ...)
/// - `published_at`: Publish/update timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Unique identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Short summary shown in listings and search results
    #[serde(default)]
    pub description: String,

    /// Markdown body
    #[serde(default)]
    pub content: String,

    /// URL slug; falls back to the id when empty
    #[serde(default)]
    pub slug: String,

    /// Free-form tags
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Owning course
    pub course_id: String,

    /// Course display title (denormalized)
    #[serde(default)]
    pub course_title: String,

    /// Owning module
    pub module_id: String,

    /// Module display title (denormalized)
    #[serde(default)]
    pub module_title: String,

    /// Ordering value within the module
    #[serde(default)]
    pub page_order: i64,

    /// Ordering value of the module within the course
    #[serde(default)]
    pub module_order: i64,

    /// String metadata; keys are case-sensitive
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,

    /// Publish/update timestamp; the Unix epoch when a snapshot omits it
    #[serde(default)]
    pub published_at: DateTime<Utc>,
}

impl Page {
    /// Create a page with a generated UUID
    ///
    /// Titles for the course and module default to their identifiers; use the
    /// builder methods to fill in the remaining fields.
    pub fn new(
        course_id: impl Into<String>,
        module_id: impl Into<String>,
        title: impl Into<String>,
        page_order: i64,
    ) -> Self {
        Self::new_with_id(
            Uuid::new_v4().to_string(),
            course_id,
            module_id,
            title,
            page_order,
        )
    }

    /// Create a page with an explicit identifier
    pub fn new_with_id(
        id: impl Into<String>,
        course_id: impl Into<String>,
        module_id: impl Into<String>,
        title: impl Into<String>,
        page_order: i64,
    ) -> Self {
        let course_id = course_id.into();
        let module_id = module_id.into();

        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            content: String::new(),
            slug: String::new(),
            tags: Vec::new(),
            course_title: course_id.clone(),
            course_id,
            module_title: module_id.clone(),
            module_id,
            page_order,
            module_order: 0,
            metadata: BTreeMap::new(),
            published_at: Utc::now(),
        }
    }

    pub fn with_module_order(mut self, module_order: i64) -> Self {
        self.module_order = module_order;
        self
    }

    pub fn with_course_title(mut self, title: impl Into<String>) -> Self {
        self.course_title = title.into();
        self
    }

    pub fn with_module_title(mut self, title: impl Into<String>) -> Self {
        self.module_title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = published_at;
        self
    }

    /// Raw metadata lookup; `None` means the key is unset
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Parse a metadata value as an unsigned integer
    ///
    /// Returns `Ok(None)` when the key is unset and `Err(MetadataError::Malformed)`
    /// when it is set but not a whole non-negative number. Surrounding whitespace
    /// is ignored.
    pub fn metadata_u32(&self, key: &str) -> Result<Option<u32>, MetadataError> {
        match self.metadata_value(key) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map(Some)
                .map_err(|_| MetadataError::malformed(&self.id, key, raw)),
        }
    }

    /// Trimmed category title, or `None` when unset or blank
    pub fn category(&self) -> Option<&str> {
        self.metadata_value(CATEGORY_KEY)
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Read time in minutes
    ///
    /// Any whole number is accepted and negative values clamp to 0.
    /// Non-numeric values are malformed.
    pub fn read_time_minutes(&self) -> Result<Option<u32>, MetadataError> {
        match self.metadata_value(READ_TIME_KEY) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map(|minutes| Some(u32::try_from(minutes.max(0)).unwrap_or(u32::MAX)))
                .map_err(|_| MetadataError::malformed(&self.id, READ_TIME_KEY, raw)),
        }
    }

    /// Slug used for links; the id stands in when no slug was set
    pub fn effective_slug(&self) -> &str {
        if self.slug.is_empty() {
            &self.id
        } else {
            &self.slug
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_page_defaults_titles_to_ids() {
        let page = Page::new("course-1", "module-1", "Intro", 1);
        assert_eq!(page.course_title, "course-1");
        assert_eq!(page.module_title, "module-1");
        assert_eq!(page.module_order, 0);
        assert!(Uuid::parse_str(&page.id).is_ok());
    }

    #[test]
    fn test_metadata_missing_is_distinct_from_empty() {
        let unset = Page::new_with_id("p1", "c", "m", "A", 1);
        let empty = unset.clone().with_metadata(CATEGORY_KEY, "");

        assert_eq!(unset.metadata_value(CATEGORY_KEY), None);
        assert_eq!(empty.metadata_value(CATEGORY_KEY), Some(""));
        assert_eq!(empty.category(), None);
    }

    #[test]
    fn test_category_is_trimmed() {
        let page = Page::new_with_id("p1", "c", "m", "A", 1).with_metadata(CATEGORY_KEY, "  FAQ ");
        assert_eq!(page.category(), Some("FAQ"));

        let blank = Page::new_with_id("p2", "c", "m", "B", 1).with_metadata(CATEGORY_KEY, "   ");
        assert_eq!(blank.category(), None);
    }

    #[test]
    fn test_read_time_parsing() {
        let page = Page::new_with_id("p1", "c", "m", "A", 1);
        assert_eq!(page.read_time_minutes().unwrap(), None);

        let page = page.with_metadata(READ_TIME_KEY, " 12 ");
        assert_eq!(page.read_time_minutes().unwrap(), Some(12));

        let page = page.with_metadata(READ_TIME_KEY, "ten");
        let err = page.read_time_minutes().unwrap_err();
        assert_eq!(err, MetadataError::malformed("p1", READ_TIME_KEY, "ten"));
        assert_eq!(
            err.to_string(),
            "Malformed metadata value for 'readTimeMinutes' on page 'p1': \"ten\""
        );

        let page = page.with_metadata(READ_TIME_KEY, "-3");
        assert_eq!(page.read_time_minutes().unwrap(), Some(0));

        let page = page.with_metadata(READ_TIME_KEY, "1.5");
        assert!(page.read_time_minutes().is_err());
    }

    #[test]
    fn test_effective_slug_falls_back_to_id() {
        let page = Page::new_with_id("p1", "c", "m", "A", 1);
        assert_eq!(page.effective_slug(), "p1");
        assert_eq!(page.with_slug("intro").effective_slug(), "intro");
    }

    #[test]
    fn test_page_deserialization_camel_case() {
        let value = json!({
            "id": "p1",
            "title": "Borrowing",
            "courseId": "rust-101",
            "courseTitle": "Rust 101",
            "moduleId": "ownership",
            "moduleTitle": "Ownership",
            "pageOrder": 2,
            "moduleOrder": 1,
            "metadata": { "category": "Using Blake", "readTimeMinutes": "4" },
            "publishedAt": "2025-01-03T10:00:00Z"
        });

        let page: Page = serde_json::from_value(value).unwrap();
        assert_eq!(page.course_title, "Rust 101");
        assert_eq!(page.page_order, 2);
        assert_eq!(page.module_order, 1);
        assert!(page.tags.is_empty());
        assert_eq!(page.description, "");
        assert_eq!(page.read_time_minutes().unwrap(), Some(4));
    }
}
