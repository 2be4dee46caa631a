//! Business Services
//!
//! This module contains the course site's read-side logic:
//!
//! - `TocBuilder` - Course → module → page tree construction
//! - `resolve_navigation` - Previous/next links across module boundaries
//! - `CategoryAggregator` - Per-category counts, read time, icon and link
//! - `CategoryCache` - Revision-keyed cache of aggregated categories
//! - `search` - Search, quick access, recent updates, category listings
//! - `ContentService` - Store-backed entry point tying the above together
//!
//! Everything except `ContentService` and `CategoryCache` is a pure function
//! of the page slice it is handed.

pub mod category_aggregator;
pub mod category_cache;
pub mod content_service;
pub mod error;
pub mod navigation;
pub mod search;
pub mod toc_builder;

pub use category_aggregator::{
    CategoryAggregator, CategoryCatalog, CategoryPreset, DEFAULT_CATEGORY_LINK_PREFIX,
};
pub use category_cache::{CacheStats, CategoryCache};
pub use content_service::ContentService;
pub use error::ContentServiceError;
pub use navigation::resolve_navigation;
pub use search::SearchResult;
pub use toc_builder::{build_toc, course_modules, course_sequence, ModuleGroup, TocBuilder};
