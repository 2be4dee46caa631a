//! Courseway Core Content Logic
//!
//! This crate turns a flat collection of course pages into the structures a
//! documentation-style course site needs: a table of contents, previous/next
//! navigation, category summaries, and normalized course orderings.
//!
//! # Architecture
//!
//! - **Pure builders**: TOC, navigation, ordering and aggregation are plain
//!   functions over `&[Page]`, deterministic for any input order
//! - **Snapshot store**: the `PageStore` trait hands out immutable,
//!   `Arc`-shared snapshots tagged with a revision
//! - **Optimistic ordering writes**: order saves carry a per-course version and
//!   retry on conflict, and must rank every current page of the course
//! - **Per-user progress**: completed pages are stored per user and flagged on
//!   navigation and course trees
//!
//! # Modules
//!
//! - [`models`] - Data structures (Page, TocNode, Category, CanonicalOrder)
//! - [`services`] - TOC building, navigation, categories, search, ContentService
//! - [`operations`] - Order normalization and persistence
//! - [`db`] - Page store trait and in-memory implementation
//! - [`config`] - JSON configuration
//! - [`utils`] - Markdown flattening for excerpts

pub mod config;
pub mod db;
pub mod models;
pub mod operations;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::{ConfigError, CourseConfig};
pub use db::{InMemoryPageStore, PageSnapshot, PageStore, StoreError};
pub use models::*;
pub use operations::{OrderEditor, OrderError, OrderPersistQueue};
pub use services::*;
