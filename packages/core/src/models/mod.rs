//! Data Models
//!
//! This module contains the data structures used throughout Courseway:
//!
//! - `Page` - Flat content record supplied by the store
//! - `TocNode` / `Navigation` - Derived course tree and previous/next links
//! - `Category` - Derived category aggregate
//! - `ModulePosition` / `ChapterPosition` / `CanonicalOrder` - Ordering edits
//!
//! Only `Page` is persisted (by the store); everything else is a value object
//! computed from a page collection.

mod category;
mod order;
mod page;
mod toc;

pub use category::Category;
pub use order::{CanonicalOrder, ChapterPosition, ChapterRank, ModulePosition, ModuleRank};
pub use page::{MetadataError, Page, CATEGORY_KEY, QUICK_ACCESS_KEY, READ_TIME_KEY};
pub use toc::{NavLink, Navigation, TocNode, TocNodeKind};
