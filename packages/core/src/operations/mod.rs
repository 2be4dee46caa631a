//! Course Order Operations
//!
//! Editing the order of a course happens in two steps:
//!
//! 1. [`OrderEditor`] validates the submitted positions against the current
//!    pages and normalizes them into a [`CanonicalOrder`](crate::models::CanonicalOrder)
//! 2. [`OrderPersistQueue`] writes that order to the store, retrying on
//!    version conflicts

pub mod error;
pub mod order_editor;
pub mod order_queue;

pub use error::{OrderError, ReferenceKind};
pub use order_editor::OrderEditor;
pub use order_queue::OrderPersistQueue;
